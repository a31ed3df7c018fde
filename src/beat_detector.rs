/*
MIT License

Copyright (c) 2024 Philipp Schuster

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/
//! Module for [`BeatDetector`].

use crate::{BeatTimestamp, DetectorConfig, InvalidInputError, SampleRate};
use alloc::vec::Vec;

/// Information about a detected beat.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BeatInfo {
    /// Index of the sample in the buffer that triggered the beat.
    pub index: usize,
    /// The value of the sample.
    pub value: f32,
    /// Exact relative time in seconds since the beginning of the buffer.
    /// This is what the debounce gap is measured against.
    pub time_secs: f64,
    /// Relative time rounded to two decimal places.
    pub timestamp: BeatTimestamp,
}

/// Beat detector following the properties described in the
/// [module description].
///
/// A sample is a beat if its signed value is strictly above the threshold and
/// strictly more than the minimum gap passed since the previous beat. Large
/// negative excursions are never beats. The detector keeps no state between
/// invocations.
///
/// ## Example
/// ```rust
/// use amplitude_beats::{BeatDetector, BeatTimestamp, DetectorConfig};
/// let samples = [0.0, 0.0, 0.5, 0.5, 0.5, 0.0, 0.0, 0.5, 0.0, 0.0];
/// let detector = BeatDetector::new(DetectorConfig::default());
///
/// let beats = detector.detect(&samples, 10).unwrap();
/// assert_eq!(
///     beats,
///     [BeatTimestamp::from_centis(20), BeatTimestamp::from_centis(70)]
/// );
/// ```
///
/// [module description]: crate
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct BeatDetector {
    config: DetectorConfig,
}

impl BeatDetector {
    /// Creates a new beat detector.
    #[must_use]
    pub const fn new(config: DetectorConfig) -> Self {
        Self { config }
    }

    /// Returns the config of this detector.
    #[must_use]
    pub const fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Detects all beats in the given mono samples and returns their rounded
    /// timestamps in ascending order.
    ///
    /// Fails if the sample rate is not positive. This is checked before any
    /// processing. An empty buffer or a buffer without any sample above the
    /// threshold results in an empty sequence.
    pub fn detect<R>(
        &self,
        mono_samples: &[f32],
        sample_rate: R,
    ) -> Result<Vec<BeatTimestamp>, InvalidInputError>
    where
        R: TryInto<SampleRate>,
        InvalidInputError: From<R::Error>,
    {
        let sample_rate = sample_rate.try_into()?;
        let beats = self
            .beats(mono_samples, sample_rate)
            .map(|info| info.timestamp)
            .collect::<Vec<_>>();

        log::debug!(
            "Detected {} beats in {} samples ({}, threshold={}, min_gap={}s)",
            beats.len(),
            mono_samples.len(),
            sample_rate,
            self.config.threshold(),
            self.config.min_gap_secs()
        );

        Ok(beats)
    }

    /// Returns a lazy iterator over all beats in the given mono samples.
    /// Unlike [`Self::detect`], it exposes the full [`BeatInfo`].
    #[must_use]
    pub fn beats<'a>(&self, mono_samples: &'a [f32], sample_rate: SampleRate) -> BeatIterator<'a> {
        BeatIterator::new(mono_samples, sample_rate, self.config)
    }
}

/// Iterates the beats of a sample buffer in a single pass.
///
/// Created by [`BeatDetector::beats`].
#[derive(Debug, Clone)]
pub struct BeatIterator<'a> {
    samples: &'a [f32],
    index: usize,
    sample_rate: SampleRate,
    config: DetectorConfig,
    /// Unrounded time of the previous beat.
    last_beat_secs: Option<f64>,
}

impl<'a> BeatIterator<'a> {
    fn new(samples: &'a [f32], sample_rate: SampleRate, config: DetectorConfig) -> Self {
        let last_beat_secs = config.debounce_from_start().then_some(0.0);
        Self {
            samples,
            index: 0,
            sample_rate,
            config,
            last_beat_secs,
        }
    }

    #[inline]
    fn is_after_min_gap(&self, time_secs: f64) -> bool {
        self.last_beat_secs
            .map_or(true, |last| time_secs - last > self.config.min_gap_secs())
    }
}

impl Iterator for BeatIterator<'_> {
    type Item = BeatInfo;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&value) = self.samples.get(self.index) {
            let index = self.index;
            self.index += 1;

            // Compare in f64: the threshold is an f64 and a sample equal to
            // `0.4_f32` is slightly above `0.4_f64`. NaN is never a beat.
            if value.is_nan() || f64::from(value) <= self.config.threshold() {
                continue;
            }

            let time_secs = self.sample_rate.index_to_secs(index);
            if !self.is_after_min_gap(time_secs) {
                continue;
            }

            // Gap checks use the exact time; only the reported value is
            // rounded.
            self.last_beat_secs = Some(time_secs);
            let info = BeatInfo {
                index,
                value,
                time_secs,
                timestamp: BeatTimestamp::from_sample_index(index, self.sample_rate),
            };
            log::trace!("beat at sample {index}: {info:?}");
            return Some(info);
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.samples.len() - self.index))
    }
}

/// Detects beats with the default [`DetectorConfig`]: threshold `0.4` and a
/// minimum gap of `0.2` seconds.
///
/// This is a shortcut for [`BeatDetector::detect`].
pub fn detect_beats<R>(
    mono_samples: &[f32],
    sample_rate: R,
) -> Result<Vec<BeatTimestamp>, InvalidInputError>
where
    R: TryInto<SampleRate>,
    InvalidInputError: From<R::Error>,
{
    BeatDetector::default().detect(mono_samples, sample_rate)
}

/// Returns the maximum signed sample value of the buffer, or `None` if the
/// buffer is empty or only contains NaN. Useful to re-examine a threshold
/// against the actual amplitudes of a recording.
#[must_use]
pub fn peak_amplitude(mono_samples: &[f32]) -> Option<f32> {
    mono_samples
        .iter()
        .copied()
        .filter(|sample| !sample.is_nan())
        .reduce(libm::fmaxf)
}
