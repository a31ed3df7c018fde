//! Module for [`DetectorConfig`].

use core::time::Duration;
use thiserror::Error;

/// Possible errors when building a [`DetectorConfig`].
#[derive(Copy, Clone, Debug, Error, PartialEq)]
pub enum InvalidConfigError {
    /// The threshold is NaN or infinite.
    #[error("threshold {0} is not a finite number")]
    NonFiniteThreshold(f64),
    /// The minimum gap is NaN or infinite.
    #[error("minimum gap {0} s is not a finite number")]
    NonFiniteMinGap(f64),
    /// The minimum gap is below zero.
    #[error("minimum gap {0} s must not be negative")]
    NegativeMinGap(f64),
}

/// Validated parameters of the [`BeatDetector`].
///
/// The defaults are [`DetectorConfig::DEFAULT_THRESHOLD`] and
/// [`DetectorConfig::DEFAULT_MIN_GAP_SECS`].
///
/// [`BeatDetector`]: crate::BeatDetector
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DetectorConfig {
    threshold: f64,
    min_gap_secs: f64,
    debounce_from_start: bool,
}

impl DetectorConfig {
    /// Amplitude a sample must exceed to be a beat candidate.
    pub const DEFAULT_THRESHOLD: f64 = 0.4;
    /// Minimum time in seconds between two accepted beats.
    pub const DEFAULT_MIN_GAP_SECS: f64 = 0.2;

    /// Creates a new config.
    ///
    /// - `threshold`: a sample is a beat candidate if its signed value is
    ///   strictly greater than this. Typical decoded audio lies in
    ///   `-1.0..=1.0`, but no range is enforced.
    /// - `min_gap_secs`: a candidate is only accepted if more than this
    ///   amount of seconds passed since the previous accepted beat.
    pub fn new(threshold: f64, min_gap_secs: f64) -> Result<Self, InvalidConfigError> {
        if !threshold.is_finite() {
            return Err(InvalidConfigError::NonFiniteThreshold(threshold));
        }
        if !min_gap_secs.is_finite() {
            return Err(InvalidConfigError::NonFiniteMinGap(min_gap_secs));
        }
        if min_gap_secs < 0.0 {
            return Err(InvalidConfigError::NegativeMinGap(min_gap_secs));
        }

        Ok(Self {
            threshold,
            min_gap_secs,
            debounce_from_start: false,
        })
    }

    /// Creates a new config with the minimum gap given as [`Duration`].
    pub fn with_min_gap(threshold: f64, min_gap: Duration) -> Result<Self, InvalidConfigError> {
        Self::new(threshold, min_gap.as_secs_f64())
    }

    /// By default, the first sample above the threshold is always accepted.
    /// If `debounce_from_start` is set, the debounce gap is also measured
    /// from the beginning of the buffer, i.e., nothing at or before
    /// `min_gap_secs` can be a beat.
    #[must_use]
    pub const fn with_debounce_from_start(mut self, debounce_from_start: bool) -> Self {
        self.debounce_from_start = debounce_from_start;
        self
    }

    /// Returns the amplitude threshold.
    #[must_use]
    pub const fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Returns the minimum gap between two beats in seconds.
    #[must_use]
    pub const fn min_gap_secs(&self) -> f64 {
        self.min_gap_secs
    }

    /// Returns the minimum gap between two beats.
    #[must_use]
    pub fn min_gap(&self) -> Duration {
        Duration::try_from_secs_f64(self.min_gap_secs).unwrap_or(Duration::MAX)
    }

    /// Returns whether the debounce gap is measured from the beginning of the
    /// buffer.
    #[must_use]
    pub const fn debounce_from_start(&self) -> bool {
        self.debounce_from_start
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            threshold: Self::DEFAULT_THRESHOLD,
            min_gap_secs: Self::DEFAULT_MIN_GAP_SECS,
            debounce_from_start: false,
        }
    }
}
