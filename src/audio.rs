//! Decoded audio as an audio decoder hands it over (one sample vector per
//! channel plus the sample rate) and the selection of the mono channel the
//! [`BeatDetector`] operates on.
//!
//! Nothing is silently discarded: the caller decides via [`ChannelSelection`]
//! whether a single channel is analyzed or all channels are downmixed.
//!
//! [`BeatDetector`]: crate::BeatDetector

use crate::SampleRate;
use alloc::borrow::Cow;
use alloc::vec::Vec;
use core::time::Duration;
use thiserror::Error;

/// Possible errors when working with the channels of [`DecodedAudio`].
#[derive(Copy, Clone, Debug, Error, PartialEq, Eq)]
pub enum ChannelError {
    /// There is not a single channel.
    #[error("audio has no channels")]
    NoChannels,
    /// The selected channel does not exist.
    #[error("channel {index} does not exist, audio has {count} channel(s)")]
    ChannelOutOfRange { index: usize, count: usize },
    /// Two channels have a different number of samples.
    #[error("channels have different lengths ({0} and {1} samples)")]
    LengthMismatch(usize, usize),
    /// The interleaved samples don't form complete frames.
    #[error("{len} interleaved samples are not a multiple of {channels} channel(s)")]
    IncompleteFrame { len: usize, channels: usize },
}

/// Which channel of multichannel audio is handed to the beat detector.
///
/// Defaults to the first channel.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ChannelSelection {
    /// Analyze a single channel. `Channel(0)` is the left channel of stereo
    /// audio.
    Channel(usize),
    /// Analyze the per-frame average of all channels.
    Downmix,
}

impl Default for ChannelSelection {
    fn default() -> Self {
        Self::Channel(0)
    }
}

/// Audio data with uniformly sampled `f32` samples per channel, typically
/// in range `-1.0..=1.0`.
#[derive(Clone, Debug, PartialEq)]
pub struct DecodedAudio {
    channels: Vec<Vec<f32>>,
    sample_rate: SampleRate,
}

impl DecodedAudio {
    /// Creates a new object from separate channels of equal length.
    pub fn new(channels: Vec<Vec<f32>>, sample_rate: SampleRate) -> Result<Self, ChannelError> {
        check_equal_lengths(&channels)?;
        Ok(Self {
            channels,
            sample_rate,
        })
    }

    /// Creates a new object from mono samples.
    #[must_use]
    pub fn from_mono(samples: Vec<f32>, sample_rate: SampleRate) -> Self {
        Self {
            channels: alloc::vec![samples],
            sample_rate,
        }
    }

    /// Creates a new object from interleaved samples, i.e., `LRLRLR` for
    /// stereo.
    pub fn from_interleaved(
        samples: &[f32],
        channel_count: usize,
        sample_rate: SampleRate,
    ) -> Result<Self, ChannelError> {
        if channel_count == 0 {
            return Err(ChannelError::NoChannels);
        }
        if samples.len() % channel_count != 0 {
            return Err(ChannelError::IncompleteFrame {
                len: samples.len(),
                channels: channel_count,
            });
        }

        let frame_count = samples.len() / channel_count;
        let mut channels = alloc::vec![Vec::with_capacity(frame_count); channel_count];
        for frame in samples.chunks_exact(channel_count) {
            for (channel, &sample) in channels.iter_mut().zip(frame) {
                channel.push(sample);
            }
        }

        Ok(Self {
            channels,
            sample_rate,
        })
    }

    /// Returns the sample rate.
    #[must_use]
    pub const fn sample_rate(&self) -> SampleRate {
        self.sample_rate
    }

    /// Returns the number of channels.
    #[must_use]
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Returns the number of samples per channel.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    /// Returns the samples of the channel with the given index.
    #[must_use]
    pub fn channel(&self, index: usize) -> Option<&[f32]> {
        self.channels.get(index).map(Vec::as_slice)
    }

    /// Returns the playback duration.
    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.sample_rate.index_to_secs(self.frame_count()))
    }

    /// Returns the mono samples to analyze. A single channel is borrowed, a
    /// downmix is computed.
    pub fn mono(&self, selection: ChannelSelection) -> Result<Cow<'_, [f32]>, ChannelError> {
        match selection {
            ChannelSelection::Channel(index) => self
                .channel(index)
                .map(Cow::Borrowed)
                .ok_or(ChannelError::ChannelOutOfRange {
                    index,
                    count: self.channel_count(),
                }),
            ChannelSelection::Downmix => downmix(&self.channels).map(Cow::Owned),
        }
    }

    /// Consumes the object and returns the separate channels.
    #[must_use]
    pub fn into_channels(self) -> Vec<Vec<f32>> {
        self.channels
    }
}

fn check_equal_lengths<C: AsRef<[f32]>>(channels: &[C]) -> Result<usize, ChannelError> {
    let (first, rest) = channels.split_first().ok_or(ChannelError::NoChannels)?;
    let len = first.as_ref().len();
    match rest.iter().find(|channel| channel.as_ref().len() != len) {
        Some(other) => Err(ChannelError::LengthMismatch(len, other.as_ref().len())),
        None => Ok(len),
    }
}

/// Averages all channels frame by frame into one mono channel. All channels
/// must have the same length.
pub fn downmix<C: AsRef<[f32]>>(channels: &[C]) -> Result<Vec<f32>, ChannelError> {
    let frame_count = check_equal_lengths(channels)?;
    if let [l, r] = channels {
        return Ok(l
            .as_ref()
            .iter()
            .zip(r.as_ref())
            .map(|(&l, &r)| stereo_to_mono(l, r))
            .collect());
    }

    let channel_count = channels.len() as f32;
    let mono = (0..frame_count)
        .map(|frame| {
            channels
                .iter()
                .map(|channel| channel.as_ref()[frame])
                .sum::<f32>()
                / channel_count
        })
        .collect();
    Ok(mono)
}

/// Transforms two stereo samples (that reflect the same point in time on
/// different channels) into one mono sample.
#[inline]
#[must_use]
pub fn stereo_to_mono(l: f32, r: f32) -> f32 {
    (l + r) / 2.0
}

/// Transforms an audio sample in range `i16::MIN..=i16::MAX` to a `f32` in
/// range `-1.0..=1.0`.
#[inline]
#[must_use]
pub fn i16_sample_to_f32(val: i16) -> f32 {
    int_sample_to_f32(i32::from(val), 16)
}

/// Transforms a signed integer PCM sample with the given bit depth to a `f32`
/// in range `-1.0..=1.0`. The most negative value is clamped to `-1.0`.
#[inline]
#[must_use]
pub fn int_sample_to_f32(val: i32, bits_per_sample: u16) -> f32 {
    debug_assert!((2..=32).contains(&bits_per_sample));
    let max = ((1_i64 << (bits_per_sample - 1)) - 1) as f32;
    // If to prevent division result < -1.0.
    let value = val as f32 / max;
    if value < -1.0 {
        -1.0
    } else {
        value
    }
}
