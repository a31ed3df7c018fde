//! Module for [`BeatTimestamp`].

use crate::SampleRate;
use core::fmt::{Display, Formatter};
use core::str::FromStr;
use core::time::Duration;
use thiserror::Error;

/// Possible errors when parsing a [`BeatTimestamp`] from text.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseBeatTimestampError {
    #[error("empty timestamp")]
    Empty,
    #[error("invalid timestamp {0:?}: expected seconds with at most two decimals")]
    InvalidFormat(alloc::string::String),
    #[error("timestamp {0:?} is too large")]
    Overflow(alloc::string::String),
}

/// Relative time of a beat since the beginning of the sample buffer, with a
/// fixed precision of two decimal places (centiseconds).
///
/// The value is stored exactly, so the textual representation never suffers
/// from floating point noise: it always renders as `S.CC`, e.g., `0.20`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BeatTimestamp {
    centis: u64,
}

impl BeatTimestamp {
    /// Number of decimal places of a timestamp in seconds.
    pub const DECIMALS: usize = 2;
    const CENTIS_PER_SEC: u64 = 100;

    /// Creates a timestamp from whole centiseconds.
    #[must_use]
    pub const fn from_centis(centis: u64) -> Self {
        Self { centis }
    }

    /// Returns the rounded time of the sample at `index`, i.e., the time
    /// [`SampleRate::index_to_secs`] reports, rounded with
    /// [`Self::from_secs_f64`].
    #[must_use]
    pub fn from_sample_index(index: usize, sample_rate: SampleRate) -> Self {
        let secs = sample_rate.index_to_secs(index);
        // index_to_secs is always finite and non-negative.
        Self::from_secs_f64(secs).unwrap_or_default()
    }

    /// Rounds seconds to the nearest centisecond. The rounding works on the
    /// exact binary value of `secs`; exact ties round up. For example,
    /// `0.125` becomes `0.13` but `1.005` (stored as `1.00499999...`)
    /// becomes `1.00`.
    ///
    /// Returns `None` for negative or non-finite values. Values beyond
    /// `u64::MAX` centiseconds saturate.
    #[must_use]
    pub fn from_secs_f64(secs: f64) -> Option<Self> {
        if !secs.is_finite() || (secs.is_sign_negative() && secs != 0.0) {
            return None;
        }

        // secs = mantissa * 2^exp
        let bits = secs.to_bits();
        let biased_exp = ((bits >> 52) & 0x7ff) as i32;
        let fraction = bits & ((1 << 52) - 1);
        let (mantissa, exp) = if biased_exp == 0 {
            (fraction, -1074)
        } else {
            (fraction | (1 << 52), biased_exp - 1075)
        };
        let scaled = u128::from(mantissa) * u128::from(Self::CENTIS_PER_SEC);

        let centis = if exp >= 0 {
            if exp > 64 {
                u64::MAX
            } else {
                u64::try_from(scaled << exp).unwrap_or(u64::MAX)
            }
        } else {
            let shift = exp.unsigned_abs();
            if shift >= 64 {
                // scaled < 2^60, so the value is below 1/16.
                0
            } else {
                let half = 1_u128 << (shift - 1);
                ((scaled + half) >> shift) as u64
            }
        };
        Some(Self { centis })
    }

    /// Returns whole centiseconds.
    #[must_use]
    pub const fn as_centis(self) -> u64 {
        self.centis
    }

    /// Returns the time in seconds.
    #[must_use]
    pub fn as_secs_f64(self) -> f64 {
        self.centis as f64 / Self::CENTIS_PER_SEC as f64
    }

    /// Returns the time as [`Duration`].
    #[must_use]
    pub const fn as_duration(self) -> Duration {
        Duration::from_millis(self.centis.saturating_mul(10))
    }
}

impl Display for BeatTimestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{}.{:02}",
            self.centis / Self::CENTIS_PER_SEC,
            self.centis % Self::CENTIS_PER_SEC
        )
    }
}

impl FromStr for BeatTimestamp {
    type Err = ParseBeatTimestampError;

    /// Parses `S`, `S.C`, or `S.CC`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseBeatTimestampError::Empty);
        }
        let invalid = || ParseBeatTimestampError::InvalidFormat(s.into());

        let (secs, fraction) = s.split_once('.').unwrap_or((s, ""));
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if secs.is_empty()
            || !all_digits(secs)
            || !all_digits(fraction)
            || fraction.len() > Self::DECIMALS
            || (s.contains('.') && fraction.is_empty())
        {
            return Err(invalid());
        }

        let secs = secs
            .parse::<u64>()
            .map_err(|_| ParseBeatTimestampError::Overflow(s.into()))?;
        let fraction = match fraction.len() {
            0 => 0,
            1 => u64::from(fraction.as_bytes()[0] - b'0') * 10,
            _ => fraction.parse::<u64>().map_err(|_| invalid())?,
        };

        secs.checked_mul(Self::CENTIS_PER_SEC)
            .and_then(|centis| centis.checked_add(fraction))
            .map(Self::from_centis)
            .ok_or_else(|| ParseBeatTimestampError::Overflow(s.into()))
    }
}
