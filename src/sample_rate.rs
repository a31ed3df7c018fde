//! Module for [`SampleRate`], the validated sampling frequency of a sample
//! buffer.

use core::convert::Infallible;
use core::fmt::{Display, Formatter};
use core::num::NonZeroU32;
use thiserror::Error;

/// The input handed to the beat detector is not usable. This is reported
/// before any sample is looked at.
#[derive(Copy, Clone, Debug, Error, PartialEq)]
pub enum InvalidInputError {
    /// The sample rate is zero or negative.
    #[error("sample rate must be positive, got {0}")]
    NonPositiveSampleRate(i64),
    /// The sample rate does not fit into a `u32`.
    #[error("sample rate {0} is too large")]
    SampleRateTooLarge(u64),
    /// A floating point sample rate is NaN, infinite, or has a fractional
    /// part.
    #[error("sample rate {0} is not a finite whole number")]
    NotAWholeNumber(f32),
}

impl From<Infallible> for InvalidInputError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

/// A sample rate in samples per second (Hertz). Guaranteed to be positive, so
/// that converting a sample index to a time never divides by zero.
///
/// Typically, this is a value such as `44100`.
#[derive(Copy, Clone, Debug, PartialOrd, PartialEq, Ord, Eq, Hash)]
#[repr(transparent)]
pub struct SampleRate(NonZeroU32);

impl SampleRate {
    /// The de-facto default sampling rate of 44.1 kHz.
    pub const CD_QUALITY: Self = Self(match NonZeroU32::new(44100) {
        Some(rate) => rate,
        None => unreachable!(),
    });

    /// Creates a new sample rate. Returns `None` if `hz` is zero.
    #[must_use]
    pub const fn new(hz: u32) -> Option<Self> {
        match NonZeroU32::new(hz) {
            Some(hz) => Some(Self(hz)),
            None => None,
        }
    }

    /// Returns the underlying raw value.
    #[must_use]
    pub const fn hz(self) -> u32 {
        self.0.get()
    }

    /// Returns the relative time in seconds of the sample at `index`.
    #[inline]
    #[must_use]
    pub fn index_to_secs(self, index: usize) -> f64 {
        index as f64 / self.hz() as f64
    }
}

impl TryFrom<u32> for SampleRate {
    type Error = InvalidInputError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(InvalidInputError::NonPositiveSampleRate(0))
    }
}

impl TryFrom<i64> for SampleRate {
    type Error = InvalidInputError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value <= 0 {
            return Err(InvalidInputError::NonPositiveSampleRate(value));
        }
        let value = u32::try_from(value)
            .map_err(|_| InvalidInputError::SampleRateTooLarge(value as u64))?;
        Self::try_from(value)
    }
}

impl TryFrom<i32> for SampleRate {
    type Error = InvalidInputError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::try_from(i64::from(value))
    }
}

impl TryFrom<u64> for SampleRate {
    type Error = InvalidInputError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        let value =
            u32::try_from(value).map_err(|_| InvalidInputError::SampleRateTooLarge(value))?;
        Self::try_from(value)
    }
}

impl TryFrom<usize> for SampleRate {
    type Error = InvalidInputError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::try_from(value as u64)
    }
}

impl TryFrom<f32> for SampleRate {
    type Error = InvalidInputError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        if !value.is_finite() || libm::truncf(value) != value {
            Err(InvalidInputError::NotAWholeNumber(value))
        } else if value <= 0.0 {
            Err(InvalidInputError::NonPositiveSampleRate(value as i64))
        } else if value >= u32::MAX as f32 {
            // `u32::MAX as f32` rounds up to 2^32.
            Err(InvalidInputError::SampleRateTooLarge(value as u64))
        } else {
            Self::try_from(value as u32)
        }
    }
}

impl Display for SampleRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} Hz", self.hz())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::string::ToString;

    #[test]
    fn test_sample_rate_from_integers() {
        check!(SampleRate::try_from(44100_u32).map(SampleRate::hz) == Ok(44100));
        check!(SampleRate::try_from(48000_i64).map(SampleRate::hz) == Ok(48000));
        check!(SampleRate::try_from(1_i32).map(SampleRate::hz) == Ok(1));
        check!(SampleRate::try_from(8000_usize).map(SampleRate::hz) == Ok(8000));

        check!(
            SampleRate::try_from(0_u32) == Err(InvalidInputError::NonPositiveSampleRate(0))
        );
        check!(
            SampleRate::try_from(0_i32) == Err(InvalidInputError::NonPositiveSampleRate(0))
        );
        check!(
            SampleRate::try_from(-44100_i64)
                == Err(InvalidInputError::NonPositiveSampleRate(-44100))
        );
        check!(
            SampleRate::try_from(u64::from(u32::MAX) + 1)
                == Err(InvalidInputError::SampleRateTooLarge(u64::from(u32::MAX) + 1))
        );
    }

    #[test]
    fn test_sample_rate_from_f32() {
        check!(SampleRate::try_from(44100.0_f32).map(SampleRate::hz) == Ok(44100));
        check!(
            SampleRate::try_from(-1.0_f32) == Err(InvalidInputError::NonPositiveSampleRate(-1))
        );
        check!(
            SampleRate::try_from(0.0_f32) == Err(InvalidInputError::NonPositiveSampleRate(0))
        );
        check!(
            SampleRate::try_from(44100.5_f32) == Err(InvalidInputError::NotAWholeNumber(44100.5))
        );
        check!(matches!(
            SampleRate::try_from(f32::NAN),
            Err(InvalidInputError::NotAWholeNumber(_))
        ));
        check!(matches!(
            SampleRate::try_from(f32::INFINITY),
            Err(InvalidInputError::NotAWholeNumber(_))
        ));
        check!(
            SampleRate::try_from(4_294_967_296.0_f32)
                == Err(InvalidInputError::SampleRateTooLarge(4_294_967_296))
        );
        check!(
            SampleRate::try_from(4_294_967_040.0_f32).map(SampleRate::hz) == Ok(4_294_967_040)
        );
    }

    #[test]
    fn test_index_to_secs() {
        let rate = SampleRate::new(10).unwrap();
        check!(rate.index_to_secs(0) == 0.0);
        check!(rate.index_to_secs(2) == 0.2);
        check!(rate.index_to_secs(25) == 2.5);
        check!(SampleRate::CD_QUALITY.hz() == 44100);
        check!(SampleRate::CD_QUALITY.to_string() == "44100 Hz");
    }
}
