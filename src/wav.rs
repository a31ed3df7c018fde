//! Module for reading WAV files into [`DecodedAudio`]. Decoding itself is
//! done by [`hound`].

use crate::audio::{int_sample_to_f32, ChannelError, DecodedAudio};
use crate::{InvalidInputError, SampleRate};
use hound::{SampleFormat, WavReader};
use std::io::Read;
use std::path::Path;
use std::vec::Vec;
use thiserror::Error;

/// Possible errors when reading a WAV file.
#[derive(Debug, Error)]
pub enum WavError {
    #[error("failed to decode WAV data")]
    Decode(#[from] hound::Error),
    #[error("unsupported WAV format: {0} bit {1:?} samples")]
    UnsupportedFormat(u16, SampleFormat),
    #[error("invalid WAV header")]
    InvalidSampleRate(#[from] InvalidInputError),
    #[error("invalid channel layout")]
    Channels(#[from] ChannelError),
}

/// Reads the WAV file at the given path.
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<DecodedAudio, WavError> {
    let path = path.as_ref();
    log::debug!("Reading WAV file {}", path.display());
    let reader = WavReader::open(path)?;
    decode(reader)
}

/// Reads WAV data from an arbitrary reader.
pub fn read_wav_from<R: Read>(reader: R) -> Result<DecodedAudio, WavError> {
    decode(WavReader::new(reader)?)
}

fn decode<R: Read>(mut reader: WavReader<R>) -> Result<DecodedAudio, WavError> {
    let spec = reader.spec();
    log::debug!("WAV spec: {spec:?}");
    let sample_rate = SampleRate::try_from(spec.sample_rate)?;

    let interleaved = match (spec.sample_format, spec.bits_per_sample) {
        (SampleFormat::Float, 32) => reader.samples::<f32>().collect::<Result<Vec<_>, _>>()?,
        (SampleFormat::Int, bits @ 8..=32) => reader
            .samples::<i32>()
            .map(|sample| sample.map(|sample| int_sample_to_f32(sample, bits)))
            .collect::<Result<Vec<_>, _>>()?,
        (format, bits) => return Err(WavError::UnsupportedFormat(bits, format)),
    };

    let audio =
        DecodedAudio::from_interleaved(&interleaved, usize::from(spec.channels), sample_rate)?;
    log::debug!(
        "Decoded {} channel(s) with {} samples each ({:?})",
        audio.channel_count(),
        audio.frame_count(),
        audio.duration()
    );
    Ok(audio)
}
