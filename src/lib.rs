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
//! amplitude-beats detects beats in decoded audio and exports their
//! timestamps as plain text. The core is `no_std`-compatible and only needs
//! `alloc`.
//!
//! ## What is a beat?
//!
//! A beat is a sample whose signed amplitude is strictly above a fixed
//! threshold (default `0.4`) and which lies strictly more than a minimum gap
//! (default `0.2 s`) behind the previous beat. The first sample above the
//! threshold is always a beat. Negative excursions are never beats.
//!
//! This is a deliberately simple peak picker. There is no spectral analysis,
//! no tempo estimation, and no adaptive threshold.
//!
//! ```text
//!  0.5 |     x  x  x        x
//!  0.4 |- - - - - - - - - - - - - -  threshold
//!      |
//!    0 +--x--x--------x--x-----x--x-->
//!         0 .1 .2 .3 .4 .5 .6 .7 .8 .9  s
//!               ^ beat          ^ beat
//! ```
//!
//! ## Timestamps
//!
//! Beats are reported as [`BeatTimestamp`]s with a precision of two decimal
//! places. The debounce gap is always checked against the exact time, the
//! rounding only affects the reported value. Two reported neighbours may
//! therefore look like they are not more than the minimum gap apart (e.g.,
//! `0.01` and `0.21`).
//!
//! ## Example
//! ```rust
//! use amplitude_beats::{detect_beats, beats_to_text};
//! let samples = [0.0, 0.0, 0.5, 0.5, 0.5, 0.0, 0.0, 0.5, 0.0, 0.0];
//! let beats = detect_beats(&samples, 10).unwrap();
//! assert_eq!(beats_to_text(&beats), "0.20\n0.70");
//! ```
//!
//! ## Crate features
//! - `std` (default): export to files and to any `std::io::Write`.
//! - `wav`: read WAV files via `hound`.
//! - `cli`: the `detect-beats` binary.

#![no_std]
#![deny(
    clippy::all,
    clippy::must_use_candidate,
    missing_debug_implementations
)]

extern crate alloc;

#[cfg_attr(test, macro_use)]
#[cfg(any(test, feature = "std"))]
extern crate std;

#[cfg(test)]
#[macro_use]
extern crate assert2;

#[cfg(test)]
#[macro_use]
extern crate float_cmp;

mod audio;
mod beat_detector;
mod config;
mod export;
mod sample_rate;
mod timestamp;

#[cfg(feature = "wav")]
pub mod wav;

#[cfg(test)]
mod test_utils;

pub use audio::{
    downmix, i16_sample_to_f32, int_sample_to_f32, stereo_to_mono, ChannelError,
    ChannelSelection, DecodedAudio,
};
pub use beat_detector::{detect_beats, peak_amplitude, BeatDetector, BeatInfo, BeatIterator};
pub use config::{DetectorConfig, InvalidConfigError};
pub use export::{beats_to_text, parse_beats, DEFAULT_FILE_NAME};
#[cfg(feature = "std")]
pub use export::{write_beats, write_beats_file, ExportError};
pub use sample_rate::{InvalidInputError, SampleRate};
pub use timestamp::{BeatTimestamp, ParseBeatTimestampError};
