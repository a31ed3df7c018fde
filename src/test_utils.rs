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

use std::path::PathBuf;
use std::vec::Vec;

/// Returns the cargo target dir.
pub fn target_dir() -> PathBuf {
    // 1. Check if CARGO_TARGET_DIR is set
    if let Ok(dir) = std::env::var("CARGO_TARGET_DIR") {
        PathBuf::from(dir)
    } else {
        // 2. Fall back to default: go up from CARGO_MANIFEST_DIR
        let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        manifest_dir.join("target")
    }
}

/// Returns a directory within the cargo target dir to store test artifacts.
pub fn target_dir_test_artifacts() -> PathBuf {
    let mut path = target_dir();
    path.push("test_generated");
    path
}

/// Writes the given channels as 16 bit integer WAV file into
/// [`target_dir_test_artifacts`] and returns its path.
#[cfg(feature = "wav")]
pub fn write_wav_file(name: &str, channels: &[&[f32]], sample_rate: u32) -> PathBuf {
    let dir = target_dir_test_artifacts();
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);

    let mut wav_writer = hound::WavWriter::create(
        &path,
        hound::WavSpec {
            channels: channels.len() as u16,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        },
    )
    .unwrap();

    let frame_count = channels[0].len();
    for frame in 0..frame_count {
        for channel in channels {
            let sample = (channel[frame] * i16::MAX as f32) as i16;
            wav_writer.write_sample(sample).unwrap();
        }
    }
    wav_writer.finalize().unwrap();
    path
}

/// Synthetic test signals. Unlike recorded music, their beats are known
/// exactly.
pub mod signals {
    use super::*;

    /// Returns `len` samples of silence with single-sample spikes of the given
    /// amplitude at the given indices.
    pub fn impulses(len: usize, indices: &[usize], amplitude: f32) -> Vec<f32> {
        let mut samples = vec![0.0; len];
        for &index in indices {
            samples[index] = amplitude;
        }
        samples
    }

    /// Returns a metronome-like signal: a short decaying sine burst on every
    /// beat, silence in between. The first click starts at sample 0.
    pub fn click_track(
        sample_rate: u32,
        duration_secs: f32,
        bpm: f32,
        click_secs: f32,
        amplitude: f32,
    ) -> Vec<f32> {
        let len = (duration_secs * sample_rate as f32) as usize;
        let samples_per_beat = (60.0 / bpm * sample_rate as f32) as usize;
        let click_len = (click_secs * sample_rate as f32) as usize;

        let mut samples = vec![0.0; len];
        for start in (0..len).step_by(samples_per_beat) {
            for i in 0..click_len.min(len - start) {
                let decay = 1.0 - i as f32 / click_len as f32;
                // 1 kHz tone, phase chosen so that the first sample is the
                // maximum.
                let phase = 2.0 * core::f32::consts::PI * 1000.0 * i as f32 / sample_rate as f32;
                samples[start + i] = amplitude * decay * libm::cosf(phase);
            }
        }
        samples
    }

    #[test]
    fn test_impulses() {
        let samples = impulses(5, &[1, 3], 0.5);
        assert_eq!(samples, [0.0, 0.5, 0.0, 0.5, 0.0]);
    }

    #[test]
    fn test_click_track() {
        let samples = click_track(1000, 2.0, 120.0, 0.01, 0.8);
        assert_eq!(samples.len(), 2000);
        for start in [0, 500, 1000, 1500] {
            assert_eq!(samples[start], 0.8);
            assert_eq!(samples[start + 10], 0.0);
        }
        let max = samples.iter().copied().fold(f32::MIN, libm::fmaxf);
        assert_eq!(max, 0.8);
    }
}
