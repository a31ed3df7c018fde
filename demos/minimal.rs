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
//! Minimum example on how to use this library. Detects the beats of a
//! synthetic 100 BPM click track and exports them to `beats.txt`.

use amplitude_beats::{
    beats_to_text, write_beats_file, BeatDetector, DetectorConfig, SampleRate, DEFAULT_FILE_NAME,
};
use log::LevelFilter;

const BPM: f32 = 100.0;

fn main() {
    simple_logger::SimpleLogger::new()
        .with_level(LevelFilter::Debug)
        .with_colors(true)
        .with_utc_timestamps()
        .init()
        .unwrap();

    let sample_rate = SampleRate::CD_QUALITY;
    let samples = click_track(sample_rate.hz(), 5.0);

    let detector = BeatDetector::new(DetectorConfig::default());
    for beat in detector.beats(&samples, sample_rate) {
        println!(
            "Found beat at {}s (sample {}, amplitude {})",
            beat.timestamp, beat.index, beat.value
        );
    }

    let beats = detector.detect(&samples, sample_rate).unwrap();
    write_beats_file(&beats, DEFAULT_FILE_NAME).unwrap();
    println!("Exported to {DEFAULT_FILE_NAME}:\n{}", beats_to_text(&beats));
}

/// Short decaying 440 Hz bursts on every beat, silence in between.
fn click_track(sample_rate: u32, duration_secs: f32) -> Vec<f32> {
    let len = (duration_secs * sample_rate as f32) as usize;
    let samples_per_beat = (60.0 / BPM * sample_rate as f32) as usize;
    let click_len = sample_rate as usize / 20;

    (0..len)
        .map(|i| {
            let offset = i % samples_per_beat;
            if offset >= click_len {
                return 0.0;
            }
            let decay = 1.0 - offset as f32 / click_len as f32;
            let t = offset as f32 / sample_rate as f32;
            0.9 * decay * (2.0 * std::f32::consts::PI * 440.0 * t).sin()
        })
        .collect()
}
