//! Detects beats in a WAV file, prints their timestamps, and exports them to a
//! text file (`beats.txt` by default).
//!
//! ```text
//! $ detect-beats song.wav --downmix -o song-beats.txt
//! ```

use amplitude_beats::{
    beats_to_text, peak_amplitude, wav, write_beats_file, BeatDetector, ChannelSelection,
    DetectorConfig, DEFAULT_FILE_NAME,
};
use anyhow::{anyhow, Context};
use clap::{ArgAction, Parser};
use log::LevelFilter;
use std::path::PathBuf;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "detect-beats", version)]
#[command(
    about = "Detects beats in a WAV file and exports their timestamps",
    long_about = None
)]
struct Args {
    /// WAV file to analyze
    input: PathBuf,

    /// File to export the beat timestamps to
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_FILE_NAME)]
    output: PathBuf,

    /// Only print the beats, don't export them
    #[arg(long)]
    no_export: bool,

    /// Amplitude a sample must exceed to be a beat
    #[arg(long, value_name = "AMPLITUDE", default_value_t = DetectorConfig::DEFAULT_THRESHOLD)]
    threshold: f64,

    /// Minimum time between two beats
    #[arg(long, value_name = "SECONDS", default_value_t = DetectorConfig::DEFAULT_MIN_GAP_SECS)]
    min_gap: f64,

    /// Channel to analyze (0 is the left channel)
    #[arg(long, value_name = "INDEX", default_value_t = 0, conflicts_with = "downmix")]
    channel: usize,

    /// Analyze the average of all channels
    #[arg(long)]
    downmix: bool,

    /// Also measure the minimum gap from the start of the audio, so that
    /// nothing in the first <SECONDS> can be a beat
    #[arg(long)]
    debounce_from_start: bool,

    /// Increase log verbosity (-v: debug, -vv: trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn channel_selection(&self) -> ChannelSelection {
        if self.downmix {
            ChannelSelection::Downmix
        } else {
            ChannelSelection::Channel(self.channel)
        }
    }

    fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

fn init_logger(level: LevelFilter) -> anyhow::Result<()> {
    simple_logger::SimpleLogger::new()
        .with_level(level)
        .with_colors(true)
        .with_utc_timestamps()
        .init()
        .map_err(|err| anyhow!("failed to initialize logger: {err}"))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logger(args.log_level())?;

    let config = DetectorConfig::new(args.threshold, args.min_gap)?
        .with_debounce_from_start(args.debounce_from_start);

    let audio = wav::read_wav(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    log::info!(
        "Loaded {}: {} channel(s), {}, {:.2?}",
        args.input.display(),
        audio.channel_count(),
        audio.sample_rate(),
        audio.duration()
    );

    let mono = audio.mono(args.channel_selection())?;
    match peak_amplitude(&mono) {
        Some(peak) if f64::from(peak) > config.threshold() => {
            log::debug!("Peak amplitude: {peak}");
        }
        peak => log::warn!(
            "No sample exceeds the threshold {} (peak amplitude: {:?})",
            config.threshold(),
            peak
        ),
    }

    let beats = BeatDetector::new(config).detect(&mono, audio.sample_rate())?;
    if beats.is_empty() {
        log::warn!("No beats detected");
        return Ok(());
    }
    log::info!("Detected {} beats", beats.len());
    println!("{}", beats_to_text(&beats));

    if !args.no_export {
        write_beats_file(&beats, &args.output)
            .with_context(|| format!("failed to export beats to {}", args.output.display()))?;
        log::info!("Exported beats to {}", args.output.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Args::command().debug_assert();
    }

    #[test]
    fn parse_defaults() {
        let args = Args::try_parse_from(["detect-beats", "song.wav"]).unwrap();
        assert_eq!(args.input, PathBuf::from("song.wav"));
        assert_eq!(args.output, PathBuf::from("beats.txt"));
        assert_eq!(args.threshold, 0.4);
        assert_eq!(args.min_gap, 0.2);
        assert_eq!(args.channel_selection(), ChannelSelection::Channel(0));
        assert_eq!(args.log_level(), LevelFilter::Info);
        assert!(!args.no_export);
        assert!(!args.debounce_from_start);
    }

    #[test]
    fn parse_options() {
        let args = Args::try_parse_from([
            "detect-beats",
            "song.wav",
            "--downmix",
            "--threshold",
            "0.6",
            "--min-gap",
            "0.35",
            "-o",
            "out.txt",
            "-vv",
        ])
        .unwrap();
        assert_eq!(args.channel_selection(), ChannelSelection::Downmix);
        assert_eq!(args.threshold, 0.6);
        assert_eq!(args.min_gap, 0.35);
        assert_eq!(args.output, PathBuf::from("out.txt"));
        assert_eq!(args.log_level(), LevelFilter::Trace);

        let args = Args::try_parse_from(["detect-beats", "song.wav", "--channel", "1"]).unwrap();
        assert_eq!(args.channel_selection(), ChannelSelection::Channel(1));

        assert!(
            Args::try_parse_from(["detect-beats", "song.wav", "--channel", "1", "--downmix"])
                .is_err()
        );
        assert!(Args::try_parse_from(["detect-beats"]).is_err());
    }
}
