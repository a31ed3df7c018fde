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
//! Module for the plain-text export of beat timestamps.
//!
//! The format is one timestamp in seconds per line, in ascending order,
//! separated by `\n` without a trailing newline:
//! ```text
//! 0.20
//! 0.70
//! ```

use crate::timestamp::ParseBeatTimestampError;
use crate::BeatTimestamp;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

/// Default file name of the export.
pub const DEFAULT_FILE_NAME: &str = "beats.txt";

/// Renders the beats as newline-separated text.
#[must_use]
pub fn beats_to_text(beats: &[BeatTimestamp]) -> String {
    beats
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parses text produced by [`beats_to_text`]. Surrounding whitespace and
/// `\r\n` line endings are accepted. Empty text results in no beats.
pub fn parse_beats(text: &str) -> Result<Vec<BeatTimestamp>, ParseBeatTimestampError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }
    text.split('\n').map(str::parse).collect()
}

#[cfg(feature = "std")]
pub use self::std_io::*;

#[cfg(feature = "std")]
mod std_io {
    use super::*;
    use std::fs::File;
    use std::io::{BufWriter, Write};
    use std::path::Path;
    use thiserror::Error;

    /// Possible errors when exporting beats.
    #[derive(Debug, Error)]
    pub enum ExportError {
        #[error("no beats detected to export")]
        NoBeats,
        #[error("failed to write beats")]
        Io(#[from] std::io::Error),
    }

    /// Writes the beats in the export format to the given writer.
    ///
    /// Refuses to export an empty sequence.
    pub fn write_beats<W: Write>(beats: &[BeatTimestamp], mut writer: W) -> Result<(), ExportError> {
        if beats.is_empty() {
            return Err(ExportError::NoBeats);
        }
        writer.write_all(beats_to_text(beats).as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Creates (or truncates) the file at `path` and writes the beats in the
    /// export format to it.
    ///
    /// Refuses to export an empty sequence. In that case, no file is
    /// created.
    pub fn write_beats_file<P: AsRef<Path>>(
        beats: &[BeatTimestamp],
        path: P,
    ) -> Result<(), ExportError> {
        if beats.is_empty() {
            return Err(ExportError::NoBeats);
        }
        let path = path.as_ref();
        let file = File::create(path)?;
        write_beats(beats, BufWriter::new(file))?;
        log::debug!("Exported {} beats to {}", beats.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[cfg(feature = "std")]
    use crate::test_utils::target_dir_test_artifacts;
    #[cfg(feature = "std")]
    use std::string::ToString;
    use std::vec::Vec;

    fn beats(centis: &[u64]) -> Vec<BeatTimestamp> {
        centis.iter().copied().map(BeatTimestamp::from_centis).collect()
    }

    #[test]
    fn test_beats_to_text() {
        check!(beats_to_text(&[]) == "");
        check!(beats_to_text(&beats(&[20])) == "0.20");
        check!(beats_to_text(&beats(&[20, 70, 1234])) == "0.20\n0.70\n12.34");
    }

    #[test]
    fn test_parse_beats() {
        check!(parse_beats("") == Ok(vec![]));
        check!(parse_beats("  \n") == Ok(vec![]));
        check!(parse_beats("0.20\n0.70") == Ok(beats(&[20, 70])));
        check!(parse_beats("0.2\r\n0.7\r\n") == Ok(beats(&[20, 70])));
        check!(parse_beats("0.2\n\n0.7") == Err(ParseBeatTimestampError::Empty));
        check!(matches!(
            parse_beats("0.2\nfoo"),
            Err(ParseBeatTimestampError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_text_round_trip() {
        let detected = crate::detect_beats(
            &[0.0, 0.0, 0.5, 0.5, 0.5, 0.0, 0.0, 0.5, 0.0, 0.0],
            10,
        )
        .unwrap();
        let text = beats_to_text(&detected);
        check!(text == "0.20\n0.70");

        let lines = text.split('\n').collect::<Vec<_>>();
        check!(lines == ["0.20", "0.70"]);
        check!(parse_beats(&text) == Ok(detected));
    }

    #[test]
    #[cfg(feature = "std")]
    fn test_write_beats() {
        let mut buf = Vec::new();
        write_beats(&beats(&[20, 70]), &mut buf).unwrap();
        check!(buf == b"0.20\n0.70");

        let mut buf = Vec::new();
        check!(let Err(ExportError::NoBeats) = write_beats(&[], &mut buf));
        check!(buf.is_empty());
    }

    #[test]
    #[cfg(feature = "std")]
    fn test_write_beats_file() {
        let dir = target_dir_test_artifacts();
        std::fs::create_dir_all(&dir).unwrap();

        let path = dir.join(DEFAULT_FILE_NAME);
        write_beats_file(&beats(&[20, 70, 125]), &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        check!(text == "0.20\n0.70\n1.25");
        check!(parse_beats(&text) == Ok(beats(&[20, 70, 125])));

        let path = dir.join("no-beats.txt");
        let _ = std::fs::remove_file(&path);
        check!(let Err(ExportError::NoBeats) = write_beats_file(&[], &path));
        check!(!path.exists());

        let path = dir.join("does-not-exist").join(DEFAULT_FILE_NAME);
        check!(let Err(ExportError::Io(_)) = write_beats_file(&beats(&[20]), &path));
        check!(ExportError::NoBeats.to_string() == "no beats detected to export");
    }
}
