//! In-memory representation of a file being diffed: its text plus the
//! metadata (name, modification time, timezone) shown in file headers.

use std::fs;
use std::path::Path;

use chrono::{DateTime, FixedOffset, Local, TimeZone, Utc};

use crate::error::DiffResult;

#[derive(Debug, Clone)]
pub struct Artefact {
    pub data: String,
    pub name: String,
    pub mtime: DateTime<Utc>,
    pub tz: FixedOffset,
}

#[derive(Debug, Clone)]
pub struct ArtefactOptions {
    /// Pin `mtime` to the Unix epoch instead of the file's real modification
    /// time, for deterministic header output in tests.
    pub skip_time: bool,
    pub tz: FixedOffset,
}

impl Default for ArtefactOptions {
    fn default() -> Self {
        ArtefactOptions {
            skip_time: false,
            tz: FixedOffset::east_opt(0).unwrap(),
        }
    }
}

impl Artefact {
    pub fn read(path: impl AsRef<Path>, options: &ArtefactOptions) -> DiffResult<Artefact> {
        Self::read_max_lines(path, 0, options)
    }

    /// Reads at most `max_lines` newline-delimited lines (0 means
    /// unlimited), preserving the file's own trailing-newline state for
    /// any prefix shorter than the full file.
    pub fn read_max_lines(path: impl AsRef<Path>, max_lines: usize, options: &ArtefactOptions) -> DiffResult<Artefact> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let data = if max_lines == 0 {
            contents
        } else {
            truncate_to_lines(&contents, max_lines)
        };

        let mtime = if options.skip_time {
            Utc.timestamp_opt(0, 0).unwrap()
        } else {
            let system_time = fs::metadata(path)?.modified()?;
            DateTime::<Utc>::from(system_time)
        };

        Ok(Artefact {
            data,
            name: path.display().to_string(),
            mtime,
            tz: options.tz,
        })
    }
}

fn truncate_to_lines(contents: &str, max_lines: usize) -> String {
    let mut taken = 0usize;
    let mut end = contents.len();
    for (idx, _) in contents.match_indices('\n') {
        taken += 1;
        if taken == max_lines {
            end = idx + 1;
            return contents[..end].to_string();
        }
    }
    contents.to_string()
}

pub fn local_timezone() -> FixedOffset {
    *Local::now().offset()
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;

    #[test]
    fn read_whole_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "a\nb\nc\n").unwrap();
        let options = ArtefactOptions {
            skip_time: true,
            ..ArtefactOptions::default()
        };
        let artefact = Artefact::read(file.path(), &options).unwrap();
        assert_eq!(artefact.data, "a\nb\nc\n");
    }

    #[test]
    fn read_max_lines_caps_output() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "a\nb\nc\nd\n").unwrap();
        let options = ArtefactOptions {
            skip_time: true,
            ..ArtefactOptions::default()
        };
        let artefact = Artefact::read_max_lines(file.path(), 2, &options).unwrap();
        assert_eq!(artefact.data, "a\nb\n");
    }

    #[test]
    fn read_max_lines_beyond_file_length_returns_everything() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "a\nb\n").unwrap();
        let options = ArtefactOptions {
            skip_time: true,
            ..ArtefactOptions::default()
        };
        let artefact = Artefact::read_max_lines(file.path(), 100, &options).unwrap();
        assert_eq!(artefact.data, "a\nb\n");
    }

    #[test]
    fn skip_time_pins_mtime_to_epoch() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "x\n").unwrap();
        let options = ArtefactOptions {
            skip_time: true,
            ..ArtefactOptions::default()
        };
        let artefact = Artefact::read(file.path(), &options).unwrap();
        assert_eq!(artefact.mtime.timestamp(), 0);
    }
}
