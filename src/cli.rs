//! `clap`-derived argument parsing, mapping flags onto [`DiffOptions`] and
//! dispatching to the library entry point.

use std::path::PathBuf;

use clap::Parser;

use crate::artefact::{Artefact, ArtefactOptions, local_timezone};
use crate::error::{DiffError, DiffResult};
use crate::options::{
    Algorithm, DiffOptions, FileHeaderUse, RegexReplace, StripComments, parse_regex_replace_flag,
};
use crate::parse::ParseOptions;

#[derive(Parser, Debug)]
#[command(
    about = "Line-oriented text differ with configurable normalization",
    version
)]
pub struct Args {
    /// Left-hand (baseline) file.
    pub lhs: PathBuf,

    /// Right-hand (target) file.
    pub rhs: PathBuf,

    /// Diff algorithm: "unified" or "direct".
    #[arg(long, default_value = "unified")]
    pub algorithm: String,

    /// Lines of context around each hunk. Defaults to 0 when `--algorithm
    /// direct` is used and this flag is omitted.
    #[arg(long)]
    pub context: Option<usize>,

    /// Which file headers to print: "none", "both", "left", "right".
    #[arg(long, default_value = "both")]
    pub file_header_use: String,

    #[arg(long)]
    pub ignore_blank_lines: bool,

    #[arg(long)]
    pub ignore_case: bool,

    /// Drop hunks made entirely of lines matching `--ignore-matching-lines`.
    #[arg(long)]
    pub ignore_matching_chunks: Option<bool>,

    #[arg(long)]
    pub ignore_all_space: bool,

    #[arg(long)]
    pub ignore_consecutive_space: bool,

    #[arg(long)]
    pub ignore_trailing_space: bool,

    /// Print `@@ ... @@` hunk headers. Defaults to false when `--algorithm
    /// direct` is used and this flag is omitted.
    #[arg(long)]
    pub show_chunk_headers: Option<bool>,

    #[arg(long)]
    pub skip_left_deletions: bool,

    /// Regex; lines matching it are candidates for `--ignore-matching-chunks`.
    #[arg(long)]
    pub ignore_matching_lines: Option<String>,

    /// `<sep><regex><sep><replacement><sep>` applied to the left side before comparison.
    #[arg(long)]
    pub regex_replace_lhs: Option<String>,

    /// `<sep><regex><sep><replacement><sep>` applied to the right side before comparison.
    #[arg(long)]
    pub regex_replace_rhs: Option<String>,

    /// Truncate each line at the first occurrence of this literal marker.
    #[arg(long)]
    pub strip_comments: Option<String>,

    /// Truncate each line at the first unquoted occurrence of this marker.
    #[arg(long)]
    pub strip_parsed_comments: Option<String>,

    /// Literal or regex prefix stripped from file names in headers.
    #[arg(long, default_value = "")]
    pub strip_file_header_prefix: String,

    /// Read at most this many lines from each file (0 = unlimited).
    #[arg(long, default_value_t = 0)]
    pub max_lines: usize,

    /// Pin mtimes to the Unix epoch for deterministic header output.
    #[arg(long)]
    pub skip_time: bool,

    /// `strftime`-style header timestamp format.
    #[arg(long, default_value = "%Y-%m-%d %H:%M:%S%.3f %z")]
    pub time_format: String,
}

impl Args {
    /// Resolves flags into a [`DiffOptions`], applying the context/
    /// show-chunk-headers overrides documented for `--algorithm direct`.
    pub fn to_options(&self) -> DiffResult<DiffOptions> {
        let algorithm = Algorithm::parse(&self.algorithm)
            .ok_or_else(|| DiffError::Config(format!("unknown algorithm: {}", self.algorithm)))?;
        let file_header_use = FileHeaderUse::parse(&self.file_header_use).unwrap_or(FileHeaderUse::Both);

        let direct_defaults = algorithm == Algorithm::Direct;
        let context_size = self.context.unwrap_or(if direct_defaults { 0 } else { 3 });
        let show_chunk_headers = self.show_chunk_headers.unwrap_or(!direct_defaults);

        let ignore_matching_lines = match &self.ignore_matching_lines {
            Some(pattern) => Some(regex::Regex::new(pattern)?),
            None => None,
        };
        let regex_replace_lhs = match &self.regex_replace_lhs {
            Some(flag) => build_regex_replace(flag),
            None => None,
        };
        let regex_replace_rhs = match &self.regex_replace_rhs {
            Some(flag) => build_regex_replace(flag),
            None => None,
        };

        let strip_comments = match (&self.strip_comments, &self.strip_parsed_comments) {
            (_, Some(marker)) => StripComments::Parsed {
                marker: marker.clone(),
                strip_trailing_whitespace: true,
                parse_options: ParseOptions::default(),
            },
            (Some(marker), None) => StripComments::Plain {
                marker: marker.clone(),
                strip_trailing_whitespace: true,
            },
            (None, None) => StripComments::None,
        };

        Ok(DiffOptions {
            algorithm,
            context_size,
            file_header_use,
            ignore_blank_lines: self.ignore_blank_lines,
            ignore_case: self.ignore_case,
            ignore_matching_chunks: self.ignore_matching_chunks.unwrap_or(true),
            ignore_all_space: self.ignore_all_space,
            ignore_consecutive_space: self.ignore_consecutive_space,
            ignore_trailing_space: self.ignore_trailing_space,
            show_chunk_headers,
            skip_left_deletions: self.skip_left_deletions,
            ignore_matching_lines,
            strip_comments,
            regex_replace_lhs,
            regex_replace_rhs,
            strip_file_header_prefix: self.strip_file_header_prefix.clone(),
            max_diff_chunk_length: DiffOptions::default().max_diff_chunk_length,
            time_format: self.time_format.clone(),
        })
    }

    pub fn read_artefacts(&self) -> DiffResult<(Artefact, Artefact)> {
        let options = ArtefactOptions {
            skip_time: self.skip_time,
            tz: local_timezone(),
        };
        let lhs = Artefact::read_max_lines(&self.lhs, self.max_lines, &options)?;
        let rhs = Artefact::read_max_lines(&self.rhs, self.max_lines, &options)?;
        Ok((lhs, rhs))
    }
}

/// Treats a malformed `regex-replace` flag as "no replacement" rather than a
/// hard error, matching §4.6's permissive parsing rule.
fn build_regex_replace(flag: &str) -> Option<RegexReplace> {
    let (pattern, replacement) = parse_regex_replace_flag(flag)?;
    RegexReplace::new(&pattern, &replacement).ok()
}
