//! Configuration shared by every component of a single diff run.

use regex::Regex;

use crate::error::DiffError;
use crate::parse::ParseOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Unified,
    Direct,
}

impl Algorithm {
    pub fn parse(s: &str) -> Option<Algorithm> {
        match s {
            "unified" => Some(Algorithm::Unified),
            "direct" => Some(Algorithm::Direct),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileHeaderUse {
    None,
    Both,
    Left,
    Right,
}

impl FileHeaderUse {
    pub fn parse(s: &str) -> Option<FileHeaderUse> {
        match s {
            "none" => Some(FileHeaderUse::None),
            "both" => Some(FileHeaderUse::Both),
            "left" => Some(FileHeaderUse::Left),
            "right" => Some(FileHeaderUse::Right),
            _ => None,
        }
    }
}

/// How comments are stripped from a line before it is compared.
#[derive(Debug, Clone)]
pub enum StripComments {
    None,
    /// Truncate at the first occurrence of `marker`.
    Plain {
        marker: String,
        strip_trailing_whitespace: bool,
    },
    /// Truncate at the first unquoted occurrence of `marker`, using the
    /// quote/escape aware line parser so markers inside string literals are
    /// not mistaken for comments.
    Parsed {
        marker: String,
        strip_trailing_whitespace: bool,
        parse_options: ParseOptions,
    },
}

/// A single global regex substitution, with `\1`..`\9` back-reference syntax
/// translated to the underlying regex engine's `$1`..`$9` on construction.
#[derive(Debug, Clone)]
pub struct RegexReplace {
    pub regex: Regex,
    pub replacement: String,
}

impl RegexReplace {
    pub fn new(pattern: &str, replacement: &str) -> Result<RegexReplace, DiffError> {
        let regex = Regex::new(pattern)?;
        Ok(RegexReplace {
            regex,
            replacement: translate_backreferences(replacement),
        })
    }

    pub fn apply(&self, input: &str) -> String {
        self.regex.replace_all(input, self.replacement.as_str()).into_owned()
    }
}

/// Rewrites POSIX/sed-style `\1`..`\9` back-references into the `$1`..`$9`
/// form the `regex` crate expects, leaving `\\` and other escapes untouched.
fn translate_backreferences(replacement: &str) -> String {
    let mut out = String::with_capacity(replacement.len());
    let mut chars = replacement.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.peek() {
                Some(d) if d.is_ascii_digit() && *d != '0' => {
                    out.push('$');
                    out.push(*d);
                    chars.next();
                }
                Some('\\') => {
                    out.push('\\');
                    chars.next();
                }
                _ => out.push('\\'),
            }
        } else if c == '$' {
            out.push('$');
            out.push('$');
        } else {
            out.push(c);
        }
    }
    out
}

/// Parses a `<sep><regex><sep><replacement><sep>` flag value, e.g.
/// `/ERROR.*//`, into a compiled [`RegexReplace`]. Returns `None` (not an
/// error) for malformed input, matching the CLI's permissive handling of
/// this flag (§4.6).
pub fn parse_regex_replace_flag(flag: &str) -> Option<(String, String)> {
    let mut chars = flag.chars();
    let sep = chars.next()?;
    let body: String = chars.collect();
    let parts: Vec<&str> = body.splitn(2, sep).collect();
    if parts.len() != 2 {
        return None;
    }
    let pattern = parts[0];
    let replacement = parts[1].strip_suffix(sep)?;
    Some((pattern.to_string(), replacement.to_string()))
}

#[derive(Debug, Clone)]
pub struct DiffOptions {
    pub algorithm: Algorithm,
    pub context_size: usize,
    pub file_header_use: FileHeaderUse,
    pub ignore_blank_lines: bool,
    pub ignore_case: bool,
    pub ignore_matching_chunks: bool,
    pub ignore_all_space: bool,
    pub ignore_consecutive_space: bool,
    pub ignore_trailing_space: bool,
    pub show_chunk_headers: bool,
    pub skip_left_deletions: bool,
    pub ignore_matching_lines: Option<Regex>,
    pub strip_comments: StripComments,
    pub regex_replace_lhs: Option<RegexReplace>,
    pub regex_replace_rhs: Option<RegexReplace>,
    pub strip_file_header_prefix: String,
    pub max_diff_chunk_length: usize,
    pub time_format: String,
}

impl Default for DiffOptions {
    fn default() -> Self {
        DiffOptions {
            algorithm: Algorithm::Unified,
            context_size: 3,
            file_header_use: FileHeaderUse::Both,
            ignore_blank_lines: false,
            ignore_case: false,
            ignore_matching_chunks: true,
            ignore_all_space: false,
            ignore_consecutive_space: false,
            ignore_trailing_space: false,
            show_chunk_headers: true,
            skip_left_deletions: false,
            ignore_matching_lines: None,
            strip_comments: StripComments::None,
            regex_replace_lhs: None,
            regex_replace_rhs: None,
            strip_file_header_prefix: String::new(),
            max_diff_chunk_length: 1_337_000,
            time_format: "%Y-%m-%d %H:%M:%S%.3f %z".to_string(),
        }
    }
}
