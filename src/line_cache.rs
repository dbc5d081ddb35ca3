//! Per-line normalization result, cached once per line per side.

use std::borrow::Cow;

use crate::options::{DiffOptions, RegexReplace, StripComments};
use crate::parse::parse_string;

/// One source line plus everything the differ needs to compare and print it.
#[derive(Debug, Clone)]
pub struct LineCache<'a> {
    /// The unmodified line text, possibly carrying an embedded
    /// "\ No newline at end of file" marker on the final line of a side.
    /// Borrowed from the input except for that synthesized marker line.
    pub raw: Cow<'a, str>,
    /// The normalized key used for equality.
    pub key: String,
    /// True if `ignore_matching_chunks` and `ignore_matching_lines` are both
    /// set and `key` matches `ignore_matching_lines`.
    pub matches_ignore: bool,
}

impl<'a> LineCache<'a> {
    pub fn new(raw: Cow<'a, str>, options: &DiffOptions, regex_replace: Option<&RegexReplace>) -> LineCache<'a> {
        let key = normalize(&raw, options, regex_replace);
        let matches_ignore = options.ignore_matching_chunks
            && options
                .ignore_matching_lines
                .as_ref()
                .is_some_and(|re| re.is_match(&key));
        LineCache { raw, key, matches_ignore }
    }
}

fn strip_whitespace_policy(line: &str, options: &DiffOptions) -> String {
    if options.ignore_all_space {
        line.chars().filter(|c| !c.is_ascii_whitespace()).collect()
    } else if options.ignore_consecutive_space {
        let mut out = String::with_capacity(line.len());
        let mut last_was_space = false;
        for c in line.trim().chars() {
            if c.is_ascii_whitespace() {
                if !last_was_space {
                    out.push(' ');
                }
                last_was_space = true;
            } else {
                out.push(c);
                last_was_space = false;
            }
        }
        out
    } else if options.ignore_trailing_space {
        line.trim_end_matches(|c: char| c.is_ascii_whitespace()).to_string()
    } else {
        line.to_string()
    }
}

fn strip_comments(line: String, options: &DiffOptions) -> String {
    match &options.strip_comments {
        StripComments::None => line,
        StripComments::Plain {
            marker,
            strip_trailing_whitespace,
        } => {
            if marker.is_empty() {
                return line;
            }
            match line.find(marker.as_str()) {
                None => line,
                Some(pos) => {
                    let mut truncated = line[..pos].to_string();
                    if *strip_trailing_whitespace {
                        let trimmed_len = truncated.trim_end_matches(|c: char| c.is_ascii_whitespace()).len();
                        truncated.truncate(trimmed_len);
                    }
                    truncated
                }
            }
        }
        StripComments::Parsed {
            marker,
            strip_trailing_whitespace,
            parse_options,
        } => {
            if marker.is_empty() {
                return line;
            }
            let mut opts = parse_options.clone();
            opts.stop_at_str = marker.clone();
            match parse_string(&opts, &line) {
                Ok((parsed, _rest)) => {
                    let mut parsed = parsed;
                    if *strip_trailing_whitespace {
                        let trimmed_len = parsed.trim_end_matches(|c: char| c.is_ascii_whitespace()).len();
                        parsed.truncate(trimmed_len);
                    }
                    parsed
                }
                Err(_) => line,
            }
        }
    }
}

fn normalize(raw: &str, options: &DiffOptions, regex_replace: Option<&RegexReplace>) -> String {
    let key = strip_whitespace_policy(raw, options);
    let key = strip_comments(key, options);
    match regex_replace {
        Some(rr) => rr.apply(&key),
        None => key,
    }
}

/// Compares two already-normalized lines under the ignore-case policy, or
/// treats them as equal outright if both are chunk-ignore matches.
pub fn compare_eq(lhs: &LineCache<'_>, rhs: &LineCache<'_>, options: &DiffOptions) -> bool {
    if lhs.matches_ignore && rhs.matches_ignore {
        return true;
    }
    if options.ignore_case {
        lhs.key.eq_ignore_ascii_case(&rhs.key)
    } else {
        lhs.key == rhs.key
    }
}
