//! Builds the `---`/`+++` file header lines.

use crate::artefact::Artefact;
use crate::options::{DiffOptions, FileHeaderUse};

const REGEX_METACHARS: &[char] = &['.', '*', '?', '(', ')', '[', ']', '|'];

fn looks_like_regex(pattern: &str) -> bool {
    pattern.chars().any(|c| REGEX_METACHARS.contains(&c))
}

fn strip_prefix(name: &str, prefix: &str) -> String {
    if prefix.is_empty() {
        return name.to_string();
    }
    if looks_like_regex(prefix) {
        match regex::Regex::new(&format!("^(?:{prefix})")) {
            Ok(re) => re.replace(name, "").into_owned(),
            Err(_) => name.to_string(),
        }
    } else {
        name.strip_prefix(prefix).unwrap_or(name).to_string()
    }
}

fn file_header_name(artefact: &Artefact, options: &DiffOptions) -> String {
    let stripped = strip_prefix(&artefact.name, &options.strip_file_header_prefix);
    if stripped.is_empty() {
        "-".to_string()
    } else {
        stripped
    }
}

fn one_header(sign: &str, artefact: &Artefact, options: &DiffOptions) -> String {
    let name = file_header_name(artefact, options);
    let time = artefact.mtime.with_timezone(&artefact.tz).format(&options.time_format);
    format!("{sign} {name} {time}\n")
}

/// Renders the `--- `/`+++ ` header pair according to `file_header_use`.
/// Returns an empty string when headers are suppressed entirely.
pub fn file_headers(lhs: &Artefact, rhs: &Artefact, options: &DiffOptions) -> String {
    match options.file_header_use {
        FileHeaderUse::None => String::new(),
        FileHeaderUse::Both => format!("{}{}", one_header("---", lhs, options), one_header("+++", rhs, options)),
        FileHeaderUse::Left => format!("{}{}", one_header("---", lhs, options), one_header("+++", lhs, options)),
        FileHeaderUse::Right => format!("{}{}", one_header("---", rhs, options), one_header("+++", rhs, options)),
    }
}
