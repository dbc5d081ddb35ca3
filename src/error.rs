use thiserror::Error;

use crate::parse::ParseError;

/// Unified error type for the differ library and CLI.
#[derive(Debug, Error)]
pub enum DiffError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("invalid regular expression: {0}")]
    Regex(#[from] regex::Error),

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type DiffResult<T> = Result<T, DiffError>;
