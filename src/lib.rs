//! Line-oriented text differ: unified and direct diff algorithms with
//! configurable per-line normalization, compatible with `diff -u` / `patch`
//! output.

pub mod artefact;
pub mod chunk;
pub mod cli;
pub mod context;
pub mod differ;
pub mod error;
pub mod format;
pub mod line_cache;
pub mod options;
pub mod parse;
pub mod side_data;

mod diff;

pub use artefact::{Artefact, ArtefactOptions};
pub use diff::file_diff;
pub use error::{DiffError, DiffResult};
pub use options::{Algorithm, DiffOptions, FileHeaderUse, RegexReplace, StripComments};
