//! StarDict index parsing, search, and definition lookup.
//!
//! `RecordScanner` decodes `.idx` records from a chunked byte stream.
//! `WordIndex` maps each word to the `WordPosition` of its definition.
//! `ContentReader` serves definition text out of the `.dict` file.

mod content;
pub mod scanner;
pub mod search;
mod stardict;
#[cfg(test)]
mod tests;
mod word_index;

pub use content::{load_content, ContentReader, Definition};
pub use scanner::{Record, RecordScanner, ScanOptions, ScanReport};
pub use search::{search, search_with_limit, MAX_RESULT};
pub use stardict::StarDict;
pub use word_index::{load_index, WordIndex, WordIndexBuilder, WordPosition};

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

/// Error type for index loading and definition reads.
///
/// Malformed records are not errors: they are dropped by the scanner and
/// counted in its `ScanReport`.
#[derive(Debug, thiserror::Error)]
pub enum DictError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid value for {field}: {reason}")]
    InvalidOption { field: &'static str, reason: String },
}

/// Open `path` read-only, reporting a missing file as `DictError::NotFound`.
fn open_file(path: &Path) -> Result<File, DictError> {
    File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => DictError::NotFound(path.to_path_buf()),
        _ => DictError::Io(e),
    })
}
