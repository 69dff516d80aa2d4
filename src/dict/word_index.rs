use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use tracing::{debug, debug_span};

use super::scanner::{
    is_blank, Record, RecordScanner, ScanOptions, ScanReport, DEFAULT_MAX_DEFINITION_LEN,
};
use super::{open_file, DictError};
use crate::settings::settings;

/// Location of a definition inside the `.dict` file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WordPosition {
    pub offset: u32,
    pub length: u32,
}

impl WordPosition {
    pub fn new(offset: u32, length: u32) -> Self {
        Self { offset, length }
    }
}

/// Collects records while an index is being loaded.
///
/// Applies the same filters as the scanner, so a finished `WordIndex` never
/// holds a blank word or a length at or above `max_definition_len`.
#[derive(Debug)]
pub struct WordIndexBuilder {
    words: HashMap<String, WordPosition>,
    max_definition_len: u32,
    report: ScanReport,
}

impl Default for WordIndexBuilder {
    fn default() -> Self {
        Self::with_max_definition_len(DEFAULT_MAX_DEFINITION_LEN)
    }
}

impl WordIndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_definition_len(max_definition_len: u32) -> Self {
        Self {
            words: HashMap::new(),
            max_definition_len,
            report: ScanReport::default(),
        }
    }

    /// Insert `word`, replacing any earlier position for the same text.
    /// Blank words and oversized lengths are ignored.
    pub fn put(&mut self, word: impl Into<String>, position: WordPosition) -> &mut Self {
        let word = word.into();
        if !is_blank(&word) && position.length < self.max_definition_len {
            self.words.insert(word, position);
        }
        self
    }

    pub fn finish(self) -> WordIndex {
        WordIndex {
            words: self.words,
            report: self.report,
        }
    }
}

/// Read-only word → position map produced by a load pass.
///
/// Iteration order is unspecified.
#[derive(Debug, Clone, Default)]
pub struct WordIndex {
    words: HashMap<String, WordPosition>,
    report: ScanReport,
}

impl WordIndex {
    /// Load an index file using the global `[index]` settings.
    pub fn load(path: &Path) -> Result<Self, DictError> {
        Self::load_with(path, &ScanOptions::from(&settings().index))
    }

    pub fn load_with(path: &Path, options: &ScanOptions) -> Result<Self, DictError> {
        let _span = debug_span!("load_index", path = %path.display()).entered();
        // The scanner reads in chunks itself, so the file is not buffered.
        let file = open_file(path)?;
        Self::from_reader(file, options)
    }

    /// Scan every record from `reader`. Later duplicates win.
    pub fn from_reader<R: Read>(reader: R, options: &ScanOptions) -> Result<Self, DictError> {
        let mut scanner = RecordScanner::with_options(reader, *options)?;
        let mut builder = WordIndexBuilder::with_max_definition_len(options.max_definition_len);
        for record in scanner.by_ref() {
            let Record { word, position } = record?;
            builder.put(word, position);
        }
        builder.report = scanner.report();

        let index = builder.finish();
        debug!(
            words = index.len(),
            records = index.report.records,
            empty_words = index.report.empty_words,
            oversized = index.report.oversized,
            truncated_tail_bytes = index.report.truncated_tail_bytes,
            "index loaded"
        );
        Ok(index)
    }

    pub fn get(&self, word: &str) -> Option<WordPosition> {
        self.words.get(word).copied()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains_key(word)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, WordPosition)> + '_ {
        self.words.iter().map(|(w, p)| (w.as_str(), *p))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// What the scanner dropped while building this index.
    pub fn report(&self) -> ScanReport {
        self.report
    }
}

impl FromIterator<Record> for WordIndex {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        let mut builder = WordIndexBuilder::new();
        for Record { word, position } in iter {
            builder.put(word, position);
        }
        builder.finish()
    }
}

/// Load an index file with the global settings.
pub fn load_index(path: impl AsRef<Path>) -> Result<WordIndex, DictError> {
    WordIndex::load(path.as_ref())
}
