use std::path::Path;

use super::content::{ContentReader, Definition};
use super::scanner::ScanOptions;
use super::search::search_with_limit;
use super::word_index::{WordIndex, WordPosition};
use super::DictError;
use crate::settings::settings;

/// A loaded index paired with its open content file.
///
/// Construction fails if either file cannot be loaded, so searches and
/// definition reads never run against a half-initialized dictionary.
#[derive(Debug)]
pub struct StarDict {
    index: WordIndex,
    content: ContentReader,
    max_results: usize,
}

impl StarDict {
    /// Load `idx_path` and open `dict_path` using the global settings.
    pub fn open(idx_path: &Path, dict_path: &Path) -> Result<Self, DictError> {
        let s = settings();
        Self::open_with(
            idx_path,
            dict_path,
            &ScanOptions::from(&s.index),
            s.search.max_results,
        )
    }

    pub fn open_with(
        idx_path: &Path,
        dict_path: &Path,
        options: &ScanOptions,
        max_results: usize,
    ) -> Result<Self, DictError> {
        // Open the content file first so a missing `.dict` fails before the
        // index is scanned.
        let content = ContentReader::open(dict_path)?;
        let index = WordIndex::load_with(idx_path, options)?;
        Ok(Self::from_parts(index, content, max_results))
    }

    pub fn from_parts(index: WordIndex, content: ContentReader, max_results: usize) -> Self {
        Self {
            index,
            content,
            max_results,
        }
    }

    pub fn index(&self) -> &WordIndex {
        &self.index
    }

    pub fn search(&self, term: &str) -> Vec<(&str, WordPosition)> {
        search_with_limit(&self.index, term, self.max_results)
    }

    /// Exact lookup of `word` and its definition.
    pub fn lookup(&self, word: &str) -> Result<Option<Definition>, DictError> {
        self.index
            .get(word)
            .map(|position| self.content.read_position(position))
            .transpose()
    }

    pub fn definition(&self, position: WordPosition) -> Result<Definition, DictError> {
        self.content.read_position(position)
    }
}
