//! Prefix-first substring search over a `WordIndex`.

use tracing::{debug, debug_span};

use super::word_index::{WordIndex, WordPosition};

/// Default result cap for [`search`].
pub const MAX_RESULT: usize = 40;

/// Search with the default cap of [`MAX_RESULT`].
pub fn search<'a>(index: &'a WordIndex, term: &str) -> Vec<(&'a str, WordPosition)> {
    search_with_limit(index, term, MAX_RESULT)
}

/// Rank index words containing `term`.
///
/// Each word is lowercased before matching; `term` is used as given, so
/// callers wanting case-insensitive search must lowercase it themselves.
/// Words starting with `term` (direct matches) come first, then words
/// containing it elsewhere (indirect matches). Within each group the order is
/// the index's iteration order.
///
/// The scan stops once direct matches exceed `max_results`, so up to
/// `max_results + 1` direct matches can be returned. Indirect matches only
/// fill the room left below `max_results`.
pub fn search_with_limit<'a>(
    index: &'a WordIndex,
    term: &str,
    max_results: usize,
) -> Vec<(&'a str, WordPosition)> {
    let _span = debug_span!("search", term, max_results).entered();

    let mut direct = Vec::new();
    let mut indirect = Vec::new();

    for (word, position) in index.iter() {
        match word.to_lowercase().find(term) {
            Some(0) => direct.push((word, position)),
            Some(_) if indirect.len() < max_results.saturating_sub(direct.len()) => {
                indirect.push((word, position));
            }
            _ => {}
        }
        if direct.len() > max_results {
            break;
        }
    }

    debug!(direct = direct.len(), indirect = indirect.len());

    if direct.len() < max_results {
        let need = (max_results - direct.len()).min(indirect.len());
        indirect.truncate(need);
        direct.append(&mut indirect);
    }
    direct
}
