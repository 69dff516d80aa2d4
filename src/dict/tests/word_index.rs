use std::fs;

use super::{encode_records, record};
use crate::dict::{load_index, DictError, ScanOptions, WordIndex, WordIndexBuilder, WordPosition};

#[test]
fn test_last_write_wins() {
    let bytes = encode_records(&[("echo", 1, 10), ("other", 2, 20), ("echo", 3, 30)]);
    for chunk_size in [1, 5, 1024] {
        let options = ScanOptions::default().with_chunk_size(chunk_size);
        let index = WordIndex::from_reader(&bytes[..], &options).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.get("echo"), Some(WordPosition::new(3, 30)));
        assert_eq!(index.report().records, 3);
    }
}

#[test]
fn test_get_missing() {
    let bytes = encode_records(&[("here", 0, 1)]);
    let index = WordIndex::from_reader(&bytes[..], &ScanOptions::default()).unwrap();
    assert!(index.contains("here"));
    assert_eq!(index.get("there"), None);
    assert_eq!(index.get("Here"), None);
}

#[test]
fn test_corrupt_records_absent() {
    let bytes = encode_records(&[("", 0, 1), ("  ", 0, 1), ("big", 0, 10_000), ("ok", 4, 5)]);
    let index = WordIndex::from_reader(&bytes[..], &ScanOptions::default()).unwrap();
    assert_eq!(index.len(), 1);
    assert!(!index.contains("big"));
    assert!(!index.contains(""));
    let report = index.report();
    assert_eq!(report.empty_words, 2);
    assert_eq!(report.oversized, 1);
}

#[test]
fn test_builder_put_overwrites() {
    let mut builder = WordIndexBuilder::new();
    builder
        .put("word", WordPosition::new(0, 1))
        .put("word", WordPosition::new(9, 9))
        .put(" ", WordPosition::new(1, 1));
    let index = builder.finish();
    assert_eq!(index.len(), 1);
    assert_eq!(index.get("word"), Some(WordPosition::new(9, 9)));
}

#[test]
fn test_builder_drops_oversized_length() {
    let mut builder = WordIndexBuilder::new();
    builder
        .put("big", WordPosition::new(0, 10_000))
        .put("huge", WordPosition::new(0, u32::MAX))
        .put("fits", WordPosition::new(0, 9_999));
    let index = builder.finish();
    assert_eq!(index.get("big"), None);
    assert_eq!(index.get("huge"), None);
    assert_eq!(index.get("fits"), Some(WordPosition::new(0, 9_999)));

    let mut builder = WordIndexBuilder::with_max_definition_len(100);
    builder.put("small", WordPosition::new(0, 99)).put("over", WordPosition::new(0, 100));
    let index = builder.finish();
    assert!(index.contains("small"));
    assert!(!index.contains("over"));
}

#[test]
fn test_builder_blank_words() {
    let mut builder = WordIndexBuilder::new();
    builder
        .put("\u{1}", WordPosition::new(0, 1))
        .put("\u{3000}", WordPosition::new(1, 1));
    let index = builder.finish();
    assert!(!index.contains("\u{1}"));
    assert_eq!(index.get("\u{3000}"), Some(WordPosition::new(1, 1)));
}

#[test]
fn test_from_iterator_applies_length_guard() {
    let index: WordIndex = vec![record("huge", 0, 50_000), record("ok", 0, 5)]
        .into_iter()
        .collect();
    assert_eq!(index.len(), 1);
    assert_eq!(index.get("huge"), None);
}

#[test]
fn test_from_iterator() {
    let index: WordIndex = vec![record("a", 0, 1), record("b", 1, 2), record("a", 2, 3)]
        .into_iter()
        .collect();
    assert_eq!(index.len(), 2);
    assert_eq!(index.get("a"), Some(WordPosition::new(2, 3)));
}

#[test]
fn test_iter_yields_every_entry() {
    let bytes = encode_records(&[("one", 1, 1), ("two", 2, 2), ("three", 3, 3)]);
    let index = WordIndex::from_reader(&bytes[..], &ScanOptions::default()).unwrap();
    let mut words: Vec<&str> = index.iter().map(|(w, _)| w).collect();
    words.sort_unstable();
    assert_eq!(words, vec!["one", "three", "two"]);
}

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample.idx");
    fs::write(&path, encode_records(&[("apple", 0, 5), ("banana", 5, 6)])).unwrap();

    let index = load_index(&path).unwrap();
    assert_eq!(index.len(), 2);
    assert_eq!(index.get("banana"), Some(WordPosition::new(5, 6)));

    let options = ScanOptions::default().with_chunk_size(3);
    let small_chunks = WordIndex::load_with(&path, &options).unwrap();
    assert_eq!(small_chunks.get("apple"), Some(WordPosition::new(0, 5)));
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("does_not_exist.idx");
    match load_index(&path) {
        Err(DictError::NotFound(p)) => assert_eq!(p, path),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn test_load_empty_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.idx");
    fs::write(&path, b"").unwrap();
    let index = load_index(&path).unwrap();
    assert!(index.is_empty());
}
