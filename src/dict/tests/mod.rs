mod word_index;

use std::io::{self, Read};

use crate::dict::{Record, RecordScanner, ScanOptions, ScanReport, WordPosition};

/// Encode `(word, offset, length)` triples in `.idx` layout.
pub(super) fn encode_records(records: &[(&str, u32, u32)]) -> Vec<u8> {
    let mut buf = Vec::new();
    for (word, offset, length) in records {
        buf.extend_from_slice(word.as_bytes());
        buf.push(0);
        buf.extend_from_slice(&offset.to_be_bytes());
        buf.extend_from_slice(&length.to_be_bytes());
    }
    buf
}

pub(super) fn scan_all(bytes: &[u8], chunk_size: usize) -> (Vec<Record>, ScanReport) {
    let options = ScanOptions::default().with_chunk_size(chunk_size);
    let mut scanner = RecordScanner::with_options(bytes, options).unwrap();
    let records = scanner.by_ref().map(|r| r.unwrap()).collect();
    (records, scanner.report())
}

pub(super) fn record(word: &str, offset: u32, length: u32) -> Record {
    Record {
        word: word.to_string(),
        position: WordPosition::new(offset, length),
    }
}

/// Reader that hands out at most `max` bytes per `read` call.
pub(super) struct Trickle<'a> {
    pub data: &'a [u8],
    pub max: usize,
}

impl Read for Trickle<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = buf.len().min(self.max).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}
