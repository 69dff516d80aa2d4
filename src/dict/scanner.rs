//! Streaming tokenizer for the StarDict `.idx` record format.
//!
//! Each record is laid out back-to-back as
//!
//! ```text
//! <word bytes, UTF-8> 0x00 <offset: u32 BE> <length: u32 BE>
//! ```
//!
//! The scanner reads the source in fixed-size chunks and carries any record
//! that straddles a chunk boundary over to the next refill, so the decoded
//! records do not depend on the chunk size.

use std::borrow::Cow;
use std::io::{self, Read};

use tracing::debug;

use super::word_index::WordPosition;
use super::DictError;
use crate::settings::IndexSettings;

pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Definition lengths at or above this are treated as a corrupt record.
pub const DEFAULT_MAX_DEFINITION_LEN: u32 = 10_000;

/// Big-endian offset followed by big-endian length.
const POSITION_SIZE: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    /// Bytes requested from the source per refill. Must be at least 1.
    pub chunk_size: usize,
    /// Records with `length >= max_definition_len` are dropped.
    pub max_definition_len: u32,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_definition_len: DEFAULT_MAX_DEFINITION_LEN,
        }
    }
}

impl From<&IndexSettings> for ScanOptions {
    fn from(s: &IndexSettings) -> Self {
        Self {
            chunk_size: s.chunk_size,
            max_definition_len: s.max_definition_len,
        }
    }
}

impl ScanOptions {
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn validate(&self) -> Result<(), DictError> {
        if self.chunk_size == 0 {
            return Err(DictError::InvalidOption {
                field: "chunk_size",
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}

/// One decoded index record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub word: String,
    pub position: WordPosition,
}

/// Records the scanner dropped instead of failing the pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Records yielded to the caller.
    pub records: usize,
    /// Records whose word was empty after trimming.
    pub empty_words: usize,
    /// Records whose length reached `max_definition_len`.
    pub oversized: usize,
    /// Bytes of an incomplete record cut off by the end of the stream.
    pub truncated_tail_bytes: usize,
}

/// Lazy iterator over the records of an index stream.
///
/// Not restartable: a second pass needs a fresh reader positioned at the
/// start of the file. An I/O error is yielded once and ends the iteration.
pub struct RecordScanner<R> {
    reader: R,
    options: ScanOptions,
    /// Current buffer: the carried-over pending record followed by the
    /// latest chunk.
    buf: Vec<u8>,
    /// Scan cursor into `buf`.
    mark: usize,
    /// Where the record under the cursor begins in `buf`.
    word_start: usize,
    report: ScanReport,
    done: bool,
}

impl<R: Read> RecordScanner<R> {
    /// Scanner with the default 1024-byte chunk and 10000-byte length guard.
    pub fn new(reader: R) -> Self {
        Self::build(reader, ScanOptions::default())
    }

    pub fn with_options(reader: R, options: ScanOptions) -> Result<Self, DictError> {
        options.validate()?;
        Ok(Self::build(reader, options))
    }

    fn build(reader: R, options: ScanOptions) -> Self {
        Self {
            reader,
            options,
            buf: Vec::with_capacity(options.chunk_size),
            mark: 0,
            word_start: 0,
            report: ScanReport::default(),
            done: false,
        }
    }

    /// Counters for the records seen so far.
    pub fn report(&self) -> ScanReport {
        self.report
    }

    /// Move the pending record to the front of the buffer and append the
    /// next chunk after it. Returns `false` once the source is exhausted.
    ///
    /// The buffer grows past `chunk_size` when the pending record alone
    /// fills it, e.g. a word longer than one chunk.
    fn refill(&mut self) -> io::Result<bool> {
        self.buf.drain(..self.word_start);
        self.mark -= self.word_start;
        self.word_start = 0;

        let carried = self.buf.len();
        self.buf.resize(carried + self.options.chunk_size, 0);
        let n = read_chunk(&mut self.reader, &mut self.buf[carried..])?;
        self.buf.truncate(carried + n);
        Ok(n > 0)
    }

    fn finish(&mut self) {
        self.done = true;
        let tail = self.buf.len() - self.word_start;
        if tail > 0 {
            self.report.truncated_tail_bytes = tail;
            debug!(tail_bytes = tail, "index ends inside a record");
        }
    }

    /// Decode the next kept record, or `None` at end of stream.
    fn next_record(&mut self) -> Result<Option<Record>, DictError> {
        loop {
            // Word bytes run up to the next 0x00.
            match self.buf[self.mark..].iter().position(|&b| b == 0) {
                Some(i) => self.mark += i,
                None => {
                    self.mark = self.buf.len();
                    if !self.refill()? {
                        self.finish();
                        return Ok(None);
                    }
                    continue;
                }
            }

            let pos_start = self.mark + 1;
            if self.buf.len() - pos_start < POSITION_SIZE {
                if !self.refill()? {
                    self.finish();
                    return Ok(None);
                }
                continue;
            }

            let word = String::from_utf8_lossy(&self.buf[self.word_start..self.mark]);
            let offset = read_be_u32(&self.buf[pos_start..pos_start + 4]);
            let length = read_be_u32(&self.buf[pos_start + 4..pos_start + POSITION_SIZE]);
            let word = keep_word(word, length, &self.options, &mut self.report);

            self.mark = pos_start + POSITION_SIZE;
            self.word_start = self.mark;

            if let Some(word) = word {
                self.report.records += 1;
                return Ok(Some(Record {
                    word,
                    position: WordPosition::new(offset, length),
                }));
            }
        }
    }
}

impl<R: Read> Iterator for RecordScanner<R> {
    type Item = Result<Record, DictError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_record() {
            Ok(record) => record.map(Ok),
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Apply the record filters, returning the owned word if the record is kept.
fn keep_word(
    word: Cow<'_, str>,
    length: u32,
    options: &ScanOptions,
    report: &mut ScanReport,
) -> Option<String> {
    if is_blank(&word) {
        report.empty_words += 1;
        return None;
    }
    if length >= options.max_definition_len {
        report.oversized += 1;
        debug!(word = %word, length, "dropping record with oversized length");
        return None;
    }
    Some(word.into_owned())
}

/// True when `word` has nothing left after stripping every char up to and
/// including U+0020 from both ends. Other Unicode whitespace counts as content.
pub(crate) fn is_blank(word: &str) -> bool {
    word.trim_matches(|c: char| c <= ' ').is_empty()
}

fn read_be_u32(bytes: &[u8]) -> u32 {
    u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Fill `buf` from `reader`, stopping early only at end of stream.
fn read_chunk<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
