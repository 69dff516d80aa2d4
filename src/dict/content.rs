use std::fs::File;
use std::io;
use std::path::Path;

use tracing::{debug, warn};

use super::word_index::WordPosition;
use super::{open_file, DictError};

/// Definition text read from the content file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    /// Bytes actually read, decoded as UTF-8 with invalid sequences replaced.
    pub text: String,
    pub requested: u32,
    pub read: u32,
}

impl Definition {
    /// True when the file ended before `requested` bytes were available.
    pub fn is_short(&self) -> bool {
        self.read < self.requested
    }
}

/// Random-access reader over a `.dict` content file.
///
/// Reads are positioned, with no shared cursor, so one reader can serve
/// several threads. The file is closed when the reader is dropped.
#[derive(Debug)]
pub struct ContentReader {
    file: File,
}

impl ContentReader {
    pub fn open(path: &Path) -> Result<Self, DictError> {
        let file = open_file(path)?;
        debug!(path = %path.display(), "content file opened");
        Ok(Self { file })
    }

    /// Read `length` bytes at `offset`.
    ///
    /// Running past the end of the file is not an error: whatever was
    /// available is returned and the result reports the short read.
    pub fn read(&self, offset: u32, length: u32) -> Result<Definition, DictError> {
        // Never allocate past the end of the file, whatever `length` claims.
        let available = self.file.metadata()?.len().saturating_sub(offset as u64);
        let mut buf = vec![0u8; available.min(length as u64) as usize];
        let mut filled = 0;
        while filled < buf.len() {
            match read_at(&self.file, &mut buf[filled..], offset as u64 + filled as u64) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        buf.truncate(filled);

        // `filled` never exceeds `length`.
        let read = filled as u32;
        if read < length {
            warn!(offset, wanted = length, got = read, "short read from content file");
        }
        Ok(Definition {
            text: String::from_utf8_lossy(&buf).into_owned(),
            requested: length,
            read,
        })
    }

    pub fn read_position(&self, position: WordPosition) -> Result<Definition, DictError> {
        self.read(position.offset, position.length)
    }
}

/// Open a content file for definition lookups.
pub fn load_content(path: impl AsRef<Path>) -> Result<ContentReader, DictError> {
    ContentReader::open(path.as_ref())
}

#[cfg(unix)]
fn read_at(file: &File, buf: &mut [u8], offset: u64) -> io::Result<usize> {
    std::os::unix::fs::FileExt::read_at(file, buf, offset)
}

#[cfg(windows)]
fn read_at(file: &File, buf: &mut [u8], offset: u64) -> io::Result<usize> {
    std::os::windows::fs::FileExt::seek_read(file, buf, offset)
}
