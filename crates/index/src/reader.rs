use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use crate::{IndexEntry, IndexSlot, LookupError};

/// Forward-only reader over the entries of an index file.
///
/// Yields one [`IndexSlot`] per 8-byte record, in on-disk order. The reader
/// owns its file handle, so dropping it (after exhaustion or early) closes
/// the file. Re-open the path to scan again.
///
/// # Termination
///
/// - **Clean EOF** -> the iterator ends.
/// - **Short trailing chunk** (file size not a multiple of 8) -> the iterator
///   ends; the partial record is ignored.
/// - **I/O error** -> yields `Err(LookupError::Io)` once, then ends.
pub struct IndexEntryReader<R: Read = File> {
    rdr: BufReader<R>,
    /// Path for error reporting (empty for in-memory readers).
    path: PathBuf,
    /// Sequence position of the next record.
    seq_pos: u64,
    done: bool,
}

impl IndexEntryReader<File> {
    /// Opens an index file for a forward scan.
    ///
    /// Returns [`LookupError::NotFound`] if the path does not exist and
    /// [`LookupError::Io`] for any other open failure.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, LookupError> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| LookupError::from_io(path, e))?;
        tracing::trace!(path = %path.display(), "opened index");
        Ok(Self {
            rdr: BufReader::new(f),
            path: path.to_path_buf(),
            seq_pos: 0,
            done: false,
        })
    }
}

impl<R: Read> IndexEntryReader<R> {
    /// Constructs a reader from any `Read` implementor.
    ///
    /// Useful for unit tests that supply an in-memory buffer (e.g., `Cursor<Vec<u8>>`).
    pub fn from_reader(reader: R) -> Self {
        Self {
            rdr: BufReader::new(reader),
            path: PathBuf::new(),
            seq_pos: 0,
            done: false,
        }
    }

    /// Number of records read so far.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.seq_pos
    }
}

impl<R: Read> Iterator for IndexEntryReader<R> {
    type Item = Result<IndexSlot, LookupError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match IndexEntry::read_from(&mut self.rdr) {
            Ok(entry) => {
                let slot = IndexSlot::classify(self.seq_pos, entry);
                self.seq_pos += 1;
                Some(Ok(slot))
            }
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(LookupError::from_io(&self.path, e)))
            }
        }
    }
}
