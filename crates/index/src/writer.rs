use std::fs::{rename, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::{IndexEntry, LookupError};

/// Writes index files in the broker's on-disk format.
///
/// The reading side never needs this; it exists to produce fixtures and
/// benchmark inputs that are byte-for-byte what a broker would write,
/// including the zero-filled tail of a pre-allocated index.
pub struct IndexWriter {}

impl IndexWriter {
    /// Writes `entries` to a new index file at `path`, followed by
    /// `padding_slots` zeroed records.
    ///
    /// The write goes to `path.index.tmp` first and is renamed into place, so
    /// readers never observe a half-written index.
    pub fn write(path: &Path, entries: &[IndexEntry], padding_slots: usize) -> Result<(), LookupError> {
        let tmp_path = path.with_extension("index.tmp");
        Self::write_internal(&tmp_path, entries, padding_slots)
            .map_err(|e| LookupError::from_io(&tmp_path, e))?;
        rename(&tmp_path, path).map_err(|e| LookupError::from_io(path, e))?;
        Ok(())
    }

    /// Serializes `entries` into an in-memory index image.
    #[must_use]
    pub fn to_bytes(entries: &[IndexEntry]) -> Vec<u8> {
        let mut buf = Vec::with_capacity(entries.len() * crate::ENTRY_BYTES);
        for e in entries {
            // Writing into a Vec cannot fail.
            let _ = e.write_to(&mut buf);
        }
        buf
    }

    fn write_internal(path: &Path, entries: &[IndexEntry], padding_slots: usize) -> std::io::Result<()> {
        let raw_file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;
        let mut file = BufWriter::new(raw_file);

        for e in entries {
            e.write_to(&mut file)?;
        }
        for _ in 0..padding_slots {
            IndexEntry::ZERO.write_to(&mut file)?;
        }

        file.flush()?;
        file.into_inner()?.sync_all()?;
        Ok(())
    }
}
