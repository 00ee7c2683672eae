//! Bracket search over index entries.
//!
//! [`find_bracket`] is the lazy linear scan over a stream of slots.
//! [`IndexSnapshot`] holds the populated entries in memory and answers the
//! same query by binary search. On indexes whose offsets never decrease the
//! two agree exactly, including which error a miss produces.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::{Bracket, IndexEntry, IndexSlot, LookupError, ENTRY_BYTES};

/// Scans `slots` for the first entry whose offset is strictly greater than
/// `wanted` and pairs it with the entry before it.
///
/// The scan starts from [`IndexEntry::ZERO`], so an offset below the first
/// checkpoint brackets from the start of the segment.
///
/// `cancel` is checked before every slot; raising it stops the scan with
/// [`LookupError::Cancelled`].
///
/// # Errors
///
/// - [`LookupError::OffsetNotIndexed`] if an unpopulated slot comes first.
/// - [`LookupError::OffsetOutOfRange`] if the slots run out first (always the
///   case for an empty index).
/// - [`LookupError::CorruptIndex`] if the bracket's positions go backwards.
/// - Any error yielded by the slot stream itself.
pub fn find_bracket<I>(
    slots: I,
    wanted: u32,
    cancel: Option<&AtomicBool>,
) -> Result<Bracket, LookupError>
where
    I: IntoIterator<Item = Result<IndexSlot, LookupError>>,
{
    let mut previous = IndexEntry::ZERO;

    for slot in slots {
        if cancel.is_some_and(|c| c.load(Ordering::Relaxed)) {
            return Err(LookupError::Cancelled);
        }
        let current = match slot? {
            IndexSlot::Entry(e) => e,
            IndexSlot::Unpopulated => return Err(LookupError::OffsetNotIndexed { wanted }),
        };
        if current.offset > wanted {
            return Bracket::new(previous, current);
        }
        previous = current;
    }

    Err(LookupError::OffsetOutOfRange { wanted })
}

/// The populated prefix of an index, loaded into memory for repeated lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexSnapshot {
    entries: Vec<IndexEntry>,
    /// `true` if an unpopulated slot cut the index short.
    padded: bool,
}

impl IndexSnapshot {
    /// Reads the whole index file at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LookupError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| LookupError::from_io(path, e))?;
        let snapshot = Self::from_bytes(&bytes);
        tracing::debug!(
            path = %path.display(),
            entries = snapshot.entries.len(),
            padded = snapshot.padded,
            "loaded index snapshot"
        );
        Ok(snapshot)
    }

    /// Parses an in-memory index image. A trailing partial record is ignored.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut entries = Vec::with_capacity(bytes.len() / ENTRY_BYTES);
        for (seq_pos, chunk) in bytes.chunks_exact(ENTRY_BYTES).enumerate() {
            let mut raw = [0u8; ENTRY_BYTES];
            raw.copy_from_slice(chunk);
            match IndexSlot::classify(seq_pos as u64, IndexEntry::from_bytes(raw)) {
                IndexSlot::Entry(e) => entries.push(e),
                IndexSlot::Unpopulated => {
                    return Self {
                        entries,
                        padded: true,
                    }
                }
            }
        }
        Self {
            entries,
            padded: false,
        }
    }

    /// Builds a snapshot from entries already known to be populated.
    #[must_use]
    pub fn from_entries(entries: Vec<IndexEntry>) -> Self {
        Self {
            entries,
            padded: false,
        }
    }

    /// Binary-search equivalent of [`find_bracket`].
    pub fn bracket(&self, wanted: u32) -> Result<Bracket, LookupError> {
        let idx = self.entries.partition_point(|e| e.offset <= wanted);
        match self.entries.get(idx) {
            Some(&upper) => {
                let lower = if idx == 0 {
                    IndexEntry::ZERO
                } else {
                    self.entries[idx - 1]
                };
                Bracket::new(lower, upper)
            }
            None if self.padded => Err(LookupError::OffsetNotIndexed { wanted }),
            None => Err(LookupError::OffsetOutOfRange { wanted }),
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    /// Returns `true` if the index was cut short by an unpopulated slot.
    #[must_use]
    pub fn is_padded(&self) -> bool {
        self.padded
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Highest indexed offset, if any.
    #[must_use]
    pub fn last_offset(&self) -> Option<u32> {
        self.entries.last().map(|e| e.offset)
    }
}
