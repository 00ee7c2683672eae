//! Index entry layout and the value types built from it.
//!
//! ```text
//! [offset: u32 BE][position: u32 BE]
//! ```
//!
//! Both fields are unsigned 32-bit big-endian integers, matching the on-disk
//! format written by the broker.

use byteorder::{BigEndian, ByteOrder, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Result as IoResult, Write};

use crate::LookupError;

/// Size of one index entry in bytes: 4 (`offset`) + 4 (`position`).
pub const ENTRY_BYTES: usize = 4 + 4;

/// One sparse checkpoint: the record with `offset` starts at byte `position`
/// of the paired data segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IndexEntry {
    /// Logical record offset.
    pub offset: u32,
    /// Byte position in the data segment.
    pub position: u32,
}

impl IndexEntry {
    /// The synthetic "start of segment" entry a scan starts from.
    pub const ZERO: IndexEntry = IndexEntry {
        offset: 0,
        position: 0,
    };

    #[must_use]
    pub const fn new(offset: u32, position: u32) -> Self {
        Self { offset, position }
    }

    /// Decodes one entry from an 8-byte chunk.
    #[must_use]
    pub fn from_bytes(chunk: [u8; ENTRY_BYTES]) -> Self {
        Self {
            offset: BigEndian::read_u32(&chunk[0..4]),
            position: BigEndian::read_u32(&chunk[4..8]),
        }
    }

    /// Writes the entry in on-disk order.
    pub fn write_to<W: Write>(&self, w: &mut W) -> IoResult<()> {
        w.write_u32::<BigEndian>(self.offset)?;
        w.write_u32::<BigEndian>(self.position)?;
        Ok(())
    }

    /// Reads one entry, failing with `UnexpectedEof` on a short chunk.
    pub fn read_from<R: Read>(r: &mut R) -> IoResult<Self> {
        let offset = r.read_u32::<BigEndian>()?;
        let position = r.read_u32::<BigEndian>()?;
        Ok(Self { offset, position })
    }
}

/// A decoded index record, tagged by whether the slot was ever written.
///
/// Brokers pre-allocate index files and fill the unused tail with zeros. A
/// zero offset is only meaningful at sequence position 0, so every later
/// zero-offset record is reported as [`IndexSlot::Unpopulated`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexSlot {
    Entry(IndexEntry),
    Unpopulated,
}

impl IndexSlot {
    /// Tags `entry`, read at `seq_pos` in the file.
    #[must_use]
    pub fn classify(seq_pos: u64, entry: IndexEntry) -> Self {
        if seq_pos > 0 && entry.offset == 0 {
            IndexSlot::Unpopulated
        } else {
            IndexSlot::Entry(entry)
        }
    }

    #[must_use]
    pub fn entry(&self) -> Option<IndexEntry> {
        match self {
            IndexSlot::Entry(e) => Some(*e),
            IndexSlot::Unpopulated => None,
        }
    }
}

/// The two consecutive checkpoints surrounding a wanted offset.
///
/// `lower.offset <= wanted < upper.offset`. The data segment bytes in
/// `[lower.position, upper.position)` hold the wanted record, possibly
/// followed by a few more.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bracket {
    pub lower: IndexEntry,
    pub upper: IndexEntry,
}

impl Bracket {
    /// Builds a bracket, rejecting positions that go backwards.
    pub fn new(lower: IndexEntry, upper: IndexEntry) -> Result<Self, LookupError> {
        if upper.position < lower.position {
            return Err(LookupError::CorruptIndex { lower, upper });
        }
        Ok(Self { lower, upper })
    }

    /// Number of bytes in the window, `upper.position - lower.position`.
    ///
    /// Fails with [`LookupError::CorruptIndex`] instead of wrapping when the
    /// bracket was assembled by hand with positions out of order.
    pub fn window_len(&self) -> Result<u32, LookupError> {
        self.upper
            .position
            .checked_sub(self.lower.position)
            .ok_or(LookupError::CorruptIndex {
                lower: self.lower,
                upper: self.upper,
            })
    }

    /// Returns `true` if `wanted` falls inside the bracket's offset range.
    #[must_use]
    pub fn contains(&self, wanted: u32) -> bool {
        self.lower.offset <= wanted && wanted < self.upper.offset
    }
}
