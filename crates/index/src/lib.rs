//! # Index - Sparse Offset Index
//!
//! Reader, writer and search for the sparse offset index that sits next to
//! every data segment of a partition (`00000000000000000000.index` next to
//! `00000000000000000000.log`).
//!
//! The index records a checkpoint every few kilobytes of the data segment:
//! "the record with this logical offset starts at this byte position". It is
//! *sparse*, so a lookup never lands on an exact record. Instead it brackets
//! the wanted offset between two checkpoints and the caller reads the byte
//! range between them.
//!
//! ## File layout
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │ offset (u32 BE) | position (u32 BE)          <- entry 0        │
//! │ offset (u32 BE) | position (u32 BE)          <- entry 1        │
//! │ ...                                                           │
//! │ 0x00000000      | 0x00000000                 <- unwritten slot │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! No header, no record count, no footer. The file ends at EOF. Brokers
//! pre-allocate index files, so the tail may be zero-filled: any entry past
//! the first whose offset is `0` is an [`IndexSlot::Unpopulated`] slot, not a
//! real checkpoint. The very first entry is always a real checkpoint, even
//! when it is `(0, 0)`.
//!
//! ## Lookup
//!
//! ```text
//!   IndexEntryReader ──slots──> find_bracket(wanted) ──> Bracket { lower, upper }
//!
//!   IndexSnapshot::load ──────> snapshot.bracket(wanted) (binary search)
//! ```
//!
//! Both paths return the first entry strictly greater than `wanted` paired with
//! its predecessor. The linear scan is lazy and cancellable; the snapshot is
//! faster when the same index is queried many times.
//!
//! ## Example
//!
//! ```rust,no_run
//! use index::{find_bracket, IndexEntryReader};
//!
//! let reader = IndexEntryReader::open("00000000000000000000.index").unwrap();
//! let bracket = find_bracket(reader, 150, None).unwrap();
//! println!("scan bytes {}..{}", bracket.lower.position, bracket.upper.position);
//! ```

mod error;
mod format;
mod reader;
mod search;
mod writer;

pub use error::LookupError;
pub use format::{Bracket, IndexEntry, IndexSlot, ENTRY_BYTES};
pub use reader::IndexEntryReader;
pub use search::{find_bracket, IndexSnapshot};
pub use writer::IndexWriter;

#[cfg(test)]
mod tests;
