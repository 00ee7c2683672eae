//! # Segment - Data Segment Access
//!
//! Everything that touches the data segment (`.log`) side of a segment pair:
//!
//! - [`SegmentNaming`] maps an index path to its sibling data path and back.
//!   Pure string work, no I/O.
//! - [`extract_window`] reads the byte range a [`Bracket`](index::Bracket)
//!   delimits and returns it as an owned [`Window`].
//! - [`Window::materialize`] writes a window to a scoped temporary file so an
//!   external decoder can read it as if it were a segment.
//!
//! ## Directory layout
//!
//! ```text
//! <root>/
//!   orders-0/                          <- {topic}-{partition}
//!     00000000000000000000.index       <- sparse offset index
//!     00000000000000000000.log         <- data segment
//!     00000000000000368769.index
//!     00000000000000368769.log         <- base offset 368769
//!   orders-1/
//!     ...
//! ```
//!
//! The segment contents are never interpreted here. A window is an opaque
//! byte range that starts on a record boundary because the index says so.

mod naming;
mod window;

pub use naming::{has_suffix, partition_of, SegmentNaming, DATA_SUFFIX, INDEX_SUFFIX};
pub use window::{extract_window, MaterializedWindow, Window};

#[cfg(test)]
mod tests;
