use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::IndexEntry;

/// Errors produced while locating an offset in a segment.
///
/// Every variant is scoped to a single segment. Callers iterating over many
/// segments are expected to record the failure and move on to the next one.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The index or segment file does not exist.
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Open, seek or read failed for a reason other than clean end-of-file.
    #[error("io error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The scan hit an unwritten (zero-padded) slot before bracketing the offset.
    #[error("offset {wanted} not indexed: reached an unpopulated index slot")]
    OffsetNotIndexed { wanted: u32 },

    /// The index ended before any entry exceeded the wanted offset.
    #[error("offset {wanted} out of range: index exhausted")]
    OffsetOutOfRange { wanted: u32 },

    /// The bracket positions go backwards, which would be a negative window.
    #[error(
        "corrupt index: position {} at offset {} is before position {} at offset {}",
        .upper.position, .upper.offset, .lower.position, .lower.offset
    )]
    CorruptIndex { lower: IndexEntry, upper: IndexEntry },

    /// The segment holds fewer bytes than the bracket says it should.
    #[error("short read: expected {expected} bytes, got {actual}")]
    ShortRead { expected: u32, actual: u32 },

    /// The file name does not carry the suffix the naming convention expects.
    #[error("invalid segment path: {}", .0.display())]
    InvalidPath(PathBuf),

    /// The caller raised the cancellation flag during the scan.
    #[error("lookup cancelled")]
    Cancelled,
}

impl LookupError {
    /// Wraps an I/O error for `path`, mapping `NotFound` to its own variant.
    pub fn from_io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            LookupError::NotFound(path.to_path_buf())
        } else {
            LookupError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}
