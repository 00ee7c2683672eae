use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use index::{Bracket, LookupError};
use tempfile::TempDir;

/// Bytes `[lower.position, upper.position)` of a data segment.
///
/// The buffer is owned, so the segment file is already closed by the time a
/// caller holds a `Window`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    segment: PathBuf,
    bracket: Bracket,
    bytes: Vec<u8>,
}

impl Window {
    /// Path of the data segment the window was cut from.
    #[must_use]
    pub fn segment(&self) -> &Path {
        &self.segment
    }

    #[must_use]
    pub fn bracket(&self) -> Bracket {
        self.bracket
    }

    /// First byte position (inclusive).
    #[must_use]
    pub fn start(&self) -> u32 {
        self.bracket.lower.position
    }

    /// Last byte position (exclusive).
    #[must_use]
    pub fn end(&self) -> u32 {
        self.bracket.upper.position
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Writes the window to a fresh temporary directory under `tmp_root`
    /// (the system temp dir if `None`), named after the source segment.
    ///
    /// Decoders pick the file type from the suffix, so the copy keeps the
    /// segment's file name. The directory is removed when the returned
    /// [`MaterializedWindow`] is dropped.
    pub fn materialize(&self, tmp_root: Option<&Path>) -> Result<MaterializedWindow, LookupError> {
        let dir = match tmp_root {
            Some(root) => TempDir::new_in(root).map_err(|e| LookupError::from_io(root, e))?,
            None => TempDir::new().map_err(|e| LookupError::from_io(&std::env::temp_dir(), e))?,
        };
        let name = self
            .segment
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "segment.log".into());
        let path = dir.path().join(name);

        let mut f = File::create(&path).map_err(|e| LookupError::from_io(&path, e))?;
        f.write_all(&self.bytes)
            .and_then(|()| f.sync_all())
            .map_err(|e| LookupError::from_io(&path, e))?;

        tracing::debug!(path = %path.display(), bytes = self.bytes.len(), "materialized window");
        Ok(MaterializedWindow { _dir: dir, path })
    }
}

/// A window written to disk. Dropping it deletes the file and its directory.
#[derive(Debug)]
pub struct MaterializedWindow {
    _dir: TempDir,
    path: PathBuf,
}

impl MaterializedWindow {
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Reads exactly the bytes `bracket` delimits from the segment at `segment_path`.
///
/// # Errors
///
/// - [`LookupError::CorruptIndex`] if `upper.position < lower.position`; no
///   read is attempted.
/// - [`LookupError::NotFound`] / [`LookupError::Io`] on open, seek or read faults.
/// - [`LookupError::ShortRead`] if the segment ends before `upper.position`.
pub fn extract_window(segment_path: &Path, bracket: &Bracket) -> Result<Window, LookupError> {
    let len = bracket.window_len()?;
    let io_err = |e| LookupError::from_io(segment_path, e);

    let mut f = File::open(segment_path).map_err(io_err)?;

    // Bound the buffer by what the file holds, not by what the index claims.
    let file_len = f.metadata().map_err(io_err)?.len();
    let available = file_len.saturating_sub(u64::from(bracket.lower.position));
    if available < u64::from(len) {
        return Err(LookupError::ShortRead {
            expected: len,
            actual: available as u32,
        });
    }

    f.seek(SeekFrom::Start(u64::from(bracket.lower.position)))
        .map_err(io_err)?;

    let mut bytes = Vec::with_capacity(len as usize);
    let actual = f
        .take(u64::from(len))
        .read_to_end(&mut bytes)
        .map_err(io_err)?;

    if actual < len as usize {
        return Err(LookupError::ShortRead {
            expected: len,
            actual: actual as u32,
        });
    }

    tracing::debug!(
        segment = %segment_path.display(),
        start = bracket.lower.position,
        end = bracket.upper.position,
        "extracted window"
    );
    Ok(Window {
        segment: segment_path.to_path_buf(),
        bracket: *bracket,
        bytes,
    })
}
