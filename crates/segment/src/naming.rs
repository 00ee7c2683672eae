use std::path::{Path, PathBuf};

use index::LookupError;

/// Suffix of the sparse offset index file.
pub const INDEX_SUFFIX: &str = ".index";

/// Suffix of the data segment file.
pub const DATA_SUFFIX: &str = ".log";

/// The file naming convention of a segment pair.
///
/// A segment and its index share a base name (the zero-padded base offset of
/// the segment) and differ only in suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentNaming {
    pub index_suffix: String,
    pub data_suffix: String,
}

impl Default for SegmentNaming {
    fn default() -> Self {
        Self {
            index_suffix: INDEX_SUFFIX.to_string(),
            data_suffix: DATA_SUFFIX.to_string(),
        }
    }
}

impl SegmentNaming {
    pub fn new(index_suffix: impl Into<String>, data_suffix: impl Into<String>) -> Self {
        Self {
            index_suffix: index_suffix.into(),
            data_suffix: data_suffix.into(),
        }
    }

    /// Sibling data segment of an index file.
    ///
    /// `/x/orders-0/00000000000000000000.index` -> `/x/orders-0/00000000000000000000.log`
    pub fn data_path_for(&self, index_path: &Path) -> Result<PathBuf, LookupError> {
        swap_suffix(index_path, &self.index_suffix, &self.data_suffix)
    }

    /// Sibling index file of a data segment. Inverse of [`data_path_for`](Self::data_path_for).
    pub fn index_path_for(&self, data_path: &Path) -> Result<PathBuf, LookupError> {
        swap_suffix(data_path, &self.data_suffix, &self.index_suffix)
    }

    #[must_use]
    pub fn is_index(&self, path: &Path) -> bool {
        has_suffix(path, &self.index_suffix)
    }

    #[must_use]
    pub fn is_data(&self, path: &Path) -> bool {
        has_suffix(path, &self.data_suffix)
    }

    /// Base offset encoded in the file name, e.g. `368769` for
    /// `00000000000000368769.log`. `None` if the stem is not a number.
    #[must_use]
    pub fn base_offset(&self, path: &Path) -> Option<u64> {
        let stem = split_suffix(path, &self.index_suffix)
            .or_else(|| split_suffix(path, &self.data_suffix))?;
        stem.parse().ok()
    }
}

/// Splits a `{topic}-{partition}` directory name.
///
/// The topic may itself contain dashes; the partition is the part after the
/// last one.
#[must_use]
pub fn partition_of(dir: &Path) -> Option<(String, u32)> {
    let name = dir.file_name()?.to_str()?;
    let (topic, partition) = name.rsplit_once('-')?;
    if topic.is_empty() {
        return None;
    }
    Some((topic.to_string(), partition.parse().ok()?))
}

/// True if the file name ends in `suffix` with a non-empty stem before it.
#[must_use]
pub fn has_suffix(path: &Path, suffix: &str) -> bool {
    split_suffix(path, suffix).is_some()
}

/// Returns the file stem left after removing `suffix`, if the file name
/// carries it and something precedes it.
fn split_suffix<'a>(path: &'a Path, suffix: &str) -> Option<&'a str> {
    let name = path.file_name()?.to_str()?;
    let stem = name.strip_suffix(suffix)?;
    if stem.is_empty() {
        None
    } else {
        Some(stem)
    }
}

fn swap_suffix(path: &Path, from: &str, to: &str) -> Result<PathBuf, LookupError> {
    let stem = split_suffix(path, from).ok_or_else(|| LookupError::InvalidPath(path.to_path_buf()))?;
    Ok(path.with_file_name(format!("{stem}{to}")))
}
