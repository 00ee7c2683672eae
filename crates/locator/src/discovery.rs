//! Partition directory and segment file discovery.
//!
//! A broker keeps one directory per partition replica, named
//! `{topic}-{partition}`, anywhere below its log root. Discovery walks the
//! root recursively, keeps the partition directories of one topic, and lists
//! the segment files inside them. Finding nothing is not an error.

use index::LookupError;
use segment::{has_suffix, partition_of, SegmentNaming};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Partition directories of `topic` below `root`, sorted by path.
///
/// Only directories whose name is exactly `{topic}-{number}` match, so
/// `orders-retry-0` is not a partition of `orders`.
///
/// # Errors
///
/// [`LookupError::NotFound`] if `root` does not exist.
pub fn partition_dirs(root: &Path, topic: &str) -> Result<Vec<PathBuf>, LookupError> {
    std::fs::metadata(root).map_err(|e| LookupError::from_io(root, e))?;

    let mut dirs: Vec<PathBuf> = WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_dir())
        .map(|entry| entry.into_path())
        .filter(|p| matches!(partition_of(p), Some((ref t, _)) if t == topic))
        .collect();

    dirs.sort();
    tracing::debug!(root = %root.display(), topic, count = dirs.len(), "found partition directories");
    Ok(dirs)
}

/// Files ending in `suffix` inside `dir` (recursively), ordered by the base
/// offset in their names. Files without a numeric base name sort last.
pub fn segment_files(dir: &Path, suffix: &str, naming: &SegmentNaming) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|p| has_suffix(p, suffix))
        .collect();

    files.sort_by_key(|p| (naming.base_offset(p).unwrap_or(u64::MAX), p.clone()));
    files
}

/// Every file ending in `suffix` across all partitions of `topic`, grouped by
/// partition directory and ordered by base offset within each.
pub fn topic_files(
    root: &Path,
    topic: &str,
    suffix: &str,
    naming: &SegmentNaming,
) -> Result<Vec<PathBuf>, LookupError> {
    let mut files = Vec::new();
    for dir in partition_dirs(root, topic)? {
        files.extend(segment_files(&dir, suffix, naming));
    }
    Ok(files)
}
