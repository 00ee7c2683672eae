//! # Locator - Offset Lookup Across Segments
//!
//! Ties the [`index`] and [`segment`] crates together into the full lookup
//! path and fans it out over every segment of a topic.
//!
//! ## Architecture
//!
//! ```text
//! Target (file | topic)
//!   |
//!   v
//! ┌───────────────────────────────────────────────┐
//! │                  LOCATOR                      │
//! │                                               │
//! │ discovery.rs → {topic}-N dirs → *.index files │
//! │              |                                │
//! │              v                                │
//! │ SegmentNaming → (index, log) pairs            │
//! │              |                                │
//! │              v        (rayon, one per pair)   │
//! │ lookup() → find_bracket → extract_window      │
//! │              |                                │
//! │              v                                │
//! │ decoder.rs → materialize → DumpLogSegments    │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! ## Module Responsibilities
//!
//! | Module          | Purpose                                           |
//! |-----------------|---------------------------------------------------|
//! | `lib.rs`        | `lookup()`, `Locator`, per-segment outcomes       |
//! | [`discovery`]   | Partition directory and segment file discovery    |
//! | [`decoder`]     | `RecordDecoder` trait and the DumpLogSegments runner |
//! | [`query`]       | `Target` resolution and whole-query drivers       |
//!
//! ## Failure model
//!
//! A lookup fails for one segment at a time. Multi-segment queries keep the
//! failure in that segment's [`SegmentOutcome`], log it, and carry on with
//! the rest. Nothing here aborts the process.

pub mod decoder;
pub mod discovery;
mod query;

use config::Config;
use index::{find_bracket, IndexEntryReader, IndexSnapshot, LookupError};
use rayon::prelude::*;
use segment::{extract_window, SegmentNaming, Window};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub use query::Target;

/// Finds the window of `segment_path` that holds offset `wanted`, using the
/// sparse index at `index_path`.
///
/// A pure function of its arguments: each call opens its own handles and
/// closes them before returning, on every path.
pub fn lookup(
    index_path: &Path,
    segment_path: &Path,
    wanted: u32,
    cancel: Option<&AtomicBool>,
) -> Result<Window, LookupError> {
    let reader = IndexEntryReader::open(index_path)?;
    let bracket = find_bracket(reader, wanted, cancel)?;
    tracing::debug!(
        index = %index_path.display(),
        wanted,
        lower = ?bracket.lower,
        upper = ?bracket.upper,
        "bracketed offset"
    );
    extract_window(segment_path, &bracket)
}

/// Same as [`lookup`] but brackets with an in-memory binary search.
pub fn lookup_snapshot(index_path: &Path, segment_path: &Path, wanted: u32) -> Result<Window, LookupError> {
    let bracket = IndexSnapshot::load(index_path)?.bracket(wanted)?;
    extract_window(segment_path, &bracket)
}

/// An index file and the data segment it describes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentPair {
    pub index: PathBuf,
    pub data: PathBuf,
}

/// Result of looking up one segment of a multi-segment query.
#[derive(Debug)]
pub struct SegmentOutcome {
    pub pair: SegmentPair,
    pub result: Result<Window, LookupError>,
}

/// Runs lookups under one [`Config`].
pub struct Locator {
    config: Config,
    naming: SegmentNaming,
    cancel: Arc<AtomicBool>,
}

impl std::fmt::Debug for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Locator")
            .field("root", &self.config.root)
            .field("naming", &self.naming)
            .field("binary_search", &self.config.binary_search)
            .field("cancelled", &self.cancel.load(Ordering::Relaxed))
            .finish()
    }
}

impl Locator {
    pub fn new(config: Config) -> Self {
        let naming = SegmentNaming::new(config.index_suffix.clone(), config.data_suffix.clone());
        Self {
            config,
            naming,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn naming(&self) -> &SegmentNaming {
        &self.naming
    }

    /// Flag checked by every index scan. Setting it makes in-flight and
    /// future lookups fail with [`LookupError::Cancelled`].
    #[must_use]
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// Pairs an index file with its data segment.
    pub fn pair_for_index(&self, index: &Path) -> Result<SegmentPair, LookupError> {
        Ok(SegmentPair {
            index: index.to_path_buf(),
            data: self.naming.data_path_for(index)?,
        })
    }

    /// Pairs a file given by the user, which may name either side of the pair.
    pub fn pair_for_file(&self, path: &Path) -> Result<SegmentPair, LookupError> {
        if self.naming.is_data(path) {
            let index = self.naming.index_path_for(path)?;
            Ok(SegmentPair {
                index,
                data: path.to_path_buf(),
            })
        } else {
            self.pair_for_index(path)
        }
    }

    /// Looks up `wanted` in one segment.
    ///
    /// The linear scan checks the cancel flag before every entry. With
    /// `binary_search` the index is loaded in a single read that cannot be
    /// interrupted, so the flag is checked before the load and again before
    /// the segment is touched.
    pub fn locate(&self, pair: &SegmentPair, wanted: u32) -> Result<Window, LookupError> {
        if !self.config.binary_search {
            return lookup(&pair.index, &pair.data, wanted, Some(&self.cancel));
        }
        self.check_cancelled()?;
        let snapshot = IndexSnapshot::load(&pair.index)?;
        self.check_cancelled()?;
        let bracket = snapshot.bracket(wanted)?;
        extract_window(&pair.data, &bracket)
    }

    fn check_cancelled(&self) -> Result<(), LookupError> {
        if self.cancel.load(Ordering::Relaxed) {
            return Err(LookupError::Cancelled);
        }
        Ok(())
    }

    /// Looks up `wanted` in every pair in parallel.
    ///
    /// Outcomes come back in the order of `pairs`. Failed segments are logged
    /// and kept in the result; they never stop the others.
    pub fn locate_all(&self, pairs: &[SegmentPair], wanted: u32) -> Vec<SegmentOutcome> {
        pairs
            .par_iter()
            .map(|pair| {
                let result = self.locate(pair, wanted);
                if let Err(ref e) = result {
                    tracing::warn!(index = %pair.index.display(), error = %e, "skipping segment");
                }
                SegmentOutcome {
                    pair: pair.clone(),
                    result,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests;
