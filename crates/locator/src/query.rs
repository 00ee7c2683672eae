//! Whole-query drivers: resolve what the user pointed at into segment files,
//! then run lookups or full decodes over them.

use anyhow::{bail, Result};
use index::LookupError;
use segment::Window;
use std::path::PathBuf;

use crate::decoder::{decode_window, RecordDecoder};
use crate::discovery::topic_files;
use crate::{Locator, SegmentOutcome, SegmentPair};

/// What a query runs against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// One file. For offset queries it may be either the index or the data file.
    File(PathBuf),
    /// Every partition of a topic below the configured root.
    Topic(String),
}

impl Locator {
    /// Segment pairs an offset query over `target` searches.
    pub fn pairs_for(&self, target: &Target) -> Result<Vec<SegmentPair>, LookupError> {
        match target {
            Target::File(path) => Ok(vec![self.pair_for_file(path)?]),
            Target::Topic(topic) => {
                let naming = self.naming();
                topic_files(&self.config().root, topic, &naming.index_suffix, naming)?
                    .iter()
                    .map(|index| self.pair_for_index(index))
                    .collect()
            }
        }
    }

    /// Data segments a full dump of `target` decodes.
    pub fn data_files_for(&self, target: &Target) -> Result<Vec<PathBuf>, LookupError> {
        match target {
            Target::File(path) => Ok(vec![path.clone()]),
            Target::Topic(topic) => {
                let naming = self.naming();
                topic_files(&self.config().root, topic, &naming.data_suffix, naming)
            }
        }
    }

    /// Looks up `wanted` in every segment of `target`.
    pub fn find(&self, target: &Target, wanted: u32) -> Result<Vec<SegmentOutcome>, LookupError> {
        let pairs = self.pairs_for(target)?;
        if pairs.is_empty() {
            tracing::info!(?target, "no index files found");
        }
        Ok(self.locate_all(&pairs, wanted))
    }

    /// Decodes one window through `decoder`, using the configured scratch dir.
    pub fn decode(&self, decoder: &dyn RecordDecoder, window: &Window) -> Result<Vec<String>> {
        decode_window(decoder, window, self.config().tmp_dir.as_deref())
    }

    /// Decodes every data segment of `target`, in order.
    ///
    /// A segment the decoder fails on is logged and skipped. If every segment
    /// fails the dump fails too; with a single segment its own error is
    /// returned.
    pub fn dump(&self, target: &Target, decoder: &dyn RecordDecoder) -> Result<Vec<String>> {
        let files = self.data_files_for(target)?;
        let mut lines = Vec::new();
        let mut failed = 0usize;
        let mut last_err = None;

        for file in &files {
            match decoder.decode(file) {
                Ok(mut l) => lines.append(&mut l),
                Err(e) => {
                    tracing::warn!(file = %file.display(), error = %format!("{e:#}"), "skipping segment");
                    failed += 1;
                    last_err = Some(e);
                }
            }
        }

        if failed > 0 && failed == files.len() {
            match last_err {
                Some(e) if failed == 1 => return Err(e),
                _ => bail!("all {} segments failed to decode", failed),
            }
        }
        Ok(lines)
    }
}
