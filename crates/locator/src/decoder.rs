//! Record decoding, delegated to an external tool.
//!
//! The locator never parses record batches. It hands a segment-formatted file
//! to a [`RecordDecoder`] and prints what comes back. The default decoder runs
//! the broker's own `DumpLogSegments` tool.

use anyhow::{bail, Context, Result};
use config::DecoderConfig;
use segment::Window;
use std::path::Path;
use std::process::Command;

/// Renders the records in a segment-formatted file as text lines.
pub trait RecordDecoder: Send + Sync {
    fn decode(&self, path: &Path) -> Result<Vec<String>>;
}

/// Runs `program args... <path>` and returns its non-blank stdout lines.
#[derive(Debug, Clone)]
pub struct DumpLogSegments {
    config: DecoderConfig,
}

impl DumpLogSegments {
    pub fn new(config: DecoderConfig) -> Self {
        Self { config }
    }
}

impl RecordDecoder for DumpLogSegments {
    fn decode(&self, path: &Path) -> Result<Vec<String>> {
        std::fs::metadata(path).with_context(|| format!("cannot read {}", path.display()))?;

        let output = Command::new(&self.config.program)
            .args(&self.config.args)
            .arg(path)
            .output()
            .with_context(|| format!("failed to run {}", self.config.program))?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() {
            bail!(
                "{} exited with {} on {}: {}",
                self.config.program,
                output.status,
                path.display(),
                stderr.trim()
            );
        }
        if !stderr.trim().is_empty() {
            tracing::warn!(program = %self.config.program, stderr = %stderr.trim(), "decoder wrote to stderr");
        }
        Ok(non_blank_lines(&output.stdout))
    }
}

/// Splits tool output into lines, dropping the blank ones.
pub fn non_blank_lines(out: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(out)
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Writes `window` to a scratch file under `tmp_root`, decodes it, and
/// removes the scratch file whether or not decoding succeeded.
pub fn decode_window(
    decoder: &dyn RecordDecoder,
    window: &Window,
    tmp_root: Option<&Path>,
) -> Result<Vec<String>> {
    let materialized = window
        .materialize(tmp_root)
        .context("failed to materialize window")?;
    let lines = decoder.decode(materialized.path());
    drop(materialized);
    lines
}
