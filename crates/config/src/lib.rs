//! # Config - Lookup Configuration
//!
//! A single [`Config`] value carries every setting the locator needs. It is
//! built once (defaults, then environment, then command-line flags) and passed
//! by reference into each lookup, so lookups share no global state and can
//! run in parallel.
//!
//! ## Environment
//!
//! ```text
//! KLOG_ROOT          broker log directory     (default: "/tmp/kafka-logs-0")
//! KLOG_DUMP_PROGRAM  record decoder program   (default: "kafka-run-class.sh")
//! KLOG_TMP_DIR       scratch dir for windows  (default: system temp dir)
//! ```

use std::path::PathBuf;

/// Default broker log directory.
pub const DEFAULT_ROOT: &str = "/tmp/kafka-logs-0";

/// Default record decoder launcher.
pub const DEFAULT_DUMP_PROGRAM: &str = "kafka-run-class.sh";

/// Arguments placed before the file path when invoking the decoder.
pub const DEFAULT_DUMP_ARGS: [&str; 3] = ["kafka.tools.DumpLogSegments", "--print-data-log", "--files"];

/// Reads a configuration value from the environment, falling back to `default`.
fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// How the external record decoder is launched: `program args... <path>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderConfig {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_DUMP_PROGRAM.to_string(),
            args: DEFAULT_DUMP_ARGS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Settings shared by every lookup of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Broker log directory holding the `{topic}-{partition}` directories.
    pub root: PathBuf,
    /// Suffix of sparse index files.
    pub index_suffix: String,
    /// Suffix of data segment files.
    pub data_suffix: String,
    pub decoder: DecoderConfig,
    /// Where windows are materialized for the decoder. `None` = system temp dir.
    pub tmp_dir: Option<PathBuf>,
    /// Use the in-memory binary search instead of the streaming scan.
    pub binary_search: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
            index_suffix: ".index".to_string(),
            data_suffix: ".log".to_string(),
            decoder: DecoderConfig::default(),
            tmp_dir: None,
            binary_search: false,
        }
    }
}

impl Config {
    /// Defaults overlaid with the `KLOG_*` environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let tmp_dir = std::env::var("KLOG_TMP_DIR").ok().filter(|s| !s.is_empty()).map(PathBuf::from);
        Self {
            root: PathBuf::from(env_or("KLOG_ROOT", DEFAULT_ROOT)),
            decoder: DecoderConfig {
                program: env_or("KLOG_DUMP_PROGRAM", DEFAULT_DUMP_PROGRAM),
                ..defaults.decoder.clone()
            },
            tmp_dir,
            ..defaults
        }
    }
}
