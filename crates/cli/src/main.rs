//! # klog - Segmented Log Inspector
//!
//! Reads broker log segments straight from disk. Either decodes whole
//! segments, or uses the sparse offset index to cut out only the few
//! kilobytes around one offset and decodes just that.
//!
//! ## Commands
//!
//! ```text
//! klog log -f FILE              Decode one segment file
//! klog log -t TOPIC [-r ROOT]   Decode every segment of every partition of TOPIC
//! klog log -t TOPIC -o OFFSET   Decode only the records around OFFSET in each partition
//! klog log -f FILE -o OFFSET    Same, for one segment (FILE = .index or .log)
//! klog index FILE               Print the entries of an index file
//! ```
//!
//! ## Configuration
//!
//! ```text
//! KLOG_ROOT          broker log directory     (default: "/tmp/kafka-logs-0")
//! KLOG_DUMP_PROGRAM  record decoder program   (default: "kafka-run-class.sh")
//! KLOG_TMP_DIR       scratch dir for windows  (default: system temp dir)
//! KLOG_LOG           log filter, e.g. "debug" (falls back to RUST_LOG)
//! ```
//!
//! ## Example
//!
//! ```text
//! $ klog log -t orders -o 150 --window-only
//! /tmp/kafka-logs-0/orders-0/00000000000000000000.index: offsets [100, 250) bytes [50, 120) len 70
//! ```

mod logging;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use config::Config;
use index::{IndexEntryReader, IndexSlot};
use locator::decoder::DumpLogSegments;
use locator::{Locator, SegmentOutcome, Target};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "klog")]
#[command(about = "Inspect segmented broker logs through their offset index", long_about = None)]
struct Cli {
    /// Debug-level logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a segment file, all segments of a topic, or the records around an offset
    Log(LogArgs),
    /// Print the entries of an index file
    Index {
        /// Index file
        file: PathBuf,
    },
}

#[derive(Args)]
struct LogArgs {
    /// Segment file (data or index)
    #[arg(short, long, conflicts_with = "topic", required_unless_present = "topic")]
    file: Option<PathBuf>,

    /// Topic name
    #[arg(short, long)]
    topic: Option<String>,

    /// Broker log directory holding the {topic}-{partition} directories
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// Only extract the records around this offset
    #[arg(short, long)]
    offset: Option<u32>,

    /// Print the located byte windows instead of decoding them
    #[arg(long, requires = "offset")]
    window_only: bool,

    /// Load each index into memory and binary search it
    #[arg(long)]
    binary_search: bool,

    /// Record decoder program
    #[arg(long)]
    dump_program: Option<String>,

    /// Decoder arguments placed before the file path (repeatable; replaces the defaults)
    #[arg(long = "dump-arg", allow_hyphen_values = true)]
    dump_args: Vec<String>,

    /// Scratch directory for extracted windows
    #[arg(long)]
    tmp_dir: Option<PathBuf>,
}

impl LogArgs {
    /// Overlays the flags on the environment-derived configuration.
    fn config(&self) -> Config {
        let mut config = Config::from_env();
        if let Some(root) = &self.root {
            config.root = root.clone();
        }
        if let Some(program) = &self.dump_program {
            config.decoder.program = program.clone();
        }
        if !self.dump_args.is_empty() {
            config.decoder.args = self.dump_args.clone();
        }
        if let Some(tmp) = &self.tmp_dir {
            config.tmp_dir = Some(tmp.clone());
        }
        config.binary_search = self.binary_search;
        config
    }

    fn target(&self) -> Result<Target> {
        match (&self.file, &self.topic) {
            (Some(f), None) => Ok(Target::File(f.clone())),
            (None, Some(t)) => Ok(Target::Topic(t.clone())),
            _ => bail!("provide either --file or --topic, not both"),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(logging::Verbosity::from_flags(cli.verbose, cli.quiet));

    match cli.command {
        Commands::Log(args) => run_log(&args),
        Commands::Index { file } => run_index(&file),
    }
}

fn run_log(args: &LogArgs) -> Result<()> {
    let config = args.config();
    let target = args.target()?;
    tracing::info!(?target, root = %config.root.display(), offset = ?args.offset, "log");

    let decoder = DumpLogSegments::new(config.decoder.clone());
    let locator = Locator::new(config);

    let Some(wanted) = args.offset else {
        for line in locator.dump(&target, &decoder)? {
            println!("{}", line);
        }
        return Ok(());
    };

    let outcomes = locator.find(&target, wanted)?;
    let found = outcomes.iter().filter(|o| o.result.is_ok()).count();

    for SegmentOutcome { pair, result } in &outcomes {
        let Ok(window) = result else { continue };
        if args.window_only {
            let b = window.bracket();
            println!(
                "{}: offsets [{}, {}) bytes [{}, {}) len {}",
                pair.index.display(),
                b.lower.offset,
                b.upper.offset,
                window.start(),
                window.end(),
                window.len()
            );
            continue;
        }
        match locator.decode(&decoder, window) {
            Ok(lines) => {
                for line in lines {
                    println!("{}", line);
                }
            }
            Err(e) => tracing::warn!(data = %pair.data.display(), error = %format!("{e:#}"), "decode failed"),
        }
    }

    if found == 0 && !outcomes.is_empty() {
        if let [SegmentOutcome { result: Err(e), .. }] = outcomes.as_slice() {
            bail!("offset {}: {}", wanted, e);
        }
        bail!("offset {} not found in any of {} segments", wanted, outcomes.len());
    }
    Ok(())
}

fn run_index(file: &Path) -> Result<()> {
    let mut count = 0usize;
    for slot in IndexEntryReader::open(file)? {
        match slot? {
            IndexSlot::Entry(e) => {
                println!("offset: {} position: {}", e.offset, e.position);
                count += 1;
            }
            IndexSlot::Unpopulated => {
                println!("({} entries, unpopulated slots follow)", count);
                return Ok(());
            }
        }
    }
    println!("({} entries)", count);
    Ok(())
}
