//! Command-line interface module for cardsweep.
//!
//! This module handles:
//! - Argument and environment parsing into a [`TransferConfig`]
//! - The transfer pipeline: locate the card, classify and group its files,
//!   apply each group's action, restore the default files, prune empty
//!   directories
//! - The final summary

use crate::config::{
    DEFAULT_FALLBACK_SOURCE, DEFAULT_SOURCE, DEFAULT_TEMPLATE_DIR, PruneMode, TransferConfig,
    UnneededPolicy, VolumeSettings, default_destination,
};
use crate::error::{TransferError, TransferResult};
use crate::executor::{ActionExecutor, GroupReport};
use crate::file_category::{Classifier, FileRecord};
use crate::fs::{FileSystem, RealFileSystem};
use crate::output::OutputFormatter;
use crate::prompt::{Confirm, ConsolePrompt};
use crate::prune::prune_empty_dirs;
use crate::restore::{RestoreOutcome, restore_defaults};
use crate::volume::{Sleeper, ThreadSleeper, locate};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

/// Move photos and videos off a camera memory card.
#[derive(Debug, Parser)]
#[command(name = "cardsweep", version, about, long_about = None)]
pub struct Cli {
    /// Where the memory card is mounted
    #[arg(long, env = "CARDSWEEP_SOURCE", default_value = DEFAULT_SOURCE)]
    pub source: PathBuf,

    /// Tried once if the card location exists but cannot be read
    #[arg(long, env = "CARDSWEEP_FALLBACK_SOURCE", default_value = DEFAULT_FALLBACK_SOURCE)]
    pub fallback_source: PathBuf,

    /// Folder receiving the files (defaults to the desktop)
    #[arg(long, env = "CARDSWEEP_DESTINATION")]
    pub destination: Option<PathBuf>,

    /// Folder whose contents are restored onto the card afterwards
    #[arg(long, env = "CARDSWEEP_TEMPLATE", default_value = DEFAULT_TEMPLATE_DIR)]
    pub template: PathBuf,

    /// What to do with the camera's catalog files
    #[arg(long, env = "CARDSWEEP_UNNEEDED", value_enum, default_value_t = UnneededPolicy::Ignore)]
    pub unneeded: UnneededPolicy,

    /// How empty directories are detected after the transfer
    #[arg(long, env = "CARDSWEEP_PRUNE", value_enum, default_value_t = PruneMode::Subtree)]
    pub prune: PruneMode,

    /// Milliseconds between checks while waiting for the card
    #[arg(long, env = "CARDSWEEP_POLL_MS", default_value_t = 1000)]
    pub poll_ms: u64,

    /// Stop waiting for the card after this many checks
    #[arg(long, env = "CARDSWEEP_MAX_ATTEMPTS")]
    pub max_attempts: Option<u32>,

    /// Exit without waiting for Enter
    #[arg(long)]
    pub no_pause: bool,
}

impl Cli {
    /// Resolves the parsed arguments into the run configuration.
    pub fn into_config(self) -> TransferConfig {
        TransferConfig {
            volume: VolumeSettings {
                primary: self.source,
                fallback: self.fallback_source,
                poll_interval: Duration::from_millis(self.poll_ms),
                max_attempts: self.max_attempts,
            },
            destination: self.destination.unwrap_or_else(default_destination),
            template_dir: self.template,
            unneeded: self.unneeded,
            prune_mode: self.prune,
            pause_at_end: !self.no_pause,
        }
    }
}

/// Everything a run did, for the final summary and for tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferSummary {
    pub volume_root: PathBuf,
    pub groups: Vec<GroupReport>,
    pub restore: RestoreOutcome,
    pub pruned: Vec<PathBuf>,
}

/// Runs the interactive transfer on the real console and filesystem.
///
/// # Examples
///
/// ```no_run
/// use cardsweep::cli::{Cli, run_cli};
/// use clap::Parser;
///
/// let cli = Cli::parse_from(["cardsweep", "--source", "/media/card"]);
/// if let Err(e) = run_cli(cli) {
///     eprintln!("Error: {}", e);
/// }
/// ```
pub fn run_cli(cli: Cli) -> TransferResult<()> {
    let config = cli.into_config();
    let mut prompt = ConsolePrompt::stdin();
    let mut sleeper = ThreadSleeper;
    run_transfer(&config, &RealFileSystem, &mut prompt, &mut sleeper).map(|_| ())
}

/// Runs the whole pipeline with injected capabilities.
///
/// Stops at the first failing file operation; everything done before it
/// stays done.
pub fn run_transfer(
    config: &TransferConfig,
    fs: &dyn FileSystem,
    prompt: &mut dyn Confirm,
    sleeper: &mut dyn Sleeper,
) -> TransferResult<TransferSummary> {
    OutputFormatter::banner("Welcome to cardsweep, the photo-transferring app.");
    OutputFormatter::info("Looking for files on your memory card...");

    let volume = locate(&config.volume, fs, sleeper)?;
    OutputFormatter::info(&format!(
        "Found {} file(s) on {}",
        volume.files.len(),
        volume.root.display()
    ));

    if !fs.exists(&config.destination) {
        OutputFormatter::warning(&format!(
            "Destination {} does not exist; moves will fail.",
            config.destination.display()
        ));
    }

    let classifier = Classifier::new(config.unneeded);
    let records: Vec<FileRecord> = volume.files.iter().map(FileRecord::new).collect();
    let groups = classifier.group(records);

    let mut reports = Vec::with_capacity(groups.len());
    {
        let mut executor = ActionExecutor::new(fs, &mut *prompt, &config.destination);
        for group in &groups {
            reports.push(executor.run_group(group)?);
        }
    }

    let restore = restore_defaults(fs, &mut *prompt, &config.template_dir, &volume.root)?;
    let pruned = prune_empty_dirs(fs, &volume.root, config.prune_mode)?;
    if !pruned.is_empty() {
        OutputFormatter::success(&format!("Removed {} empty folder(s)", pruned.len()));
    }

    OutputFormatter::summary_table(&reports);

    if config.pause_at_end {
        // Input closing at the final pause is not a failure.
        match prompt.acknowledge("The program has finished. Press Enter to exit.") {
            Err(e) if e.kind() != io::ErrorKind::UnexpectedEof => {
                return Err(TransferError::PromptFailed { source: e });
            }
            _ => {}
        }
    }

    Ok(TransferSummary {
        volume_root: volume.root,
        groups: reports,
        restore,
        pruned,
    })
}
