//! cardsweep - empty a camera memory card onto your desktop
//!
//! This library finds the card, classifies its files by extension, and
//! applies one confirmed action per category: move, move and rename after
//! the creation time, delete, ignore, or ask file by file. Afterwards it can
//! restore the camera's default catalog files and remove folders left empty.

pub mod cli;
pub mod config;
pub mod error;
pub mod executor;
pub mod file_category;
pub mod fs;
pub mod output;
pub mod prompt;
pub mod prune;
pub mod restore;
pub mod volume;

pub use config::{PruneMode, TransferConfig, UnneededPolicy, VolumeSettings};
pub use error::{TransferError, TransferResult};
pub use executor::{ActionExecutor, FileOutcome, GroupReport};
pub use file_category::{ActionCategory, Classifier, FileRecord, Group};
pub use fs::{FileSystem, RealFileSystem};
pub use prompt::{Confirm, ConsolePrompt};
pub use volume::{Sleeper, ThreadSleeper, Volume};

pub use cli::{Cli, TransferSummary, run_cli, run_transfer};
