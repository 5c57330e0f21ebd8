//! Run configuration.
//!
//! There is no configuration file: every setting has a built-in default that
//! can be overridden from the command line or the environment (see
//! [`crate::cli::Cli`]). The resolved values are collected once into a
//! [`TransferConfig`] and passed by reference through the whole pipeline.
//!
//! # Defaults
//!
//! | Setting | Default |
//! |---|---|
//! | card | `D:\` (Windows) or `/media/card` |
//! | fallback card | `E:\` (Windows) or `/media/card2` |
//! | destination | the desktop folder |
//! | template | `./DefaultCardFiles` |
//! | unneeded files | ignored |
//! | pruning | subtree-wide |

use crate::file_category::ActionCategory;
use clap::ValueEnum;
use std::path::PathBuf;
use std::time::Duration;

/// Where the card is expected to be mounted.
#[cfg(windows)]
pub const DEFAULT_SOURCE: &str = r"D:\";
#[cfg(not(windows))]
pub const DEFAULT_SOURCE: &str = "/media/card";

/// Tried once when the primary location exists but cannot be read, which
/// happens when a fixed drive answers under the card's usual letter.
#[cfg(windows)]
pub const DEFAULT_FALLBACK_SOURCE: &str = r"E:\";
#[cfg(not(windows))]
pub const DEFAULT_FALLBACK_SOURCE: &str = "/media/card2";

/// Directory whose contents are copied back onto the card after a run.
pub const DEFAULT_TEMPLATE_DIR: &str = "DefaultCardFiles";

/// Delay between checks while waiting for the card to be inserted.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// What to do with the camera's catalog and metadata files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum UnneededPolicy {
    /// Leave them on the card.
    #[default]
    Ignore,
    /// Delete them after confirmation.
    Delete,
}

impl UnneededPolicy {
    /// The category unneeded files are classified into under this policy.
    pub fn category(self) -> ActionCategory {
        match self {
            UnneededPolicy::Ignore => ActionCategory::Ignore,
            UnneededPolicy::Delete => ActionCategory::Delete,
        }
    }
}

/// How empty directories are detected after a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PruneMode {
    /// Remove a top-level directory only when its whole subtree holds no files.
    #[default]
    Subtree,
    /// Remove every directory that is empty once its children were pruned.
    PerDirectory,
}

/// Where to look for the card and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeSettings {
    pub primary: PathBuf,
    pub fallback: PathBuf,
    pub poll_interval: Duration,
    /// `None` waits forever.
    pub max_attempts: Option<u32>,
}

impl Default for VolumeSettings {
    fn default() -> Self {
        Self {
            primary: PathBuf::from(DEFAULT_SOURCE),
            fallback: PathBuf::from(DEFAULT_FALLBACK_SOURCE),
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_attempts: None,
        }
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferConfig {
    pub volume: VolumeSettings,
    /// Folder receiving moved and renamed files.
    pub destination: PathBuf,
    pub template_dir: PathBuf,
    pub unneeded: UnneededPolicy,
    pub prune_mode: PruneMode,
    /// Wait for Enter before returning.
    pub pause_at_end: bool,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            volume: VolumeSettings::default(),
            destination: default_destination(),
            template_dir: PathBuf::from(DEFAULT_TEMPLATE_DIR),
            unneeded: UnneededPolicy::default(),
            prune_mode: PruneMode::default(),
            pause_at_end: true,
        }
    }
}

/// Resolves the user's desktop folder.
///
/// Falls back to the home directory and then to the working directory on
/// systems without a desktop.
pub fn default_destination() -> PathBuf {
    dirs::desktop_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_ignores_unneeded_files() {
        let config = TransferConfig::default();
        assert_eq!(config.unneeded, UnneededPolicy::Ignore);
        assert_eq!(config.unneeded.category(), ActionCategory::Ignore);
    }

    #[test]
    fn test_delete_policy_maps_to_delete_category() {
        assert_eq!(UnneededPolicy::Delete.category(), ActionCategory::Delete);
    }

    #[test]
    fn test_default_volume_waits_forever() {
        let settings = VolumeSettings::default();
        assert_eq!(settings.max_attempts, None);
        assert_eq!(settings.poll_interval, Duration::from_secs(1));
        assert_eq!(settings.primary, PathBuf::from(DEFAULT_SOURCE));
    }

    #[test]
    fn test_prune_mode_value_names() {
        assert_eq!(
            PruneMode::from_str("per-directory", true),
            Ok(PruneMode::PerDirectory)
        );
        assert_eq!(PruneMode::from_str("subtree", true), Ok(PruneMode::Subtree));
    }
}
