/// Errors raised while transferring files off a memory card.
///
/// Every filesystem failure carries the path it happened on so the message
/// printed before the run aborts tells the user which file was involved.
use std::path::PathBuf;

/// Errors that can occur during a transfer run.
#[derive(Debug)]
pub enum TransferError {
    /// The card never appeared within the configured number of attempts.
    VolumeUnavailable { path: PathBuf, attempts: u32 },
    /// Failed to list the files on the card or in the template directory.
    ListFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to move a file to the destination.
    MoveFailed {
        source: PathBuf,
        destination: PathBuf,
        source_error: std::io::Error,
    },
    /// Failed to delete a file from the card.
    DeleteFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to copy a template file onto the card.
    CopyFailed {
        source: PathBuf,
        destination: PathBuf,
        source_error: std::io::Error,
    },
    /// Failed to create a directory.
    DirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to remove an empty directory.
    DirectoryRemovalFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The creation time of a file could not be read.
    TimestampUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Reading the user's answer failed (e.g. stdin was closed).
    PromptFailed { source: std::io::Error },
}

impl std::fmt::Display for TransferError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VolumeUnavailable { path, attempts } => {
                write!(
                    f,
                    "No memory card found at {} after {} attempt(s)",
                    path.display(),
                    attempts
                )
            }
            Self::ListFailed { path, source } => {
                write!(f, "Failed to list files in {}: {}", path.display(), source)
            }
            Self::MoveFailed {
                source,
                destination,
                source_error,
            } => {
                write!(
                    f,
                    "Failed to move {} to {}: {}",
                    source.display(),
                    destination.display(),
                    source_error
                )
            }
            Self::DeleteFailed { path, source } => {
                write!(f, "Failed to delete {}: {}", path.display(), source)
            }
            Self::CopyFailed {
                source,
                destination,
                source_error,
            } => {
                write!(
                    f,
                    "Failed to copy {} to {}: {}",
                    source.display(),
                    destination.display(),
                    source_error
                )
            }
            Self::DirectoryCreationFailed { path, source } => {
                write!(
                    f,
                    "Failed to create directory {}: {}",
                    path.display(),
                    source
                )
            }
            Self::DirectoryRemovalFailed { path, source } => {
                write!(
                    f,
                    "Failed to remove directory {}: {}",
                    path.display(),
                    source
                )
            }
            Self::TimestampUnavailable { path, source } => {
                write!(
                    f,
                    "Could not read the creation time of {}: {}",
                    path.display(),
                    source
                )
            }
            Self::PromptFailed { source } => {
                write!(f, "Could not read your answer: {}", source)
            }
        }
    }
}

impl std::error::Error for TransferError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::VolumeUnavailable { .. } => None,
            Self::ListFailed { source, .. }
            | Self::DeleteFailed { source, .. }
            | Self::DirectoryCreationFailed { source, .. }
            | Self::DirectoryRemovalFailed { source, .. }
            | Self::TimestampUnavailable { source, .. }
            | Self::PromptFailed { source } => Some(source),
            Self::MoveFailed { source_error, .. } | Self::CopyFailed { source_error, .. } => {
                Some(source_error)
            }
        }
    }
}

/// Result type for transfer operations.
pub type TransferResult<T> = Result<T, TransferError>;
