//! Restoring the camera's default files onto the card.
//!
//! Cameras keep catalog files (database and index files) on the card and
//! may refuse to record or rebuild them slowly when they are missing. A
//! local template directory holding a copy of them is written back onto the
//! card after the transfer.

use crate::error::{TransferError, TransferResult};
use crate::fs::FileSystem;
use crate::output::OutputFormatter;
use crate::prompt::Confirm;
use std::path::Path;

/// What the restore step did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// The user said no.
    Declined,
    /// The template directory does not exist.
    TemplateMissing,
    /// Files copied onto the card.
    Restored { files: usize },
}

/// Asks whether to restore the defaults and, if so, copies `template` onto
/// `volume_root`.
///
/// Existing files on the card are overwritten and missing subdirectories
/// are created. A missing template is reported, not treated as an error.
///
/// # Arguments
///
/// * `fs` - Filesystem used for listing and copying
/// * `prompt` - Asked once whether to restore
/// * `template` - Directory holding the default files, laid out as on the card
/// * `volume_root` - Root of the card
///
/// # Returns
///
/// What was done, or the first copy or directory error.
///
/// # Example
///
/// ```no_run
/// use cardsweep::fs::RealFileSystem;
/// use cardsweep::prompt::ConsolePrompt;
/// use cardsweep::restore::restore_defaults;
/// use std::path::Path;
///
/// let outcome = restore_defaults(
///     &RealFileSystem,
///     &mut ConsolePrompt::stdin(),
///     Path::new("DefaultCardFiles"),
///     Path::new("/media/card"),
/// )?;
/// println!("{:?}", outcome);
/// # Ok::<(), cardsweep::TransferError>(())
/// ```
pub fn restore_defaults(
    fs: &dyn FileSystem,
    prompt: &mut dyn Confirm,
    template: &Path,
    volume_root: &Path,
) -> TransferResult<RestoreOutcome> {
    let accepted = prompt
        .confirm("Do you want to restore the default files onto the card?")
        .map_err(|source| TransferError::PromptFailed { source })?;
    if !accepted {
        OutputFormatter::info("The default files will not be restored.");
        return Ok(RestoreOutcome::Declined);
    }

    if !fs.exists(template) {
        OutputFormatter::warning(&format!(
            "Template directory {} not found; nothing to restore.",
            template.display()
        ));
        return Ok(RestoreOutcome::TemplateMissing);
    }

    let files = copy_tree(fs, template, volume_root)?;
    OutputFormatter::success(&format!("Restored {} default file(s)", files));
    Ok(RestoreOutcome::Restored { files })
}

/// Copies every file below `from` to the same relative path below `to`.
fn copy_tree(fs: &dyn FileSystem, from: &Path, to: &Path) -> TransferResult<usize> {
    let sources = fs
        .list_files(from)
        .map_err(|source| TransferError::ListFailed {
            path: from.to_path_buf(),
            source,
        })?;

    let pb = OutputFormatter::create_progress_bar(sources.len() as u64);
    for source in &sources {
        // list_files only yields paths below `from`.
        let relative = source.strip_prefix(from).unwrap_or(source);
        let target = to.join(relative);

        if let Some(parent) = target.parent() {
            fs.create_dir_all(parent)
                .map_err(|e| TransferError::DirectoryCreationFailed {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }

        pb.set_message(relative.display().to_string());
        fs.copy_file(source, &target)
            .map_err(|e| TransferError::CopyFailed {
                source: source.clone(),
                destination: target.clone(),
                source_error: e,
            })?;
        pb.inc(1);
    }
    pb.finish_and_clear();

    Ok(sources.len())
}
