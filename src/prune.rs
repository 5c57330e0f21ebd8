/// Removing directories left empty on the card.
///
/// Moving and deleting files leaves their folders behind. The root of the
/// card itself is never removed.
use crate::config::PruneMode;
use crate::error::{TransferError, TransferResult};
use crate::fs::FileSystem;
use std::path::{Path, PathBuf};

/// Removes empty directories below `root` according to `mode` and returns
/// the removed paths, children before parents.
///
/// # Modes
///
/// * [`PruneMode::Subtree`]: a top-level directory is removed, together
///   with all its descendants, only if no file exists anywhere below it.
///   A directory holding a file somewhere keeps all of its children, even
///   empty ones.
/// * [`PruneMode::PerDirectory`]: every directory that is empty once its
///   own children were pruned is removed.
///
/// # Arguments
///
/// * `fs` - Filesystem used for listing and removing directories
/// * `root` - Root of the card; never removed itself
/// * `mode` - How emptiness is judged
///
/// # Example
///
/// ```no_run
/// use cardsweep::config::PruneMode;
/// use cardsweep::fs::RealFileSystem;
/// use cardsweep::prune::prune_empty_dirs;
/// use std::path::Path;
///
/// let removed = prune_empty_dirs(&RealFileSystem, Path::new("/media/card"), PruneMode::Subtree)?;
/// println!("removed {} folder(s)", removed.len());
/// # Ok::<(), cardsweep::TransferError>(())
/// ```
pub fn prune_empty_dirs(
    fs: &dyn FileSystem,
    root: &Path,
    mode: PruneMode,
) -> TransferResult<Vec<PathBuf>> {
    let mut removed = Vec::new();
    match mode {
        PruneMode::Subtree => {
            for child in list_dirs(fs, root)? {
                let files = fs
                    .list_files(&child)
                    .map_err(|source| TransferError::ListFailed {
                        path: child.clone(),
                        source,
                    })?;
                if files.is_empty() {
                    remove_tree(fs, &child, &mut removed)?;
                }
            }
        }
        PruneMode::PerDirectory => prune_bottom_up(fs, root, &mut removed)?,
    }
    Ok(removed)
}

/// Removes `dir` and its (file-free) descendants, deepest first.
fn remove_tree(fs: &dyn FileSystem, dir: &Path, removed: &mut Vec<PathBuf>) -> TransferResult<()> {
    for child in list_dirs(fs, dir)? {
        remove_tree(fs, &child, removed)?;
    }
    remove_dir(fs, dir, removed)
}

fn prune_bottom_up(
    fs: &dyn FileSystem,
    dir: &Path,
    removed: &mut Vec<PathBuf>,
) -> TransferResult<()> {
    for child in list_dirs(fs, dir)? {
        prune_bottom_up(fs, &child, removed)?;

        let empty = fs
            .is_empty_dir(&child)
            .map_err(|source| TransferError::ListFailed {
                path: child.clone(),
                source,
            })?;
        if empty {
            remove_dir(fs, &child, removed)?;
        }
    }
    Ok(())
}

fn list_dirs(fs: &dyn FileSystem, dir: &Path) -> TransferResult<Vec<PathBuf>> {
    fs.list_dirs(dir).map_err(|source| TransferError::ListFailed {
        path: dir.to_path_buf(),
        source,
    })
}

fn remove_dir(fs: &dyn FileSystem, dir: &Path, removed: &mut Vec<PathBuf>) -> TransferResult<()> {
    fs.remove_dir(dir)
        .map_err(|source| TransferError::DirectoryRemovalFailed {
            path: dir.to_path_buf(),
            source,
        })?;
    removed.push(dir.to_path_buf());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::RealFileSystem;
    use std::fs;
    use tempfile::TempDir;

    /// Builds:
    ///
    /// ```text
    /// root/
    ///   DCIM/100CANON/IMG_0001.JPG
    ///   DCIM/101CANON/            (empty)
    ///   PRIVATE/AVCHD/BDMV/STREAM (empty chain)
    ///   MISC/                     (empty)
    /// ```
    fn card_tree(root: &Path) {
        fs::create_dir_all(root.join("DCIM/100CANON")).expect("mkdir");
        fs::create_dir_all(root.join("DCIM/101CANON")).expect("mkdir");
        fs::create_dir_all(root.join("PRIVATE/AVCHD/BDMV/STREAM")).expect("mkdir");
        fs::create_dir_all(root.join("MISC")).expect("mkdir");
        fs::write(root.join("DCIM/100CANON/IMG_0001.JPG"), "jpg").expect("write");
    }

    #[test]
    fn test_subtree_mode_removes_only_file_free_branches() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        card_tree(root);

        let removed =
            prune_empty_dirs(&RealFileSystem, root, PruneMode::Subtree).expect("prune failed");

        assert!(root.join("DCIM/100CANON/IMG_0001.JPG").is_file());
        // Kept alongside the file-bearing sibling.
        assert!(root.join("DCIM/101CANON").is_dir());
        assert!(!root.join("PRIVATE").exists());
        assert!(!root.join("MISC").exists());
        assert!(root.is_dir());

        // Deepest first.
        assert_eq!(
            removed,
            vec![
                root.join("MISC"),
                root.join("PRIVATE/AVCHD/BDMV/STREAM"),
                root.join("PRIVATE/AVCHD/BDMV"),
                root.join("PRIVATE/AVCHD"),
                root.join("PRIVATE"),
            ]
        );
    }

    #[test]
    fn test_per_directory_mode_also_removes_empty_siblings() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        card_tree(root);

        prune_empty_dirs(&RealFileSystem, root, PruneMode::PerDirectory).expect("prune failed");

        assert!(root.join("DCIM/100CANON/IMG_0001.JPG").is_file());
        assert!(!root.join("DCIM/101CANON").exists());
        assert!(!root.join("PRIVATE").exists());
        assert!(!root.join("MISC").exists());
    }

    #[test]
    fn test_root_is_never_removed() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().join("card");
        fs::create_dir(&root).expect("mkdir");

        for mode in [PruneMode::Subtree, PruneMode::PerDirectory] {
            let removed = prune_empty_dirs(&RealFileSystem, &root, mode).expect("prune failed");
            assert!(removed.is_empty());
            assert!(root.is_dir());
        }
    }
}
