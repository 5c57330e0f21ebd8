//! Filesystem access used by every stage of a transfer.
//!
//! The pipeline never touches `std::fs` directly; it goes through the
//! [`FileSystem`] trait so tests can substitute a recording fake and check
//! which operations a category would perform without moving real files.

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::WalkDir;

/// The file operations a transfer needs.
pub trait FileSystem {
    /// Returns true if something exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Lists every non-directory entry below `root`, recursively, in a stable
    /// order (entries sorted by name within each directory).
    fn list_files(&self, root: &Path) -> io::Result<Vec<PathBuf>>;

    /// Lists the immediate subdirectories of `dir`, sorted by name.
    fn list_dirs(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;

    /// Returns true if `dir` has no entries at all.
    fn is_empty_dir(&self, dir: &Path) -> io::Result<bool>;

    /// Moves a file. Fails with `AlreadyExists` if `to` is taken.
    fn move_file(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Deletes a single file.
    fn delete_file(&self, path: &Path) -> io::Result<()>;

    /// Copies a file, overwriting `to` if it exists.
    fn copy_file(&self, from: &Path, to: &Path) -> io::Result<()>;

    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Removes an empty directory.
    fn remove_dir(&self, path: &Path) -> io::Result<()>;

    /// Returns the creation time of a file.
    fn created(&self, path: &Path) -> io::Result<SystemTime>;

    /// Reads at most `limit` bytes from the start of a file.
    fn read_prefix(&self, path: &Path, limit: u64) -> io::Result<Vec<u8>>;
}

/// [`FileSystem`] backed by the operating system.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn list_files(&self, root: &Path) -> io::Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_dir() {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }

    fn list_dirs(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut dirs = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                dirs.push(entry.path());
            }
        }
        dirs.sort();
        Ok(dirs)
    }

    fn is_empty_dir(&self, dir: &Path) -> io::Result<bool> {
        Ok(fs::read_dir(dir)?.next().is_none())
    }

    fn move_file(&self, from: &Path, to: &Path) -> io::Result<()> {
        if to.exists() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                "a file with that name already exists at the destination",
            ));
        }

        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            // The card and the desktop are usually different filesystems.
            Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
                fs::copy(from, to)?;
                fs::remove_file(from)
            }
            Err(e) => Err(e),
        }
    }

    fn delete_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn copy_file(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::copy(from, to).map(|_| ())
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn remove_dir(&self, path: &Path) -> io::Result<()> {
        fs::remove_dir(path)
    }

    fn created(&self, path: &Path) -> io::Result<SystemTime> {
        let metadata = fs::metadata(path)?;
        // Some filesystems (ext4 on older kernels, FAT via certain drivers)
        // do not report a birth time.
        metadata.created().or_else(|_| metadata.modified())
    }

    fn read_prefix(&self, path: &Path, limit: u64) -> io::Result<Vec<u8>> {
        let mut buffer = Vec::new();
        File::open(path)?.take(limit).read_to_end(&mut buffer)?;
        Ok(buffer)
    }
}
