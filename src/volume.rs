/// Locating the memory card.
///
/// The card may not be inserted when the program starts, so the locator
/// polls until the configured path appears instead of failing.
use crate::config::VolumeSettings;
use crate::error::{TransferError, TransferResult};
use crate::fs::FileSystem;
use crate::output::OutputFormatter;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Something that can wait. Injected so tests do not sleep for real.
pub trait Sleeper {
    fn sleep(&mut self, duration: Duration);

    /// Called once when the card is missing on the first check, before any
    /// sleep. Prints a warning by default.
    fn notify_waiting(&mut self, path: &Path) {
        OutputFormatter::warning(&format!(
            "No memory card found at {}. Waiting for it to be inserted...",
            path.display()
        ));
    }
}

/// Sleeps on the current thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// A located card and the files found on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Volume {
    pub root: PathBuf,
    /// Every file below `root`, in discovery order.
    pub files: Vec<PathBuf>,
}

/// Waits for the card and lists its files.
///
/// # Arguments
///
/// * `settings` - Primary and fallback paths, poll interval and optional
///   attempt limit
/// * `fs` - Filesystem used to check for and list the card
/// * `sleeper` - Waits between checks and reports the first miss
///
/// # Returns
///
/// The located [`Volume`], or [`TransferError::VolumeUnavailable`] once
/// `max_attempts` checks failed.
///
/// # Behaviour
///
/// * **Primary path missing**: warns once, then sleeps for
///   `poll_interval` between checks until it appears (or until
///   `max_attempts` checks were made, if set)
/// * **Primary path unreadable** (permission denied): lists the fallback
///   path instead; errors from the fallback are returned as they are
/// * **Any other listing error**: returned
pub fn locate(
    settings: &VolumeSettings,
    fs: &dyn FileSystem,
    sleeper: &mut dyn Sleeper,
) -> TransferResult<Volume> {
    let mut attempts: u32 = 0;
    loop {
        attempts = attempts.saturating_add(1);

        if fs.exists(&settings.primary) {
            return list_volume(settings, fs);
        }

        if attempts == 1 {
            sleeper.notify_waiting(&settings.primary);
        }

        if let Some(max) = settings.max_attempts
            && attempts >= max
        {
            return Err(TransferError::VolumeUnavailable {
                path: settings.primary.clone(),
                attempts,
            });
        }

        sleeper.sleep(settings.poll_interval);
    }
}

fn list_volume(settings: &VolumeSettings, fs: &dyn FileSystem) -> TransferResult<Volume> {
    match fs.list_files(&settings.primary) {
        Ok(files) => Ok(Volume {
            root: settings.primary.clone(),
            files,
        }),
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
            OutputFormatter::warning(&format!(
                "Cannot read {} ({}). Trying {} instead.",
                settings.primary.display(),
                e,
                settings.fallback.display()
            ));
            let files =
                fs.list_files(&settings.fallback)
                    .map_err(|source| TransferError::ListFailed {
                        path: settings.fallback.clone(),
                        source,
                    })?;
            Ok(Volume {
                root: settings.fallback.clone(),
                files,
            })
        }
        Err(source) => Err(TransferError::ListFailed {
            path: settings.primary.clone(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::RealFileSystem;
    use std::cell::Cell;
    use std::fs;
    use std::time::SystemTime;
    use tempfile::TempDir;

    /// Records sleeps and waiting notices, and runs a hook on each sleep.
    struct HookSleeper<F: FnMut(usize)> {
        slept: Vec<Duration>,
        notified: Vec<PathBuf>,
        hook: F,
    }

    impl<F: FnMut(usize)> HookSleeper<F> {
        fn new(hook: F) -> Self {
            Self {
                slept: Vec::new(),
                notified: Vec::new(),
                hook,
            }
        }
    }

    impl<F: FnMut(usize)> Sleeper for HookSleeper<F> {
        fn sleep(&mut self, duration: Duration) {
            self.slept.push(duration);
            (self.hook)(self.slept.len());
        }

        fn notify_waiting(&mut self, path: &Path) {
            self.notified.push(path.to_path_buf());
        }
    }

    /// Real filesystem, except listing `denied` fails with a permission error.
    struct DeniedListing {
        denied: PathBuf,
        listed: Cell<usize>,
    }

    impl FileSystem for DeniedListing {
        fn exists(&self, path: &Path) -> bool {
            RealFileSystem.exists(path)
        }
        fn list_files(&self, root: &Path) -> io::Result<Vec<PathBuf>> {
            self.listed.set(self.listed.get() + 1);
            if root == self.denied {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
            }
            RealFileSystem.list_files(root)
        }
        fn list_dirs(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
            RealFileSystem.list_dirs(dir)
        }
        fn is_empty_dir(&self, dir: &Path) -> io::Result<bool> {
            RealFileSystem.is_empty_dir(dir)
        }
        fn move_file(&self, _: &Path, _: &Path) -> io::Result<()> {
            unimplemented!("not used by the locator")
        }
        fn delete_file(&self, _: &Path) -> io::Result<()> {
            unimplemented!("not used by the locator")
        }
        fn copy_file(&self, _: &Path, _: &Path) -> io::Result<()> {
            unimplemented!("not used by the locator")
        }
        fn create_dir_all(&self, _: &Path) -> io::Result<()> {
            unimplemented!("not used by the locator")
        }
        fn remove_dir(&self, _: &Path) -> io::Result<()> {
            unimplemented!("not used by the locator")
        }
        fn created(&self, _: &Path) -> io::Result<SystemTime> {
            unimplemented!("not used by the locator")
        }
        fn read_prefix(&self, _: &Path, _: u64) -> io::Result<Vec<u8>> {
            unimplemented!("not used by the locator")
        }
    }

    fn settings(primary: &Path, fallback: &Path) -> VolumeSettings {
        VolumeSettings {
            primary: primary.to_path_buf(),
            fallback: fallback.to_path_buf(),
            poll_interval: Duration::from_millis(250),
            max_attempts: None,
        }
    }

    #[test]
    fn test_present_card_is_listed_without_waiting() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let card = temp_dir.path().join("card");
        fs::create_dir_all(card.join("DCIM")).expect("mkdir");
        fs::write(card.join("DCIM/IMG_0001.JPG"), "jpg").expect("write");

        let mut sleeper = HookSleeper::new(|_| {});
        let volume = locate(
            &settings(&card, &temp_dir.path().join("other")),
            &RealFileSystem,
            &mut sleeper,
        )
        .expect("locate failed");

        assert_eq!(volume.root, card);
        assert_eq!(volume.files, vec![card.join("DCIM/IMG_0001.JPG")]);
        assert!(sleeper.slept.is_empty());
        assert!(sleeper.notified.is_empty());
    }

    #[test]
    fn test_waits_until_card_is_inserted() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let card = temp_dir.path().join("card");
        let card_for_hook = card.clone();

        let mut sleeper = HookSleeper::new(move |count| {
            if count == 3 {
                fs::create_dir(&card_for_hook).expect("mkdir");
            }
        });
        let volume = locate(
            &settings(&card, &temp_dir.path().join("other")),
            &RealFileSystem,
            &mut sleeper,
        )
        .expect("locate failed");

        assert_eq!(volume.root, card);
        assert!(volume.files.is_empty());
        assert_eq!(sleeper.slept, vec![Duration::from_millis(250); 3]);
        // Four checks, three sleeps, one notice.
        assert_eq!(sleeper.notified, vec![card]);
    }

    #[test]
    fn test_gives_up_after_max_attempts() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let mut config = settings(
            &temp_dir.path().join("missing"),
            &temp_dir.path().join("other"),
        );
        config.max_attempts = Some(4);

        let mut sleeper = HookSleeper::new(|_| {});
        let err = locate(&config, &RealFileSystem, &mut sleeper).expect_err("should give up");

        assert!(matches!(
            err,
            TransferError::VolumeUnavailable { attempts: 4, .. }
        ));
        assert_eq!(sleeper.slept.len(), 3);
        assert_eq!(sleeper.notified.len(), 1);
    }

    #[test]
    fn test_permission_error_falls_back_once() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let primary = temp_dir.path().join("fixed-drive");
        let fallback = temp_dir.path().join("card");
        fs::create_dir(&primary).expect("mkdir");
        fs::create_dir(&fallback).expect("mkdir");
        fs::write(fallback.join("00001.MTS"), "mts").expect("write");

        let fs = DeniedListing {
            denied: primary.clone(),
            listed: Cell::new(0),
        };
        let mut sleeper = ThreadSleeper;
        let volume = locate(&settings(&primary, &fallback), &fs, &mut sleeper)
            .expect("locate failed");

        assert_eq!(volume.root, fallback);
        assert_eq!(volume.files, vec![fallback.join("00001.MTS")]);
        assert_eq!(fs.listed.get(), 2);
    }

    #[test]
    fn test_fallback_errors_propagate() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let primary = temp_dir.path().join("fixed-drive");
        fs::create_dir(&primary).expect("mkdir");

        let fs = DeniedListing {
            denied: primary.clone(),
            listed: Cell::new(0),
        };
        let mut sleeper = ThreadSleeper;
        let err = locate(
            &settings(&primary, &temp_dir.path().join("absent")),
            &fs,
            &mut sleeper,
        )
        .expect_err("fallback listing should fail");

        assert!(matches!(err, TransferError::ListFailed { .. }));
    }
}
