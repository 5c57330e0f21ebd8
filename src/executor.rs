/// Applying each category's action to its group of files.
///
/// Every [`ActionCategory`] maps to a [`Strategy`]: an optional question
/// asked once for the whole group, and a step run on each file. Declining
/// the question leaves the whole group alone and moves on to the next one.
use crate::error::{TransferError, TransferResult};
use crate::file_category::{ActionCategory, FileRecord, Group};
use crate::fs::FileSystem;
use crate::output::OutputFormatter;
use crate::prompt::Confirm;
use chrono::{DateTime, Local, NaiveDateTime};
use std::path::{Path, PathBuf};

/// Format of the name given to renamed files, e.g. `2024-03-09 17-05-42`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H-%M-%S";

/// How many leading bytes are read to guess the type of an unknown file.
const SNIFF_LEN: u64 = 8192;

/// What a step did to one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Moved to the given path.
    Moved(PathBuf),
    Deleted,
    /// Left where it was.
    Skipped,
}

/// What happened to one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupReport {
    pub category: ActionCategory,
    /// Files moved or deleted.
    pub handled: usize,
    /// Files left on the card.
    pub left: usize,
    /// The group question was answered no.
    pub declined: bool,
}

/// A per-file step. Steps may ask further questions through the executor.
pub type FileStep = fn(&mut ActionExecutor<'_>, &FileRecord) -> TransferResult<FileOutcome>;

/// How a category is processed.
#[derive(Clone, Copy)]
pub struct Strategy {
    /// Asked once before touching any file of the group.
    pub question: Option<&'static str>,
    pub step: FileStep,
}

/// Returns the strategy for a category.
pub fn strategy_for(category: ActionCategory) -> Strategy {
    match category {
        ActionCategory::Move => Strategy {
            question: Some("Do you want to move these files?"),
            step: move_keeping_name,
        },
        ActionCategory::MoveAndRename => Strategy {
            question: Some("Do you want to move and rename these files?"),
            step: move_with_timestamp,
        },
        ActionCategory::Delete => Strategy {
            question: Some("Do you want to delete these files?"),
            step: delete,
        },
        ActionCategory::Ignore => Strategy {
            question: None,
            step: skip,
        },
        ActionCategory::AskUser => Strategy {
            question: None,
            step: ask_user,
        },
    }
}

/// Builds the name of a renamed file from its creation time and original
/// extension (including the dot).
///
/// # Examples
///
/// ```
/// use cardsweep::executor::timestamped_name;
/// use chrono::NaiveDate;
///
/// let taken = NaiveDate::from_ymd_opt(2019, 7, 4)
///     .and_then(|d| d.and_hms_opt(21, 3, 9))
///     .unwrap();
/// assert_eq!(timestamped_name(taken, ".MTS"), "2019-07-04 21-03-09.MTS");
/// ```
pub fn timestamped_name(created: NaiveDateTime, extension: &str) -> String {
    format!("{}{}", created.format(TIMESTAMP_FORMAT), extension)
}

/// Runs the strategies against the card's groups.
pub struct ActionExecutor<'a> {
    fs: &'a dyn FileSystem,
    prompt: &'a mut dyn Confirm,
    destination: &'a Path,
}

impl<'a> ActionExecutor<'a> {
    pub fn new(fs: &'a dyn FileSystem, prompt: &'a mut dyn Confirm, destination: &'a Path) -> Self {
        Self {
            fs,
            prompt,
            destination,
        }
    }

    /// Announces the files of a group and applies its category's action.
    ///
    /// Returns an error as soon as one file operation fails; files handled
    /// before the failure stay handled.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use cardsweep::executor::ActionExecutor;
    /// use cardsweep::file_category::{ActionCategory, FileRecord, Group};
    /// use cardsweep::fs::RealFileSystem;
    /// use cardsweep::prompt::ConsolePrompt;
    /// use std::path::Path;
    ///
    /// let mut prompt = ConsolePrompt::stdin();
    /// let mut executor = ActionExecutor::new(&RealFileSystem, &mut prompt, Path::new("/home/me/Desktop"));
    /// let group = Group {
    ///     category: ActionCategory::Move,
    ///     files: vec![FileRecord::new("/media/card/DCIM/IMG_0001.JPG")],
    /// };
    /// let report = executor.run_group(&group)?;
    /// println!("moved {} file(s)", report.handled);
    /// # Ok::<(), cardsweep::TransferError>(())
    /// ```
    pub fn run_group(&mut self, group: &Group) -> TransferResult<GroupReport> {
        OutputFormatter::header(group.category.label());
        for file in &group.files {
            OutputFormatter::labelled("Found file: ", &file.file_name);
        }

        let strategy = strategy_for(group.category);
        let mut report = GroupReport {
            category: group.category,
            handled: 0,
            left: 0,
            declined: false,
        };

        match strategy.question {
            Some(question) => {
                if !self.confirm(question)? {
                    OutputFormatter::info("We will not do that then.");
                    report.left = group.files.len();
                    report.declined = true;
                    return Ok(report);
                }

                let pb = OutputFormatter::create_progress_bar(group.files.len() as u64);
                for file in &group.files {
                    pb.set_message(file.file_name.clone());
                    let outcome = (strategy.step)(self, file);
                    match outcome {
                        Ok(outcome) => {
                            pb.inc(1);
                            tally(&mut report, &outcome);
                        }
                        Err(e) => {
                            pb.abandon();
                            return Err(e);
                        }
                    }
                }
                pb.finish_and_clear();
                OutputFormatter::success(&format!(
                    "{} of {} file(s) done",
                    report.handled,
                    group.files.len()
                ));
            }
            None => {
                for file in &group.files {
                    let outcome = (strategy.step)(self, file)?;
                    announce(file, &outcome);
                    tally(&mut report, &outcome);
                }
            }
        }

        Ok(report)
    }

    fn confirm(&mut self, question: &str) -> TransferResult<bool> {
        self.prompt
            .confirm(question)
            .map_err(|source| TransferError::PromptFailed { source })
    }

    fn relocate(&self, file: &FileRecord, new_name: &str) -> TransferResult<FileOutcome> {
        let destination_path = self.destination.join(new_name);
        self.fs
            .move_file(&file.path, &destination_path)
            .map_err(|e| TransferError::MoveFailed {
                source: file.path.clone(),
                destination: destination_path.clone(),
                source_error: e,
            })?;
        Ok(FileOutcome::Moved(destination_path))
    }

    fn mime_hint(&self, file: &FileRecord) -> Option<&'static str> {
        let head = self.fs.read_prefix(&file.path, SNIFF_LEN).ok()?;
        infer::get(&head).map(|kind| kind.mime_type())
    }
}

fn tally(report: &mut GroupReport, outcome: &FileOutcome) {
    match outcome {
        FileOutcome::Moved(_) | FileOutcome::Deleted => report.handled += 1,
        FileOutcome::Skipped => report.left += 1,
    }
}

fn announce(file: &FileRecord, outcome: &FileOutcome) {
    match outcome {
        FileOutcome::Moved(to) => {
            OutputFormatter::labelled("Moved to ", &to.display().to_string())
        }
        FileOutcome::Deleted => OutputFormatter::labelled("Deleted ", &file.file_name),
        FileOutcome::Skipped => {
            OutputFormatter::info(&format!("{} will not be copied.", file.file_name))
        }
    }
}

fn move_keeping_name(exec: &mut ActionExecutor<'_>, file: &FileRecord) -> TransferResult<FileOutcome> {
    exec.relocate(file, &file.file_name)
}

fn move_with_timestamp(
    exec: &mut ActionExecutor<'_>,
    file: &FileRecord,
) -> TransferResult<FileOutcome> {
    let created = exec
        .fs
        .created(&file.path)
        .map_err(|source| TransferError::TimestampUnavailable {
            path: file.path.clone(),
            source,
        })?;
    let local: DateTime<Local> = created.into();
    let new_name = timestamped_name(local.naive_local(), &file.extension);
    exec.relocate(file, &new_name)
}

fn delete(exec: &mut ActionExecutor<'_>, file: &FileRecord) -> TransferResult<FileOutcome> {
    exec.fs
        .delete_file(&file.path)
        .map_err(|source| TransferError::DeleteFailed {
            path: file.path.clone(),
            source,
        })?;
    Ok(FileOutcome::Deleted)
}

fn skip(_exec: &mut ActionExecutor<'_>, _file: &FileRecord) -> TransferResult<FileOutcome> {
    Ok(FileOutcome::Skipped)
}

fn ask_user(exec: &mut ActionExecutor<'_>, file: &FileRecord) -> TransferResult<FileOutcome> {
    let question = match exec.mime_hint(file) {
        Some(mime) => format!(
            "I don't know what to do with {} (looks like {}). Should I copy it?",
            file.file_name, mime
        ),
        None => format!(
            "I don't know what to do with {}. Should I copy it?",
            file.file_name
        ),
    };

    if !exec.confirm(&question)? {
        return Ok(FileOutcome::Skipped);
    }

    if exec.confirm("Should I rename it?")? {
        move_with_timestamp(exec, file)
    } else {
        move_keeping_name(exec, file)
    }
}
