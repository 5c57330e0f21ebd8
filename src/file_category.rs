//! Classification of card files into action categories.
//!
//! A file's category is decided purely by its extension, compared
//! case-insensitively. Files sharing a category are grouped so the user
//! confirms each bulk action once.
//!
//! # Examples
//!
//! ```
//! use cardsweep::config::UnneededPolicy;
//! use cardsweep::file_category::{ActionCategory, Classifier};
//! use std::path::Path;
//!
//! let classifier = Classifier::new(UnneededPolicy::Ignore);
//! assert_eq!(classifier.classify(Path::new("IMG_0001.JPG")), ActionCategory::Move);
//! assert_eq!(classifier.classify(Path::new("00001.MTS")), ActionCategory::MoveAndRename);
//! assert_eq!(classifier.classify(Path::new("INDEX.BDM")), ActionCategory::Ignore);
//! assert_eq!(classifier.classify(Path::new("notes.txt")), ActionCategory::AskUser);
//! ```

use crate::config::UnneededPolicy;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// Extensions the camera writes for its own bookkeeping. The empty string
/// stands for files without an extension.
pub const UNNEEDED_EXTENSIONS: [&str; 10] = [
    "", "bdm", "bin", "bnp", "cpi", "dat", "inp", "int", "mpl", "xml",
];

/// What should happen to a file found on the card.
///
/// The declaration order is the order groups are processed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ActionCategory {
    /// Unknown type; the user decides file by file.
    AskUser,
    /// Removed from the card.
    Delete,
    /// Left where it is.
    Ignore,
    /// Moved to the destination under its own name.
    Move,
    /// Moved to the destination and renamed after its creation time.
    MoveAndRename,
}

impl ActionCategory {
    /// Returns the heading shown above a group.
    pub fn label(&self) -> &'static str {
        match self {
            ActionCategory::AskUser => "Unrecognised files",
            ActionCategory::Delete => "Files to delete",
            ActionCategory::Ignore => "Files to leave on the card",
            ActionCategory::Move => "Files to move",
            ActionCategory::MoveAndRename => "Files to move and rename",
        }
    }
}

/// A file discovered on the card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub path: PathBuf,
    /// The final path component.
    pub file_name: String,
    /// The extension as written on disk, including the leading dot, or an
    /// empty string when there is none.
    pub extension: String,
}

/// Returns everything from the last dot of the file name on, or an empty
/// string when the name has no dot or ends with one.
///
/// Unlike [`Path::extension`], a dotfile such as `.DS_Store` is all
/// extension, so it is never mistaken for a file without one.
pub fn extension_of(path: &Path) -> String {
    let Some(name) = path.file_name() else {
        return String::new();
    };
    let name = name.to_string_lossy();
    match name.rfind('.') {
        Some(dot) if dot + 1 < name.len() => name[dot..].to_string(),
        _ => String::new(),
    }
}

impl FileRecord {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let extension = extension_of(&path);
        Self {
            path,
            file_name,
            extension,
        }
    }
}

/// The files sharing one category, in discovery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub category: ActionCategory,
    pub files: Vec<FileRecord>,
}

/// Maps file extensions to action categories.
#[derive(Debug, Clone)]
pub struct Classifier {
    extension_map: HashMap<String, ActionCategory>,
}

impl Classifier {
    /// Creates a classifier with the standard card mappings, sending
    /// unneeded files to the category chosen by `policy`.
    pub fn new(policy: UnneededPolicy) -> Self {
        let mut classifier = Self {
            extension_map: HashMap::new(),
        };
        classifier.populate_standard_mappings(policy.category());
        classifier
    }

    fn populate_standard_mappings(&mut self, unneeded: ActionCategory) {
        self.add_extension_mapping("jpg", ActionCategory::Move);
        self.add_extension_mapping("mts", ActionCategory::MoveAndRename);

        for ext in UNNEEDED_EXTENSIONS {
            self.add_extension_mapping(ext, unneeded);
        }
    }

    /// Adds or replaces a mapping. A leading dot is ignored.
    pub fn add_extension_mapping(&mut self, ext: &str, category: ActionCategory) {
        let key = ext.trim_start_matches('.').to_lowercase();
        self.extension_map.insert(key, category);
    }

    /// Looks up an extension (with or without the dot), case-insensitively.
    pub fn extension_to_category(&self, ext: &str) -> Option<ActionCategory> {
        self.extension_map
            .get(&ext.trim_start_matches('.').to_lowercase())
            .copied()
    }

    /// Returns the category for a path; unknown extensions ask the user.
    pub fn classify(&self, path: &Path) -> ActionCategory {
        self.extension_to_category(&extension_of(path))
            .unwrap_or(ActionCategory::AskUser)
    }

    /// Partitions `records` into groups ordered by category.
    ///
    /// Files keep their relative discovery order inside a group, and
    /// categories with no files produce no group.
    pub fn group(&self, records: Vec<FileRecord>) -> Vec<Group> {
        let mut grouped: BTreeMap<ActionCategory, Vec<FileRecord>> = BTreeMap::new();
        for record in records {
            grouped
                .entry(self.classify(&record.path))
                .or_default()
                .push(record);
        }

        grouped
            .into_iter()
            .map(|(category, files)| Group { category, files })
            .collect()
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(UnneededPolicy::default())
    }
}
