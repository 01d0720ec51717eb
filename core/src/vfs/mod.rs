//! Host capabilities consumed by the search core
//!
//! The search code never touches the disk directly. It asks a [`Host`] for
//! four things:
//! - [`FileSystem`]: stat, list, read and timestamp entries (archives included)
//! - [`NameIndex`]: look entries up by basename or extension
//! - [`ProjectScope`]: tell project content apart from excluded or external content
//! - [`ContentIndex`]: find files whose text matches a regex
//!
//! [`LocalHost`] implements all of them on top of the real filesystem.

pub mod archive;
pub mod index;
pub mod local;
pub mod paths;

use crate::error::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::time::SystemTime;

pub use index::FileIndex;
pub use local::LocalHost;

/// A filesystem child: a file or directory, possibly inside an archive
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PathEntry {
    /// Normalized `/`-separated path (`container!/inner` inside archives)
    pub path: String,

    /// Whether this entry is a directory (archive roots count as directories)
    pub is_directory: bool,
}

impl PathEntry {
    /// Create a file entry
    pub fn file(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            is_directory: false,
        }
    }

    /// Create a directory entry
    pub fn directory(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            is_directory: true,
        }
    }

    /// The entry's own name
    pub fn name(&self) -> &str {
        paths::basename(&self.path)
    }

    /// Whether the entry lives inside an archive container
    pub fn is_in_archive(&self) -> bool {
        self.path.contains('!')
    }
}

/// Read access to files, directories and archive contents
pub trait FileSystem: Send + Sync {
    /// Stat `path`; `None` when nothing exists there
    fn entry(&self, path: &str) -> Option<PathEntry>;

    /// Immediate children of a directory
    fn children(&self, dir: &PathEntry) -> Result<Vec<PathEntry>>;

    /// Full text content of a file
    fn read_to_string(&self, file: &PathEntry) -> Result<String>;

    /// Last modification time
    fn modified(&self, entry: &PathEntry) -> Result<SystemTime>;

    /// Whether a file is an archive container that can be browsed
    fn is_archive(&self, entry: &PathEntry) -> bool;

    /// Open an archive container and return its root directory entry
    fn archive_root(&self, container: &PathEntry) -> Result<PathEntry>;
}

/// Lookup of project and library entries by name
pub trait NameIndex: Send + Sync {
    /// Every indexed entry (file or directory) whose basename is `name`
    fn entries_by_name(&self, name: &str) -> Vec<PathEntry>;

    /// Every indexed file with the given extension (no leading dot)
    fn files_by_extension(&self, extension: &str) -> Vec<PathEntry>;

    /// Every distinct indexed basename
    fn names(&self) -> Vec<String>;

    /// Every indexed file. Expensive; used as a last resort.
    fn all_files(&self) -> Vec<PathEntry>;
}

/// Project membership rules
pub trait ProjectScope: Send + Sync {
    /// Normalized project root path
    fn root(&self) -> &str;

    /// Whether `path` is the project root or lies below it
    fn contains(&self, path: &str) -> bool {
        paths::is_within(path, self.root())
    }

    /// Whether an entry inside the project is excluded from its content
    fn is_excluded(&self, entry: &PathEntry) -> bool;
}

/// Which half of the world a full-text search covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentScope {
    /// Project content roots only
    Project,
    /// Library/external content only
    External,
}

/// Scope of one full-text search pass
#[derive(Debug, Clone, Copy)]
pub struct TextSearchScope<'a> {
    pub scope: ContentScope,
    /// Restrict to files below this directory
    pub under: Option<&'a PathEntry>,
}

/// Indexed full-text search
pub trait ContentIndex: Send + Sync {
    /// Feed every file of `scope` whose content matches `regex` to `consumer`
    /// until it returns `false`.
    fn process_files_with_text(
        &self,
        regex: &Regex,
        scope: TextSearchScope<'_>,
        consumer: &mut dyn FnMut(PathEntry) -> bool,
    );
}

/// Everything the search core needs from its environment
pub trait Host: FileSystem + NameIndex + ProjectScope + ContentIndex {}

impl<T> Host for T where T: FileSystem + NameIndex + ProjectScope + ContentIndex {}
