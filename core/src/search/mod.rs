//! Project-aware path resolution and bounded file search
//!
//! [`FileSearch`] is the entry point. Every operation reads from a [`Host`]
//! and returns plain values:
//! - [`FileSearch::find_by_path`] resolves partial or ambiguous paths
//! - [`FileSearch::list_directory`] lists one directory level
//! - [`FileSearch::search_content`] greps project files, then library files
//! - [`FileSearch::search_by_glob`] finds files by name pattern
//! - [`FileSearch::read_file`] reads a window of lines
//!
//! Returned paths are shortened with [`PathShortener`].

pub mod budget;
pub mod content;
pub mod glob;
pub mod glob_search;
pub mod listing;
pub mod reader;
pub mod resolver;
pub mod shortener;
pub mod similarity;


use crate::config::SearchConfig;
use crate::error::Result;
use crate::vfs::{Host, LocalHost, PathEntry};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

pub use content::ContentQuery;
pub use glob::{CompiledGlob, GlobBackend, GlobMatcher};
pub use glob_search::GlobQuery;
pub use shortener::PathShortener;

/// Outcome of resolving a user supplied path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchResult {
    /// Exactly one entry of the requested kind
    Found {
        entry: PathEntry,
        resolved_path: String,
        shortened_path: String,
        is_directory: bool,
        is_in_project: bool,
    },
    /// Several equally plausible entries
    Multiple {
        entries: Vec<PathEntry>,
        shortened_paths: Vec<String>,
    },
    /// Nothing matched
    NotFound { reason: String },
}

impl SearchResult {
    pub(crate) fn not_found(reason: impl Into<String>) -> Self {
        SearchResult::NotFound {
            reason: reason.into(),
        }
    }
}

/// Outcome of a content or glob search
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchContentResult {
    /// Matching files, or the candidates of an ambiguous search path
    MultiFile {
        entries: Vec<PathEntry>,
        shortened_paths: Vec<String>,
        search_path: Option<String>,
        search_path_corrected: bool,
        limit_reached: bool,
    },
    /// Matching lines of a single file searched directly
    SingleFile {
        entry: PathEntry,
        shortened_path: String,
        matching_lines: Vec<String>,
        /// 1-based, increasing
        line_numbers: Vec<usize>,
        search_path: Option<String>,
        search_path_corrected: bool,
    },
    /// Nothing matched
    Empty {
        search_path: Option<String>,
        search_path_corrected: bool,
    },
}

/// One child in a directory listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryEntry {
    /// Child name; directories carry a trailing `/`
    pub name: String,
    pub is_directory: bool,
}

/// Children of a directory plus the display path when it differs from the input
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DirectoryListing {
    /// Whether the path resolved to exactly one directory
    pub found: bool,
    pub entries: Vec<DirectoryEntry>,
    pub corrected_path: Option<String>,
}

/// A window of lines read from one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileContent {
    pub lines: Vec<String>,
    /// 0-based index of the first returned line
    pub offset: usize,
    pub limit: usize,
    pub total_lines: usize,
    pub shortened_path: String,
    pub path_corrected: bool,
}

/// Path resolution and search over one project
pub struct FileSearch {
    host: Arc<dyn Host>,
    config: SearchConfig,
    matcher: GlobMatcher,
}

impl FileSearch {
    /// Create a search over an existing host
    pub fn new(host: Arc<dyn Host>, config: SearchConfig) -> Self {
        Self {
            host,
            config,
            matcher: GlobMatcher::new(),
        }
    }

    /// Open a project on the local filesystem
    pub fn open(root: impl AsRef<Path>, config: SearchConfig) -> Result<Self> {
        config.validate()?;
        let host = LocalHost::open(root, config.clone())?;
        debug!(
            "Opened project {} ({:?})",
            crate::vfs::ProjectScope::root(&host),
            host.index_stats()
        );
        Ok(Self::new(Arc::new(host), config))
    }

    /// The host this search reads from
    pub fn host(&self) -> &dyn Host {
        &*self.host
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Normalized project root
    pub fn project_root(&self) -> &str {
        self.host.root()
    }

    /// Shortest display path for `path`
    pub fn shorten(&self, path: &str) -> String {
        PathShortener::new(self.host.root(), &*self.host).shorten(path)
    }

    pub(crate) fn shorten_all(&self, entries: &[PathEntry]) -> Vec<String> {
        let shortener = PathShortener::new(self.host.root(), &*self.host);
        entries.iter().map(|e| shortener.shorten(&e.path)).collect()
    }

    /// Modification time, or the epoch when it cannot be read
    pub(crate) fn modified_or_epoch(&self, entry: &PathEntry) -> SystemTime {
        match self.host.modified(entry) {
            Ok(time) => time,
            Err(e) => {
                debug!("No modification time for {}: {}", entry.path, e);
                UNIX_EPOCH
            }
        }
    }

    /// Whether an entry is inside the project but excluded from it
    pub(crate) fn is_project_excluded(&self, entry: &PathEntry) -> bool {
        self.host.contains(&entry.path) && self.host.is_excluded(entry)
    }
}
