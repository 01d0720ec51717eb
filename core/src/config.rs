//! Search configuration and settings

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default number of files returned by content and glob searches
pub const DEFAULT_MAX_RESULTS: usize = 100;

/// Default maximum characters kept per line when reading files
pub const DEFAULT_MAX_LINE_LENGTH: usize = 2000;

/// Default number of lines returned by a single read
pub const DEFAULT_READ_LIMIT: usize = 2000;

/// Configuration for file search behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum number of files returned by a search
    pub max_results: usize,

    /// Lines longer than this are cut and marked as truncated
    pub max_line_length: usize,

    /// Number of lines returned by a read when no limit is given
    pub default_read_limit: usize,

    /// Files larger than this (bytes) are skipped by content search
    pub max_file_size: u64,

    /// Whether the project's .gitignore/.ignore rules exclude files
    pub respect_gitignore: bool,

    /// Directory names excluded from the project wherever they appear
    pub excluded_dirs: Vec<String>,

    /// Roots of external (library) content, searched after the project
    pub library_roots: Vec<PathBuf>,

    /// File extensions treated as browsable archives
    pub archive_extensions: Vec<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            default_read_limit: DEFAULT_READ_LIMIT,
            max_file_size: 10 * 1024 * 1024,
            respect_gitignore: true,
            excluded_dirs: vec![
                ".git".to_string(),
                ".hg".to_string(),
                ".svn".to_string(),
                ".idea".to_string(),
            ],
            library_roots: Vec::new(),
            archive_extensions: vec!["zip".to_string(), "jar".to_string()],
        }
    }
}

impl SearchConfig {
    /// Create a new search config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum results
    pub fn with_max_results(mut self, max: usize) -> Self {
        self.max_results = max;
        self
    }

    /// Set maximum line length
    pub fn with_max_line_length(mut self, length: usize) -> Self {
        self.max_line_length = length;
        self
    }

    /// Set the default read limit
    pub fn with_read_limit(mut self, limit: usize) -> Self {
        self.default_read_limit = limit;
        self
    }

    /// Enable or disable gitignore respect
    pub fn with_gitignore(mut self, respect: bool) -> Self {
        self.respect_gitignore = respect;
        self
    }

    /// Add a library root
    pub fn with_library_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.library_roots.push(root.into());
        self
    }

    /// Replace the excluded directory names
    pub fn with_excluded_dirs(mut self, dirs: Vec<String>) -> Self {
        self.excluded_dirs = dirs;
        self
    }

    /// Whether `extension` marks an archive container
    pub fn is_archive_extension(&self, extension: &str) -> bool {
        self.archive_extensions
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_line_length == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_line_length".to_string(),
                value: "0".to_string(),
            }
            .into());
        }
        if self.default_read_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "default_read_limit".to_string(),
                value: "0".to_string(),
            }
            .into());
        }
        Ok(())
    }
}
