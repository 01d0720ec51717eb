//! One-level directory listings

use super::glob::CompiledGlob;
use super::resolver::is_corrected;
use super::{DirectoryEntry, DirectoryListing, FileSearch, SearchResult};
use tracing::{debug, warn};

impl FileSearch {
    /// List the immediate children of the directory `path` resolves to.
    ///
    /// Directories come first and carry a trailing `/`. Children whose name
    /// matches one of `ignore_patterns`, or that the project excludes, are
    /// left out. An unresolvable or ambiguous path yields an empty listing.
    pub fn list_directory(&self, path: &str, ignore_patterns: Option<&[String]>) -> DirectoryListing {
        let (dir, shortened) = match self.find_by_path(path, true) {
            SearchResult::Found {
                entry,
                shortened_path,
                ..
            } => (entry, shortened_path),
            SearchResult::Multiple {
                shortened_paths, ..
            } => {
                debug!("'{}' is ambiguous: {:?}", path, shortened_paths);
                return DirectoryListing::default();
            }
            SearchResult::NotFound { reason } => {
                debug!("Cannot list '{}': {}", path, reason);
                return DirectoryListing::default();
            }
        };

        let ignores: Vec<CompiledGlob> = ignore_patterns
            .unwrap_or_default()
            .iter()
            // Children are matched by bare name, so `dir/` means `dir`
            .map(|pattern| pattern.trim_end_matches('/'))
            .filter(|pattern| !pattern.is_empty())
            .map(|pattern| self.matcher.compile(pattern))
            .collect();

        let children = match self.host.children(&dir) {
            Ok(children) => children,
            Err(e) => {
                warn!("Failed to list {}: {}", dir.path, e);
                Vec::new()
            }
        };

        let mut entries: Vec<DirectoryEntry> = children
            .into_iter()
            .filter(|child| !self.is_project_excluded(child))
            .filter(|child| !ignores.iter().any(|glob| glob.is_match(child.name())))
            .map(|child| DirectoryEntry {
                name: if child.is_directory {
                    format!("{}/", child.name())
                } else {
                    child.name().to_string()
                },
                is_directory: child.is_directory,
            })
            .collect();

        entries.sort_by(|a, b| {
            b.is_directory
                .cmp(&a.is_directory)
                .then_with(|| a.name.cmp(&b.name))
        });

        let corrected_path = is_corrected(path, &dir, &shortened).then_some(shortened);
        DirectoryListing {
            found: true,
            entries,
            corrected_path,
        }
    }
}
