//! Resolution of partial, relative, absolute and archive paths

use super::shortener::ROOT_SENTINEL;
use super::similarity;
use super::{FileSearch, SearchResult};
use crate::vfs::{archive, paths, PathEntry};
use tracing::debug;

/// Inputs that name the project root when a directory is wanted
const ROOT_ALIASES: &[&str] = &["", ".", "./", "/"];

pub(crate) fn is_root_alias(raw: &str) -> bool {
    ROOT_ALIASES.contains(&raw.trim())
}

/// Whether the display path reported for `raw` differs from what the caller typed
pub(crate) fn is_corrected(raw: &str, entry: &PathEntry, shortened: &str) -> bool {
    if is_root_alias(raw) {
        return shortened != ROOT_SENTINEL;
    }
    let typed = paths::normalize(raw);
    typed != shortened && typed != entry.path
}

/// Where a content or glob search should look
pub(crate) enum SearchScope {
    /// The whole project, then libraries
    Everywhere,
    /// One resolved directory
    Directory {
        entry: PathEntry,
        display: String,
        corrected: bool,
    },
    /// The path named several directories
    Ambiguous { shortened_paths: Vec<String> },
    /// No directory matched
    Missing,
}

impl FileSearch {
    /// Resolve `raw_path` to a file or directory.
    ///
    /// Tried in order: the project root aliases, archive addresses
    /// (`lib.jar!/pkg/A.class`), the literal path (absolute or relative to
    /// the project root), and finally a lookup by basename ranked by path
    /// similarity.
    pub fn find_by_path(&self, raw_path: &str, want_directory: bool) -> SearchResult {
        let raw = raw_path.trim();
        if want_directory && is_root_alias(raw) {
            return self.found(PathEntry::directory(self.project_root()));
        }

        let path = paths::normalize(raw);
        if path.is_empty() {
            return SearchResult::not_found("empty path");
        }

        if path.contains('!') {
            return self.find_in_archive(&path, want_directory);
        }

        if let Some(result) = self.find_exact(&path, want_directory) {
            return result;
        }

        self.find_by_name(&path, want_directory)
    }

    pub(crate) fn found(&self, entry: PathEntry) -> SearchResult {
        SearchResult::Found {
            resolved_path: entry.path.clone(),
            shortened_path: self.shorten(&entry.path),
            is_directory: entry.is_directory,
            is_in_project: self.host.contains(&entry.path),
            entry,
        }
    }

    /// Resolve the optional search path of a content or glob search
    pub(crate) fn resolve_scope(&self, path: Option<&str>) -> SearchScope {
        let Some(raw) = path.map(str::trim).filter(|p| *p != "/") else {
            return SearchScope::Everywhere;
        };

        match self.find_by_path(raw, true) {
            SearchResult::Found {
                entry,
                shortened_path,
                ..
            } => SearchScope::Directory {
                corrected: is_corrected(raw, &entry, &shortened_path),
                entry,
                display: shortened_path,
            },
            SearchResult::Multiple {
                shortened_paths, ..
            } => SearchScope::Ambiguous { shortened_paths },
            SearchResult::NotFound { reason } => {
                debug!("Search path '{}' is not a directory: {}", raw, reason);
                SearchScope::Missing
            }
        }
    }

    fn absolute(&self, path: &str) -> String {
        if paths::is_absolute(path) {
            path.to_string()
        } else {
            paths::join(self.project_root(), path)
        }
    }

    fn find_exact(&self, path: &str, want_directory: bool) -> Option<SearchResult> {
        let mut entry = self.host.entry(&self.absolute(path))?;

        if want_directory && !entry.is_directory && self.host.is_archive(&entry) {
            entry = match self.host.archive_root(&entry) {
                Ok(root) => root,
                Err(e) => {
                    debug!("Cannot open archive {}: {}", entry.path, e);
                    return Some(SearchResult::not_found("archive could not be opened"));
                }
            };
        }

        if entry.is_directory != want_directory {
            return None;
        }
        if self.is_project_excluded(&entry) {
            return Some(SearchResult::not_found("excluded from project"));
        }
        Some(self.found(entry))
    }

    fn find_in_archive(&self, path: &str, want_directory: bool) -> SearchResult {
        let Some((container, inner)) = archive::split(path) else {
            return SearchResult::not_found("invalid archive path");
        };

        let Some(container_entry) = self.locate_container(container) else {
            return SearchResult::not_found(format!("archive {} not found", container));
        };

        let root = match self.host.archive_root(&container_entry) {
            Ok(root) => root,
            Err(e) => {
                debug!("Cannot open archive {}: {}", container_entry.path, e);
                return SearchResult::not_found("archive could not be opened");
            }
        };

        let target = if inner.is_empty() {
            Some(root)
        } else {
            self.host
                .entry(&archive::address(&container_entry.path, inner))
        };

        match target {
            Some(entry) if self.is_project_excluded(&entry) => {
                SearchResult::not_found("excluded from project")
            }
            Some(entry) if entry.is_directory == want_directory => self.found(entry),
            Some(entry) => SearchResult::not_found(format!(
                "{} is not a {}",
                entry.path,
                kind_name(want_directory)
            )),
            None => SearchResult::not_found(format!("{} not found in archive", inner)),
        }
    }

    /// The archive file a `container!/inner` address refers to
    fn locate_container(&self, container: &str) -> Option<PathEntry> {
        if let Some(entry) = self.host.entry(&self.absolute(container)) {
            if !entry.is_directory {
                return Some(entry);
            }
        }

        self.host
            .entries_by_name(paths::basename(container))
            .into_iter()
            .filter(|entry| !entry.is_directory && !entry.is_in_archive())
            .max_by(|a, b| {
                similarity::score(container, &a.path)
                    .cmp(&similarity::score(container, &b.path))
                    .then_with(|| b.path.cmp(&a.path))
            })
    }

    fn find_by_name(&self, path: &str, want_directory: bool) -> SearchResult {
        let name = paths::basename(path);
        if name.is_empty() || name == "." || name == ".." {
            return SearchResult::not_found("invalid path");
        }

        let mut candidates: Vec<PathEntry> = self
            .host
            .entries_by_name(name)
            .into_iter()
            .filter(|entry| entry.is_directory == want_directory)
            .filter(|entry| !self.is_project_excluded(entry))
            .collect();

        match candidates.len() {
            0 => SearchResult::not_found(format!(
                "no {} named '{}'",
                kind_name(want_directory),
                name
            )),
            1 => self.found(candidates.remove(0)),
            _ => self.rank(path, candidates),
        }
    }

    fn rank(&self, path: &str, candidates: Vec<PathEntry>) -> SearchResult {
        let scored: Vec<(i64, PathEntry)> = candidates
            .into_iter()
            .map(|entry| (similarity::score(path, &entry.path), entry))
            .collect();
        let best = scored.iter().map(|(score, _)| *score).max().unwrap_or(0);

        let mut top: Vec<PathEntry> = scored
            .into_iter()
            .filter(|(score, _)| *score == best)
            .map(|(_, entry)| entry)
            .collect();

        if top.len() == 1 {
            return self.found(top.remove(0));
        }

        top.sort();
        debug!("'{}' matches {} entries equally well", path, top.len());
        SearchResult::Multiple {
            shortened_paths: self.shorten_all(&top),
            entries: top,
        }
    }
}

fn kind_name(directory: bool) -> &'static str {
    if directory {
        "directory"
    } else {
        "file"
    }
}
