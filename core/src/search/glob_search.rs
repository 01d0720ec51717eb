//! File search by name or path pattern

use super::budget::ResultBudget;
use super::glob::{has_wildcards, CompiledGlob};
use super::resolver::SearchScope;
use super::{FileSearch, SearchContentResult};
use crate::config::DEFAULT_MAX_RESULTS;
use crate::vfs::{paths, PathEntry};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Shortest literal prefix worth a name index lookup
const MIN_PREFIX_LEN: usize = 3;

/// Parameters of a glob search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobQuery {
    /// Glob matched against paths relative to the search directory
    pub pattern: String,
    /// Directory to search; `None` or `/` means everywhere
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}

impl GlobQuery {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            path: None,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_max_results(mut self, max: usize) -> Self {
        self.max_results = max;
        self
    }
}

/// How library candidates are narrowed before glob matching
#[derive(Debug, PartialEq, Eq)]
enum Prefilter<'a> {
    Extension(&'a str),
    Name(&'a str),
    Prefix(&'a str),
    None,
}

fn prefilter(pattern: &str) -> Prefilter<'_> {
    let last = pattern.rsplit('/').next().unwrap_or(pattern);

    if let Some(ext) = last.strip_prefix("*.") {
        if !ext.is_empty() && !has_wildcards(ext) {
            // The index keys files by the text after their final dot
            let key = ext.rsplit('.').next().unwrap_or(ext);
            if !key.is_empty() {
                return Prefilter::Extension(key);
            }
        }
    }
    if !last.is_empty() && !has_wildcards(last) {
        return Prefilter::Name(last);
    }

    let prefix = &last[..last.find(['*', '?', '[', '{']).unwrap_or(last.len())];
    if prefix.chars().count() >= MIN_PREFIX_LEN {
        return Prefilter::Prefix(prefix);
    }
    Prefilter::None
}

impl FileSearch {
    /// Find files whose path matches a glob.
    ///
    /// The project (or the resolved directory) is walked first. When
    /// searching everywhere and the project leaves room under
    /// `max_results`, library files from the name index pad the result.
    pub fn search_by_glob(&self, query: &GlobQuery) -> SearchContentResult {
        let (scope, everywhere, search_path, search_path_corrected) =
            match self.resolve_scope(query.path.as_deref()) {
                SearchScope::Everywhere => (
                    PathEntry::directory(self.project_root()),
                    true,
                    None,
                    false,
                ),
                SearchScope::Directory {
                    entry,
                    display,
                    corrected,
                } => (entry, false, Some(display), corrected),
                SearchScope::Ambiguous { shortened_paths } => {
                    return SearchContentResult::MultiFile {
                        entries: Vec::new(),
                        shortened_paths,
                        search_path: query.path.clone(),
                        search_path_corrected: false,
                        limit_reached: false,
                    };
                }
                SearchScope::Missing => {
                    return SearchContentResult::MultiFile {
                        entries: Vec::new(),
                        shortened_paths: Vec::new(),
                        search_path: query.path.clone(),
                        search_path_corrected: false,
                        limit_reached: false,
                    };
                }
            };

        let glob = self.matcher.compile(&query.pattern);
        let mut budget = ResultBudget::new(query.max_results);

        if !glob.pattern().is_empty() && !budget.is_full() {
            self.walk_scope(&scope, &glob, &mut budget);
            if everywhere && budget.wants_external() {
                self.search_library(&glob, &mut budget);
            }
        }

        debug!(
            "Glob '{}' matched {} project and {} library files",
            glob.pattern(),
            budget.project_count(),
            budget.external_count()
        );

        let (entries, limit_reached) = budget.finish(|entry| self.modified_or_epoch(entry));
        SearchContentResult::MultiFile {
            shortened_paths: self.shorten_all(&entries),
            entries,
            search_path,
            search_path_corrected,
            limit_reached,
        }
    }

    fn walk_scope(&self, scope: &PathEntry, glob: &CompiledGlob, budget: &mut ResultBudget) {
        let mut pending = vec![scope.clone()];

        while let Some(dir) = pending.pop() {
            let children = match self.host.children(&dir) {
                Ok(children) => children,
                Err(e) => {
                    warn!("Skipping unreadable directory {}: {}", dir.path, e);
                    continue;
                }
            };

            for child in children {
                if self.is_project_excluded(&child) {
                    continue;
                }
                if child.is_directory {
                    pending.push(child);
                    continue;
                }

                let matched = paths::relative_to(&child.path, &scope.path)
                    .is_some_and(|relative| glob.is_match(relative));
                if !matched {
                    continue;
                }

                let more = if self.host.contains(&child.path) {
                    budget.push_project(child)
                } else {
                    budget.push_external(child)
                };
                if !more {
                    return;
                }
            }
        }
    }

    fn search_library(&self, glob: &CompiledGlob, budget: &mut ResultBudget) {
        let pattern = glob.pattern();
        let full_path_glob = pattern.contains('/').then(|| {
            if pattern.starts_with("**") || pattern.starts_with('/') {
                self.matcher.compile(pattern)
            } else {
                self.matcher.compile(&format!("**/{pattern}"))
            }
        });

        let candidates = match prefilter(pattern) {
            Prefilter::Extension(ext) => self.host.files_by_extension(ext),
            Prefilter::Name(name) => self.host.entries_by_name(name),
            Prefilter::Prefix(prefix) => self
                .host
                .names()
                .iter()
                .filter(|name| name.starts_with(prefix))
                .flat_map(|name| self.host.entries_by_name(name))
                .collect(),
            Prefilter::None => self.host.all_files(),
        };

        for file in candidates {
            if file.is_directory || self.host.contains(&file.path) || self.host.is_excluded(&file) {
                continue;
            }
            let matched = match &full_path_glob {
                Some(full) => full.is_match(&file.path),
                None => glob.is_match(&file.path),
            };
            if matched && !budget.push_external(file) {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefilter_selection() {
        assert_eq!(prefilter("**/*.kt"), Prefilter::Extension("kt"));
        assert_eq!(prefilter("*.{js,ts}"), Prefilter::None);
        assert_eq!(prefilter("*.d.ts"), Prefilter::Extension("ts"));
        assert_eq!(prefilter("lib/*.tar.gz"), Prefilter::Extension("gz"));
        assert_eq!(prefilter("src/Main.java"), Prefilter::Name("Main.java"));
        assert_eq!(prefilter("Build*.gradle"), Prefilter::Prefix("Build"));
        assert_eq!(prefilter("ab*.rs"), Prefilter::None);
        assert_eq!(prefilter("**"), Prefilter::None);
    }
}
