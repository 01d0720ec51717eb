//! Full-text search: project files first, then library files

use super::budget::ResultBudget;
use super::glob::CompiledGlob;
use super::reader::truncate_line;
use super::resolver::{is_corrected, SearchScope};
use super::{FileSearch, SearchContentResult, SearchResult};
use crate::config::DEFAULT_MAX_RESULTS;
use crate::error::{Error, Result};
use crate::vfs::{paths, ContentScope, PathEntry, TextSearchScope};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Parameters of a content search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentQuery {
    /// Regular expression searched for
    pub pattern: String,
    /// Directory or file to search; `None` or `/` means everywhere
    #[serde(default)]
    pub path: Option<String>,
    /// Glob that matching files must also satisfy
    #[serde(default)]
    pub include_pattern: Option<String>,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default)]
    pub case_sensitive: bool,
}

fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}

impl ContentQuery {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            path: None,
            include_pattern: None,
            max_results: DEFAULT_MAX_RESULTS,
            case_sensitive: false,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_include(mut self, pattern: impl Into<String>) -> Self {
        self.include_pattern = Some(pattern.into());
        self
    }

    pub fn with_max_results(mut self, max: usize) -> Self {
        self.max_results = max;
        self
    }

    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }
}

impl FileSearch {
    /// Search file contents for `query.pattern`.
    ///
    /// A path naming a file yields the matching lines of that file. Otherwise
    /// matching files are collected from the project (restricted to the
    /// resolved directory, if any), then from library content while room is
    /// left under `max_results`.
    pub fn search_content(&self, query: &ContentQuery) -> Result<SearchContentResult> {
        let regex = RegexBuilder::new(&query.pattern)
            .case_insensitive(!query.case_sensitive)
            .multi_line(true)
            .build()
            .map_err(|e| Error::InvalidPattern {
                pattern: query.pattern.clone(),
                message: e.to_string(),
            })?;

        let include = query
            .include_pattern
            .as_deref()
            .map(str::trim)
            .filter(|pattern| !pattern.is_empty())
            .map(|pattern| self.matcher.compile(pattern));

        let result = match self.resolve_scope(query.path.as_deref()) {
            SearchScope::Everywhere => {
                self.collect_matching_files(&regex, None, include.as_ref(), query.max_results, None, false)
            }
            SearchScope::Directory {
                entry,
                display,
                corrected,
            } => self.collect_matching_files(
                &regex,
                Some(&entry),
                include.as_ref(),
                query.max_results,
                Some(display),
                corrected,
            ),
            SearchScope::Ambiguous { shortened_paths } => SearchContentResult::MultiFile {
                entries: Vec::new(),
                shortened_paths,
                search_path: query.path.clone(),
                search_path_corrected: false,
                limit_reached: false,
            },
            SearchScope::Missing => {
                let raw = query.path.as_deref().unwrap_or_default();
                self.search_single_file(&regex, raw)
            }
        };
        Ok(result)
    }

    fn search_single_file(&self, regex: &Regex, raw: &str) -> SearchContentResult {
        let (entry, shortened) = match self.find_by_path(raw, false) {
            SearchResult::Found {
                entry,
                shortened_path,
                ..
            } => (entry, shortened_path),
            SearchResult::Multiple {
                shortened_paths, ..
            } => {
                return SearchContentResult::MultiFile {
                    entries: Vec::new(),
                    shortened_paths,
                    search_path: Some(raw.to_string()),
                    search_path_corrected: false,
                    limit_reached: false,
                };
            }
            SearchResult::NotFound { reason } => {
                debug!("Nothing to search at '{}': {}", raw, reason);
                return SearchContentResult::Empty {
                    search_path: Some(raw.to_string()),
                    search_path_corrected: false,
                };
            }
        };

        let corrected = is_corrected(raw, &entry, &shortened);
        let text = match self.host.read_to_string(&entry) {
            Ok(text) => text,
            Err(e) => {
                warn!("Failed to read {}: {}", entry.path, e);
                return SearchContentResult::Empty {
                    search_path: Some(shortened),
                    search_path_corrected: corrected,
                };
            }
        };

        let (matching_lines, line_numbers): (Vec<String>, Vec<usize>) = text
            .lines()
            .enumerate()
            .filter(|(_, line)| regex.is_match(line))
            .map(|(index, line)| (truncate_line(line, self.config.max_line_length), index + 1))
            .unzip();

        if matching_lines.is_empty() {
            return SearchContentResult::Empty {
                search_path: Some(shortened),
                search_path_corrected: corrected,
            };
        }

        SearchContentResult::SingleFile {
            entry,
            shortened_path: shortened.clone(),
            matching_lines,
            line_numbers,
            search_path: Some(shortened),
            search_path_corrected: corrected,
        }
    }

    fn collect_matching_files(
        &self,
        regex: &Regex,
        under: Option<&PathEntry>,
        include: Option<&CompiledGlob>,
        max_results: usize,
        search_path: Option<String>,
        search_path_corrected: bool,
    ) -> SearchContentResult {
        let mut budget = ResultBudget::new(max_results);

        if !budget.is_full() {
            self.host.process_files_with_text(
                regex,
                TextSearchScope {
                    scope: ContentScope::Project,
                    under,
                },
                &mut |file: PathEntry| {
                    if !self.accepts_match(&file, under, include) {
                        return true;
                    }
                    budget.push_project(file)
                },
            );
        }

        if budget.wants_external() {
            self.host.process_files_with_text(
                regex,
                TextSearchScope {
                    scope: ContentScope::External,
                    under,
                },
                &mut |file: PathEntry| {
                    if !self.accepts_match(&file, under, include) {
                        return true;
                    }
                    budget.push_external(file)
                },
            );
        }

        debug!(
            "Content search '{}' matched {} project and {} external files",
            regex.as_str(),
            budget.project_count(),
            budget.external_count()
        );

        let (entries, limit_reached) = budget.finish(|entry| self.modified_or_epoch(entry));
        if entries.is_empty() {
            return SearchContentResult::Empty {
                search_path,
                search_path_corrected,
            };
        }

        SearchContentResult::MultiFile {
            shortened_paths: self.shorten_all(&entries),
            entries,
            search_path,
            search_path_corrected,
            limit_reached,
        }
    }

    fn accepts_match(&self, file: &PathEntry, under: Option<&PathEntry>, include: Option<&CompiledGlob>) -> bool {
        if file.is_directory {
            return false;
        }
        if let Some(dir) = under {
            if !paths::is_descendant(&file.path, &dir.path) {
                return false;
            }
        }
        if self.is_project_excluded(file) {
            return false;
        }

        match include {
            Some(glob) => {
                let subject = paths::relative_to(&file.path, self.project_root())
                    .unwrap_or_else(|| file.name());
                glob.is_match(subject)
            }
            None => true,
        }
    }
}
