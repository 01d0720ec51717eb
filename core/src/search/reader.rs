//! Windowed file reads

use super::resolver::is_corrected;
use super::{FileContent, FileSearch, SearchResult};
use crate::error::{Error, Result};

/// Appended to lines cut at the configured maximum length
pub const TRUNCATION_MARKER: &str = "... [truncated]";

/// Cut `line` to `max_chars` characters, marking the cut
pub fn truncate_line(line: &str, max_chars: usize) -> String {
    match line.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{}", &line[..cut], TRUNCATION_MARKER),
        None => line.to_string(),
    }
}

impl FileSearch {
    /// Read up to `limit` lines of the file `path` resolves to, starting at
    /// the 0-based line `offset`.
    ///
    /// The offset is clamped to the file length; `limit` defaults to the
    /// configured read limit.
    pub fn read_file(&self, path: &str, offset: usize, limit: Option<usize>) -> Result<FileContent> {
        let (entry, shortened) = match self.find_by_path(path, false) {
            SearchResult::Found {
                entry,
                shortened_path,
                ..
            } => (entry, shortened_path),
            SearchResult::Multiple {
                shortened_paths, ..
            } => {
                return Err(Error::Ambiguous {
                    path: path.to_string(),
                    candidates: shortened_paths,
                });
            }
            SearchResult::NotFound { reason } => {
                return Err(Error::NotFound {
                    path: path.to_string(),
                    reason,
                });
            }
        };

        let text = self.host.read_to_string(&entry)?;
        let all_lines: Vec<&str> = text.lines().collect();
        let total_lines = all_lines.len();
        let offset = offset.min(total_lines);
        let limit = limit.unwrap_or(self.config.default_read_limit);

        let lines = all_lines[offset..]
            .iter()
            .take(limit)
            .map(|line| truncate_line(line, self.config.max_line_length))
            .collect();

        Ok(FileContent {
            lines,
            offset,
            limit,
            total_lines,
            path_corrected: is_corrected(path, &entry, &shortened),
            shortened_path: shortened,
        })
    }
}
