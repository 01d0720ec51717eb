//! Built-in tools

pub mod find_file;
pub mod glob_search;
pub mod list_directory;
pub mod read_file;
pub mod search_content;

pub use find_file::{FindFileTool, FindFileToolFactory};
pub use glob_search::{GlobSearchTool, GlobSearchToolFactory};
pub use list_directory::{ListDirectoryTool, ListDirectoryToolFactory};
pub use read_file::{ReadFileTool, ReadFileToolFactory};
pub use search_content::{SearchContentTool, SearchContentToolFactory};

use crate::search::SearchContentResult;

/// Text rendering shared by the content and glob search tools
pub(crate) fn describe_search(result: &SearchContentResult) -> String {
    match result {
        SearchContentResult::MultiFile {
            entries,
            shortened_paths,
            search_path,
            search_path_corrected,
            limit_reached,
        } => {
            if entries.is_empty() && !shortened_paths.is_empty() {
                return format!(
                    "Path '{}' is ambiguous. Candidates:\n{}",
                    search_path.as_deref().unwrap_or_default(),
                    shortened_paths.join("\n")
                );
            }
            if entries.is_empty() {
                return format!("No files found{}", location(search_path, *search_path_corrected));
            }

            let mut text = format!(
                "Found {} files{}:\n{}",
                entries.len(),
                location(search_path, *search_path_corrected),
                shortened_paths.join("\n")
            );
            if *limit_reached {
                text.push_str("\n\nResult limit reached; narrow the search to see more.");
            }
            text
        }
        SearchContentResult::SingleFile {
            shortened_path,
            matching_lines,
            line_numbers,
            search_path_corrected,
            ..
        } => {
            let mut text = format!("{}:", shortened_path);
            if *search_path_corrected {
                text.push_str(" (path corrected)");
            }
            for (number, line) in line_numbers.iter().zip(matching_lines) {
                text.push_str(&format!("\n{number}: {line}"));
            }
            text
        }
        SearchContentResult::Empty {
            search_path,
            search_path_corrected,
        } => format!("No matches found{}", location(search_path, *search_path_corrected)),
    }
}

fn location(search_path: &Option<String>, corrected: bool) -> String {
    match search_path {
        Some(path) if corrected => format!(" in {} (path corrected)", path),
        Some(path) => format!(" in {}", path),
        None => String::new(),
    }
}
