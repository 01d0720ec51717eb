//! Shortest unambiguous display paths
//!
//! Project files are shown relative to the project root. Anything else
//! (library files, archive entries) is shown as the shortest trailing run of
//! segments that no other indexed entry shares, but never fewer than
//! [`MIN_SEGMENTS`] segments unless that is the whole path.

use crate::vfs::paths;
use crate::vfs::NameIndex;
use tracing::debug;

/// Display form of the project root itself
pub const ROOT_SENTINEL: &str = "./";

/// Readability floor for shortened external paths
pub const MIN_SEGMENTS: usize = 3;

/// Shortens paths against a project root and a name index
pub struct PathShortener<'a, I: NameIndex + ?Sized> {
    root: &'a str,
    index: &'a I,
}

impl<'a, I: NameIndex + ?Sized> PathShortener<'a, I> {
    pub fn new(root: &'a str, index: &'a I) -> Self {
        Self { root, index }
    }

    /// Shortest display path that still identifies `target_path`
    pub fn shorten(&self, target_path: &str) -> String {
        let target = paths::normalize(target_path);
        let root = paths::normalize(self.root);

        if target == root {
            return ROOT_SENTINEL.to_string();
        }
        if let Some(relative) = paths::relative_to(&target, &root) {
            if !relative.is_empty() {
                return relative.to_string();
            }
        }

        let name = paths::basename(&target);
        if name.is_empty() {
            return target;
        }
        let same_named = self.index.entries_by_name(name);
        if same_named.is_empty() {
            return target;
        }

        let segments = paths::segments(&target);
        let archive_segment = segments.iter().rposition(|s| s.ends_with('!'));

        for take in 1..=segments.len() {
            let first = segments.len() - take;
            let suffix = segments[first..].join("/");

            let identifies_target = paths::ends_with_segments(&target, &suffix);
            let unique = same_named
                .iter()
                .filter(|entry| entry.path != target)
                .all(|entry| !paths::ends_with_segments(&entry.path, &suffix));
            let keeps_archive = archive_segment.map_or(true, |index| first <= index);
            let readable = take >= MIN_SEGMENTS || take == segments.len();

            if identifies_target && unique && keeps_archive && readable {
                if take == segments.len() {
                    return target;
                }
                return suffix;
            }
        }

        debug!("No unique suffix for {}; keeping the full path", target);
        target
    }
}
