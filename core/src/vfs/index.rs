//! In-memory name index over project and library content

use super::archive::ArchiveListing;
use super::paths;
use super::{NameIndex, PathEntry};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Name index populated by walking directory trees
#[derive(Debug, Default)]
pub struct FileIndex {
    /// Entries keyed by basename, each list kept in path order
    by_name: BTreeMap<String, Vec<PathEntry>>,

    /// Files keyed by lowercase extension
    by_extension: HashMap<String, Vec<PathEntry>>,

    /// Every indexed file in path order
    files: Vec<PathEntry>,
}

/// Index statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexStats {
    pub total_files: usize,
    pub total_directories: usize,
}

impl FileIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Walk `root` and index everything below it.
    ///
    /// `should_include` receives each path and whether it is a directory;
    /// rejected directories are pruned with everything below them.
    /// `is_archive` marks files whose contents are indexed as well.
    pub fn scan<F, A>(&mut self, root: &Path, should_include: F, is_archive: A)
    where
        F: Fn(&Path, bool) -> bool,
        A: Fn(&Path) -> bool,
    {
        let started = Instant::now();
        let before = self.files.len();

        let walker = WalkDir::new(root)
            .min_depth(1)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| should_include(entry.path(), entry.file_type().is_dir()));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                    continue;
                }
            };

            let path = paths::from_native(entry.path());
            if entry.file_type().is_dir() {
                self.insert(PathEntry::directory(path));
                continue;
            }

            if is_archive(entry.path()) {
                match ArchiveListing::open(entry.path()) {
                    Ok(listing) => {
                        for inner in listing.entries(&path) {
                            self.insert(inner);
                        }
                    }
                    Err(e) => warn!("Failed to index archive {}: {}", path, e),
                }
            }
            self.insert(PathEntry::file(path));
        }

        debug!(
            "Indexed {} files under {} in {:?}",
            self.files.len() - before,
            root.display(),
            started.elapsed()
        );
    }

    /// Add one entry
    pub fn insert(&mut self, entry: PathEntry) {
        let name = entry.name().to_string();
        if name.is_empty() {
            return;
        }

        let bucket = self.by_name.entry(name).or_default();
        if let Err(position) = bucket.binary_search(&entry) {
            bucket.insert(position, entry.clone());
        } else {
            return;
        }

        if entry.is_directory {
            return;
        }
        if let Some(ext) = paths::extension(&entry.path) {
            self.by_extension
                .entry(ext.to_ascii_lowercase())
                .or_default()
                .push(entry.clone());
        }
        self.files.push(entry);
    }

    /// Sort the flat lists after a batch of inserts
    pub fn finish(&mut self) {
        self.files.sort();
        for bucket in self.by_extension.values_mut() {
            bucket.sort();
        }
    }

    /// Get index statistics
    pub fn stats(&self) -> IndexStats {
        let total_entries: usize = self.by_name.values().map(Vec::len).sum();
        IndexStats {
            total_files: self.files.len(),
            total_directories: total_entries - self.files.len(),
        }
    }
}

impl NameIndex for FileIndex {
    fn entries_by_name(&self, name: &str) -> Vec<PathEntry> {
        self.by_name.get(name).cloned().unwrap_or_default()
    }

    fn files_by_extension(&self, extension: &str) -> Vec<PathEntry> {
        let key = extension.trim_start_matches('.').to_ascii_lowercase();
        self.by_extension.get(&key).cloned().unwrap_or_default()
    }

    fn names(&self) -> Vec<String> {
        self.by_name.keys().cloned().collect()
    }

    fn all_files(&self) -> Vec<PathEntry> {
        self.files.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_scan_prunes_directories() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("src")).unwrap();
        fs::create_dir_all(root.join("target/debug")).unwrap();
        fs::write(root.join("src/main.rs"), "fn main() {}").unwrap();
        fs::write(root.join("target/debug/main.rs"), "").unwrap();

        let mut index = FileIndex::new();
        index.scan(
            root,
            |path, _| path.file_name().map_or(true, |name| name != "target"),
            |_| false,
        );
        index.finish();

        let mains = index.entries_by_name("main.rs");
        assert_eq!(mains.len(), 1);
        assert!(mains[0].path.ends_with("/src/main.rs"));
        assert_eq!(index.entries_by_name("src").len(), 1);
        assert!(index.entries_by_name("target").is_empty());
        assert_eq!(index.stats(), IndexStats { total_files: 1, total_directories: 1 });
    }

    #[test]
    fn test_lookup_by_extension() {
        let mut index = FileIndex::new();
        index.insert(PathEntry::file("/p/b.KT"));
        index.insert(PathEntry::file("/p/a.kt"));
        index.insert(PathEntry::file("/p/a.kt"));
        index.insert(PathEntry::file("/p/readme.md"));
        index.finish();

        let kotlin = index.files_by_extension(".kt");
        assert_eq!(kotlin, vec![PathEntry::file("/p/a.kt"), PathEntry::file("/p/b.KT")]);
        assert_eq!(index.all_files().len(), 3);
        assert_eq!(index.names(), vec!["a.kt", "b.KT", "readme.md"]);
    }
}
