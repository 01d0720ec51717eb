//! Host implementation backed by the local filesystem

use super::archive::{self, ArchiveListing};
use super::index::{FileIndex, IndexStats};
use super::paths;
use super::{
    ContentIndex, ContentScope, FileSystem, NameIndex, PathEntry, ProjectScope, TextSearchScope,
};
use crate::config::SearchConfig;
use crate::error::{ConfigError, Error, Result};
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use regex::Regex;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, warn};

/// Bytes sampled when deciding whether a file is binary
const BINARY_SAMPLE_SIZE: usize = 8 * 1024;

/// A project on the local disk plus its library roots
pub struct LocalHost {
    /// Normalized project root
    root: String,

    /// Canonical project root
    root_path: PathBuf,

    config: SearchConfig,

    /// Project ignore rules, absent when gitignore support is off
    gitignore: Option<Gitignore>,

    index: FileIndex,
}

impl LocalHost {
    /// Open a project rooted at `root` and index it together with the
    /// configured library roots.
    pub fn open(root: impl AsRef<Path>, config: SearchConfig) -> Result<Self> {
        let root = root.as_ref();
        if !root.exists() {
            return Err(ConfigError::RootNotFound {
                path: root.display().to_string(),
            }
            .into());
        }
        if !root.is_dir() {
            return Err(ConfigError::RootNotDirectory {
                path: root.display().to_string(),
            }
            .into());
        }

        let root_path = root.canonicalize()?;
        let gitignore = if config.respect_gitignore {
            Self::build_gitignore(&root_path)
        } else {
            None
        };

        let mut host = Self {
            root: paths::from_native(&root_path),
            root_path,
            config,
            gitignore,
            index: FileIndex::new(),
        };
        host.index = host.build_index();
        Ok(host)
    }

    /// Get index statistics
    pub fn index_stats(&self) -> IndexStats {
        self.index.stats()
    }

    fn build_gitignore(root: &Path) -> Option<Gitignore> {
        let mut builder = GitignoreBuilder::new(root);
        for name in [".gitignore", ".ignore"] {
            let ignore_path = root.join(name);
            if ignore_path.exists() {
                if let Some(e) = builder.add(&ignore_path) {
                    warn!("Failed to parse {}: {}", ignore_path.display(), e);
                }
            }
        }

        match builder.build() {
            Ok(gitignore) => Some(gitignore),
            Err(e) => {
                warn!("Failed to build gitignore matcher: {}", e);
                None
            }
        }
    }

    fn build_index(&self) -> FileIndex {
        let mut index = FileIndex::new();
        let is_archive = |path: &Path| self.is_archive_path(path);

        index.scan(
            &self.root_path,
            |path, is_dir| !self.is_native_path_excluded(path, is_dir),
            is_archive,
        );

        for library_root in &self.config.library_roots {
            let library_root = match library_root.canonicalize() {
                Ok(path) => path,
                Err(e) => {
                    warn!("Skipping library root {}: {}", library_root.display(), e);
                    continue;
                }
            };
            if library_root.starts_with(&self.root_path) {
                debug!(
                    "Library root {} is inside the project; already indexed",
                    library_root.display()
                );
                continue;
            }
            index.scan(&library_root, |_, _| true, is_archive);
        }

        index.finish();
        index
    }

    fn is_archive_path(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.config.is_archive_extension(ext))
    }

    /// Exclusion test on a native path known to be inside the project
    fn is_native_path_excluded(&self, path: &Path, is_dir: bool) -> bool {
        let Ok(relative) = path.strip_prefix(&self.root_path) else {
            return false;
        };
        if relative.as_os_str().is_empty() {
            return false;
        }

        let excluded_segment = relative.components().any(|component| {
            let name = component.as_os_str().to_string_lossy();
            self.config.excluded_dirs.iter().any(|dir| *dir == name)
        });
        if excluded_segment {
            return true;
        }

        match &self.gitignore {
            Some(gitignore) => gitignore
                .matched_path_or_any_parents(relative, is_dir)
                .is_ignore(),
            None => false,
        }
    }

    /// Native location of an entry outside any archive
    fn native(&self, path: &str) -> PathBuf {
        PathBuf::from(path)
    }

    fn listing_for(&self, container: &str) -> Result<ArchiveListing> {
        ArchiveListing::open(&self.native(container))
    }

    fn is_binary(&self, sample: &[u8]) -> bool {
        sample.contains(&0)
    }

    /// Read a file for content search, skipping large or binary files
    fn searchable_text(&self, entry: &PathEntry) -> Option<String> {
        if let Some((container, inner)) = archive::split(&entry.path) {
            return archive::read_to_string(&self.native(container), inner).ok();
        }

        let native = self.native(&entry.path);
        let metadata = fs::metadata(&native).ok()?;
        if metadata.len() > self.config.max_file_size {
            debug!("Skipping large file {} ({} bytes)", entry.path, metadata.len());
            return None;
        }

        let mut file = fs::File::open(&native).ok()?;
        let mut bytes = Vec::with_capacity(metadata.len() as usize);
        file.read_to_end(&mut bytes).ok()?;
        let sample = &bytes[..bytes.len().min(BINARY_SAMPLE_SIZE)];
        if self.is_binary(sample) {
            return None;
        }
        String::from_utf8(bytes).ok()
    }
}

impl FileSystem for LocalHost {
    fn entry(&self, path: &str) -> Option<PathEntry> {
        let path = paths::normalize(path);
        if let Some((container, inner)) = archive::split(&path) {
            let listing = self.listing_for(container).ok()?;
            return listing.kind(inner).map(|is_dir| PathEntry {
                path: archive::address(container, inner),
                is_directory: is_dir,
            });
        }

        let metadata = fs::metadata(self.native(&path)).ok()?;
        Some(PathEntry {
            path,
            is_directory: metadata.is_dir(),
        })
    }

    fn children(&self, dir: &PathEntry) -> Result<Vec<PathEntry>> {
        if let Some((container, inner)) = archive::split(&dir.path) {
            return Ok(self.listing_for(container)?.children(container, inner));
        }

        let mut children = Vec::new();
        for entry in fs::read_dir(self.native(&dir.path))? {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Failed to read an entry of {}: {}", dir.path, e);
                    continue;
                }
            };
            let is_directory = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            children.push(PathEntry {
                path: paths::from_native(&entry.path()),
                is_directory,
            });
        }
        children.sort();
        Ok(children)
    }

    fn read_to_string(&self, file: &PathEntry) -> Result<String> {
        if let Some((container, inner)) = archive::split(&file.path) {
            return archive::read_to_string(&self.native(container), inner);
        }
        Ok(fs::read_to_string(self.native(&file.path))?)
    }

    fn modified(&self, entry: &PathEntry) -> Result<SystemTime> {
        // Entries inside an archive share the container's timestamp
        let native = match archive::split(&entry.path) {
            Some((container, _)) => self.native(container),
            None => self.native(&entry.path),
        };
        Ok(fs::metadata(native)?.modified()?)
    }

    fn is_archive(&self, entry: &PathEntry) -> bool {
        !entry.is_directory
            && !entry.is_in_archive()
            && paths::extension(&entry.path).is_some_and(|ext| self.config.is_archive_extension(ext))
    }

    fn archive_root(&self, container: &PathEntry) -> Result<PathEntry> {
        if !self.is_archive(container) {
            return Err(Error::Generic(format!(
                "{} is not an archive",
                container.path
            )));
        }
        self.listing_for(&container.path)?;
        Ok(PathEntry::directory(archive::address(&container.path, "")))
    }
}

impl NameIndex for LocalHost {
    fn entries_by_name(&self, name: &str) -> Vec<PathEntry> {
        self.index.entries_by_name(name)
    }

    fn files_by_extension(&self, extension: &str) -> Vec<PathEntry> {
        self.index.files_by_extension(extension)
    }

    fn names(&self) -> Vec<String> {
        self.index.names()
    }

    fn all_files(&self) -> Vec<PathEntry> {
        self.index.all_files()
    }
}

impl ProjectScope for LocalHost {
    fn root(&self) -> &str {
        &self.root
    }

    fn is_excluded(&self, entry: &PathEntry) -> bool {
        // An archive inside the project is judged by its container
        let on_disk = match archive::split(&entry.path) {
            Some((container, _)) => PathEntry::file(container),
            None => entry.clone(),
        };
        if !self.contains(&on_disk.path) {
            return false;
        }
        self.is_native_path_excluded(&self.native(&on_disk.path), on_disk.is_directory)
    }
}

impl ContentIndex for LocalHost {
    fn process_files_with_text(
        &self,
        regex: &Regex,
        scope: TextSearchScope<'_>,
        consumer: &mut dyn FnMut(PathEntry) -> bool,
    ) {
        let mut scanned = 0usize;
        for file in self.index.all_files() {
            let in_project = self.contains(&file.path);
            let wanted = match scope.scope {
                ContentScope::Project => in_project,
                ContentScope::External => !in_project,
            };
            if !wanted {
                continue;
            }
            if let Some(dir) = scope.under {
                if !paths::is_descendant(&file.path, &dir.path) {
                    continue;
                }
            }

            scanned += 1;
            let Some(text) = self.searchable_text(&file) else {
                continue;
            };
            if regex.is_match(&text) && !consumer(file) {
                break;
            }
        }
        debug!("Scanned {} files for {:?} content", scanned, scope.scope);
    }
}
