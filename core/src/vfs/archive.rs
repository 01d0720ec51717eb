//! Zip/jar archive browsing for `container!/inner` addresses

use super::paths::ARCHIVE_SEPARATOR;
use super::PathEntry;
use crate::error::{Error, Result};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;

/// Split `container!/inner` into its container path and inner path
pub fn split(path: &str) -> Option<(&str, &str)> {
    path.split_once('!')
        .map(|(container, inner)| (container, inner.trim_matches('/')))
}

/// Address of `inner` inside `container`
pub fn address(container: &str, inner: &str) -> String {
    format!("{container}{ARCHIVE_SEPARATOR}{}", inner.trim_matches('/'))
}

/// The file and directory structure of one archive
#[derive(Debug, Default)]
pub struct ArchiveListing {
    files: BTreeSet<String>,
    dirs: BTreeSet<String>,
}

impl ArchiveListing {
    /// Read the table of contents of `container`
    pub fn open(container: &Path) -> Result<Self> {
        let file = File::open(container)?;
        let archive = ZipArchive::new(file)?;

        let mut listing = Self::default();
        for raw in archive.file_names() {
            listing.insert(raw);
        }
        Ok(listing)
    }

    fn insert(&mut self, raw: &str) {
        let is_dir = raw.ends_with('/');
        let name = raw.trim_matches('/');
        if name.is_empty() {
            return;
        }

        // Archives often omit explicit directory records
        let mut parent = name;
        while let Some((dir, _)) = parent.rsplit_once('/') {
            self.dirs.insert(dir.to_string());
            parent = dir;
        }

        if is_dir {
            self.dirs.insert(name.to_string());
        } else {
            self.files.insert(name.to_string());
        }
    }

    /// Kind of the entry at `inner`: `Some(true)` for directories
    pub fn kind(&self, inner: &str) -> Option<bool> {
        if inner.is_empty() || self.dirs.contains(inner) {
            Some(true)
        } else if self.files.contains(inner) {
            Some(false)
        } else {
            None
        }
    }

    /// Immediate children of the directory at `inner`
    pub fn children(&self, container: &str, inner: &str) -> Vec<PathEntry> {
        let prefix = if inner.is_empty() {
            String::new()
        } else {
            format!("{inner}/")
        };
        let is_child = |name: &&String| {
            name.starts_with(&prefix) && !name[prefix.len()..].contains('/')
        };

        let dirs = self
            .dirs
            .iter()
            .filter(is_child)
            .map(|name| PathEntry::directory(address(container, name)));
        let files = self
            .files
            .iter()
            .filter(is_child)
            .map(|name| PathEntry::file(address(container, name)));
        dirs.chain(files).collect()
    }

    /// Every entry of the archive, for indexing
    pub fn entries(&self, container: &str) -> Vec<PathEntry> {
        let dirs = self
            .dirs
            .iter()
            .map(|name| PathEntry::directory(address(container, name)));
        let files = self
            .files
            .iter()
            .map(|name| PathEntry::file(address(container, name)));
        dirs.chain(files).collect()
    }
}

/// Read the text of `inner` from `container`
pub fn read_to_string(container: &Path, inner: &str) -> Result<String> {
    let file = File::open(container)?;
    let mut archive = ZipArchive::new(file)?;
    let mut entry = archive.by_name(inner)?;

    let mut bytes = Vec::new();
    entry.read_to_end(&mut bytes)?;
    String::from_utf8(bytes).map_err(|_| Error::Generic(format!("{inner} is not valid UTF-8")))
}


#[cfg(test)]
mod tests {
    use super::test_support::write_zip;
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_split_and_address() {
        assert_eq!(split("/l/a.jar!/com/x/A.class"), Some(("/l/a.jar", "com/x/A.class")));
        assert_eq!(split("/l/a.jar!/"), Some(("/l/a.jar", "")));
        assert_eq!(split("/l/a.jar"), None);
        assert_eq!(address("/l/a.jar", "com/x"), "/l/a.jar!/com/x");
        assert_eq!(address("/l/a.jar", ""), "/l/a.jar!/");
    }

    #[test]
    fn test_listing_synthesizes_directories() {
        let temp_dir = TempDir::new().unwrap();
        let jar = temp_dir.path().join("lib.jar");
        write_zip(
            &jar,
            &[("com/acme/Util.java", "class Util {}"), ("README.txt", "hi")],
        );

        let listing = ArchiveListing::open(&jar).unwrap();
        assert_eq!(listing.kind(""), Some(true));
        assert_eq!(listing.kind("com"), Some(true));
        assert_eq!(listing.kind("com/acme"), Some(true));
        assert_eq!(listing.kind("com/acme/Util.java"), Some(false));
        assert_eq!(listing.kind("missing"), None);

        let root = listing.children("/l/lib.jar", "");
        assert_eq!(
            root,
            vec![
                PathEntry::directory("/l/lib.jar!/com"),
                PathEntry::file("/l/lib.jar!/README.txt"),
            ]
        );
    }

    #[test]
    fn test_read_inner_file() {
        let temp_dir = TempDir::new().unwrap();
        let jar = temp_dir.path().join("lib.zip");
        write_zip(&jar, &[("docs/guide.md", "# Guide\nTODO: write")]);

        let text = read_to_string(&jar, "docs/guide.md").unwrap();
        assert!(text.contains("TODO: write"));
        assert!(read_to_string(&jar, "docs/missing.md").is_err());
    }
}
