//! String path helpers shared by every host
//!
//! Paths crossing the host boundary always use `/` separators. A path that
//! points inside an archive is written `container!/inner`, and the archive
//! root itself is `container!/`.

use std::path::Path;

/// Marker between an archive container and the path inside it
pub const ARCHIVE_SEPARATOR: &str = "!/";

/// Normalize a user or host supplied path.
///
/// Backslashes become `/`, repeated separators collapse, `.` segments are
/// dropped and `..` pops the previous segment. Trailing separators are
/// removed except for `/` itself and archive roots (`x.jar!/`).
pub fn normalize(path: &str) -> String {
    let unified = path.trim().replace('\\', "/");
    if unified.is_empty() {
        return String::new();
    }

    let (container, inner) = match unified.split_once('!') {
        Some((container, inner)) => (container, Some(inner)),
        None => (unified.as_str(), None),
    };

    let mut normalized = clean(container);
    if let Some(inner) = inner {
        let inner = clean(inner);
        normalized.push_str(ARCHIVE_SEPARATOR);
        normalized.push_str(inner.trim_start_matches('/'));
    }
    normalized
}

fn clean(path: &str) -> String {
    let absolute = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if matches!(segments.last(), Some(last) if *last != "..") {
                    segments.pop();
                } else if !absolute {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    if absolute {
        format!("/{joined}")
    } else {
        joined
    }
}

/// Whether `path` is absolute (`/x` or a drive letter such as `C:/x`)
pub fn is_absolute(path: &str) -> bool {
    let bytes = path.as_bytes();
    path.starts_with('/')
        || (bytes.len() >= 2 && bytes[1] == b':' && bytes[0].is_ascii_alphabetic())
}

/// Join a relative path onto `base` and normalize the result
pub fn join(base: &str, relative: &str) -> String {
    if relative.is_empty() {
        return normalize(base);
    }
    if base.ends_with(ARCHIVE_SEPARATOR) || base.ends_with('/') {
        normalize(&format!("{base}{relative}"))
    } else {
        normalize(&format!("{base}/{relative}"))
    }
}

/// Last path segment. For an archive root this is the container's name.
pub fn basename(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/').trim_end_matches('!');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

/// Extension of the last segment, without the dot
pub fn extension(path: &str) -> Option<&str> {
    let name = basename(path);
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => Some(ext),
        _ => None,
    }
}

/// Non-empty `/`-separated segments
pub fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Whether `path` lies strictly below `ancestor`
pub fn is_descendant(path: &str, ancestor: &str) -> bool {
    if ancestor.is_empty() || path.len() <= ancestor.len() || !path.starts_with(ancestor) {
        return false;
    }
    ancestor.ends_with('/') || path[ancestor.len()..].starts_with('/')
}

/// Whether `path` equals `ancestor` or lies below it
pub fn is_within(path: &str, ancestor: &str) -> bool {
    path == ancestor || is_descendant(path, ancestor)
}

/// `path` relative to `base`, when it lies below it
pub fn relative_to<'a>(path: &'a str, base: &str) -> Option<&'a str> {
    if !is_descendant(path, base) {
        return None;
    }
    Some(path[base.len()..].trim_start_matches('/'))
}

/// Whether a path with segments `suffix` ends `path` on a segment boundary
pub fn ends_with_segments(path: &str, suffix: &str) -> bool {
    if suffix.is_empty() {
        return false;
    }
    path == suffix
        || (path.len() > suffix.len()
            && path.ends_with(suffix)
            && path.as_bytes()[path.len() - suffix.len() - 1] == b'/')
}

/// Convert a native path to the `/`-separated form used by hosts
pub fn from_native(path: &Path) -> String {
    normalize(&path.to_string_lossy())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("src\\main\\lib.rs"), "src/main/lib.rs");
        assert_eq!(normalize("/p/src//a.kt/"), "/p/src/a.kt");
        assert_eq!(normalize("./src/./a.kt"), "src/a.kt");
        assert_eq!(normalize("/p/src/../lib/a.kt"), "/p/lib/a.kt");
        assert_eq!(normalize("/"), "/");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_normalize_archive_paths() {
        assert_eq!(normalize("/libs/a.jar!/com/x/A.class"), "/libs/a.jar!/com/x/A.class");
        assert_eq!(normalize("/libs/a.jar!"), "/libs/a.jar!/");
        assert_eq!(normalize("/libs/a.jar!/"), "/libs/a.jar!/");
        assert_eq!(normalize("a.jar!com/x/"), "a.jar!/com/x");
    }

    #[test]
    fn test_basename() {
        assert_eq!(basename("/p/src/a.kt"), "a.kt");
        assert_eq!(basename("a.kt"), "a.kt");
        assert_eq!(basename("/libs/a.jar!/"), "a.jar");
        assert_eq!(basename("/"), "");
    }

    #[test]
    fn test_descendants() {
        assert!(is_descendant("/p/src/a.kt", "/p"));
        assert!(!is_descendant("/pp/a.kt", "/p"));
        assert!(!is_descendant("/p", "/p"));
        assert!(is_descendant("/a.kt", "/"));
        assert!(is_descendant("/l/a.jar!/x/A.class", "/l/a.jar!/"));
        assert_eq!(relative_to("/p/src/a.kt", "/p"), Some("src/a.kt"));
        assert_eq!(relative_to("/l/a.jar!/x", "/l/a.jar!/"), Some("x"));
    }

    #[test]
    fn test_ends_with_segments() {
        assert!(ends_with_segments("/p/src/a.kt", "src/a.kt"));
        assert!(ends_with_segments("a.kt", "a.kt"));
        assert!(!ends_with_segments("/p/ba.kt", "a.kt"));
        assert!(!ends_with_segments("/p/a.kt", ""));
    }

    #[test]
    fn test_extension() {
        assert_eq!(extension("/p/a.kt"), Some("kt"));
        assert_eq!(extension("/p/.gitignore"), None);
        assert_eq!(extension("/p/Makefile"), None);
    }
}
