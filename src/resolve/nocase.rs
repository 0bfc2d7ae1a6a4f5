//! Case-insensitive path resolution.
//!
//! Walks a slash-split request path against the document root one segment at
//! a time, matching directory entries by lowercased name. The resolved path
//! always carries the entry's actual on-disk casing, so downstream stat and
//! open calls work on case-sensitive filesystems too.

use std::path::{Path, PathBuf};

use tokio::fs;

use super::cache::ResolveCache;

/// Outcome of a resolution attempt.
///
/// Every "absent" condition (missing segment, unreadable directory, failed
/// containment) collapses into `NotFound`; callers decide how to render it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found(PathBuf),
    NotFound,
}

/// Resolve `segments` under `root`, matching each segment case-insensitively.
///
/// Segments equal to `.` or `..` fail the whole resolution before any
/// filesystem access; the later containment checks would also catch an
/// escape, but traversal payloads should never reach the directory scan or
/// the cache. An empty segment slice resolves to `root` itself.
///
/// Resolved segments are looked up in `cache` first and recorded there after
/// a successful scan, unless the cache is disabled. When a directory holds
/// several entries that differ only by case, the first one produced by the
/// filesystem's scan order wins; that order is not normalized here.
pub async fn resolve_nocase(root: &Path, segments: &[&str], cache: &ResolveCache) -> Resolution {
    if segments.iter().any(|s| *s == "." || *s == "..") {
        return Resolution::NotFound;
    }

    let mut current = root.to_path_buf();
    for segment in segments {
        let wanted = segment.to_lowercase();

        if cache.is_enabled() {
            if let Some(hit) = cache.get(&current, &wanted) {
                current = hit;
                continue;
            }
        }

        let Some(child) = scan_directory(&current, &wanted).await else {
            return Resolution::NotFound;
        };
        if cache.is_enabled() {
            cache.put(&current, &wanted, &child);
        }
        current = child;
    }

    // Lexical containment, independent of the symlink check the handler runs
    // afterwards. Joined entry names cannot contain separators, so this only
    // fires if something is badly wrong, but it costs nothing.
    if !current.starts_with(root) {
        return Resolution::NotFound;
    }
    Resolution::Found(current)
}

/// Linear scan of `dir` for the first entry whose lowercased name equals
/// `wanted_lower`, returning the joined path with the on-disk name.
///
/// Any error opening or reading the directory ends the scan; the caller
/// reports `NotFound` rather than propagating it.
async fn scan_directory(dir: &Path, wanted_lower: &str) -> Option<PathBuf> {
    let mut entries = fs::read_dir(dir).await.ok()?;
    while let Ok(Some(entry)) = entries.next_entry().await {
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if name.to_lowercase() == wanted_lower {
            return Some(dir.join(name));
        }
    }
    None
}
