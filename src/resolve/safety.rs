//! Symlink-escape containment check.
//!
//! Segment resolution only ever joins real directory-entry names, but an
//! entry may itself be a symlink pointing anywhere on the filesystem. The
//! final candidate path is therefore re-checked here against the root after
//! resolving symlinks on both sides.

use std::path::{Path, PathBuf};

use tokio::fs;

/// Canonicalize `target` and return its real path only when it is `base`
/// itself or a descendant of the real path of `base`.
///
/// Both sides are canonicalized so that a symlinked root (`/tmp` on macOS,
/// say) compares correctly against a fully resolved target. Any filesystem
/// error during canonicalization (broken symlink, permission denied,
/// vanished file) means the path cannot be proven safe and is treated as
/// rejection, never surfaced to the caller as an error.
pub async fn real_path_within(base: &Path, target: &Path) -> Option<PathBuf> {
    let real_target = fs::canonicalize(target).await.ok()?;
    let real_base = fs::canonicalize(base).await.ok()?;
    if real_target.starts_with(&real_base) {
        Some(real_target)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn canonical_tempdir() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().expect("tempdir");
        let canonical = fs::canonicalize(dir.path()).await.expect("canonicalize");
        (dir, canonical)
    }

    #[tokio::test]
    async fn test_accepts_base_itself() {
        let (_guard, root) = canonical_tempdir().await;
        assert_eq!(real_path_within(&root, &root).await, Some(root.clone()));
    }

    #[tokio::test]
    async fn test_accepts_descendant_file() {
        let (_guard, root) = canonical_tempdir().await;
        let file = root.join("page.html");
        std::fs::write(&file, "<html></html>").expect("write");
        assert_eq!(real_path_within(&root, &file).await, Some(file));
    }

    #[tokio::test]
    async fn test_rejects_sibling_path() {
        let (_guard_a, root) = canonical_tempdir().await;
        let (_guard_b, other) = canonical_tempdir().await;
        let file = other.join("secret.txt");
        std::fs::write(&file, "secret").expect("write");
        assert_eq!(real_path_within(&root, &file).await, None);
    }

    #[tokio::test]
    async fn test_rejects_missing_target() {
        let (_guard, root) = canonical_tempdir().await;
        assert_eq!(real_path_within(&root, &root.join("absent")).await, None);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlink_inside_root_is_accepted() {
        let (_guard, root) = canonical_tempdir().await;
        let real = root.join("actual.txt");
        std::fs::write(&real, "data").expect("write");
        let link = root.join("alias.txt");
        std::os::unix::fs::symlink(&real, &link).expect("symlink");
        assert_eq!(real_path_within(&root, &link).await, Some(real));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlink_escaping_root_is_rejected() {
        let (_guard_a, root) = canonical_tempdir().await;
        let (_guard_b, outside) = canonical_tempdir().await;
        let secret = outside.join("passwd");
        std::fs::write(&secret, "root:x:0:0").expect("write");
        let link = root.join("innocent.txt");
        std::os::unix::fs::symlink(&secret, &link).expect("symlink");
        assert_eq!(real_path_within(&root, &link).await, None);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_broken_symlink_is_rejected() {
        let (_guard, root) = canonical_tempdir().await;
        let link = root.join("dangling");
        std::os::unix::fs::symlink(root.join("gone"), &link).expect("symlink");
        assert_eq!(real_path_within(&root, &link).await, None);
    }
}
