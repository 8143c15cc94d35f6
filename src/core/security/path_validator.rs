use std::io;
use std::path::{Path, PathBuf};

use tokio::fs;

/// Errors that can occur during template path validation
#[derive(Debug, thiserror::Error)]
pub enum PathSecurityError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("name '{name}' must not contain path separators")]
    ContainsSeparator { name: String },

    #[error("name '{name}' refers to a directory component")]
    DirectoryComponent { name: String },

    #[error("name must not contain NUL bytes")]
    NulByte,

    #[error("Path '{path}' is outside allowed root directory '{root}'")]
    OutsideRootDirectory { path: PathBuf, root: PathBuf },

    #[error("Cannot canonicalize path '{path}': {error}")]
    CannotCanonicalize { path: PathBuf, error: io::Error },
}

/// Validates that `name` can be used as a single file stem inside a
/// directory.
///
/// Rejects anything that would let a caller address a file outside the
/// directory by name alone: separators, `.`/`..` and NUL bytes.
///
/// # Examples
///
/// ```rust
/// use devrecord_mcp_server::core::security::validate_file_stem;
///
/// assert!(validate_file_stem("meeting-record").is_ok());
/// assert!(validate_file_stem("../secrets").is_err());
/// ```
pub fn validate_file_stem(name: &str) -> Result<(), PathSecurityError> {
    if name.is_empty() {
        return Err(PathSecurityError::EmptyName);
    }

    if name.contains('\0') {
        return Err(PathSecurityError::NulByte);
    }

    if name.contains('/') || name.contains('\\') {
        return Err(PathSecurityError::ContainsSeparator {
            name: name.to_string(),
        });
    }

    if name == "." || name == ".." {
        return Err(PathSecurityError::DirectoryComponent {
            name: name.to_string(),
        });
    }

    Ok(())
}

/// Ensures `path` resolves (after following symlinks) to a location inside
/// `root`.
///
/// Both paths are canonicalized, so the target must exist. Returns the
/// canonical path on success.
pub async fn ensure_within_root(path: &Path, root: &Path) -> Result<PathBuf, PathSecurityError> {
    let canonical_root = canonicalize(root).await?;
    let canonical_path = canonicalize(path).await?;

    if !canonical_path.starts_with(&canonical_root) {
        return Err(PathSecurityError::OutsideRootDirectory {
            path: canonical_path,
            root: canonical_root,
        });
    }

    Ok(canonical_path)
}

async fn canonicalize(path: &Path) -> Result<PathBuf, PathSecurityError> {
    fs::canonicalize(path)
        .await
        .map_err(|error| PathSecurityError::CannotCanonicalize {
            path: path.to_path_buf(),
            error,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_plain_names_accepted() {
        assert!(validate_file_stem("meeting-record").is_ok());
        assert!(validate_file_stem("daily.standup").is_ok());
        assert!(validate_file_stem("学习笔记").is_ok());
    }

    #[test]
    fn test_empty_name_rejected() {
        assert!(matches!(
            validate_file_stem(""),
            Err(PathSecurityError::EmptyName)
        ));
    }

    #[test]
    fn test_separators_rejected() {
        for name in ["../etc/passwd", "a/b", "a\\b"] {
            assert!(matches!(
                validate_file_stem(name),
                Err(PathSecurityError::ContainsSeparator { .. })
            ));
        }
    }

    #[test]
    fn test_dot_components_rejected() {
        assert!(validate_file_stem(".").is_err());
        assert!(validate_file_stem("..").is_err());
        assert!(validate_file_stem("..hidden").is_ok());
    }

    #[test]
    fn test_nul_rejected() {
        assert!(matches!(
            validate_file_stem("a\0b"),
            Err(PathSecurityError::NulByte)
        ));
    }

    #[tokio::test]
    async fn test_path_within_root() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("inside.md");
        std::fs::write(&file, "x").unwrap();

        let resolved = ensure_within_root(&file, temp_dir.path()).await.unwrap();
        assert!(resolved.ends_with("inside.md"));
    }

    #[tokio::test]
    async fn test_path_traversal_blocked() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("templates");
        std::fs::create_dir(&root).unwrap();
        std::fs::write(temp_dir.path().join("outside.md"), "x").unwrap();

        let result = ensure_within_root(&root.join("../outside.md"), &root).await;
        assert!(matches!(
            result,
            Err(PathSecurityError::OutsideRootDirectory { .. })
        ));
    }

    #[tokio::test]
    async fn test_missing_path_cannot_canonicalize() {
        let temp_dir = TempDir::new().unwrap();
        let result = ensure_within_root(&temp_dir.path().join("nope.md"), temp_dir.path()).await;
        assert!(matches!(
            result,
            Err(PathSecurityError::CannotCanonicalize { .. })
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlink_outside_root_blocked() {
        use std::os::unix::fs::symlink;

        let root_dir = TempDir::new().unwrap();
        let outside_dir = TempDir::new().unwrap();
        let target = outside_dir.path().join("target.md");
        let link = root_dir.path().join("link.md");
        std::fs::write(&target, "secret").unwrap();
        symlink(&target, &link).unwrap();

        let result = ensure_within_root(&link, root_dir.path()).await;
        assert!(matches!(
            result,
            Err(PathSecurityError::OutsideRootDirectory { .. })
        ));
    }
}
