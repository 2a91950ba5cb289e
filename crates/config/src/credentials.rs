//! Credential file resolution

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;
use types::ConfigError;

/// A credential path that has been checked against the filesystem.
///
/// `Present` always names an existing regular file (symlinks are followed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialFile {
    Present(PathBuf),
    Absent,
}

impl CredentialFile {
    pub fn is_present(&self) -> bool {
        matches!(self, CredentialFile::Present(_))
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            CredentialFile::Present(path) => Some(path),
            CredentialFile::Absent => None,
        }
    }

    pub fn into_path(self) -> Option<PathBuf> {
        match self {
            CredentialFile::Present(path) => Some(path),
            CredentialFile::Absent => None,
        }
    }
}

/// Resolves explicit-or-default credential paths
pub struct CredentialFileResolver;

impl CredentialFileResolver {
    /// Resolve `explicit` (or `default_path` when `explicit` is unset or
    /// empty) to a regular file.
    ///
    /// Missing paths and non-files resolve to [`CredentialFile::Absent`]. A
    /// path running through a regular file (`ENOTDIR`) is missing too. Any
    /// other stat failure is returned as [`ConfigError::CredentialAccess`].
    ///
    /// Symlinks are followed: a link to a regular file is present, a dangling
    /// link is absent.
    pub fn resolve(
        explicit: Option<&str>,
        default_path: &Path,
    ) -> Result<CredentialFile, ConfigError> {
        let path = match explicit {
            Some(p) if !p.is_empty() => PathBuf::from(p),
            _ => default_path.to_path_buf(),
        };

        match fs::metadata(&path) {
            Ok(meta) if meta.is_file() => {
                debug!(path = %path.display(), "Credential file found");
                Ok(CredentialFile::Present(path))
            }
            Ok(_) => {
                debug!(path = %path.display(), "Credential path is not a regular file");
                Ok(CredentialFile::Absent)
            }
            Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {
                Ok(CredentialFile::Absent)
            }
            Err(source) => Err(ConfigError::CredentialAccess {
                path: path.display().to_string(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn test_explicit_file_is_present() {
        let file = NamedTempFile::new().unwrap();
        let explicit = file.path().to_str().unwrap();
        let resolved =
            CredentialFileResolver::resolve(Some(explicit), Path::new("/nonexistent")).unwrap();
        assert_eq!(resolved, CredentialFile::Present(file.path().to_path_buf()));
    }

    #[test]
    fn test_falls_back_to_default() {
        let file = NamedTempFile::new().unwrap();
        let resolved = CredentialFileResolver::resolve(None, file.path()).unwrap();
        assert_eq!(resolved.path(), Some(file.path()));
    }

    #[test]
    fn test_empty_explicit_uses_default() {
        let file = NamedTempFile::new().unwrap();
        let resolved = CredentialFileResolver::resolve(Some(""), file.path()).unwrap();
        assert!(resolved.is_present());
    }

    #[test]
    fn test_directory_is_absent() {
        let dir = tempdir().unwrap();
        let explicit = dir.path().to_str().unwrap();
        let resolved =
            CredentialFileResolver::resolve(Some(explicit), Path::new("/nonexistent")).unwrap();
        assert_eq!(resolved, CredentialFile::Absent);
    }

    #[test]
    fn test_missing_path_is_absent() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("production-pfx");
        let resolved = CredentialFileResolver::resolve(None, &missing).unwrap();
        assert_eq!(resolved, CredentialFile::Absent);
        assert_eq!(resolved.into_path(), None);
    }

    #[test]
    fn test_explicit_missing_does_not_fall_back() {
        let file = NamedTempFile::new().unwrap();
        let dir = tempdir().unwrap();
        let missing = dir.path().join("cert.pem");
        let resolved =
            CredentialFileResolver::resolve(missing.to_str(), file.path()).unwrap();
        assert_eq!(resolved, CredentialFile::Absent);
    }

    #[test]
    fn test_path_below_regular_file_is_absent() {
        let file = NamedTempFile::new().unwrap();
        let below = file.path().join("cert.pem");
        let resolved =
            CredentialFileResolver::resolve(below.to_str(), Path::new("/nonexistent")).unwrap();
        assert_eq!(resolved, CredentialFile::Absent);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_are_followed() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("production-pfx.real");
        std::fs::write(&target, b"pfx").unwrap();

        let link = dir.path().join("production-pfx");
        std::os::unix::fs::symlink(&target, &link).unwrap();
        let resolved = CredentialFileResolver::resolve(None, &link).unwrap();
        assert_eq!(resolved, CredentialFile::Present(link));

        let dangling = dir.path().join("dev-pfx");
        std::os::unix::fs::symlink(dir.path().join("missing"), &dangling).unwrap();
        let resolved = CredentialFileResolver::resolve(None, &dangling).unwrap();
        assert_eq!(resolved, CredentialFile::Absent);
    }

    #[cfg(unix)]
    #[test]
    fn test_stat_failure_is_fault() {
        // A single component longer than NAME_MAX fails with ENAMETOOLONG,
        // which is neither "not found" nor a permission we can drop as root.
        let too_long = format!("/{}", "a".repeat(300));
        let err = CredentialFileResolver::resolve(Some(&too_long), Path::new("/nonexistent"))
            .unwrap_err();
        match err {
            ConfigError::CredentialAccess { path, .. } => assert_eq!(path, too_long),
            other => panic!("unexpected error: {other}"),
        }
    }
}
