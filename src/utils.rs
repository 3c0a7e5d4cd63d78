// file: src/utils.rs
// version: 2.1.0
// guid: 0784e6f5-a659-4507-bd5d-dd33b38f6974

//! Filesystem checks used before invoking the multiOTP binary

use crate::error::{OtpError, Result};
use std::path::{Path, PathBuf};

/// Check that a path exists
pub fn path_exists(path: &Path) -> bool {
    path.exists()
}

/// Verify a directory exists and accepts new files.
///
/// Writability is probed by creating a temporary file inside the directory;
/// the file is removed again when the probe is dropped.
pub fn ensure_writable_dir(path: &Path) -> Result<()> {
    if !path_exists(path) {
        return Err(OtpError::precondition(format!(
            "{} doesn't exist",
            path.display()
        )));
    }

    if !path.is_dir() {
        return Err(OtpError::precondition(format!(
            "{} is not a directory",
            path.display()
        )));
    }

    let probe = tempfile::Builder::new()
        .prefix("tmpfile")
        .tempfile_in(path)
        .map_err(|e| {
            OtpError::precondition(format!("{} is not writable: {}", path.display(), e))
        })?;

    probe.close().map_err(|e| {
        OtpError::precondition(format!(
            "failed to remove probe file in {}: {}",
            path.display(),
            e
        ))
    })?;

    Ok(())
}

/// Reject user names that cannot be used as a single file name.
///
/// Empty names, path separators and `.`/`..` would place `<user>.png`
/// outside the output directory.
pub fn validate_file_stem(user: &str) -> Result<()> {
    if user.is_empty() {
        return Err(OtpError::precondition("user name is empty"));
    }

    if user.contains('/') || user.contains('\\') || user.contains(std::path::MAIN_SEPARATOR) {
        return Err(OtpError::precondition(format!(
            "user name '{}' contains a path separator",
            user
        )));
    }

    if user == "." || user.contains("..") {
        return Err(OtpError::precondition(format!(
            "user name '{}' contains traversal sequences",
            user
        )));
    }

    Ok(())
}

/// Expand `~` and resolve bare program names on `PATH`
pub fn resolve_binary_path(raw: &str) -> PathBuf {
    let expanded = shellexpand::tilde(raw).into_owned();
    if expanded.contains(std::path::MAIN_SEPARATOR) {
        return PathBuf::from(expanded);
    }

    match which::which(&expanded) {
        Ok(found) => found,
        Err(_) => PathBuf::from(expanded),
    }
}

/// Expand `~` in a directory setting
pub fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_writable_dir_accepted_and_left_clean() {
        let dir = TempDir::new().unwrap();

        assert!(ensure_writable_dir(dir.path()).is_ok());

        let leftovers = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 0);
    }

    #[test]
    fn test_missing_dir_is_precondition_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");

        let err = ensure_writable_dir(&missing).unwrap_err();
        assert!(matches!(err, OtpError::Precondition(_)));
    }

    #[test]
    fn test_file_instead_of_dir_is_rejected() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("file.txt");
        std::fs::write(&file, "x").unwrap();

        let err = ensure_writable_dir(&file).unwrap_err();
        assert!(matches!(err, OtpError::Precondition(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_read_only_dir_is_precondition_error() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        std::fs::set_permissions(dir.path(), std::fs::Permissions::from_mode(0o555)).unwrap();

        // root ignores directory permissions
        if std::fs::write(dir.path().join("root-check"), "x").is_ok() {
            return;
        }

        let err = ensure_writable_dir(dir.path()).unwrap_err();

        std::fs::set_permissions(dir.path(), std::fs::Permissions::from_mode(0o755)).unwrap();
        assert!(matches!(err, OtpError::Precondition(_)));
    }

    #[test]
    fn test_validate_file_stem() {
        assert!(validate_file_stem("alice").is_ok());
        assert!(validate_file_stem("john.smith").is_ok());

        for bad in ["", ".", "..", "../alice", "/tmp/victim", "a/b", "a\\b", "x..y"] {
            let err = validate_file_stem(bad).unwrap_err();
            assert!(matches!(err, OtpError::Precondition(_)), "{:?}", bad);
        }
    }

    #[test]
    fn test_resolve_keeps_explicit_path() {
        let resolved = resolve_binary_path("/usr/local/bin/multiotp/multiotp.php");
        assert_eq!(resolved, PathBuf::from("/usr/local/bin/multiotp/multiotp.php"));
    }

    #[test]
    fn test_resolve_unknown_bare_name_is_left_alone() {
        let resolved = resolve_binary_path("definitely-not-a-real-multiotp-binary");
        assert_eq!(resolved, PathBuf::from("definitely-not-a-real-multiotp-binary"));
    }
}
