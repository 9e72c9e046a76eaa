//! Candidate-file enumeration for rules.
//!
//! Listings are recursive, contain regular files only and come back sorted,
//! so a rule sees the same file order on every run.

use glob::{MatchOptions, Pattern};
use jxlint_common::RuleError;
use std::path::{Path, PathBuf};

/// Every regular file below `root`
pub fn all_files_in(root: &Path) -> Result<Vec<PathBuf>, RuleError> {
    if !root.is_dir() {
        return Err(RuleError::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    let root_str = root.to_str().ok_or_else(|| RuleError::Pattern {
        pattern: root.display().to_string(),
        message: "path is not valid UTF-8".to_string(),
    })?;
    let pattern = format!("{}/**/*", Pattern::escape(root_str).trim_end_matches('/'));
    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };
    let entries = glob::glob_with(&pattern, options).map_err(|e| RuleError::Pattern {
        pattern: pattern.clone(),
        message: e.to_string(),
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| {
            let path = e.path().to_path_buf();
            RuleError::io(path, e.into_error())
        })?;
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Files below `root` whose extension matches `extension` case-insensitively.
/// The extension is given without the dot: `"xml"` matches `pom.XML`.
pub fn all_files_with_extension_in(root: &Path, extension: &str) -> Result<Vec<PathBuf>, RuleError> {
    Ok(all_files_in(root)?
        .into_iter()
        .filter(|path| {
            path.extension()
                .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(extension))
        })
        .collect())
}

/// Files below `root` named exactly `filename`
pub fn all_files_with_filename_in(root: &Path, filename: &str) -> Result<Vec<PathBuf>, RuleError> {
    Ok(all_files_in(root)?
        .into_iter()
        .filter(|path| path.file_name().is_some_and(|name| name == filename))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn tree() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("nested/deeper")).unwrap();
        fs::write(root.join("a.xml"), "<a/>").unwrap();
        fs::write(root.join("notes.txt"), "hi").unwrap();
        fs::write(root.join("nested/b.XML"), "<b/>").unwrap();
        fs::write(root.join("nested/deeper/pom.xml"), "<project/>").unwrap();
        fs::write(root.join("nested/.hidden.xml"), "<h/>").unwrap();
        fs::write(root.join("nested/deeper/xml"), "no extension").unwrap();
        dir
    }

    fn relative(root: &Path, files: Vec<PathBuf>) -> Vec<String> {
        files
            .iter()
            .map(|f| f.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn test_all_files_in_is_recursive_and_sorted() {
        let dir = tree();
        let files = relative(dir.path(), all_files_in(dir.path()).unwrap());
        assert_eq!(
            files,
            vec![
                "a.xml",
                "nested/.hidden.xml",
                "nested/b.XML",
                "nested/deeper/pom.xml",
                "nested/deeper/xml",
                "notes.txt",
            ]
        );
    }

    #[test]
    fn test_extension_filter_ignores_case() {
        let dir = tree();
        let files = relative(dir.path(), all_files_with_extension_in(dir.path(), "xml").unwrap());
        assert_eq!(
            files,
            vec!["a.xml", "nested/.hidden.xml", "nested/b.XML", "nested/deeper/pom.xml"]
        );
    }

    #[test]
    fn test_filename_filter_is_exact() {
        let dir = tree();
        let files = relative(dir.path(), all_files_with_filename_in(dir.path(), "pom.xml").unwrap());
        assert_eq!(files, vec!["nested/deeper/pom.xml"]);
        assert!(all_files_with_filename_in(dir.path(), "POM.xml").unwrap().is_empty());
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = all_files_in(&dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, RuleError::NotADirectory { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_root_is_an_error() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = TempDir::new().unwrap();
        let root = dir.path().join(OsStr::from_bytes(b"caf\xE9"));
        if fs::create_dir(&root).is_err() {
            // Some filesystems refuse names that are not UTF-8
            return;
        }
        fs::write(root.join("a.xml"), "<a/>").unwrap();

        let err = all_files_in(&root).unwrap_err();
        assert!(matches!(err, RuleError::Pattern { .. }));
        assert!(err.to_string().contains("not valid UTF-8"));
    }
}
