use jxlint_common::{Error, SourceDirectoryProblem};
use std::fs;
use std::path::Path;

/// Make sure `path` is an existing, readable directory before any rule runs.
pub fn check_source_directory(path: &Path) -> Result<(), Error> {
    let problem = if !path.exists() {
        Some(SourceDirectoryProblem::DoesNotExist)
    } else if !path.is_dir() {
        Some(SourceDirectoryProblem::NotADirectory)
    } else if fs::read_dir(path).is_err() {
        Some(SourceDirectoryProblem::Unreadable)
    } else {
        None
    };

    match problem {
        Some(reason) => Err(Error::invalid_source_directory(path, reason)),
        None => Ok(()),
    }
}
