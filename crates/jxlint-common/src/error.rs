//! Error types for the rule model.
//!
//! - [`Error`] — hard failures surfaced to the caller (unknown rule names,
//!   a bad source directory, a worker pool that cannot start).
//! - [`RuleError`] — what a rule implementation reports when it cannot
//!   enumerate or read its files.
//! - [`Failure`] — non-fatal diagnostics recorded during a run. A failed
//!   file or task never aborts sibling work.

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("'{name}' is not a valid rule.")]
    UnknownRule { name: String },

    #[error("rule '{name}' is already registered")]
    DuplicateRule { name: String },

    #[error("Invalid source directory \"{}\" : {reason}", path.display())]
    InvalidSourceDirectory {
        path: PathBuf,
        reason: SourceDirectoryProblem,
    },

    #[error("failed to start worker pool: {message}")]
    ThreadPool { message: String },
}

impl Error {
    pub fn unknown_rule(name: impl Into<String>) -> Self {
        Self::UnknownRule { name: name.into() }
    }

    pub fn invalid_source_directory(
        path: impl Into<PathBuf>,
        reason: SourceDirectoryProblem,
    ) -> Self {
        Self::InvalidSourceDirectory {
            path: path.into(),
            reason,
        }
    }
}

/// Why a source directory was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SourceDirectoryProblem {
    #[error("Directory does not exist.")]
    DoesNotExist,
    #[error("Not a directory.")]
    NotADirectory,
    #[error("Cannot read directory.")]
    Unreadable,
}

/// Errors a rule may return while enumerating or evaluating files
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{path}' is not a directory")]
    NotADirectory { path: PathBuf },

    #[error("invalid file pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },

    #[error("{0}")]
    Message(String),
}

impl RuleError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}

/// A fault recorded during a run instead of being propagated
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Failure {
    /// One file could not be evaluated; the rule carried on with the rest
    #[error("rule \"{rule}\" failed on {}: {message}", file.display())]
    RuleEvaluation {
        rule: String,
        file: PathBuf,
        message: String,
    },

    /// The whole rule could not run; it contributes no violations
    #[error("rule \"{rule}\" did not complete: {message}")]
    Task { rule: String, message: String },
}

impl Failure {
    pub fn rule_evaluation(
        rule: impl Into<String>,
        file: impl Into<PathBuf>,
        message: impl Into<String>,
    ) -> Self {
        Self::RuleEvaluation {
            rule: rule.into(),
            file: file.into(),
            message: message.into(),
        }
    }

    pub fn task(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Task {
            rule: rule.into(),
            message: message.into(),
        }
    }

    /// Name of the rule the failure belongs to
    pub fn rule(&self) -> &str {
        match self {
            Failure::RuleEvaluation { rule, .. } | Failure::Task { rule, .. } => rule,
        }
    }
}
