//! jxlint: a pluggable, rule-based static validator for source trees.
//!
//! Rules live in a [`RuleRegistry`]. A [`RuleSelection`] picks the rules to
//! run, and the [`Linter`] runs one validation task per rule on a worker pool
//! and merges the results into a deterministic [`LintReport`].

pub mod config;
pub mod files;
pub mod linter;
#[cfg(feature = "cli")]
pub mod reporter;
pub mod rules;
pub mod selection;
pub mod source;

pub use config::{Color, ColorConfig, ColorMode, ConfigError, LintConfig, ValidationError};
pub use jxlint_common::{
    Category, Error, Failure, LintRule, Rule, RuleError, RuleRegistry, Severity,
    SourceDirectoryProblem, Violation, docs,
};
pub use linter::{LintReport, Linter, RuleProfile, SeverityCounts, TaskOutcome, ValidationTask};
#[cfg(feature = "cli")]
pub use reporter::{OutputFormat, Reporter};
pub use rules::builtin_registry;
pub use selection::{RuleSelection, select_rules};
pub use source::check_source_directory;

use std::path::Path;

/// Check `source_dir`, select rules from `registry` and run them.
///
/// This is the whole pipeline the command line drives, minus configuration
/// and reporting.
pub fn lint_directory(
    registry: &RuleRegistry,
    selection: &RuleSelection,
    linter: &Linter,
    source_dir: &Path,
) -> Result<LintReport, Error> {
    check_source_directory(source_dir)?;
    let rules = select_rules(registry, selection)?;
    Ok(linter.lint(&rules, source_dir))
}
