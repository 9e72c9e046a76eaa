//! Core types shared by the jxlint engine and rule catalogs.
//!
//! This crate holds the rule model and the selection algebra over it. It
//! does no I/O of its own and spawns no threads; the `jxlint` crate builds
//! the execution engine, configuration and CLI on top of it.
//!
//! # Modules
//!
//! - [`linter`] — [`LintRule`] trait, [`Rule`] handle, [`Violation`], [`Severity`], [`Category`]
//! - [`registry`] — [`RuleRegistry`] and its enable/disable/only/severity/category queries
//! - [`error`] — [`Error`], [`RuleError`] and recorded [`Failure`]s
//! - [`docs`] — summary, detailed and Markdown rule descriptions
//!
//! # Quick reference
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`LintRule`] | Trait every rule implements: metadata plus candidate files and per-file evaluation |
//! | [`Rule`] | A registered rule with its enabled flag; identity is the case-insensitive name |
//! | [`Violation`] | One problem at a file and line, ordered by file then line |
//! | [`RuleRegistry`] | The catalog; all queries preserve registration order |

pub mod docs;
pub mod error;
pub mod linter;
pub mod registry;

pub use error::{Error, Failure, RuleError, SourceDirectoryProblem};
pub use linter::{Category, LintRule, Rule, Severity, Violation, names_match, sort_violations};
pub use registry::{RuleRegistry, split_list};
