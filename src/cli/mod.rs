pub mod config;
pub mod lint;
pub mod rules;

use clap::{Parser, Subcommand};
use jxlint::OutputFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "jxlint")]
#[command(author, version, about = "Validate a source tree against a set of lint rules", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Source directory to validate
    #[arg(value_name = "DIRECTORY", default_value = ".")]
    pub directory: PathBuf,

    /// Only check for these rules (comma-separated)
    #[arg(short = 'c', long, value_name = "RULES")]
    pub check: Option<String>,

    /// Disable these rules (comma-separated)
    #[arg(short = 'd', long, value_name = "RULES")]
    pub disable: Option<String>,

    /// Enable these rules on top of the defaults (comma-separated)
    #[arg(short = 'e', long, value_name = "RULES")]
    pub enable: Option<String>,

    /// Only run rules in these categories (comma-separated)
    #[arg(long = "category", value_name = "CATEGORIES")]
    pub categories: Option<String>,

    /// Only check for errors; ignore warnings
    #[arg(short = 'w', long = "nowarn")]
    pub no_warnings: bool,

    /// Check all rules, including those disabled by default
    #[arg(long = "Wall")]
    pub all_warnings: bool,

    /// Treat warnings as errors
    #[arg(long = "Werror")]
    pub warnings_are_errors: bool,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    pub format: Format,

    /// Path to configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Force colored output
    #[arg(long, conflicts_with = "no_color")]
    pub color: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Number of worker threads (0 = one per core)
    #[arg(short = 'j', long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Show profiling information (time spent per rule)
    #[arg(long)]
    pub profile: bool,

    /// Show debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show documentation for the available rules
    Rules {
        /// Rules to describe in detail; all rules when omitted
        #[arg(value_name = "NAMES")]
        names: Vec<String>,

        /// List rule summaries; disabled rules are marked with *
        #[arg(short, long, conflicts_with = "markdown")]
        list: bool,

        /// Print a Markdown report of every rule
        #[arg(long)]
        markdown: bool,
    },
    /// Configuration file management
    Config {
        #[command(subcommand)]
        command: config::ConfigCommands,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
pub enum Format {
    Text,
    Json,
    Quiet,
}

impl From<Format> for OutputFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
            Format::Quiet => OutputFormat::Quiet,
        }
    }
}
