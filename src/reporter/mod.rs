//! Rendering a [`LintReport`] for people and machines.

mod json;
mod text;

use crate::config::ColorConfig;
use crate::linter::LintReport;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// `path:line: [SEVERITY] [Category/Rule] message` plus a summary line
    #[default]
    Text,
    Json,
    /// Nothing; only the exit code tells the outcome
    Quiet,
}

pub struct Reporter {
    format: OutputFormat,
    colors: ColorConfig,
}

impl Reporter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            colors: ColorConfig::default(),
        }
    }

    pub fn with_colors(format: OutputFormat, colors: ColorConfig) -> Self {
        Self { format, colors }
    }

    pub fn report(&self, report: &LintReport, out: &mut dyn Write) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => text::report(report, &self.colors, out),
            OutputFormat::Json => json::report(report, out),
            OutputFormat::Quiet => Ok(()),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_writes_nothing() {
        let mut out = Vec::new();
        Reporter::new(OutputFormat::Quiet)
            .report(&fixtures::sample_report(), &mut out)
            .unwrap();
        assert!(out.is_empty());
    }
}
