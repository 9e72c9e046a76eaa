use crate::linter::LintReport;
use jxlint_common::{Failure, Severity, Violation};
use std::io::{self, Write};

#[derive(serde::Serialize)]
struct JsonReport<'a> {
    violations: &'a [Violation],
    summary: Summary,
    failures: &'a [Failure],
}

#[derive(serde::Serialize)]
struct Summary {
    fatal: usize,
    errors: usize,
    warnings: usize,
}

pub(crate) fn report(report: &LintReport, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "{}", format(report)?)
}

pub(crate) fn format(report: &LintReport) -> io::Result<String> {
    let json = JsonReport {
        violations: &report.violations,
        summary: Summary {
            fatal: report.count(Severity::Fatal),
            errors: report.count(Severity::Error),
            warnings: report.count(Severity::Warning),
        },
        failures: &report.failures,
    };

    serde_json::to_string_pretty(&json).map_err(io::Error::other)
}
