use crate::config::{Color, ColorConfig};
use crate::linter::LintReport;
use colored::{ColoredString, Colorize};
use jxlint_common::{Severity, Violation};
use std::io::{self, Write};

pub(crate) fn report(report: &LintReport, colors: &ColorConfig, out: &mut dyn Write) -> io::Result<()> {
    for violation in &report.violations {
        let color = match violation.severity {
            Severity::Warning => colors.warning,
            Severity::Error => colors.error,
            Severity::Fatal => colors.fatal,
        };
        let severity = apply_color(&format!("[{}]", violation.severity), color).bold();
        let rule = format!(
            "[{}/{}]",
            violation.category.happy_name(),
            violation.rule
        )
        .dimmed();

        writeln!(
            out,
            "{}: {} {} {}",
            location(violation),
            severity,
            rule,
            violation.message
        )?;
    }

    if let Some(summary) = summary(report) {
        writeln!(out)?;
        writeln!(out, "{}", summary)?;
    }
    Ok(())
}

fn location(violation: &Violation) -> String {
    match violation.line {
        Some(line) => format!("{}:{}", violation.file.display(), line),
        None => violation.file.display().to_string(),
    }
}

/// "Found 1 fatal error(s), 2 error(s), 3 warning(s)", or `None` for a clean run
fn summary(report: &LintReport) -> Option<String> {
    let mut parts = Vec::new();
    let fatal_count = report.count(Severity::Fatal);
    if fatal_count > 0 {
        parts.push(format!("{} fatal error(s)", fatal_count));
    }
    let error_count = report.count(Severity::Error);
    if error_count > 0 {
        parts.push(format!("{} error(s)", error_count));
    }
    let warning_count = report.count(Severity::Warning);
    if warning_count > 0 {
        parts.push(format!("{} warning(s)", warning_count));
    }

    (!parts.is_empty()).then(|| format!("Found {}", parts.join(", ")))
}

#[cfg(test)]
fn format_line(violation: &Violation) -> String {
    format!(
        "{}: [{}] [{}/{}] {}",
        location(violation),
        violation.severity,
        violation.category.happy_name(),
        violation.rule,
        violation.message
    )
}

/// Apply a color to a string
fn apply_color(s: &str, color: Color) -> ColoredString {
    match color {
        Color::Black => s.black(),
        Color::Red => s.red(),
        Color::Green => s.green(),
        Color::Yellow => s.yellow(),
        Color::Blue => s.blue(),
        Color::Magenta => s.magenta(),
        Color::Cyan => s.cyan(),
        Color::White => s.white(),
        Color::BrightBlack => s.bright_black(),
        Color::BrightRed => s.bright_red(),
        Color::BrightGreen => s.bright_green(),
        Color::BrightYellow => s.bright_yellow(),
        Color::BrightBlue => s.bright_blue(),
        Color::BrightMagenta => s.bright_magenta(),
        Color::BrightCyan => s.bright_cyan(),
        Color::BrightWhite => s.bright_white(),
    }
}
