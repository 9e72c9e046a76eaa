use super::Cli;
use colored::control;
use jxlint::{
    ColorMode, LintConfig, LintReport, Linter, Reporter, Rule, RuleProfile, RuleRegistry,
    RuleSelection, builtin_registry, check_source_directory, select_rules,
};
use jxlint_common::split_list;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;

/// Display profiling results
fn display_profile(profiles: &[RuleProfile], total_time: Duration) {
    use colored::Colorize;

    let mut sorted: Vec<_> = profiles.iter().collect();
    sorted.sort_by(|a, b| b.duration.cmp(&a.duration));

    eprintln!();
    eprintln!("{}", "Profile Results".bold().underline());
    eprintln!();

    eprintln!(
        "{:>10}  {:>6}  {:>10}  {:<30}  {}",
        "Time".bold(),
        "%".bold(),
        "Violations".bold(),
        "Rule".bold(),
        "Category".bold()
    );
    eprintln!("{}", "-".repeat(74));

    for profile in &sorted {
        let percentage = if total_time.as_nanos() > 0 {
            (profile.duration.as_nanos() as f64 / total_time.as_nanos() as f64) * 100.0
        } else {
            0.0
        };

        let time_str = format_duration(profile.duration);
        let pct_str = format!("{:.1}%", percentage);

        // Highlight slow rules (>10% of total time)
        let time_display = if percentage > 10.0 {
            time_str.red().to_string()
        } else if percentage > 5.0 {
            time_str.yellow().to_string()
        } else {
            time_str
        };

        let name = if profile.failed {
            format!("{} (failed)", profile.name)
        } else {
            profile.name.clone()
        };

        eprintln!(
            "{:>10}  {:>6}  {:>10}  {:<30}  {}",
            time_display,
            pct_str,
            profile.error_count,
            name,
            profile.category.dimmed()
        );
    }

    eprintln!("{}", "-".repeat(74));
    eprintln!(
        "{:>10}  {:>6}  {:>10}  {}",
        format_duration(total_time).bold(),
        "100%".bold(),
        sorted.iter().map(|p| p.error_count).sum::<usize>(),
        "Total".bold()
    );
    eprintln!();
}

/// Format a duration for display
fn format_duration(d: Duration) -> String {
    let micros = d.as_micros();
    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", d.as_secs_f64())
    }
}

/// Turn the comma-separated rule options into a [`RuleSelection`].
/// Every named rule must exist.
fn build_selection(cli: &Cli, registry: &RuleRegistry) -> Result<RuleSelection, jxlint::Error> {
    let parse = |raw: &Option<String>| -> Result<Vec<String>, jxlint::Error> {
        match raw {
            Some(raw) => registry.parse_rule_list(raw),
            None => Ok(Vec::new()),
        }
    };

    Ok(RuleSelection {
        check: cli
            .check
            .as_ref()
            .map(|raw| registry.parse_rule_list(raw))
            .transpose()?,
        all_warnings: cli.all_warnings,
        no_warnings: cli.no_warnings,
        enable: parse(&cli.enable)?,
        disable: parse(&cli.disable)?,
        categories: cli.categories.as_deref().map(split_list).unwrap_or_default(),
    })
}

fn load_config(cli: &Cli) -> Result<Option<LintConfig>, jxlint::ConfigError> {
    match &cli.config {
        Some(path) => LintConfig::from_file(path).map(Some),
        None => LintConfig::find_and_load(&cli.directory),
    }
}

fn configure_color(cli: &Cli, config: Option<&LintConfig>) {
    if cli.color {
        control::set_override(true);
    } else if cli.no_color {
        control::set_override(false);
    } else if let Some(config) = config {
        match config.color_mode() {
            ColorMode::Always => control::set_override(true),
            ColorMode::Never => control::set_override(false),
            ColorMode::Auto => {}
        }
    }
}

fn write_report(reporter: &Reporter, report: &LintReport) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    reporter.report(report, &mut out)?;
    out.flush()
}

/// Run `rules` over the registry's source directory. Evaluation failures are
/// logged by the engine as they happen and only kept in the report here.
fn execute(
    registry: &RuleRegistry,
    rules: &[&Rule],
    jobs: usize,
) -> Result<LintReport, jxlint::Error> {
    let source_dir = registry.source_directory().unwrap_or_else(|| Path::new("."));
    let linter = Linter::with_jobs(jobs)?;
    Ok(linter.lint(rules, source_dir))
}

pub fn run_lint(cli: &Cli) -> ExitCode {
    // 1. The source tree must be a readable directory
    if let Err(e) = check_source_directory(&cli.directory) {
        eprintln!("Error: {}", e);
        return ExitCode::from(2);
    }

    // 2. Load configuration (explicit path, or searched upwards)
    let lint_config = match load_config(cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    // 3. Build the catalog and apply per-rule switches from the config
    let mut registry = builtin_registry();
    registry.set_source_directory(&cli.directory);
    if let Some(config) = &lint_config {
        if let Err(e) = config.apply(&mut registry) {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    }

    // 4. Select rules (CLI flags take precedence over config)
    let rules = match build_selection(cli, &registry)
        .and_then(|selection| select_rules(&registry, &selection))
    {
        Ok(rules) => rules,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };
    tracing::debug!(
        rules = ?rules.iter().map(|r| r.name()).collect::<Vec<_>>(),
        "selected rules"
    );

    // 5. Configure color output
    configure_color(cli, lint_config.as_ref());

    // 6. Run
    let jobs = cli
        .jobs
        .or_else(|| lint_config.as_ref().and_then(|c| c.jobs))
        .unwrap_or(0);
    let report = match execute(&registry, &rules, jobs) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    // 7. Report
    let color_config = lint_config
        .as_ref()
        .map(|c| c.color.clone())
        .unwrap_or_default();
    let reporter = Reporter::with_colors(cli.format.into(), color_config);
    if let Err(e) = write_report(&reporter, &report) {
        eprintln!("Error writing report: {}", e);
        return ExitCode::from(2);
    }

    if cli.profile {
        display_profile(&report.profiles, report.total_duration());
    }

    let warnings_are_errors =
        cli.warnings_are_errors || lint_config.as_ref().is_some_and(|c| c.warnings_are_errors);
    if report.has_failures(warnings_are_errors) {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}
