use jxlint_common::{Error, Failure, Rule, Severity, Violation, sort_violations};
use rayon::prelude::*;
use serde::{Serialize, Serializer};
use std::any::Any;
use std::collections::BTreeMap;
use std::num::NonZeroUsize;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Profiling information for a single rule
#[derive(Debug, Clone, Serialize)]
pub struct RuleProfile {
    /// Rule name
    pub name: String,
    /// Rule category
    pub category: String,
    /// Wall-clock time the rule's validation task took
    #[serde(rename = "elapsed_ms", serialize_with = "serialize_millis")]
    pub duration: Duration,
    /// Number of violations found by this rule
    pub error_count: usize,
    /// Whether the task could not complete
    pub failed: bool,
}

fn serialize_millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64() * 1000.0)
}

/// Number of violations per severity. Every severity is present, so a
/// severity nobody reported reads as zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeverityCounts(BTreeMap<Severity, usize>);

impl SeverityCounts {
    pub fn from_violations(violations: &[Violation]) -> Self {
        let mut counts = Self::default();
        for violation in violations {
            *counts.0.entry(violation.severity).or_insert(0) += 1;
        }
        counts
    }

    pub fn get(&self, severity: Severity) -> usize {
        self.0.get(&severity).copied().unwrap_or(0)
    }

    /// Violations of `severity` or worse
    pub fn at_least(&self, severity: Severity) -> usize {
        self.0.range(severity..).map(|(_, count)| count).sum()
    }

    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Severity, usize)> + '_ {
        self.0.iter().map(|(severity, count)| (*severity, *count))
    }
}

impl Default for SeverityCounts {
    fn default() -> Self {
        Self(Severity::ALL.iter().map(|s| (*s, 0)).collect())
    }
}

/// Combined outcome of running a set of rules over a source tree
#[derive(Debug, Clone, Default, Serialize)]
pub struct LintReport {
    /// Every violation, ordered by file then line
    pub violations: Vec<Violation>,
    pub severity_counts: SeverityCounts,
    /// One entry per rule, in the order the rules were given
    pub profiles: Vec<RuleProfile>,
    /// Files and rules that could not be evaluated
    pub failures: Vec<Failure>,
}

impl LintReport {
    pub fn count(&self, severity: Severity) -> usize {
        self.severity_counts.get(severity)
    }

    /// Whether anything of severity ERROR or worse was found
    pub fn has_errors(&self) -> bool {
        self.severity_counts.at_least(Severity::Error) > 0
    }

    /// Whether the run should be considered failed. With
    /// `warnings_are_errors`, any violation at all counts.
    pub fn has_failures(&self, warnings_are_errors: bool) -> bool {
        if warnings_are_errors {
            self.severity_counts.total() > 0
        } else {
            self.has_errors()
        }
    }

    /// Sum of all per-rule task durations
    pub fn total_duration(&self) -> Duration {
        self.profiles.iter().map(|p| p.duration).sum()
    }
}

/// Output of one [`ValidationTask`]
#[derive(Debug, Clone)]
pub struct TaskOutcome {
    /// Violations found by the rule, ordered by file then line
    pub violations: Vec<Violation>,
    pub failures: Vec<Failure>,
    pub profile: RuleProfile,
}

/// Runs one rule over the source tree.
///
/// A file that fails to evaluate (error or panic) is recorded and skipped.
/// If the rule cannot even list its files the task fails as a whole and
/// contributes no violations.
pub struct ValidationTask<'a> {
    rule: &'a Rule,
    source_dir: &'a Path,
}

impl<'a> ValidationTask<'a> {
    pub fn new(rule: &'a Rule, source_dir: &'a Path) -> Self {
        Self { rule, source_dir }
    }

    pub fn run(&self) -> TaskOutcome {
        let start = Instant::now();
        let name = self.rule.name();

        let mut failures = Vec::new();
        let mut violations = Vec::new();
        let mut failed = false;

        match self.candidate_files() {
            Ok(files) => {
                debug!(rule = name, files = files.len(), "validating rule");
                for file in &files {
                    match self.evaluate(file) {
                        Ok(Some(mut violation)) => {
                            // Attribution and severity come from the running rule
                            violation.rule = name.to_string();
                            violation.severity = self.rule.severity();
                            violation.category = self.rule.category();
                            violations.push(violation);
                        }
                        Ok(None) => {}
                        Err(message) => {
                            warn!(rule = name, file = %file.display(), "{message}");
                            failures.push(Failure::rule_evaluation(name, file, message));
                        }
                    }
                }
                sort_violations(&mut violations);
            }
            Err(message) => {
                warn!(rule = name, "rule did not complete: {message}");
                failures.push(Failure::task(name, message));
                failed = true;
            }
        }

        let duration = start.elapsed();
        debug!(
            rule = name,
            violations = violations.len(),
            elapsed_ms = duration.as_millis() as u64,
            "rule finished"
        );

        TaskOutcome {
            profile: RuleProfile {
                name: name.to_string(),
                category: self.rule.category().to_string(),
                duration,
                error_count: violations.len(),
                failed,
            },
            violations,
            failures,
        }
    }

    fn candidate_files(&self) -> Result<Vec<PathBuf>, String> {
        match panic::catch_unwind(AssertUnwindSafe(|| {
            self.rule.files_to_validate(self.source_dir)
        })) {
            Ok(result) => result.map_err(|e| e.to_string()),
            Err(payload) => Err(panic_message(payload.as_ref())),
        }
    }

    fn evaluate(&self, file: &Path) -> Result<Option<Violation>, String> {
        match panic::catch_unwind(AssertUnwindSafe(|| self.rule.lint_error(file))) {
            Ok(result) => result.map_err(|e| e.to_string()),
            Err(payload) => Err(panic_message(payload.as_ref())),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panicked: {s}")
    } else {
        "panicked".to_string()
    }
}

/// Execution engine: runs validation tasks on a fixed-size worker pool and
/// merges their results.
pub struct Linter {
    pool: rayon::ThreadPool,
}

impl Linter {
    /// Create an engine sized to the available parallelism
    pub fn new() -> Result<Self, Error> {
        Self::with_jobs(0)
    }

    /// Create an engine with `jobs` workers; 0 picks the available parallelism
    pub fn with_jobs(jobs: usize) -> Result<Self, Error> {
        let jobs = if jobs == 0 { default_jobs() } else { jobs };
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .thread_name(|i| format!("jxlint-worker-{i}"))
            .build()
            .map_err(|e| Error::ThreadPool {
                message: e.to_string(),
            })?;
        Ok(Self { pool })
    }

    /// Number of worker threads
    pub fn jobs(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Run every rule against `source_dir` and collect the results.
    ///
    /// All tasks finish before anything is merged. The merged violations are
    /// sorted by file then line; violations at the same location keep the
    /// order of `rules` and then each rule's own order, so the output does
    /// not depend on which task finished first.
    pub fn lint(&self, rules: &[&Rule], source_dir: &Path) -> LintReport {
        debug!(rules = rules.len(), jobs = self.jobs(), "starting validation");

        let outcomes: Vec<TaskOutcome> = self.pool.install(|| {
            rules
                .par_iter()
                .map(|rule| ValidationTask::new(rule, source_dir).run())
                .collect()
        });

        let report = merge_outcomes(outcomes);
        info!(
            violations = report.violations.len(),
            failures = report.failures.len(),
            "validation finished"
        );
        report
    }
}

fn default_jobs() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

fn merge_outcomes(outcomes: Vec<TaskOutcome>) -> LintReport {
    let mut report = LintReport::default();
    for outcome in outcomes {
        report.violations.extend(outcome.violations);
        report.failures.extend(outcome.failures);
        report.profiles.push(outcome.profile);
    }
    sort_violations(&mut report.violations);
    report.severity_counts = SeverityCounts::from_violations(&report.violations);
    report
}
