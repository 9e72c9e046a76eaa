use crate::error::RuleError;
use serde::{Serialize, Serializer};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Impact of a violation, ordered `Warning < Error < Fatal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Warning,
    Error,
    Fatal,
}

impl Severity {
    /// Every severity, lowest first
    pub const ALL: [Severity; 3] = [Severity::Warning, Severity::Error, Severity::Fatal];

    /// Title-cased name used in rule documentation ("Warning", "Error", "Fatal")
    pub fn happy_name(self) -> &'static str {
        match self {
            Severity::Warning => "Warning",
            Severity::Error => "Error",
            Severity::Fatal => "Fatal",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "WARNING"),
            Severity::Error => write!(f, "ERROR"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Compare two names the way rule and category lookups do: case-insensitively.
pub fn names_match(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

fn hash_name<H: Hasher>(name: &str, state: &mut H) {
    for c in name.chars().flat_map(char::to_lowercase) {
        c.hash(state);
    }
}

/// Topic a rule belongs to.
///
/// Categories are an open set identified by their display name. Two
/// categories are equal when their names match case-insensitively, so
/// `Category::new("lint") == Category::LINT`.
#[derive(Debug, Clone)]
pub struct Category(Cow<'static, str>);

impl Category {
    pub const DEFAULT: Category = Category(Cow::Borrowed("DEFAULT"));
    pub const LINT: Category = Category(Cow::Borrowed("LINT"));
    pub const STYLE: Category = Category(Cow::Borrowed("STYLE"));
    pub const PERFORMANCE: Category = Category(Cow::Borrowed("PERFORMANCE"));
    pub const SECURITY: Category = Category(Cow::Borrowed("SECURITY"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn matches_name(&self, name: &str) -> bool {
        names_match(&self.0, name)
    }

    /// Title-cased name, underscores read as spaces ("BEST_PRACTICE" -> "Best practice")
    pub fn happy_name(&self) -> String {
        let lowered = self.0.replace('_', " ").to_lowercase();
        let mut chars = lowered.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl PartialEq for Category {
    fn eq(&self, other: &Self) -> bool {
        names_match(&self.0, &other.0)
    }
}

impl Eq for Category {}

impl Hash for Category {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_name(&self.0, state);
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// One detected problem: which rule, where, and what.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub rule: String,
    pub category: Category,
    pub severity: Severity,
    pub file: PathBuf,
    /// 1-indexed line, `None` when the problem concerns the whole file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    pub message: String,
}

impl Violation {
    pub fn new<R: LintRule + ?Sized>(
        rule: &R,
        file: impl Into<PathBuf>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule: rule.name().to_string(),
            category: rule.category(),
            severity: rule.severity(),
            file: file.into(),
            line: None,
            message: message.into(),
        }
    }

    /// Attach a line number; 0 means "not applicable" and leaves the line unset.
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = (line > 0).then_some(line);
        self
    }

    /// Line number with 0 standing in for "no line"
    pub fn line_number(&self) -> usize {
        self.line.unwrap_or(0)
    }

    /// File path (byte-wise), then line number.
    pub fn cmp_location(&self, other: &Self) -> Ordering {
        self.file
            .as_os_str()
            .cmp(other.file.as_os_str())
            .then_with(|| self.line_number().cmp(&other.line_number()))
    }
}

/// Sort violations by file then line. The sort is stable: violations at the
/// same location keep their relative order.
pub fn sort_violations(violations: &mut [Violation]) {
    violations.sort_by(Violation::cmp_location);
}

/// A checkable condition over files in a source tree.
///
/// Implementations are stateless: evaluating a file hands the violation
/// straight back instead of accumulating it on the rule, so one rule value
/// can be shared by concurrent runs.
pub trait LintRule: Send + Sync {
    fn name(&self) -> &str;
    fn summary(&self) -> &str;
    fn detailed_description(&self) -> &str;
    fn severity(&self) -> Severity;
    fn category(&self) -> Category;

    fn enabled_by_default(&self) -> bool {
        true
    }

    /// Files under `source_dir` this rule wants to look at
    fn files_to_validate(&self, source_dir: &Path) -> Result<Vec<PathBuf>, RuleError>;

    /// Evaluate a single file, returning the violation it exhibits, if any
    fn lint_error(&self, file: &Path) -> Result<Option<Violation>, RuleError>;

    fn passes_validation(&self, file: &Path) -> Result<bool, RuleError> {
        Ok(self.lint_error(file)?.is_none())
    }
}

/// A registered rule: the shared check plus its mutable enabled flag.
///
/// Identity is the rule name compared case-insensitively; two handles with
/// the same name are the same rule regardless of their enabled state.
#[derive(Clone)]
pub struct Rule {
    check: Arc<dyn LintRule>,
    enabled: bool,
}

impl Rule {
    pub fn new<R: LintRule + 'static>(rule: R) -> Self {
        Self::from_arc(Arc::new(rule))
    }

    pub fn from_arc(check: Arc<dyn LintRule>) -> Self {
        let enabled = check.enabled_by_default();
        Self { check, enabled }
    }

    pub fn name(&self) -> &str {
        self.check.name()
    }

    pub fn summary(&self) -> &str {
        self.check.summary()
    }

    pub fn detailed_description(&self) -> &str {
        self.check.detailed_description()
    }

    pub fn severity(&self) -> Severity {
        self.check.severity()
    }

    pub fn category(&self) -> Category {
        self.check.category()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn matches_name(&self, name: &str) -> bool {
        names_match(self.name(), name)
    }

    /// Whether any of `names` refers to this rule
    pub fn has_name_in<S: AsRef<str>>(&self, names: &[S]) -> bool {
        names.iter().any(|n| self.matches_name(n.as_ref()))
    }

    pub fn check(&self) -> &dyn LintRule {
        self.check.as_ref()
    }

    pub fn files_to_validate(&self, source_dir: &Path) -> Result<Vec<PathBuf>, RuleError> {
        self.check.files_to_validate(source_dir)
    }

    pub fn lint_error(&self, file: &Path) -> Result<Option<Violation>, RuleError> {
        self.check.lint_error(file)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name())
            .field("severity", &self.severity())
            .field("category", &self.category())
            .field("enabled", &self.enabled)
            .finish()
    }
}

impl PartialEq for Rule {
    fn eq(&self, other: &Self) -> bool {
        names_match(self.name(), other.name())
    }
}

impl Eq for Rule {}

impl Hash for Rule {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_name(self.name(), state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct Named(&'static str);

    impl LintRule for Named {
        fn name(&self) -> &str {
            self.0
        }
        fn summary(&self) -> &str {
            "summary"
        }
        fn detailed_description(&self) -> &str {
            "details"
        }
        fn severity(&self) -> Severity {
            Severity::Warning
        }
        fn category(&self) -> Category {
            Category::LINT
        }
        fn files_to_validate(&self, _source_dir: &Path) -> Result<Vec<PathBuf>, RuleError> {
            Ok(Vec::new())
        }
        fn lint_error(&self, file: &Path) -> Result<Option<Violation>, RuleError> {
            Ok(Some(Violation::new(self, file, "bad")))
        }
    }

    fn violation(file: &str, line: usize, message: &str) -> Violation {
        Violation::new(&Named("rule"), file, message).with_line(line)
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Warning < Severity::Error);
        assert!(Severity::Error < Severity::Fatal);
        assert_eq!(Severity::ALL.iter().max(), Some(&Severity::Fatal));
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::Warning.to_string(), "WARNING");
        assert_eq!(Severity::Fatal.to_string(), "FATAL");
        assert_eq!(Severity::Error.happy_name(), "Error");
    }

    #[test]
    fn test_category_is_case_insensitive() {
        assert_eq!(Category::new("lint"), Category::LINT);
        assert!(Category::STYLE.matches_name("Style"));
        assert!(!Category::STYLE.matches_name("lint"));

        let set: HashSet<Category> = [Category::new("Lint"), Category::LINT].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_category_happy_name() {
        assert_eq!(Category::LINT.happy_name(), "Lint");
        assert_eq!(Category::new("BEST_PRACTICE").happy_name(), "Best practice");
        assert_eq!(Category::new("").happy_name(), "");
    }

    #[test]
    fn test_names_match() {
        assert!(names_match("Author tag", "AUTHOR TAG"));
        assert!(names_match("Ärger", "ärger"));
        assert!(!names_match("Author tag", "Author"));
    }

    #[test]
    fn test_rule_identity_ignores_case_and_enabled_flag() {
        let a = Rule::new(Named("Unique attribute"));
        let mut b = Rule::new(Named("unique ATTRIBUTE"));
        b.set_enabled(false);

        assert_eq!(a, b);
        assert!(a.matches_name("UNIQUE attribute"));
        assert!(!a.matches_name("Unique"));
        assert_ne!(a, Rule::new(Named("Encoding")));

        let set: HashSet<Rule> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_rule_has_name_in() {
        let rule = Rule::new(Named("Encoding"));
        assert!(rule.has_name_in(&["foo", "encoding"]));
        assert!(!rule.has_name_in::<&str>(&[]));
    }

    #[test]
    fn test_violation_from_rule() {
        let rule = Named("Encoding");
        let v = rule.lint_error(Path::new("a.xml")).unwrap().unwrap();
        assert_eq!(v.rule, "Encoding");
        assert_eq!(v.category, Category::LINT);
        assert_eq!(v.severity, Severity::Warning);
        assert_eq!(v.line, None);
        assert_eq!(v.line_number(), 0);
        assert!(!rule.passes_validation(Path::new("a.xml")).unwrap());
    }

    #[test]
    fn test_with_line_zero_means_no_line() {
        assert_eq!(violation("a.xml", 0, "m").line, None);
        assert_eq!(violation("a.xml", 3, "m").line, Some(3));
    }

    #[test]
    fn test_sort_by_file_then_line() {
        let mut violations = vec![
            violation("b.xml", 5, "b5"),
            violation("a.xml", 1, "a1"),
            violation("a.xml", 2, "a2"),
        ];
        sort_violations(&mut violations);

        let order: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        assert_eq!(order, vec!["a1", "a2", "b5"]);
    }

    #[test]
    fn test_sort_is_stable_for_same_location() {
        let mut violations = vec![
            violation("a.xml", 4, "first"),
            violation("a.xml", 0, "whole-file"),
            violation("a.xml", 4, "second"),
        ];
        sort_violations(&mut violations);

        let order: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        assert_eq!(order, vec!["whole-file", "first", "second"]);
    }
}
