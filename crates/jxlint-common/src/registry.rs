//! The rule catalog and its selection queries.
//!
//! [`RuleRegistry`] keeps rules in registration order. Every query borrows
//! from the catalog and returns rules in catalog order unless documented
//! otherwise. Batch queries silently skip names they do not know; only the
//! single-name lookups ([`RuleRegistry::get_lint_rule`],
//! [`RuleRegistry::resolve_or_fail`]) report [`Error::UnknownRule`].

use crate::error::Error;
use crate::linter::{LintRule, Rule, Severity};
use std::path::{Path, PathBuf};

/// Catalog of every known rule plus the source root they run against
#[derive(Debug, Default)]
pub struct RuleRegistry {
    rules: Vec<Rule>,
    source_directory: Option<PathBuf>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a rule. Names must be unique, compared case-insensitively.
    pub fn register<R: LintRule + 'static>(&mut self, rule: R) -> Result<(), Error> {
        self.register_rule(Rule::new(rule))
    }

    pub fn register_rule(&mut self, rule: Rule) -> Result<(), Error> {
        if self.rules.contains(&rule) {
            return Err(Error::DuplicateRule {
                name: rule.name().to_string(),
            });
        }
        self.rules.push(rule);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Look up one rule by name
    pub fn get_lint_rule(&self, name: &str) -> Result<&Rule, Error> {
        self.rules
            .iter()
            .find(|rule| rule.matches_name(name))
            .ok_or_else(|| Error::unknown_rule(name))
    }

    /// Toggle a rule's enabled flag. Only meant to be called before a run.
    pub fn set_rule_enabled(&mut self, name: &str, enabled: bool) -> Result<(), Error> {
        let rule = self
            .rules
            .iter_mut()
            .find(|rule| rule.matches_name(name))
            .ok_or_else(|| Error::unknown_rule(name))?;
        rule.set_enabled(enabled);
        Ok(())
    }

    pub fn all_rules(&self) -> Vec<&Rule> {
        self.rules.iter().collect()
    }

    pub fn all_enabled_rules(&self) -> Vec<&Rule> {
        self.rules.iter().filter(|rule| rule.is_enabled()).collect()
    }

    /// Every rule not named in `names`; unknown names are ignored
    pub fn all_rules_except<S: AsRef<str>>(&self, names: &[S]) -> Vec<&Rule> {
        self.rules
            .iter()
            .filter(|rule| !rule.has_name_in(names))
            .collect()
    }

    pub fn all_enabled_rules_except<S: AsRef<str>>(&self, names: &[S]) -> Vec<&Rule> {
        self.rules
            .iter()
            .filter(|rule| rule.is_enabled() && !rule.has_name_in(names))
            .collect()
    }

    /// Enabled rules, followed by any rule named in `names` that is not
    /// already included, in `names` order.
    pub fn all_enabled_rules_as_well_as<S: AsRef<str>>(&self, names: &[S]) -> Vec<&Rule> {
        let mut rules = self.all_enabled_rules();
        for rule in self.only_rules(names) {
            if !rules.contains(&rule) {
                rules.push(rule);
            }
        }
        rules
    }

    /// Exactly the rules named, in `names` order, whatever their enabled
    /// state. Unknown names are skipped; a name given twice yields its rule once.
    pub fn only_rules<S: AsRef<str>>(&self, names: &[S]) -> Vec<&Rule> {
        let mut rules: Vec<&Rule> = Vec::with_capacity(names.len());
        for name in names {
            if let Ok(rule) = self.get_lint_rule(name.as_ref()) {
                if !rules.contains(&rule) {
                    rules.push(rule);
                }
            }
        }
        rules
    }

    /// Rules whose severity is exactly `severity`
    pub fn all_rules_with_severity(&self, severity: Severity) -> Vec<&Rule> {
        self.rules
            .iter()
            .filter(|rule| rule.severity() == severity)
            .collect()
    }

    /// Rules in any of the named categories; unknown categories match nothing
    pub fn rules_with_category_names<S: AsRef<str>>(&self, category_names: &[S]) -> Vec<&Rule> {
        self.rules
            .iter()
            .filter(|rule| {
                let category = rule.category();
                category_names
                    .iter()
                    .any(|name| category.matches_name(name.as_ref()))
            })
            .collect()
    }

    /// Resolve every name or fail on the first unknown one.
    pub fn resolve_or_fail<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<&Rule>, Error> {
        let mut rules: Vec<&Rule> = Vec::with_capacity(names.len());
        for name in names {
            let rule = self.get_lint_rule(name.as_ref())?;
            if !rules.contains(&rule) {
                rules.push(rule);
            }
        }
        Ok(rules)
    }

    /// Resolve what can be resolved, dropping unknown names.
    pub fn resolve_best_effort<S: AsRef<str>>(&self, names: &[S]) -> Vec<&Rule> {
        self.only_rules(names)
    }

    /// Split a comma-separated rule list ("Rule1, Rule2") and check that every
    /// entry names a registered rule. Blank entries are dropped.
    pub fn parse_rule_list(&self, raw: &str) -> Result<Vec<String>, Error> {
        let names = split_list(raw);
        self.resolve_or_fail(&names)?;
        Ok(names)
    }

    pub fn set_source_directory(&mut self, path: impl Into<PathBuf>) {
        self.source_directory = Some(path.into());
    }

    pub fn source_directory(&self) -> Option<&Path> {
        self.source_directory.as_deref()
    }
}

/// Split a comma-separated option value, trimming entries and dropping empty ones
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RuleError;
    use crate::linter::{Category, Violation};
    use std::collections::HashSet;

    struct MockRule {
        name: &'static str,
        severity: Severity,
        category: Category,
        enabled: bool,
    }

    impl LintRule for MockRule {
        fn name(&self) -> &str {
            self.name
        }
        fn summary(&self) -> &str {
            "A mock rule for testing"
        }
        fn detailed_description(&self) -> &str {
            "Does nothing."
        }
        fn severity(&self) -> Severity {
            self.severity
        }
        fn category(&self) -> Category {
            self.category.clone()
        }
        fn enabled_by_default(&self) -> bool {
            self.enabled
        }
        fn files_to_validate(&self, _source_dir: &Path) -> Result<Vec<PathBuf>, RuleError> {
            Ok(Vec::new())
        }
        fn lint_error(&self, _file: &Path) -> Result<Option<Violation>, RuleError> {
            Ok(None)
        }
    }

    fn mock(name: &'static str, severity: Severity, category: Category, enabled: bool) -> MockRule {
        MockRule {
            name,
            severity,
            category,
            enabled,
        }
    }

    fn xml_registry() -> RuleRegistry {
        let mut registry = RuleRegistry::new();
        registry
            .register(mock("XML version specified", Severity::Warning, Category::LINT, false))
            .unwrap();
        registry
            .register(mock("Unique attribute", Severity::Warning, Category::LINT, true))
            .unwrap();
        registry
            .register(mock("Author tag", Severity::Error, Category::STYLE, true))
            .unwrap();
        registry
            .register(mock("Encoding", Severity::Fatal, Category::DEFAULT, true))
            .unwrap();
        registry
    }

    fn names(rules: &[&Rule]) -> Vec<String> {
        rules.iter().map(|r| r.name().to_string()).collect()
    }

    #[test]
    fn test_all_rules_in_registration_order() {
        let registry = xml_registry();
        assert_eq!(registry.len(), 4);
        assert_eq!(
            names(&registry.all_rules()),
            vec!["XML version specified", "Unique attribute", "Author tag", "Encoding"]
        );
    }

    #[test]
    fn test_all_enabled_rules() {
        let registry = xml_registry();
        assert_eq!(
            names(&registry.all_enabled_rules()),
            vec!["Unique attribute", "Author tag", "Encoding"]
        );
    }

    #[test]
    fn test_enabled_and_disabled_partition_all_rules() {
        let registry = xml_registry();
        let enabled: HashSet<&Rule> = registry.all_enabled_rules().into_iter().collect();
        let disabled: HashSet<&Rule> = registry
            .all_rules()
            .into_iter()
            .filter(|r| !r.is_enabled())
            .collect();
        let all: HashSet<&Rule> = registry.all_rules().into_iter().collect();

        assert!(enabled.is_disjoint(&disabled));
        assert_eq!(enabled.union(&disabled).count(), all.len());
    }

    #[test]
    fn test_all_rules_except() {
        let registry = xml_registry();
        assert_eq!(registry.all_rules_except(&["XML version specified"]).len(), 3);
        assert_eq!(registry.all_rules_except(&["xml VERSION specified"]).len(), 3);
        assert_eq!(registry.all_rules_except(&["nonexistent"]).len(), 4);
    }

    #[test]
    fn test_all_enabled_rules_except() {
        let registry = xml_registry();
        assert_eq!(
            names(&registry.all_enabled_rules_except(&["Unique attribute"])),
            vec!["Author tag", "Encoding"]
        );
    }

    #[test]
    fn test_all_enabled_rules_as_well_as() {
        let registry = xml_registry();
        let rules = registry.all_enabled_rules_as_well_as(&["XML version specified"]);
        assert_eq!(
            names(&rules),
            vec!["Unique attribute", "Author tag", "Encoding", "XML version specified"]
        );
    }

    #[test]
    fn test_as_well_as_collapses_duplicates() {
        let registry = xml_registry();
        let rules = registry.all_enabled_rules_as_well_as(&["encoding", "Encoding", "Author tag"]);
        assert_eq!(rules.len(), 3);
    }

    #[test]
    fn test_unknown_names_are_ignored_by_batch_queries() {
        let registry = xml_registry();
        let bad = ["foo", "foobar", "bar"];

        assert!(registry.only_rules(&["nonexistent"]).is_empty());
        assert!(registry.only_rules(&bad).is_empty());
        assert_eq!(
            registry.all_enabled_rules_as_well_as(&bad),
            registry.all_enabled_rules()
        );
    }

    #[test]
    fn test_only_rules_preserves_argument_order() {
        let registry = xml_registry();
        let rules = registry.only_rules(&["Encoding", "missing", "XML version specified"]);
        assert_eq!(names(&rules), vec!["Encoding", "XML version specified"]);
    }

    #[test]
    fn test_all_rules_with_severity_is_exact() {
        let registry = xml_registry();
        assert_eq!(registry.all_rules_with_severity(Severity::Warning).len(), 2);
        assert_eq!(registry.all_rules_with_severity(Severity::Error).len(), 1);
        assert_eq!(registry.all_rules_with_severity(Severity::Fatal).len(), 1);
        assert!(
            registry
                .all_rules_with_severity(Severity::Error)
                .iter()
                .all(|r| r.severity() == Severity::Error)
        );
    }

    #[test]
    fn test_rules_with_category_names() {
        let registry = xml_registry();
        assert_eq!(registry.rules_with_category_names(&["LINT"]).len(), 2);
        assert_eq!(registry.rules_with_category_names(&["lint", "style"]).len(), 3);
        assert!(registry.rules_with_category_names(&["hoo", "haw"]).is_empty());
        assert!(registry.rules_with_category_names::<&str>(&[]).is_empty());
    }

    #[test]
    fn test_get_lint_rule() {
        let registry = xml_registry();
        assert_eq!(registry.get_lint_rule("author TAG").unwrap().name(), "Author tag");

        let err = registry.get_lint_rule("nope").unwrap_err();
        assert!(matches!(err, Error::UnknownRule { ref name } if name == "nope"));
    }

    #[test]
    fn test_resolve_or_fail_vs_best_effort() {
        let registry = xml_registry();
        assert!(registry.resolve_or_fail(&["Encoding", "nope"]).is_err());
        assert_eq!(registry.resolve_best_effort(&["Encoding", "nope"]).len(), 1);
        assert_eq!(registry.resolve_or_fail(&["Encoding", "Author tag"]).unwrap().len(), 2);
    }

    #[test]
    fn test_parse_rule_list() {
        let registry = xml_registry();
        let names = registry.parse_rule_list(" Encoding, ,Author tag ,").unwrap();
        assert_eq!(names, vec!["Encoding", "Author tag"]);

        let err = registry.parse_rule_list("Encoding,Bogus").unwrap_err();
        assert_eq!(err.to_string(), "'Bogus' is not a valid rule.");
    }

    #[test]
    fn test_duplicate_registration_is_rejected() {
        let mut registry = xml_registry();
        let err = registry
            .register(mock("ENCODING", Severity::Warning, Category::LINT, true))
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateRule { .. }));
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_set_rule_enabled() {
        let mut registry = xml_registry();
        registry.set_rule_enabled("xml version specified", true).unwrap();
        registry.set_rule_enabled("Encoding", false).unwrap();
        assert_eq!(
            names(&registry.all_enabled_rules()),
            vec!["XML version specified", "Unique attribute", "Author tag"]
        );
        assert!(registry.set_rule_enabled("nope", true).is_err());
    }

    #[test]
    fn test_source_directory() {
        let mut registry = RuleRegistry::new();
        assert!(registry.source_directory().is_none());
        registry.set_source_directory("/tmp/project");
        assert_eq!(registry.source_directory(), Some(Path::new("/tmp/project")));
    }
}
