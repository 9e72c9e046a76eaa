//! Turning command-line style options into the ordered list of rules to run.

use jxlint_common::{Error, Rule, RuleRegistry, Severity};

/// Which rules a run should include
#[derive(Debug, Clone, Default)]
pub struct RuleSelection {
    /// Run exactly these rules and ignore everything else
    pub check: Option<Vec<String>>,
    /// Start from every rule, including those disabled by default
    pub all_warnings: bool,
    /// Start from ERROR and FATAL rules only
    pub no_warnings: bool,
    /// Rules added on top of the starting set
    pub enable: Vec<String>,
    /// Rules removed from the starting set
    pub disable: Vec<String>,
    /// Keep only rules in these categories
    pub categories: Vec<String>,
}

/// Pick the rules to run.
///
/// Every explicitly named rule must exist, otherwise nothing is selected and
/// [`Error::UnknownRule`] is returned. `check` short-circuits the rest of
/// the policy. Otherwise the enabled rules are the starting set (widened by
/// `all_warnings`, or narrowed by `no_warnings`), `disable` is removed,
/// `enable` is appended and `categories` filters the result.
pub fn select_rules<'r>(
    registry: &'r RuleRegistry,
    selection: &RuleSelection,
) -> Result<Vec<&'r Rule>, Error> {
    if let Some(check) = &selection.check {
        registry.resolve_or_fail(check)?;
    }
    registry.resolve_or_fail(&selection.disable)?;
    registry.resolve_or_fail(&selection.enable)?;

    if let Some(check) = &selection.check {
        return Ok(registry.only_rules(check));
    }

    let mut rules = if selection.all_warnings {
        registry.all_rules()
    } else if selection.no_warnings {
        let mut rules = registry.all_rules_with_severity(Severity::Error);
        rules.extend(registry.all_rules_with_severity(Severity::Fatal));
        rules
    } else {
        registry.all_enabled_rules()
    };

    rules.retain(|rule| !rule.has_name_in(&selection.disable));

    for rule in registry.only_rules(&selection.enable) {
        if !rules.contains(&rule) {
            rules.push(rule);
        }
    }

    if !selection.categories.is_empty() {
        let in_categories = registry.rules_with_category_names(&selection.categories);
        rules.retain(|rule| in_categories.contains(rule));
    }

    Ok(rules)
}
