pub mod xml;

pub use xml::{AuthorTag, Encoding, UniqueAttribute, XmlVersionSpecified};

use jxlint_common::{Rule, RuleRegistry};

/// The built-in rules, in catalog order
pub fn builtin_rules() -> Vec<Rule> {
    vec![
        Rule::new(XmlVersionSpecified),
        Rule::new(UniqueAttribute),
        Rule::new(AuthorTag),
        Rule::new(Encoding),
    ]
}

/// A registry holding every built-in rule
pub fn builtin_registry() -> RuleRegistry {
    let mut registry = RuleRegistry::new();
    for rule in builtin_rules() {
        if let Err(e) = registry.register_rule(rule) {
            tracing::error!("{}", e);
        }
    }
    registry
}
