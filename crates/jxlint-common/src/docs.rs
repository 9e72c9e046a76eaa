//! Rule documentation rendering
//!
//! Plain-text forms used by `jxlint rules` and the Markdown rule report.

use crate::linter::Rule;

/// One-line summary: `"Name" : summary`, with a `*` after the name when the
/// rule is disabled.
pub fn summary_output(rule: &Rule) -> String {
    format!(
        "\"{}\"{} : {}",
        rule.name(),
        if rule.is_enabled() { "" } else { "*" },
        rule.summary()
    )
}

/// Full description of a rule
pub fn detailed_output(rule: &Rule) -> String {
    let lines = [
        rule.name().to_string(),
        "-".repeat(rule.name().chars().count()),
        format!("Summary: {}", rule.summary()),
        if rule.is_enabled() {
            String::new()
        } else {
            "\n** Disabled by default **\n".to_string()
        },
        format!("Severity: {}", rule.severity().happy_name()),
        format!("Category: {}", rule.category().happy_name()),
        String::new(),
        rule.detailed_description().to_string(),
    ];
    lines.join("\n")
}

/// Markdown document describing every rule in `rules`
pub fn markdown_rule_report(program: &str, version: &str, rules: &[&Rule]) -> String {
    let mut out = String::new();
    out.push_str(&underline(&format!("Rules for {program} - {version}"), '='));
    out.push_str("\n\n");

    for (i, rule) in rules.iter().enumerate() {
        out.push_str(&markdown_section(rule));
        out.push('\n');
        if i + 1 < rules.len() {
            out.push_str("<hr>");
        }
        out.push_str("\n\n");
    }

    out
}

fn markdown_section(rule: &Rule) -> String {
    let mut out = underline(rule.name(), '-');
    out.push('\n');
    out.push_str(&format!("**Summary** : {}\n\n", rule.summary()));
    out.push_str(&format!("**Category** : {}\n\n", rule.category()));
    out.push_str(&format!("**Severity** : {}\n\n", rule.severity()));
    out.push_str(&format!(
        "**Enabled by default?** : {}\n\n",
        if rule.is_enabled() { "yes" } else { "no" }
    ));
    out.push_str("\n**Detailed description** :\n\n");

    for line in rule.detailed_description().lines() {
        out.push_str("    ");
        out.push_str(line);
        out.push('\n');
    }

    out
}

fn underline(text: &str, ch: char) -> String {
    let rule: String = std::iter::repeat_n(ch, text.chars().count()).collect();
    format!("{text}\n{rule}")
}
