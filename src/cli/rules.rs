use colored::Colorize;
use jxlint::docs::{detailed_output, markdown_rule_report, summary_output};
use jxlint::{Rule, RuleRegistry};
use std::process::ExitCode;

pub fn run_rules(registry: &RuleRegistry, names: &[String], list: bool, markdown: bool) -> ExitCode {
    if markdown {
        print!(
            "{}",
            markdown_rule_report(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"), &registry.all_rules())
        );
        return ExitCode::SUCCESS;
    }

    if registry.is_empty() {
        println!("There are no rules defined.");
        return ExitCode::SUCCESS;
    }

    let rules: Vec<&Rule> = if names.is_empty() {
        registry.all_rules()
    } else {
        match registry.resolve_or_fail(names) {
            Ok(rules) => rules,
            Err(e) => {
                eprintln!("{} {}", "Error:".red().bold(), e);
                eprintln!();
                eprintln!(
                    "Use {} to see all available rules.",
                    "jxlint rules --list".cyan()
                );
                return ExitCode::from(2);
            }
        }
    };

    if list {
        for rule in &rules {
            println!("{}", summary_output(rule));
        }
        return ExitCode::SUCCESS;
    }

    if names.is_empty() {
        let count = rules.len();
        println!(
            "There {} {} rule{}.\n",
            if count == 1 { "is" } else { "are" },
            count,
            if count == 1 { "" } else { "s" }
        );
    }
    let details: Vec<String> = rules.iter().map(|rule| detailed_output(rule)).collect();
    println!("{}", details.join("\n\n"));
    ExitCode::SUCCESS
}
