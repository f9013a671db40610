//! List rules command implementation.

use anyhow::Result;

use crate::config_resolver::ConfigSource;

/// Runs the list-rules command.
pub fn run(source: &ConfigSource) -> Result<()> {
    let rules = source.load_rules()?;

    match source.path() {
        Some(p) => println!("Rules from {}:\n", p.display()),
        None => println!("No configuration found, using defaults.\n"),
    }

    if rules.rules().is_empty() {
        println!("  (no rules)");
    } else {
        println!("{:<8} {:<40} Dependency", "Severity", "Dependent");
        println!("{}", "-".repeat(80));
        for rule in rules.rules() {
            println!(
                "{:<8} {:<40} {}",
                rule.severity().as_str(),
                rule.dependent(),
                rule.dependency()
            );
        }
    }

    println!(
        "\nDependencies no rule covers are judged {}.",
        rules.default_severity()
    );
    println!("\nThe most specific rule wins; `*` applies when no package or type rule matches.");

    Ok(())
}
