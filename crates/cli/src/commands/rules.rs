use crate::ListFormat;
use anyhow::Result;
use colored::Colorize;
use openapi_linter::{document_rules, LintSeverity};

/// List every registered rule
pub fn run(format: ListFormat) -> Result<()> {
    let mut rules: Vec<_> = document_rules().iter().collect();
    rules.sort_by_key(|rule| rule.name());

    match format {
        ListFormat::Human => {
            for rule in rules {
                let severity = LintSeverity::from(rule.default_severity());
                println!(
                    "{} {}",
                    rule.name().bold(),
                    format!("({severity})").dimmed()
                );
                println!("  {}", rule.description());
            }
        }
        ListFormat::Json => {
            let rules: Vec<_> = rules
                .iter()
                .map(|rule| {
                    serde_json::json!({
                        "name": rule.name(),
                        "description": rule.description(),
                        "default_severity": LintSeverity::from(rule.default_severity()),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rules)?);
        }
    }

    Ok(())
}
