use crate::output::{print_json, print_table};
use crate::root::require_initialized;
use levit_core::issue::{IssueType, ValidationIssue};
use levit_core::validate;
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    require_initialized(root)?;

    let result = validate::validate(root)?;

    if json {
        print_json(&result)?;
    } else {
        let errors: Vec<&ValidationIssue> = result
            .issues
            .iter()
            .filter(|i| i.issue_type == IssueType::Error)
            .collect();
        let warnings: Vec<&ValidationIssue> = result
            .issues
            .iter()
            .filter(|i| i.issue_type == IssueType::Warning)
            .collect();

        if !errors.is_empty() {
            println!("Errors:");
            print_issue_table(&errors);
            println!();
        }
        if !warnings.is_empty() {
            println!("Warnings:");
            print_issue_table(&warnings);
            println!();
        }

        if result.valid {
            if result.metrics.warnings > 0 {
                println!(
                    "Validation passed with {} warning(s). ({} files scanned)",
                    result.metrics.warnings, result.metrics.files_scanned
                );
            } else {
                println!(
                    "All cognitive scaffolding checks passed. ({} files scanned)",
                    result.metrics.files_scanned
                );
            }
        }
    }

    if !result.valid {
        anyhow::bail!("validation failed with {} error(s)", result.metrics.errors);
    }
    Ok(())
}

fn print_issue_table(issues: &[&ValidationIssue]) {
    let rows: Vec<Vec<String>> = issues
        .iter()
        .map(|i| {
            vec![
                i.issue_type.to_string(),
                i.code.to_string(),
                i.message.clone(),
                i.file.clone().unwrap_or_default(),
            ]
        })
        .collect();
    print_table(&["TYPE", "CODE", "MESSAGE", "FILE"], rows);
}
