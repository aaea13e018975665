//! Terminal and JSON presentation of run results.

use crate::core::bootstrap::InitReport;
use crate::core::dispatch::{Outcome, RunReport, Status};
use crate::core::paths::MounterPaths;
use crate::core::synth;
use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Color, Table};

pub fn print_init(paths: &MounterPaths, report: &InitReport) {
    if report.created.is_empty() {
        println!("Nothing to create; configuration is {}", paths.config.display());
        return;
    }
    for path in &report.created {
        println!("Created {}", path.display());
    }
    println!("Add your containers to {}", paths.config.display());
}

pub fn print_show(names: &[String], json: bool) -> Result<()> {
    if json {
        let out = serde_json::json!({ "profiles": names });
        println!(
            "{}",
            serde_json::to_string_pretty(&out).context("serialize profile list")?
        );
        return Ok(());
    }
    if names.is_empty() {
        println!("No containers configured");
        return Ok(());
    }
    println!("Configured containers:");
    for name in names {
        println!("  - {}", name);
    }
    Ok(())
}

pub fn print_run(report: &RunReport, program: &str, json: bool) -> Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(report).context("serialize run report")?
        );
        return Ok(());
    }

    if report.outcomes.is_empty() {
        println!("No containers to process");
        return Ok(());
    }

    let dry_run = report.outcomes.iter().any(|o| o.dry_run);
    if dry_run {
        for outcome in &report.outcomes {
            println!("####### {} #######", outcome.profile);
            println!("{}", synth::render_command(program, &outcome.args));
            println!();
        }
    }

    println!("{}", outcome_table(&report.outcomes));

    let failures = report.failures();
    println!(
        "\n{} succeeded, {} failed",
        report.outcomes.len() - failures,
        failures
    );
    if dry_run {
        println!("No changes made (dry-run).");
    }
    Ok(())
}

fn outcome_table(outcomes: &[Outcome]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        Cell::new("Container").add_attribute(Attribute::Bold),
        Cell::new("Mode").add_attribute(Attribute::Bold),
        Cell::new("Status").add_attribute(Attribute::Bold),
        Cell::new("Detail").add_attribute(Attribute::Bold),
    ]);

    for outcome in outcomes {
        let status = match outcome.status {
            Status::Success => Cell::new("OK").fg(Color::Green),
            Status::Failure => Cell::new("FAIL").fg(Color::Red),
        };
        table.add_row(vec![
            Cell::new(&outcome.profile),
            Cell::new(outcome.mode.to_string()),
            status,
            Cell::new(outcome.detail()),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::request::Mode;

    fn outcome(name: &str, status: Status) -> Outcome {
        Outcome {
            profile: name.to_string(),
            mode: Mode::Mount,
            status,
            dry_run: false,
            args: vec!["/q".to_string()],
            attempts: 2,
            exit_code: Some(if status == Status::Success { 0 } else { 1 }),
            error: None,
        }
    }

    #[test]
    fn test_outcome_table_rows() {
        let rendered = outcome_table(&[
            outcome("Foo", Status::Success),
            outcome("Bar", Status::Failure),
        ])
        .to_string();
        assert!(rendered.contains("Foo"));
        assert!(rendered.contains("FAIL"));
        assert!(rendered.contains("exit code 0 after 2 attempts"));
    }
}
