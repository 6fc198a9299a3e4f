//! CLI command handling
//!
//! Dispatches CLI commands to the dispatcher and formats output.

use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use crate::catalog::{self, Category, Operation, CATALOG};
use crate::commands::Commands;
use crate::common::config::Config;
use crate::common::{Error, Result};
use crate::dispatcher::{Dispatcher, Outcome, RunReport};
use crate::testing;

/// Dispatch a CLI command
pub async fn dispatch(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::List => {
            print_catalog();
            Ok(())
        }

        Commands::Run { names, all } => {
            let operations: Vec<&'static Operation> = if all {
                CATALOG.iter().collect()
            } else {
                resolve(&names)?
            };

            let dispatcher = Dispatcher::from_config(config)?;
            let mut failed = 0;
            for operation in operations {
                let report = run_with_spinner(&dispatcher, operation).await;
                if report.outcome != Outcome::Success {
                    failed += 1;
                }
                print_report(operation, &report);
                println!("{}", "Last Result:".bold());
                println!("{}", dispatcher.last_result().await);
            }

            if failed > 0 {
                tracing::info!(failed, "Some operations reported errors");
            }
            Ok(())
        }

        Commands::Race { first, second } => {
            let ops = resolve(&[first, second])?;
            let dispatcher = Dispatcher::from_config(config)?;

            println!(
                "Starting {} then {} without waiting",
                ops[0].name.cyan(),
                ops[1].name.cyan()
            );
            let (a, b) = tokio::join!(
                dispatcher.run_operation(ops[0]),
                dispatcher.run_operation(ops[1])
            );

            for report in [&a, &b] {
                let status = if report.committed {
                    "kept".green()
                } else {
                    "discarded (superseded)".yellow()
                };
                println!(
                    "  {} (generation {}): {}",
                    report.operation, report.generation, status
                );
            }

            println!("{}", "Last Result:".bold());
            println!("{}", dispatcher.last_result().await);
            Ok(())
        }

        Commands::Test { scenarios, verbose } => {
            let mut results = Vec::new();
            for path in &scenarios {
                // Each scenario gets a fresh run state and result sink
                let dispatcher = Dispatcher::from_config(config)?;
                results.push(testing::run_scenario(path, &dispatcher, verbose).await?);
            }

            let failed: Vec<_> = results.iter().filter(|r| !r.passed).collect();
            println!("{}", "Summary:".bold());
            for result in &results {
                let mark = if result.passed { "✓".green() } else { "✗".red() };
                println!(
                    "  {} {} ({}/{} steps)",
                    mark, result.name, result.steps_run, result.steps_total
                );
                if let Some(error) = &result.error {
                    println!("      {}", error.red());
                }
            }

            if failed.is_empty() {
                Ok(())
            } else {
                Err(Error::TestAssertion(format!(
                    "{} of {} scenarios failed",
                    failed.len(),
                    results.len()
                )))
            }
        }
    }
}

/// Map names to catalog entries, failing on the first unknown one
fn resolve(names: &[String]) -> Result<Vec<&'static Operation>> {
    names
        .iter()
        .map(|name| catalog::find(name).ok_or_else(|| Error::UnknownOperation(name.clone())))
        .collect()
}

async fn run_with_spinner(dispatcher: &Dispatcher, operation: &'static Operation) -> RunReport {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(format!("{}...", operation.title));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let report = dispatcher.run_operation(operation).await;
    spinner.finish_and_clear();
    report
}

fn print_catalog() {
    for category in Category::ALL {
        println!("{} ({})", category.title().bold(), category.to_string().dimmed());
        for op in catalog::in_category(category) {
            println!("  {:<22} {}", op.name.cyan(), op.title);
        }
        println!();
    }
}

fn print_report(operation: &Operation, report: &RunReport) {
    match report.outcome {
        Outcome::Success => println!("{} {}", "✓".green(), operation.title),
        Outcome::Failure { code } => {
            println!("{} {} [{}]", "✗".red(), operation.title, code.dimmed())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_keeps_order() {
        let ops = resolve(&["graphql-query".to_string(), "fetch-get".to_string()]).unwrap();
        assert_eq!(ops[0].name, "graphql-query");
        assert_eq!(ops[1].name, "fetch-get");
    }

    #[test]
    fn test_resolve_unknown() {
        let err = resolve(&["fetch-get".to_string(), "bogus".to_string()]).unwrap_err();
        assert!(matches!(err, Error::UnknownOperation(ref n) if n == "bogus"));
    }
}
