//! Test runner implementation
//!
//! Executes scenario steps against a dispatcher, asserting on the run
//! reports and the result sink rather than on printed output.

use std::path::Path;

use colored::Colorize;

use crate::common::{Error, Result};
use crate::dispatcher::{Dispatcher, Outcome};

use super::config::{RunExpectation, TestScenario, TestStep};

/// Result of a test run
#[derive(Debug)]
pub struct ScenarioResult {
    pub name: String,
    pub passed: bool,
    pub steps_run: usize,
    pub steps_total: usize,
    pub error: Option<String>,
}

/// Load a scenario from a YAML file
pub fn load_scenario(path: &Path) -> Result<TestScenario> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!(
            "Failed to read test scenario '{}': {}",
            path.display(),
            e
        ))
    })?;

    serde_yaml::from_str(&content)
        .map_err(|e| Error::Config(format!("Failed to parse test scenario: {}", e)))
}

/// Run a test scenario from a YAML file
pub async fn run_scenario(path: &Path, dispatcher: &Dispatcher, verbose: bool) -> Result<ScenarioResult> {
    let scenario = load_scenario(path)?;
    Ok(execute_scenario(&scenario, dispatcher, verbose).await)
}

/// Run an already-loaded scenario
pub async fn execute_scenario(
    scenario: &TestScenario,
    dispatcher: &Dispatcher,
    verbose: bool,
) -> ScenarioResult {
    let steps_total = scenario.steps.len();

    println!(
        "\n{} {}",
        "Running Test:".blue().bold(),
        scenario.name.white().bold()
    );

    if let Some(desc) = &scenario.description {
        println!("  {}", desc.dimmed());
    }

    println!("\n{}", "Steps:".cyan());

    for (i, step) in scenario.steps.iter().enumerate() {
        let step_num = i + 1;

        if let Err(e) = execute_step(dispatcher, step, step_num, verbose).await {
            println!("  {} Step {}: {}", "✗".red(), step_num, e);
            return ScenarioResult {
                name: scenario.name.clone(),
                passed: false,
                steps_run: step_num,
                steps_total,
                error: Some(e.to_string()),
            };
        }
    }

    println!(
        "\n{} {}\n",
        "✓".green().bold(),
        "Test Passed".green().bold()
    );

    ScenarioResult {
        name: scenario.name.clone(),
        passed: true,
        steps_run: steps_total,
        steps_total,
        error: None,
    }
}

/// Execute a single test step
async fn execute_step(
    dispatcher: &Dispatcher,
    step: &TestStep,
    step_num: usize,
    verbose: bool,
) -> Result<()> {
    match step {
        TestStep::Run { operation, expect } => {
            execute_run_step(dispatcher, operation, expect.as_ref(), step_num, verbose).await
        }
        TestStep::CheckResult { contains, equals } => {
            execute_check_result_step(dispatcher, contains.as_ref(), equals.as_ref(), step_num)
                .await
        }
        TestStep::CheckIdle => {
            if let Some(name) = dispatcher.in_flight().await {
                return Err(Error::TestAssertion(format!(
                    "Expected no operation in flight, found '{}'",
                    name
                )));
            }
            println!("  {} Step {}: idle", "✓".green(), step_num);
            Ok(())
        }
    }
}

/// Execute a run step
async fn execute_run_step(
    dispatcher: &Dispatcher,
    operation: &str,
    expect: Option<&RunExpectation>,
    step_num: usize,
    verbose: bool,
) -> Result<()> {
    let report = dispatcher.run(operation).await?;
    let succeeded = report.outcome == Outcome::Success;

    if verbose {
        for line in report.text.lines() {
            println!("      {}", line.dimmed());
        }
    }

    if let Some(exp) = expect {
        if let Some(should_succeed) = exp.success {
            if should_succeed != succeeded {
                return Err(Error::TestAssertion(format!(
                    "Operation '{}' expected success={}, got success={} ({})",
                    operation,
                    should_succeed,
                    succeeded,
                    first_line(&report.text)
                )));
            }
        }

        if let Some(expected) = &exp.contains {
            if !report.text.contains(expected.as_str()) {
                return Err(Error::TestAssertion(format!(
                    "Expected result of '{}' to contain '{}', got '{}'",
                    operation,
                    expected,
                    first_line(&report.text)
                )));
            }
        }
    }

    let note = if succeeded { "" } else { " (failed as reported)" };
    println!(
        "  {} Step {}: run {}{}",
        "✓".green(),
        step_num,
        operation.dimmed(),
        note
    );

    Ok(())
}

/// Execute a check-result step
async fn execute_check_result_step(
    dispatcher: &Dispatcher,
    contains: Option<&String>,
    equals: Option<&String>,
    step_num: usize,
) -> Result<()> {
    let last = dispatcher.last_result().await;

    if let Some(expected) = contains {
        if !last.contains(expected.as_str()) {
            return Err(Error::TestAssertion(format!(
                "Expected last result to contain '{}', got '{}'",
                expected,
                first_line(&last)
            )));
        }
    }

    if let Some(expected) = equals {
        if &last != expected {
            return Err(Error::TestAssertion(format!(
                "Expected last result '{}', got '{}'",
                expected, last
            )));
        }
    }

    println!("  {} Step {}: check result", "✓".green(), step_num);
    Ok(())
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::config::{Config, Endpoints};
    use crate::console::Console;
    use crate::transport::{HttpMethod, StubTransport};
    use serde_json::json;
    use std::io::Write;
    use std::sync::Arc;

    fn dispatcher() -> Dispatcher {
        let stub = Arc::new(StubTransport::new());
        stub.respond_json(HttpMethod::Get, "http://s.test/posts/99999999", 404, json!({}));
        let config = Config {
            endpoints: Endpoints::all_at("http://s.test"),
            ..Config::default()
        };
        Dispatcher::new(&config, stub, Console::capturing())
    }

    fn scenario(yaml: &str) -> TestScenario {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[tokio::test]
    async fn test_passing_scenario() {
        let s = scenario(
            r#"
name: not found
steps:
  - action: run
    operation: fetch-404
    expect: { success: false, contains: "HTTP 404" }
  - action: run
    operation: console-basic
  - action: check_result
    equals: "Sent various console logs - check console tab"
  - action: check_idle
"#,
        );
        let result = execute_scenario(&s, &dispatcher(), false).await;
        assert!(result.passed, "{:?}", result.error);
        assert_eq!(result.steps_run, 4);
    }

    #[tokio::test]
    async fn test_failed_expectation_stops_scenario() {
        let s = scenario(
            r#"
name: wrong expectation
steps:
  - action: run
    operation: fetch-404
    expect: { success: true }
  - action: check_idle
"#,
        );
        let result = execute_scenario(&s, &dispatcher(), false).await;
        assert!(!result.passed);
        assert_eq!(result.steps_run, 1);
        assert!(result.error.unwrap().contains("expected success=true"));
    }

    #[tokio::test]
    async fn test_unknown_operation_fails_step() {
        let s = scenario("name: bad\nsteps:\n  - action: run\n    operation: nope\n");
        let result = execute_scenario(&s, &dispatcher(), false).await;
        assert!(!result.passed);
        assert!(result.error.unwrap().contains("Unknown operation 'nope'"));
    }

    #[tokio::test]
    async fn test_run_scenario_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "name: file\nsteps:\n  - action: run\n    operation: console-performance\n"
        )
        .unwrap();
        let result = run_scenario(file.path(), &dispatcher(), true).await.unwrap();
        assert!(result.passed);
    }

    #[tokio::test]
    async fn test_missing_file_is_config_error() {
        let err = run_scenario(Path::new("/nonexistent/s.yaml"), &dispatcher(), false)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
