//! Test scenario configuration types
//!
//! Defines the data structures for deserializing YAML test scenarios.

use serde::Deserialize;

/// A complete test scenario loaded from a YAML file
#[derive(Deserialize, Debug)]
pub struct TestScenario {
    /// Name of the test scenario
    pub name: String,
    /// Optional description of what the test verifies
    pub description: Option<String>,
    /// The sequence of test steps to execute
    pub steps: Vec<TestStep>,
}

/// A single test step in the execution flow
#[derive(Deserialize, Debug)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum TestStep {
    /// Run a catalog operation
    Run {
        /// Operation name (e.g., "fetch-get")
        operation: String,
        /// Optional expectations for the run
        expect: Option<RunExpectation>,
    },
    /// Check the last committed result
    CheckResult {
        /// Expected substring
        contains: Option<String>,
        /// Expected exact text
        equals: Option<String>,
    },
    /// Check that no operation holds the in-flight slot
    CheckIdle,
}

/// Expectations for a run
#[derive(Deserialize, Debug)]
pub struct RunExpectation {
    /// Whether the operation should succeed; `false` expects an `Error:` result
    pub success: Option<bool>,
    /// Substring that should be in the rendered result
    pub contains: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scenario() {
        let yaml = r#"
name: basics
steps:
  - action: run
    operation: fetch-404
    expect:
      success: false
      contains: "404"
  - action: check_result
    contains: "404"
  - action: check_idle
"#;
        let scenario: TestScenario = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(scenario.name, "basics");
        assert!(scenario.description.is_none());
        assert_eq!(scenario.steps.len(), 3);
        match &scenario.steps[0] {
            TestStep::Run { operation, expect } => {
                assert_eq!(operation, "fetch-404");
                assert_eq!(expect.as_ref().unwrap().success, Some(false));
            }
            _ => panic!("Expected Run step"),
        }
        assert!(matches!(scenario.steps[2], TestStep::CheckIdle));
    }

    #[test]
    fn test_unknown_action_rejected() {
        let yaml = "name: x\nsteps:\n  - action: explode\n";
        assert!(serde_yaml::from_str::<TestScenario>(yaml).is_err());
    }
}
