//! Scenario runner
//!
//! Reads YAML test scenarios and runs their steps through a dispatcher,
//! so assertions are made against run reports and the result sink rather
//! than printed output.

mod config;
mod runner;

pub use config::*;
pub use runner::{execute_scenario, load_scenario, run_scenario, ScenarioResult};
