//! CLI command definitions
//!
//! Defines the clap commands for netprobe.

use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// List available operations grouped by category
    #[command(alias = "ls")]
    List,

    /// Run operations one after another and show the last result
    Run {
        /// Operation names (see 'netprobe list')
        #[arg(required_unless_present = "all")]
        names: Vec<String>,

        /// Run every operation in catalog order
        #[arg(long, conflicts_with = "names")]
        all: bool,
    },

    /// Start two operations back to back and report which result is kept
    Race {
        /// Operation started first
        first: String,

        /// Operation started while the first is still in flight
        second: String,
    },

    /// Run YAML test scenarios
    Test {
        /// Scenario files
        #[arg(required = true)]
        scenarios: Vec<PathBuf>,

        /// Print each operation's result
        #[arg(long, short)]
        verbose: bool,
    },
}
