//! netprobe - network and console probe harness
//!
//! Runs a fixed catalog of HTTP, GraphQL, binary transfer and console
//! probes so an interception layer can be checked against known traffic.

use clap::Parser;
use netprobe::common::config::Config;
use netprobe::common::logging;
use netprobe::{cli, commands::Commands, Result};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "netprobe", about = "Network and console probe harness")]
#[command(version, long_about = None)]
struct Cli {
    /// Config file to use instead of the platform default
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Also append logs to the netprobe log file
    #[arg(long, global = true)]
    log_file: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let _guard = logging::init_cli(cli.log_file);
    if cli.log_file {
        if let Some(path) = logging::log_file_path() {
            tracing::debug!("Logging to {}", path.display());
        }
    }

    let result = run(cli).await;

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    cli::dispatch(cli.command, &config).await
}
