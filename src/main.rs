//! Settlement Sim - Entry Point
//!
//! Loads a scenario file, then reads commands from stdin until `close` or
//! end of input. Logs go to stderr; command output goes to stdout.

use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use settlement_sim::command::{parse_command, Command, CommandExecutor};
use settlement_sim::core::config::SimulationConfig;
use settlement_sim::core::error::Result;
use settlement_sim::simulation::load_scenario;

/// Settlement Sim - step development plans from the command line
#[derive(Parser, Debug)]
#[command(name = "settlement-sim")]
#[command(about = "Run development plans for a set of settlements")]
struct Args {
    /// Scenario file (line format, or TOML when it ends in .toml)
    config: PathBuf,

    /// Print the closing plan summaries as JSON
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Tracing filter used when RUST_LOG is not set
    #[arg(long, default_value = "settlement_sim=info")]
    log_filter: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&args.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let mut sim = load_scenario(&args.config, SimulationConfig::default())?;
    tracing::info!(
        settlements = sim.settlements().count(),
        facilities = sim.catalog().len(),
        plans = sim.plans().len(),
        "scenario loaded"
    );

    println!("The simulation has started");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    while sim.is_running() {
        println!("Enter command:");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("Error: {}", e);
                continue;
            }
        };

        if args.json && command == Command::Close {
            println!("{}", serde_json::to_string_pretty(&sim.summaries())?);
            sim.close();
            break;
        }

        match CommandExecutor::execute(&mut sim, command) {
            Ok(Some(output)) => println!("{}", output),
            Ok(None) => {}
            Err(e) => println!("Error: {}", e),
        }
    }

    println!("The simulation has ended.");
    Ok(())
}
