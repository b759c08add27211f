//! Command-line runner for the production stages.
//!
//! `run` solves the whole chain; the single-stage commands read their input
//! from a state document written by the stage before and add their own
//! section to it.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Steady-state reservoir-to-trunk flow model.
#[derive(Parser)]
#[command(name = "oilfield")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Steady-state reservoir, well, flowline and trunk flow", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve all four stages
    Run(commands::StageArgs),
    /// Solve radial inflow to the wells
    Reservoir(commands::StageArgs),
    /// Solve the wells from recorded reservoir output
    Well(commands::StageArgs),
    /// Solve the flowlines from recorded well output
    Flowline(commands::StageArgs),
    /// Merge the flowlines and solve the trunk
    Trunk(commands::StageArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Run(args) => commands::run(&args),
        Commands::Reservoir(args) => commands::reservoir(&args),
        Commands::Well(args) => commands::well(&args),
        Commands::Flowline(args) => commands::flowline(&args),
        Commands::Trunk(args) => commands::trunk(&args),
    }
}
