//! Plansight CLI - dataset previews, forecast summaries and plan KPIs for demand planning.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Preview {
            file,
            dataset_type,
            limit,
            json,
        } => commands::preview::run(file, dataset_type, limit, json, cli.verbose),

        Commands::Forecast { file, top, json } => {
            commands::forecast::run(file, top, json, cli.verbose)
        }

        Commands::Request {
            file,
            granularity,
            model,
            location,
        } => commands::request::run(file, granularity, model, location, cli.verbose),

        Commands::Plan {
            file,
            scenario,
            explain,
            json,
        } => commands::plan::run(file, scenario, explain, json, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Install the stderr log subscriber. `RUST_LOG` overrides the default level.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
