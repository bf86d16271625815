//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use plansight::planning::Granularity;
use plansight::DatasetType;

/// Plansight: dataset previews and forecast summaries for demand planning
#[derive(Parser)]
#[command(name = "plansight")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify a dataset file and show its preview
    Preview {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Dataset type (sales, inventory, production, purchase_orders, master_data,
        /// external_signals); inferred when omitted
        #[arg(short = 't', long = "type")]
        dataset_type: Option<DatasetType>,

        /// Number of sample rows to show
        #[arg(short, long, default_value = "20")]
        limit: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Summarize a forecast result
    Forecast {
        /// Path to the forecast response JSON
        #[arg(value_name = "FORECAST_JSON")]
        file: PathBuf,

        /// Number of SKUs in the top-risk ranking
        #[arg(long, default_value = "5")]
        top: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Build a forecast request from a sales file's inferred defaults
    Request {
        /// Path to the sales data file
        #[arg(value_name = "SALES_FILE")]
        file: PathBuf,

        /// Time bucket: D, W or M
        #[arg(short, long, default_value = "D")]
        granularity: Granularity,

        /// Force one model for every SKU (arima, prophet, xgboost, stub)
        #[arg(short, long)]
        model: Option<String>,

        /// Restrict the request to one location
        #[arg(long)]
        location: Option<String>,
    },

    /// Show plan KPIs, scenario deltas and forecast drivers
    Plan {
        /// Path to the plan response JSON
        #[arg(value_name = "PLAN_JSON")]
        file: PathBuf,

        /// Scenario response JSON to compare against the plan
        #[arg(long, value_name = "SCENARIO_JSON")]
        scenario: Option<PathBuf>,

        /// Forecast explanation JSON
        #[arg(long, value_name = "EXPLAIN_JSON")]
        explain: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
