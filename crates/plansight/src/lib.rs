//! Plansight: dataset classification and forecast aggregation for demand planning.
//!
//! Planners upload business tables without declaring what they are. Plansight
//! works out which kind of dataset a table is from its column names, derives
//! default planning inputs from sales data, and turns probabilistic forecast
//! results into ranked, chart-ready summaries with per-SKU accuracy. Plan and
//! scenario results are reshaped into KPI tables with relative changes.
//!
//! # Core Principles
//!
//! - **Name-driven**: Dataset types are inferred from column names, not declared
//! - **Total**: The classification and aggregation algorithms never fail; missing
//!   information yields `None` or an omitted field
//! - **Stateless**: Every derived value is recomputed from its inputs
//!
//! # Example
//!
//! ```no_run
//! use plansight::Plansight;
//!
//! let plansight = Plansight::new();
//! let outcome = plansight.preview_file("sales_2025.csv", None).unwrap();
//!
//! println!("Type: {}", outcome.dataset_type());
//! if let Some(defaults) = &outcome.sales_defaults {
//!     println!("SKUs: {:?}", defaults.skus);
//! }
//! ```

pub mod dataset;
pub mod dates;
pub mod error;
pub mod forecast;
pub mod input;
pub mod plan;
pub mod planning;

mod plansight;

pub use crate::plansight::{ForecastReport, Plansight, PlansightConfig, PreviewOutcome};
pub use dataset::{classify_by_columns, classify_by_filename, normalize, DatasetPreview, DatasetType};
pub use error::{PlansightError, Result};
pub use forecast::{
    aggregate, best_metrics_per_sku, ChosenModel, ForecastPoint, ForecastResponse,
    ForecastSummary, MetricsMap, SkuAccuracy,
};
pub use input::{DataTable, SourceMetadata};
pub use plan::{ExplainResponse, PlanResponse, ScenarioResponse};
pub use planning::{infer_sales_defaults, ForecastRequest, PlanningInputs, SalesDefaults};
