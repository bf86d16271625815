//! Planning inputs: defaults inferred from sales data and forecast requests.

mod defaults;
mod inputs;
mod request;

pub use defaults::{
    find_column, infer_sales_defaults, DateRange, SalesDefaults, DATE_CANDIDATES,
    DEFAULT_MAX_SKUS, SKU_CANDIDATES, SKU_SEPARATOR,
};
pub use inputs::{Granularity, LocationFilter, PlanningInputs};
pub use request::ForecastRequest;
