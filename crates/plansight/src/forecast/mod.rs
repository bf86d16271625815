//! Forecast results: payload types, aggregation and accuracy reconciliation.

mod aggregate;
mod metrics;
mod types;

pub use aggregate::{
    aggregate, aggregate_with_top_n, band_bounds, chart_series, date_aggregates, sku_totals,
    top_risk, volume_summary, BandBounds, ChartSeries, DateAggregate, ForecastSummary, SkuTotal,
    VolumeSummary, DEFAULT_RISK_TOP_N, EMPTY_BOUNDS,
};
pub use metrics::{
    best_metrics_for_sku, best_metrics_per_sku, SkuAccuracy, MAE, MAPE, METRIC_PREFIXES,
};
pub use types::{
    metric_key, ChosenModel, ForecastMetadata, ForecastPoint, ForecastResponse, MetricsMap,
    CHOSEN_MODEL_SUFFIX,
};
