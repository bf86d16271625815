//! Supply plans, scenarios and forecast explanations: payload types and view values.

mod types;
mod view;

pub use types::{
    ExplainResponse, FeatureContribution, PlanKpi, PlanResponse, ProductionRecommendation,
    RecommendedOrder, ScenarioKpi, ScenarioResponse, SkuExplanation,
};
pub use view::{
    delta_percent, importance_series, plan_overview, scenario_kpi_row, scenario_kpi_rows,
    ImportanceBar, PlanOverview, ScenarioKpiRow,
};
