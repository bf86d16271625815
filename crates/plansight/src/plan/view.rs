//! Values the plan, scenario and explainability views show.
//!
//! Nothing here plans or simulates; it only reshapes service results.

use indexmap::IndexMap;
use serde::Serialize;

use super::types::{ExplainResponse, PlanKpi, PlanResponse, ScenarioKpi, ScenarioResponse};

/// Plan headline: the service KPIs plus recommendation counts and volumes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanOverview {
    pub plan_id: String,
    pub forecast_id: String,
    pub kpis: Vec<PlanKpi>,
    pub order_count: usize,
    pub order_volume: f64,
    pub production_count: usize,
    pub production_volume: f64,
    /// Recommended order quantity per SKU, first-seen order.
    pub order_volume_by_sku: IndexMap<String, f64>,
}

/// Scenario KPI with its relative change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioKpiRow {
    pub name: String,
    pub base: f64,
    pub scenario: f64,
    pub delta: f64,
    /// `100 * delta / base`; `None` when the base is zero.
    pub delta_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// One bar of the global feature-importance chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportanceBar {
    pub feature: String,
    pub importance: f64,
}

pub fn plan_overview(plan: &PlanResponse) -> PlanOverview {
    let mut order_volume_by_sku: IndexMap<String, f64> = IndexMap::new();
    for order in &plan.orders {
        *order_volume_by_sku.entry(order.sku.clone()).or_insert(0.0) += order.quantity;
    }

    PlanOverview {
        plan_id: plan.plan_id.clone(),
        forecast_id: plan.forecast_id.clone(),
        kpis: plan.kpis.clone(),
        order_count: plan.orders.len(),
        order_volume: plan.orders.iter().map(|o| o.quantity).sum(),
        production_count: plan.production.len(),
        production_volume: plan.production.iter().map(|p| p.quantity).sum(),
        order_volume_by_sku,
    }
}

/// Percentage change of `delta` against `base`.
pub fn delta_percent(delta: f64, base: f64) -> Option<f64> {
    if base == 0.0 {
        return None;
    }
    Some(100.0 * delta / base).filter(|pct| pct.is_finite())
}

pub fn scenario_kpi_row(kpi: &ScenarioKpi) -> ScenarioKpiRow {
    ScenarioKpiRow {
        name: kpi.name.clone(),
        base: kpi.base,
        scenario: kpi.scenario,
        delta: kpi.delta,
        delta_percent: delta_percent(kpi.delta, kpi.base),
        unit: kpi.unit.clone(),
    }
}

/// Scenario KPIs in service order.
pub fn scenario_kpi_rows(scenario: &ScenarioResponse) -> Vec<ScenarioKpiRow> {
    scenario.kpis.iter().map(scenario_kpi_row).collect()
}

/// Global importance bars in service order. A feature listed twice keeps its
/// first position and sums its importance.
pub fn importance_series(explain: &ExplainResponse) -> Vec<ImportanceBar> {
    let mut bars: IndexMap<&str, f64> = IndexMap::new();
    for contribution in &explain.global_importance {
        *bars.entry(contribution.feature.as_str()).or_insert(0.0) += contribution.importance;
    }
    bars.into_iter()
        .map(|(feature, importance)| ImportanceBar {
            feature: feature.to_string(),
            importance,
        })
        .collect()
}
