//! Supply plan, scenario and explanation results as received from the service.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Headline figure of a generated plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanKpi {
    pub name: String,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedOrder {
    pub sku: String,
    #[serde(default)]
    pub location: Option<String>,
    pub order_date: NaiveDate,
    pub quantity: f64,
    #[serde(default = "default_order_type")]
    pub order_type: String,
}

fn default_order_type() -> String {
    "purchase".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionRecommendation {
    pub sku: String,
    #[serde(default)]
    pub line_id: Option<String>,
    pub production_date: NaiveDate,
    pub quantity: f64,
}

/// Supply plan generated from a forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanResponse {
    pub plan_id: String,
    pub forecast_id: String,
    #[serde(default)]
    pub orders: Vec<RecommendedOrder>,
    #[serde(default)]
    pub production: Vec<ProductionRecommendation>,
    #[serde(default)]
    pub kpis: Vec<PlanKpi>,
}

impl PlanResponse {
    pub fn from_json(text: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// One KPI compared between the base plan and a scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioKpi {
    pub name: String,
    pub base: f64,
    pub scenario: f64,
    pub delta: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// What-if result for a plan under demand or supply shocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResponse {
    pub scenario_id: String,
    pub forecast_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub kpis: Vec<ScenarioKpi>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub narrative: Option<String>,
}

impl ScenarioResponse {
    pub fn from_json(text: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureContribution {
    pub feature: String,
    pub importance: f64,
    /// `"up"` or `"down"` in practice; kept verbatim.
    #[serde(default)]
    pub direction: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkuExplanation {
    pub sku: String,
    #[serde(default)]
    pub top_drivers: Vec<FeatureContribution>,
}

/// Feature attributions for a forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplainResponse {
    pub forecast_id: String,
    #[serde(default)]
    pub global_importance: Vec<FeatureContribution>,
    #[serde(default)]
    pub by_sku: Vec<SkuExplanation>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_summary: Option<String>,
}

impl ExplainResponse {
    pub fn from_json(text: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plan() {
        let raw = r#"{
            "plan_id": "plan-1",
            "forecast_id": "fc-1",
            "orders": [{"sku": "A", "location": null, "order_date": "2025-01-03", "quantity": 40.0}],
            "production": [{"sku": "A", "line_id": "LINE-1", "production_date": "2025-01-01", "quantity": 10}],
            "kpis": [{"name": "Total Volume", "value": 50.0, "unit": "units"}]
        }"#;
        let plan = PlanResponse::from_json(raw).unwrap();
        assert_eq!(plan.orders[0].order_type, "purchase");
        assert_eq!(plan.orders[0].order_date, NaiveDate::from_ymd_opt(2025, 1, 3).unwrap());
        assert_eq!(plan.production[0].line_id.as_deref(), Some("LINE-1"));
        assert_eq!(plan.kpis[0].unit.as_deref(), Some("units"));
    }

    #[test]
    fn test_parse_sparse_scenario_and_explanation() {
        let scenario =
            ScenarioResponse::from_json(r#"{"scenario_id": "s", "forecast_id": "f"}"#).unwrap();
        assert!(scenario.kpis.is_empty());
        assert!(scenario.plan_id.is_none());

        let explain = ExplainResponse::from_json(
            r#"{"forecast_id": "f", "global_importance": [{"feature": "lag_7", "importance": 0.4, "direction": "up"}]}"#,
        )
        .unwrap();
        assert_eq!(explain.global_importance[0].feature, "lag_7");
        assert!(explain.by_sku.is_empty());
    }

    #[test]
    fn test_bad_order_date_is_an_error() {
        let raw = r#"{"plan_id": "p", "forecast_id": "f",
            "orders": [{"sku": "A", "order_date": "soon", "quantity": 1}]}"#;
        assert!(matches!(
            PlanResponse::from_json(raw),
            Err(crate::PlansightError::Json(_))
        ));
    }
}
