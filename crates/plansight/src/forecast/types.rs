//! Forecast result types as received from the forecasting service.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One per-SKU, per-date quantile forecast.
///
/// `q10 <= q50 <= mean` is typical but not guaranteed; nothing here relies on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub sku: String,
    /// Calendar date as sent by the service (ISO `YYYY-MM-DD` in practice).
    pub date: String,
    pub mean: f64,
    pub q10: f64,
    pub q50: f64,
    pub q90: f64,
}

/// Model identifier recorded per SKU.
///
/// `Stub` is the baseline sentinel used when no statistical model could be fit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChosenModel {
    Stub,
    Arima,
    Prophet,
    Xgboost,
    /// Any identifier outside the known set, kept verbatim.
    Other(String),
}

impl ChosenModel {
    pub fn as_str(&self) -> &str {
        match self {
            ChosenModel::Stub => "stub",
            ChosenModel::Arima => "arima",
            ChosenModel::Prophet => "prophet",
            ChosenModel::Xgboost => "xgboost",
            ChosenModel::Other(name) => name,
        }
    }

    /// True for the baseline sentinel.
    pub fn is_baseline(&self) -> bool {
        matches!(self, ChosenModel::Stub)
    }

    /// Decode the numeric `"{sku}.chosen_model"` metric (0 stub, 1 arima, 2 prophet, 3 xgboost).
    pub fn from_code(code: f64) -> Option<ChosenModel> {
        match code {
            c if c == 0.0 => Some(ChosenModel::Stub),
            c if c == 1.0 => Some(ChosenModel::Arima),
            c if c == 2.0 => Some(ChosenModel::Prophet),
            c if c == 3.0 => Some(ChosenModel::Xgboost),
            _ => None,
        }
    }

    /// The short code this model's metrics are stored under, when it has one.
    pub fn metric_prefix(&self) -> Option<&'static str> {
        match self {
            ChosenModel::Arima => Some("arima"),
            ChosenModel::Prophet => Some("prophet"),
            ChosenModel::Xgboost => Some("xgb"),
            ChosenModel::Stub | ChosenModel::Other(_) => None,
        }
    }
}

/// Decoding accepts the short aliases `xgb` and `baseline`; encoding always
/// writes the canonical name (`xgboost`, `stub`), the only spellings the
/// forecasting service accepts as a forced model.
impl From<String> for ChosenModel {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "stub" | "baseline" => ChosenModel::Stub,
            "arima" => ChosenModel::Arima,
            "prophet" => ChosenModel::Prophet,
            "xgboost" | "xgb" => ChosenModel::Xgboost,
            _ => ChosenModel::Other(value),
        }
    }
}

impl From<&str> for ChosenModel {
    fn from(value: &str) -> Self {
        ChosenModel::from(value.to_string())
    }
}

impl From<ChosenModel> for String {
    fn from(model: ChosenModel) -> Self {
        model.as_str().to_string()
    }
}

impl fmt::Display for ChosenModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Descriptive metadata attached to a forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastMetadata {
    pub model_name: String,
    pub model_version: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_sku_model: Option<IndexMap<String, ChosenModel>>,
}

/// Flat, sparse metrics map keyed by `"{sku}.{prefix}_{metric}"`.
///
/// Values are kept as raw JSON so that nulls or strings sent by the service do
/// not fail decoding of the whole forecast; lookups only return finite numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricsMap(IndexMap<String, Value>);

impl MetricsMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finite numeric value under `key`, if any.
    pub fn get(&self, key: &str) -> Option<f64> {
        self.0
            .get(key)
            .and_then(Value::as_f64)
            .filter(|v| v.is_finite())
    }

    /// Value of `metric` recorded for `sku` under a model prefix.
    pub fn metric(&self, sku: &str, prefix: &str, metric: &str) -> Option<f64> {
        self.get(&metric_key(sku, prefix, metric))
    }

    /// Chosen model as encoded in the `"{sku}.chosen_model"` entry.
    pub fn chosen_model(&self, sku: &str) -> Option<ChosenModel> {
        self.get(&format!("{}{}", sku, CHOSEN_MODEL_SUFFIX))
            .and_then(ChosenModel::from_code)
    }

    /// Every SKU with a decodable `chosen_model` entry, in key order.
    ///
    /// Unknown codes (the service writes `-1`) are skipped.
    pub fn chosen_models(&self) -> IndexMap<String, ChosenModel> {
        self.0
            .keys()
            .filter_map(|key| key.strip_suffix(CHOSEN_MODEL_SUFFIX))
            .filter_map(|sku| Some((sku.to_string(), self.chosen_model(sku)?)))
            .collect()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: f64) {
        self.0.insert(key.into(), Value::from(value));
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for MetricsMap {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut map = MetricsMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

/// Key suffix of the per-SKU chosen-model code.
pub const CHOSEN_MODEL_SUFFIX: &str = ".chosen_model";

/// Composite metrics key, e.g. `SKU-001.prophet_mape`.
pub fn metric_key(sku: &str, prefix: &str, metric: &str) -> String {
    format!("{}.{}_{}", sku, prefix, metric)
}

/// Full forecast payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResponse {
    pub forecast_id: String,
    #[serde(default)]
    pub points: Vec<ForecastPoint>,
    pub metadata: ForecastMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<MetricsMap>,
}

impl ForecastResponse {
    /// Parse a forecast response from JSON text.
    pub fn from_json(text: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "forecast_id": "f-1",
        "points": [
            {"sku": "A", "date": "2025-01-01", "mean": 10.0, "q10": 8.0, "q50": 10.0, "q90": 12.0}
        ],
        "metadata": {
            "model_name": "arima_prophet_xgb_ensemble",
            "model_version": "1.0.0",
            "components": ["arima", "prophet", "xgboost"],
            "per_sku_model": {"A": "prophet", "B": "stub", "C": "holt_winters"}
        },
        "metrics": {"A.prophet_mape": 0.12, "A.arima_mape": null, "A.chosen_model": 2.0}
    }"#;

    #[test]
    fn test_parse_response() {
        let response = ForecastResponse::from_json(SAMPLE).unwrap();
        assert_eq!(response.points.len(), 1);
        let per_sku = response.metadata.per_sku_model.as_ref().unwrap();
        assert_eq!(per_sku["A"], ChosenModel::Prophet);
        assert!(per_sku["B"].is_baseline());
        assert_eq!(per_sku["C"], ChosenModel::Other("holt_winters".to_string()));
    }

    #[test]
    fn test_metrics_lookup_ignores_non_numbers() {
        let response = ForecastResponse::from_json(SAMPLE).unwrap();
        let metrics = response.metrics.unwrap();
        assert_eq!(metrics.metric("A", "prophet", "mape"), Some(0.12));
        assert_eq!(metrics.metric("A", "arima", "mape"), None);
        assert_eq!(metrics.metric("A", "xgb", "mape"), None);
        assert_eq!(metrics.chosen_model("A"), Some(ChosenModel::Prophet));
    }

    #[test]
    fn test_chosen_models_from_codes() {
        let metrics: MetricsMap = [
            ("SKU-1.arima_mape", 4.0),
            ("SKU-1.chosen_model", 1.0),
            ("SKU-2.chosen_model", 0.0),
            ("SKU-3.chosen_model", -1.0),
        ]
        .into_iter()
        .collect();
        let chosen = metrics.chosen_models();
        assert_eq!(chosen.len(), 2);
        assert_eq!(chosen["SKU-1"], ChosenModel::Arima);
        assert!(chosen["SKU-2"].is_baseline());
        assert!(!chosen.contains_key("SKU-3"));
    }

    #[test]
    fn test_missing_optional_sections() {
        let raw = r#"{"forecast_id": "f-2", "metadata": {"model_name": "m", "model_version": "1"}}"#;
        let response = ForecastResponse::from_json(raw).unwrap();
        assert!(response.points.is_empty());
        assert!(response.metrics.is_none());
        assert!(response.metadata.per_sku_model.is_none());
    }

    #[test]
    fn test_chosen_model_codes_and_prefixes() {
        assert_eq!(ChosenModel::from_code(3.0), Some(ChosenModel::Xgboost));
        assert_eq!(ChosenModel::from_code(-1.0), None);
        assert_eq!(ChosenModel::Xgboost.metric_prefix(), Some("xgb"));
        assert_eq!(ChosenModel::Stub.metric_prefix(), None);
        assert_eq!(ChosenModel::from("XGB"), ChosenModel::Xgboost);
        assert_eq!(String::from(ChosenModel::Arima), "arima");
    }

    #[test]
    fn test_metric_key() {
        assert_eq!(metric_key("SKU-001", "prophet", "mae"), "SKU-001.prophet_mae");
    }
}
