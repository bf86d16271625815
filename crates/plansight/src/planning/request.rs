//! Forecast request payload.

use serde::{Deserialize, Serialize};

use super::inputs::Granularity;
use crate::forecast::ChosenModel;

/// Request sent to the forecasting service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRequest {
    pub sku_list: Vec<String>,
    /// Inclusive start, `YYYY-MM-DD`.
    pub start_date: String,
    /// Inclusive end, `YYYY-MM-DD`.
    pub end_date: String,
    #[serde(default)]
    pub granularity: Granularity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Overrides per-SKU model selection on the service side.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forced_model: Option<ChosenModel>,
}

impl ForecastRequest {
    /// Serialize as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
