//! Planning form state and its conversion into a forecast request.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::defaults::{infer_sales_defaults, SalesDefaults};
use super::request::ForecastRequest;
use crate::dataset::DatasetPreview;
use crate::dates::format_date;
use crate::error::{PlansightError, Result};
use crate::forecast::ChosenModel;

/// Time bucket of the requested forecast.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Granularity {
    #[default]
    #[serde(rename = "D")]
    Day,
    #[serde(rename = "W")]
    Week,
    #[serde(rename = "M")]
    Month,
}

impl Granularity {
    pub fn code(&self) -> &'static str {
        match self {
            Granularity::Day => "D",
            Granularity::Week => "W",
            Granularity::Month => "M",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "d" | "day" | "daily" => Ok(Granularity::Day),
            "w" | "week" | "weekly" => Ok(Granularity::Week),
            "m" | "month" | "monthly" => Ok(Granularity::Month),
            _ => Err(format!("unknown granularity '{}' (expected D, W or M)", s)),
        }
    }
}

/// Location scope of a plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationFilter {
    #[default]
    All,
    Only(String),
}

impl LocationFilter {
    /// Parse free-text form input; blank means all locations.
    pub fn from_input(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            LocationFilter::All
        } else {
            LocationFilter::Only(trimmed.to_string())
        }
    }

    /// The single location, or `None` for all locations.
    pub fn as_option(&self) -> Option<&str> {
        match self {
            LocationFilter::All => None,
            LocationFilter::Only(location) => Some(location),
        }
    }
}

/// Planning form state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanningInputs {
    /// Comma-separated SKU selection as typed by the user.
    pub sku_input: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub granularity: Granularity,
    pub location: LocationFilter,
}

impl PlanningInputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the fields that `defaults` resolved; the rest keep their values.
    ///
    /// The location filter is always reset.
    pub fn adopt_sales_defaults(&mut self, defaults: &SalesDefaults) {
        if let Some(sku_input) = defaults.sku_input() {
            self.sku_input = sku_input;
        }
        if let Some(range) = defaults.date_range {
            self.start_date = Some(range.start);
            self.end_date = Some(range.end);
        }
        self.location = defaults.location.clone();
    }

    /// Infer sales defaults from `preview` and adopt them.
    ///
    /// Returns false, leaving the inputs untouched, when the preview yields none.
    pub fn apply_preview(&mut self, preview: &DatasetPreview, max_skus: usize) -> bool {
        match infer_sales_defaults(preview, max_skus) {
            Some(defaults) => {
                self.adopt_sales_defaults(&defaults);
                true
            }
            None => false,
        }
    }

    /// SKUs from the comma-separated input, trimmed, blanks dropped.
    pub fn sku_list(&self) -> Vec<String> {
        self.sku_input
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Build a forecast request from the current inputs.
    pub fn to_request(&self, forced_model: Option<ChosenModel>) -> Result<ForecastRequest> {
        let sku_list = self.sku_list();
        if sku_list.is_empty() {
            return Err(PlansightError::InvalidRequest("no SKUs selected".to_string()));
        }
        let (Some(start), Some(end)) = (self.start_date, self.end_date) else {
            return Err(PlansightError::InvalidRequest(
                "start and end dates are required".to_string(),
            ));
        };
        if start > end {
            return Err(PlansightError::InvalidRequest(format!(
                "start date {} is after end date {}",
                format_date(start),
                format_date(end)
            )));
        }

        debug!(skus = sku_list.len(), %start, %end, granularity = %self.granularity, "built forecast request");
        Ok(ForecastRequest {
            sku_list,
            start_date: format_date(start),
            end_date: format_date(end),
            granularity: self.granularity,
            location: self.location.as_option().map(str::to_string),
            forced_model,
        })
    }
}
