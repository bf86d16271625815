//! Per-SKU accuracy reconciliation across candidate models.
//!
//! The model name recorded as "chosen" for a SKU does not reliably match the
//! prefixes metrics are stored under, so every known prefix is scanned and the
//! lowest MAPE wins. MAE is reported from that same winning prefix.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use super::types::{ChosenModel, MetricsMap};

/// Candidate model prefixes, in tie-break order.
pub const METRIC_PREFIXES: &[&str] = &["arima", "prophet", "xgb"];

/// Mean absolute percentage error metric name.
pub const MAPE: &str = "mape";

/// Mean absolute error metric name.
pub const MAE: &str = "mae";

/// Best available accuracy figures for one SKU.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkuAccuracy {
    /// Model recorded as chosen in the forecast metadata.
    pub chosen_model: ChosenModel,
    /// Prefix whose MAPE won, if any prefix had one.
    pub best_prefix: Option<&'static str>,
    pub mape: Option<f64>,
    pub mae: Option<f64>,
}

impl SkuAccuracy {
    /// True when no accuracy figure was found; render a placeholder.
    pub fn is_empty(&self) -> bool {
        self.mape.is_none() && self.mae.is_none()
    }

    /// Whether the recorded chosen model is the one with the winning metrics.
    pub fn chosen_matches_best(&self) -> bool {
        self.best_prefix.is_some() && self.chosen_model.metric_prefix() == self.best_prefix
    }
}

/// Reconcile accuracy for every SKU in `per_sku_model`, keeping its order.
pub fn best_metrics_per_sku(
    per_sku_model: &IndexMap<String, ChosenModel>,
    metrics: &MetricsMap,
) -> IndexMap<String, SkuAccuracy> {
    per_sku_model
        .iter()
        .map(|(sku, chosen)| (sku.clone(), best_metrics_for_sku(sku, chosen, metrics)))
        .collect()
}

/// Reconcile accuracy for a single SKU.
pub fn best_metrics_for_sku(sku: &str, chosen: &ChosenModel, metrics: &MetricsMap) -> SkuAccuracy {
    let mut best: Option<(&'static str, f64)> = None;
    for &prefix in METRIC_PREFIXES {
        let Some(mape) = metrics.metric(sku, prefix, MAPE) else {
            continue;
        };
        if best.is_none_or(|(_, current)| mape < current) {
            best = Some((prefix, mape));
        }
    }

    let accuracy = match best {
        Some((prefix, mape)) => SkuAccuracy {
            chosen_model: chosen.clone(),
            best_prefix: Some(prefix),
            mape: Some(mape),
            mae: metrics.metric(sku, prefix, MAE),
        },
        None => SkuAccuracy {
            chosen_model: chosen.clone(),
            best_prefix: None,
            mape: None,
            mae: None,
        },
    };

    debug!(
        sku,
        chosen = %accuracy.chosen_model,
        best_prefix = ?accuracy.best_prefix,
        mape = ?accuracy.mape,
        "reconciled sku accuracy"
    );
    accuracy
}
