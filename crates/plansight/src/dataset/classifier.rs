//! Column-based dataset type classification.
//!
//! Each dataset type owns a fixed keyword list. A type scores one point per
//! keyword that appears (as a substring) in at least one normalized column name.
//! The highest score wins, ties going to the first declared type. Weak winners
//! (score below [`MIN_CONFIDENT_SCORE`]) are rejected, except that a weak
//! `sales` winner is kept when the table looks like a quantity-over-time or
//! quantity-per-order table.

use serde::Serialize;
use tracing::debug;

use super::normalize::normalize_all;
use super::types::DatasetType;

/// Scores below this are not trusted on their own.
pub const MIN_CONFIDENT_SCORE: usize = 2;

/// Keyword table, in classifier priority order. Keywords are stored normalized.
const KEYWORDS: &[(DatasetType, &[&str])] = &[
    (
        DatasetType::Sales,
        &[
            "sales", "sold", "quantity", "qty", "units", "revenue", "customer", "invoice",
            "channel", "transaction",
        ],
    ),
    (
        DatasetType::Inventory,
        &[
            "inventory", "stock", "onhand", "warehouse", "location", "reorder", "available",
            "daysofcover",
        ],
    ),
    (
        DatasetType::Production,
        &[
            "production", "produced", "line", "capacity", "shift", "machine", "output", "yield",
            "workorder", "batch",
        ],
    ),
    (
        DatasetType::PurchaseOrders,
        &[
            "purchase", "poid", "ponumber", "supplier", "vendor", "eta", "leadtime", "receipt",
        ],
    ),
    (
        DatasetType::MasterData,
        &[
            "sku", "description", "category", "uom", "brand", "family", "attribute", "listprice",
        ],
    ),
    (
        DatasetType::ExternalSignals,
        &[
            "signal", "weather", "temperature", "holiday", "promotion", "index", "macro", "gdp",
            "event",
        ],
    ),
];

const QUANTITY_TERMS: &[&str] = &["quantity", "qty", "units", "amount", "volume"];
const DATE_TERMS: &[&str] = &["date", "time", "period", "day", "week", "month"];
const SALES_TERMS: &[&str] = &["sales", "sold", "order", "customer", "invoice"];

/// Score of one dataset type against a column set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeScore {
    pub dataset_type: DatasetType,
    /// Number of distinct keywords matched.
    pub score: usize,
    /// The keywords that matched, in keyword-table order.
    pub matched: Vec<&'static str>,
}

/// The keyword list for a dataset type.
pub fn keywords(dataset_type: DatasetType) -> &'static [&'static str] {
    KEYWORDS
        .iter()
        .find(|(t, _)| *t == dataset_type)
        .map(|(_, kws)| *kws)
        .unwrap_or(&[])
}

/// Score every dataset type against the given columns, in declaration order.
pub fn score_columns<S: AsRef<str>>(columns: &[S]) -> Vec<TypeScore> {
    let normalized = normalize_all(columns);
    score_normalized(&normalized)
}

fn score_normalized(normalized: &[String]) -> Vec<TypeScore> {
    KEYWORDS
        .iter()
        .map(|(dataset_type, kws)| {
            let matched: Vec<&'static str> = kws
                .iter()
                .copied()
                .filter(|kw| contains_any(normalized, kw))
                .collect();
            TypeScore {
                dataset_type: *dataset_type,
                score: matched.len(),
                matched,
            }
        })
        .collect()
}

/// Infer the dataset type from column names.
///
/// Returns `None` ("unknown") for an empty column list, when no keyword matches,
/// or when the best match is too weak and the sales rescue rule does not apply.
pub fn classify_by_columns<S: AsRef<str>>(columns: &[S]) -> Option<DatasetType> {
    if columns.is_empty() {
        return None;
    }

    let normalized = normalize_all(columns);
    let scores = score_normalized(&normalized);

    let mut best: Option<&TypeScore> = None;
    for candidate in &scores {
        // Strictly greater: earlier types keep ties.
        if best.is_none_or(|b| candidate.score > b.score) {
            best = Some(candidate);
        }
    }

    let best = best.filter(|b| b.score > 0)?;
    debug!(
        dataset_type = %best.dataset_type,
        score = best.score,
        matched = ?best.matched,
        "best keyword match"
    );

    if best.score >= MIN_CONFIDENT_SCORE {
        return Some(best.dataset_type);
    }

    if best.dataset_type == DatasetType::Sales && looks_like_sales(&normalized) {
        debug!("accepting low-scoring sales match via quantity rescue");
        return Some(DatasetType::Sales);
    }

    None
}

/// A quantity-like column plus either a time-like or an order-like column.
fn looks_like_sales(normalized: &[String]) -> bool {
    let has_quantity = QUANTITY_TERMS.iter().any(|t| contains_any(normalized, t));
    let has_date = DATE_TERMS.iter().any(|t| contains_any(normalized, t));
    let has_sales_term = SALES_TERMS.iter().any(|t| contains_any(normalized, t));
    has_quantity && (has_date || has_sales_term)
}

fn contains_any(normalized: &[String], needle: &str) -> bool {
    normalized.iter().any(|col| col.contains(needle))
}
