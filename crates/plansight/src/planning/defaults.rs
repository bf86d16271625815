//! Planning defaults inferred from a sales preview.
//!
//! Given a preview already classified as sales, locate its date and SKU
//! columns by name and derive a SKU selection and a date range from the sample
//! rows. Each field resolves independently; a field that cannot be resolved is
//! left out rather than failing the whole inference.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::inputs::LocationFilter;
use crate::dataset::{normalize, DatasetPreview, DatasetType};
use crate::dates::{format_date, parse_date};

/// Column names that identify the date column, in priority order.
pub const DATE_CANDIDATES: &[&str] = &[
    "date",
    "order_date",
    "transactiondate",
    "saledate",
    "time",
    "period",
];

/// Column names that identify the SKU column, in priority order.
pub const SKU_CANDIDATES: &[&str] = &["sku", "product", "item", "product_id", "itemid", "itemname"];

/// Maximum number of SKUs selected by default.
pub const DEFAULT_MAX_SKUS: usize = 20;

/// Separator used when presenting a SKU selection as one text field.
pub const SKU_SEPARATOR: &str = ",";

/// Inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Start date as `YYYY-MM-DD`.
    pub fn start_str(&self) -> String {
        format_date(self.start)
    }

    /// End date as `YYYY-MM-DD`.
    pub fn end_str(&self) -> String {
        format_date(self.end)
    }
}

/// Defaults derived from a sales preview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesDefaults {
    /// Column used for dates, as named in the preview.
    pub date_column: Option<String>,
    /// Column used for SKUs, as named in the preview.
    pub sku_column: Option<String>,
    /// Distinct SKUs in first-seen order.
    pub skus: Vec<String>,
    pub date_range: Option<DateRange>,
    /// Adopting defaults always widens the location filter.
    pub location: LocationFilter,
}

impl SalesDefaults {
    /// SKU selection as a single comma-separated field, when any SKU was found.
    pub fn sku_input(&self) -> Option<String> {
        (!self.skus.is_empty()).then(|| self.skus.join(SKU_SEPARATOR))
    }
}

/// Column matching the highest-priority candidate.
///
/// Exact matches on the normalized name are tried for every candidate first,
/// then substring matches. Within one candidate, columns are scanned in table
/// order.
pub fn find_column<'a, S: AsRef<str>>(columns: &'a [S], candidates: &[&str]) -> Option<&'a str> {
    let columns: Vec<(&str, String)> = columns
        .iter()
        .map(|c| (c.as_ref(), normalize(c.as_ref())))
        .collect();
    let candidates: Vec<String> = candidates.iter().map(|c| normalize(c)).collect();

    let exact = candidates.iter().find_map(|candidate| {
        columns
            .iter()
            .find(|(_, norm)| norm == candidate)
            .map(|(original, _)| *original)
    });
    exact.or_else(|| {
        candidates.iter().find_map(|candidate| {
            columns
                .iter()
                .find(|(_, norm)| norm.contains(candidate.as_str()))
                .map(|(original, _)| *original)
        })
    })
}

/// Infer planning defaults from a sales preview.
///
/// Returns `None` when the preview is not sales or carries no sample rows.
pub fn infer_sales_defaults(preview: &DatasetPreview, max_skus: usize) -> Option<SalesDefaults> {
    if preview.dataset_type != DatasetType::Sales || !preview.has_sample() {
        return None;
    }

    let date_column = find_column(&preview.columns, DATE_CANDIDATES);
    let sku_column = find_column(&preview.columns, SKU_CANDIDATES);
    debug!(?date_column, ?sku_column, "sales column discovery");

    let skus = sku_column
        .map(|column| distinct_skus(preview, column, max_skus))
        .unwrap_or_default();
    let date_range = date_column.and_then(|column| date_range(preview, column));

    Some(SalesDefaults {
        date_column: date_column.map(str::to_string),
        sku_column: sku_column.map(str::to_string),
        skus,
        date_range,
        location: LocationFilter::All,
    })
}

fn distinct_skus(preview: &DatasetPreview, column: &str, max_skus: usize) -> Vec<String> {
    let mut skus: Vec<String> = Vec::new();
    for value in preview.preview.iter().filter_map(|row| row.get(column)) {
        if skus.len() >= max_skus {
            break;
        }
        if let Some(sku) = scalar_text(value) {
            if !skus.contains(&sku) {
                skus.push(sku);
            }
        }
    }
    skus
}

fn date_range(preview: &DatasetPreview, column: &str) -> Option<DateRange> {
    let mut dates = preview
        .preview
        .iter()
        .filter_map(|row| row.get(column))
        .filter_map(scalar_text)
        .filter_map(|text| parse_date(&text));

    let first = dates.next()?;
    let (start, end) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
    Some(DateRange { start, end })
}

/// Trimmed, non-blank text of a scalar cell; numbers are stringified.
fn scalar_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };
    (!text.is_empty()).then_some(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::PreviewRow;
    use serde_json::json;

    fn row(pairs: &[(&str, Value)]) -> PreviewRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn sales_preview(columns: &[&str], rows: Vec<PreviewRow>) -> DatasetPreview {
        DatasetPreview {
            dataset_type: DatasetType::Sales,
            rows: rows.len(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            preview: rows,
            schema: None,
            warnings: None,
        }
    }

    #[test]
    fn test_basic_inference() {
        let preview = sales_preview(
            &["Order Date", "SKU", "Qty"],
            vec![
                row(&[("Order Date", json!("2025-01-05")), ("SKU", json!("A")), ("Qty", json!(3))]),
                row(&[("Order Date", json!("2025-01-01")), ("SKU", json!("B")), ("Qty", json!(1))]),
                row(&[("Order Date", json!("2025-01-10")), ("SKU", json!("A")), ("Qty", json!(2))]),
            ],
        );
        let defaults = infer_sales_defaults(&preview, DEFAULT_MAX_SKUS).unwrap();
        assert_eq!(defaults.date_column.as_deref(), Some("Order Date"));
        assert_eq!(defaults.sku_column.as_deref(), Some("SKU"));
        assert_eq!(defaults.skus, vec!["A", "B"]);
        assert_eq!(defaults.sku_input().as_deref(), Some("A,B"));
        let range = defaults.date_range.unwrap();
        assert_eq!(range.start_str(), "2025-01-01");
        assert_eq!(range.end_str(), "2025-01-10");
        assert_eq!(defaults.location, LocationFilter::All);
    }

    #[test]
    fn test_not_sales_or_empty() {
        let mut preview = sales_preview(&["sku"], vec![row(&[("sku", json!("A"))])]);
        preview.dataset_type = DatasetType::Inventory;
        assert!(infer_sales_defaults(&preview, DEFAULT_MAX_SKUS).is_none());

        let empty = sales_preview(&["sku", "date"], vec![]);
        assert!(infer_sales_defaults(&empty, DEFAULT_MAX_SKUS).is_none());
    }

    #[test]
    fn test_candidate_priority_beats_table_order() {
        assert_eq!(find_column(&["Product Name", "SKU"], SKU_CANDIDATES), Some("SKU"));
        assert_eq!(
            find_column(&["timestamp", "order_date"], DATE_CANDIDATES),
            Some("order_date")
        );
        assert_eq!(find_column(&["Item Name", "Product"], SKU_CANDIDATES), Some("Product"));
        assert_eq!(find_column(&["qty", "revenue"], SKU_CANDIDATES), None);
    }

    #[test]
    fn test_exact_match_before_substring() {
        // "date" is contained in "Order Date" but matches "date" exactly
        assert_eq!(find_column(&["Order Date", "Date"], DATE_CANDIDATES), Some("Date"));
        // same candidate, two substring hits: table order decides
        assert_eq!(
            find_column(&["ship_date", "order_date_local"], DATE_CANDIDATES),
            Some("ship_date")
        );
    }

    #[test]
    fn test_descriptive_column_does_not_shadow_sku() {
        let preview = sales_preview(
            &["Product Name", "SKU", "Date", "Qty"],
            vec![
                row(&[
                    ("Product Name", json!("Blue Widget")),
                    ("SKU", json!("A")),
                    ("Date", json!("2025-01-02")),
                    ("Qty", json!(1)),
                ]),
                row(&[
                    ("Product Name", json!("Red Widget")),
                    ("SKU", json!("B")),
                    ("Date", json!("2025-01-03")),
                    ("Qty", json!(2)),
                ]),
            ],
        );
        let defaults = infer_sales_defaults(&preview, DEFAULT_MAX_SKUS).unwrap();
        assert_eq!(defaults.sku_column.as_deref(), Some("SKU"));
        assert_eq!(defaults.skus, vec!["A", "B"]);
        assert_eq!(defaults.date_column.as_deref(), Some("Date"));
    }

    #[test]
    fn test_missing_field_is_skipped() {
        let preview = sales_preview(
            &["sku", "qty"],
            vec![row(&[("sku", json!(" A ")), ("qty", json!(1))])],
        );
        let defaults = infer_sales_defaults(&preview, DEFAULT_MAX_SKUS).unwrap();
        assert_eq!(defaults.skus, vec!["A"]);
        assert!(defaults.date_column.is_none());
        assert!(defaults.date_range.is_none());
    }

    #[test]
    fn test_unparsable_dates_ignored() {
        let preview = sales_preview(
            &["date", "sku"],
            vec![
                row(&[("date", json!("soon")), ("sku", json!("A"))]),
                row(&[("date", json!("2025-03-02")), ("sku", json!("A"))]),
                row(&[("date", Value::Null), ("sku", json!("A"))]),
            ],
        );
        let range = infer_sales_defaults(&preview, DEFAULT_MAX_SKUS)
            .unwrap()
            .date_range
            .unwrap();
        assert_eq!(range.start, range.end);
        assert_eq!(range.start_str(), "2025-03-02");
    }

    #[test]
    fn test_no_parsable_dates_gives_no_range() {
        let preview = sales_preview(&["date"], vec![row(&[("date", json!("n/a later"))])]);
        let defaults = infer_sales_defaults(&preview, DEFAULT_MAX_SKUS).unwrap();
        assert_eq!(defaults.date_column.as_deref(), Some("date"));
        assert!(defaults.date_range.is_none());
    }

    #[test]
    fn test_sku_cap_and_numeric_skus() {
        let rows = (0..30).map(|i| row(&[("item_id", json!(1000 + i))])).collect();
        let preview = sales_preview(&["item_id"], rows);
        let defaults = infer_sales_defaults(&preview, DEFAULT_MAX_SKUS).unwrap();
        assert_eq!(defaults.skus.len(), DEFAULT_MAX_SKUS);
        assert_eq!(defaults.skus[0], "1000");
    }

    #[test]
    fn test_blank_skus_skipped() {
        let preview = sales_preview(
            &["sku"],
            vec![
                row(&[("sku", json!("  "))]),
                row(&[("sku", Value::Null)]),
                row(&[("sku", json!("B"))]),
            ],
        );
        let defaults = infer_sales_defaults(&preview, DEFAULT_MAX_SKUS).unwrap();
        assert_eq!(defaults.skus, vec!["B"]);
    }

    #[test]
    fn test_no_skus_means_no_input() {
        let preview = sales_preview(&["date"], vec![row(&[("date", json!("2025-01-01"))])]);
        let defaults = infer_sales_defaults(&preview, DEFAULT_MAX_SKUS).unwrap();
        assert!(defaults.sku_input().is_none());
    }

    #[test]
    fn test_idempotent() {
        let preview = sales_preview(
            &["date", "sku"],
            vec![row(&[("date", json!("2025-01-01")), ("sku", json!("A"))])],
        );
        assert_eq!(
            infer_sales_defaults(&preview, DEFAULT_MAX_SKUS),
            infer_sales_defaults(&preview, DEFAULT_MAX_SKUS)
        );
    }
}
