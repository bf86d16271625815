//! Dataset preview: the sampled, schema-annotated view of an uploaded table.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::schema::{analyze_table, ColumnSchema};
use super::types::DatasetType;
use crate::input::DataTable;

/// Default number of sample rows carried by a preview.
pub const DEFAULT_PREVIEW_LIMIT: usize = 20;

/// One sample row: column name to untyped scalar, in column order.
pub type PreviewRow = IndexMap<String, Value>;

/// Preview of an uploaded or stored dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetPreview {
    pub dataset_type: DatasetType,
    /// Total row count of the underlying table, not just the sample.
    pub rows: usize,
    /// Column names in table order; unique within a preview.
    pub columns: Vec<String>,
    /// Leading sample rows.
    #[serde(default)]
    pub preview: Vec<PreviewRow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Vec<ColumnSchema>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Vec<String>>,
}

impl DatasetPreview {
    /// Build a preview from a parsed table, sampling at most `limit` rows.
    pub fn from_table(dataset_type: DatasetType, table: &DataTable, limit: usize) -> Self {
        let preview = table
            .rows
            .iter()
            .take(limit)
            .map(|row| {
                table
                    .headers
                    .iter()
                    .zip(row.iter())
                    .map(|(name, cell)| (name.clone(), cell_to_value(cell)))
                    .collect()
            })
            .collect();

        let (schema, warnings) = analyze_table(table, dataset_type);

        Self {
            dataset_type,
            rows: table.row_count(),
            columns: table.headers.clone(),
            preview,
            schema: Some(schema),
            warnings: Some(warnings),
        }
    }

    /// True when the preview carries sample rows.
    pub fn has_sample(&self) -> bool {
        !self.preview.is_empty()
    }

    /// Warnings, or an empty slice when none were reported.
    pub fn warnings(&self) -> &[String] {
        self.warnings.as_deref().unwrap_or(&[])
    }
}

/// Convert a raw cell into the scalar a JSON consumer would see.
///
/// Nulls become `null`; integers, floats and booleans are typed; everything
/// else stays a string.
pub fn cell_to_value(cell: &str) -> Value {
    if DataTable::is_null_value(cell) {
        return Value::Null;
    }
    let trimmed = cell.trim();
    if let Ok(i) = trimmed.parse::<i64>() {
        return Value::from(i);
    }
    if let Ok(f) = trimmed.parse::<f64>() {
        if f.is_finite() {
            return Value::from(f);
        }
    }
    if trimmed.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    Value::String(cell.to_string())
}
