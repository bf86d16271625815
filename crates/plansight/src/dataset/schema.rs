//! Per-column schema hints and required-column checks for uploaded tables.

use serde::{Deserialize, Serialize};

use super::normalize::normalize;
use super::types::DatasetType;
use crate::dates::parse_date;
use crate::input::DataTable;

/// Storage type inferred from a column's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnDtype {
    Int64,
    Float64,
    Bool,
    Datetime,
    /// Text, mixed, or entirely empty.
    Object,
}

impl ColumnDtype {
    /// Returns true if this type is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnDtype::Int64 | ColumnDtype::Float64)
    }
}

/// How a column is meant to be used downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnRole {
    Numeric,
    Date,
    Categorical,
}

/// Schema entry for one column of a preview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSchema {
    pub name: String,
    pub dtype: ColumnDtype,
    pub role: ColumnRole,
}

/// Columns each dataset type is expected to carry.
///
/// Sales has none: its columns are located heuristically instead.
pub fn required_columns(dataset_type: DatasetType) -> &'static [&'static str] {
    match dataset_type {
        DatasetType::Sales => &[],
        DatasetType::Inventory => &["date", "sku", "location", "stock_level"],
        DatasetType::Production => &["date", "line_id", "sku", "capacity"],
        DatasetType::PurchaseOrders => {
            &["po_id", "sku", "supplier", "location", "order_date", "eta_date"]
        }
        DatasetType::MasterData => &["sku", "description", "category", "uom"],
        DatasetType::ExternalSignals => &["date", "location"],
    }
}

/// Required columns absent from `columns`, compared by normalized name, sorted.
pub fn missing_required_columns<S: AsRef<str>>(
    columns: &[S],
    dataset_type: DatasetType,
) -> Vec<&'static str> {
    let present: Vec<String> = columns.iter().map(|c| normalize(c.as_ref())).collect();
    let mut missing: Vec<&'static str> = required_columns(dataset_type)
        .iter()
        .copied()
        .filter(|req| !present.contains(&normalize(req)))
        .collect();
    missing.sort_unstable();
    missing
}

/// Infer a schema for every column and collect upload warnings.
pub fn analyze_table(table: &DataTable, dataset_type: DatasetType) -> (Vec<ColumnSchema>, Vec<String>) {
    let schema = table
        .headers
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let dtype = infer_dtype(table.column_values(idx));
            ColumnSchema {
                name: name.clone(),
                dtype,
                role: infer_role(name, dtype),
            }
        })
        .collect();

    let mut warnings = Vec::new();
    let missing = missing_required_columns(&table.headers, dataset_type);
    if !missing.is_empty() {
        warnings.push(format!(
            "Missing expected columns for {}: {}",
            dataset_type,
            missing.join(", ")
        ));
    }

    (schema, warnings)
}

/// Infer a storage type from raw cell values, ignoring nulls.
pub fn infer_dtype<'a>(values: impl Iterator<Item = &'a str>) -> ColumnDtype {
    let mut seen_any = false;
    let (mut all_int, mut all_float, mut all_bool, mut all_date) = (true, true, true, true);

    for value in values.filter(|v| !DataTable::is_null_value(v)) {
        seen_any = true;
        let v = value.trim();
        all_int &= v.parse::<i64>().is_ok();
        all_float &= v.parse::<f64>().is_ok_and(f64::is_finite);
        all_bool &= v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("false");
        all_date &= parse_date(v).is_some();
        if !(all_int || all_float || all_bool || all_date) {
            break;
        }
    }

    if !seen_any {
        ColumnDtype::Object
    } else if all_int {
        ColumnDtype::Int64
    } else if all_float {
        ColumnDtype::Float64
    } else if all_bool {
        ColumnDtype::Bool
    } else if all_date {
        ColumnDtype::Datetime
    } else {
        ColumnDtype::Object
    }
}

fn infer_role(name: &str, dtype: ColumnDtype) -> ColumnRole {
    if dtype == ColumnDtype::Datetime || name.to_lowercase().contains("date") {
        ColumnRole::Date
    } else if dtype.is_numeric() {
        ColumnRole::Numeric
    } else {
        ColumnRole::Categorical
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_table(headers: Vec<&str>, rows: Vec<Vec<&str>>) -> DataTable {
        DataTable::new(
            headers.into_iter().map(String::from).collect(),
            rows.into_iter()
                .map(|r| r.into_iter().map(String::from).collect())
                .collect(),
            b',',
        )
    }

    #[test]
    fn test_infer_dtypes() {
        assert_eq!(infer_dtype(["1", "2", ""].into_iter()), ColumnDtype::Int64);
        assert_eq!(infer_dtype(["1.5", "2"].into_iter()), ColumnDtype::Float64);
        assert_eq!(infer_dtype(["true", "FALSE"].into_iter()), ColumnDtype::Bool);
        assert_eq!(infer_dtype(["2025-01-01", "2025-02-01"].into_iter()), ColumnDtype::Datetime);
        assert_eq!(infer_dtype(["A", "1"].into_iter()), ColumnDtype::Object);
        assert_eq!(infer_dtype(["", "NA"].into_iter()), ColumnDtype::Object);
    }

    #[test]
    fn test_roles() {
        let table = make_table(
            vec!["order_date", "sku", "qty", "shipped"],
            vec![vec!["2025-01-01", "A", "3", "2025-01-03"]],
        );
        let (schema, _) = analyze_table(&table, DatasetType::Sales);
        let roles: Vec<ColumnRole> = schema.iter().map(|c| c.role).collect();
        assert_eq!(
            roles,
            vec![ColumnRole::Date, ColumnRole::Categorical, ColumnRole::Numeric, ColumnRole::Date]
        );
    }

    #[test]
    fn test_sales_has_no_required_columns() {
        let table = make_table(vec!["anything"], vec![vec!["x"]]);
        let (_, warnings) = analyze_table(&table, DatasetType::Sales);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_missing_columns_warning() {
        let table = make_table(
            vec!["Date", "SKU", "Stock Level"],
            vec![vec!["2025-01-01", "A", "10"]],
        );
        let (_, warnings) = analyze_table(&table, DatasetType::Inventory);
        assert_eq!(warnings, vec!["Missing expected columns for inventory: location"]);
    }

    #[test]
    fn test_missing_columns_sorted() {
        let missing = missing_required_columns(&["sku"], DatasetType::PurchaseOrders);
        assert_eq!(missing, vec!["eta_date", "location", "order_date", "po_id", "supplier"]);
    }
}
