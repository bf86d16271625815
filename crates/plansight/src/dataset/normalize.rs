//! Column name canonicalization.

/// Canonicalize a column name for comparison.
///
/// Lower-cases the input and strips whitespace, `-` and `_`, so `Order Date`,
/// `order_date`, `order-date` and `OrderDate` all compare equal. The result is a
/// matching key only; callers always keep and display the original name.
pub fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Normalize every name in a column list, preserving order.
pub fn normalize_all<S: AsRef<str>>(columns: &[S]) -> Vec<String> {
    columns.iter().map(|c| normalize(c.as_ref())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_separators() {
        assert_eq!(normalize("Order Date"), "orderdate");
        assert_eq!(normalize("order_date"), "orderdate");
        assert_eq!(normalize("order-date"), "orderdate");
        assert_eq!(normalize("OrderDate"), "orderdate");
        assert_eq!(normalize("  Stock\tLevel "), "stocklevel");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for name in ["PO_ID", "Units Sold", "eta-date", "", "___"] {
            let once = normalize(name);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn test_normalize_all_keeps_order() {
        assert_eq!(normalize_all(&["SKU", "Qty_Sold"]), vec!["sku", "qtysold"]);
    }
}
