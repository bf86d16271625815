//! File-name based dataset type guess.
//!
//! Much weaker than [`classify_by_columns`](super::classify_by_columns): it only
//! serves as an initial guess right after a file is picked, before its header
//! has been read.

use super::types::DatasetType;

/// Substring rules, checked in order. The first rule with any matching needle wins.
const FILENAME_RULES: &[(&[&str], DatasetType)] = &[
    (&["sales", "sell"], DatasetType::Sales),
    (&["inventory", "stock"], DatasetType::Inventory),
    (&["production", "manufacturing"], DatasetType::Production),
    (&["purchase", "po_", "vendor"], DatasetType::PurchaseOrders),
    (&["master", "catalog"], DatasetType::MasterData),
    (&["signal", "external", "macro"], DatasetType::ExternalSignals),
];

/// Guess a dataset type from a file name.
pub fn classify_by_filename(file_name: &str) -> Option<DatasetType> {
    let lower = file_name.to_lowercase();
    FILENAME_RULES
        .iter()
        .find(|(needles, _)| needles.iter().any(|n| lower.contains(n)))
        .map(|(_, dataset_type)| *dataset_type)
}
