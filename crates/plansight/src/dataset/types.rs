//! Dataset categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Business meaning of an uploaded table.
///
/// Declaration order is significant: it is the tie-break order used by the
/// column classifier (first declared wins).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetType {
    /// Sell-out / order history.
    Sales,
    /// Stock levels per location.
    Inventory,
    /// Production lines and capacity.
    Production,
    /// Open and historical purchase orders.
    PurchaseOrders,
    /// Item master (descriptions, categories, units of measure).
    MasterData,
    /// Weather, holidays, macro indicators and other demand drivers.
    ExternalSignals,
}

impl DatasetType {
    /// Every type, in declaration order.
    pub const ALL: [DatasetType; 6] = [
        DatasetType::Sales,
        DatasetType::Inventory,
        DatasetType::Production,
        DatasetType::PurchaseOrders,
        DatasetType::MasterData,
        DatasetType::ExternalSignals,
    ];

    /// Wire name (`sales`, `purchase_orders`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetType::Sales => "sales",
            DatasetType::Inventory => "inventory",
            DatasetType::Production => "production",
            DatasetType::PurchaseOrders => "purchase_orders",
            DatasetType::MasterData => "master_data",
            DatasetType::ExternalSignals => "external_signals",
        }
    }
}

impl fmt::Display for DatasetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatasetType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "sales" => Ok(DatasetType::Sales),
            "inventory" => Ok(DatasetType::Inventory),
            "production" => Ok(DatasetType::Production),
            "purchase_orders" | "po" => Ok(DatasetType::PurchaseOrders),
            "master_data" | "master" => Ok(DatasetType::MasterData),
            "external_signals" | "signals" => Ok(DatasetType::ExternalSignals),
            _ => Err(format!(
                "Unknown dataset type: {}. Use: sales, inventory, production, purchase_orders, master_data, or external_signals.",
                s
            )),
        }
    }
}

/// Display label for an optional classification result.
pub fn type_label(dataset_type: Option<DatasetType>) -> &'static str {
    dataset_type.map(|t| t.as_str()).unwrap_or("unknown")
}
