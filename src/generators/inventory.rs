use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::types::{EntityKind, Row};

/// Inventory import columns. Rows are emitted blank for manual completion.
pub const COLUMNS: [&str; 5] = [
    "inventory_item_uuid",
    "inventory_item_warehouse",
    "inventory_quantity",
    "inventory_accounting_code",
    "inventory_expiry_date",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_count: Option<usize>,
}

pub fn generate(_cfg: &InventoryConfig, count: usize) -> Dataset {
    let mut ds = Dataset::new(EntityKind::Inventory, count);
    ds.column_order = COLUMNS.iter().map(|c| (*c).to_string()).collect();
    ds.rows = (0..count)
        .map(|_| {
            let mut row = Row::new();
            for col in COLUMNS {
                row.set(col, "");
            }
            row
        })
        .collect();
    log::info!("inventory: generated {} blank rows", count);
    ds
}
