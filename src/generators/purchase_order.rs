use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::{AccountRef, compose, default_currency, flag, pick, pick_owned};
use crate::attributes::{self, CustomAttributeSpec, RadioOptions, ValueStyle};
use crate::context::{GenContext, add_days, iso};
use crate::dataset::Dataset;
use crate::errors::GenError;
use crate::fanout::{ContinuationRule, ItemConfig, LineKind, fan_out};
use crate::ids;
use crate::types::{EntityKind, Row, Value};

pub const ATTR_PREFIX: &str = "ca_purchase_order_attr_";
pub const LINE_ATTR_PREFIX: &str = "ca_purchase_order_item_attr_";
pub const DEFAULT_ITEM_RANGE: (usize, usize) = (1, 5);
const DISCOUNT_PROBABILITY: f64 = 0.12;

const NOTES: [&str; 7] = [
    "Expedited delivery required",
    "Standard procurement terms apply",
    "Bulk purchase for Q1 inventory",
    "Urgent restock order",
    "Annual vendor contract renewal",
    "Special pricing negotiated",
    "Volume discount applied",
];

const LINE_ADJECTIVES: [&str; 7] = ["Premium", "Standard", "Bulk", "Industrial", "Commercial", "Quality", "Economy"];
const LINE_NOUNS: [&str; 7] = ["Material", "Component", "Supply", "Part", "Equipment", "Tool", "Resource"];

const LINE_NOTES: [&str; 6] = [
    "Inspect upon delivery",
    "Store in cool, dry place",
    "Handle with care",
    "Quality check required",
    "Direct to warehouse",
    "Requires vendor certification",
];

pub const ACCOUNTING_CODES: [&str; 8] = [
    "Account Payable",
    "Inventory",
    "Cost of Goods Sold",
    "Purchase Returns",
    "Raw Materials",
    "Operating Supplies",
    "Equipment Purchase",
    "Freight In",
];

const TAX_CODES: [&str; 6] = ["GST", "VAT", "PST", "HST", "QST", "EXEMPT"];
const UOMS: [&str; 10] = ["EA", "BX", "CS", "PK", "KG", "LB", "L", "GAL", "M", "FT"];
const TAX_BASIS: [&str; 3] = ["PRICE", "TOTAL", ""];
const TRUE_FALSE: [&str; 2] = ["TRUE", "FALSE"];

/// Line columns present on every row, blank unless a free-text line fills them.
const LINE_COLUMNS: [&str; 18] = [
    "purchase_line_item_id",
    "purchase_line_item_name",
    "purchase_line_item_quantity",
    "purchase_line_item_price",
    "purchase_line_item_discount",
    "purchase_line_purchase_price_is_tax_inclusive",
    "purchase_line_item_purchase_tax_code",
    "purchase_line_item_purchase_tax_rate",
    "purchase_line_item_price_tax_exempt",
    "purchase_line_item_accounting_code",
    "purchase_line_purchase_line_note",
    "purchase_line_base_uom",
    "purchase_line_purchase_uom",
    "purchase_line_tax_inclusive_based_on",
    "purchase_line_discount_type",
    "purchase_line_rate_option",
    "purchase_line_charge_type",
    "purchase_line_item_warehouse_id",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarehouseConfig {
    pub use_warehouse: bool,
    pub warehouses: Vec<String>,
}

impl WarehouseConfig {
    /// Warehouses W-1..W-3.
    #[must_use]
    pub fn stock() -> Self {
        Self { use_warehouse: true, warehouses: vec!["W-1".into(), "W-2".into(), "W-3".into()] }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PurchaseOrderConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_order_count: Option<usize>,
    pub account_ids: Vec<String>,
    pub default_currency: String,
    pub warehouse_config: WarehouseConfig,
    pub purchase_order_custom_attributes: Vec<CustomAttributeSpec>,
    pub item_config: ItemConfig,
    pub line_item_custom_attributes: Vec<CustomAttributeSpec>,
}

impl Default for PurchaseOrderConfig {
    fn default() -> Self {
        Self {
            purchase_order_count: None,
            account_ids: Vec::new(),
            default_currency: default_currency(),
            warehouse_config: WarehouseConfig::default(),
            purchase_order_custom_attributes: Vec::new(),
            item_config: ItemConfig::with_range(DEFAULT_ITEM_RANGE.0, DEFAULT_ITEM_RANGE.1),
            line_item_custom_attributes: Vec::new(),
        }
    }
}

impl PurchaseOrderConfig {
    #[must_use]
    pub fn with_default_attributes(mut self) -> Self {
        self.purchase_order_custom_attributes = attributes::default_set(ATTR_PREFIX, RadioOptions::Letters);
        self.line_item_custom_attributes = attributes::default_set(LINE_ATTR_PREFIX, RadioOptions::Letters);
        self
    }
}

/// Generate `count` purchase orders. System lines carry only `purchase_line_item_id`.
///
/// # Errors
/// Returns [`GenError::NoUpstreamIds`] when no account is available.
pub fn generate(
    cfg: &PurchaseOrderConfig,
    count: usize,
    accounts: &[AccountRef],
    ctx: &mut GenContext,
) -> Result<Dataset, GenError> {
    let from_cfg;
    let accounts = if accounts.is_empty() {
        from_cfg = AccountRef::from_ids(&cfg.account_ids);
        &from_cfg
    } else {
        accounts
    };
    if accounts.is_empty() {
        return Err(GenError::NoUpstreamIds(
            "no account IDs available to associate with purchase orders".into(),
        ));
    }

    let plan = cfg.item_config.plan(DEFAULT_ITEM_RANGE).with_fallback_ids(ctx, ids::fallback_item_ids);
    let discount_p = cfg
        .item_config
        .line_item_discount_probability
        .unwrap_or(DISCOUNT_PROBABILITY)
        .clamp(0.0, 1.0);
    let style = ValueStyle::STANDARD;
    let mut ds = Dataset::new(EntityKind::PurchaseOrder, count);

    for idx in 0..count {
        let Some(account) = accounts.choose(&mut ctx.rng).cloned() else { continue };
        let shift: i64 = ctx.rng.random_range(-30..=30);
        let issue = ctx.days_from_today(shift);
        let due = add_days(issue, ctx.rng.random_range(15..=90));
        let completion = add_days(issue, ctx.rng.random_range(0..=60));

        let mut parent = Row::new();
        parent.set("purchase_order_id", ids::purchase_order_id(ctx));
        parent.set("purchase_order_origin", format!("CSV IMPORT - {}", idx + 1));
        parent.set("purchase_order_currency", account.currency.clone().unwrap_or_else(|| cfg.default_currency.clone()));
        parent.set("purchase_order_issue_date", iso(issue));
        parent.set("purchase_order_due_date", iso(due));
        parent.set("purchase_order_expected_completion_date", iso(completion));
        parent.set("purchase_order_price_tax_inclusive", pick(ctx, &TRUE_FALSE));
        parent.set("purchase_order_purchase_order_note", pick(ctx, &NOTES));
        parent.set("purchase_order_account_id", account.id.clone());
        parent.set("purchase_order_custom_form_template", "");
        for col in LINE_COLUMNS {
            parent.set(col, "");
        }

        let rows = fan_out(&parent, &plan, &ContinuationRule::PURCHASE_ORDER, ctx, |row, kind, ctx| {
            match kind {
                LineKind::System(id) => row.set("purchase_line_item_id", id.as_str()),
                LineKind::FreeText => {
                    fill_line(row, &cfg.warehouse_config, discount_p, ctx);
                }
            }
            attributes::apply(row, &cfg.line_item_custom_attributes, &style, ctx);
            attributes::apply(row, &cfg.purchase_order_custom_attributes, &style, ctx);
        });
        ds.rows.extend(rows);
    }

    ds.date_columns = vec![
        "purchase_order_issue_date".into(),
        "purchase_order_due_date".into(),
        "purchase_order_expected_completion_date".into(),
    ];
    ds.date_columns.extend(attributes::date_columns(&cfg.purchase_order_custom_attributes));
    ds.date_columns.extend(attributes::date_columns(&cfg.line_item_custom_attributes));
    log::info!("purchase_order: generated {} purchase orders in {} rows", count, ds.len());
    Ok(ds)
}

fn fill_line(row: &mut Row, warehouses: &WarehouseConfig, discount_p: f64, ctx: &mut GenContext) {
    row.set("purchase_line_item_name", compose(ctx, &LINE_ADJECTIVES, &LINE_NOUNS));
    row.set("purchase_line_item_quantity", ctx.rng.random_range(1..=100i64));
    row.set("purchase_line_item_price", ctx.money(10.0, 5000.0));
    row.set("purchase_line_item_accounting_code", pick(ctx, &ACCOUNTING_CODES));
    row.set("purchase_line_purchase_line_note", pick(ctx, &LINE_NOTES));
    let discount = if ctx.chance(discount_p) { Value::Float(ctx.money(5.0, 250.0)) } else { Value::empty() };
    row.set("purchase_line_item_discount", discount);
    row.set("purchase_line_purchase_price_is_tax_inclusive", pick(ctx, &TRUE_FALSE));
    row.set("purchase_line_item_purchase_tax_code", pick(ctx, &TAX_CODES));
    row.set("purchase_line_item_purchase_tax_rate", ctx.money(5.0, 20.0));
    row.set("purchase_line_item_price_tax_exempt", flag(ctx, 0.1));

    let base = pick(ctx, &UOMS);
    // base unit counts twice in the purchase UOM draw
    let purchase_uom = if ctx.rng.random_range(0..=UOMS.len()) == 0 { base.clone() } else { pick(ctx, &UOMS) };
    row.set("purchase_line_base_uom", base);
    row.set("purchase_line_purchase_uom", purchase_uom);
    row.set("purchase_line_tax_inclusive_based_on", pick(ctx, &TAX_BASIS));
    row.set("purchase_line_discount_type", "FIXED");
    row.set("purchase_line_rate_option", "FIXED");
    row.set("purchase_line_charge_type", "FIXED");

    let warehouse = if warehouses.use_warehouse { pick_owned(ctx, &warehouses.warehouses) } else { String::new() };
    row.set("purchase_line_item_warehouse_id", warehouse);
}
