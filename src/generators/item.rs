//! Catalogue items: one flat row per item with sale, purchase and inventory blocks.

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::{GroupConfig, fakes, flag, pick, pick_owned};
use crate::attributes::{self, CustomAttributeSpec, RadioOptions, ValueStyle};
use crate::context::GenContext;
use crate::dataset::Dataset;
use crate::errors::GenError;
use crate::ids;
use crate::types::{EntityKind, Row};

pub const ATTR_PREFIX: &str = "ca_item_attr_";

pub const ITEM_TYPES: [&str; 6] = ["STANDARD", "GIFT_CERTIFICATE", "DIRECT_COST", "VARIATION", "BUNDLE", "FAMILY"];

pub const BASE_UOMS: [&str; 11] = [
    "Metre", "Kilometre", "Gram", "Kilogram", "Litre", "Kilolitre", "Week", "Month", "Year", "Watt", "Kilowatt",
];

const MODES: [&str; 2] = ["MANUAL", "AUTOMATIC"];
const THRESHOLD_BASIS: [&str; 2] = ["INDIVIDUAL_WAREHOUSE", "ALL_WAREHOUSE"];
const QTY_DETERMINATIONS: [&str; 5] = [
    "QUANTITY_ON_HAND",
    "QUANTITY_ON_ORDER",
    "QUANTITY_ON_PURCHASE_RETURN",
    "QUANTITY_ON_RETURN",
    "QUANTITY_PROMISED",
];
const QTY_AVAILABLE: [&str; 2] = ["UNLIMITED", "QTY_AVAILABLE"];
const TEXT_WORDS: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UomConfig {
    pub use_uom: bool,
    pub uoms: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomFormConfig {
    pub forms: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupplierConfig {
    #[serde(rename = "use")]
    pub enabled: bool,
    pub suppliers: Vec<String>,
    pub prices: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StockConfig {
    #[serde(rename = "use")]
    pub enabled: bool,
    pub warehouses: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_count: Option<usize>,
    pub item_types: Vec<String>,
    pub uom_config: UomConfig,
    pub group_config: GroupConfig,
    pub custom_form_config: CustomFormConfig,
    pub custom_attributes: Vec<CustomAttributeSpec>,
    pub line_custom_attributes: Vec<CustomAttributeSpec>,
    pub sale_currencies: Vec<String>,
    pub sale_tax_codes: Vec<String>,
    pub sale_accounting_enabled: bool,
    pub discount_profiles: Vec<String>,
    pub pricing_levels: Vec<String>,
    pub sale_properties_enabled: bool,
    pub purchase_currencies: Vec<String>,
    pub purchase_tax_codes: Vec<String>,
    pub purchase_accounting_enabled: bool,
    pub supplier_config: SupplierConfig,
    pub inventory_config: StockConfig,
}

impl Default for ItemConfig {
    fn default() -> Self {
        Self {
            item_count: None,
            item_types: vec!["STANDARD".to_string()],
            uom_config: UomConfig::default(),
            group_config: GroupConfig::default(),
            custom_form_config: CustomFormConfig::default(),
            custom_attributes: Vec::new(),
            line_custom_attributes: Vec::new(),
            sale_currencies: vec![super::default_currency()],
            sale_tax_codes: Vec::new(),
            sale_accounting_enabled: true,
            discount_profiles: Vec::new(),
            pricing_levels: Vec::new(),
            sale_properties_enabled: true,
            purchase_currencies: vec![super::default_currency()],
            purchase_tax_codes: Vec::new(),
            purchase_accounting_enabled: true,
            supplier_config: SupplierConfig::default(),
            inventory_config: StockConfig::default(),
        }
    }
}

impl ItemConfig {
    #[must_use]
    pub fn with_default_attributes(mut self) -> Self {
        self.custom_attributes = attributes::default_set(ATTR_PREFIX, RadioOptions::Letters);
        self
    }

    fn types(&self) -> Vec<String> {
        if self.item_types.is_empty() { vec!["STANDARD".to_string()] } else { self.item_types.clone() }
    }
}

/// Generate `count` item rows.
///
/// # Errors
/// Returns [`GenError::InvalidConfig`] when an item type outside the known set is requested.
pub fn generate(cfg: &ItemConfig, count: usize, ctx: &mut GenContext) -> Result<Dataset, GenError> {
    let types = cfg.types();
    if let Some(bad) = types.iter().find(|t| !ITEM_TYPES.contains(&t.as_str())) {
        return Err(GenError::InvalidConfig(format!("unknown item type '{bad}'")));
    }

    let grouped = cfg.group_config.rows(count, ctx);
    let uoms: Vec<String> = if cfg.uom_config.uoms.is_empty() {
        BASE_UOMS.iter().map(|s| (*s).to_string()).collect()
    } else {
        cfg.uom_config.uoms.clone()
    };
    let sale_currencies = non_empty_or_default(&cfg.sale_currencies);
    let purchase_currencies = non_empty_or_default(&cfg.purchase_currencies);
    let style = ValueStyle::ITEM;
    let mut ds = Dataset::new(EntityKind::Item, count);

    for i in 0..count {
        let mut row = Row::new();
        let name = fakes::catch_phrase(&mut ctx.rng);
        row.set("item_id", ids::item_id(ctx));
        row.set("item_name", name.as_str());
        row.set("item_display_name", name);
        row.set("item_type", pick_owned(ctx, &types));
        row.set("item_description", fakes::sentence(&mut ctx.rng, TEXT_WORDS));
        row.set("item_invoice_note", fakes::sentence(&mut ctx.rng, TEXT_WORDS));
        row.set("item_origin", format!("CSV IMPORT - {}", i + 1));
        let base_uom = if cfg.uom_config.use_uom { pick_owned(ctx, &uoms) } else { String::new() };
        row.set("item_base_uom", base_uom);
        row.set("item_upc_code", format!("UPC-{}", ctx.rng.random_range(100_000..=999_999)));
        row.set("item_item_number", format!("ITEM-{}", ctx.rng.random_range(1000..=9999)));
        let group = if grouped.contains(&i) { pick_owned(ctx, &cfg.group_config.group_names) } else { String::new() };
        row.set("item_group", group);
        row.set("item_custom_form", pick_owned(ctx, &cfg.custom_form_config.forms));

        sale_block(&mut row, cfg, &sale_currencies, ctx);
        purchase_block(&mut row, cfg, &purchase_currencies, ctx);
        inventory_block(&mut row, &cfg.inventory_config, ctx);

        attributes::apply(&mut row, &cfg.custom_attributes, &style, ctx);
        attributes::apply(&mut row, &cfg.line_custom_attributes, &style, ctx);
        ds.rows.push(row);
    }

    log::info!("item: generated {} items", ds.len());
    Ok(ds)
}

fn non_empty_or_default(pool: &[String]) -> Vec<String> {
    if pool.is_empty() { vec![super::default_currency()] } else { pool.to_vec() }
}

fn optional_pick(ctx: &mut GenContext, pool: &[String], p: f64) -> String {
    if !pool.is_empty() && ctx.chance(p) { pick_owned(ctx, pool) } else { String::new() }
}

fn sale_block(row: &mut Row, cfg: &ItemConfig, currencies: &[String], ctx: &mut GenContext) {
    row.set("item_sale_enabled", "TRUE");
    row.set("item_sale_sales_currency_list", currencies.join(","));
    row.set("item_sale_charge_type", "FIXED");
    row.set("item_sale_pricing_method", "STANDARD");
    row.set("item_sale_pricing_type", "PER_UNIT");
    row.set("item_sale_sales_uom_list", "");
    row.set("item_sale_sales_currency", pick_owned(ctx, currencies));
    row.set("item_sale_price", ctx.money(5.0, 1000.0));
    row.set("item_sale_price_tax_inclusive", flag(ctx, 0.1));
    row.set("item_sale_tax_code", optional_pick(ctx, &cfg.sale_tax_codes, 0.6));
    let revenue = if cfg.sale_accounting_enabled && ctx.chance(0.7) { "Sales Revenue" } else { "" };
    row.set("item_sale_accounting_code_revenue", revenue);
    row.set("item_sale_discount_profile", optional_pick(ctx, &cfg.discount_profiles, 0.5));
    row.set("item_sale_invoice_note", fakes::sentence(&mut ctx.rng, TEXT_WORDS));
    let levels = !cfg.pricing_levels.is_empty();
    row.set("item_sale_use_pricing_level", if levels { flag(ctx, 0.2) } else { "" });
    row.set("item_sale_sales_pricing_level_list", optional_pick(ctx, &cfg.pricing_levels, 0.2));
    row.set("item_sale_use_future_pricing", flag(ctx, 0.1));

    let mode = |ctx: &mut GenContext| if cfg.sale_properties_enabled { pick(ctx, &MODES) } else { String::new() };
    let (fulfillment, billing, payment) = (mode(ctx), mode(ctx), mode(ctx));

    if ctx.chance(0.15) {
        row.set("item_sale_use_on_sale_price", "TRUE");
        row.set("item_sale_sale_price", ctx.money(5.0, 1000.0));
        row.set("item_sale_sale_price_variant", "FIXED");
    } else {
        row.set("item_sale_use_on_sale_price", "");
        row.set("item_sale_sale_price", "");
        row.set("item_sale_sale_price_variant", "");
    }
    row.set("item_sale_fulfillment_mode", fulfillment);
    row.set("item_sale_billing_mode", billing);
    row.set("item_sale_payment_mode", payment);
}

fn purchase_block(row: &mut Row, cfg: &ItemConfig, currencies: &[String], ctx: &mut GenContext) {
    row.set("item_purchase_enabled", "TRUE");
    row.set("item_purchase_purchase_currency_list", currencies.join(","));
    row.set("item_purchase_pricing_type", "PER_UNIT");
    row.set("item_purchase_purchase_uom_list", "");
    row.set("item_purchase_price", ctx.money(5.0, 800.0));
    row.set("item_purchase_purchase_currency", pick_owned(ctx, currencies));
    row.set("item_purchase_tax_exempt", flag(ctx, 0.1));
    row.set("item_purchase_price_tax_inclusive", flag(ctx, 0.1));
    row.set("item_purchase_tax_code", optional_pick(ctx, &cfg.purchase_tax_codes, 0.6));
    let cogs = if cfg.purchase_accounting_enabled && ctx.chance(0.7) { "Cost of Goods Sold" } else { "" };
    row.set("item_purchase_accounting_code", cogs);
    row.set("item_purchase_purchase_order_note", fakes::sentence(&mut ctx.rng, TEXT_WORDS));

    let suppliers = &cfg.supplier_config;
    if suppliers.enabled && ctx.chance(0.5) {
        row.set("item_purchase_use_supplier_management", "TRUE");
        row.set("item_purchase_suppliers", suppliers.suppliers.join(","));
        row.set("item_purchase_supplier_price", suppliers.prices.join(","));
    } else {
        row.set("item_purchase_use_supplier_management", "");
        row.set("item_purchase_suppliers", "");
        row.set("item_purchase_supplier_price", "");
    }
}

const INVENTORY_COLUMNS: [&str; 12] = [
    "item_inventory_enabled",
    "item_inventory_enable_warehouse_management",
    "item_inventory_warehouse_list",
    "item_inventory_default_warehouse",
    "item_inventory_enable_low_stock_notification",
    "item_inventory_low_stock_threshold_based_on",
    "item_inventory_enable_reordering",
    "item_inventory_reorder_threshold_based_on",
    "item_inventory_qty_avl_on_sale_determination",
    "item_inventory_qty_avl_on_sale",
    "item_inventory_use_temporary_qa_value",
    "item_inventory_use_pre_order",
];

fn inventory_block(row: &mut Row, stock: &StockConfig, ctx: &mut GenContext) {
    for col in INVENTORY_COLUMNS {
        row.set(col, "");
    }
    if !(stock.enabled && ctx.chance(0.2)) {
        return;
    }
    row.set("item_inventory_enabled", "TRUE");
    row.set("item_inventory_enable_warehouse_management", "TRUE");
    row.set("item_inventory_warehouse_list", stock.warehouses.join(","));
    row.set("item_inventory_default_warehouse", pick_owned(ctx, &stock.warehouses));
    row.set("item_inventory_enable_low_stock_notification", flag(ctx, 0.5));
    row.set("item_inventory_low_stock_threshold_based_on", pick(ctx, &THRESHOLD_BASIS));
    row.set("item_inventory_enable_reordering", flag(ctx, 0.5));
    row.set("item_inventory_reorder_threshold_based_on", pick(ctx, &THRESHOLD_BASIS));
    let k = ctx.rng.random_range(1..=QTY_DETERMINATIONS.len());
    let picked: Vec<&str> = QTY_DETERMINATIONS.choose_multiple(&mut ctx.rng, k).copied().collect();
    row.set("item_inventory_qty_avl_on_sale_determination", picked.join(","));
    row.set("item_inventory_qty_avl_on_sale", pick(ctx, &QTY_AVAILABLE));
    row.set("item_inventory_use_temporary_qa_value", flag(ctx, 0.5));
    row.set("item_inventory_use_pre_order", flag(ctx, 0.5));
}
