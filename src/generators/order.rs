use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::{AccountRef, compose, default_currency, fakes, pick};
use crate::attributes::{self, CustomAttributeSpec, RadioOptions, ValueStyle};
use crate::context::GenContext;
use crate::dataset::Dataset;
use crate::errors::GenError;
use crate::fanout::{ContinuationRule, ItemConfig, LineKind, SystemIdKind, fan_out};
use crate::ids;
use crate::types::{EntityKind, Row, Value};

pub const ATTR_PREFIX: &str = "ca_order_attr_";
pub const LINE_ATTR_PREFIX: &str = "ca_order_line_item_attr_";
pub const DEFAULT_ITEM_RANGE: (usize, usize) = (1, 1);
pub const DEFAULT_DISCOUNT_PROBABILITY: f64 = 0.12;

const NAME_PREFIXES: [&str; 6] = ["Wholesale", "Retail", "Subscription", "Enterprise", "Priority", "Express"];
const NAME_DESCRIPTORS: [&str; 6] = ["Bundle", "Plan", "Package", "Order", "Shipment", "Service"];

const DESCRIPTIONS: [&str; 7] = [
    "Monthly recurring subscription order",
    "One-off purchase for enterprise client",
    "Annual wholesale plan renewal",
    "Quarterly shipment for retail partner",
    "Custom implementation work order",
    "Expedited service engagement",
    "Pilot program enrollment",
];

const INVOICE_NOTES: [&str; 5] = [
    "Invoice includes expedited fulfillment.",
    "Ensure payment per standard net terms.",
    "Apply loyalty discount if eligible.",
    "Reference PO provided by customer.",
    "Contact finance for billing adjustments.",
];

const LINE_ADJECTIVES: [&str; 7] = ["Premium", "Deluxe", "Standard", "Basic", "Ultimate", "Eco", "Smart"];
const LINE_NOUNS: [&str; 7] = ["Subscription", "Package", "Bundle", "Service", "Addon", "Module", "Plan"];

const LINE_NOTES: [&str; 5] = [
    "Includes onboarding and provisioning.",
    "Apply standard billing terms.",
    "Priority delivery requested by client.",
    "Requires monthly reconciliation.",
    "Coordinate with fulfillment team.",
];

const TAX_EXEMPT_CHOICES: [&str; 3] = ["TRUE", "FALSE", ""];

const LINE_COLUMNS: [&str; 10] = [
    "line_item_uuid",
    "line_item_id",
    "line_item_name",
    "line_item_order_quantity",
    "line_item_invoice_note",
    "line_item_description",
    "line_item_price_snapshot_price",
    "line_item_discount_type",
    "line_item_discount",
    "line_item_tax_exempt",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_count: Option<usize>,
    pub account_ids: Vec<String>,
    pub default_currency: String,
    pub order_custom_attributes: Vec<CustomAttributeSpec>,
    pub item_config: ItemConfig,
    pub line_item_custom_attributes: Vec<CustomAttributeSpec>,
}

impl Default for OrderConfig {
    fn default() -> Self {
        Self {
            order_count: None,
            account_ids: Vec::new(),
            default_currency: default_currency(),
            order_custom_attributes: Vec::new(),
            item_config: ItemConfig { system_identifier_type: Some(SystemIdKind::Uuid), ..ItemConfig::default() },
            line_item_custom_attributes: Vec::new(),
        }
    }
}

impl OrderConfig {
    #[must_use]
    pub fn with_default_attributes(mut self) -> Self {
        self.order_custom_attributes = attributes::default_set(ATTR_PREFIX, RadioOptions::Numbered);
        self.line_item_custom_attributes = attributes::default_set(LINE_ATTR_PREFIX, RadioOptions::Numbered);
        self
    }

    fn discount_probability(&self) -> f64 {
        self.item_config
            .line_item_discount_probability
            .unwrap_or(DEFAULT_DISCOUNT_PROBABILITY)
            .clamp(0.0, 1.0)
    }
}

/// Generate `count` orders.
///
/// Each line is either a system item (`system_item_uuid` or `system_item_code`)
/// or a free-text `line_item_*` block. Currency follows the account reference
/// when it carries one.
///
/// # Errors
/// Returns [`GenError::NoUpstreamIds`] when no account is available.
pub fn generate(
    cfg: &OrderConfig,
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
        return Err(GenError::NoUpstreamIds("no account IDs available to associate with orders".into()));
    }

    let id_kind = cfg.item_config.system_identifier_type.unwrap_or_default();
    let plan = cfg
        .item_config
        .plan(DEFAULT_ITEM_RANGE)
        .with_fallback_ids(ctx, |c| ids::fallback_system_ids(c, id_kind == SystemIdKind::Uuid));
    let discount_p = cfg.discount_probability();
    let style = ValueStyle::ORDER;
    let mut ds = Dataset::new(EntityKind::Order, count);

    for _ in 0..count {
        let Some(account) = accounts.choose(&mut ctx.rng).cloned() else { continue };
        let name = format!("{} {}", compose(ctx, &NAME_PREFIXES, &NAME_DESCRIPTORS), ctx.rng.random_range(1..=999));

        let mut parent = Row::new();
        parent.set("order_id", ids::order_id(ctx));
        parent.set("order_name", name.as_str());
        parent.set("order_display_name", name.as_str());
        parent.set("order_description", pick(ctx, &DESCRIPTIONS));
        parent.set("order_invoice_note", format!("{} ({name})", pick(ctx, &INVOICE_NOTES)));
        parent.set("order_currency", account.currency.clone().unwrap_or_else(|| cfg.default_currency.clone()));
        parent.set("order_account_id", account.id.clone());

        let rows = fan_out(&parent, &plan, &ContinuationRule::ORDER, ctx, |row, kind, ctx| {
            match kind {
                LineKind::System(id) => {
                    set_system_item(row, id, id_kind, plan.include_system_items);
                    for col in LINE_COLUMNS {
                        row.set(col, "");
                    }
                }
                LineKind::FreeText => {
                    set_system_item(row, "", id_kind, plan.include_system_items);
                    fill_line(row, discount_p, ctx);
                }
            }
            attributes::apply(row, &cfg.line_item_custom_attributes, &style, ctx);
            attributes::apply(row, &cfg.order_custom_attributes, &style, ctx);
        });
        ds.rows.extend(rows);
    }

    log::info!("order: generated {} orders in {} rows", count, ds.len());
    Ok(ds)
}

fn set_system_item(row: &mut Row, id: &str, kind: SystemIdKind, enabled: bool) {
    if !enabled {
        return;
    }
    let (filled, blank) = match kind {
        SystemIdKind::Code => ("system_item_code", "system_item_uuid"),
        SystemIdKind::Uuid => ("system_item_uuid", "system_item_code"),
    };
    row.set(filled, id);
    row.set(blank, "");
}

fn fill_line(row: &mut Row, discount_p: f64, ctx: &mut GenContext) {
    row.set("line_item_uuid", format!("LI-{}", ctx.rng.random_range(100_000..=999_999)));
    row.set("line_item_id", format!("LINE-{}", ctx.rng.random_range(100_000..=999_999)));
    row.set("line_item_name", compose(ctx, &LINE_ADJECTIVES, &LINE_NOUNS));
    row.set("line_item_order_quantity", ctx.rng.random_range(1..=50i64));
    row.set("line_item_invoice_note", pick(ctx, &LINE_NOTES));
    row.set("line_item_description", fakes::sentence(&mut ctx.rng, 10));
    row.set("line_item_price_snapshot_price", ctx.money(10.0, 5000.0));
    if ctx.chance(discount_p) {
        if ctx.rng.random_bool(0.5) {
            row.set("line_item_discount_type", "FIXED");
            row.set("line_item_discount", ctx.money(5.0, 250.0));
        } else {
            row.set("line_item_discount_type", "PERCENTAGE");
            row.set("line_item_discount", Value::Int(ctx.rng.random_range(1..=100)));
        }
    } else {
        row.set("line_item_discount_type", "");
        row.set("line_item_discount", "");
    }
    row.set("line_item_tax_exempt", pick(ctx, &TAX_EXEMPT_CHOICES));
}
