use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::{AccountRef, TaxConfig, compose, default_currency, flag, pick, pick_owned};
use crate::attributes::{self, CustomAttributeSpec, RadioOptions, ValueStyle};
use crate::context::{GenContext, add_days, iso};
use crate::dataset::Dataset;
use crate::errors::GenError;
use crate::fanout::{ContinuationRule, ItemConfig, LineKind, fan_out};
use crate::ids;
use crate::types::{EntityKind, Row};

pub const ATTR_PREFIX: &str = "ca_purchase_invoice_attr_";
pub const LINE_ATTR_PREFIX: &str = "ca_purchase_invoice_item_attr_";
pub const DEFAULT_ITEM_RANGE: (usize, usize) = (1, 5);

const NOTES: [&str; 10] = [
    "Payment due upon receipt. Thank you for your service.",
    "Please submit invoice as per payment terms.",
    "Contact our procurement department for any queries.",
    "Net payment terms apply as specified in purchase order.",
    "Please reference purchase invoice number when submitting invoice.",
    "All amounts shown in the specified currency.",
    "Goods received and inspected - approved for payment.",
    "Thank you for your prompt service and delivery.",
    "Payment will be processed within agreed terms.",
    "Invoice approved and forwarded to accounts payable.",
];

const ADJECTIVES: [&str; 7] = ["Premium", "Standard", "Professional", "Enterprise", "Basic", "Advanced", "Bulk"];
const GOODS: [&str; 7] = ["Materials", "Supplies", "Equipment", "Service", "Parts", "Components", "Resources"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PurchaseInvoiceConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_invoice_count: Option<usize>,
    pub account_ids: Vec<String>,
    pub default_currency: String,
    pub custom_form_template: String,
    pub tax_config: TaxConfig,
    pub purchase_invoice_custom_attributes: Vec<CustomAttributeSpec>,
    pub item_config: ItemConfig,
    pub line_item_custom_attributes: Vec<CustomAttributeSpec>,
}

impl Default for PurchaseInvoiceConfig {
    fn default() -> Self {
        Self {
            purchase_invoice_count: None,
            account_ids: Vec::new(),
            default_currency: default_currency(),
            custom_form_template: "Default for Purchase Invoice".to_string(),
            tax_config: TaxConfig::default(),
            purchase_invoice_custom_attributes: Vec::new(),
            item_config: ItemConfig::with_range(DEFAULT_ITEM_RANGE.0, DEFAULT_ITEM_RANGE.1),
            line_item_custom_attributes: Vec::new(),
        }
    }
}

impl PurchaseInvoiceConfig {
    #[must_use]
    pub fn with_default_attributes(mut self) -> Self {
        self.purchase_invoice_custom_attributes = attributes::default_set(ATTR_PREFIX, RadioOptions::Letters);
        self.line_item_custom_attributes = attributes::default_set(LINE_ATTR_PREFIX, RadioOptions::Letters);
        self
    }
}

/// Generate `count` purchase invoices. Invoice-level attributes are resolved on
/// the parent row, so continuation rows never repeat them.
///
/// # Errors
/// Returns [`GenError::NoUpstreamIds`] when no account is available.
pub fn generate(
    cfg: &PurchaseInvoiceConfig,
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
            "no account IDs available to associate with purchase invoices".into(),
        ));
    }

    let plan = cfg.item_config.plan(DEFAULT_ITEM_RANGE).with_fallback_ids(ctx, ids::fallback_item_ids);
    let tax_uuids = &cfg.tax_config.tax_uuids;
    let style = ValueStyle::STANDARD;
    let mut ds = Dataset::new(EntityKind::PurchaseInvoice, count);

    for idx in 0..count {
        let Some(account) = accounts.choose(&mut ctx.rng).cloned() else { continue };
        let ahead: i64 = ctx.rng.random_range(0..=90);
        let issue = ctx.days_from_today(ahead);
        let due = add_days(issue, ctx.rng.random_range(7..=90));

        let mut parent = Row::new();
        parent.set("purchase_invoice_id", ids::purchase_invoice_id(ctx));
        parent.set("purchase_invoice_origin", format!("CSV IMPORT - {}", idx + 1));
        parent.set(
            "purchase_invoice_currency",
            account.currency.clone().unwrap_or_else(|| cfg.default_currency.clone()),
        );
        parent.set("purchase_invoice_account_id", account.id.clone());
        parent.set("purchase_invoice_issue_date", iso(issue));
        parent.set("purchase_invoice_due_date", iso(due));
        parent.set("purchase_invoice_price_tax_inclusive", flag(ctx, 0.3));
        parent.set("purchase_invoice_purchase_invoice_note", pick(ctx, &NOTES));
        parent.set("purchase_invoice_custom_form_template", cfg.custom_form_template.clone());
        attributes::apply(&mut parent, &cfg.purchase_invoice_custom_attributes, &style, ctx);

        let rows = fan_out(&parent, &plan, &ContinuationRule::PURCHASE_INVOICE, ctx, |row, kind, ctx| {
            match kind {
                LineKind::System(id) => {
                    row.set("purchase_invoice_line_item_id", id.as_str());
                    row.set("purchase_invoice_item_name", "");
                }
                LineKind::FreeText => {
                    row.set("purchase_invoice_line_item_id", "");
                    row.set("purchase_invoice_item_name", compose(ctx, &ADJECTIVES, &GOODS));
                }
            }
            row.set("purchase_invoice_line_item_order_quantity", ctx.rng.random_range(1..=100i64));
            row.set("purchase_invoice_line_item_price", ctx.money(10.0, 5000.0));
            let tax = if !tax_uuids.is_empty() && ctx.chance(0.8) { pick_owned(ctx, tax_uuids) } else { String::new() };
            row.set("purchase_invoice_line_item_tax_uuid", tax);
            row.set("purchase_invoice_line_item_tax_exempt", flag(ctx, 0.1));
            attributes::apply(row, &cfg.line_item_custom_attributes, &style, ctx);
        });
        ds.rows.extend(rows);
    }

    ds.date_columns = vec!["purchase_invoice_issue_date".into(), "purchase_invoice_due_date".into()];
    ds.date_columns.extend(attributes::date_columns(&cfg.purchase_invoice_custom_attributes));
    ds.date_columns.extend(attributes::date_columns(&cfg.line_item_custom_attributes));
    log::info!("purchase_invoice: generated {} purchase invoices in {} rows", count, ds.len());
    Ok(ds)
}
