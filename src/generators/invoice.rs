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
use crate::types::{EntityKind, Row, Value};

pub const ATTR_PREFIX: &str = "ca_invoice_attr_";
pub const LINE_ATTR_PREFIX: &str = "ca_invoice_item_attr_";
pub const DEFAULT_ITEM_RANGE: (usize, usize) = (1, 5);

const NOTES: [&str; 10] = [
    "Payment due upon receipt. Thank you for your business.",
    "Please remit payment within the specified terms.",
    "Contact our billing department for any queries.",
    "Early payment discount available - contact us for details.",
    "This invoice reflects services rendered as per agreement.",
    "Net payment terms apply as specified in contract.",
    "Please reference invoice number when making payment.",
    "All amounts shown in the specified currency.",
    "Late fees may apply for overdue payments.",
    "Thank you for choosing our services.",
];

const LINE_NOTES: [&str; 8] = [
    "Standard terms apply.",
    "As per service agreement.",
    "Monthly subscription fee.",
    "One-time setup charge.",
    "Prorated for partial period.",
    "Annual license renewal.",
    "Volume discount applied.",
    "Special promotion pricing.",
];

const ADJECTIVES: [&str; 7] = ["Premium", "Standard", "Professional", "Enterprise", "Basic", "Advanced", "Custom"];
const SERVICES: [&str; 7] = ["Service", "Product", "Consultation", "Package", "Bundle", "Solution", "Support"];

pub const ACCOUNTING_CODES: [&str; 9] = [
    "Account Receivable",
    "Cash and Cash Equivalent",
    "Inventory",
    "Sales Revenue",
    "Event Charge",
    "Deduction",
    "Alteration",
    "Cancellation",
    "Chargeback",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_count: Option<usize>,
    pub account_ids: Vec<String>,
    pub default_currency: String,
    pub custom_form_template: String,
    pub tax_config: TaxConfig,
    pub invoice_custom_attributes: Vec<CustomAttributeSpec>,
    pub item_config: ItemConfig,
    pub line_item_custom_attributes: Vec<CustomAttributeSpec>,
}

impl Default for InvoiceConfig {
    fn default() -> Self {
        Self {
            invoice_count: None,
            account_ids: Vec::new(),
            default_currency: default_currency(),
            custom_form_template: "Default for Sale Invoice".to_string(),
            tax_config: TaxConfig::default(),
            invoice_custom_attributes: Vec::new(),
            item_config: ItemConfig::with_range(DEFAULT_ITEM_RANGE.0, DEFAULT_ITEM_RANGE.1),
            line_item_custom_attributes: Vec::new(),
        }
    }
}

impl InvoiceConfig {
    /// Stock invoice-level and line-level attribute sets.
    #[must_use]
    pub fn with_default_attributes(mut self) -> Self {
        self.invoice_custom_attributes = attributes::default_set(ATTR_PREFIX, RadioOptions::Letters);
        self.line_item_custom_attributes = attributes::default_set(LINE_ATTR_PREFIX, RadioOptions::Letters);
        self
    }
}

/// Generate `count` invoices fanned out into line rows.
///
/// `accounts` wins over `cfg.account_ids`; with neither the run fails.
///
/// # Errors
/// Returns [`GenError::NoUpstreamIds`] when no account is available.
pub fn generate(
    cfg: &InvoiceConfig,
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
        return Err(GenError::NoUpstreamIds("no account IDs available to associate with invoices".into()));
    }

    let plan = cfg.item_config.plan(DEFAULT_ITEM_RANGE).with_fallback_ids(ctx, ids::fallback_item_ids);
    let style = ValueStyle::STANDARD;
    let mut ds = Dataset::new(EntityKind::Invoice, count);

    for idx in 0..count {
        let Some(account) = accounts.choose(&mut ctx.rng).cloned() else { continue };
        let back: i64 = ctx.rng.random_range(0..=90);
        let issue = ctx.days_from_today(-back);
        let due = add_days(issue, ctx.rng.random_range(7..=90));

        let mut parent = Row::new();
        parent.set("invoice_id", ids::invoice_id(ctx));
        parent.set("invoice_origin", format!("CSV IMPORT - {}", idx + 1));
        parent.set("invoice_currency", account.currency.clone().unwrap_or_else(|| cfg.default_currency.clone()));
        parent.set("invoice_account_id", account.id.clone());
        parent.set("invoice_issue_date", iso(issue));
        parent.set("invoice_due_date", iso(due));
        parent.set("invoice_price_tax_inclusive", flag(ctx, 0.3));
        parent.set("invoice_invoice_note", pick(ctx, &NOTES));
        parent.set("invoice_custom_form_template", cfg.custom_form_template.clone());

        let rows = fan_out(&parent, &plan, &ContinuationRule::INVOICE, ctx, |row, kind, ctx| {
            fill_line(row, kind, cfg, ctx);
            attributes::apply(row, &cfg.line_item_custom_attributes, &style, ctx);
            attributes::apply(row, &cfg.invoice_custom_attributes, &style, ctx);
        });
        ds.rows.extend(rows);
    }

    ds.date_columns = vec!["invoice_issue_date".into(), "invoice_due_date".into()];
    ds.date_columns.extend(attributes::date_columns(&cfg.invoice_custom_attributes));
    ds.date_columns.extend(attributes::date_columns(&cfg.line_item_custom_attributes));
    log::info!("invoice: generated {} invoices in {} rows", count, ds.len());
    Ok(ds)
}

fn fill_line(row: &mut Row, kind: &LineKind, cfg: &InvoiceConfig, ctx: &mut GenContext) {
    match kind {
        LineKind::System(id) => {
            row.set("invoice_line_item_id", id.as_str());
            row.set("invoice_line_item_name", "");
        }
        LineKind::FreeText => {
            row.set("invoice_line_item_id", "");
            row.set("invoice_line_item_name", compose(ctx, &ADJECTIVES, &SERVICES));
        }
    }
    row.set("invoice_line_item_quantity", ctx.rng.random_range(1..=100i64));
    let price = ctx.money(10.0, 5000.0);
    row.set("invoice_line_item_price", price);
    row.set("invoice_line_item_invoice_note", pick(ctx, &LINE_NOTES));
    row.set("invoice_line_item_accounting_code", pick(ctx, &ACCOUNTING_CODES));

    let discount = if ctx.chance(0.15) { Value::Float(ctx.money(5.0, price * 0.8)) } else { Value::empty() };
    row.set("invoice_line_item_flat_discount", discount);

    let tax = &cfg.tax_config;
    if tax.tax_codes.is_empty() {
        row.set("invoice_line_item_tax_code", "");
        row.set("invoice_line_item_tax_rate", "");
    } else {
        let code = pick_owned(ctx, &tax.tax_codes);
        let rate = tax.tax_rates.get(&code).cloned().unwrap_or_default();
        row.set("invoice_line_item_tax_code", code);
        row.set("invoice_line_item_tax_rate", rate);
    }
    row.set("invoice_line_item_tax_exempt", flag(ctx, 0.1));
    row.set("invoice_line_item_tax_inclusive_based_on", flag(ctx, 0.2));
}
