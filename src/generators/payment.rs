//! Payments against sale invoices and purchase payments against purchase invoices.
//!
//! Both share one config shape and one row builder; [`PaymentKind`] selects the
//! column prefix, ID format, origin kinds and date rules.

use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::{pick, pick_owned};
use crate::attributes::{self, CustomAttributeSpec, RadioOptions, ValueStyle};
use crate::context::{GenContext, add_days, iso};
use crate::dataset::Dataset;
use crate::errors::GenError;
use crate::ids;
use crate::types::{EntityKind, Row};

pub const ATTR_PREFIX: &str = "ca_payment_attr_";
pub const PURCHASE_ATTR_PREFIX: &str = "ca_purchase_payment_attr_";
pub const MAX_INVOICES_PER_PAYMENT: usize = 5;

const NOTES: [&str; 15] = [
    "Payment received via bank transfer",
    "Credit card payment processed successfully",
    "Wire transfer completed",
    "Electronic funds transfer confirmed",
    "Check payment cleared",
    "Payment applied to outstanding invoices",
    "Advance payment for future services",
    "Partial payment - balance pending",
    "Direct debit payment processed",
    "Cash payment received and recorded",
    "Payment received - thank you for your business",
    "Online payment gateway transaction completed",
    "ACH transfer processed successfully",
    "Mobile payment app transaction confirmed",
    "Payment reconciliation completed",
];

const PURCHASE_NOTES: [&str; 15] = [
    "Payment issued via bank transfer to supplier",
    "Supplier payment processed successfully",
    "Wire transfer completed for invoice",
    "Electronic payment sent to vendor",
    "Check payment issued and mailed",
    "Payment applied to supplier account",
    "Advance payment for upcoming order",
    "Partial payment - balance scheduled",
    "ACH payment processed to supplier",
    "Cash payment issued and recorded",
    "Payment completed - purchase order settled",
    "Online payment gateway transaction completed",
    "Direct debit payment to supplier processed",
    "Mobile payment app transaction confirmed",
    "Payment reconciliation with supplier completed",
];

/// Which side of the ledger a payment run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentKind {
    Sale,
    Purchase,
}

impl PaymentKind {
    #[must_use]
    pub fn entity(self) -> EntityKind {
        match self {
            PaymentKind::Sale => EntityKind::Payment,
            PaymentKind::Purchase => EntityKind::PurchasePayment,
        }
    }

    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            PaymentKind::Sale => "payment",
            PaymentKind::Purchase => "purchase_payment",
        }
    }

    #[must_use]
    pub fn attr_prefix(self) -> &'static str {
        match self {
            PaymentKind::Sale => ATTR_PREFIX,
            PaymentKind::Purchase => PURCHASE_ATTR_PREFIX,
        }
    }

    fn id(self, seq: usize) -> String {
        match self {
            PaymentKind::Sale => ids::payment_id(seq),
            PaymentKind::Purchase => ids::purchase_payment_id(seq),
        }
    }

    fn origin_kinds(self) -> &'static [&'static str; 2] {
        match self {
            PaymentKind::Sale => &["ACC", "ORD"],
            PaymentKind::Purchase => &["SUP", "PO"],
        }
    }

    fn notes(self) -> &'static [&'static str] {
        match self {
            PaymentKind::Sale => &NOTES,
            PaymentKind::Purchase => &PURCHASE_NOTES,
        }
    }

    /// Placeholder invoice references for batch runs without upstream data.
    pub fn placeholder_invoices(self, ctx: &mut GenContext) -> Vec<String> {
        (0..10)
            .map(|_| match self {
                PaymentKind::Sale => ids::invoice_id(ctx),
                PaymentKind::Purchase => ids::purchase_invoice_id(ctx),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentConfig {
    #[serde(alias = "purchase_payment_count", skip_serializing_if = "Option::is_none")]
    pub payment_count: Option<usize>,
    #[serde(alias = "purchase_invoice_csv_path", skip_serializing_if = "Option::is_none")]
    pub invoice_csv_path: Option<PathBuf>,
    #[serde(alias = "purchase_invoice_ids")]
    pub invoice_ids: Vec<String>,
    pub custom_attributes: Vec<CustomAttributeSpec>,
    pub multi_invoice_enabled: bool,
    pub payment_processors: Vec<String>,
    pub payment_amount_min: f64,
    pub payment_amount_max: f64,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            payment_count: None,
            invoice_csv_path: None,
            invoice_ids: Vec::new(),
            custom_attributes: Vec::new(),
            multi_invoice_enabled: false,
            payment_processors: vec!["Cash".to_string()],
            payment_amount_min: 100.0,
            payment_amount_max: 50_000.0,
        }
    }
}

impl PaymentConfig {
    #[must_use]
    pub fn with_default_attributes(mut self, kind: PaymentKind) -> Self {
        self.custom_attributes = attributes::default_set(kind.attr_prefix(), RadioOptions::Letters);
        self
    }

    fn amount_bounds(&self) -> (f64, f64) {
        let (lo, hi) = (self.payment_amount_min, self.payment_amount_max);
        if hi < lo { (hi, lo) } else { (lo, hi) }
    }
}

/// Generate `count` payments of `kind`.
///
/// `invoice_ids` wins over `cfg.invoice_ids`. With multi-invoice enabled each
/// payment spans 2..=min(5, pool) distinct invoices, one row per invoice with
/// every payment field repeated; a pool of one invoice falls back to a single row.
///
/// # Errors
/// Returns [`GenError::NoUpstreamIds`] when no invoice ID is available.
pub fn generate(
    cfg: &PaymentConfig,
    kind: PaymentKind,
    count: usize,
    invoice_ids: &[String],
    ctx: &mut GenContext,
) -> Result<Dataset, GenError> {
    let pool: Vec<String> = if invoice_ids.is_empty() { &cfg.invoice_ids } else { invoice_ids }
        .iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if pool.is_empty() {
        return Err(GenError::NoUpstreamIds(format!(
            "no invoice IDs available for {} generation",
            kind.entity().label().to_lowercase()
        )));
    }

    let processors: Vec<String> = if cfg.payment_processors.is_empty() {
        vec!["Cash".to_string()]
    } else {
        cfg.payment_processors.clone()
    };
    let (lo, hi) = cfg.amount_bounds();
    let p = kind.prefix();
    let style = ValueStyle::STANDARD;
    let mut ds = Dataset::new(kind.entity(), count);

    for seq in 1..=count {
        let mut base = Row::new();
        base.set(format!("{p}_id"), kind.id(seq));
        base.set(format!("{p}_origin"), ids::origin_ref(ctx, kind.origin_kinds()));
        match kind {
            PaymentKind::Sale => {
                base.set("payment_date", iso(ctx.today()));
                let alternate = if ctx.rng.random_bool(0.5) {
                    String::new()
                } else {
                    iso(add_days(ctx.today(), ctx.rng.random_range(7..=30)))
                };
                base.set("payment_alternate_date", alternate);
            }
            PaymentKind::Purchase => {
                let ahead: i64 = ctx.rng.random_range(0..=90);
                base.set("purchase_payment_date", iso(ctx.days_from_today(ahead)));
            }
        }
        base.set(format!("{p}_processor"), pick_owned(ctx, &processors));
        base.set(format!("{p}_amount"), ctx.money(lo, hi));
        if kind == PaymentKind::Sale {
            base.set("payment_invoice_id", "");
        }
        base.set(format!("{p}_note"), pick(ctx, kind.notes()));
        for (column, value) in attributes::resolve(&cfg.custom_attributes, &style, ctx) {
            base.set(column, value);
        }

        for invoice in select_invoices(&pool, cfg.multi_invoice_enabled, ctx) {
            let mut row = base.clone();
            row.set(format!("{p}_invoice_id"), invoice);
            ds.rows.push(row);
        }
    }

    ds.date_columns = match kind {
        PaymentKind::Sale => vec!["payment_date".into(), "payment_alternate_date".into()],
        PaymentKind::Purchase => vec!["purchase_payment_date".into()],
    };
    ds.date_columns.extend(attributes::date_columns(&cfg.custom_attributes));
    log::info!("{}: generated {} payments in {} rows", kind.entity(), count, ds.len());
    Ok(ds)
}

fn select_invoices(pool: &[String], multi: bool, ctx: &mut GenContext) -> Vec<String> {
    let upper = pool.len().min(MAX_INVOICES_PER_PAYMENT);
    if multi && upper >= 2 {
        let k = ctx.rng.random_range(2..=upper);
        let mut picked: Vec<String> = pool.choose_multiple(&mut ctx.rng, k).cloned().collect();
        picked.shuffle(&mut ctx.rng);
        picked
    } else {
        pool.choose(&mut ctx.rng).cloned().into_iter().collect()
    }
}
