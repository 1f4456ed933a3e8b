//! What a run prints to stdout once its files are written.

use serde::Serialize;
use std::path::PathBuf;

use crate::dataset::Dataset;
use crate::types::EntityKind;

pub const BATCH_HEADER: &str = "=== BATCH MODE: Generating multiple files ===";
pub const BATCH_FOOTER: &str = "=== BATCH GENERATION COMPLETE ===";

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum OutputMode {
    Human,
    Plain,
    Json,
}

impl OutputMode {
    /// `human`, `plain` or `json`; anything else is `None`.
    #[must_use]
    pub fn parse(s: &str) -> Option<OutputMode> {
        match s.to_ascii_lowercase().as_str() {
            "human" => Some(OutputMode::Human),
            "plain" => Some(OutputMode::Plain),
            "json" => Some(OutputMode::Json),
            _ => None,
        }
    }
}

/// One written CSV file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub entity: EntityKind,
    /// Records requested (invoices, accounts, ...).
    pub records: usize,
    /// CSV data rows; larger than `records` when line items fan out.
    pub rows: usize,
    pub path: PathBuf,
    /// Sample values and uniqueness checks, one line each.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

fn plural(entity: EntityKind) -> &'static str {
    match entity {
        EntityKind::Account => "accounts",
        EntityKind::Item => "items",
        EntityKind::Inventory => "inventory rows",
        EntityKind::Invoice => "invoices",
        EntityKind::Order => "orders",
        EntityKind::Payment => "payments",
        EntityKind::PurchaseOrder => "purchase orders",
        EntityKind::PurchaseInvoice => "purchase invoices",
        EntityKind::PurchasePayment => "purchase payments",
    }
}

fn yes_no(b: bool) -> &'static str {
    if b { "True" } else { "False" }
}

/// First-row sample and ID checks for `ds`.
#[must_use]
pub fn sample_notes(ds: &Dataset) -> Vec<String> {
    let Some(first) = ds.rows.first() else { return Vec::new() };
    let (fields, id_col, id_label): ([(&str, &str); 2], &str, &str) = match ds.entity {
        EntityKind::Account => ([("Account ID", "account_id"), ("Account Name", "account_name")], "account_id", ""),
        EntityKind::Item => ([("Item ID", "item_id"), ("Item Name", "item_name")], "item_id", ""),
        EntityKind::Inventory => return Vec::new(),
        EntityKind::Invoice => {
            ([("Invoice ID", "invoice_id"), ("Account ID", "invoice_account_id")], "invoice_id", "invoice")
        }
        EntityKind::Order => ([("Order ID", "order_id"), ("Order Name", "order_name")], "order_id", "order"),
        EntityKind::Payment => {
            ([("Payment ID", "payment_id"), ("Invoice ID", "payment_invoice_id")], "payment_id", "payment")
        }
        EntityKind::PurchaseOrder => (
            [("Purchase Order ID", "purchase_order_id"), ("Account ID", "purchase_order_account_id")],
            "purchase_order_id",
            "",
        ),
        EntityKind::PurchaseInvoice => (
            [("Purchase Invoice ID", "purchase_invoice_id"), ("Account ID", "purchase_invoice_account_id")],
            "purchase_invoice_id",
            "purchase invoice",
        ),
        EntityKind::PurchasePayment => (
            [("Purchase Payment ID", "purchase_payment_id"), ("Purchase Invoice ID", "purchase_payment_invoice_id")],
            "purchase_payment_id",
            "purchase payment",
        ),
    };
    let mut notes: Vec<String> = fields.iter().map(|(label, col)| format!("First {label}: {}", first.text(col))).collect();
    let unique = ds.ids(id_col).len();
    match ds.entity {
        EntityKind::Account => {
            notes.push(format!("All IDs unique: {}", yes_no(unique == ds.record_count)));
            let names = ds.ids("account_name").len();
            notes.push(format!("All names unique: {}", yes_no(names == ds.record_count)));
        }
        EntityKind::Item => notes.push(format!("All IDs unique: {}", yes_no(unique == ds.record_count))),
        EntityKind::PurchaseOrder => {
            notes.push(format!("All purchase order IDs unique: {}", yes_no(unique == ds.record_count)));
        }
        _ => notes.push(format!("Total unique {id_label} IDs: {unique}")),
    }
    notes
}

impl RunSummary {
    /// Summary of `ds` written to `path` as `rows` data rows.
    #[must_use]
    pub fn for_dataset(ds: &Dataset, path: PathBuf, rows: usize) -> Self {
        RunSummary { entity: ds.entity, records: ds.record_count, rows, path, notes: sample_notes(ds) }
    }

    #[must_use]
    pub fn render(&self, mode: OutputMode) -> String {
        match mode {
            OutputMode::Human => {
                let mut out = format!("Successfully generated {} {}!", self.records, plural(self.entity));
                if self.rows != self.records {
                    out.push_str(&format!("\n({} CSV rows including line items)", self.rows));
                }
                if !self.notes.is_empty() {
                    out.push_str("\n\nSample data:");
                    for note in &self.notes {
                        out.push_str(&format!("\n  {note}"));
                    }
                    out.push('\n');
                }
                out.push_str(&format!("\nFile saved to: {}", self.path.display()));
                out
            }
            OutputMode::Plain => format!(
                "entity={} records={} rows={} path={}",
                self.entity,
                self.records,
                self.rows,
                self.path.display()
            ),
            OutputMode::Json => serde_json::to_string(self).unwrap_or_else(|_| "{}".into()),
        }
    }
}

/// Printed when Ctrl-C interrupts a run.
#[must_use]
pub fn cancelled(entity: EntityKind) -> String {
    format!("{} generation cancelled by user.", entity.label())
}
