use serde::{Deserialize, Serialize};
use std::fmt;

/// A single cell of a generated row.
///
/// Serialized untagged so JSON config files can carry plain scalars
/// (`true`, `12`, `9.5`, `"text"`) for constant attribute values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    #[must_use]
    pub fn empty() -> Self {
        Value::Text(String::new())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Text(s) if s.is_empty())
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::empty()
    }
}

// Booleans render the way spreadsheet importers of the target system expect them.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Text(s.clone())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

/// An ordered column -> value mapping. Insertion order is the CSV column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    cells: Vec<(String, Value)>,
}

impl Row {
    #[must_use]
    pub fn new() -> Self {
        Self { cells: Vec::new() }
    }

    /// Sets `column`, keeping its original position if it already exists.
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        let column = column.into();
        let value = value.into();
        if let Some(slot) = self.cells.iter_mut().find(|(k, _)| *k == column) {
            slot.1 = value;
        } else {
            self.cells.push((column, value));
        }
    }

    #[must_use]
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.cells.iter().find(|(k, _)| k == column).map(|(_, v)| v)
    }

    /// Text view of a column; missing columns read as empty.
    #[must_use]
    pub fn text(&self, column: &str) -> String {
        self.get(column).map(ToString::to_string).unwrap_or_default()
    }

    #[must_use]
    pub fn contains(&self, column: &str) -> bool {
        self.cells.iter().any(|(k, _)| k == column)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Value)> {
        self.cells.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// The record families this crate can synthesize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Account,
    Item,
    Inventory,
    Invoice,
    Order,
    Payment,
    PurchaseOrder,
    PurchaseInvoice,
    PurchasePayment,
}

impl EntityKind {
    pub const ALL: [EntityKind; 9] = [
        EntityKind::Account,
        EntityKind::Item,
        EntityKind::Inventory,
        EntityKind::Invoice,
        EntityKind::Order,
        EntityKind::Payment,
        EntityKind::PurchaseOrder,
        EntityKind::PurchaseInvoice,
        EntityKind::PurchasePayment,
    ];

    /// snake_case key used in config file names and JSON count keys.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            EntityKind::Account => "account",
            EntityKind::Item => "item",
            EntityKind::Inventory => "inventory",
            EntityKind::Invoice => "invoice",
            EntityKind::Order => "order",
            EntityKind::Payment => "payment",
            EntityKind::PurchaseOrder => "purchase_order",
            EntityKind::PurchaseInvoice => "purchase_invoice",
            EntityKind::PurchasePayment => "purchase_payment",
        }
    }

    /// Upper-case stem used in output file names.
    #[must_use]
    pub fn file_stem(self) -> String {
        self.key().to_ascii_uppercase()
    }

    /// Human label, e.g. "Purchase order".
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Account => "Account",
            EntityKind::Item => "Item",
            EntityKind::Inventory => "Inventory",
            EntityKind::Invoice => "Invoice",
            EntityKind::Order => "Order",
            EntityKind::Payment => "Payment",
            EntityKind::PurchaseOrder => "Purchase order",
            EntityKind::PurchaseInvoice => "Purchase invoice",
            EntityKind::PurchasePayment => "Purchase payment",
        }
    }

    /// Default config file written by `--save-config` without a path.
    #[must_use]
    pub fn default_config_file(self) -> String {
        format!("{}_generator_config.json", self.key())
    }

    #[must_use]
    pub fn default_count(self) -> usize {
        match self {
            EntityKind::PurchasePayment => 100,
            _ => 200,
        }
    }

    /// Transactional outputs quote every field and tab-guard their date columns.
    #[must_use]
    pub fn is_transactional(self) -> bool {
        matches!(
            self,
            EntityKind::Invoice
                | EntityKind::Payment
                | EntityKind::PurchaseOrder
                | EntityKind::PurchaseInvoice
                | EntityKind::PurchasePayment
        )
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
