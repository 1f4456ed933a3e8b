//! Parent-to-line-item row expansion shared by the transactional generators.
//!
//! A parent record (invoice, order, purchase order, purchase invoice) becomes one
//! row per line item. Row 0 carries every parent column; continuation rows keep
//! only the parent identifiers and the line-item columns, everything else blank.

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::context::GenContext;
use crate::types::{Row, Value};

/// What a single line refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// An item that already exists in the target system.
    System(String),
    /// An ad hoc, free-text line.
    FreeText,
}

impl LineKind {
    #[must_use]
    pub fn is_system(&self) -> bool {
        matches!(self, LineKind::System(_))
    }
}

/// How order system items are referenced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemIdKind {
    #[default]
    Uuid,
    Code,
}

/// Line item options as stored in entity config files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemConfig {
    pub include_system_items: bool,
    pub include_line_items: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_identifier_type: Option<SystemIdKind>,
    pub system_identifiers: Vec<String>,
    #[serde(
        alias = "min_items_per_invoice",
        alias = "min_items_per_order",
        alias = "min_items_per_purchase_order",
        alias = "min_items_per_purchase_invoice",
        skip_serializing_if = "Option::is_none"
    )]
    pub min_items: Option<usize>,
    #[serde(
        alias = "max_items_per_invoice",
        alias = "max_items_per_order",
        alias = "max_items_per_purchase_order",
        alias = "max_items_per_purchase_invoice",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_items: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_item_discount_probability: Option<f64>,
}

impl Default for ItemConfig {
    fn default() -> Self {
        Self {
            include_system_items: true,
            include_line_items: true,
            system_identifier_type: None,
            system_identifiers: Vec::new(),
            min_items: None,
            max_items: None,
            line_item_discount_probability: None,
        }
    }
}

impl ItemConfig {
    /// Defaults with an explicit item range.
    #[must_use]
    pub fn with_range(min: usize, max: usize) -> Self {
        Self { min_items: Some(min), max_items: Some(max), ..Self::default() }
    }

    /// Resolve into a normalized fan-out plan. A missing maximum follows the minimum;
    /// a missing range uses `default_range`.
    #[must_use]
    pub fn plan(&self, default_range: (usize, usize)) -> FanOutConfig {
        let (min, max) = match (self.min_items, self.max_items) {
            (None, None) => default_range,
            (Some(lo), None) => (lo, lo),
            (None, Some(hi)) => (default_range.0, hi),
            (Some(lo), Some(hi)) => (lo, hi),
        };
        FanOutConfig {
            include_system_items: self.include_system_items,
            include_line_items: self.include_line_items,
            system_identifiers: self
                .system_identifiers
                .iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            min_items: min,
            max_items: max,
        }
        .normalized()
    }
}

/// Normalized fan-out plan for one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FanOutConfig {
    pub include_system_items: bool,
    pub include_line_items: bool,
    pub system_identifiers: Vec<String>,
    pub min_items: usize,
    pub max_items: usize,
}

impl FanOutConfig {
    /// Both kinds off forces free-text lines on; `min >= 1`, `max >= min`.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if !self.include_system_items && !self.include_line_items {
            self.include_line_items = true;
        }
        self.min_items = self.min_items.max(1);
        self.max_items = self.max_items.max(self.min_items);
        self
    }

    /// Fill an empty identifier pool once per run when system items are enabled.
    #[must_use]
    pub fn with_fallback_ids<F>(mut self, ctx: &mut GenContext, fallback: F) -> Self
    where
        F: FnOnce(&mut GenContext) -> Vec<String>,
    {
        if self.include_system_items && self.system_identifiers.is_empty() {
            self.system_identifiers = fallback(ctx);
            log::debug!("fanout: using {} fallback system identifiers", self.system_identifiers.len());
        }
        self
    }

    fn pick_kind(&self, ctx: &mut GenContext) -> LineKind {
        let system = match (self.include_system_items, self.include_line_items) {
            (true, true) => ctx.rng.random_bool(0.5),
            (true, false) => true,
            _ => false,
        };
        if system && let Some(id) = self.system_identifiers.choose(&mut ctx.rng) {
            return LineKind::System(id.clone());
        }
        LineKind::FreeText
    }
}

/// Which columns survive on continuation rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContinuationRule {
    pub keep: &'static [&'static str],
    pub line_prefixes: &'static [&'static str],
}

impl ContinuationRule {
    pub const INVOICE: ContinuationRule = ContinuationRule {
        keep: &["invoice_id", "invoice_account_id"],
        line_prefixes: &["invoice_line_item_", "ca_invoice_item_attr_"],
    };

    pub const ORDER: ContinuationRule = ContinuationRule {
        keep: &["order_id", "order_account_id"],
        line_prefixes: &["line_item_", "system_item_", "ca_order_line_item_attr_"],
    };

    pub const PURCHASE_ORDER: ContinuationRule = ContinuationRule {
        keep: &[
            "purchase_order_id",
            "purchase_order_account_id",
            "purchase_order_currency",
            "purchase_order_issue_date",
            "purchase_order_due_date",
            "purchase_order_expected_completion_date",
        ],
        line_prefixes: &["purchase_line_", "ca_purchase_order_item_attr_"],
    };

    pub const PURCHASE_INVOICE: ContinuationRule = ContinuationRule {
        keep: &[
            "purchase_invoice_id",
            "purchase_invoice_account_id",
            "purchase_invoice_currency",
            "purchase_invoice_issue_date",
            "purchase_invoice_due_date",
        ],
        line_prefixes: &[
            "purchase_invoice_line_item_",
            "purchase_invoice_item_",
            "ca_purchase_invoice_item_attr_",
        ],
    };

    #[must_use]
    pub fn keeps(&self, column: &str) -> bool {
        self.keep.contains(&column) || self.line_prefixes.iter().any(|p| column.starts_with(p))
    }

    /// Blank every parent-level column of a continuation row.
    pub fn blank(&self, row: &mut Row) {
        for (col, v) in row.iter_mut() {
            if !self.keeps(col) {
                *v = Value::empty();
            }
        }
    }
}

/// Expand `parent` into `min..=max` line rows.
///
/// `fill` receives a copy of the parent row, the drawn line kind and the context;
/// it writes the line columns and any attributes. Continuation rows are blanked
/// after `fill` so parent-level attributes only survive on row 0.
pub fn fan_out<F>(
    parent: &Row,
    plan: &FanOutConfig,
    rule: &ContinuationRule,
    ctx: &mut GenContext,
    mut fill: F,
) -> Vec<Row>
where
    F: FnMut(&mut Row, &LineKind, &mut GenContext),
{
    let total = ctx.rng.random_range(plan.min_items..=plan.max_items.max(plan.min_items));
    let mut rows = Vec::with_capacity(total);
    for i in 0..total {
        let kind = plan.pick_kind(ctx);
        let mut row = parent.clone();
        fill(&mut row, &kind, ctx);
        if i > 0 {
            rule.blank(&mut row);
        }
        rows.push(row);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ctx() -> GenContext {
        let now = NaiveDate::from_ymd_opt(2024, 1, 1).and_then(|d| d.and_hms_opt(0, 0, 0)).unwrap();
        GenContext::seeded(5, now)
    }

    #[test]
    fn normalization_forces_line_items_and_clamps() {
        let plan = FanOutConfig {
            include_system_items: false,
            include_line_items: false,
            system_identifiers: vec![],
            min_items: 0,
            max_items: 0,
        }
        .normalized();
        assert!(plan.include_line_items);
        assert_eq!((plan.min_items, plan.max_items), (1, 1));
    }

    #[test]
    fn plan_follows_min_when_max_missing() {
        let cfg = ItemConfig { min_items: Some(3), ..ItemConfig::default() };
        let plan = cfg.plan((1, 5));
        assert_eq!((plan.min_items, plan.max_items), (3, 3));
        assert_eq!(ItemConfig::default().plan((1, 1)).max_items, 1);
    }

    #[test]
    fn legacy_keys_load() {
        let raw = r#"{"include_system_items":false,"min_items_per_invoice":2,"max_items_per_invoice":4}"#;
        let cfg: ItemConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(cfg.min_items, Some(2));
        assert_eq!(cfg.max_items, Some(4));
        assert!(cfg.include_line_items);
    }

    #[test]
    fn fallback_only_when_needed() {
        let mut c = ctx();
        let plan = ItemConfig::default().plan((1, 1)).with_fallback_ids(&mut c, |_| vec!["X".into()]);
        assert_eq!(plan.system_identifiers, vec!["X".to_string()]);
        let off = ItemConfig { include_system_items: false, ..ItemConfig::default() }
            .plan((1, 1))
            .with_fallback_ids(&mut c, |_| vec!["X".into()]);
        assert!(off.system_identifiers.is_empty());
    }

    #[test]
    fn continuation_rows_blank_parent_columns() {
        let mut c = ctx();
        let mut parent = Row::new();
        parent.set("invoice_id", "CSV-INV-1");
        parent.set("invoice_account_id", "A");
        parent.set("invoice_invoice_note", "note");
        let plan = ItemConfig::with_range(3, 3).plan((1, 5));
        let rows = fan_out(&parent, &plan, &ContinuationRule::INVOICE, &mut c, |row, _, _| {
            row.set("invoice_line_item_name", "thing");
            row.set("ca_invoice_attr_X", "parent-level");
        });
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].text("invoice_invoice_note"), "note");
        assert_eq!(rows[0].text("ca_invoice_attr_X"), "parent-level");
        for r in &rows[1..] {
            assert_eq!(r.text("invoice_id"), "CSV-INV-1");
            assert_eq!(r.text("invoice_account_id"), "A");
            assert_eq!(r.text("invoice_invoice_note"), "");
            assert_eq!(r.text("ca_invoice_attr_X"), "");
            assert_eq!(r.text("invoice_line_item_name"), "thing");
        }
    }

    #[test]
    fn system_only_plan_always_picks_system() {
        let mut c = ctx();
        let plan = FanOutConfig {
            include_system_items: true,
            include_line_items: false,
            system_identifiers: vec!["ITEM-1".into()],
            min_items: 4,
            max_items: 4,
        };
        let mut kinds = Vec::new();
        fan_out(&Row::new(), &plan, &ContinuationRule::ORDER, &mut c, |_, k, _| kinds.push(k.clone()));
        assert_eq!(kinds, vec![LineKind::System("ITEM-1".into()); 4]);
    }
}
