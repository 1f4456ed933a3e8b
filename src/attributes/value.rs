use chrono::{Datelike, NaiveDate};
use rand::Rng;
use rand::seq::IndexedRandom;

use super::spec::{AttrType, CustomAttributeSpec};
use crate::context::{GenContext, add_days, iso};
use crate::generators::fakes;
use crate::types::{Row, Value};

/// How generated dates are spread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateMode {
    /// Within 365 days either side of now.
    WithinYear,
    /// Always the generation date.
    Today,
    /// A day of the current year; `recent_only` pins it to the current month.
    CurrentYear { recent_only: bool },
}

/// Per-destination rendering differences for attribute values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueStyle {
    pub bool_as_text: bool,
    pub text_words: usize,
    pub money_min: f64,
    pub money_max: f64,
    pub date_mode: DateMode,
    pub unknown_as_word: bool,
}

impl ValueStyle {
    pub const STANDARD: ValueStyle = ValueStyle {
        bool_as_text: false,
        text_words: 6,
        money_min: 1.0,
        money_max: 10_000.0,
        date_mode: DateMode::WithinYear,
        unknown_as_word: false,
    };

    pub const ITEM: ValueStyle = ValueStyle {
        bool_as_text: true,
        text_words: 8,
        money_min: 10.0,
        money_max: 1_000.0,
        ..ValueStyle::STANDARD
    };

    pub const ORDER: ValueStyle = ValueStyle { date_mode: DateMode::Today, ..ValueStyle::STANDARD };

    /// Accounts keep dates in the current year; small batches stay in the current month.
    #[must_use]
    pub fn account(row_count: usize) -> ValueStyle {
        ValueStyle {
            text_words: 10,
            date_mode: DateMode::CurrentYear { recent_only: row_count <= 30 },
            unknown_as_word: true,
            ..ValueStyle::STANDARD
        }
    }
}

impl Default for ValueStyle {
    fn default() -> Self {
        ValueStyle::STANDARD
    }
}

/// Produce one value for `attr`. Constant attributes with a value short-circuit.
pub fn random_value(attr: &CustomAttributeSpec, style: &ValueStyle, ctx: &mut GenContext) -> Value {
    if attr.constant
        && let Some(v) = &attr.value
    {
        return v.clone();
    }
    match attr.kind {
        AttrType::Bool => {
            let b = ctx.rng.random_bool(0.5);
            if style.bool_as_text { Value::from(if b { "TRUE" } else { "FALSE" }) } else { Value::Bool(b) }
        }
        AttrType::Number => Value::Int(ctx.rng.random_range(0..=1000)),
        AttrType::Money => Value::Float(ctx.money(style.money_min, style.money_max)),
        AttrType::Quantity => {
            let (lo, hi) = quantity_bounds(attr);
            Value::Int(ctx.rng.random_range(lo..=hi))
        }
        AttrType::Date => Value::Text(iso(random_date(style.date_mode, ctx))),
        AttrType::Dropdown | AttrType::Radio => {
            attr.options.choose(&mut ctx.rng).cloned().map(Value::Text).unwrap_or_default()
        }
        AttrType::DropdownMulti | AttrType::Checkboxes => Value::Text(random_subset(&attr.options, ctx)),
        AttrType::Text => Value::Text(fakes::sentence(&mut ctx.rng, style.text_words)),
        AttrType::String => Value::Text(fakes::word(&mut ctx.rng)),
        AttrType::Unknown if style.unknown_as_word => Value::Text(fakes::word(&mut ctx.rng)),
        AttrType::Unknown => Value::empty(),
    }
}

/// Inclusive bounds; zero or missing ends fall back to 1 and 50, inverted ends swap.
#[must_use]
pub fn quantity_bounds(attr: &CustomAttributeSpec) -> (i64, i64) {
    let lo = attr.quantity_min.filter(|v| *v != 0).unwrap_or(1);
    let hi = attr.quantity_max.filter(|v| *v != 0).unwrap_or(50);
    if lo > hi { (hi, lo) } else { (lo, hi) }
}

fn random_subset(options: &[String], ctx: &mut GenContext) -> String {
    if options.is_empty() {
        return String::new();
    }
    let k = ctx.rng.random_range(1..=options.len());
    let picked: Vec<&str> = options.choose_multiple(&mut ctx.rng, k).map(String::as_str).collect();
    picked.join(",")
}

fn random_date(mode: DateMode, ctx: &mut GenContext) -> NaiveDate {
    let today = ctx.today();
    match mode {
        DateMode::Today => today,
        DateMode::WithinYear => {
            let offset = ctx.rng.random_range(-365..=365);
            add_days(today, offset)
        }
        DateMode::CurrentYear { recent_only } => {
            let month = if recent_only || today.month() == 1 {
                today.month()
            } else {
                ctx.rng.random_range(1..=today.month())
            };
            let last = days_in_month(today.year(), month);
            let day = ctx.rng.random_range(1..=last);
            NaiveDate::from_ymd_opt(today.year(), month, day).unwrap_or(today)
        }
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (ny, nm) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(ny, nm, 1)
        .and_then(|d| d.pred_opt())
        .map_or(28, |d| d.day())
}

/// Write every attribute into `row`.
pub fn apply(row: &mut Row, attrs: &[CustomAttributeSpec], style: &ValueStyle, ctx: &mut GenContext) {
    for attr in attrs {
        let v = random_value(attr, style, ctx);
        row.set(attr.column_name.clone(), v);
    }
}

/// Resolve every attribute once, for records whose rows all share the same values.
pub fn resolve(
    attrs: &[CustomAttributeSpec],
    style: &ValueStyle,
    ctx: &mut GenContext,
) -> Vec<(String, Value)> {
    attrs.iter().map(|a| (a.column_name.clone(), random_value(a, style, ctx))).collect()
}

/// Columns of date-typed attributes.
pub fn date_columns<'a>(attrs: &'a [CustomAttributeSpec]) -> impl Iterator<Item = String> + 'a {
    attrs.iter().filter(|a| a.is_date()).map(|a| a.column_name.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ctx_on(y: i32, m: u32, d: u32) -> GenContext {
        let now = NaiveDate::from_ymd_opt(y, m, d).and_then(|x| x.and_hms_opt(9, 0, 0)).unwrap();
        GenContext::seeded(42, now)
    }

    #[test]
    fn days_in_month_handles_december_and_leap() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 12), 31);
    }

    #[test]
    fn account_dates_stay_in_current_month_for_small_batches() {
        let mut ctx = ctx_on(2024, 7, 10);
        let attr = CustomAttributeSpec::new("ca_account_attr_CA_DATE", AttrType::Date);
        for _ in 0..50 {
            let v = random_value(&attr, &ValueStyle::account(10), &mut ctx).to_string();
            assert!(v.starts_with("2024-07-"), "{v}");
        }
    }

    #[test]
    fn january_pins_month_even_for_large_batches() {
        let mut ctx = ctx_on(2025, 1, 20);
        let attr = CustomAttributeSpec::new("d", AttrType::Date);
        for _ in 0..50 {
            let v = random_value(&attr, &ValueStyle::account(500), &mut ctx).to_string();
            assert!(v.starts_with("2025-01-"), "{v}");
        }
    }

    #[test]
    fn order_dates_are_today() {
        let mut ctx = ctx_on(2024, 3, 5);
        let attr = CustomAttributeSpec::new("d", AttrType::Date);
        assert_eq!(random_value(&attr, &ValueStyle::ORDER, &mut ctx).to_string(), "2024-03-05");
    }

    #[test]
    fn empty_choice_pools_render_blank() {
        let mut ctx = ctx_on(2024, 3, 5);
        for kind in [AttrType::Dropdown, AttrType::Radio, AttrType::Checkboxes, AttrType::DropdownMulti] {
            let attr = CustomAttributeSpec::new("c", kind);
            assert!(random_value(&attr, &ValueStyle::STANDARD, &mut ctx).is_empty());
        }
    }

    #[test]
    fn item_bools_are_text() {
        let mut ctx = ctx_on(2024, 3, 5);
        let attr = CustomAttributeSpec::new("b", AttrType::Bool);
        let v = random_value(&attr, &ValueStyle::ITEM, &mut ctx).to_string();
        assert!(v == "TRUE" || v == "FALSE");
    }

    #[test]
    fn inverted_bounds_swap() {
        let attr = CustomAttributeSpec::new("q", AttrType::Quantity).with_range(10, 5);
        assert_eq!(quantity_bounds(&attr), (5, 10));
        let open = CustomAttributeSpec::new("q", AttrType::Quantity);
        assert_eq!(quantity_bounds(&open), (1, 50));
    }
}
