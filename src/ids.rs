//! Record identifier formats.
//!
//! Only account IDs are checked for collisions; every other random ID is drawn
//! independently and may repeat within a large batch.

use rand::Rng;
use std::collections::HashSet;

use crate::context::GenContext;

/// Party role encoded in the account ID suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountRole {
    Customer,
    Supplier,
    Vendor,
}

impl AccountRole {
    #[must_use]
    pub fn suffix(self) -> &'static str {
        match self {
            AccountRole::Customer => "CUS",
            AccountRole::Supplier => "SUP",
            AccountRole::Vendor => "VND",
        }
    }
}

/// `CSV-ACC-{10000-99999}-{suffix}`
pub fn account_id(ctx: &mut GenContext, role: AccountRole) -> String {
    format!("CSV-ACC-{}-{}", ctx.rng.random_range(10_000..=99_999), role.suffix())
}

pub fn invoice_id(ctx: &mut GenContext) -> String {
    format!("CSV-INV-{}", ctx.rng.random_range(100_000..=999_999))
}

pub fn order_id(ctx: &mut GenContext) -> String {
    format!("CSV-ORD-{}", ctx.rng.random_range(100_000..=999_999))
}

pub fn purchase_order_id(ctx: &mut GenContext) -> String {
    format!("CSV-PO-{}", ctx.rng.random_range(100_000..=999_999))
}

pub fn purchase_invoice_id(ctx: &mut GenContext) -> String {
    format!("CSV-PINV-{}", ctx.rng.random_range(100_000..=999_999))
}

pub fn item_id(ctx: &mut GenContext) -> String {
    format!("CSV-ITEM-{}", ctx.rng.random_range(10_000..=99_999))
}

/// Sequential payment ID, 1-based and zero-padded to three digits.
#[must_use]
pub fn payment_id(seq: usize) -> String {
    format!("CSV-PMT-{seq:03}")
}

#[must_use]
pub fn purchase_payment_id(seq: usize) -> String {
    format!("CSV-PPMT-{seq:03}")
}

/// `CSV-{kind}-{1-999:03}` reference to the record a payment originated from.
pub fn origin_ref(ctx: &mut GenContext, kinds: &[&str; 2]) -> String {
    let kind = kinds[usize::from(ctx.rng.random_bool(0.5))];
    format!("CSV-{kind}-{:03}", ctx.rng.random_range(1..=999))
}

/// Ten stand-in account IDs for runs without an upstream account file.
pub fn placeholder_accounts(ctx: &mut GenContext, role: AccountRole) -> Vec<String> {
    (0..10).map(|_| account_id(ctx, role)).collect()
}

/// Five `ITEM-{4 digits}` identifiers used when system items are on but none were supplied.
pub fn fallback_item_ids(ctx: &mut GenContext) -> Vec<String> {
    (0..5).map(|_| format!("ITEM-{}", ctx.rng.random_range(1000..=9999))).collect()
}

/// Fallback identifiers for order system items: codes or UUIDs.
pub fn fallback_system_ids(ctx: &mut GenContext, uuids: bool) -> Vec<String> {
    (0..5)
        .map(|_| {
            if uuids {
                let bytes: [u8; 16] = ctx.rng.random();
                uuid::Builder::from_random_bytes(bytes).into_uuid().to_string()
            } else {
                format!("SYS-CODE-{}", ctx.rng.random_range(1000..=9999))
            }
        })
        .collect()
}

/// Draws values until one has not been handed out before, up to a bounded number of attempts.
///
/// After the attempts are exhausted the last draw is decorated with a numeric
/// suffix, which keeps the batch unique without looping forever on tiny pools.
#[derive(Debug, Default)]
pub struct UniqueIds {
    seen: HashSet<String>,
    max_attempts: usize,
}

impl UniqueIds {
    #[must_use]
    pub fn new(max_attempts: usize) -> Self {
        Self { seen: HashSet::new(), max_attempts: max_attempts.max(1) }
    }

    /// A value not handed out before, or `None` once every attempt collided.
    pub fn try_draw<F>(&mut self, ctx: &mut GenContext, mut make: F) -> Option<String>
    where
        F: FnMut(&mut GenContext) -> String,
    {
        for _ in 0..self.max_attempts {
            let candidate = make(ctx);
            if self.seen.insert(candidate.clone()) {
                return Some(candidate);
            }
        }
        None
    }

    /// Like [`UniqueIds::try_draw`], but decorates a colliding draw with ` 2`, ` 3`, ...
    pub fn draw<F>(&mut self, ctx: &mut GenContext, mut make: F) -> String
    where
        F: FnMut(&mut GenContext) -> String,
    {
        let mut last = String::new();
        let unique = self.try_draw(ctx, |c| {
            last = make(c);
            last.clone()
        });
        if let Some(v) = unique {
            return v;
        }
        let mut n = 2;
        let mut candidate = format!("{last} {n}");
        while self.seen.contains(&candidate) {
            n += 1;
            candidate = format!("{last} {n}");
        }
        self.seen.insert(candidate.clone());
        candidate
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ctx() -> GenContext {
        let now = NaiveDate::from_ymd_opt(2024, 5, 1).and_then(|d| d.and_hms_opt(0, 0, 0)).unwrap();
        GenContext::seeded(11, now)
    }

    #[test]
    fn sequential_ids_are_padded() {
        assert_eq!(payment_id(7), "CSV-PMT-007");
        assert_eq!(purchase_payment_id(1234), "CSV-PPMT-1234");
    }

    #[test]
    fn unique_ids_never_repeat_on_tiny_pool() {
        let mut c = ctx();
        let mut u = UniqueIds::new(5);
        let mut out = HashSet::new();
        for _ in 0..20 {
            let id = u.draw(&mut c, |_| "SAME".to_string());
            assert!(out.insert(id));
        }
        assert_eq!(u.len(), 20);
    }

    #[test]
    fn try_draw_gives_up_on_exhausted_pool() {
        let mut c = ctx();
        let mut u = UniqueIds::new(5);
        assert_eq!(u.try_draw(&mut c, |_| "ONLY".to_string()).as_deref(), Some("ONLY"));
        assert_eq!(u.try_draw(&mut c, |_| "ONLY".to_string()), None);
        assert_eq!(u.len(), 1);
    }

    #[test]
    fn fallback_uuids_parse() {
        let mut c = ctx();
        for id in fallback_system_ids(&mut c, true) {
            assert!(uuid::Uuid::parse_str(&id).is_ok());
        }
        assert!(fallback_system_ids(&mut c, false).iter().all(|s| s.starts_with("SYS-CODE-")));
    }
}
