//! Per-entity row generators.
//!
//! Each submodule exposes a serde config (`XConfig`) plus a `generate` function
//! taking the config, a record count, upstream references where relevant and the
//! run's [`GenContext`](crate::context::GenContext).

pub mod account;
pub mod fakes;
pub mod inventory;
pub mod invoice;
pub mod item;
pub mod order;
pub mod payment;
pub mod purchase_invoice;
pub mod purchase_order;

use rand::seq::{IndexedRandom, index};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::context::GenContext;
use crate::dataset::Dataset;
use crate::types::Value;

/// An upstream account a transactional record can be billed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRef {
    pub id: String,
    pub currency: Option<String>,
}

impl AccountRef {
    /// Trimmed, non-empty IDs with no currency attached.
    #[must_use]
    pub fn from_ids<S: AsRef<str>>(ids: &[S]) -> Vec<AccountRef> {
        ids.iter()
            .map(|s| s.as_ref().trim())
            .filter(|s| !s.is_empty())
            .map(|s| AccountRef { id: s.to_string(), currency: None })
            .collect()
    }

    /// One reference per generated account row, carrying its currency.
    #[must_use]
    pub fn from_dataset(accounts: &Dataset) -> Vec<AccountRef> {
        accounts
            .rows
            .iter()
            .filter_map(|r| {
                let id = r.text("account_id");
                if id.is_empty() {
                    return None;
                }
                let currency = Some(r.text("account_currency")).filter(|c| !c.is_empty());
                Some(AccountRef { id, currency })
            })
            .collect()
    }
}

/// Tax pools; each entity reads the fields it understands.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxConfig {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tax_codes: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub tax_rates: BTreeMap<String, Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tax_uuids: Vec<String>,
}

/// Named groups handed to an exact number of randomly chosen rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupConfig {
    pub group_names: Vec<String>,
    pub assign_count: usize,
}

impl GroupConfig {
    /// Row indices that receive a group; capped at `row_count`.
    pub fn rows(&self, row_count: usize, ctx: &mut GenContext) -> HashSet<usize> {
        if self.group_names.is_empty() || self.assign_count == 0 {
            return HashSet::new();
        }
        sample_rows(row_count, self.assign_count, ctx)
    }
}

/// `amount` distinct indices out of `0..row_count`.
pub(crate) fn sample_rows(row_count: usize, amount: usize, ctx: &mut GenContext) -> HashSet<usize> {
    index::sample(&mut ctx.rng, row_count, amount.min(row_count)).into_iter().collect()
}

/// Uniform pick from a string pool; empty pools yield "".
pub(crate) fn pick(ctx: &mut GenContext, pool: &[&str]) -> String {
    pool.choose(&mut ctx.rng).map(|s| (*s).to_string()).unwrap_or_default()
}

/// Uniform pick from an owned pool.
pub(crate) fn pick_owned(ctx: &mut GenContext, pool: &[String]) -> String {
    pool.choose(&mut ctx.rng).cloned().unwrap_or_default()
}

/// "TRUE" with probability `p`, otherwise "".
pub(crate) fn flag(ctx: &mut GenContext, p: f64) -> &'static str {
    if ctx.chance(p) { "TRUE" } else { "" }
}

/// Two-word label, one word from each pool.
pub(crate) fn compose(ctx: &mut GenContext, left: &[&str], right: &[&str]) -> String {
    let l = pick(ctx, left);
    let r = pick(ctx, right);
    format!("{l} {r}")
}

pub(crate) fn default_currency() -> String {
    "AUD".to_string()
}
