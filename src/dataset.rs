use std::collections::HashSet;

use crate::types::{EntityKind, Row};

/// The in-memory result of one generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub entity: EntityKind,
    pub rows: Vec<Row>,
    /// Columns holding calendar dates, tab-guarded on export for transactional entities.
    pub date_columns: Vec<String>,
    /// Number of records requested; line-item entities produce more rows than this.
    pub record_count: usize,
    /// Explicit header order; empty means first-seen order.
    pub column_order: Vec<String>,
}

impl Dataset {
    #[must_use]
    pub fn new(entity: EntityKind, record_count: usize) -> Self {
        Self { entity, rows: Vec::new(), date_columns: Vec::new(), record_count, column_order: Vec::new() }
    }

    /// Union of row keys in first-seen order.
    #[must_use]
    pub fn columns(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for row in &self.rows {
            for k in row.keys() {
                if seen.insert(k) {
                    out.push(k.to_string());
                }
            }
        }
        out
    }

    /// Export header: the explicit order when set, else `columns()`.
    #[must_use]
    pub fn header(&self) -> Vec<String> {
        if self.column_order.is_empty() { self.columns() } else { self.column_order.clone() }
    }

    /// Distinct non-empty values of `column`, in first-seen order.
    #[must_use]
    pub fn ids(&self, column: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .filter_map(|r| r.get(column))
            .map(ToString::to_string)
            .filter(|s| !s.is_empty())
            .filter(|s| seen.insert(s.clone()))
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn is_date_column(&self, column: &str) -> bool {
        self.date_columns.iter().any(|c| c == column)
    }

    /// Column order built from ordered groups.
    ///
    /// Each group is a predicate; a column lands in the first group it matches.
    /// Columns matching no group go last, in their original order.
    #[must_use]
    pub fn grouped_columns(&self, groups: &[&dyn Fn(&str) -> bool]) -> Vec<String> {
        let cols = self.columns();
        let mut buckets: Vec<Vec<String>> = vec![Vec::new(); groups.len() + 1];
        for c in cols {
            let idx = groups.iter().position(|g| g(&c)).unwrap_or(groups.len());
            buckets[idx].push(c);
        }
        buckets.into_iter().flatten().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> Row {
        let mut r = Row::new();
        for (k, v) in pairs {
            r.set(*k, *v);
        }
        r
    }

    #[test]
    fn columns_are_first_seen_union() {
        let mut ds = Dataset::new(EntityKind::Order, 2);
        ds.rows.push(row(&[("a", "1"), ("b", "2")]));
        ds.rows.push(row(&[("c", "3"), ("a", "4")]));
        assert_eq!(ds.columns(), vec!["a", "b", "c"]);
    }

    #[test]
    fn ids_skip_blanks_and_dups() {
        let mut ds = Dataset::new(EntityKind::Invoice, 3);
        ds.rows.push(row(&[("invoice_id", "X")]));
        ds.rows.push(row(&[("invoice_id", "")]));
        ds.rows.push(row(&[("invoice_id", "X")]));
        ds.rows.push(row(&[("invoice_id", "Y")]));
        assert_eq!(ds.ids("invoice_id"), vec!["X", "Y"]);
    }

    #[test]
    fn grouping_moves_matches_forward() {
        let mut ds = Dataset::new(EntityKind::Account, 1);
        ds.rows.push(row(&[("x", ""), ("contact_1_a", ""), ("account_id", "")]));
        let is_account = |c: &str| c.starts_with("account_");
        let is_contact = |c: &str| c.starts_with("contact_");
        let cols = ds.grouped_columns(&[&is_account, &is_contact]);
        assert_eq!(cols, vec!["account_id", "contact_1_a", "x"]);
    }
}
