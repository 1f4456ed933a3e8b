use bulkseed::GenContext;
use bulkseed::fanout::{ContinuationRule, ItemConfig};
use bulkseed::generators::{AccountRef, invoice, purchase_order};
use chrono::NaiveDate;
use std::collections::HashMap;

fn ctx(seed: u64) -> GenContext {
    let now = NaiveDate::from_ymd_opt(2025, 3, 10).and_then(|d| d.and_hms_opt(12, 0, 0)).unwrap();
    GenContext::seeded(seed, now)
}

fn accounts() -> Vec<AccountRef> {
    AccountRef::from_ids(&["CSV-ACC-10001-CUS", "CSV-ACC-10002-CUS"])
}

#[test]
fn fixed_range_of_two_doubles_the_rows() {
    let cfg = invoice::InvoiceConfig { item_config: ItemConfig::with_range(2, 2), ..Default::default() };
    let ds = invoice::generate(&cfg, 3, &accounts(), &mut ctx(1)).unwrap();
    assert_eq!(ds.len(), 6);
    assert_eq!(ds.record_count, 3);

    let mut per_id: HashMap<String, usize> = HashMap::new();
    for row in &ds.rows {
        *per_id.entry(row.text("invoice_id")).or_default() += 1;
    }
    assert!(per_id.values().all(|n| *n == 2));
    // random IDs may collide, so only bound the distinct count
    assert!(!per_id.is_empty() && per_id.len() <= 3);
}

#[test]
fn continuation_rows_keep_only_ids_and_line_columns() {
    let cfg = invoice::InvoiceConfig { item_config: ItemConfig::with_range(3, 3), ..Default::default() }
        .with_default_attributes();
    let ds = invoice::generate(&cfg, 4, &accounts(), &mut ctx(2)).unwrap();
    let rule = ContinuationRule::INVOICE;
    for (i, row) in ds.rows.iter().enumerate() {
        if i % 3 == 0 {
            assert!(!row.text("invoice_issue_date").is_empty());
            continue;
        }
        for (col, v) in row.iter() {
            if !rule.keeps(col) {
                assert!(v.is_empty(), "row {i} column {col} should be blank");
            }
        }
        assert!(!row.text("invoice_id").is_empty());
    }
}

#[test]
fn purchase_order_continuations_repeat_dates() {
    let cfg = purchase_order::PurchaseOrderConfig {
        item_config: ItemConfig::with_range(2, 2),
        ..Default::default()
    };
    let supplier = AccountRef::from_ids(&["CSV-ACC-20001-SUP"]);
    let ds = purchase_order::generate(&cfg, 2, &supplier, &mut ctx(3)).unwrap();
    assert_eq!(ds.len(), 4);
    assert_eq!(ds.rows[0].text("purchase_order_issue_date"), ds.rows[1].text("purchase_order_issue_date"));
    assert_eq!(ds.rows[1].text("purchase_order_account_id"), "CSV-ACC-20001-SUP");
}

#[test]
fn missing_accounts_are_reported() {
    let cfg = invoice::InvoiceConfig::default();
    let err = invoice::generate(&cfg, 1, &[], &mut ctx(4)).unwrap_err();
    assert!(matches!(err, bulkseed::GenError::NoUpstreamIds(_)));
}
