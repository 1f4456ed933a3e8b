use bulkseed::GenContext;
use bulkseed::fanout::ItemConfig;
use bulkseed::generators::{AccountRef, account, item, purchase_invoice};
use chrono::NaiveDate;

fn ctx(seed: u64) -> GenContext {
    let now = NaiveDate::from_ymd_opt(2024, 11, 5).and_then(|d| d.and_hms_opt(7, 0, 0)).unwrap();
    GenContext::seeded(seed, now)
}

#[test]
fn same_seed_same_accounts() {
    let cfg = account::AccountConfig::default().with_default_attributes();
    let a = account::generate(&cfg, 25, &mut ctx(77)).unwrap();
    let b = account::generate(&cfg, 25, &mut ctx(77)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn same_seed_same_purchase_invoices() {
    let cfg = purchase_invoice::PurchaseInvoiceConfig {
        item_config: ItemConfig::with_range(1, 4),
        ..Default::default()
    }
    .with_default_attributes();
    let suppliers = AccountRef::from_ids(&["CSV-ACC-40000-SUP", "CSV-ACC-40001-SUP"]);
    let a = purchase_invoice::generate(&cfg, 12, &suppliers, &mut ctx(8)).unwrap();
    let b = purchase_invoice::generate(&cfg, 12, &suppliers, &mut ctx(8)).unwrap();
    assert_eq!(a.rows, b.rows);
}

#[test]
fn different_seeds_differ() {
    let cfg = item::ItemConfig::default();
    let a = item::generate(&cfg, 10, &mut ctx(1)).unwrap();
    let b = item::generate(&cfg, 10, &mut ctx(2)).unwrap();
    assert_ne!(a.ids("item_id"), b.ids("item_id"));
}
