use bulkseed::export::export_dataset;
use bulkseed::generators::{AccountRef, account, invoice, payment};
use bulkseed::import::{load_account_refs, load_ids_from_csv};
use bulkseed::{GenContext, GenError};
use tempfile::tempdir;

#[test]
fn invoice_ids_feed_payments_through_a_file() {
    let dir = tempdir().unwrap();
    let mut ctx = GenContext::from_seed(Some(5));
    let invoices = invoice::generate(
        &invoice::InvoiceConfig::default(),
        8,
        &AccountRef::from_ids(&["CSV-ACC-10000-CUS"]),
        &mut ctx,
    )
    .unwrap();
    let report = export_dataset(&invoices, dir.path(), ctx.now).unwrap();

    let ids = load_ids_from_csv(&report.path, "invoice_id").unwrap();
    assert_eq!(ids, invoices.ids("invoice_id"));
    assert!(ids.iter().all(|id| !id.starts_with('\t')));

    let pays = payment::generate(&payment::PaymentConfig::default(), payment::PaymentKind::Sale, 10, &ids, &mut ctx)
        .unwrap();
    assert!(pays.rows.iter().all(|r| ids.contains(&r.text("payment_invoice_id"))));
}

#[test]
fn account_file_round_trips_currency() {
    let dir = tempdir().unwrap();
    let mut ctx = GenContext::from_seed(Some(6));
    let accounts = account::generate(&account::AccountConfig::default(), 6, &mut ctx).unwrap();
    let report = export_dataset(&accounts, dir.path(), ctx.now).unwrap();
    let refs = load_account_refs(&report.path).unwrap();
    assert_eq!(refs, AccountRef::from_dataset(&accounts));
}

#[test]
fn unknown_column_and_missing_file() {
    let dir = tempdir().unwrap();
    let p = dir.path().join("ids.csv");
    std::fs::write(&p, "id\nA\n").unwrap();
    assert!(matches!(load_ids_from_csv(&p, "invoice_id"), Err(GenError::InvalidConfig(_))));
    assert!(matches!(load_ids_from_csv(&dir.path().join("nope.csv"), "id"), Err(GenError::Io(_))));
    assert_eq!(load_ids_from_csv(&p, "id").unwrap(), vec!["A"]);
}
