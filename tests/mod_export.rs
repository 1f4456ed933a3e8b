use bulkseed::export::{CsvOptions, export_dataset, write_to_writer};
use bulkseed::fanout::ItemConfig;
use bulkseed::generators::payment::{self, PaymentConfig, PaymentKind};
use bulkseed::generators::{AccountRef, item, invoice};
use bulkseed::{EntityKind, GenContext};
use chrono::NaiveDate;
use regex::Regex;
use tempfile::tempdir;

fn ctx() -> GenContext {
    let now = NaiveDate::from_ymd_opt(2025, 7, 1).and_then(|d| d.and_hms_opt(8, 9, 10)).unwrap();
    GenContext::seeded(21, now)
}

#[test]
fn invoice_export_quotes_and_guards_dates() {
    let dir = tempdir().unwrap();
    let mut ctx = ctx();
    let cfg = invoice::InvoiceConfig { item_config: ItemConfig::with_range(1, 2), ..Default::default() };
    let ds = invoice::generate(&cfg, 5, &AccountRef::from_ids(&["CSV-ACC-11111-CUS"]), &mut ctx).unwrap();
    let report = export_dataset(&ds, dir.path(), ctx.now).unwrap();

    assert_eq!(
        report.path.file_name().unwrap().to_string_lossy(),
        "INVOICE_DUMMY_DATA_5_2025-07-01_08-09-10.csv"
    );
    assert_eq!(report.rows, ds.len());

    let mut rdr = csv::Reader::from_path(&report.path).unwrap();
    let headers = rdr.headers().unwrap().clone();
    assert_eq!(headers.iter().collect::<Vec<_>>(), ds.header().iter().map(String::as_str).collect::<Vec<_>>());
    let issue = headers.iter().position(|h| h == "invoice_issue_date").unwrap();
    let first = rdr.records().next().unwrap().unwrap();
    let date = Regex::new(r"^\t\d{4}-\d{2}-\d{2}$").unwrap();
    assert!(date.is_match(&first[issue]), "got {:?}", &first[issue]);

    let raw = std::fs::read_to_string(&report.path).unwrap();
    assert!(raw.lines().next().unwrap().starts_with("\"invoice_id\""));
}

#[test]
fn header_is_union_of_row_columns() {
    let mut ctx = ctx();
    let cfg = PaymentConfig { multi_invoice_enabled: true, ..Default::default() };
    let ids: Vec<String> = (1..=6).map(|i| format!("CSV-INV-{i}")).collect();
    let ds = payment::generate(&cfg, PaymentKind::Sale, 4, &ids, &mut ctx).unwrap();
    let mut out = Vec::new();
    write_to_writer(&ds, &mut out, &CsvOptions::for_entity(ds.entity)).unwrap();
    let text = String::from_utf8(out).unwrap();
    let header = text.lines().next().unwrap();
    for col in ds.columns() {
        assert!(header.contains(&format!("\"{col}\"")), "{col} missing from header");
    }
    assert_eq!(text.lines().count(), ds.len() + 1);
}

#[test]
fn item_export_is_not_quoted() {
    let mut ctx = ctx();
    let ds = item::generate(&item::ItemConfig::default(), 3, &mut ctx).unwrap();
    let mut out = Vec::new();
    write_to_writer(&ds, &mut out, &CsvOptions::for_entity(EntityKind::Item)).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(!text.lines().next().unwrap().starts_with('"'));
}
