use bulkseed::cli::{Command, GenerateArgs, RunEnv, execute, parse_list};
use bulkseed::{EntityKind, GenError};
use tempfile::tempdir;

fn env(dir: &std::path::Path) -> RunEnv {
    RunEnv { output_dir: dir.to_path_buf(), seed: Some(99) }
}

#[test]
fn explicit_accounts_reach_purchase_orders() {
    let dir = tempdir().unwrap();
    let mut args = GenerateArgs::new(EntityKind::PurchaseOrder);
    args.count = Some(6);
    args.upstream.account_ids = parse_list("CSV-ACC-70000-SUP, CSV-ACC-70001-SUP");
    let out = execute(Command::Generate(args), &env(dir.path())).unwrap();
    let mut rdr = csv::Reader::from_path(&out[0].path).unwrap();
    let headers = rdr.headers().unwrap().clone();
    let col = headers.iter().position(|h| h == "purchase_order_account_id").unwrap();
    for rec in rdr.records() {
        let rec = rec.unwrap();
        assert!(["CSV-ACC-70000-SUP", "CSV-ACC-70001-SUP"].contains(&&rec[col]));
    }
}

#[test]
fn account_csv_feeds_orders() {
    let dir = tempdir().unwrap();
    let mut acc = GenerateArgs::new(EntityKind::Account);
    acc.count = Some(4);
    let accounts = execute(Command::Generate(acc), &env(dir.path())).unwrap();

    let mut ord = GenerateArgs::new(EntityKind::Order);
    ord.count = Some(5);
    ord.upstream.account_csv = Some(accounts[0].path.clone());
    let orders = execute(Command::Generate(ord), &env(&dir.path().join("orders"))).unwrap();
    assert_eq!(orders[0].records, 5);
}

#[test]
fn unwritable_save_path_only_warns() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("file");
    std::fs::write(&blocker, "x").unwrap();
    let mut args = GenerateArgs::new(EntityKind::Inventory);
    args.count = Some(3);
    args.save_config = Some(blocker.join("cfg.json"));
    let out = execute(Command::Generate(args), &env(dir.path())).unwrap();
    assert_eq!(out[0].rows, 3);
}

#[test]
fn placeholder_accounts_unblock_orders() {
    let dir = tempdir().unwrap();
    let mut args = GenerateArgs::new(EntityKind::Order);
    args.count = Some(2);
    args.upstream.placeholder_accounts = true;
    assert!(execute(Command::Generate(args), &env(dir.path())).is_ok());

    let bad = GenerateArgs::new(EntityKind::Order);
    assert!(matches!(execute(Command::Generate(bad), &env(dir.path())), Err(GenError::NoUpstreamIds(_))));
}

#[test]
fn batch_of_invoices() {
    let dir = tempdir().unwrap();
    let out = execute(Command::Batch { entity: EntityKind::Invoice }, &env(dir.path())).unwrap();
    assert_eq!(out.iter().map(|s| s.records).collect::<Vec<_>>(), vec![200, 300, 400, 500]);
}
