use bulkseed::attributes::{AttrType, CustomAttributeSpec};
use bulkseed::config::{load_generation_config, save_generation_config};
use bulkseed::fanout::ItemConfig;
use bulkseed::generators::account::AccountConfig;
use bulkseed::generators::item;
use bulkseed::generators::payment::{PaymentConfig, PaymentKind};
use bulkseed::generators::purchase_order::PurchaseOrderConfig;
use tempfile::tempdir;

#[test]
fn purchase_order_config_round_trips() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("purchase_order_generator_config.json");
    let mut cfg = PurchaseOrderConfig::default().with_default_attributes();
    cfg.purchase_order_count = Some(42);
    cfg.account_ids = vec!["CSV-ACC-55555-SUP".into()];
    cfg.item_config = ItemConfig::with_range(2, 4);
    cfg.line_item_custom_attributes
        .push(CustomAttributeSpec::new("ca_purchase_order_item_attr_NOTE", AttrType::Text).fixed("n/a"));
    save_generation_config(&path, &cfg).unwrap();
    let back: PurchaseOrderConfig = load_generation_config(&path).unwrap();
    assert_eq!(back, cfg);
}

#[test]
fn account_and_item_configs_round_trip() {
    let dir = tempdir().unwrap();
    let acc = AccountConfig::default().with_default_attributes();
    let p = dir.path().join("account.json");
    save_generation_config(&p, &acc).unwrap();
    assert_eq!(load_generation_config::<AccountConfig>(&p).unwrap(), acc);

    let it = item::ItemConfig::default().with_default_attributes();
    let p = dir.path().join("item.json");
    save_generation_config(&p, &it).unwrap();
    assert_eq!(load_generation_config::<item::ItemConfig>(&p).unwrap(), it);
}

#[test]
fn purchase_payment_keys_are_accepted() {
    let dir = tempdir().unwrap();
    let p = dir.path().join("pp.json");
    std::fs::write(
        &p,
        r#"{"purchase_payment_count": 12, "purchase_invoice_ids": ["CSV-PINV-1"], "multi_invoice_enabled": true}"#,
    )
    .unwrap();
    let cfg: PaymentConfig = load_generation_config(&p).unwrap();
    assert_eq!(cfg.payment_count, Some(12));
    assert_eq!(cfg.invoice_ids, vec!["CSV-PINV-1"]);
    assert!(cfg.multi_invoice_enabled);
    assert_eq!(cfg.payment_processors, vec!["Cash"]);
}

#[test]
fn legacy_item_range_keys_are_accepted() {
    let cfg: ItemConfig = serde_json::from_str(r#"{"min_items_per_invoice": 2, "max_items_per_invoice": 3}"#).unwrap();
    assert_eq!(cfg.min_items, Some(2));
    assert_eq!(cfg.max_items, Some(3));
    assert!(cfg.include_system_items);
}

#[test]
fn payment_defaults_survive_partial_files() {
    let cfg = PaymentConfig::default().with_default_attributes(PaymentKind::Purchase);
    assert!(cfg.custom_attributes.iter().all(|a| a.column_name.starts_with("ca_purchase_payment_attr_")));
}
