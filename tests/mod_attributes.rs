use bulkseed::attributes::{AttrType, CustomAttributeSpec};
use bulkseed::fanout::ItemConfig;
use bulkseed::generators::{AccountRef, invoice, order, purchase_order};
use bulkseed::{GenContext, Value};

fn accounts() -> Vec<AccountRef> {
    AccountRef::from_ids(&["CSV-ACC-12345-CUS"])
}

#[test]
fn quantity_attribute_stays_in_range() {
    let cfg = invoice::InvoiceConfig {
        item_config: ItemConfig::with_range(1, 1),
        invoice_custom_attributes: vec![
            CustomAttributeSpec::new("ca_invoice_attr_QTY", AttrType::Quantity).with_range(5, 10),
        ],
        ..Default::default()
    };
    let ds = invoice::generate(&cfg, 50, &accounts(), &mut GenContext::from_seed(Some(9))).unwrap();
    assert_eq!(ds.len(), 50);
    for row in &ds.rows {
        match row.get("ca_invoice_attr_QTY") {
            Some(Value::Int(q)) => assert!((5..=10).contains(q)),
            other => panic!("unexpected quantity {other:?}"),
        }
    }
}

#[test]
fn constant_line_attribute_repeats_on_every_row() {
    let cfg = order::OrderConfig {
        item_config: ItemConfig::with_range(1, 3),
        line_item_custom_attributes: vec![
            CustomAttributeSpec::new("ca_order_line_item_attr_FIXED", AttrType::String).fixed("same-every-time"),
        ],
        ..Default::default()
    };
    let ds = order::generate(&cfg, 20, &accounts(), &mut GenContext::from_seed(Some(3))).unwrap();
    assert!(ds.len() >= 20);
    assert!(ds.rows.iter().all(|r| r.text("ca_order_line_item_attr_FIXED") == "same-every-time"));
}

fn system_only(min: usize, max: usize) -> ItemConfig {
    ItemConfig {
        include_line_items: false,
        system_identifiers: vec!["SYS-CODE-1000".into(), "SYS-CODE-2000".into()],
        ..ItemConfig::with_range(min, max)
    }
}

#[test]
fn system_order_lines_carry_line_attributes() {
    let cfg = order::OrderConfig {
        item_config: system_only(2, 2),
        line_item_custom_attributes: vec![
            CustomAttributeSpec::new("ca_order_line_item_attr_K", AttrType::String).fixed("K"),
        ],
        ..Default::default()
    };
    let ds = order::generate(&cfg, 3, &accounts(), &mut GenContext::from_seed(Some(12))).unwrap();
    assert_eq!(ds.len(), 6);
    assert!(ds.rows.iter().all(|r| r.text("ca_order_line_item_attr_K") == "K"));
}

#[test]
fn system_purchase_order_lines_carry_line_attributes() {
    let cfg = purchase_order::PurchaseOrderConfig {
        item_config: system_only(2, 2),
        line_item_custom_attributes: vec![
            CustomAttributeSpec::new("ca_purchase_order_item_attr_K", AttrType::String).fixed("K"),
        ],
        ..Default::default()
    };
    let suppliers = AccountRef::from_ids(&["CSV-ACC-33333-SUP"]);
    let ds = purchase_order::generate(&cfg, 3, &suppliers, &mut GenContext::from_seed(Some(13))).unwrap();
    assert_eq!(ds.len(), 6);
    assert!(ds.rows.iter().all(|r| r.text("ca_purchase_order_item_attr_K") == "K"));
    assert!(ds.rows.iter().all(|r| r.text("purchase_line_item_id").starts_with("SYS-CODE-")));
}

#[test]
fn date_attributes_are_tracked_as_date_columns() {
    let cfg = invoice::InvoiceConfig::default().with_default_attributes();
    let ds = invoice::generate(&cfg, 2, &accounts(), &mut GenContext::from_seed(Some(1))).unwrap();
    assert!(ds.is_date_column("invoice_issue_date"));
    assert!(ds.date_columns.iter().any(|c| c.starts_with("ca_invoice_attr_")));
}

#[test]
fn attribute_specs_load_from_json() {
    let json = r#"[
        {"column_name": "ca_x", "type": "quantity", "quantity_min": 2, "quantity_max": 4},
        {"column_name": "ca_y", "type": "radio", "options": null},
        {"column_name": "ca_z", "type": "bool", "constant": true, "value": true}
    ]"#;
    let specs: Vec<CustomAttributeSpec> = serde_json::from_str(json).unwrap();
    assert_eq!(specs[0].quantity_max, Some(4));
    assert!(specs[1].options.is_empty());
    assert_eq!(specs[2].value, Some(Value::Bool(true)));
}
