//! Cart page flow: persistence, quantity controls and the minimum order.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::fs;

use metriks_core::{Adjustment, ProductId};
use metriks_storefront::config::CART_STORAGE_KEY;
use metriks_storefront::dom::{Document, Dom, classes, ids};
use metriks_storefront::storage::{FileStorage, Storage};
use metriks_storefront::widget::{Action, Widget};

type Page = Widget<Document, FileStorage>;

fn open(path: &std::path::Path) -> Page {
    let dom = Document::with_elements(ids::CART_PAGE.iter().copied());
    Widget::new(dom, FileStorage::open(path).unwrap()).unwrap()
}

fn add(page: &mut Page, id: &str, name: &str) {
    page.dispatch(Action::AddToCart {
        id: ProductId::new(id),
        name: name.to_owned(),
    })
    .unwrap();
}

fn set(page: &mut Page, id: &str, raw: &str) {
    page.dispatch(Action::SetQuantityInput {
        id: ProductId::new(id),
        raw: raw.to_owned(),
    })
    .unwrap();
}

#[test]
fn test_cart_survives_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");

    let mut page = open(&path);
    add(&mut page, "A", "Anchor 10x80");
    add(&mut page, "B", "Bolt M8x40");
    set(&mut page, "A", "3");
    drop(page);

    let page = open(&path);
    let items = page.cart().cart().items();
    assert_eq!(items.len(), 2);
    assert_eq!((items[0].id.as_str(), items[0].quantity), ("A", 3));
    assert_eq!((items[1].id.as_str(), items[1].quantity), ("B", 1));

    let dom = page.dom();
    assert_eq!(dom.content(ids::CART_COUNT), "4");
    assert_eq!(dom.content(ids::TOTAL_ITEMS), "2");
    assert_eq!(dom.content(ids::TOTAL_QUANTITY), "4");
    assert!(dom.content(ids::CART_ITEMS).contains("Anchor 10x80"));
}

#[test]
fn test_minimum_order_threshold() {
    let dir = tempfile::tempdir().unwrap();
    let mut page = open(&dir.path().join("storage.json"));

    add(&mut page, "A", "Anchor");
    set(&mut page, "A", "60");
    add(&mut page, "B", "Bolt");
    set(&mut page, "B", "39");

    let dom = page.dom();
    assert!(dom.is_disabled(ids::SUBMIT_REQUEST_BTN));
    assert!(!dom.has_class(ids::MIN_ORDER_WARNING, classes::HIDDEN));
    assert!(dom.content(ids::MIN_ORDER_WARNING).contains("100 pcs"));
    assert!(dom.content(ids::MIN_ORDER_WARNING).contains("99 pcs"));

    page.dispatch(Action::Adjust {
        id: ProductId::new("B"),
        adjustment: Adjustment::Plus,
    })
    .unwrap();

    let dom = page.dom();
    assert!(!dom.is_disabled(ids::SUBMIT_REQUEST_BTN));
    assert!(dom.has_class(ids::MIN_ORDER_WARNING, classes::HIDDEN));
    assert_eq!(dom.content(ids::TOTAL_QUANTITY), "100");
}

#[test]
fn test_decrement_at_one_removes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    let mut page = open(&path);

    add(&mut page, "A", "Anchor");
    page.dispatch(Action::Adjust {
        id: ProductId::new("A"),
        adjustment: Adjustment::Minus,
    })
    .unwrap();

    assert!(page.cart().cart().is_empty());
    assert!(page.dom().content(ids::CART_ITEMS).contains("Cart is empty"));
    assert!(page.dom().has_class(ids::CART_COUNT, classes::HIDDEN));

    let stored = FileStorage::open(&path).unwrap();
    assert_eq!(stored.get_item(CART_STORAGE_KEY).as_deref(), Some("[]"));
}

#[test]
fn test_quantity_input_edge_cases() {
    let dir = tempfile::tempdir().unwrap();
    let mut page = open(&dir.path().join("storage.json"));
    add(&mut page, "A", "Anchor");

    set(&mut page, "A", "12abc");
    assert_eq!(page.cart().cart().items()[0].quantity, 12);
    set(&mut page, "A", "");
    assert_eq!(page.cart().cart().items()[0].quantity, 1);
    set(&mut page, "A", "0");
    assert_eq!(page.cart().cart().items()[0].quantity, 1);
    set(&mut page, "missing", "40");
    assert_eq!(page.cart().cart().distinct_items(), 1);
    set(&mut page, "A", "-1");
    assert!(page.cart().cart().is_empty());
}

#[test]
fn test_corrupt_stored_cart_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    fs::write(&path, r#"{"cart": "definitely not a cart"}"#).unwrap();

    let mut page = open(&path);
    assert!(page.cart().cart().is_empty());

    add(&mut page, "A", "Anchor");
    let stored = FileStorage::open(&path).unwrap();
    assert_eq!(
        stored.get_item(CART_STORAGE_KEY).as_deref(),
        Some(r#"[{"id":"A","name":"Anchor","quantity":1}]"#)
    );
}

#[test]
fn test_truncated_storage_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    fs::write(&path, r#"{"cart": "[{\"id\":\"A\",\"name\":\"Anch"#).unwrap();

    let mut page = open(&path);
    assert!(page.cart().cart().is_empty());

    add(&mut page, "B", "Bolt");
    set(&mut page, "B", "99999999999999999999");
    let reopened = open(&path);
    assert_eq!(reopened.cart().summary().total_quantity, u64::from(u32::MAX));
}
