//! Checkout and order history

mod common;

use common::*;
use dine_store::repository::order;
use order_server::orders::OrderError;
use shared::models::ItemType;

#[tokio::test]
async fn test_place_order_on_empty_cart() {
    let app = setup().await;

    let err = app.state.orders.place_order(EMAIL).await.unwrap_err();
    assert!(matches!(err, OrderError::EmptyCart));
    assert_eq!(order::count_by_email(&app.db.pool, EMAIL).await.unwrap(), 0);
}

#[tokio::test]
async fn test_place_order_snapshots_and_clears_cart() {
    let app = setup().await;
    let item = seed_menu_item(&app, "Momo Platter", "180", 10).await;
    let table = seed_table(&app, "Rooftop", 2, 600.0).await;

    app.state
        .ledger
        .add_item(add(EMAIL, item.id, ItemType::Menu, 2))
        .await
        .unwrap();
    app.state
        .ledger
        .add_item(add(EMAIL, table.id, ItemType::Table, 1))
        .await
        .unwrap();

    let placed = app.state.orders.place_order(EMAIL).await.unwrap();
    assert_eq!(placed.email, EMAIL);
    assert_eq!(placed.items.len(), 2);
    assert_eq!(placed.items[0].item_type, ItemType::Menu);
    assert_eq!(placed.items[1].item_type, ItemType::Table);
    assert_eq!(placed.total, 960.0);

    // Cart is gone, the reservation is consumed by the order
    assert!(app.state.ledger.get(EMAIL).await.unwrap().is_empty());
    assert_eq!(menu_stock(&app, item.id).await, 8);
    assert_eq!(table_state(&app, table.id).await.available, 1);

    // A second checkout has nothing to place
    let err = app.state.orders.place_order(EMAIL).await.unwrap_err();
    assert!(matches!(err, OrderError::EmptyCart));

    let history = app.state.orders.orders_for(EMAIL).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id, placed.id);
    assert_eq!(history[0].items, placed.items);
}

#[tokio::test]
async fn test_order_keeps_price_after_catalog_change() {
    let app = setup().await;
    let item = seed_menu_item(&app, "Sekuwa", "350", 5).await;

    app.state
        .ledger
        .add_item(add(EMAIL, item.id, ItemType::Menu, 1))
        .await
        .unwrap();
    dine_store::repository::menu_item::update(
        &app.db.pool,
        item.id,
        Default::default(),
        Some("500".into()),
    )
    .await
    .unwrap();

    let placed = app.state.orders.place_order(EMAIL).await.unwrap();
    assert_eq!(placed.items[0].unit_price, 350.0);
    assert_eq!(placed.total, 350.0);
}

#[tokio::test]
async fn test_history_is_newest_first() {
    let app = setup().await;
    let item = seed_menu_item(&app, "Chiya", "30", 10).await;

    let mut ids = Vec::new();
    for qty in 1..=3 {
        app.state
            .ledger
            .add_item(add(EMAIL, item.id, ItemType::Menu, qty))
            .await
            .unwrap();
        ids.push(app.state.orders.place_order(EMAIL).await.unwrap().id);
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let history = app.state.orders.orders_for(EMAIL).await.unwrap();
    let listed: Vec<i64> = history.iter().map(|o| o.id).collect();
    ids.reverse();
    assert_eq!(listed, ids);
    assert_eq!(history[0].total, 90.0);

    assert!(
        app.state
            .orders
            .orders_for("stranger@example.com")
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_place_order_rejects_malformed_email() {
    let app = setup().await;
    let err = app.state.orders.place_order("   ").await.unwrap_err();
    assert!(matches!(err, OrderError::Validation(_)));
}
