//! Cart ledger behavior against a real SQLite database

mod common;

use common::*;
use order_server::cart::CartError;
use order_server::inventory::InventoryError;
use order_server::pricing::PricingError;
use shared::models::ItemType;
use shared::price::PriceError;

#[tokio::test]
async fn test_add_then_remove_restores_stock() {
    let app = setup().await;
    let item = seed_menu_item(&app, "Chicken Momo", "100", 5).await;

    let cart = app
        .state
        .ledger
        .add_item(add(EMAIL, item.id, ItemType::Menu, 3))
        .await
        .unwrap();
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.items[0].quantity, 3);
    assert_eq!(cart.items[0].name, "Chicken Momo");
    assert_eq!(cart.total_cost, 300.0);
    assert_eq!(menu_stock(&app, item.id).await, 2);

    let cart = app
        .state
        .ledger
        .change_quantity(EMAIL, item.id, ItemType::Menu, -3)
        .await
        .unwrap();
    assert!(cart.items.is_empty());
    assert_eq!(cart.total_cost, 0.0);
    assert_eq!(menu_stock(&app, item.id).await, 5);
}

#[tokio::test]
async fn test_get_missing_cart_is_empty() {
    let app = setup().await;
    let cart = app.state.ledger.get("nobody@example.com").await.unwrap();
    assert_eq!(cart.email, "nobody@example.com");
    assert!(cart.items.is_empty());
    assert_eq!(cart.total_cost, 0.0);
}

#[tokio::test]
async fn test_email_is_normalized() {
    let app = setup().await;
    let item = seed_menu_item(&app, "Sel Roti", "40", 10).await;

    app.state
        .ledger
        .add_item(add("  Guest@Example.COM ", item.id, ItemType::Menu, 1))
        .await
        .unwrap();
    let cart = app.state.ledger.get(EMAIL).await.unwrap();
    assert_eq!(cart.items.len(), 1);
}

#[tokio::test]
async fn test_merge_keeps_captured_price() {
    let app = setup().await;
    let item = seed_menu_item(&app, "Thali", "Rs. 250", 10).await;

    app.state
        .ledger
        .add_item(add(EMAIL, item.id, ItemType::Menu, 2))
        .await
        .unwrap();

    // Price changes after the line was created
    dine_store::repository::menu_item::update(
        &app.db.pool,
        item.id,
        Default::default(),
        Some("400".into()),
    )
    .await
    .unwrap();

    let cart = app
        .state
        .ledger
        .add_item(add(EMAIL, item.id, ItemType::Menu, 1))
        .await
        .unwrap();
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.items[0].quantity, 3);
    assert_eq!(cart.items[0].unit_price, 250.0);
    assert_eq!(cart.total_cost, 750.0);
    assert_eq!(menu_stock(&app, item.id).await, 7);
}

#[tokio::test]
async fn test_offer_price_wins() {
    let app = setup().await;
    let item = seed_menu_item(&app, "Biryani", "300", 4).await;
    seed_offer(&app, &item, "Rs. 240").await;

    let cart = app
        .state
        .ledger
        .add_item(add(EMAIL, item.id, ItemType::Menu, 2))
        .await
        .unwrap();
    assert_eq!(cart.items[0].unit_price, 240.0);
    assert_eq!(cart.total_cost, 480.0);
}

#[tokio::test]
async fn test_invalid_offer_price_falls_back_to_catalog() {
    let app = setup().await;
    let item = seed_menu_item(&app, "Chowmein", "150", 4).await;
    seed_offer(&app, &item, "free").await;

    let cart = app
        .state
        .ledger
        .add_item(add(EMAIL, item.id, ItemType::Menu, 1))
        .await
        .unwrap();
    assert_eq!(cart.items[0].unit_price, 150.0);
}

#[tokio::test]
async fn test_invalid_catalog_price_rejects_without_reserving() {
    let app = setup().await;
    let item = seed_menu_item(&app, "Mystery", "ask the chef", 4).await;

    let err = app
        .state
        .ledger
        .add_item(add(EMAIL, item.id, ItemType::Menu, 1))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CartError::Pricing(PricingError::InvalidPrice { .. })
    ));
    assert_eq!(menu_stock(&app, item.id).await, 4);
    assert!(app.state.ledger.get(EMAIL).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_insufficient_stock_leaves_no_line() {
    let app = setup().await;
    let item = seed_menu_item(&app, "Kheer", "90", 2).await;

    let err = app
        .state
        .ledger
        .add_item(add(EMAIL, item.id, ItemType::Menu, 3))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CartError::Inventory(InventoryError::InsufficientStock {
            requested: 3,
            available: 2,
            ..
        })
    ));
    assert_eq!(menu_stock(&app, item.id).await, 2);
    assert!(app.state.ledger.get(EMAIL).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_item_is_not_found() {
    let app = setup().await;
    let err = app
        .state
        .ledger
        .add_item(add(EMAIL, 987_654, ItemType::Menu, 1))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CartError::Pricing(PricingError::NotFound { id: 987_654, .. })
    ));
}

#[tokio::test]
async fn test_rejects_invalid_payload() {
    let app = setup().await;
    let item = seed_menu_item(&app, "Lassi", "80", 5).await;

    let err = app
        .state
        .ledger
        .add_item(add("not-an-email", item.id, ItemType::Menu, 1))
        .await
        .unwrap_err();
    assert!(matches!(err, CartError::Validation(_)));

    let err = app
        .state
        .ledger
        .add_item(add(EMAIL, item.id, ItemType::Menu, 0))
        .await
        .unwrap_err();
    assert!(matches!(err, CartError::Validation(_)));
    assert_eq!(menu_stock(&app, item.id).await, 5);
}

#[tokio::test]
async fn test_request_name_overrides_catalog_name() {
    let app = setup().await;
    let item = seed_menu_item(&app, "Aloo Paratha", "120", 5).await;

    let mut req = add(EMAIL, item.id, ItemType::Menu, 1);
    req.name = Some("  Paratha (extra butter) ".into());
    let cart = app.state.ledger.add_item(req).await.unwrap();
    assert_eq!(cart.items[0].name, "Paratha (extra butter)");

    let table = seed_table(&app, "T1", 2, 500.0).await;
    let mut req = add(EMAIL, table.id, ItemType::Table, 1);
    req.name = Some("   ".into());
    let cart = app.state.ledger.add_item(req).await.unwrap();
    assert_eq!(cart.items[1].name, "T1");
}

#[tokio::test]
async fn test_table_price_hint_and_booking() {
    let app = setup().await;
    let table = seed_table(&app, "Window", 3, 500.0).await;

    let cart = app
        .state
        .ledger
        .add_item(add_with_price(EMAIL, table.id, ItemType::Table, 2, "Rs. 650/hr"))
        .await
        .unwrap();
    assert_eq!(cart.items[0].unit_price, 650.0);
    assert_eq!(cart.total_cost, 1300.0);

    let state = table_state(&app, table.id).await;
    assert_eq!(state.available, 1);
    assert_eq!(state.booked, 2);

    app.state
        .ledger
        .remove_item(EMAIL, table.id, ItemType::Table)
        .await
        .unwrap();
    let state = table_state(&app, table.id).await;
    assert_eq!(state.available, 3);
    assert_eq!(state.booked, 0);
}

#[tokio::test]
async fn test_table_without_hint_uses_hourly_price() {
    let app = setup().await;
    let table = seed_table(&app, "Patio", 1, 350.0).await;

    let cart = app
        .state
        .ledger
        .add_item(add(EMAIL, table.id, ItemType::Table, 1))
        .await
        .unwrap();
    assert_eq!(cart.items[0].unit_price, 350.0);
}

#[tokio::test]
async fn test_event_hall_is_booked_once() {
    let app = setup().await;
    let hall = seed_hall(&app, "H1", 5000.0).await;

    let cart = app
        .state
        .ledger
        .add_item(add(EMAIL, hall.id, ItemType::EventHall, 1))
        .await
        .unwrap();
    assert_eq!(cart.total_cost, 5000.0);
    assert!(!hall_available(&app, hall.id).await);

    let err = app
        .state
        .ledger
        .add_item(add("other@example.com", hall.id, ItemType::EventHall, 1))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CartError::Inventory(InventoryError::Unavailable { .. })
    ));
    assert!(app.state.ledger.get("other@example.com").await.unwrap().is_empty());

    // Booking the same hall twice in one cart is refused too
    let err = app
        .state
        .ledger
        .add_item(add(EMAIL, hall.id, ItemType::EventHall, 1))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CartError::Inventory(InventoryError::Unavailable { .. })
    ));
    assert_eq!(app.state.ledger.get(EMAIL).await.unwrap().items[0].quantity, 1);

    app.state
        .ledger
        .change_quantity(EMAIL, hall.id, ItemType::EventHall, -1)
        .await
        .unwrap();
    assert!(hall_available(&app, hall.id).await);
}

#[tokio::test]
async fn test_event_hall_quantity_must_be_one() {
    let app = setup().await;
    let hall = seed_hall(&app, "Banquet", 8000.0).await;

    let err = app
        .state
        .ledger
        .add_item(add(EMAIL, hall.id, ItemType::EventHall, 2))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CartError::Inventory(InventoryError::InvalidAmount { amount: 2, .. })
    ));
    assert!(hall_available(&app, hall.id).await);
}

#[tokio::test]
async fn test_change_quantity_up_and_down() {
    let app = setup().await;
    let item = seed_menu_item(&app, "Samosa", "25.50", 10).await;

    app.state
        .ledger
        .add_item(add(EMAIL, item.id, ItemType::Menu, 2))
        .await
        .unwrap();

    let cart = app
        .state
        .ledger
        .change_quantity(EMAIL, item.id, ItemType::Menu, 3)
        .await
        .unwrap();
    assert_eq!(cart.items[0].quantity, 5);
    assert_eq!(cart.total_cost, 127.5);
    assert_eq!(menu_stock(&app, item.id).await, 5);

    let cart = app
        .state
        .ledger
        .change_quantity(EMAIL, item.id, ItemType::Menu, -1)
        .await
        .unwrap();
    assert_eq!(cart.items[0].quantity, 4);
    assert_eq!(cart.total_cost, 102.0);
    assert_eq!(menu_stock(&app, item.id).await, 6);

    // Overshooting below zero releases exactly what the line held
    let cart = app
        .state
        .ledger
        .change_quantity(EMAIL, item.id, ItemType::Menu, -100)
        .await
        .unwrap();
    assert!(cart.items.is_empty());
    assert_eq!(menu_stock(&app, item.id).await, 10);
}

#[tokio::test]
async fn test_change_quantity_beyond_stock_is_rejected() {
    let app = setup().await;
    let item = seed_menu_item(&app, "Jeri", "60", 3).await;

    app.state
        .ledger
        .add_item(add(EMAIL, item.id, ItemType::Menu, 2))
        .await
        .unwrap();
    let err = app
        .state
        .ledger
        .change_quantity(EMAIL, item.id, ItemType::Menu, 2)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CartError::Inventory(InventoryError::InsufficientStock { .. })
    ));

    let cart = app.state.ledger.get(EMAIL).await.unwrap();
    assert_eq!(cart.items[0].quantity, 2);
    assert_eq!(menu_stock(&app, item.id).await, 1);
}

#[tokio::test]
async fn test_change_quantity_errors() {
    let app = setup().await;
    let item = seed_menu_item(&app, "Puri", "30", 3).await;

    let err = app
        .state
        .ledger
        .change_quantity(EMAIL, item.id, ItemType::Menu, 1)
        .await
        .unwrap_err();
    assert!(matches!(err, CartError::LineNotFound { .. }));

    app.state
        .ledger
        .add_item(add(EMAIL, item.id, ItemType::Menu, 1))
        .await
        .unwrap();

    let err = app
        .state
        .ledger
        .change_quantity(EMAIL, item.id, ItemType::Menu, 0)
        .await
        .unwrap_err();
    assert!(matches!(err, CartError::Validation(_)));

    // Same id, different kind is a different line
    let err = app
        .state
        .ledger
        .change_quantity(EMAIL, item.id, ItemType::Table, -1)
        .await
        .unwrap_err();
    assert!(matches!(err, CartError::LineNotFound { .. }));
}

#[tokio::test]
async fn test_abandon_releases_everything() {
    let app = setup().await;
    let item = seed_menu_item(&app, "Gundruk", "70", 6).await;
    let table = seed_table(&app, "Corner", 2, 400.0).await;
    let hall = seed_hall(&app, "Garden", 6000.0).await;

    for req in [
        add(EMAIL, item.id, ItemType::Menu, 4),
        add(EMAIL, table.id, ItemType::Table, 2),
        add(EMAIL, hall.id, ItemType::EventHall, 1),
    ] {
        app.state.ledger.add_item(req).await.unwrap();
    }

    let released = app.state.ledger.abandon(EMAIL).await.unwrap();
    assert_eq!(released, 3);
    assert_eq!(menu_stock(&app, item.id).await, 6);
    assert_eq!(table_state(&app, table.id).await.available, 2);
    assert!(hall_available(&app, hall.id).await);
    assert!(app.state.ledger.get(EMAIL).await.unwrap().is_empty());

    // Nothing left to release
    assert_eq!(app.state.ledger.abandon(EMAIL).await.unwrap(), 0);
}

#[tokio::test]
async fn test_removing_line_of_deleted_item() {
    let app = setup().await;
    let item = seed_menu_item(&app, "Seasonal", "200", 3).await;

    app.state
        .ledger
        .add_item(add(EMAIL, item.id, ItemType::Menu, 1))
        .await
        .unwrap();
    dine_store::repository::menu_item::delete(&app.db.pool, item.id)
        .await
        .unwrap();

    let cart = app
        .state
        .ledger
        .remove_item(EMAIL, item.id, ItemType::Menu)
        .await
        .unwrap();
    assert!(cart.items.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_adds_never_oversell_table() {
    let app = setup().await;
    let table = seed_table(&app, "Last Table", 1, 500.0).await;

    let ledger_a = app.state.ledger.clone();
    let ledger_b = app.state.ledger.clone();
    let (a, b) = tokio::join!(
        tokio::spawn(async move {
            ledger_a
                .add_item(add("a@example.com", table.id, ItemType::Table, 1))
                .await
        }),
        tokio::spawn(async move {
            ledger_b
                .add_item(add("b@example.com", table.id, ItemType::Table, 1))
                .await
        }),
    );
    let results = [a.unwrap(), b.unwrap()];

    let ok = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(ok, 1);
    let denied = results
        .iter()
        .filter(|r| {
            matches!(
                r,
                Err(CartError::Inventory(InventoryError::InsufficientStock { .. }))
            )
        })
        .count();
    assert_eq!(denied, 1);

    let state = table_state(&app, table.id).await;
    assert_eq!(state.available, 0);
    assert_eq!(state.booked, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_adds_respect_menu_stock() {
    let app = setup().await;
    let item = seed_menu_item(&app, "Limited", "100", 5).await;

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let ledger = app.state.ledger.clone();
            let email = format!("guest{i}@example.com");
            tokio::spawn(async move { ledger.add_item(add(&email, item.id, ItemType::Menu, 1)).await })
        })
        .collect();

    let results = futures::future::join_all(handles).await;
    let ok = results
        .into_iter()
        .filter(|r| matches!(r, Ok(Ok(_))))
        .count();
    assert_eq!(ok, 5);
    assert_eq!(menu_stock(&app, item.id).await, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_same_cart_concurrent_changes_are_serialized() {
    let app = setup().await;
    let item = seed_menu_item(&app, "Popular", "10", 100).await;

    let handles: Vec<_> = (0..20)
        .map(|_| {
            let ledger = app.state.ledger.clone();
            tokio::spawn(async move { ledger.add_item(add(EMAIL, item.id, ItemType::Menu, 1)).await })
        })
        .collect();
    for result in futures::future::join_all(handles).await {
        result.unwrap().unwrap();
    }

    let cart = app.state.ledger.get(EMAIL).await.unwrap();
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.items[0].quantity, 20);
    assert_eq!(cart.total_cost, 200.0);
    assert_eq!(menu_stock(&app, item.id).await, 80);
}

#[tokio::test]
async fn test_oversized_price_hint_is_rejected_without_reserving() {
    let app = setup().await;
    let table = seed_table(&app, "Terrace", 20, 400.0).await;

    let err = app
        .state
        .ledger
        .add_item(add_with_price(
            EMAIL,
            table.id,
            ItemType::Table,
            10,
            "10000000000000000000000000000",
        ))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CartError::Pricing(PricingError::InvalidPrice {
            source: PriceError::TooLarge,
            ..
        })
    ));

    let state = table_state(&app, table.id).await;
    assert_eq!(state.available, 20);
    assert_eq!(state.booked, 0);
    assert!(app.state.ledger.get(EMAIL).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_line_write_failure_releases_reservation() {
    let app = setup().await;
    let item = seed_menu_item(&app, "Sel Roti", "60", 5).await;

    sqlx::query(
        "CREATE TRIGGER fail_cart_line BEFORE INSERT ON cart_item \
         BEGIN SELECT RAISE(ABORT, 'cart line write failed'); END",
    )
    .execute(&app.db.pool)
    .await
    .unwrap();

    let err = app
        .state
        .ledger
        .add_item(add(EMAIL, item.id, ItemType::Menu, 3))
        .await
        .unwrap_err();
    assert!(matches!(err, CartError::Repo(_)));

    // The reservation made before the failed write was rolled back with it
    assert_eq!(menu_stock(&app, item.id).await, 5);
    assert!(app.state.ledger.get(EMAIL).await.unwrap().is_empty());
}
