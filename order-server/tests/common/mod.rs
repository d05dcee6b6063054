//! Shared fixtures for order-server integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use dine_store::DbService;
use dine_store::repository::{dining_table, event_hall, menu_item, offer};
use order_server::auth::{CodeMailer, MailError};
use order_server::{AppState, Config};
use shared::PriceValue;
use shared::models::{
    AddCartItem, DiningTable, DiningTableCreate, EventHall, EventHallCreate, ItemType, MenuItem,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

pub const EMAIL: &str = "guest@example.com";

pub struct TestApp {
    /// Keeps the database file alive
    pub _dir: TempDir,
    pub db: DbService,
    pub state: AppState,
    pub mailer: Arc<RecordingMailer>,
}

pub async fn setup() -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dine.db");
    let path = path.to_str().unwrap().to_string();
    let db = DbService::new(&path).await.unwrap();
    let mailer = Arc::new(RecordingMailer::default());
    let state = AppState::with_mailer(
        db.pool.clone(),
        Config::for_database(path),
        mailer.clone(),
    );
    TestApp {
        _dir: dir,
        db,
        state,
        mailer,
    }
}

/// Captures issued codes instead of delivering them
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<HashMap<String, String>>,
}

impl RecordingMailer {
    pub fn last_code(&self, email: &str) -> Option<String> {
        self.sent.lock().unwrap().get(email).cloned()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl CodeMailer for RecordingMailer {
    async fn send_code(&self, to: &str, code: &str) -> Result<(), MailError> {
        self.sent
            .lock()
            .unwrap()
            .insert(to.to_string(), code.to_string());
        Ok(())
    }
}

pub async fn seed_menu_item(app: &TestApp, name: &str, price: &str, stock: i64) -> MenuItem {
    menu_item::create(
        &app.db.pool,
        menu_item::NewMenuItem {
            name: name.into(),
            category: "Mains".into(),
            price: price.into(),
            stock_quantity: stock,
            image: None,
        },
    )
    .await
    .unwrap()
}

pub async fn seed_offer(app: &TestApp, item: &MenuItem, discounted: &str) {
    let original = item.unit_price().unwrap();
    offer::create(&app.db.pool, item.id, &item.name, original, discounted)
        .await
        .unwrap();
}

pub async fn seed_table(app: &TestApp, name: &str, available: i64, price_per_hour: f64) -> DiningTable {
    dining_table::create(
        &app.db.pool,
        DiningTableCreate {
            name: name.into(),
            capacity: 4,
            air_conditioned: true,
            price_per_hour,
            available,
        },
    )
    .await
    .unwrap()
}

pub async fn seed_hall(app: &TestApp, name: &str, price_per_hour: f64) -> EventHall {
    event_hall::create(
        &app.db.pool,
        EventHallCreate {
            name: name.into(),
            capacity: 120,
            price_per_hour,
            available: None,
        },
    )
    .await
    .unwrap()
}

pub fn add(email: &str, item_id: i64, item_type: ItemType, quantity: i64) -> AddCartItem {
    AddCartItem {
        email: email.into(),
        item_id,
        item_type,
        name: None,
        price: None,
        quantity,
    }
}

pub fn add_with_price(
    email: &str,
    item_id: i64,
    item_type: ItemType,
    quantity: i64,
    price: impl Into<PriceValue>,
) -> AddCartItem {
    AddCartItem {
        price: Some(price.into()),
        ..add(email, item_id, item_type, quantity)
    }
}

pub async fn menu_stock(app: &TestApp, id: i64) -> i64 {
    menu_item::find_by_id(&app.db.pool, id)
        .await
        .unwrap()
        .unwrap()
        .stock_quantity
}

pub async fn table_state(app: &TestApp, id: i64) -> DiningTable {
    dining_table::find_by_id(&app.db.pool, id)
        .await
        .unwrap()
        .unwrap()
}

pub async fn hall_available(app: &TestApp, id: i64) -> bool {
    event_hall::find_by_id(&app.db.pool, id)
        .await
        .unwrap()
        .unwrap()
        .available
}
