//! Shared fixtures for store integration tests.

#![allow(dead_code)]

use bazaar_core::item::NewItem;
use bazaar_core::roles::Role;
use bazaar_core::types::{DbId, MoneyInCents, Timestamp};
use bazaar_db::models::user::CreateUser;
use bazaar_db::repositories::{ItemRepo, SaleRepo, UserRepo};
use bazaar_db::DbPool;
use chrono::{TimeZone, Utc};

/// Fresh in-memory database with the schema applied.
pub async fn test_pool() -> DbPool {
    let pool = bazaar_db::create_in_memory_pool()
        .await
        .expect("in-memory pool");
    bazaar_db::run_migrations(&pool).await.expect("migrations");
    pool
}

/// A fixed instant, so stored timestamps are predictable.
pub fn at(hour: u32) -> Timestamp {
    Utc.with_ymd_and_hms(2024, 3, 9, hour, 0, 0).unwrap()
}

pub async fn create_user(pool: &DbPool, role: Role) -> DbId {
    let input = CreateUser {
        role,
        password_hash: "not-a-real-hash".to_string(),
        created_at: at(8),
    };
    UserRepo::create(pool, &input).await.unwrap().id
}

pub fn new_item(description: &str, price_in_cents: MoneyInCents, category_id: DbId) -> NewItem {
    NewItem {
        description: description.to_string(),
        price_in_cents,
        category_id,
        donation: false,
        charity: false,
    }
}

pub async fn add_item(pool: &DbPool, seller_id: DbId, price_in_cents: MoneyInCents) -> DbId {
    ItemRepo::add(pool, at(9), seller_id, &new_item("Wool sweater", price_in_cents, 3))
        .await
        .unwrap()
}

/// Freeze items the way label generation does, from a fresh snapshot.
pub async fn freeze(pool: &DbPool, ids: &[DbId]) {
    let item = ItemRepo::get(pool, ids[0]).await.unwrap();
    let rendered = ItemRepo::get_many_for_seller(pool, item.seller_id, ids)
        .await
        .unwrap();
    ItemRepo::freeze_rendered(pool, &rendered).await.unwrap();
}

/// Rows in `sales` and `sale_items`.
pub async fn counts(pool: &DbPool) -> (i64, i64) {
    let sales: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
        .fetch_one(pool)
        .await
        .unwrap();
    let sale_items: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sale_items")
        .fetch_one(pool)
        .await
        .unwrap();
    (sales, sale_items)
}

/// Item ids of a sale, ascending.
pub async fn sale_item_ids(pool: &DbPool, sale_id: DbId) -> Vec<DbId> {
    SaleRepo::get_with_items(pool, sale_id)
        .await
        .unwrap()
        .items
        .into_iter()
        .map(|item| item.id)
        .collect()
}
