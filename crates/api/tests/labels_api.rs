//! Label generation: render first, freeze after.

mod common;

use std::sync::Arc;

use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use bazaar_api::labels::{LabelError, LabelRenderer};
use bazaar_core::item::ItemPatch;
use bazaar_core::roles::Role;
use bazaar_core::types::DbId;
use bazaar_db::models::item::Item;
use bazaar_db::repositories::ItemRepo;
use bazaar_db::DbPool;
use common::{add_item, assert_error, body_text, login_as, post_json_auth, test_pool};
use serde_json::json;

/// Renderer that always fails, standing in for a broken document backend.
struct BrokenRenderer;

impl LabelRenderer for BrokenRenderer {
    fn content_type(&self) -> &'static str {
        "application/pdf"
    }

    fn render(&self, _seller_id: DbId, _items: &[Item]) -> Result<Vec<u8>, LabelError> {
        Err(LabelError::Render("font missing".into()))
    }
}

/// Renderer that edits the first item's price while the sheet is being
/// rendered, as a concurrent request from another tab would.
struct EditingRenderer {
    pool: DbPool,
    runtime: tokio::runtime::Handle,
}

impl LabelRenderer for EditingRenderer {
    fn content_type(&self) -> &'static str {
        "text/plain; charset=utf-8"
    }

    fn render(&self, _seller_id: DbId, items: &[Item]) -> Result<Vec<u8>, LabelError> {
        let patch = ItemPatch {
            price_in_cents: Some(items[0].price_in_cents + 100),
            ..Default::default()
        };
        tokio::task::block_in_place(|| {
            self.runtime
                .block_on(ItemRepo::update(&self.pool, items[0].id, &patch))
        })
        .unwrap();
        Ok(b"labels".to_vec())
    }
}

async fn frozen(pool: &DbPool, id: DbId) -> bool {
    ItemRepo::get(pool, id).await.unwrap().frozen
}

#[tokio::test]
async fn labels_render_then_freeze() {
    let pool = test_pool().await;
    let (seller, token) = login_as(&pool, Role::Seller).await;
    let first = add_item(&pool, seller, 150).await;
    let second = add_item(&pool, seller, 275).await;
    let untouched = add_item(&pool, seller, 50).await;
    let app = common::build_test_app(pool.clone());

    let response = post_json_auth(
        app,
        &format!("/api/v1/sellers/{seller}/labels"),
        &token,
        json!({ "itemIds": [first, second] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/plain"));
    let text = body_text(response).await;
    assert!(text.contains(&format!("Item {first}")));
    assert!(text.contains("2.75 EUR"));

    assert!(frozen(&pool, first).await);
    assert!(frozen(&pool, second).await);
    assert!(!frozen(&pool, untouched).await);
}

#[tokio::test]
async fn failed_render_freezes_nothing() {
    let pool = test_pool().await;
    let (seller, token) = login_as(&pool, Role::Seller).await;
    let item = add_item(&pool, seller, 150).await;
    let app = common::build_test_app_with_renderer(pool.clone(), Arc::new(BrokenRenderer));

    let response = post_json_auth(
        app,
        &format!("/api/v1/sellers/{seller}/labels"),
        &token,
        json!({ "itemIds": [item] }),
    )
    .await;
    assert_error(response, StatusCode::INTERNAL_SERVER_ERROR, "internal").await;
    assert!(!frozen(&pool, item).await);
}

#[tokio::test]
async fn labels_are_for_own_items_only() {
    let pool = test_pool().await;
    let (seller, token) = login_as(&pool, Role::Seller).await;
    let other = common::create_user(&pool, Role::Seller).await;
    let mine = add_item(&pool, seller, 150).await;
    let theirs = add_item(&pool, other, 150).await;
    let app = common::build_test_app(pool.clone());

    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/sellers/{seller}/labels"),
        &token,
        json!({ "itemIds": [mine, theirs] }),
    )
    .await;
    assert_error(response, StatusCode::FORBIDDEN, "wrong_seller").await;

    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/sellers/{other}/labels"),
        &token,
        json!({ "itemIds": [theirs] }),
    )
    .await;
    assert_error(response, StatusCode::FORBIDDEN, "wrong_seller").await;

    let response = post_json_auth(
        app,
        &format!("/api/v1/sellers/{seller}/labels"),
        &token,
        json!({ "itemIds": [] }),
    )
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "invalid_request").await;

    assert!(!frozen(&pool, mine).await);
    assert!(!frozen(&pool, theirs).await);
}

#[tokio::test]
async fn admins_cannot_print_labels() {
    let pool = test_pool().await;
    let seller = common::create_user(&pool, Role::Seller).await;
    let (_admin, token) = login_as(&pool, Role::Admin).await;
    let item = add_item(&pool, seller, 150).await;
    let app = common::build_test_app(pool.clone());

    let response = post_json_auth(
        app,
        &format!("/api/v1/sellers/{seller}/labels"),
        &token,
        json!({ "itemIds": [item] }),
    )
    .await;
    assert_error(response, StatusCode::FORBIDDEN, "wrong_role").await;
    assert!(!frozen(&pool, item).await);
}

#[tokio::test]
async fn repeated_item_is_rejected() {
    let pool = test_pool().await;
    let (seller, token) = login_as(&pool, Role::Seller).await;
    let first = add_item(&pool, seller, 150).await;
    let second = add_item(&pool, seller, 200).await;
    let app = common::build_test_app(pool.clone());

    let response = post_json_auth(
        app,
        &format!("/api/v1/sellers/{seller}/labels"),
        &token,
        json!({ "itemIds": [first, second, first] }),
    )
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "invalid_request").await;

    assert!(!frozen(&pool, first).await);
    assert!(!frozen(&pool, second).await);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn item_edited_during_render_is_not_frozen() {
    let pool = test_pool().await;
    let (seller, token) = login_as(&pool, Role::Seller).await;
    let edited = add_item(&pool, seller, 150).await;
    let other = add_item(&pool, seller, 200).await;
    let renderer = EditingRenderer {
        pool: pool.clone(),
        runtime: tokio::runtime::Handle::current(),
    };
    let app = common::build_test_app_with_renderer(pool.clone(), Arc::new(renderer));

    let response = post_json_auth(
        app,
        &format!("/api/v1/sellers/{seller}/labels"),
        &token,
        json!({ "itemIds": [edited, other] }),
    )
    .await;
    assert_error(response, StatusCode::FORBIDDEN, "item_changed").await;

    let item = ItemRepo::get(&pool, edited).await.unwrap();
    assert_eq!(item.price_in_cents, 250);
    assert!(!item.frozen);
    assert!(!frozen(&pool, other).await);
}
