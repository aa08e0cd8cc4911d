//! Connect, migrate, and check the seeded reference data.

mod common;

use bazaar_core::category::CATEGORIES;
use bazaar_db::repositories::CategoryRepo;

#[tokio::test]
async fn test_full_bootstrap() {
    let pool = common::test_pool().await;
    bazaar_db::health_check(&pool).await.unwrap();

    for table in ["users", "sessions", "categories", "items", "sales", "sale_items"] {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert!(count.0 >= 0);
    }
}

#[tokio::test]
async fn seeded_categories_match_core_table() {
    let pool = common::test_pool().await;
    let rows = CategoryRepo::list(&pool).await.unwrap();

    assert_eq!(rows.len(), CATEGORIES.len());
    for (row, category) in rows.iter().zip(CATEGORIES.iter()) {
        assert_eq!(row.id, category.id);
        assert_eq!(row.name, category.name);
    }
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let pool = common::test_pool().await;
    bazaar_db::run_migrations(&pool).await.unwrap();
    assert_eq!(CategoryRepo::list(&pool).await.unwrap().len(), CATEGORIES.len());
}

#[tokio::test]
async fn foreign_keys_are_enforced() {
    let pool = common::test_pool().await;
    let result = sqlx::query("INSERT INTO sales (cashier_id, transaction_time) VALUES (999, ?1)")
        .bind(common::at(10))
        .execute(&pool)
        .await;
    assert!(result.is_err(), "sale with unknown cashier must violate the foreign key");
}
