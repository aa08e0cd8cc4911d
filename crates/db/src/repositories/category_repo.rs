//! Repository for the seeded `categories` table.

use std::collections::BTreeMap;

use bazaar_core::category::complete_counts;
use bazaar_core::item::ItemSelection;
use bazaar_core::types::DbId;
use sqlx::SqlitePool;

use crate::models::category::CategoryRow;

pub struct CategoryRepo;

impl CategoryRepo {
    /// All categories ordered by id.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<CategoryRow>, sqlx::Error> {
        sqlx::query_as::<_, CategoryRow>("SELECT id, name FROM categories ORDER BY id")
            .fetch_all(pool)
            .await
    }

    /// Number of items per category under `selection`.
    ///
    /// Every category is present in the result, with `0` when it has no items.
    pub async fn counts(
        pool: &SqlitePool,
        selection: ItemSelection,
    ) -> Result<BTreeMap<DbId, i64>, sqlx::Error> {
        let query = format!(
            "SELECT i.category_id, COUNT(*)
             FROM items i
             WHERE {}
             GROUP BY i.category_id",
            selection.sql_predicate("i")
        );
        let rows: Vec<(DbId, i64)> = sqlx::query_as(&query).fetch_all(pool).await?;
        Ok(complete_counts(rows))
    }
}
