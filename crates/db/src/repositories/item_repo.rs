//! Repository for the `items` table.

use bazaar_core::error::CoreError;
use bazaar_core::item::{ItemPatch, ItemSelection, NewItem};
use bazaar_core::roles::Role;
use bazaar_core::types::{DbId, Timestamp};
use sqlx::{SqliteConnection, SqlitePool};

use crate::error::StoreResult;
use crate::models::item::{Item, ItemWithSaleCount};
use crate::repositories::UserRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, added_at, description, price_in_cents, category_id, seller_id, \
                        donation, charity, frozen, hidden";

/// Same columns qualified with the `i` alias, for joins.
const ALIASED_COLUMNS: &str = "i.id, i.added_at, i.description, i.price_in_cents, \
                                i.category_id, i.seller_id, i.donation, i.charity, \
                                i.frozen, i.hidden";

/// Item Store: creation, guarded updates, freezing, and listings.
pub struct ItemRepo;

impl ItemRepo {
    /// Add an item for `seller_id`, returning its new id.
    ///
    /// Field checks run first, then the seller is resolved and the row is
    /// inserted in one transaction.
    pub async fn add(
        pool: &SqlitePool,
        added_at: Timestamp,
        seller_id: DbId,
        input: &NewItem,
    ) -> StoreResult<DbId> {
        let input = input.validated()?;

        let mut tx = crate::begin_write(pool).await?;
        UserRepo::require_role(&mut tx, seller_id, Role::Seller).await?;

        let id: DbId = sqlx::query_scalar(
            "INSERT INTO items
                (added_at, description, price_in_cents, category_id, seller_id, donation, charity)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             RETURNING id",
        )
        .bind(added_at)
        .bind(&input.description)
        .bind(input.price_in_cents)
        .bind(input.category_id)
        .bind(seller_id)
        .bind(input.donation)
        .bind(input.charity)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(item_id = id, seller_id, price = input.price_in_cents, "Item added");
        Ok(id)
    }

    /// Find an item by internal ID.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Item>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM items WHERE id = ?1");
        sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Like [`find_by_id`](Self::find_by_id), failing with `NoSuchItem` when absent.
    pub async fn get(pool: &SqlitePool, id: DbId) -> StoreResult<Item> {
        Self::find_by_id(pool, id)
            .await?
            .ok_or_else(|| CoreError::NoSuchItem(id).into())
    }

    /// Whether an item exists, checked on the caller's connection.
    pub async fn exists(conn: &mut SqliteConnection, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM items WHERE id = ?1)")
            .bind(id)
            .fetch_one(&mut *conn)
            .await
    }

    /// Apply a partial update, returning the stored row afterwards.
    ///
    /// Fails with `ItemFrozen` when the item is frozen and the patch touches a
    /// locked field. Either every supplied field is written or none is.
    pub async fn update(pool: &SqlitePool, id: DbId, patch: &ItemPatch) -> StoreResult<Item> {
        let mut tx = crate::begin_write(pool).await?;

        let frozen: Option<bool> = sqlx::query_scalar("SELECT frozen FROM items WHERE id = ?1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        let frozen = frozen.ok_or(CoreError::NoSuchItem(id))?;
        let patch = patch.validated(id, frozen)?;

        let query = format!(
            "UPDATE items SET
                description = COALESCE(?2, description),
                price_in_cents = COALESCE(?3, price_in_cents),
                category_id = COALESCE(?4, category_id),
                donation = COALESCE(?5, donation),
                charity = COALESCE(?6, charity),
                hidden = COALESCE(?7, hidden)
             WHERE id = ?1
             RETURNING {COLUMNS}"
        );
        let item = sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .bind(&patch.description)
            .bind(patch.price_in_cents)
            .bind(patch.category_id)
            .bind(patch.donation)
            .bind(patch.charity)
            .bind(patch.hidden)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(item_id = id, "Item updated");
        Ok(item)
    }

    /// Freeze the items of a rendered label sheet.
    ///
    /// Each row is frozen only if its locked fields and owner still equal
    /// the `rendered` copy, so a frozen item always matches its printed
    /// label. Runs in one write transaction: a missing item aborts with
    /// `NoSuchItem`, a changed one with `ItemChanged`, and no item changes.
    /// Items that are already frozen and unchanged stay frozen.
    pub async fn freeze_rendered(pool: &SqlitePool, rendered: &[Item]) -> StoreResult<()> {
        let mut tx = crate::begin_write(pool).await?;

        for item in rendered {
            let result = sqlx::query(
                "UPDATE items SET frozen = 1
                 WHERE id = ?1
                   AND seller_id = ?2
                   AND description = ?3
                   AND price_in_cents = ?4
                   AND category_id = ?5
                   AND donation = ?6
                   AND charity = ?7",
            )
            .bind(item.id)
            .bind(item.seller_id)
            .bind(&item.description)
            .bind(item.price_in_cents)
            .bind(item.category_id)
            .bind(item.donation)
            .bind(item.charity)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                if !Self::exists(&mut tx, item.id).await? {
                    return Err(CoreError::NoSuchItem(item.id).into());
                }
                tracing::warn!(item_id = item.id, "Item changed after its label was rendered");
                return Err(CoreError::ItemChanged(item.id).into());
            }
        }

        tx.commit().await?;

        tracing::info!(count = rendered.len(), "Items frozen");
        Ok(())
    }

    /// List items under `selection`, ordered by id.
    pub async fn list(
        pool: &SqlitePool,
        selection: ItemSelection,
    ) -> Result<Vec<Item>, sqlx::Error> {
        let query = format!(
            "SELECT {ALIASED_COLUMNS} FROM items i WHERE {} ORDER BY i.id",
            selection.sql_predicate("i")
        );
        sqlx::query_as::<_, Item>(&query).fetch_all(pool).await
    }

    /// Fetch the items named in `ids` that belong to `seller_id`.
    ///
    /// Fails with `NoSuchItem` for an unknown id and `WrongSeller` for an item
    /// owned by someone else. Returned in request order.
    pub async fn get_many_for_seller(
        pool: &SqlitePool,
        seller_id: DbId,
        ids: &[DbId],
    ) -> StoreResult<Vec<Item>> {
        let mut tx = pool.begin().await?;
        let query = format!("SELECT {COLUMNS} FROM items WHERE id = ?1");

        let mut items = Vec::with_capacity(ids.len());
        for &id in ids {
            let item = sqlx::query_as::<_, Item>(&query)
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or(CoreError::NoSuchItem(id))?;
            if item.seller_id != seller_id {
                return Err(CoreError::WrongSeller.into());
            }
            items.push(item);
        }

        tx.commit().await?;
        Ok(items)
    }

    /// Seller rollup: every item of `seller_id` with the number of sales it
    /// appears in.
    ///
    /// Fails with `NoSuchUser` / `InvalidRole` unless `seller_id` is a seller.
    pub async fn list_for_seller_with_sale_counts(
        pool: &SqlitePool,
        seller_id: DbId,
    ) -> StoreResult<Vec<ItemWithSaleCount>> {
        let mut tx = pool.begin().await?;
        UserRepo::require_role(&mut tx, seller_id, Role::Seller).await?;

        let query = format!(
            "SELECT {ALIASED_COLUMNS}, COUNT(si.sale_id) AS sale_count
             FROM items i
             LEFT JOIN sale_items si ON si.item_id = i.id
             WHERE i.seller_id = ?1
             GROUP BY i.id
             ORDER BY i.id"
        );
        let rows = sqlx::query_as::<_, ItemWithSaleCount>(&query)
            .bind(seller_id)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(rows)
    }
}
