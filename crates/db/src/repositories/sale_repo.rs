//! Repository for the `sales` and `sale_items` tables.
//!
//! [`SaleRepo::register`] is the only write path. It turns a list of item ids
//! into a sale inside a single transaction, so a concurrent reader sees
//! either the whole sale with all its items or nothing.

use bazaar_core::error::CoreError;
use bazaar_core::roles::Role;
use bazaar_core::sale::validate_sale_items;
use bazaar_core::types::{DbId, MoneyInCents, Timestamp};
use sqlx::{SqliteConnection, SqlitePool};

use crate::error::StoreResult;
use crate::models::item::Item;
use crate::models::sale::{Sale, SaleSummary, SalesOverview, SaleWithItems};
use crate::repositories::{ItemRepo, UserRepo};

/// Column list for the `sales` table.
const COLUMNS: &str = "id, cashier_id, transaction_time";

/// Summary projection. Totals use the items' current prices.
const SUMMARY_SELECT: &str = "SELECT s.id AS sale_id, s.cashier_id, s.transaction_time,
            COUNT(i.id) AS item_count,
            COALESCE(SUM(i.price_in_cents), 0) AS total_price_in_cents
     FROM sales s
     LEFT JOIN sale_items si ON si.sale_id = s.id
     LEFT JOIN items i ON i.id = si.item_id";

/// Sale Transaction Engine and sale read models.
pub struct SaleRepo;

impl SaleRepo {
    /// Register a sale of `item_ids` by `cashier_id`, returning the new sale id.
    ///
    /// Checks, in order:
    /// 1. the list is non-empty (`SaleMissingItems`) and has no repeats
    ///    (`DuplicateItemInSale`, first repeat);
    /// 2. the cashier exists (`NoSuchUser`) and is a cashier (`SaleRequiresCashier`);
    /// 3. every item exists (`NoSuchItem`, first missing id in request order).
    ///
    /// Checks 2 and 3 run in the same write transaction as the inserts. Any
    /// failure drops the transaction, which rolls back every row written so far.
    pub async fn register(
        pool: &SqlitePool,
        cashier_id: DbId,
        item_ids: &[DbId],
        transaction_time: Timestamp,
    ) -> StoreResult<DbId> {
        validate_sale_items(item_ids)?;

        let mut tx = crate::begin_write(pool).await?;

        match UserRepo::find_role(&mut tx, cashier_id).await? {
            None => return Err(CoreError::NoSuchUser(cashier_id).into()),
            Some(Role::Cashier) => {}
            Some(role) => {
                tracing::error!(cashier_id, %role, "Sale registration reached the store without a cashier");
                return Err(CoreError::SaleRequiresCashier(cashier_id).into());
            }
        }

        for &item_id in item_ids {
            if !ItemRepo::exists(&mut tx, item_id).await? {
                return Err(CoreError::NoSuchItem(item_id).into());
            }
        }

        let sale_id: DbId = sqlx::query_scalar(
            "INSERT INTO sales (cashier_id, transaction_time) VALUES (?1, ?2) RETURNING id",
        )
        .bind(cashier_id)
        .bind(transaction_time)
        .fetch_one(&mut *tx)
        .await?;

        for &item_id in item_ids {
            sqlx::query("INSERT INTO sale_items (sale_id, item_id) VALUES (?1, ?2)")
                .bind(sale_id)
                .bind(item_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        tracing::info!(sale_id, cashier_id, item_count = item_ids.len(), "Sale registered");
        Ok(sale_id)
    }

    /// Items of a sale on the caller's connection, ordered by item id.
    async fn items_of(conn: &mut SqliteConnection, sale_id: DbId) -> Result<Vec<Item>, sqlx::Error> {
        sqlx::query_as::<_, Item>(
            "SELECT i.id, i.added_at, i.description, i.price_in_cents, i.category_id,
                    i.seller_id, i.donation, i.charity, i.frozen, i.hidden
             FROM sale_items si
             JOIN items i ON i.id = si.item_id
             WHERE si.sale_id = ?1
             ORDER BY i.id",
        )
        .bind(sale_id)
        .fetch_all(&mut *conn)
        .await
    }

    /// A sale together with its items, read in one transaction.
    pub async fn get_with_items(pool: &SqlitePool, sale_id: DbId) -> StoreResult<SaleWithItems> {
        let mut tx = pool.begin().await?;

        let query = format!("SELECT {COLUMNS} FROM sales WHERE id = ?1");
        let sale = sqlx::query_as::<_, Sale>(&query)
            .bind(sale_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(CoreError::NoSuchSale(sale_id))?;
        let items = Self::items_of(&mut tx, sale_id).await?;

        tx.commit().await?;
        Ok(SaleWithItems { sale, items })
    }

    /// Ids of every sale that includes `item_id`, ascending.
    ///
    /// Empty when the item exists but was never sold; `NoSuchItem` when the
    /// item does not exist.
    pub async fn sales_with_item(pool: &SqlitePool, item_id: DbId) -> StoreResult<Vec<DbId>> {
        let mut tx = pool.begin().await?;

        if !ItemRepo::exists(&mut tx, item_id).await? {
            return Err(CoreError::NoSuchItem(item_id).into());
        }
        let ids: Vec<DbId> =
            sqlx::query_scalar("SELECT sale_id FROM sale_items WHERE item_id = ?1 ORDER BY sale_id")
                .bind(item_id)
                .fetch_all(&mut *tx)
                .await?;

        tx.commit().await?;
        Ok(ids)
    }

    /// Sale summaries ascending by id, starting at `start_id` when given.
    ///
    /// Cursor-style: a page boundary stays put while new sales are appended.
    async fn summaries(
        conn: &mut SqliteConnection,
        start_id: Option<DbId>,
    ) -> Result<Vec<SaleSummary>, sqlx::Error> {
        let query = format!(
            "{SUMMARY_SELECT}
             WHERE ?1 IS NULL OR s.id >= ?1
             GROUP BY s.id
             ORDER BY s.id"
        );
        sqlx::query_as::<_, SaleSummary>(&query)
            .bind(start_id)
            .fetch_all(&mut *conn)
            .await
    }

    /// Summaries from `start_id` plus the sale count and total value over all sales.
    ///
    /// All three reads share one transaction so the totals agree with the page.
    pub async fn overview(pool: &SqlitePool, start_id: Option<DbId>) -> StoreResult<SalesOverview> {
        let mut tx = pool.begin().await?;

        let sales = Self::summaries(&mut tx, start_id).await?;
        let sale_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&mut *tx)
            .await?;
        let total_sale_value: MoneyInCents = sqlx::query_scalar(
            "SELECT COALESCE(SUM(i.price_in_cents), 0)
             FROM sale_items si
             JOIN items i ON i.id = si.item_id",
        )
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(SalesOverview {
            sales,
            sale_count,
            total_sale_value,
        })
    }

    /// Summaries of every sale registered by `cashier_id`, ascending by id.
    ///
    /// Fails with `NoSuchUser` / `InvalidRole` unless `cashier_id` is a cashier.
    pub async fn summaries_for_cashier(
        pool: &SqlitePool,
        cashier_id: DbId,
    ) -> StoreResult<Vec<SaleSummary>> {
        let mut tx = pool.begin().await?;
        UserRepo::require_role(&mut tx, cashier_id, Role::Cashier).await?;

        let query = format!(
            "{SUMMARY_SELECT}
             WHERE s.cashier_id = ?1
             GROUP BY s.id
             ORDER BY s.id"
        );
        let sales = sqlx::query_as::<_, SaleSummary>(&query)
            .bind(cashier_id)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(sales)
    }
}
