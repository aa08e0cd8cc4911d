//! Item entity model and read shapes.

use bazaar_core::types::{DbId, MoneyInCents, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full item row from the `items` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: DbId,
    pub added_at: Timestamp,
    pub description: String,
    pub price_in_cents: MoneyInCents,
    pub category_id: DbId,
    pub seller_id: DbId,
    pub donation: bool,
    pub charity: bool,
    pub frozen: bool,
    pub hidden: bool,
}

/// An item together with the number of sales it appears in.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemWithSaleCount {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub item: Item,
    pub sale_count: i64,
}
