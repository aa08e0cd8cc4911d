//! Sale entity model and aggregate read shapes.

use bazaar_core::types::{DbId, MoneyInCents, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use super::item::Item;

/// A row from the `sales` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: DbId,
    pub cashier_id: DbId,
    pub transaction_time: Timestamp,
}

/// One sale with its item count and current total value.
///
/// `total_price_in_cents` sums the prices the items have now, not at sale time.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleSummary {
    pub sale_id: DbId,
    pub cashier_id: DbId,
    pub transaction_time: Timestamp,
    pub item_count: i64,
    pub total_price_in_cents: MoneyInCents,
}

/// Sale listing page plus totals over every sale in the store.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesOverview {
    pub sales: Vec<SaleSummary>,
    pub sale_count: i64,
    pub total_sale_value: MoneyInCents,
}

/// A sale with the items it associates.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleWithItems {
    #[serde(flatten)]
    pub sale: Sale,
    pub items: Vec<Item>,
}
