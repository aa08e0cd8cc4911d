//! Category reference rows.

use bazaar_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the seeded `categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CategoryRow {
    pub id: DbId,
    pub name: String,
}
