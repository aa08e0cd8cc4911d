//! Response bodies shared by several handlers.

use bazaar_core::types::DbId;
use serde::Serialize;

/// `201 Created` body after `POST /users`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedUser {
    pub user_id: DbId,
}

/// `201 Created` body after `PUT /sellers/{id}/items`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedItem {
    pub item_id: DbId,
}

/// `201 Created` body after `POST /sales`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedSale {
    pub sale_id: DbId,
}
