//! The fixed set of item categories.
//!
//! These must match the seed rows in `0001_create_schema.sql`.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::CoreError;
use crate::types::DbId;

/// One classification bucket for items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: DbId,
    pub name: &'static str,
}

pub const CATEGORY_COUNT: usize = 12;

pub const CATEGORIES: [Category; CATEGORY_COUNT] = [
    Category { id: 1, name: "Clothing (0-3 years)" },
    Category { id: 2, name: "Clothing (3-6 years)" },
    Category { id: 3, name: "Clothing (6-12 years)" },
    Category { id: 4, name: "Clothing (12+ years)" },
    Category { id: 5, name: "Shoes" },
    Category { id: 6, name: "Toys" },
    Category { id: 7, name: "Baby & Child Equipment" },
    Category { id: 8, name: "Books" },
    Category { id: 9, name: "Games" },
    Category { id: 10, name: "Sports" },
    Category { id: 11, name: "Bicycles" },
    Category { id: 12, name: "Other" },
];

pub const SHOES: DbId = 5;

/// Look up a category by id.
pub fn find(id: DbId) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.id == id)
}

pub fn validate_category_id(id: DbId) -> Result<(), CoreError> {
    find(id).map(|_| ()).ok_or(CoreError::NoSuchCategory(id))
}

/// Expand sparse per-category counts so every fixed category is present.
///
/// Rows for unknown ids are dropped; missing categories get `0`.
pub fn complete_counts(
    rows: impl IntoIterator<Item = (DbId, i64)>,
) -> BTreeMap<DbId, i64> {
    let mut counts: BTreeMap<DbId, i64> = CATEGORIES.iter().map(|c| (c.id, 0)).collect();
    for (id, count) in rows {
        if let Some(slot) = counts.get_mut(&id) {
            *slot = count;
        }
    }
    counts
}
