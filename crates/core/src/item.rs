//! Item validation, the partial-update rules, and the visibility selection.
//!
//! Item lifecycle:
//!
//! ```text
//! added ──(labels generated)──> frozen ──(register sale)──> sold in 1..n sales
//! ```
//!
//! While an item is frozen its description, price, category, donation and
//! charity flags are locked. The `hidden` flag stays editable.

use std::collections::HashSet;
use std::str::FromStr;

use serde::Deserialize;

use crate::category::validate_category_id;
use crate::error::CoreError;
use crate::types::{DbId, MoneyInCents};

// ---------------------------------------------------------------------------
// Field validation
// ---------------------------------------------------------------------------

pub fn validate_price(price_in_cents: MoneyInCents) -> Result<(), CoreError> {
    if price_in_cents <= 0 {
        return Err(CoreError::InvalidPrice(price_in_cents));
    }
    Ok(())
}

/// Returns the trimmed description, rejecting blank input.
pub fn validate_description(description: &str) -> Result<String, CoreError> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Err(CoreError::InvalidItemDescription);
    }
    Ok(trimmed.to_string())
}

// ---------------------------------------------------------------------------
// New items
// ---------------------------------------------------------------------------

/// Fields a seller supplies when adding an item.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    pub description: String,
    pub price_in_cents: MoneyInCents,
    pub category_id: DbId,
    #[serde(default)]
    pub donation: bool,
    #[serde(default)]
    pub charity: bool,
}

impl NewItem {
    /// Check every field that can be checked without the store.
    ///
    /// Returns a copy with the description trimmed.
    pub fn validated(&self) -> Result<NewItem, CoreError> {
        validate_price(self.price_in_cents)?;
        let description = validate_description(&self.description)?;
        validate_category_id(self.category_id)?;
        Ok(NewItem {
            description,
            ..self.clone()
        })
    }
}

// ---------------------------------------------------------------------------
// Partial updates
// ---------------------------------------------------------------------------

/// Partial item update. `None` fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPatch {
    pub description: Option<String>,
    pub price_in_cents: Option<MoneyInCents>,
    pub category_id: Option<DbId>,
    pub donation: Option<bool>,
    pub charity: Option<bool>,
    pub hidden: Option<bool>,
}

impl ItemPatch {
    /// Whether the patch supplies any field that freezing locks.
    pub fn touches_locked_fields(&self) -> bool {
        self.description.is_some()
            || self.price_in_cents.is_some()
            || self.category_id.is_some()
            || self.donation.is_some()
            || self.charity.is_some()
    }

    /// Validate the patch against the current frozen state of `item_id`.
    ///
    /// Returns a copy with the description trimmed.
    pub fn validated(&self, item_id: DbId, frozen: bool) -> Result<ItemPatch, CoreError> {
        if frozen && self.touches_locked_fields() {
            return Err(CoreError::ItemFrozen(item_id));
        }
        if let Some(price) = self.price_in_cents {
            validate_price(price)?;
        }
        let description = match &self.description {
            Some(d) => Some(validate_description(d)?),
            None => None,
        };
        if let Some(category_id) = self.category_id {
            validate_category_id(category_id)?;
        }
        Ok(ItemPatch {
            description,
            ..self.clone()
        })
    }
}

// ---------------------------------------------------------------------------
// Label selection
// ---------------------------------------------------------------------------

/// A label request names at least one item and each item once.
pub fn validate_label_items(item_ids: &[DbId]) -> Result<(), CoreError> {
    if item_ids.is_empty() {
        return Err(CoreError::InvalidRequest("No items selected for labels".into()));
    }

    let mut seen = HashSet::with_capacity(item_ids.len());
    if let Some(repeated) = item_ids.iter().find(|id| !seen.insert(**id)) {
        return Err(CoreError::InvalidRequest(format!(
            "Item {repeated} is listed more than once"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Visibility filter for item listings and category aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemSelection {
    All,
    OnlyHidden,
    #[default]
    OnlyVisible,
}

impl ItemSelection {
    /// SQL predicate over an item table aliased as `alias`.
    pub fn sql_predicate(self, alias: &str) -> String {
        match self {
            ItemSelection::All => "1 = 1".to_string(),
            ItemSelection::OnlyHidden => format!("{alias}.hidden = 1"),
            ItemSelection::OnlyVisible => format!("{alias}.hidden = 0"),
        }
    }

    /// Parse an optional query-string value; absent means visible only.
    pub fn from_query(value: Option<&str>) -> Result<Self, CoreError> {
        value.map_or(Ok(Self::default()), str::parse)
    }
}

impl FromStr for ItemSelection {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(ItemSelection::All),
            "hidden" => Ok(ItemSelection::OnlyHidden),
            "visible" => Ok(ItemSelection::OnlyVisible),
            other => Err(CoreError::InvalidRequest(format!(
                "Invalid item selection '{other}'. Expected 'all', 'hidden' or 'visible'"
            ))),
        }
    }
}
