//! Sale request validation.
//!
//! These checks need no store access and run before the transaction opens.
//! The store re-checks cashier role and item existence inside the
//! transaction.

use std::collections::HashSet;

use crate::error::CoreError;
use crate::types::DbId;

/// Reject an empty item list, or one that names the same item twice.
///
/// Reports the first id (in request order) that repeats an earlier one.
pub fn validate_sale_items(item_ids: &[DbId]) -> Result<(), CoreError> {
    if item_ids.is_empty() {
        return Err(CoreError::SaleMissingItems);
    }

    let mut seen = HashSet::with_capacity(item_ids.len());
    for &id in item_ids {
        if !seen.insert(id) {
            return Err(CoreError::DuplicateItemInSale(id));
        }
    }
    Ok(())
}
