//! Authorization decision table.
//!
//! Role-only rules are declared as role sets, which the HTTP layer enforces
//! with typed extractors before a handler runs. Rules that depend on the
//! target (ownership, self) get one predicate each and are checked inside
//! the handler.
//!
//! | Operation                 | Allowed                                |
//! |---------------------------|----------------------------------------|
//! | register sale             | cashier                                |
//! | list sales                | admin                                  |
//! | view sale                 | admin, registering cashier             |
//! | add item for seller S     | seller S, admin                        |
//! | update item               | owning seller, admin                   |
//! | view item                 | owning seller, any cashier, admin      |
//! | list / export items       | admin                                  |
//! | category counts           | admin                                  |
//! | category names            | admin, seller                          |
//! | generate labels for S     | seller S                               |
//! | list / create users       | admin                                  |
//! | view user U               | admin, U                               |
//! | seller item rollup for S  | seller S, admin                        |
//! | cashier sales for C       | cashier C, admin                       |

use crate::error::CoreError;
use crate::roles::Role;
use crate::types::DbId;

pub const ADMIN_ONLY: &[Role] = &[Role::Admin];
pub const CASHIER_ONLY: &[Role] = &[Role::Cashier];
pub const SELLER_ONLY: &[Role] = &[Role::Seller];
pub const ADMIN_OR_SELLER: &[Role] = &[Role::Admin, Role::Seller];
pub const ADMIN_OR_CASHIER: &[Role] = &[Role::Admin, Role::Cashier];

/// The authenticated party behind a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: DbId,
    pub role: Role,
}

impl Actor {
    pub fn new(user_id: DbId, role: Role) -> Self {
        Self { user_id, role }
    }
}

/// Fail with [`CoreError::WrongRole`] unless the actor holds one of `accepted`.
pub fn require_role(actor: &Actor, accepted: &[Role]) -> Result<(), CoreError> {
    if accepted.contains(&actor.role) {
        Ok(())
    } else {
        Err(CoreError::wrong_role(accepted))
    }
}

// ---------------------------------------------------------------------------
// Sales
// ---------------------------------------------------------------------------

pub fn authorize_view_sale(actor: &Actor, sale_cashier_id: DbId) -> Result<(), CoreError> {
    match actor.role {
        Role::Admin => Ok(()),
        Role::Cashier if actor.user_id == sale_cashier_id => Ok(()),
        Role::Cashier => Err(CoreError::WrongCashier),
        Role::Seller => Err(CoreError::wrong_role(ADMIN_OR_CASHIER)),
    }
}

pub fn authorize_view_cashier_sales(actor: &Actor, cashier_id: DbId) -> Result<(), CoreError> {
    match actor.role {
        Role::Admin => Ok(()),
        Role::Cashier if actor.user_id == cashier_id => Ok(()),
        Role::Cashier => Err(CoreError::WrongCashier),
        Role::Seller => Err(CoreError::wrong_role(ADMIN_OR_CASHIER)),
    }
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// Shared rule for "this seller's own data, or an admin".
fn seller_self_or_admin(actor: &Actor, seller_id: DbId) -> Result<(), CoreError> {
    match actor.role {
        Role::Admin => Ok(()),
        Role::Seller if actor.user_id == seller_id => Ok(()),
        Role::Seller => Err(CoreError::WrongSeller),
        Role::Cashier => Err(CoreError::wrong_role(ADMIN_OR_SELLER)),
    }
}

pub fn authorize_add_item(actor: &Actor, seller_id: DbId) -> Result<(), CoreError> {
    seller_self_or_admin(actor, seller_id)
}

pub fn authorize_update_item(actor: &Actor, item_seller_id: DbId) -> Result<(), CoreError> {
    seller_self_or_admin(actor, item_seller_id)
}

pub fn authorize_view_seller_items(actor: &Actor, seller_id: DbId) -> Result<(), CoreError> {
    seller_self_or_admin(actor, seller_id)
}

pub fn authorize_view_item(actor: &Actor, item_seller_id: DbId) -> Result<(), CoreError> {
    match actor.role {
        Role::Admin | Role::Cashier => Ok(()),
        Role::Seller if actor.user_id == item_seller_id => Ok(()),
        Role::Seller => Err(CoreError::WrongSeller),
    }
}

/// Labels freeze items, so only the owning seller may print them.
pub fn authorize_generate_labels(actor: &Actor, seller_id: DbId) -> Result<(), CoreError> {
    require_role(actor, SELLER_ONLY)?;
    if actor.user_id != seller_id {
        return Err(CoreError::WrongSeller);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

pub fn authorize_category_counts(actor: &Actor) -> Result<(), CoreError> {
    require_role(actor, ADMIN_ONLY)
}

pub fn authorize_list_categories(actor: &Actor) -> Result<(), CoreError> {
    require_role(actor, ADMIN_OR_SELLER)
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

pub fn authorize_view_user(actor: &Actor, user_id: DbId) -> Result<(), CoreError> {
    if actor.role.is_admin() || actor.user_id == user_id {
        Ok(())
    } else {
        Err(CoreError::WrongUser)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    const ADMIN: Actor = Actor { user_id: 1, role: Role::Admin };
    const SELLER: Actor = Actor { user_id: 2, role: Role::Seller };
    const OTHER_SELLER: Actor = Actor { user_id: 3, role: Role::Seller };
    const CASHIER: Actor = Actor { user_id: 4, role: Role::Cashier };
    const OTHER_CASHIER: Actor = Actor { user_id: 5, role: Role::Cashier };

    #[test]
    fn role_sets_gate_role_only_operations() {
        assert!(require_role(&CASHIER, CASHIER_ONLY).is_ok());
        assert_matches!(require_role(&SELLER, CASHIER_ONLY), Err(CoreError::WrongRole(_)));
        assert_matches!(require_role(&CASHIER, ADMIN_ONLY), Err(CoreError::WrongRole(_)));
        assert!(require_role(&SELLER, ADMIN_OR_SELLER).is_ok());
    }

    #[test]
    fn sale_detail_visible_to_admin_and_registering_cashier() {
        assert!(authorize_view_sale(&ADMIN, CASHIER.user_id).is_ok());
        assert!(authorize_view_sale(&CASHIER, CASHIER.user_id).is_ok());
        assert_matches!(
            authorize_view_sale(&OTHER_CASHIER, CASHIER.user_id),
            Err(CoreError::WrongCashier)
        );
        assert_matches!(
            authorize_view_sale(&SELLER, CASHIER.user_id),
            Err(CoreError::WrongRole(_))
        );
    }

    #[test]
    fn item_detail_hidden_from_other_sellers() {
        assert!(authorize_view_item(&SELLER, SELLER.user_id).is_ok());
        assert!(authorize_view_item(&CASHIER, SELLER.user_id).is_ok());
        assert!(authorize_view_item(&ADMIN, SELLER.user_id).is_ok());
        assert_matches!(
            authorize_view_item(&OTHER_SELLER, SELLER.user_id),
            Err(CoreError::WrongSeller)
        );
    }

    #[test]
    fn items_are_added_by_their_seller_or_an_admin() {
        assert!(authorize_add_item(&SELLER, SELLER.user_id).is_ok());
        assert!(authorize_add_item(&ADMIN, SELLER.user_id).is_ok());
        assert_matches!(
            authorize_add_item(&OTHER_SELLER, SELLER.user_id),
            Err(CoreError::WrongSeller)
        );
        assert_matches!(
            authorize_add_item(&CASHIER, SELLER.user_id),
            Err(CoreError::WrongRole(_))
        );
    }

    #[test]
    fn labels_are_seller_self_only() {
        assert!(authorize_generate_labels(&SELLER, SELLER.user_id).is_ok());
        assert_matches!(
            authorize_generate_labels(&ADMIN, SELLER.user_id),
            Err(CoreError::WrongRole(_))
        );
        assert_matches!(
            authorize_generate_labels(&OTHER_SELLER, SELLER.user_id),
            Err(CoreError::WrongSeller)
        );
    }

    #[test]
    fn categories() {
        assert!(authorize_list_categories(&SELLER).is_ok());
        assert!(authorize_list_categories(&ADMIN).is_ok());
        assert!(authorize_list_categories(&CASHIER).is_err());
        assert!(authorize_category_counts(&ADMIN).is_ok());
        assert!(authorize_category_counts(&SELLER).is_err());
    }

    #[test]
    fn users_see_themselves() {
        assert!(authorize_view_user(&CASHIER, CASHIER.user_id).is_ok());
        assert!(authorize_view_user(&ADMIN, CASHIER.user_id).is_ok());
        assert_matches!(
            authorize_view_user(&SELLER, CASHIER.user_id),
            Err(CoreError::WrongUser)
        );
    }

    #[test]
    fn cashier_rollup() {
        assert!(authorize_view_cashier_sales(&CASHIER, CASHIER.user_id).is_ok());
        assert!(authorize_view_cashier_sales(&ADMIN, CASHIER.user_id).is_ok());
        assert_matches!(
            authorize_view_cashier_sales(&OTHER_CASHIER, CASHIER.user_id),
            Err(CoreError::WrongCashier)
        );
    }
}
