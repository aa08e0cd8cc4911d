use crate::roles::Role;
use crate::types::{DbId, MoneyInCents};

/// Coarse error class. The HTTP layer maps each class to one status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad shape or value in the request.
    Validation,
    /// No usable session.
    Authentication,
    /// Authenticated, but not allowed.
    Authorization,
    /// A referenced entity does not exist.
    NotFound,
    /// The entity is in a state that forbids the operation.
    StateConflict,
    /// Store failure or a branch that should be unreachable.
    Internal,
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid price: {0} (must be positive)")]
    InvalidPrice(MoneyInCents),

    #[error("Item description must not be empty")]
    InvalidItemDescription,

    #[error("User {user_id} does not have role {expected}")]
    InvalidRole { user_id: DbId, expected: Role },

    #[error("Missing session id")]
    MissingSessionId,

    #[error("Unknown session")]
    NoSuchSession,

    #[error("Session expired")]
    SessionExpired,

    #[error("Invalid user id or password")]
    InvalidCredentials,

    #[error("Operation requires one of the roles: {0}")]
    WrongRole(String),

    #[error("Item or resource belongs to a different seller")]
    WrongSeller,

    #[error("Sale was registered by a different cashier")]
    WrongCashier,

    #[error("Resource belongs to a different user")]
    WrongUser,

    #[error("No item with id {0}")]
    NoSuchItem(DbId),

    #[error("No user with id {0}")]
    NoSuchUser(DbId),

    #[error("No sale with id {0}")]
    NoSuchSale(DbId),

    #[error("No category with id {0}")]
    NoSuchCategory(DbId),

    #[error("Item {0} is frozen")]
    ItemFrozen(DbId),

    #[error("Item {0} changed while its label was being generated")]
    ItemChanged(DbId),

    #[error("Item {0} appears more than once in the sale")]
    DuplicateItemInSale(DbId),

    #[error("A sale must contain at least one item")]
    SaleMissingItems,

    #[error("User {0} is not a cashier and cannot register sales")]
    SaleRequiresCashier(DbId),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Stable machine-readable key sent to clients as the error `type`.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "invalid_request",
            Self::InvalidPrice(_) => "invalid_price",
            Self::InvalidItemDescription => "invalid_item_description",
            Self::InvalidRole { .. } => "invalid_role",
            Self::MissingSessionId => "missing_session_id",
            Self::NoSuchSession => "no_such_session",
            Self::SessionExpired => "session_expired",
            Self::InvalidCredentials => "invalid_credentials",
            Self::WrongRole(_) => "wrong_role",
            Self::WrongSeller => "wrong_seller",
            Self::WrongCashier => "wrong_cashier",
            Self::WrongUser => "wrong_user",
            Self::NoSuchItem(_) => "no_such_item",
            Self::NoSuchUser(_) => "no_such_user",
            Self::NoSuchSale(_) => "no_such_sale",
            Self::NoSuchCategory(_) => "no_such_category",
            Self::ItemFrozen(_) => "item_frozen",
            Self::ItemChanged(_) => "item_changed",
            Self::DuplicateItemInSale(_) => "duplicate_item_in_sale",
            Self::SaleMissingItems => "sale_missing_items",
            Self::SaleRequiresCashier(_) => "sale_requires_cashier",
            Self::Internal(_) => "internal",
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidRequest(_)
            | Self::InvalidPrice(_)
            | Self::InvalidItemDescription
            | Self::InvalidRole { .. } => ErrorCategory::Validation,

            Self::MissingSessionId
            | Self::NoSuchSession
            | Self::SessionExpired
            | Self::InvalidCredentials => ErrorCategory::Authentication,

            Self::WrongRole(_) | Self::WrongSeller | Self::WrongCashier | Self::WrongUser => {
                ErrorCategory::Authorization
            }

            Self::NoSuchItem(_)
            | Self::NoSuchUser(_)
            | Self::NoSuchSale(_)
            | Self::NoSuchCategory(_) => ErrorCategory::NotFound,

            Self::ItemFrozen(_)
            | Self::ItemChanged(_)
            | Self::DuplicateItemInSale(_)
            | Self::SaleMissingItems => ErrorCategory::StateConflict,

            // Callers check the role before reaching the engine, so this is a bug.
            Self::SaleRequiresCashier(_) | Self::Internal(_) => ErrorCategory::Internal,
        }
    }

    /// Build a [`CoreError::WrongRole`] naming the roles that would have been accepted.
    pub fn wrong_role(accepted: &[Role]) -> Self {
        let names: Vec<&str> = accepted.iter().map(|r| r.as_str()).collect();
        Self::WrongRole(names.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_conflicts_are_not_validation_errors() {
        assert_eq!(CoreError::ItemFrozen(1).category(), ErrorCategory::StateConflict);
        assert_eq!(CoreError::ItemChanged(1).category(), ErrorCategory::StateConflict);
        assert_eq!(
            CoreError::DuplicateItemInSale(3).category(),
            ErrorCategory::StateConflict
        );
        assert_eq!(CoreError::SaleMissingItems.category(), ErrorCategory::StateConflict);
    }

    #[test]
    fn sale_requires_cashier_is_internal() {
        let err = CoreError::SaleRequiresCashier(7);
        assert_eq!(err.category(), ErrorCategory::Internal);
        assert_eq!(err.kind(), "sale_requires_cashier");
    }

    #[test]
    fn wrong_role_lists_accepted_roles() {
        let err = CoreError::wrong_role(&[Role::Admin, Role::Seller]);
        assert_eq!(err.kind(), "wrong_role");
        assert_eq!(err.to_string(), "Operation requires one of the roles: admin, seller");
    }

    #[test]
    fn session_errors_are_authentication() {
        for err in [
            CoreError::MissingSessionId,
            CoreError::NoSuchSession,
            CoreError::SessionExpired,
            CoreError::InvalidCredentials,
        ] {
            assert_eq!(err.category(), ErrorCategory::Authentication, "{err}");
        }
    }
}
