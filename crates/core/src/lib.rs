//! Domain rules for the bazaar sales backend.
//!
//! This crate has no I/O. It holds the identifiers, the fixed category set,
//! the item and sale validation rules, the authorization decision table, the
//! session token rules and the error taxonomy shared by the store and the
//! HTTP layer.

pub mod category;
pub mod error;
pub mod item;
pub mod policy;
pub mod roles;
pub mod sale;
pub mod session;
pub mod types;
