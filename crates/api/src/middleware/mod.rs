//! Authentication and authorization extractors.
//!
//! - [`auth::SessionToken`] -- The raw session token from the cookie.
//! - [`auth::AuthUser`] -- The actor behind a live session.
//! - [`rbac::RequireAdmin`], [`rbac::RequireCashier`], [`rbac::RequireSeller`],
//!   [`rbac::RequireAdminOrSeller`] -- Role gates for the route table.

pub mod auth;
pub mod rbac;
