//! Request handlers.
//!
//! Each submodule provides the async handler functions for one resource.
//! Handlers resolve the actor, run the ownership predicate from
//! `bazaar_core::policy` where the route table's role gate is not enough,
//! delegate to one repository call in `bazaar_db`, and map errors via
//! [`AppError`](crate::error::AppError).

pub mod auth;
pub mod cashiers;
pub mod categories;
pub mod items;
pub mod sales;
pub mod sellers;
pub mod users;
