//! Bazaar API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes,
//! label rendering) so integration tests and the binary entrypoint can both
//! access them.

pub mod auth;
pub mod bootstrap;
pub mod config;
pub mod error;
pub mod export;
pub mod extract;
pub mod handlers;
pub mod labels;
pub mod middleware;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
