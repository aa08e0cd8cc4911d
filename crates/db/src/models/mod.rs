//! Row structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - `Serialize` response shapes where the row is not safe to expose as-is
//! - Create DTOs for inserts

pub mod category;
pub mod item;
pub mod sale;
pub mod session;
pub mod user;
