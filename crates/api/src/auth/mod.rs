//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`cookie`] -- Session cookie formatting and parsing.

pub mod cookie;
pub mod password;
