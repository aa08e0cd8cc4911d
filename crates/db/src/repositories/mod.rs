//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&SqlitePool` as the first argument. Helpers that must run inside
//! a caller's transaction take `&mut SqliteConnection` instead.

pub mod category_repo;
pub mod item_repo;
pub mod sale_repo;
pub mod session_repo;
pub mod user_repo;

pub use category_repo::CategoryRepo;
pub use item_repo::ItemRepo;
pub use sale_repo::SaleRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
