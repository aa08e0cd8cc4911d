use bazaar_core::error::CoreError;

/// Error returned by repository operations that enforce domain rules.
///
/// Domain failures keep their [`CoreError`] so callers can match on the
/// exact cause; everything the store itself reports stays a `sqlx::Error`.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
