use agrosense_core::AppError;
use thiserror::Error;

/// SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique key is already taken.
    #[error("{0} already exists")]
    Conflict(String),

    /// The store could not be reached or rejected the query.
    #[error("store unavailable: {0}")]
    Unavailable(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A stored row could not be turned back into a domain record.
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

impl StoreError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        StoreError::Unavailable(message.into().into())
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
                let what = db_err.constraint().unwrap_or("record").to_string();
                return StoreError::Conflict(what);
            }
        }
        StoreError::Unavailable(Box::new(err))
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(_) => AppError::conflict(err),
            StoreError::Unavailable(_) => AppError::storage(err),
            StoreError::Corrupt(_) => AppError::internal(err),
        }
    }
}
