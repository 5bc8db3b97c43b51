use thiserror::Error;

/// Failures raised by a key-value backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Backend(#[from] sqlx::Error),
    #[error("store lock was poisoned")]
    LockPoisoned,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("password must be 1 to 8 letters and digits, with at least one of each")]
    CredentialFormat,
}

#[derive(Debug, Error)]
pub enum PollError {
    #[error(transparent)]
    Storage(#[from] StoreError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("incorrect admin password")]
    Unauthorized,
    #[error("select at least one option before submitting")]
    EmptySelection,
    #[error("failed to serialize payload: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
