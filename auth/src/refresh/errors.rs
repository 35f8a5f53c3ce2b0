use thiserror::Error;

/// Error type for refresh token generation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RefreshTokenError {
    #[error("Secure random source failed: {0}")]
    Entropy(String),
}

/// Error reported by a refresh token store implementation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Refresh token store unavailable: {0}")]
    Unavailable(String),

    #[error("Refresh token store error: {0}")]
    Other(String),
}
