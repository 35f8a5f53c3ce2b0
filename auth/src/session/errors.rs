use thiserror::Error;

use crate::authenticator::AuthenticationError;
use crate::refresh::StoreError;

/// Session operation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Authentication failed: {0}")]
    Authentication(#[from] AuthenticationError),

    #[error("Refresh token is unknown, expired or revoked")]
    InvalidRefreshToken,

    #[error("Refresh token expiry is out of range")]
    ExpiryOutOfRange,

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}
