use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use super::errors::StoreError;
use super::token::RefreshToken;
use super::token::RefreshTokenRecord;

/// Persistence operations for refresh tokens.
///
/// Implemented by the application's data store; this crate only generates
/// tokens and interprets the records handed back.
#[async_trait]
pub trait RefreshTokenStore: Send + Sync + 'static {
    /// Persist a newly issued refresh token.
    ///
    /// # Errors
    /// * `StoreError` - Store operation failed
    async fn save(&self, record: RefreshTokenRecord) -> Result<(), StoreError>;

    /// Retrieve the record for a presented token.
    ///
    /// # Returns
    /// Optional record (None if the token was never issued)
    ///
    /// # Errors
    /// * `StoreError` - Store operation failed
    async fn find(&self, token: &RefreshToken)
        -> Result<Option<RefreshTokenRecord>, StoreError>;

    /// Mark a token revoked as of `revoked_at`.
    ///
    /// Revoking an unknown or already revoked token is not an error.
    ///
    /// # Errors
    /// * `StoreError` - Store operation failed
    async fn revoke(
        &self,
        token: &RefreshToken,
        revoked_at: DateTime<Utc>,
    ) -> Result<(), StoreError>;
}
