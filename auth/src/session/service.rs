use std::sync::Arc;

use chrono::Duration;
use chrono::Utc;

use super::errors::SessionError;
use crate::authenticator::AuthenticationError;
use crate::authenticator::Authenticator;
use crate::authenticator::LoginTokens;
use crate::identity::UserId;
use crate::refresh::RefreshToken;
use crate::refresh::RefreshTokenRecord;
use crate::refresh::RefreshTokenStore;

/// Login, refresh and revoke flows over an external refresh token store.
///
/// The authenticator decides who the caller is; the store decides whether a
/// refresh token is still good.
pub struct SessionService<S>
where
    S: RefreshTokenStore,
{
    authenticator: Arc<Authenticator>,
    store: Arc<S>,
    refresh_token_ttl: Duration,
}

impl<S> SessionService<S>
where
    S: RefreshTokenStore,
{
    /// Create a new session service with injected dependencies.
    ///
    /// # Arguments
    /// * `authenticator` - Shared authenticator
    /// * `store` - Refresh token persistence implementation
    /// * `refresh_token_ttl` - Lifetime of newly issued refresh tokens
    pub fn new(
        authenticator: Arc<Authenticator>,
        store: Arc<S>,
        refresh_token_ttl: Duration,
    ) -> Self {
        Self {
            authenticator,
            store,
            refresh_token_ttl,
        }
    }

    /// Verify a password and start a session.
    ///
    /// The refresh token is persisted before either token is returned.
    ///
    /// # Errors
    /// * `Authentication` - Password mismatch or token generation failed
    /// * `ExpiryOutOfRange` - Refresh window overflows the expiry timestamp
    /// * `Store` - Refresh token could not be persisted
    pub async fn login(
        &self,
        user_id: &UserId,
        password: &str,
        stored_hash: &str,
    ) -> Result<LoginTokens, SessionError> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(self.refresh_token_ttl)
            .ok_or(SessionError::ExpiryOutOfRange)
            .inspect_err(|e| tracing::error!(error = %e, "Refresh window misconfigured"))?;

        let tokens = self
            .authenticator
            .login(user_id, password, stored_hash)
            .inspect_err(|e| tracing::warn!(user_id = %user_id, error = %e, "Login rejected"))?;

        let record = RefreshTokenRecord {
            token: tokens.refresh_token.clone(),
            user_id: *user_id,
            created_at: now,
            expires_at,
            revoked_at: None,
        };

        self.store.save(record).await.inspect_err(|e| {
            tracing::error!(user_id = %user_id, error = %e, "Failed to persist refresh token");
        })?;

        tracing::debug!(user_id = %user_id, "Session started");

        Ok(tokens)
    }

    /// Exchange a refresh token for a new access token.
    ///
    /// # Errors
    /// * `InvalidRefreshToken` - Token unknown, expired or revoked
    /// * `Authentication` - Access token generation failed
    /// * `Store` - Lookup failed
    pub async fn refresh(&self, refresh_token: &str) -> Result<String, SessionError> {
        let token = RefreshToken::from_presented(refresh_token);

        let record = self
            .store
            .find(&token)
            .await?
            .ok_or(SessionError::InvalidRefreshToken)
            .inspect_err(|_| tracing::warn!("Refresh with unknown token"))?;

        if !record.is_active(Utc::now()) {
            tracing::warn!(
                user_id = %record.user_id,
                revoked = record.is_revoked(),
                "Refresh with inactive token"
            );
            return Err(SessionError::InvalidRefreshToken);
        }

        let access_token = self
            .authenticator
            .issue_access_token(&record.user_id)
            .map_err(AuthenticationError::from)?;

        tracing::debug!(user_id = %record.user_id, "Access token refreshed");

        Ok(access_token)
    }

    /// Revoke a refresh token so it can no longer be exchanged.
    ///
    /// # Errors
    /// * `Store` - Store update failed
    pub async fn revoke(&self, refresh_token: &str) -> Result<(), SessionError> {
        let token = RefreshToken::from_presented(refresh_token);

        self.store.revoke(&token, Utc::now()).await?;

        tracing::debug!("Refresh token revoked");

        Ok(())
    }
}
