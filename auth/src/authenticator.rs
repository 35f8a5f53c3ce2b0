use std::fmt;

use axum::http::HeaderMap;
use chrono::Duration;
use config::ConfigError;

use crate::config::AuthConfig;
use crate::credentials::extract_api_key;
use crate::credentials::extract_bearer;
use crate::credentials::ApiKey;
use crate::credentials::CredentialError;
use crate::identity::UserId;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::TokenKind;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::refresh::RefreshToken;
use crate::refresh::RefreshTokenError;

/// Authentication coordinator combining password verification, token issuance
/// and credential checks.
///
/// Holds the process-wide signing secret and API key. Every method takes
/// `&self` and touches no mutable state, so one instance behind an `Arc`
/// serves all request tasks.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    api_key: ApiKey,
    access_token_ttl: Duration,
}

/// Result of successful login.
#[derive(Clone)]
pub struct LoginTokens {
    /// Signed access token
    pub access_token: String,

    /// Opaque refresh token, to be persisted by the caller's store
    pub refresh_token: RefreshToken,
}

impl fmt::Debug for LoginTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginTokens")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &self.refresh_token)
            .finish()
    }
}

/// Authentication operation errors.
///
/// The variant is for diagnostics; callers facing untrusted clients should
/// collapse all of them into a single "unauthorized" outcome.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),

    #[error("Credential error: {0}")]
    CredentialError(#[from] CredentialError),

    #[error("Refresh token error: {0}")]
    RefreshTokenError(#[from] RefreshTokenError),
}

impl Authenticator {
    /// Create a new authenticator from process configuration.
    ///
    /// # Errors
    /// * `ConfigError` - Configuration failed validation
    pub fn new(config: &AuthConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            password_hasher: PasswordHasher::with_cost(config.password.cost),
            jwt_handler: JwtHandler::new(config.jwt.secret.as_bytes()),
            api_key: ApiKey::new(config.webhook.api_key.clone()),
            access_token_ttl: config.access_token_ttl()?,
        })
    }

    pub fn access_token_ttl(&self) -> Duration {
        self.access_token_ttl
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify a password against a stored hash.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is unusable
    pub fn verify_password(
        &self,
        password: &str,
        stored_hash: &str,
    ) -> Result<(), AuthenticationError> {
        self.password_hasher
            .verify(password, stored_hash)
            .map_err(|e| match e {
                PasswordError::Mismatch => AuthenticationError::InvalidCredentials,
                other => AuthenticationError::PasswordError(other),
            })
    }

    /// Verify credentials and issue an access/refresh token pair.
    ///
    /// Nothing is issued unless the password verifies.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is unusable
    /// * `JwtError` - Access token generation failed
    /// * `RefreshTokenError` - Secure random source failed
    pub fn login(
        &self,
        user_id: &UserId,
        password: &str,
        stored_hash: &str,
    ) -> Result<LoginTokens, AuthenticationError> {
        self.verify_password(password, stored_hash)?;

        let access_token = self.issue_access_token(user_id)?;
        let refresh_token = RefreshToken::generate().inspect_err(|e| {
            tracing::error!(user_id = %user_id, error = %e, "Refresh token generation failed");
        })?;

        tracing::debug!(user_id = %user_id, "Login tokens issued");

        Ok(LoginTokens {
            access_token,
            refresh_token,
        })
    }

    /// Issue an access token without password verification.
    ///
    /// For flows where identity is already established (refresh, profile
    /// update).
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_access_token(&self, user_id: &UserId) -> Result<String, JwtError> {
        self.jwt_handler
            .issue(TokenKind::Access, user_id, self.access_token_ttl)
    }

    /// Validate an access token and return its subject.
    ///
    /// # Errors
    /// * `JwtError` - Signature, expiry, issuer or subject check failed
    pub fn validate_access_token(&self, token: &str) -> Result<UserId, JwtError> {
        self.jwt_handler.verify(TokenKind::Access, token)
    }

    /// Authenticate a user request from its `Authorization: Bearer` header.
    ///
    /// # Errors
    /// * `CredentialError` - Header missing or malformed
    /// * `JwtError` - Token rejected
    pub fn authenticate_bearer(&self, headers: &HeaderMap) -> Result<UserId, AuthenticationError> {
        let token = extract_bearer(headers)?;
        let user_id = self.validate_access_token(token)?;
        Ok(user_id)
    }

    /// Authorize a machine caller from its `Authorization: ApiKey` header.
    ///
    /// # Errors
    /// * `CredentialError` - Header missing or malformed
    /// * `InvalidApiKey` - Key does not match the configured key
    pub fn authorize_webhook(&self, headers: &HeaderMap) -> Result<(), AuthenticationError> {
        let key = extract_api_key(headers)?;

        if !self.api_key.verify(key) {
            return Err(AuthenticationError::InvalidApiKey);
        }

        Ok(())
    }
}
