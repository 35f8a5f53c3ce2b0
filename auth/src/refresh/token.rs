use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use rand::rngs::OsRng;
use rand::RngCore;

use super::errors::RefreshTokenError;
use crate::identity::UserId;

/// Opaque refresh credential.
///
/// 256 random bits, hex encoded. Carries no claims: owner, expiry and
/// revocation live in the store.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct RefreshToken(String);

impl RefreshToken {
    const BYTES: usize = 32;

    /// Draw a new token from the operating system's secure random source.
    ///
    /// # Errors
    /// * `Entropy` - The random source failed; no token must be issued
    pub fn generate() -> Result<Self, RefreshTokenError> {
        let mut bytes = [0u8; Self::BYTES];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| RefreshTokenError::Entropy(e.to_string()))?;

        Ok(Self(hex::encode(bytes)))
    }

    /// Wrap a token value presented by a client.
    pub fn from_presented(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for RefreshToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RefreshToken([REDACTED])")
    }
}

/// Refresh token as persisted by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshTokenRecord {
    pub token: RefreshToken,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl RefreshTokenRecord {
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Usable for a refresh at `now`.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        !self.is_revoked() && !self.is_expired(now)
    }
}
