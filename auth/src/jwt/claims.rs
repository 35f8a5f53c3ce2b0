use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;
use crate::identity::UserId;

/// Class of a signed token.
///
/// Every class shares the signing secret, so the issuer tag is what keeps a
/// token minted for one purpose from being accepted for another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Access,
}

impl TokenKind {
    const ACCESS_ISSUER: &'static str = "access";

    /// Issuer tag written into `iss`.
    pub fn issuer(&self) -> &'static str {
        match self {
            TokenKind::Access => Self::ACCESS_ISSUER,
        }
    }

    /// Map an `iss` value back to a token class.
    pub fn from_issuer(issuer: &str) -> Option<Self> {
        match issuer {
            Self::ACCESS_ISSUER => Some(TokenKind::Access),
            _ => None,
        }
    }
}

/// Registered claims carried by every signed token.
///
/// All fields are required; a token missing any of them does not decode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Issuer tag (see [`TokenKind::issuer`])
    pub iss: String,

    /// Subject (stringified user id)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for `subject` valid from `issued_at` for `ttl`.
    ///
    /// # Errors
    /// * `EncodingFailed` - Expiry falls outside the representable time range
    pub fn new(
        kind: TokenKind,
        subject: &UserId,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, JwtError> {
        let expiration = issued_at
            .checked_add_signed(ttl)
            .ok_or_else(|| JwtError::EncodingFailed("token expiry out of range".to_string()))?;

        Ok(Self {
            iss: kind.issuer().to_string(),
            sub: subject.to_string(),
            iat: issued_at.timestamp(),
            exp: expiration.timestamp(),
        })
    }

    /// Token class named by the issuer tag, if any.
    pub fn kind(&self) -> Option<TokenKind> {
        TokenKind::from_issuer(&self.iss)
    }

    /// Check if token is expired.
    ///
    /// The expiry instant itself is already outside the validity window.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}
