use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::claims::TokenKind;
use super::errors::JwtError;
use crate::identity::UserId;

/// JWT token handler for issuing and verifying signed tokens.
///
/// Uses HS256 (HMAC with SHA-256). The handler holds only derived keys and is
/// safe to share across request tasks behind an `Arc`.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Rotating the secret is the only way to invalidate outstanding tokens
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Issue a token of `kind` for `subject`, valid for `ttl` from now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed or `ttl` overflows the expiry
    pub fn issue(
        &self,
        kind: TokenKind,
        subject: &UserId,
        ttl: Duration,
    ) -> Result<String, JwtError> {
        self.issue_at(kind, subject, ttl, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    pub fn issue_at(
        &self,
        kind: TokenKind,
        subject: &UserId,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<String, JwtError> {
        let claims = Claims::new(kind, subject, now, ttl)?;
        let header = Header::new(self.algorithm);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify a token of `kind` and return the user it was issued to.
    ///
    /// # Errors
    /// * `InvalidSignature` - Signature mismatch or the token does not decode
    /// * `Expired` - Token is past its expiry
    /// * `WrongIssuer` - Token was issued for a different purpose
    /// * `MalformedSubject` - Subject is not a user id
    pub fn verify(&self, kind: TokenKind, token: &str) -> Result<UserId, JwtError> {
        self.verify_at(kind, token, Utc::now())
    }

    /// Verify a token as if the current time were `now`.
    ///
    /// Checks run in a fixed order: signature, expiry, issuer, subject.
    pub fn verify_at(
        &self,
        kind: TokenKind,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<UserId, JwtError> {
        let claims = self.decode_signed(token)?;

        if claims.is_expired(now) {
            return Err(JwtError::Expired);
        }

        if claims.kind() != Some(kind) {
            return Err(JwtError::WrongIssuer(claims.iss));
        }

        UserId::from_string(&claims.sub).map_err(|e| JwtError::MalformedSubject(e.to_string()))
    }

    /// Decode a token after checking its signature only.
    ///
    /// Time-based claims are left to the caller so expiry is judged against an
    /// explicit clock with no leeway.
    fn decode_signed(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| JwtError::InvalidSignature(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::encode;
    use serde::Serialize;

    use super::*;

    const SECRET: &[u8] = b"my_secret_key_at_least_32_bytes_long!";

    fn issued_at() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn sign<T: Serialize>(claims: &T) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(SECRET),
        )
        .expect("Failed to encode token")
    }

    #[test]
    fn test_issue_and_verify() {
        let handler = JwtHandler::new(SECRET);
        let user_id = UserId::new();

        let token = handler
            .issue(TokenKind::Access, &user_id, Duration::hours(1))
            .expect("Failed to issue token");
        assert_eq!(token.split('.').count(), 3);

        let verified = handler
            .verify(TokenKind::Access, &token)
            .expect("Failed to verify token");
        assert_eq!(verified, user_id);
    }

    #[test]
    fn test_issue_with_overflowing_ttl_fails() {
        let handler = JwtHandler::new(SECRET);

        let result = handler.issue(TokenKind::Access, &UserId::new(), Duration::MAX);
        assert!(matches!(result, Err(JwtError::EncodingFailed(_))));

        let result = handler.issue(TokenKind::Access, &UserId::new(), Duration::MIN);
        assert!(matches!(result, Err(JwtError::EncodingFailed(_))));
    }

    #[test]
    fn test_verify_with_wrong_secret() {
        let handler1 = JwtHandler::new(b"secret1_at_least_32_bytes_long_key!");
        let handler2 = JwtHandler::new(b"secret2_at_least_32_bytes_long_key!");

        let token = handler1
            .issue(TokenKind::Access, &UserId::new(), Duration::hours(1))
            .expect("Failed to issue token");

        let result = handler2.verify(TokenKind::Access, &token);
        assert!(matches!(result, Err(JwtError::InvalidSignature(_))));
    }

    #[test]
    fn test_verify_invalid_token() {
        let handler = JwtHandler::new(SECRET);

        let result = handler.verify(TokenKind::Access, "invalid.token.here");
        assert!(matches!(result, Err(JwtError::InvalidSignature(_))));

        let result = handler.verify(TokenKind::Access, "");
        assert!(matches!(result, Err(JwtError::InvalidSignature(_))));
    }

    #[test]
    fn test_expiry_boundary() {
        let handler = JwtHandler::new(SECRET);
        let user_id = UserId::new();
        let ttl = Duration::seconds(60);

        let token = handler
            .issue_at(TokenKind::Access, &user_id, ttl, issued_at())
            .expect("Failed to issue token");

        let just_before = issued_at() + ttl - Duration::seconds(1);
        assert_eq!(
            handler.verify_at(TokenKind::Access, &token, just_before),
            Ok(user_id)
        );

        let at_expiry = issued_at() + ttl;
        assert_eq!(
            handler.verify_at(TokenKind::Access, &token, at_expiry),
            Err(JwtError::Expired)
        );
    }

    #[test]
    fn test_expired_token_fails_with_correct_secret() {
        let handler = JwtHandler::new(SECRET);

        let token = handler
            .issue(TokenKind::Access, &UserId::new(), Duration::seconds(-5))
            .expect("Failed to issue token");

        assert_eq!(
            handler.verify(TokenKind::Access, &token),
            Err(JwtError::Expired)
        );
    }

    #[test]
    fn test_signature_is_checked_before_expiry() {
        let issuer = JwtHandler::new(b"secret1_at_least_32_bytes_long_key!");
        let verifier = JwtHandler::new(b"secret2_at_least_32_bytes_long_key!");

        let token = issuer
            .issue_at(TokenKind::Access, &UserId::new(), Duration::seconds(1), issued_at())
            .expect("Failed to issue token");

        let result = verifier.verify_at(TokenKind::Access, &token, issued_at() + Duration::days(1));
        assert!(matches!(result, Err(JwtError::InvalidSignature(_))));
    }

    #[test]
    fn test_tampered_payload_is_rejected() {
        let handler = JwtHandler::new(SECRET);
        let token = handler
            .issue(TokenKind::Access, &UserId::new(), Duration::hours(1))
            .expect("Failed to issue token");

        let parts: Vec<&str> = token.split('.').collect();
        let payload = parts[1];

        for position in 0..payload.len() {
            let mut tampered_payload: Vec<u8> = payload.bytes().collect();
            tampered_payload[position] = if tampered_payload[position] == b'A' {
                b'B'
            } else {
                b'A'
            };
            let tampered = format!(
                "{}.{}.{}",
                parts[0],
                String::from_utf8(tampered_payload).unwrap(),
                parts[2]
            );

            let result = handler.verify(TokenKind::Access, &tampered);
            assert!(
                matches!(result, Err(JwtError::InvalidSignature(_))),
                "tampering at position {} was not detected",
                position
            );
        }
    }

    #[test]
    fn test_wrong_issuer_is_rejected() {
        let handler = JwtHandler::new(SECRET);
        let user_id = UserId::new();

        let claims = Claims {
            iss: "password-reset".to_string(),
            sub: user_id.to_string(),
            iat: Utc::now().timestamp(),
            exp: (Utc::now() + Duration::hours(1)).timestamp(),
        };
        let token = sign(&claims);

        assert_eq!(
            handler.verify(TokenKind::Access, &token),
            Err(JwtError::WrongIssuer("password-reset".to_string()))
        );
    }

    #[test]
    fn test_expiry_is_checked_before_issuer() {
        let handler = JwtHandler::new(SECRET);

        let claims = Claims {
            iss: "password-reset".to_string(),
            sub: UserId::new().to_string(),
            iat: 1000,
            exp: 2000,
        };
        let token = sign(&claims);

        assert_eq!(
            handler.verify(TokenKind::Access, &token),
            Err(JwtError::Expired)
        );
    }

    #[test]
    fn test_malformed_subject_is_rejected() {
        let handler = JwtHandler::new(SECRET);

        let claims = Claims {
            iss: TokenKind::Access.issuer().to_string(),
            sub: "user123".to_string(),
            iat: Utc::now().timestamp(),
            exp: (Utc::now() + Duration::hours(1)).timestamp(),
        };
        let token = sign(&claims);

        let result = handler.verify(TokenKind::Access, &token);
        assert!(matches!(result, Err(JwtError::MalformedSubject(_))));
    }

    #[test]
    fn test_missing_claims_do_not_decode() {
        #[derive(Serialize)]
        struct PartialClaims {
            sub: String,
        }

        let handler = JwtHandler::new(SECRET);
        let token = sign(&PartialClaims {
            sub: UserId::new().to_string(),
        });

        let result = handler.verify(TokenKind::Access, &token);
        assert!(matches!(result, Err(JwtError::InvalidSignature(_))));
    }
}
