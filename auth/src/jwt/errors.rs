use thiserror::Error;

/// Error type for JWT operations.
///
/// Variants carry diagnostic detail from the decoder only, never the token.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token signature is invalid or token is malformed: {0}")]
    InvalidSignature(String),

    #[error("Token is expired")]
    Expired,

    #[error("Token issuer is not accepted: {0}")]
    WrongIssuer(String),

    #[error("Token subject is not a valid user id: {0}")]
    MalformedSubject(String),
}
