use thiserror::Error;

/// Error type for reading credentials from request headers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("No Authorization header included in request")]
    MissingHeader,

    #[error("Malformed Authorization header")]
    MalformedHeader,
}
