use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;

use super::errors::CredentialError;

/// Authorization scheme for user access tokens.
pub const BEARER_SCHEME: &str = "Bearer";

/// Authorization scheme for machine callers.
pub const API_KEY_SCHEME: &str = "ApiKey";

/// Read a bearer token from `Authorization: Bearer <token>`.
///
/// The token is returned verbatim; its validity is the token codec's concern.
///
/// # Errors
/// * `MissingHeader` - No Authorization header
/// * `MalformedHeader` - Header is not exactly `Bearer <token>`
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, CredentialError> {
    extract_scheme(headers, BEARER_SCHEME)
}

/// Read a static API key from `Authorization: ApiKey <key>`.
///
/// # Errors
/// * `MissingHeader` - No Authorization header
/// * `MalformedHeader` - Header is not exactly `ApiKey <key>`
pub fn extract_api_key(headers: &HeaderMap) -> Result<&str, CredentialError> {
    extract_scheme(headers, API_KEY_SCHEME)
}

fn extract_scheme<'a>(headers: &'a HeaderMap, scheme: &str) -> Result<&'a str, CredentialError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(CredentialError::MissingHeader)?
        .to_str()
        .map_err(|_| CredentialError::MalformedHeader)?;

    let mut parts = value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(found), Some(credential), None) if found == scheme => Ok(credential),
        _ => Err(CredentialError::MalformedHeader),
    }
}
