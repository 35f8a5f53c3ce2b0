pub mod api_key;
pub mod errors;
pub mod extractor;

pub use api_key::ApiKey;
pub use errors::CredentialError;
pub use extractor::extract_api_key;
pub use extractor::extract_bearer;
