//! Identity verification and session tokens for the Chirpy API
//!
//! Provides the credential handling used by the HTTP layer:
//! - Password hashing (bcrypt)
//! - Signed, expiring access tokens (HS256 JWT) bound to a user id
//! - Opaque refresh tokens whose state lives in an external store
//! - `Authorization` header parsing for bearer tokens and API keys
//! - axum middleware that turns all of the above into a single 401
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use chirpy_auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::with_cost(4);
//! let hash = hasher.hash("correcthorse").unwrap();
//! assert!(hasher.verify("correcthorse", &hash).is_ok());
//! assert!(hasher.verify("wrongpass", &hash).is_err());
//! ```
//!
//! ## Access Tokens
//! ```
//! use chirpy_auth::{JwtHandler, TokenKind, UserId};
//! use chrono::Duration;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let user_id = UserId::new();
//! let token = handler.issue(TokenKind::Access, &user_id, Duration::hours(1)).unwrap();
//! assert_eq!(handler.verify(TokenKind::Access, &token).unwrap(), user_id);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use chirpy_auth::config::{JwtConfig, PasswordConfig, RefreshConfig, WebhookConfig};
//! use chirpy_auth::{AuthConfig, Authenticator, UserId};
//!
//! let auth = Authenticator::new(&AuthConfig {
//!     jwt: JwtConfig {
//!         secret: "secret_key_at_least_32_bytes_long!".to_string(),
//!         access_token_ttl_seconds: 3600,
//!     },
//!     refresh: RefreshConfig::default(),
//!     webhook: WebhookConfig { api_key: "webhook-key".to_string() },
//!     password: PasswordConfig { cost: 4 },
//! })
//! .unwrap();
//!
//! // Register: hash password
//! let hash = auth.hash_password("correcthorse").unwrap();
//!
//! // Login: verify and issue tokens
//! let user_id = UserId::new();
//! let tokens = auth.login(&user_id, "correcthorse", &hash).unwrap();
//! assert_eq!(tokens.refresh_token.as_str().len(), 64);
//!
//! // Validate token
//! assert_eq!(auth.validate_access_token(&tokens.access_token).unwrap(), user_id);
//! ```

pub mod authenticator;
pub mod config;
pub mod credentials;
pub mod identity;
pub mod inbound;
pub mod jwt;
pub mod password;
pub mod refresh;
pub mod session;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::LoginTokens;
pub use config::AuthConfig;
pub use credentials::extract_api_key;
pub use credentials::extract_bearer;
pub use credentials::ApiKey;
pub use credentials::CredentialError;
pub use identity::UserId;
pub use identity::UserIdError;
pub use inbound::http::AuthenticatedUser;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::TokenKind;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use refresh::RefreshToken;
pub use refresh::RefreshTokenError;
pub use refresh::RefreshTokenRecord;
pub use refresh::RefreshTokenStore;
pub use refresh::StoreError;
pub use session::SessionError;
pub use session::SessionService;
