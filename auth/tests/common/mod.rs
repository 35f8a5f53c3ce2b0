#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use chirpy_auth::config::JwtConfig;
use chirpy_auth::config::PasswordConfig;
use chirpy_auth::config::RefreshConfig;
use chirpy_auth::config::WebhookConfig;
use chirpy_auth::AuthConfig;
use chirpy_auth::Authenticator;
use chirpy_auth::RefreshToken;
use chirpy_auth::RefreshTokenRecord;
use chirpy_auth::RefreshTokenStore;
use chirpy_auth::StoreError;
use chrono::DateTime;
use chrono::Utc;

pub const JWT_SECRET: &str = "integration_secret_key_at_least_32_bytes";
pub const API_KEY: &str = "f271c81ff7084ee5b99a5091b42d486e";

/// Configuration with a cheap bcrypt cost so tests stay fast
pub fn test_config() -> AuthConfig {
    AuthConfig {
        jwt: JwtConfig {
            secret: JWT_SECRET.to_string(),
            access_token_ttl_seconds: 3600,
        },
        refresh: RefreshConfig::default(),
        webhook: WebhookConfig {
            api_key: API_KEY.to_string(),
        },
        password: PasswordConfig { cost: 4 },
    }
}

pub fn test_authenticator() -> Arc<Authenticator> {
    Arc::new(Authenticator::new(&test_config()).expect("Failed to build authenticator"))
}

/// Refresh token store backed by a map, standing in for the database
#[derive(Default)]
pub struct InMemoryRefreshTokenStore {
    records: Mutex<HashMap<String, RefreshTokenRecord>>,
}

impl InMemoryRefreshTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn get(&self, token: &str) -> Option<RefreshTokenRecord> {
        self.records.lock().unwrap().get(token).cloned()
    }
}

#[async_trait]
impl RefreshTokenStore for InMemoryRefreshTokenStore {
    async fn save(&self, record: RefreshTokenRecord) -> Result<(), StoreError> {
        self.records
            .lock()
            .map_err(|e| StoreError::Other(e.to_string()))?
            .insert(record.token.as_str().to_string(), record);
        Ok(())
    }

    async fn find(&self, token: &RefreshToken) -> Result<Option<RefreshTokenRecord>, StoreError> {
        Ok(self
            .records
            .lock()
            .map_err(|e| StoreError::Other(e.to_string()))?
            .get(token.as_str())
            .cloned())
    }

    async fn revoke(
        &self,
        token: &RefreshToken,
        revoked_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        if let Some(record) = self
            .records
            .lock()
            .map_err(|e| StoreError::Other(e.to_string()))?
            .get_mut(token.as_str())
        {
            record.revoked_at.get_or_insert(revoked_at);
        }
        Ok(())
    }
}
