use std::env;
use std::fmt;

use chrono::Duration;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Process-wide authentication settings.
///
/// Built once at startup and handed to [`crate::Authenticator`]; nothing in
/// this crate reads configuration from ambient state.
#[derive(Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt: JwtConfig,
    #[serde(default)]
    pub refresh: RefreshConfig,
    pub webhook: WebhookConfig,
    #[serde(default)]
    pub password: PasswordConfig,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_access_token_ttl_seconds")]
    pub access_token_ttl_seconds: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RefreshConfig {
    #[serde(default = "default_refresh_token_ttl_days")]
    pub ttl_days: i64,
}

#[derive(Deserialize, Clone)]
pub struct WebhookConfig {
    pub api_key: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PasswordConfig {
    #[serde(default = "default_password_cost")]
    pub cost: u32,
}

const MIN_PASSWORD_COST: u32 = 4;
const MAX_PASSWORD_COST: u32 = 31;
const MAX_ACCESS_TOKEN_TTL_SECONDS: i64 = 30 * 24 * 60 * 60;
const MAX_REFRESH_TOKEN_TTL_DAYS: i64 = 10 * 365;

fn default_access_token_ttl_seconds() -> i64 {
    60 * 60
}

fn default_refresh_token_ttl_days() -> i64 {
    60
}

fn default_password_cost() -> u32 {
    bcrypt::DEFAULT_COST
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            ttl_days: default_refresh_token_ttl_days(),
        }
    }
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            cost: default_password_cost(),
        }
    }
}

impl AuthConfig {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, WEBHOOK__API_KEY, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: AuthConfig = configuration.try_deserialize()?;
        config.validate()?;

        tracing::info!(
            run_mode = %run_mode,
            access_token_ttl_seconds = config.jwt.access_token_ttl_seconds,
            refresh_token_ttl_days = config.refresh.ttl_days,
            password_cost = config.password.cost,
            "Authentication configuration loaded"
        );

        Ok(config)
    }

    /// Reject settings the authenticator cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.is_empty() {
            return Err(ConfigError::Message("jwt.secret must be set".to_string()));
        }
        if self.webhook.api_key.is_empty() {
            return Err(ConfigError::Message(
                "webhook.api_key must be set".to_string(),
            ));
        }
        if !(1..=MAX_ACCESS_TOKEN_TTL_SECONDS).contains(&self.jwt.access_token_ttl_seconds) {
            return Err(ConfigError::Message(format!(
                "jwt.access_token_ttl_seconds must be between 1 and {}",
                MAX_ACCESS_TOKEN_TTL_SECONDS
            )));
        }
        if !(1..=MAX_REFRESH_TOKEN_TTL_DAYS).contains(&self.refresh.ttl_days) {
            return Err(ConfigError::Message(format!(
                "refresh.ttl_days must be between 1 and {}",
                MAX_REFRESH_TOKEN_TTL_DAYS
            )));
        }
        if !(MIN_PASSWORD_COST..=MAX_PASSWORD_COST).contains(&self.password.cost) {
            return Err(ConfigError::Message(format!(
                "password.cost must be between {} and {}",
                MIN_PASSWORD_COST, MAX_PASSWORD_COST
            )));
        }
        Ok(())
    }

    pub fn access_token_ttl(&self) -> Result<Duration, ConfigError> {
        Duration::try_seconds(self.jwt.access_token_ttl_seconds).ok_or_else(|| {
            ConfigError::Message("jwt.access_token_ttl_seconds is out of range".to_string())
        })
    }

    pub fn refresh_token_ttl(&self) -> Result<Duration, ConfigError> {
        Duration::try_days(self.refresh.ttl_days)
            .ok_or_else(|| ConfigError::Message("refresh.ttl_days is out of range".to_string()))
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt", &self.jwt)
            .field("refresh", &self.refresh)
            .field("webhook", &self.webhook)
            .field("password", &self.password)
            .finish()
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[REDACTED]")
            .field("access_token_ttl_seconds", &self.access_token_ttl_seconds)
            .finish()
    }
}

impl fmt::Debug for WebhookConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookConfig")
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}
