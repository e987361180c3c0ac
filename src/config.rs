/*
 * Responsibility
 * - Load environment variables / .env (PORT, BASE_PATH, FIREBASE_*, ...)
 * - Validate values (startup fails when something required is missing)
 */
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::middleware::http::REQUEST_TIMEOUT;
use crate::services::backend::{BackendEndpoints, BackendSettings};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(raw: Option<String>) -> Self {
        match raw
            .unwrap_or_else(|| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing configuration: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    // History base the route table is mounted under ("/" or "/blog").
    pub base_path: String,
    pub session_cookie_name: String,

    pub backend: BackendSettings,
    pub endpoints: BackendEndpoints,

    // Must stay below the request timeout so a hung lookup ends in a login redirect, not a 408.
    pub identity_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup (the process env in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let port: u16 = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(lookup("APP_ENV"));

        let base_path = normalize_base_path(lookup("BASE_PATH").as_deref())?;

        let session_cookie_name = lookup("SESSION_COOKIE_NAME")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "session".to_string());

        let backend = BackendSettings {
            api_key: required("FIREBASE_API_KEY")?,
            auth_domain: required("FIREBASE_AUTH_DOMAIN")?,
            project_id: required("FIREBASE_PROJECT_ID")?,
            storage_bucket: required("FIREBASE_STORAGE_BUCKET")?,
            messaging_sender_id: required("FIREBASE_MESSAGING_SENDER_ID")?,
            app_id: required("FIREBASE_APP_ID")?,
        };

        let identity = lookup("IDENTITY_ENDPOINT")
            .unwrap_or_else(|| BackendEndpoints::DEFAULT_IDENTITY.to_string());
        let firestore = lookup("FIRESTORE_ENDPOINT")
            .unwrap_or_else(|| BackendEndpoints::DEFAULT_FIRESTORE.to_string());

        let endpoints = BackendEndpoints {
            identity: url::Url::parse(identity.trim())
                .map_err(|_| ConfigError::Invalid("IDENTITY_ENDPOINT"))?,
            firestore: url::Url::parse(firestore.trim())
                .map_err(|_| ConfigError::Invalid("FIRESTORE_ENDPOINT"))?,
        };

        let identity_timeout = match lookup("IDENTITY_TIMEOUT_SECONDS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .map(Duration::from_secs)
                .filter(|t| !t.is_zero() && *t < REQUEST_TIMEOUT)
                .ok_or(ConfigError::Invalid("IDENTITY_TIMEOUT_SECONDS"))?,
            None => Duration::from_secs(10),
        };

        Ok(Self {
            addr,
            app_env,
            base_path,
            session_cookie_name,
            backend,
            endpoints,
            identity_timeout,
        })
    }
}

// "/" stays "/", "/Blog/" becomes "/blog" (request paths are lowercased before routing).
// Only unreserved URL characters are accepted; `{x}` or `*` would be route syntax to `nest`.
fn normalize_base_path(raw: Option<&str>) -> Result<String, ConfigError> {
    let raw = raw.map(str::trim).unwrap_or("/");
    if raw.is_empty() {
        return Ok("/".to_string());
    }
    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '/' | '-' | '.' | '_' | '~');
    if !raw.starts_with('/') || !raw.chars().all(allowed) {
        return Err(ConfigError::Invalid("BASE_PATH"));
    }

    let trimmed = raw.trim_end_matches('/').to_ascii_lowercase();
    if trimmed.is_empty() {
        Ok("/".to_string())
    } else {
        Ok(trimmed)
    }
}
