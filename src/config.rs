//! Client configuration
//!
//! Read from the environment (optionally via a `.env` file):
//!
//! - `MUSEUME_API_BASE_URL` - REST root, default `http://localhost:8000/api`
//! - `MUSEUME_API_TOKEN` - bearer token for the signed-in member
//! - `MUSEUME_HTTP_TIMEOUT_SECS` - per-request timeout, default 30

use crate::error::{ApiError, Result};
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const ENV_BASE_URL: &str = "MUSEUME_API_BASE_URL";
const ENV_TOKEN: &str = "MUSEUME_API_TOKEN";
const ENV_TIMEOUT: &str = "MUSEUME_HTTP_TIMEOUT_SECS";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: Url,
    pub token: Option<String>,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ApiError::Config(format!("{} is not a valid URL: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Config(format!(
                "{} cannot be used as a base URL",
                base_url
            )));
        }
        Ok(Self {
            base_url,
            token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Load from process environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!("Ignoring unreadable .env file: {}", e);
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let base = lookup(ENV_BASE_URL).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let mut config = Self::new(&base)?;

        config.token = lookup(ENV_TOKEN).filter(|t| !t.trim().is_empty());

        if let Some(raw) = lookup(ENV_TIMEOUT) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                ApiError::Config(format!("{} must be a whole number of seconds", ENV_TIMEOUT))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL for a resource path such as `/contests/12`.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.base_url().as_str(), "http://localhost:8000/api");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.token.is_none());
    }

    #[test]
    fn reads_all_keys() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("MUSEUME_API_BASE_URL", "https://api.museume.art/v1/"),
            ("MUSEUME_API_TOKEN", "abc"),
            ("MUSEUME_HTTP_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.token.as_deref(), Some("abc"));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(
            config.endpoint("/contests/my-contests"),
            "https://api.museume.art/v1/contests/my-contests"
        );
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            ClientConfig::from_lookup(lookup(&[("MUSEUME_API_BASE_URL", "not a url")])),
            Err(ApiError::Config(_))
        ));
        assert!(matches!(
            ClientConfig::from_lookup(lookup(&[("MUSEUME_HTTP_TIMEOUT_SECS", "soon")])),
            Err(ApiError::Config(_))
        ));
    }

    #[test]
    fn blank_token_is_ignored() {
        let config = ClientConfig::from_lookup(lookup(&[("MUSEUME_API_TOKEN", " ")])).unwrap();
        assert!(config.token.is_none());
    }
}
