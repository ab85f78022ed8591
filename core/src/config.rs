//! Client configuration.

use serde::Deserialize;

pub const BASE_URL_VAR: &str = "BRAINSTEM_BASE_URL";
pub const AUTH_TOKEN_VAR: &str = "BRAINSTEM_AUTH_TOKEN";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    MissingVar(&'static str),
}

/// Where the API lives and which CSRF token to send with every request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    pub base_url: String,
    pub auth_token: String,
}

impl ClientConfig {
    pub fn new(base_url: &str, auth_token: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            auth_token: auth_token.to_string(),
        }
        .normalized()
    }

    /// Read `BRAINSTEM_BASE_URL` and `BRAINSTEM_AUTH_TOKEN`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(BASE_URL_VAR).ok_or(ConfigError::MissingVar(BASE_URL_VAR))?;
        let auth_token = lookup(AUTH_TOKEN_VAR).ok_or(ConfigError::MissingVar(AUTH_TOKEN_VAR))?;
        Ok(Self { base_url, auth_token }.normalized())
    }

    /// Strip trailing slashes so relative paths join cleanly.
    pub fn normalized(mut self) -> Self {
        let trimmed = self.base_url.trim_end_matches('/').len();
        self.base_url.truncate(trimmed);
        self
    }

    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }
}
