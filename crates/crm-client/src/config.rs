//! Client Configuration
//!
//! The API base URL is provided at build time through `CRM_API_BASE_URL`.

use crate::error::ConfigError;

pub const DEFAULT_API_BASE_URL: &str = "https://localhost:7138/api/v1/";
pub const ENV_API_BASE_URL: &str = "CRM_API_BASE_URL";

/// Local storage key holding the bearer token
pub const TOKEN_KEY: &str = "auth_token";
/// Local storage key holding the serialized session
pub const USER_INFO_KEY: &str = "user_info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Normalized base URL, always ending with `/`
    pub base_url: String,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
        })
    }

    /// Build from the compile-time environment, falling back to the local dev server.
    pub fn from_env() -> Self {
        let configured = option_env!("CRM_API_BASE_URL")
            .map(str::trim)
            .filter(|value| !value.is_empty());
        match configured.map(Self::new) {
            Some(Ok(config)) => config,
            Some(Err(err)) => {
                log::warn!("[config] ignoring {}: {}", ENV_API_BASE_URL, err);
                Self::default()
            }
            None => Self::default(),
        }
    }

    /// Join a relative endpoint onto the base URL.
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint.trim_start_matches('/'))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

pub fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ConfigError::EmptyBaseUrl);
    }
    let Some((scheme, remainder)) = trimmed.split_once("://") else {
        return Err(ConfigError::InvalidBaseUrl);
    };
    if !(scheme == "http" || scheme == "https") {
        return Err(ConfigError::InvalidBaseUrl);
    }
    if remainder.trim().is_empty() || remainder.starts_with('/') {
        return Err(ConfigError::InvalidBaseUrl);
    }
    Ok(format!("{}/", trimmed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(
            normalize_base_url(" https://crm.example.com/api/v1 ").unwrap(),
            "https://crm.example.com/api/v1/"
        );
        assert_eq!(normalize_base_url("http://localhost:5000//").unwrap(), "http://localhost:5000/");
        assert_eq!(normalize_base_url(""), Err(ConfigError::EmptyBaseUrl));
        assert_eq!(normalize_base_url("ftp://host"), Err(ConfigError::InvalidBaseUrl));
        assert_eq!(normalize_base_url("https:///path"), Err(ConfigError::InvalidBaseUrl));
    }

    #[test]
    fn test_url_join() {
        let config = ClientConfig::new("https://crm.example.com/api/v1").unwrap();
        assert_eq!(config.url("taskItem/5"), "https://crm.example.com/api/v1/taskItem/5");
        assert_eq!(config.url("/user"), "https://crm.example.com/api/v1/user");
    }
}
