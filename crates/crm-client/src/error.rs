//! Error types shared by the client core.

/// Invalid client configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("base url must not be empty")]
    EmptyBaseUrl,
    #[error("base url must use http:// or https:// and include a host")]
    InvalidBaseUrl,
}

/// Failure below HTTP: the request never produced a status code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("request could not be built: {0}")]
    Request(String),
    #[error("network failure: {0}")]
    Network(String),
    #[error("response body could not be read: {0}")]
    Body(String),
}

/// A failed API call, as carried by a normalized `ApiResponse`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code}: {message}")]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn is_network(&self) -> bool {
        self.code == crate::response::codes::NETWORK_ERROR
    }
}
