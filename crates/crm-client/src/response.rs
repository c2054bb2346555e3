//! Uniform API Response
//!
//! Every gateway call resolves to an `ApiResponse`, whether the server answered,
//! answered with an error, or could not be reached.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::pagination::PaginationMetadata;

pub mod codes {
    pub const NETWORK_ERROR: &str = "NETWORK_ERROR";
    pub const INVALID_RESPONSE: &str = "INVALID_RESPONSE";
    pub const UNKNOWN_ERROR: &str = "UNKNOWN_ERROR";

    pub fn http_error(status: u16) -> String {
        format!("HTTP_ERROR_{}", status)
    }
}

pub const NO_CONTENT_MESSAGE: &str = "Operation completed successfully";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationMetadata>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            error_code: None,
            pagination: None,
        }
    }

    /// Successful call without a body (HTTP 204)
    pub fn no_content() -> Self {
        Self {
            success: true,
            data: None,
            message: Some(NO_CONTENT_MESSAGE.to_string()),
            error_code: None,
            pagination: None,
        }
    }

    pub fn failure(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
            error_code: Some(code.into()),
            pagination: None,
        }
    }

    /// Enforce the failure shape: no data, code and message always present.
    pub(crate) fn normalized(mut self) -> Self {
        if !self.success {
            self.data = None;
            self.pagination = None;
            let code = self
                .error_code
                .take()
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| codes::UNKNOWN_ERROR.to_string());
            let message = self
                .message
                .take()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| code.clone());
            self.error_code = Some(code);
            self.message = Some(message);
        }
        self
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn error(&self) -> Option<ApiError> {
        if self.success {
            return None;
        }
        Some(ApiError::new(
            self.error_code.clone().unwrap_or_else(|| codes::UNKNOWN_ERROR.to_string()),
            self.message.clone().unwrap_or_default(),
        ))
    }

    /// Total rows reported by the server, zero when absent
    pub fn total_count(&self) -> u32 {
        self.pagination.map(|p| p.total_count).unwrap_or(0)
    }

    pub fn into_result(self) -> Result<Option<T>, ApiError> {
        match self.error() {
            Some(err) => Err(err),
            None => Ok(self.data),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            success: self.success,
            data: self.data.map(f),
            message: self.message,
            error_code: self.error_code,
            pagination: self.pagination,
        }
    }
}

/// Error fields an HTTP error body may carry
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
