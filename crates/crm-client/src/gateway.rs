//! API Gateway
//!
//! Single request path for every resource client. It attaches the bearer token,
//! picks the body encoding and turns whatever happened into an `ApiResponse`.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::credentials::CredentialStore;
use crate::error::TransportError;
use crate::models::Attachment;
use crate::query::QueryString;
use crate::response::{codes, ApiResponse, ErrorBody};

pub const INVALID_REQUEST: &str = "INVALID_REQUEST";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MultipartField {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        content_type: String,
        bytes: Vec<u8>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    /// Serialized JSON document
    Json(String),
    /// multipart/form-data; the transport sets the boundary header itself
    Multipart(Vec<MultipartField>),
}

/// Fully resolved request handed to a transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Sends a request and reports the raw outcome. Browser futures are not `Send`.
#[async_trait(?Send)]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Invoked after a 401 cleared the stored credentials
pub type SessionInvalidated = Arc<dyn Fn() + Send + Sync>;

/// Request relative to the API base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub endpoint: String,
    pub query: QueryString,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn new(method: HttpMethod, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            query: QueryString::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn query(mut self, query: QueryString) -> Self {
        self.query = query;
        self
    }

    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, serde_json::Error> {
        self.body = RequestBody::Json(serde_json::to_string(body)?);
        Ok(self)
    }

    pub fn multipart(mut self, fields: Vec<MultipartField>) -> Self {
        self.body = RequestBody::Multipart(fields);
        self
    }
}

#[derive(Clone)]
pub struct ApiGateway {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
    credentials: Arc<dyn CredentialStore>,
    on_session_invalidated: Option<SessionInvalidated>,
}

impl fmt::Debug for ApiGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiGateway")
            .field("base_url", &self.config.base_url)
            .field("authenticated", &self.credentials.is_authenticated())
            .finish()
    }
}

impl ApiGateway {
    pub fn new(
        config: ClientConfig,
        transport: Arc<dyn Transport>,
        credentials: Arc<dyn CredentialStore>,
    ) -> Self {
        Self {
            config,
            transport,
            credentials,
            on_session_invalidated: None,
        }
    }

    pub fn on_session_invalidated(mut self, callback: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_session_invalidated = Some(Arc::new(callback));
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.credentials
    }

    pub async fn request<T: DeserializeOwned>(&self, request: ApiRequest) -> ApiResponse<T> {
        let url = format!("{}{}", self.config.url(&request.endpoint), request.query.to_suffix());
        let mut headers = Vec::new();
        if let Some(token) = self.credentials.token().filter(|t| !t.is_empty()) {
            headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
        }
        if matches!(request.body, RequestBody::Json(_)) {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }

        let http_request = HttpRequest {
            method: request.method,
            url,
            headers,
            body: request.body,
        };
        let method = http_request.method;
        let url = http_request.url.clone();
        log::debug!("[gateway] {} {}", method, url);

        match self.transport.send(http_request).await {
            Ok(response) => self.normalize(method, &url, response),
            Err(err) => {
                log::error!("[gateway] {} {} failed: {}", method, url, err);
                ApiResponse::failure(codes::NETWORK_ERROR, err.to_string())
            }
        }
    }

    fn normalize<T: DeserializeOwned>(&self, method: HttpMethod, url: &str, response: HttpResponse) -> ApiResponse<T> {
        let status = response.status;
        if status == 401 {
            log::warn!("[gateway] {} {} unauthorized, clearing session", method, url);
            self.credentials.clear();
            if let Some(callback) = &self.on_session_invalidated {
                callback();
            }
        }

        if (200..300).contains(&status) {
            if status == 204 || response.body.trim().is_empty() {
                return ApiResponse::no_content();
            }
            return match serde_json::from_str::<ApiResponse<T>>(&response.body) {
                Ok(parsed) => {
                    let parsed = parsed.normalized();
                    if !parsed.success {
                        log::warn!("[gateway] {} {} reported failure: {:?}", method, url, parsed.message);
                    }
                    parsed
                }
                Err(err) => match bare_payload::<T>(&response.body) {
                    Some(data) => {
                        log::debug!("[gateway] {} {} answered without an envelope", method, url);
                        ApiResponse::success(data)
                    }
                    None => {
                        log::error!("[gateway] {} {} returned an unreadable body: {}", method, url, err);
                        ApiResponse::failure(codes::INVALID_RESPONSE, format!("Unexpected response: {}", err))
                    }
                },
            };
        }

        let body = serde_json::from_str::<ErrorBody>(&response.body).unwrap_or_default();
        let code = body
            .error_code
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| codes::http_error(status));
        let message = body
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("HTTP error {}", status));
        log::warn!("[gateway] {} {} -> {} {}: {}", method, url, status, code, message);
        ApiResponse::failure(code, message)
    }

    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResponse<T> {
        self.request(ApiRequest::new(HttpMethod::Get, endpoint)).await
    }

    pub async fn get_with_query<T: DeserializeOwned>(&self, endpoint: &str, query: QueryString) -> ApiResponse<T> {
        self.request(ApiRequest::new(HttpMethod::Get, endpoint).query(query)).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(&self, endpoint: &str, body: &B) -> ApiResponse<T> {
        self.send_json(HttpMethod::Post, endpoint, body).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(&self, endpoint: &str, body: &B) -> ApiResponse<T> {
        self.send_json(HttpMethod::Put, endpoint, body).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResponse<T> {
        self.request(ApiRequest::new(HttpMethod::Delete, endpoint)).await
    }

    /// POST a single file as multipart form data (part name `file`)
    pub async fn upload<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: QueryString,
        attachment: &Attachment,
    ) -> ApiResponse<T> {
        let field = MultipartField::File {
            name: "file".to_string(),
            file_name: attachment.file_name.clone(),
            content_type: attachment.content_type.clone(),
            bytes: attachment.bytes.clone(),
        };
        let request = ApiRequest::new(HttpMethod::Post, endpoint)
            .query(query)
            .multipart(vec![field]);
        self.request(request).await
    }

    async fn send_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        endpoint: &str,
        body: &B,
    ) -> ApiResponse<T> {
        match ApiRequest::new(method, endpoint).json(body) {
            Ok(request) => self.request(request).await,
            Err(err) => {
                log::error!("[gateway] {} {}: body not serializable: {}", method, endpoint, err);
                ApiResponse::failure(INVALID_REQUEST, err.to_string())
            }
        }
    }
}

/// A 2xx body that is not an envelope is the payload itself.
fn bare_payload<T: DeserializeOwned>(body: &str) -> Option<T> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    if value.get("success").is_some() {
        return None;
    }
    serde_json::from_value(value).ok()
}
