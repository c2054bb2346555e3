//! Test doubles: a transport that records requests and answers from a closure.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::config::ClientConfig;
use crate::credentials::MemoryCredentials;
use crate::error::TransportError;
use crate::gateway::{ApiGateway, HttpRequest, HttpResponse, Transport};
use crate::models::AuthSession;

type Responder = Box<dyn Fn(&HttpRequest) -> Result<HttpResponse, TransportError> + Send + Sync>;

pub struct MockTransport {
    requests: Mutex<Vec<HttpRequest>>,
    responder: Responder,
}

impl MockTransport {
    pub fn new(responder: impl Fn(&HttpRequest) -> Result<HttpResponse, TransportError> + Send + Sync + 'static) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            responder: Box::new(responder),
        })
    }

    /// Always answers with the same status and body
    pub fn fixed(status: u16, body: &str) -> Arc<Self> {
        let body = body.to_string();
        Self::new(move |_| Ok(HttpResponse::new(status, body.clone())))
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// `METHOD url` lines, in send order
    pub fn calls(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| format!("{} {}", r.method, r.url))
            .collect()
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let response = (self.responder)(&request);
        self.requests.lock().unwrap().push(request);
        response
    }
}

pub const BASE_URL: &str = "https://crm.test/api/v1/";

pub fn session() -> AuthSession {
    AuthSession {
        token: "tok-123".into(),
        expires_at: None,
        user_id: 8,
        username: "admin".into(),
        fio: Some("Admin A. A.".into()),
    }
}

/// Gateway over `transport` with a signed-in memory store
pub fn gateway(transport: Arc<MockTransport>) -> (ApiGateway, Arc<MemoryCredentials>) {
    let credentials = Arc::new(MemoryCredentials::with_session(session()));
    let gateway = ApiGateway::new(
        ClientConfig::new(BASE_URL).unwrap(),
        transport,
        credentials.clone(),
    );
    (gateway, credentials)
}
