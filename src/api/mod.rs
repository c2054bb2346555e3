//! API Handles
//!
//! Resource clients wired to the browser: gloo-net transport, local storage
//! credentials, and a hook fired when the server rejects the session.

mod files;
mod storage;
mod transport;

pub use files::read_attachment;
pub use storage::LocalStorageCredentials;
pub use transport::GlooTransport;

use std::sync::Arc;

use crm_client::{ApiGateway, AuthClient, ClientConfig, CommentClient, ReportClient, TaskClient, UserClient};

/// All resource clients over one gateway
#[derive(Debug, Clone)]
pub struct Api {
    pub tasks: TaskClient,
    pub users: UserClient,
    pub comments: CommentClient,
    pub reports: ReportClient,
    pub auth: AuthClient,
}

impl Api {
    pub fn new(on_session_invalidated: impl Fn() + Send + Sync + 'static) -> Self {
        let config = ClientConfig::from_env();
        log::info!("[api] base url {}", config.base_url);
        let gateway = ApiGateway::new(config, Arc::new(GlooTransport), Arc::new(LocalStorageCredentials))
            .on_session_invalidated(on_session_invalidated);
        Self {
            tasks: TaskClient::new(gateway.clone()),
            users: UserClient::new(gateway.clone()),
            comments: CommentClient::new(gateway.clone()),
            reports: ReportClient::new(gateway.clone()),
            auth: AuthClient::new(gateway),
        }
    }
}
