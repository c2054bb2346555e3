//! Auth Client
//!
//! Login and registration persist the returned session into the credential store.
//! The server may send the session inside the usual envelope or as a bare
//! object, with the user id either flat (`userId`) or nested (`user.id`).

use serde::Deserialize;

use crate::gateway::ApiGateway;
use crate::models::{AuthSession, LoginRequest, RegisterRequest};
use crate::response::{codes, ApiResponse};

pub const MISSING_SESSION_MESSAGE: &str = "The server did not return a session";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthReply {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    expires_at: Option<String>,
    #[serde(default)]
    user_id: Option<u32>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    fio: Option<String>,
    #[serde(default)]
    user: Option<ReplyUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReplyUser {
    id: u32,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    fio: Option<String>,
}

impl AuthReply {
    fn into_session(self) -> Option<AuthSession> {
        let token = self.token.filter(|t| !t.is_empty())?;
        let user = self.user;
        let user_id = self.user_id.or(user.as_ref().map(|u| u.id))?;
        let username = self
            .username
            .or_else(|| user.as_ref().and_then(|u| u.username.clone().or_else(|| u.name.clone())))
            .unwrap_or_default();
        let fio = self.fio.or_else(|| user.and_then(|u| u.fio));
        Some(AuthSession {
            token,
            expires_at: self.expires_at,
            user_id,
            username,
            fio,
        })
    }
}

#[derive(Debug, Clone)]
pub struct AuthClient {
    gateway: ApiGateway,
}

impl AuthClient {
    pub fn new(gateway: ApiGateway) -> Self {
        Self { gateway }
    }

    pub async fn login(&self, request: &LoginRequest) -> ApiResponse<AuthSession> {
        let reply = self.gateway.post::<AuthReply, _>("user/login", request).await;
        self.accept(reply)
    }

    pub async fn register(&self, request: &RegisterRequest) -> ApiResponse<AuthSession> {
        let reply = self.gateway.post::<AuthReply, _>("user/register", request).await;
        self.accept(reply)
    }

    pub fn logout(&self) {
        log::info!("[auth] logging out");
        self.gateway.credentials().clear();
    }

    pub fn is_authenticated(&self) -> bool {
        self.gateway.credentials().is_authenticated()
    }

    pub fn current_session(&self) -> Option<AuthSession> {
        self.gateway.credentials().session()
    }

    fn accept(&self, reply: ApiResponse<AuthReply>) -> ApiResponse<AuthSession> {
        if let Some(err) = reply.error() {
            return ApiResponse::failure(err.code, err.message);
        }
        match reply.data.and_then(AuthReply::into_session) {
            Some(session) => {
                log::info!("[auth] signed in as {} (#{})", session.username, session.user_id);
                self.gateway.credentials().save(&session);
                ApiResponse::success(session)
            }
            None => {
                log::warn!("[auth] no session in response: {:?}", reply.message);
                ApiResponse::failure(codes::INVALID_RESPONSE, MISSING_SESSION_MESSAGE)
            }
        }
    }
}
