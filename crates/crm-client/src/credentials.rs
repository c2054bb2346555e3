//! Credential Store
//!
//! The bearer token is read through an explicit store handed to the gateway,
//! never from ambient global state.

use std::sync::Mutex;

use crate::models::AuthSession;

pub trait CredentialStore: Send + Sync {
    /// Token to attach as `Authorization: Bearer <token>`
    fn token(&self) -> Option<String>;
    /// Session saved at login
    fn session(&self) -> Option<AuthSession>;
    fn save(&self, session: &AuthSession);
    fn clear(&self);

    fn is_authenticated(&self) -> bool {
        self.token().is_some_and(|token| !token.is_empty())
    }
}

/// In-memory store; the browser build persists to local storage instead.
#[derive(Debug, Default)]
pub struct MemoryCredentials {
    session: Mutex<Option<AuthSession>>,
}

impl MemoryCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: AuthSession) -> Self {
        Self {
            session: Mutex::new(Some(session)),
        }
    }
}

impl CredentialStore for MemoryCredentials {
    fn token(&self) -> Option<String> {
        self.session().map(|session| session.token)
    }

    fn session(&self) -> Option<AuthSession> {
        self.session
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn save(&self, session: &AuthSession) {
        *self.session.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(session.clone());
    }

    fn clear(&self) {
        *self.session.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
    }
}
