//! Local Storage Credentials
//!
//! Token and session blob live under `auth_token` / `user_info`.

use crm_client::config::{TOKEN_KEY, USER_INFO_KEY};
use crm_client::models::AuthSession;
use crm_client::CredentialStore;
use web_sys::Storage;

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageCredentials;

fn storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

impl CredentialStore for LocalStorageCredentials {
    fn token(&self) -> Option<String> {
        storage()?.get_item(TOKEN_KEY).ok().flatten()
    }

    fn session(&self) -> Option<AuthSession> {
        let raw = storage()?.get_item(USER_INFO_KEY).ok().flatten()?;
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(err) => {
                log::warn!("[storage] discarding unreadable {}: {}", USER_INFO_KEY, err);
                None
            }
        }
    }

    fn save(&self, session: &AuthSession) {
        let Some(storage) = storage() else {
            log::error!("[storage] local storage unavailable, session not saved");
            return;
        };
        let _ = storage.set_item(TOKEN_KEY, &session.token);
        match serde_json::to_string(session) {
            Ok(raw) => {
                let _ = storage.set_item(USER_INFO_KEY, &raw);
            }
            Err(err) => log::error!("[storage] cannot serialize session: {}", err),
        }
    }

    fn clear(&self) {
        if let Some(storage) = storage() {
            let _ = storage.remove_item(TOKEN_KEY);
            let _ = storage.remove_item(USER_INFO_KEY);
        }
    }
}
