//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use crm_client::models::AuthSession;
use crm_client::ApiError;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

/// How long a toast stays up
const NOTICE_TTL_MS: u32 = 6_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Toast shown in the corner of the shell
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub id: u32,
    pub level: NoticeLevel,
    pub text: String,
}

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Signed-in user, mirrored from the credential store
    pub session: Option<AuthSession>,
    /// Visible toasts, oldest first
    pub notices: Vec<Notice>,
    /// Id for the next toast
    pub next_notice_id: u32,
}

impl AppState {
    pub fn new(session: Option<AuthSession>) -> Self {
        Self {
            session,
            ..Default::default()
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

pub fn store_set_session(store: &AppStore, session: Option<AuthSession>) {
    *store.session().write() = session;
}

/// Id of the signed-in user, if any
pub fn store_user_id(store: &AppStore) -> Option<u32> {
    store.session().read_untracked().as_ref().map(|s| s.user_id)
}

/// Show a toast that dismisses itself after a few seconds
pub fn store_notify(store: &AppStore, level: NoticeLevel, text: impl Into<String>) {
    let id = {
        let next_field = store.next_notice_id();
        let mut next = next_field.write();
        *next += 1;
        *next
    };
    store.notices().write().push(Notice {
        id,
        level,
        text: text.into(),
    });
    let store = *store;
    spawn_local(async move {
        TimeoutFuture::new(NOTICE_TTL_MS).await;
        store_dismiss(&store, id);
    });
}

pub fn store_notify_error(store: &AppStore, err: &ApiError) {
    store_notify(store, NoticeLevel::Error, err.message.clone());
}

pub fn store_dismiss(store: &AppStore, id: u32) {
    store.notices().write().retain(|notice| notice.id != id);
}
