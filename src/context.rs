//! Application Context
//!
//! Current URL and API handles provided via Leptos Context API.

use crm_client::route::Route;
use leptos::prelude::*;

use crate::api::Api;
use crate::routing::{self, PageUrl};

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Current path and query - read
    pub location: ReadSignal<PageUrl>,
    /// Current path and query - write
    set_location: WriteSignal<PageUrl>,
    api: StoredValue<Api>,
}

impl AppContext {
    pub fn new(location: (ReadSignal<PageUrl>, WriteSignal<PageUrl>), api: Api) -> Self {
        Self {
            location: location.0,
            set_location: location.1,
            api: StoredValue::new(api),
        }
    }

    pub fn api(&self) -> Api {
        self.api.get_value()
    }

    pub fn route(&self) -> Route {
        Route::from_path(&self.location.get().path)
    }

    /// Go to a route with a new history entry
    pub fn navigate(&self, route: &Route) {
        let url = PageUrl {
            path: route.to_path(),
            query: String::new(),
        };
        log::debug!("[nav] push {}", url.href());
        routing::push(&url);
        self.set_location.set(url);
    }

    /// Go to a route, replacing the current history entry
    pub fn redirect(&self, route: &Route) {
        let url = PageUrl {
            path: route.to_path(),
            query: String::new(),
        };
        log::debug!("[nav] redirect {}", url.href());
        routing::replace(&url);
        self.set_location.set(url);
    }

    /// Swap the query of the current page without a history entry
    pub fn replace_query(&self, query: &str) {
        let url = PageUrl {
            path: self.location.get_untracked().path,
            query: query.to_string(),
        };
        if url == self.location.get_untracked() {
            return;
        }
        routing::replace(&url);
        self.set_location.set(url);
    }

    /// Sync after back/forward
    pub fn sync(&self, url: PageUrl) {
        self.set_location.set(url);
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
