//! Browser History
//!
//! Route changes push a history entry, list parameter changes replace the
//! current one, back/forward arrive through `popstate`.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Path and query (without `?`) of the current page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageUrl {
    pub path: String,
    pub query: String,
}

impl PageUrl {
    pub fn href(&self) -> String {
        crm_client::route::with_query(&self.path, &self.query)
    }
}

pub fn current() -> PageUrl {
    let Some(window) = web_sys::window() else {
        return PageUrl::default();
    };
    let location = window.location();
    PageUrl {
        path: location.pathname().unwrap_or_default(),
        query: location
            .search()
            .unwrap_or_default()
            .trim_start_matches('?')
            .to_string(),
    }
}

pub fn push(url: &PageUrl) {
    let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
        return;
    };
    if current() == *url {
        return;
    }
    let _ = history.push_state_with_url(&JsValue::NULL, "", Some(&url.href()));
}

pub fn replace(url: &PageUrl) {
    let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
        return;
    };
    let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(&url.href()));
}

/// Install the back/forward listener for the lifetime of the page.
pub fn on_popstate(callback: impl Fn(PageUrl) + 'static) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let handler = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_event| {
        callback(current());
    }));
    let _ = window.add_event_listener_with_callback("popstate", handler.as_ref().unchecked_ref());
    handler.forget();
}

pub fn print() {
    if let Some(window) = web_sys::window() {
        if let Err(err) = window.print() {
            log::error!("[routing] print failed: {:?}", err);
        }
    }
}
