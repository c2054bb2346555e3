//! Mini-CRM Frontend Entry Point

mod api;
mod app;
mod components;
mod context;
mod pages;
mod routing;
mod store;

use app::App;
use leptos::prelude::*;
use log::LevelFilter;

fn main() {
    console_error_panic_hook::set_once();

    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if let Err(err) = rolling_logger::init_logger("MiniCRM", level, rolling_logger::DEFAULT_CAPACITY) {
        web_sys::console::error_1(&format!("logger: {}", err).into());
    }
    log::info!("[main] starting");

    mount_to_body(App);
}
