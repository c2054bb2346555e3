//! Shell Layout
//!
//! Header with navigation and the signed-in user, page body, footer.

use crm_client::route::Route;
use leptos::prelude::*;

use crate::context::use_app_context;
use crate::store::{store_set_session, use_app_store, AppStateStoreFields};

/// In-app link that pushes a history entry instead of reloading
#[component]
fn NavLink(route: Route, label: &'static str, active: Signal<bool>) -> impl IntoView {
    let ctx = use_app_context();
    let href = route.to_path();

    view! {
        <a
            href=href
            class="nav-link"
            class:active=move || active.get()
            on:click=move |ev| {
                ev.prevent_default();
                ctx.navigate(&route);
            }
        >
            {label}
        </a>
    }
}

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let signed_in = move || store.session().read().is_some();
    let user_label = move || {
        store.session().read().as_ref().map(|s| match s.fio.as_deref().filter(|f| !f.is_empty()) {
            Some(fio) => format!("{} ({})", fio, s.username),
            None => s.username.clone(),
        })
    };

    let logout = move |_| {
        ctx.api().auth.logout();
        store_set_session(&store, None);
        ctx.navigate(&Route::Login);
    };

    view! {
        <div class="app-layout">
            <header class="app-header">
                <h1 class="app-title">"Mini CRM"</h1>
                <Show when=signed_in>
                    <nav class="app-nav">
                        <NavLink
                            route=Route::Tasks
                            label="Tasks"
                            active=Signal::derive(move || ctx.route().is_tasks_section())
                        />
                        <NavLink
                            route=Route::Users
                            label="Users"
                            active=Signal::derive(move || ctx.route().is_users_section())
                        />
                        <NavLink
                            route=Route::ExpiredTasksReport
                            label="Expired tasks"
                            active=Signal::derive(move || ctx.route() == Route::ExpiredTasksReport)
                        />
                    </nav>
                    <div class="app-user">
                        <span class="user-name">{user_label}</span>
                        <button class="logout" on:click=logout>"Log out"</button>
                    </div>
                </Show>
            </header>
            <main class="app-main">{children()}</main>
            <footer class="app-footer">"Mini CRM"</footer>
        </div>
    }
}
