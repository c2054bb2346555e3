//! Page Controllers
//!
//! Top-level views per route. List pages own their pagination through the
//! URL query; the tables below them only report changes.

mod login_page;
mod reports_page;
mod tasks_page;
mod users_page;

pub use login_page::LoginPage;
pub use reports_page::ReportsPage;
pub use tasks_page::TasksPage;
pub use users_page::UsersPage;

use crm_client::query;
use crm_client::route::Route;
use crm_client::PaginationParams;
use leptos::prelude::*;

use crate::context::{use_app_context, AppContext};

/// Pagination read from the current query, and a writer that replaces the
/// query (no new history entry) with the encoded parameters.
pub fn use_url_pagination(ctx: AppContext) -> (Memo<PaginationParams>, Callback<PaginationParams>) {
    let params = Memo::new(move |_| ctx.location.with(|url| query::decode(&url.query)));
    let on_change = Callback::new(move |next: PaginationParams| {
        log::debug!("[pagination] {:?}", next);
        ctx.replace_query(&query::encode(&next));
    });
    (params, on_change)
}

#[component]
pub fn NotFound() -> impl IntoView {
    let ctx = use_app_context();
    view! {
        <div class="not-found">
            <h2>"Page not found"</h2>
            <button on:click=move |_| ctx.navigate(&Route::Tasks)>"Back to tasks"</button>
        </div>
    }
}
