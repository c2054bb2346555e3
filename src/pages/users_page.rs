//! Users Page

use crm_client::route::Route;
use crm_client::selection::Selection;
use leptos::prelude::*;

use super::use_url_pagination;
use crate::components::{UserCommandPanel, UserTable};
use crate::context::use_app_context;

#[component]
pub fn UsersPage() -> impl IntoView {
    let ctx = use_app_context();
    let (params, on_params_change) = use_url_pagination(ctx);
    let (selection, set_selection) = signal(Selection::new());
    let (search, set_search) = signal(String::new());

    let on_edit = move |_: ()| {
        if let Some(id) = selection.with_untracked(Selection::single) {
            ctx.navigate(&Route::UserEdit { id });
        }
    };
    let on_delete = move |_: ()| {
        let ids = selection.with_untracked(Selection::ids);
        if !ids.is_empty() {
            ctx.navigate(&Route::UserDelete { ids });
        }
    };
    let on_tasks = move |_: ()| {
        if let Some(user_id) = selection.with_untracked(Selection::single) {
            ctx.navigate(&Route::UserTasks { user_id });
        }
    };

    view! {
        <section class="page users-page">
            <h2>"Users"</h2>
            <UserCommandPanel
                selection=selection
                search=search
                on_search=move |text: String| {
                    set_search.set(text);
                    let first = params.get_untracked().restart();
                    on_params_change.run(first);
                }
                on_add=move |_: ()| ctx.navigate(&Route::UserNew)
                on_edit=on_edit
                on_delete=on_delete
                on_tasks=on_tasks
            />
            <UserTable
                params=params
                filter=search
                on_params_change=on_params_change
                on_selection_change=move |s: Selection| set_selection.set(s)
            />
        </section>
    }
}
