//! Tasks Page

use crm_client::route::Route;
use crm_client::selection::Selection;
use leptos::prelude::*;

use super::use_url_pagination;
use crate::components::{TaskCommandPanel, TaskTable};
use crate::context::use_app_context;
use crate::store::{store_user_id, use_app_store};

#[component]
pub fn TasksPage(
    /// Whose tasks; everyone's when unset
    owner: Option<u32>,
) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let (params, on_params_change) = use_url_pagination(ctx);
    let (selection, set_selection) = signal(Selection::new());

    let on_add = move |_: ()| {
        let Some(user_id) = owner.or_else(|| store_user_id(&store)) else {
            return;
        };
        ctx.navigate(&Route::TaskNew { user_id });
    };
    let on_edit = move |_: ()| {
        if let Some(id) = selection.with_untracked(Selection::single) {
            ctx.navigate(&Route::TaskEdit { id });
        }
    };
    let on_delete = move |_: ()| {
        let ids = selection.with_untracked(Selection::ids);
        if !ids.is_empty() {
            ctx.navigate(&Route::TaskDelete { ids });
        }
    };

    view! {
        <section class="page tasks-page">
            <h2>{match owner {
                Some(user_id) => format!("Tasks of user #{}", user_id),
                None => "All tasks".to_string(),
            }}</h2>
            <TaskCommandPanel selection=selection on_add=on_add on_edit=on_edit on_delete=on_delete />
            <TaskTable
                owner=owner
                params=params
                on_params_change=on_params_change
                on_selection_change=move |s: Selection| set_selection.set(s)
            />
        </section>
    }
}
