//! Delete Confirmation
//!
//! Fetches every target to show what is about to go, then deletes them one
//! by one once confirmed.

use crm_client::route::Route;
use crm_client::ApiError;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::Api;
use crate::context::use_app_context;
use crate::store::{store_notify, store_notify_error, use_app_store, NoticeLevel};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteTarget {
    Tasks(Vec<u32>),
    Users(Vec<u32>),
}

impl DeleteTarget {
    fn ids(&self) -> &[u32] {
        match self {
            DeleteTarget::Tasks(ids) | DeleteTarget::Users(ids) => ids,
        }
    }

    fn noun(&self) -> &'static str {
        match (self, self.ids().len()) {
            (DeleteTarget::Tasks(_), 1) => "task",
            (DeleteTarget::Tasks(_), _) => "tasks",
            (DeleteTarget::Users(_), 1) => "user",
            (DeleteTarget::Users(_), _) => "users",
        }
    }

    /// Summary line and, for tasks, the owning user
    async fn describe(&self, api: &Api, id: u32) -> Result<(String, Option<u32>), ApiError> {
        match self {
            DeleteTarget::Tasks(_) => Ok(match api.tasks.get_by_id(id).await.into_result()? {
                Some(task) => (task.summary(), Some(task.user_id)),
                None => (format!("Task #{} (not found)", id), None),
            }),
            DeleteTarget::Users(_) => Ok(match api.users.get_by_id(id).await.into_result()? {
                Some(user) => (user.summary(), None),
                None => (format!("User #{} (not found)", id), None),
            }),
        }
    }

    async fn delete(&self, api: &Api, id: u32) -> Result<(), ApiError> {
        let response = match self {
            DeleteTarget::Tasks(_) => api.tasks.delete(id).await,
            DeleteTarget::Users(_) => api.users.delete(id).await,
        };
        response.into_result().map(|_| ())
    }
}

#[component]
pub fn DeleteConfirmation(target: DeleteTarget) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let summaries = RwSignal::new(Vec::<String>::new());
    let owner = RwSignal::new(None::<u32>);
    let (loading, set_loading) = signal(true);
    let (deleting, set_deleting) = signal(false);
    let heading = format!("Delete {} {}?", target.ids().len(), target.noun());

    let load_target = target.clone();
    Effect::new(move |_| {
        let target = load_target.clone();
        let api = ctx.api();
        spawn_local(async move {
            let mut lines = Vec::new();
            for &id in target.ids() {
                match target.describe(&api, id).await {
                    Ok((summary, user_id)) => {
                        if owner.get_untracked().is_none() {
                            owner.set(user_id);
                        }
                        lines.push(summary);
                    }
                    Err(err) => {
                        store_notify_error(&store, &err);
                        lines.push(format!("#{}: {}", id, err.message));
                    }
                }
            }
            summaries.set(lines);
            set_loading.set(false);
        });
    });

    let is_tasks = matches!(target, DeleteTarget::Tasks(_));
    let back = move || match (is_tasks, owner.get_untracked()) {
        (true, Some(user_id)) => Route::UserTasks { user_id },
        (true, None) => Route::Tasks,
        (false, _) => Route::Users,
    };

    let confirm = move |_| {
        let target = target.clone();
        let api = ctx.api();
        set_deleting.set(true);
        spawn_local(async move {
            let mut failed = 0;
            for &id in target.ids() {
                if let Err(err) = target.delete(&api, id).await {
                    log::error!("[DeleteConfirmation] #{} not deleted: {}", id, err);
                    store_notify_error(&store, &err);
                    failed += 1;
                }
            }
            set_deleting.set(false);
            if failed == 0 {
                log::info!("[DeleteConfirmation] deleted {} {}", target.ids().len(), target.noun());
                store_notify(&store, NoticeLevel::Info, "Deleted");
                ctx.navigate(&back());
            }
        });
    };

    view! {
        <div class="delete-confirmation">
            <h2>{heading}</h2>
            <Show when=move || !loading.get() fallback=move || view! { <div class="loading">"Loading..."</div> }>
                <ul class="delete-summary">
                    {move || summaries.get().into_iter().map(|line| view! { <li>{line}</li> }).collect_view()}
                </ul>
            </Show>
            <div class="form-actions">
                <button class="danger" disabled=move || loading.get() || deleting.get() on:click=confirm>
                    "Delete"
                </button>
                <button type="button" on:click=move |_| ctx.navigate(&back())>"Cancel"</button>
            </div>
        </div>
    }
}
