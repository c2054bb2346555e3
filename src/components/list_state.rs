//! List State
//!
//! Page loading and row selection shared by the list views. Each load takes a
//! generation ticket; a response that arrives after a newer request started is
//! dropped.

use std::future::Future;

use crm_client::fetch::{Generation, ListPage, LoadState};
use crm_client::selection::Selection;
use crm_client::ApiResponse;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::Api;
use crate::context::use_app_context;
use crate::store::{store_notify_error, use_app_store};

pub fn use_list<T, K, Fut>(
    label: &'static str,
    key: impl Fn() -> K + 'static,
    fetch: impl Fn(Api, K) -> Fut + 'static,
) -> ReadSignal<LoadState<ListPage<T>>>
where
    T: Clone + Send + Sync + 'static,
    K: 'static,
    Fut: Future<Output = ApiResponse<Vec<T>>> + 'static,
{
    let ctx = use_app_context();
    let store = use_app_store();
    let (state, set_state) = signal(LoadState::<ListPage<T>>::Idle);
    let generation = RwSignal::new(Generation::new());

    Effect::new(move |_| {
        let key = key();
        let mut current = generation.get_untracked();
        let ticket = current.begin();
        generation.set(current);
        set_state.set(LoadState::Loading);

        let request = fetch(ctx.api(), key);
        spawn_local(async move {
            let response = request.await;
            let Some(latest) = generation.try_get_untracked() else {
                return;
            };
            if !latest.is_current(ticket) {
                log::debug!("[{}] dropping stale response", label);
                return;
            }
            match ListPage::from_response(response) {
                Ok(page) => {
                    log::info!("[{}] loaded {} of {} rows", label, page.rows.len(), page.total_count);
                    set_state.set(LoadState::Loaded(page));
                }
                Err(err) => {
                    log::error!("[{}] load failed: {}", label, err);
                    store_notify_error(&store, &err);
                    set_state.set(LoadState::Failed(err));
                }
            }
        });
    });

    state
}

/// Selected row ids, kept across page changes. Every change is reported.
pub fn use_row_selection(on_selection_change: Callback<Selection>) -> (RwSignal<Selection>, impl Fn(u32, bool) + Copy) {
    let selection = RwSignal::new(Selection::new());
    let toggle = move |id: u32, checked: bool| {
        let mut changed = false;
        selection.update(|s| changed = s.set(id, checked));
        if changed {
            on_selection_change.run(selection.get_untracked());
        }
    };
    (selection, toggle)
}

/// Rows of the loaded page, empty otherwise
pub fn loaded_rows<T: Clone + Send + Sync + 'static>(state: ReadSignal<LoadState<ListPage<T>>>) -> Signal<Vec<T>> {
    Signal::derive(move || state.with(|s| s.loaded().map(|page| page.rows.clone()).unwrap_or_default()))
}

pub fn loaded_total<T: Clone + Send + Sync + 'static>(state: ReadSignal<LoadState<ListPage<T>>>) -> Signal<u32> {
    Signal::derive(move || state.with(|s| s.loaded().map(|page| page.total_count).unwrap_or(0)))
}

/// Loading / error / empty lines under a table
#[component]
pub fn ListStatus<T: Clone + Send + Sync + 'static>(
    state: ReadSignal<LoadState<ListPage<T>>>,
    empty_text: &'static str,
) -> impl IntoView {
    view! {
        {move || state.with(|s| match s {
            LoadState::Idle => ().into_any(),
            LoadState::Loading => view! { <div class="loading">"Loading..."</div> }.into_any(),
            LoadState::Failed(err) => view! { <div class="list-error">{err.message.clone()}</div> }.into_any(),
            LoadState::Loaded(page) if page.rows.is_empty() => view! { <div class="list-empty">{empty_text}</div> }.into_any(),
            LoadState::Loaded(_) => ().into_any(),
        })}
    }
}
