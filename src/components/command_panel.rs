//! Command Panels
//!
//! Button rows above the list views. Buttons are enabled from the current
//! selection; the panels never act on their own.

use crm_client::selection::{CommandAvailability, Selection};
use leptos::prelude::*;

use crate::routing;

#[component]
pub fn TaskCommandPanel(
    #[prop(into)] selection: Signal<Selection>,
    #[prop(into)] on_add: Callback<()>,
    #[prop(into)] on_edit: Callback<()>,
    #[prop(into)] on_delete: Callback<()>,
) -> impl IntoView {
    let available = move || CommandAvailability::from_selection(&selection.get());

    view! {
        <div class="command-panel">
            <button class="cmd add" on:click=move |_| on_add.run(())>"Add"</button>
            <button class="cmd edit" disabled=move || !available().edit on:click=move |_| on_edit.run(())>
                "Edit"
            </button>
            <button class="cmd delete" disabled=move || !available().delete on:click=move |_| on_delete.run(())>
                "Delete"
            </button>
        </div>
    }
}

#[component]
pub fn UserCommandPanel(
    #[prop(into)] selection: Signal<Selection>,
    #[prop(into)] search: Signal<String>,
    #[prop(into)] on_search: Callback<String>,
    #[prop(into)] on_add: Callback<()>,
    #[prop(into)] on_edit: Callback<()>,
    #[prop(into)] on_delete: Callback<()>,
    #[prop(into)] on_tasks: Callback<()>,
) -> impl IntoView {
    let available = move || CommandAvailability::from_selection(&selection.get());

    view! {
        <div class="command-panel">
            <button class="cmd add" on:click=move |_| on_add.run(())>"Add"</button>
            <button class="cmd edit" disabled=move || !available().edit on:click=move |_| on_edit.run(())>
                "Edit"
            </button>
            <button class="cmd delete" disabled=move || !available().delete on:click=move |_| on_delete.run(())>
                "Delete"
            </button>
            <button class="cmd tasks" disabled=move || !available().tasks on:click=move |_| on_tasks.run(())>
                "Tasks"
            </button>
            <input
                class="search"
                type="search"
                placeholder="Search by FIO..."
                prop:value=move || search.get()
                on:input=move |ev| on_search.run(event_target_value(&ev))
            />
        </div>
    }
}

#[component]
pub fn ReportCommandPanel() -> impl IntoView {
    view! {
        <div class="command-panel">
            <button class="cmd print" on:click=move |_| routing::print()>"Print"</button>
        </div>
    }
}
