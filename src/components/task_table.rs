//! Task Table
//!
//! Tasks of one user, or of everyone, one page at a time.

use crm_client::models::Task;
use crm_client::selection::Selection;
use crm_client::timestamp;
use crm_client::PaginationParams;
use leptos::prelude::*;

use super::list_state::{loaded_rows, loaded_total, use_list, use_row_selection, ListStatus};
use super::pager::{Pager, SortHeader};
use crate::api::Api;

#[component]
pub fn TaskTable(
    /// Only this user's tasks when set
    owner: Option<u32>,
    #[prop(into)] params: Signal<PaginationParams>,
    #[prop(into)] on_params_change: Callback<PaginationParams>,
    #[prop(into)] on_selection_change: Callback<Selection>,
) -> impl IntoView {
    let state = use_list(
        "TaskTable",
        move || params.get(),
        move |api: Api, params: PaginationParams| async move {
            match owner {
                Some(user_id) => api.tasks.get_by_user(user_id, &params).await,
                None => api.tasks.get_all(&params).await,
            }
        },
    );
    let (selection, toggle) = use_row_selection(on_selection_change);

    let rows = loaded_rows(state);
    let total = loaded_total(state);

    view! {
        <div class="list-view task-table">
            <table class="data-table">
                <thead>
                    <tr>
                        <th class="select-col"></th>
                        <th>"#"</th>
                        <SortHeader label="Name" field="name" params=params on_params_change=on_params_change />
                        <th>"Details"</th>
                        <SortHeader label="Done, %" field="percent" params=params on_params_change=on_params_change />
                        <SortHeader label="Start" field="startDate" params=params on_params_change=on_params_change />
                        <SortHeader label="Deadline" field="expiredAt" params=params on_params_change=on_params_change />
                        <SortHeader label="Completed" field="completedAt" params=params on_params_change=on_params_change />
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || rows.get()
                        key=|task: &Task| task.id
                        children=move |task: Task| {
                            let id = task.id;
                            let is_selected = move || selection.with(|s| s.contains(id));
                            view! {
                                <tr class:selected=is_selected>
                                    <td class="select-col">
                                        <input
                                            type="checkbox"
                                            prop:checked=is_selected
                                            on:change=move |ev| toggle(id, event_target_checked(&ev))
                                        />
                                    </td>
                                    <td>{id}</td>
                                    <td>{task.name}</td>
                                    <td class="details">{task.details.unwrap_or_default()}</td>
                                    <td>{task.percent.to_string()}</td>
                                    <td>{timestamp::display_date(&task.start_date)}</td>
                                    <td>{task.expired_at.as_ref().map(timestamp::display_date).unwrap_or_default()}</td>
                                    <td>{task.completed_at.as_ref().map(timestamp::display_date).unwrap_or_default()}</td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
            <ListStatus state=state empty_text="No tasks" />
            <Pager params=params total_count=total on_params_change=on_params_change />
        </div>
    }
}
