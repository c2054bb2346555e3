//! User Table
//!
//! Employees with their task statistics, filtered by FIO.

use crm_client::models::UserTaskSummary;
use crm_client::selection::Selection;
use crm_client::PaginationParams;
use leptos::prelude::*;

use super::list_state::{loaded_rows, loaded_total, use_list, use_row_selection, ListStatus};
use super::pager::{Pager, SortHeader};
use crate::api::Api;

#[component]
pub fn UserTable(
    #[prop(into)] params: Signal<PaginationParams>,
    /// FIO search text; blank means no filter
    #[prop(into)]
    filter: Signal<String>,
    #[prop(into)] on_params_change: Callback<PaginationParams>,
    #[prop(into)] on_selection_change: Callback<Selection>,
) -> impl IntoView {
    let state = use_list(
        "UserTable",
        move || (params.get(), filter.get()),
        |api: Api, (params, fio): (PaginationParams, String)| async move {
            api.users.get_all(&params, Some(fio.as_str())).await
        },
    );
    let (selection, toggle) = use_row_selection(on_selection_change);

    let rows = loaded_rows(state);
    let total = loaded_total(state);

    view! {
        <div class="list-view user-table">
            <table class="data-table">
                <thead>
                    <tr>
                        <th class="select-col"></th>
                        <th>"#"</th>
                        <SortHeader label="Login" field="name" params=params on_params_change=on_params_change />
                        <SortHeader label="FIO" field="fio" params=params on_params_change=on_params_change />
                        <SortHeader label="Position" field="position" params=params on_params_change=on_params_change />
                        <SortHeader label="Tasks" field="taskItemCount" params=params on_params_change=on_params_change />
                        <SortHeader label="Completed" field="completedPercent" params=params on_params_change=on_params_change />
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || rows.get()
                        key=|user: &UserTaskSummary| user.user_id
                        children=move |user: UserTaskSummary| {
                            let id = user.user_id;
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
                                    <td>{user.user_name}</td>
                                    <td>{user.fio}</td>
                                    <td>{user.position}</td>
                                    <td>{user.task_item_count}</td>
                                    <td>{format!("{:.1}%", user.completed_percent)}</td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
            <ListStatus state=state empty_text="No users with tasks" />
            <Pager params=params total_count=total on_params_change=on_params_change />
        </div>
    }
}
