//! Expired Tasks Report Table

use crm_client::models::ExpiredTask;
use crm_client::timestamp;
use crm_client::PaginationParams;
use leptos::prelude::*;

use super::list_state::{loaded_rows, loaded_total, use_list, ListStatus};
use super::pager::{Pager, SortHeader};
use crate::api::Api;

#[component]
pub fn ExpiredTasksTable(
    #[prop(into)] params: Signal<PaginationParams>,
    #[prop(into)] on_params_change: Callback<PaginationParams>,
) -> impl IntoView {
    let state = use_list(
        "ExpiredTasksTable",
        move || params.get(),
        |api: Api, params: PaginationParams| async move { api.reports.expired_tasks(&params).await },
    );

    let rows = loaded_rows(state);
    let total = loaded_total(state);

    view! {
        <div class="list-view expired-tasks-table">
            <table class="data-table">
                <thead>
                    <tr>
                        <th>"#"</th>
                        <th>"Employee"</th>
                        <SortHeader label="Task" field="name" params=params on_params_change=on_params_change />
                        <SortHeader label="Start" field="startDate" params=params on_params_change=on_params_change />
                        <SortHeader label="Completed" field="completedAt" params=params on_params_change=on_params_change />
                        <SortHeader label="Deadline" field="expiredAt" params=params on_params_change=on_params_change />
                        <SortHeader label="Done, %" field="percent" params=params on_params_change=on_params_change />
                        <SortHeader label="Days overdue" field="expiredDays" params=params on_params_change=on_params_change />
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || rows.get()
                        key=|task: &ExpiredTask| task.id
                        children=move |task: ExpiredTask| {
                            let employee = if task.user.fio.is_empty() { task.user.name.clone() } else { task.user.fio.clone() };
                            view! {
                                <tr class:overdue=task.completed_at.is_none()>
                                    <td>{task.id}</td>
                                    <td>{employee}</td>
                                    <td>{task.name}</td>
                                    <td>{timestamp::display_date(&task.start_date)}</td>
                                    <td>{task.completed_at.as_ref().map(timestamp::display_date).unwrap_or_default()}</td>
                                    <td>{timestamp::display_date(&task.expired_at)}</td>
                                    <td>{task.percent.to_string()}</td>
                                    <td>{task.expired_days}</td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
            <ListStatus state=state empty_text="No expired tasks" />
            <Pager params=params total_count=total on_params_change=on_params_change />
        </div>
    }
}
