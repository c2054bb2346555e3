//! Reports Page

use leptos::prelude::*;

use super::use_url_pagination;
use crate::components::{ExpiredTasksTable, ReportCommandPanel};
use crate::context::use_app_context;

#[component]
pub fn ReportsPage() -> impl IntoView {
    let (params, on_params_change) = use_url_pagination(use_app_context());

    view! {
        <section class="page reports-page">
            <h2>"Expired tasks"</h2>
            <ReportCommandPanel />
            <ExpiredTasksTable params=params on_params_change=on_params_change />
        </section>
    }
}
