//! Pager and Sortable Headers
//!
//! Both only report a new `PaginationParams` upward; the page owns the value.

use crm_client::{PageWindow, PaginationParams, PAGE_SIZE_OPTIONS};
use leptos::prelude::*;

#[component]
pub fn Pager(
    #[prop(into)] params: Signal<PaginationParams>,
    #[prop(into)] total_count: Signal<u32>,
    #[prop(into)] on_params_change: Callback<PaginationParams>,
) -> impl IntoView {
    let window = move || PageWindow::for_params(&params.get(), total_count.get());

    view! {
        <div class="pager">
            <label class="page-size">
                <select
                    prop:value=move || params.get().page_size.to_string()
                    on:change=move |ev| {
                        if let Ok(size) = event_target_value(&ev).parse::<u32>() {
                            on_params_change.run(params.get_untracked().with_page_size(size));
                        }
                    }
                >
                    {PAGE_SIZE_OPTIONS.iter().map(|size| {
                        let size = *size;
                        view! {
                            <option value=size.to_string() selected=move || params.get().page_size == size>
                                {format!("{} rows", size)}
                            </option>
                        }
                    }).collect_view()}
                </select>
            </label>

            <div class="page-nav">
                <button
                    disabled=move || !window().has_previous()
                    on:click=move |_| {
                        let previous = window().previous();
                        on_params_change.run(params.get_untracked().with_page(previous));
                    }
                >
                    "Previous"
                </button>
                <span class="page-status">
                    {move || {
                        let w = window();
                        format!("Page {} of {}", w.page_number, w.total_pages.max(1))
                    }}
                </span>
                <button
                    disabled=move || !window().has_next()
                    on:click=move |_| {
                        let next = window().next();
                        on_params_change.run(params.get_untracked().with_page(next));
                    }
                >
                    "Next"
                </button>
            </div>

            <span class="page-total">{move || format!("{} total", total_count.get())}</span>
        </div>
    }
}

/// Column header that toggles the sort when clicked
#[component]
pub fn SortHeader(
    label: &'static str,
    field: &'static str,
    #[prop(into)] params: Signal<PaginationParams>,
    #[prop(into)] on_params_change: Callback<PaginationParams>,
) -> impl IntoView {
    view! {
        <th
            class="sortable"
            class:sorted=move || params.get().sort_by == field
            on:click=move |_| on_params_change.run(params.get_untracked().toggle_sort(field))
        >
            {label}
            " "
            {move || params.get().sort_indicator(field)}
        </th>
    }
}
