//! Task Add Form
//!
//! Also provides the field set shared with the edit form.

use chrono::Utc;
use crm_client::forms::{field, FieldErrors, TaskForm};
use crm_client::route::Route;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::form_field::FormField;
use crate::context::use_app_context;
use crate::store::{store_notify, store_notify_error, use_app_store, NoticeLevel};

/// Inputs bound to a `TaskForm`
#[component]
pub fn TaskFormFields(form: RwSignal<TaskForm>, #[prop(into)] errors: Signal<FieldErrors>) -> impl IntoView {
    view! {
        <FormField
            label="Name"
            field=field::NAME
            errors=errors
            value=Signal::derive(move || form.with(|f| f.name.clone()))
            on_input=move |v: String| form.update(|f| f.name = v)
        />
        <FormField
            label="Details"
            field=field::DETAILS
            multiline=true
            errors=errors
            value=Signal::derive(move || form.with(|f| f.details.clone()))
            on_input=move |v: String| form.update(|f| f.details = v)
        />
        <FormField
            label="Done, %"
            field=field::PERCENT
            input_type="number"
            errors=errors
            value=Signal::derive(move || form.with(|f| f.percent.clone()))
            on_input=move |v: String| form.update(|f| f.percent = v)
        />
        <FormField
            label="Start date"
            field=field::START_DATE
            input_type="date"
            errors=errors
            value=Signal::derive(move || form.with(|f| f.start_date.clone()))
            on_input=move |v: String| form.update(|f| f.start_date = v)
        />
        <FormField
            label="Deadline"
            field=field::EXPIRED_AT
            input_type="date"
            errors=errors
            value=Signal::derive(move || form.with(|f| f.expired_at.clone()))
            on_input=move |v: String| form.update(|f| f.expired_at = v)
        />
        <FormField
            label="Completed on"
            field=field::COMPLETED_AT
            input_type="date"
            errors=errors
            value=Signal::derive(move || form.with(|f| f.completed_at.clone()))
            on_input=move |v: String| form.update(|f| f.completed_at = v)
        />
    }
}

#[component]
pub fn TaskAddForm(user_id: u32) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let form = RwSignal::new(TaskForm::for_new(Utc::now().date_naive()));
    let errors = RwSignal::new(FieldErrors::new());
    let (saving, set_saving) = signal(false);
    let back = Route::UserTasks { user_id };

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let fields = match form.get_untracked().validate() {
            Ok(fields) => fields,
            Err(invalid) => {
                errors.set(invalid);
                return;
            }
        };
        errors.set(FieldErrors::new());
        let task = fields.into_new_task(user_id);
        let api = ctx.api();
        set_saving.set(true);
        spawn_local(async move {
            let response = api.tasks.create(&task).await;
            set_saving.set(false);
            match response.error() {
                None => {
                    log::info!("[TaskAddForm] created task for user {}", user_id);
                    store_notify(&store, NoticeLevel::Info, "Task created");
                    ctx.navigate(&Route::UserTasks { user_id });
                }
                Some(err) => store_notify_error(&store, &err),
            }
        });
    };

    view! {
        <form class="entity-form task-form" on:submit=submit>
            <h2>"New task"</h2>
            <TaskFormFields form=form errors=errors />
            <div class="form-actions">
                <button type="submit" disabled=move || saving.get()>"Save"</button>
                <button type="button" on:click=move |_| ctx.navigate(&back)>"Cancel"</button>
            </div>
        </form>
    }
}
