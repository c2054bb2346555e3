//! Task Edit Form
//!
//! Loads the task and its comment trail, then saves edits together with any
//! audit comments or an uploaded file.

use chrono::Utc;
use crm_client::audit::{build_history, file_attached_note, HistoryEntry, TaskEditSession};
use crm_client::forms::{FieldErrors, TaskForm};
use crm_client::models::Attachment;
use crm_client::route::Route;
use crm_client::timestamp;
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::HtmlInputElement;

use super::task_forms::TaskFormFields;
use crate::api::read_attachment;
use crate::context::use_app_context;
use crate::store::{store_notify, store_notify_error, use_app_store, NoticeLevel};

#[component]
pub fn TaskEditForm(id: u32) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let session = RwSignal::new(None::<TaskEditSession>);
    let form = RwSignal::new(TaskForm::default());
    let errors = RwSignal::new(FieldErrors::new());
    let comment = RwSignal::new(String::new());
    let attachment = RwSignal::new(None::<Attachment>);
    let history = RwSignal::new(Vec::<HistoryEntry>::new());
    let (load_error, set_load_error) = signal(None::<String>);
    let (saving, set_saving) = signal(false);

    // Load task and comments on mount
    Effect::new(move |_| {
        let api = ctx.api();
        spawn_local(async move {
            let task = match api.tasks.get_by_id(id).await.into_result() {
                Ok(Some(task)) => task,
                Ok(None) => {
                    set_load_error.set(Some(format!("Task #{} not found", id)));
                    return;
                }
                Err(err) => {
                    store_notify_error(&store, &err);
                    set_load_error.set(Some(err.message));
                    return;
                }
            };
            let comments = match api.comments.get_by_task(id).await.into_result() {
                Ok(comments) => comments.unwrap_or_default(),
                Err(err) => {
                    log::warn!("[TaskEditForm] comments for task {} unavailable: {}", id, err);
                    Vec::new()
                }
            };
            log::info!("[TaskEditForm] loaded task {} with {} comments", id, comments.len());
            history.set(build_history(&task, &comments));
            form.set(TaskForm::from_task(&task));
            session.set(Some(TaskEditSession::new(task)));
        });
    });

    // Pre-fill the comment box when the percent moves
    let percent = Memo::new(move |_| form.with(|f| f.percent.clone()));
    Effect::new(move |_| {
        percent.track();
        let note = session.with_untracked(|s| {
            s.as_ref()
                .and_then(|s| form.with_untracked(|f| s.suggested_note(f)))
        });
        if let Some(note) = note {
            comment.set(note);
        }
    });

    let on_file = move |ev: web_sys::Event| {
        let input = event_target::<HtmlInputElement>(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            attachment.set(None);
            return;
        };
        spawn_local(async move {
            match read_attachment(&file).await {
                Ok(picked) => {
                    log::info!("[TaskEditForm] picked {} ({:.1} KB)", picked.file_name, picked.size_kb());
                    comment.set(file_attached_note(&picked.file_name));
                    attachment.set(Some(picked));
                }
                Err(message) => {
                    log::error!("[TaskEditForm] {}", message);
                    store_notify(&store, NoticeLevel::Error, message);
                }
            }
        });
    };

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(mut current) = session.get_untracked() else {
            return;
        };
        let plan = match current.plan_save(
            &form.get_untracked(),
            &comment.get_untracked(),
            attachment.get_untracked(),
        ) {
            Ok(plan) => plan,
            Err(invalid) => {
                errors.set(invalid);
                return;
            }
        };
        errors.set(FieldErrors::new());
        let api = ctx.api();
        set_saving.set(true);
        spawn_local(async move {
            let result = current.execute(plan, &api.tasks, &api.comments, Utc::now()).await;
            set_saving.set(false);
            match result {
                Ok(outcome) => {
                    for err in &outcome.comment_errors {
                        store_notify_error(&store, err);
                    }
                    store_notify(&store, NoticeLevel::Info, "Task saved");
                    ctx.navigate(&Route::UserTasks {
                        user_id: outcome.task.user_id,
                    });
                }
                Err(err) => store_notify_error(&store, &err),
            }
        });
    };

    let cancel = move |_| {
        let route = session.with_untracked(|s| match s {
            Some(s) => Route::UserTasks {
                user_id: s.task().user_id,
            },
            None => Route::Tasks,
        });
        ctx.navigate(&route);
    };

    let comments_client = ctx.api().comments;

    view! {
        <div class="task-edit">
            {move || load_error.get().map(|message| view! { <div class="form-error">{message}</div> })}
            <Show
                when=move || session.with(|s| s.is_some())
                fallback=move || view! { <div class="loading">"Loading..."</div> }
            >
                <form class="entity-form task-form" on:submit=submit>
                    <h2>{format!("Task #{}", id)}</h2>
                    <TaskFormFields form=form errors=errors />

                    <label class="form-field">
                        <span class="form-label">"Comment"</span>
                        <textarea
                            name="comment"
                            prop:value=move || comment.get()
                            on:input=move |ev| comment.set(event_target_value(&ev))
                        ></textarea>
                    </label>
                    <label class="form-field">
                        <span class="form-label">"Attach file"</span>
                        <input type="file" name="file" on:change=on_file />
                    </label>

                    <div class="form-actions">
                        <button type="submit" disabled=move || saving.get()>"Save"</button>
                        <button type="button" on:click=cancel>"Cancel"</button>
                    </div>
                </form>
            </Show>

            <section class="task-history">
                <h3>"History"</h3>
                <ul>
                    <For
                        each=move || history.get()
                        key=|entry: &HistoryEntry| entry.comment.as_ref().map(|c| c.id)
                        children=move |entry: HistoryEntry| {
                            let file = entry.comment.filter(|c| c.has_attachment()).map(|c| {
                                let url = comments_client.file_url(c.id);
                                let name = c.file_name.clone().unwrap_or_default();
                                if c.is_image() {
                                    view! { <img class="attachment-preview" src=url alt=name /> }.into_any()
                                } else {
                                    view! { <a class="attachment-link" href=url target="_blank">{name}</a> }.into_any()
                                }
                            });
                            view! {
                                <li>
                                    <span class="history-time">{timestamp::display(&entry.timestamp)}</span>
                                    <span class="history-text">{entry.text}</span>
                                    {file}
                                </li>
                            }
                        }
                    />
                </ul>
            </section>
        </div>
    }
}
