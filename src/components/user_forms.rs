//! User Add / Edit Forms

use crm_client::forms::{field, FieldErrors, UserForm};
use crm_client::route::Route;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::form_field::FormField;
use crate::context::use_app_context;
use crate::store::{store_notify, store_notify_error, use_app_store, NoticeLevel};

/// Inputs bound to a `UserForm`
#[component]
pub fn UserFormFields(
    form: RwSignal<UserForm>,
    #[prop(into)] errors: Signal<FieldErrors>,
    /// Label hint for the password row
    password_label: &'static str,
) -> impl IntoView {
    view! {
        <FormField
            label="Login"
            field=field::NAME
            errors=errors
            value=Signal::derive(move || form.with(|f| f.name.clone()))
            on_input=move |v: String| form.update(|f| f.name = v)
        />
        <FormField
            label="FIO"
            field=field::FIO
            errors=errors
            value=Signal::derive(move || form.with(|f| f.fio.clone()))
            on_input=move |v: String| form.update(|f| f.fio = v)
        />
        <FormField
            label="Position"
            field=field::POSITION
            errors=errors
            value=Signal::derive(move || form.with(|f| f.position.clone()))
            on_input=move |v: String| form.update(|f| f.position = v)
        />
        <FormField
            label=password_label
            field=field::PASSWORD
            input_type="password"
            errors=errors
            value=Signal::derive(move || form.with(|f| f.password.clone()))
            on_input=move |v: String| form.update(|f| f.password = v)
        />
    }
}

#[component]
pub fn UserAddForm() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let form = RwSignal::new(UserForm::default());
    let errors = RwSignal::new(FieldErrors::new());
    let (saving, set_saving) = signal(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let user = match form.get_untracked().validate_new() {
            Ok(user) => user,
            Err(invalid) => {
                errors.set(invalid);
                return;
            }
        };
        errors.set(FieldErrors::new());
        let api = ctx.api();
        set_saving.set(true);
        spawn_local(async move {
            let response = api.users.create(&user).await;
            set_saving.set(false);
            match response.error() {
                None => {
                    log::info!("[UserAddForm] created user {}", user.name);
                    store_notify(&store, NoticeLevel::Info, "User created");
                    ctx.navigate(&Route::Users);
                }
                Some(err) => store_notify_error(&store, &err),
            }
        });
    };

    view! {
        <form class="entity-form user-form" on:submit=submit>
            <h2>"New user"</h2>
            <UserFormFields form=form errors=errors password_label="Password" />
            <div class="form-actions">
                <button type="submit" disabled=move || saving.get()>"Save"</button>
                <button type="button" on:click=move |_| ctx.navigate(&Route::Users)>"Cancel"</button>
            </div>
        </form>
    }
}

#[component]
pub fn UserEditForm(id: u32) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let form = RwSignal::new(UserForm::default());
    let errors = RwSignal::new(FieldErrors::new());
    let (loaded, set_loaded) = signal(false);
    let (load_error, set_load_error) = signal(None::<String>);
    let (saving, set_saving) = signal(false);

    Effect::new(move |_| {
        let api = ctx.api();
        spawn_local(async move {
            match api.users.get_by_id(id).await.into_result() {
                Ok(Some(user)) => {
                    form.set(UserForm::from_user(&user));
                    set_loaded.set(true);
                }
                Ok(None) => set_load_error.set(Some(format!("User #{} not found", id))),
                Err(err) => {
                    store_notify_error(&store, &err);
                    set_load_error.set(Some(err.message));
                }
            }
        });
    });

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let update = match form.get_untracked().validate_update(id) {
            Ok(update) => update,
            Err(invalid) => {
                errors.set(invalid);
                return;
            }
        };
        errors.set(FieldErrors::new());
        let api = ctx.api();
        set_saving.set(true);
        spawn_local(async move {
            let response = api.users.update(id, &update).await;
            set_saving.set(false);
            match response.error() {
                None => {
                    log::info!("[UserEditForm] updated user {}", id);
                    store_notify(&store, NoticeLevel::Info, "User saved");
                    ctx.navigate(&Route::Users);
                }
                Some(err) => store_notify_error(&store, &err),
            }
        });
    };

    view! {
        <div class="user-edit">
            {move || load_error.get().map(|message| view! { <div class="form-error">{message}</div> })}
            <Show when=move || loaded.get() fallback=move || view! { <div class="loading">"Loading..."</div> }>
                <form class="entity-form user-form" on:submit=submit>
                    <h2>{format!("User #{}", id)}</h2>
                    <UserFormFields form=form errors=errors password_label="New password (leave blank to keep)" />
                    <div class="form-actions">
                        <button type="submit" disabled=move || saving.get()>"Save"</button>
                        <button type="button" on:click=move |_| ctx.navigate(&Route::Users)>"Cancel"</button>
                    </div>
                </form>
            </Show>
        </div>
    }
}
