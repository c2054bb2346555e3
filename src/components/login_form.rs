//! Login Form
//!
//! Sign in, or register a new account. Either way a returned session is
//! stored and the user lands on their own task list.

use crm_client::forms::{self, field, FieldErrors, UserForm};
use crm_client::models::AuthSession;
use crm_client::route::Route;
use crm_client::ApiResponse;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::form_field::FormField;
use super::user_forms::UserFormFields;
use crate::context::use_app_context;
use crate::store::{store_set_session, use_app_store};

#[component]
pub fn LoginForm() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let (registering, set_registering) = signal(false);
    let login = RwSignal::new(forms::LoginForm::default());
    let register = RwSignal::new(UserForm::default());
    let errors = RwSignal::new(FieldErrors::new());
    let (message, set_message) = signal(None::<String>);
    let (busy, set_busy) = signal(false);

    let finish = move |response: ApiResponse<AuthSession>| {
        set_busy.set(false);
        match response.into_result() {
            Ok(Some(session)) => {
                let user_id = session.user_id;
                log::info!("[LoginForm] signed in as {}", session.username);
                store_set_session(&store, Some(session));
                ctx.navigate(&Route::UserTasks { user_id });
            }
            Ok(None) => set_message.set(Some("The server did not return a session".to_string())),
            Err(err) => {
                log::warn!("[LoginForm] rejected: {}", err);
                set_message.set(Some(err.message));
            }
        }
    };

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_message.set(None);
        let auth = ctx.api().auth;
        if registering.get_untracked() {
            match register.get_untracked().validate_register() {
                Ok(request) => {
                    errors.set(FieldErrors::new());
                    set_busy.set(true);
                    spawn_local(async move { finish(auth.register(&request).await) });
                }
                Err(invalid) => errors.set(invalid),
            }
        } else {
            match login.get_untracked().validate() {
                Ok(request) => {
                    errors.set(FieldErrors::new());
                    set_busy.set(true);
                    spawn_local(async move { finish(auth.login(&request).await) });
                }
                Err(invalid) => errors.set(invalid),
            }
        }
    };

    let toggle_mode = move |_| {
        errors.set(FieldErrors::new());
        set_message.set(None);
        set_registering.update(|r| *r = !*r);
    };

    view! {
        <form class="entity-form login-form" on:submit=submit>
            <h2>{move || if registering.get() { "Create account" } else { "Sign in" }}</h2>
            <Show
                when=move || registering.get()
                fallback=move || view! {
                    <FormField
                        label="Login"
                        field=field::USERNAME
                        errors=errors
                        value=Signal::derive(move || login.with(|f| f.username.clone()))
                        on_input=move |v: String| login.update(|f| f.username = v)
                    />
                    <FormField
                        label="Password"
                        field=field::PASSWORD
                        input_type="password"
                        errors=errors
                        value=Signal::derive(move || login.with(|f| f.password.clone()))
                        on_input=move |v: String| login.update(|f| f.password = v)
                    />
                }
            >
                <UserFormFields form=register errors=errors password_label="Password" />
            </Show>
            {move || message.get().map(|text| view! { <div class="form-error">{text}</div> })}
            <div class="form-actions">
                <button type="submit" disabled=move || busy.get()>
                    {move || if registering.get() { "Register" } else { "Sign in" }}
                </button>
                <button type="button" class="link" on:click=toggle_mode>
                    {move || if registering.get() { "I already have an account" } else { "Create an account" }}
                </button>
            </div>
        </form>
    }
}
