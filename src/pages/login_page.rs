//! Login Page

use leptos::prelude::*;

use crate::components::LoginForm;

#[component]
pub fn LoginPage() -> impl IntoView {
    view! {
        <section class="page login-page">
            <LoginForm />
        </section>
    }
}
