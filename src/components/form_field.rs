//! Labeled Input
//!
//! One form row with its validation message.

use crm_client::forms::FieldErrors;
use leptos::prelude::*;

#[component]
pub fn FormField(
    label: &'static str,
    /// Key into `errors`
    field: &'static str,
    #[prop(default = "text")] input_type: &'static str,
    #[prop(optional)] multiline: bool,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_input: Callback<String>,
    #[prop(into)] errors: Signal<FieldErrors>,
) -> impl IntoView {
    let error = move || errors.with(|e| e.get(field).map(str::to_string));

    view! {
        <label class="form-field" class:invalid=move || error().is_some()>
            <span class="form-label">{label}</span>
            {if multiline {
                view! {
                    <textarea
                        name=field
                        prop:value=move || value.get()
                        on:input=move |ev| on_input.run(event_target_value(&ev))
                    ></textarea>
                }.into_any()
            } else {
                view! {
                    <input
                        type=input_type
                        name=field
                        prop:value=move || value.get()
                        on:input=move |ev| on_input.run(event_target_value(&ev))
                    />
                }.into_any()
            }}
            {move || error().map(|message| view! { <span class="field-error">{message}</span> })}
        </label>
    }
}
