//! Toast Notifications

use leptos::prelude::*;

use crate::store::{store_dismiss, use_app_store, AppStateStoreFields, Notice, NoticeLevel};

#[component]
pub fn NoticeToasts() -> impl IntoView {
    let store = use_app_store();

    view! {
        <div class="toasts">
            <For
                each=move || store.notices().get()
                key=|notice: &Notice| notice.id
                children=move |notice: Notice| {
                    let id = notice.id;
                    view! {
                        <div class="toast" class:error=notice.level == NoticeLevel::Error>
                            <span class="toast-text">{notice.text}</span>
                            <button class="toast-close" on:click=move |_| store_dismiss(&store, id)>"×"</button>
                        </div>
                    }
                }
            />
        </div>
    }
}
