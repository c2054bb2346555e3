//! Mini-CRM Frontend App
//!
//! Shell: session store, history-backed location, route guard, page switch.

use crm_client::route::{Resolution, Route};
use crm_client::CredentialStore;
use leptos::prelude::*;
use reactive_stores::Store;

use crate::api::{Api, LocalStorageCredentials};
use crate::components::{
    DeleteConfirmation, DeleteTarget, Layout, NoticeToasts, TaskAddForm, TaskEditForm, UserAddForm, UserEditForm,
};
use crate::context::AppContext;
use crate::pages::{LoginPage, NotFound, ReportsPage, TasksPage, UsersPage};
use crate::routing::{self, PageUrl};
use crate::store::{store_set_session, AppState, AppStateStoreFields};

fn render_route(route: Route) -> AnyView {
    match route {
        Route::Login => view! { <LoginPage /> }.into_any(),
        Route::Tasks => view! { <TasksPage owner=None /> }.into_any(),
        Route::UserTasks { user_id } => view! { <TasksPage owner=Some(user_id) /> }.into_any(),
        Route::TaskNew { user_id } => view! { <TaskAddForm user_id=user_id /> }.into_any(),
        Route::TaskEdit { id } => view! { <TaskEditForm id=id /> }.into_any(),
        Route::TaskDelete { ids } => view! { <DeleteConfirmation target=DeleteTarget::Tasks(ids) /> }.into_any(),
        Route::Users => view! { <UsersPage /> }.into_any(),
        Route::UserNew => view! { <UserAddForm /> }.into_any(),
        Route::UserEdit { id } => view! { <UserEditForm id=id /> }.into_any(),
        Route::UserDelete { ids } => view! { <DeleteConfirmation target=DeleteTarget::Users(ids) /> }.into_any(),
        Route::ExpiredTasksReport => view! { <ReportsPage /> }.into_any(),
        // resolve() never renders Root
        Route::Root | Route::NotFound => view! { <NotFound /> }.into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    let store = Store::new(AppState::new(LocalStorageCredentials.session()));
    provide_context(store);

    let (location, set_location) = signal(routing::current());

    // The gateway has already dropped the stored credentials by now
    let api = Api::new(move || {
        log::info!("[app] session rejected by server, back to login");
        store_set_session(&store, None);
        let url = PageUrl {
            path: Route::Login.to_path(),
            query: String::new(),
        };
        routing::replace(&url);
        set_location.set(url);
    });

    let ctx = AppContext::new((location, set_location), api);
    provide_context(ctx);
    routing::on_popstate(move |url| ctx.sync(url));

    let resolution = Memo::new(move |_| {
        let authenticated = store.session().read().is_some();
        ctx.route().resolve(authenticated)
    });

    Effect::new(move |_| {
        if let Resolution::Redirect(target) = resolution.get() {
            ctx.redirect(&target);
        }
    });

    view! {
        <Layout>
            {move || match resolution.get() {
                Resolution::Render(route) => render_route(route),
                Resolution::Redirect(_) => ().into_any(),
            }}
        </Layout>
        <NoticeToasts />
    }
}
