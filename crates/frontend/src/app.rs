use crate::app_shell::AppShell;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::api::ApiClient;
use crate::shared::config::load_config;
use crate::shared::modal_stack::{ModalHost, ModalStackService};
use crate::system::auth::context::AuthProvider;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    let config = load_config();
    provide_context(ApiClient::new(&config));
    provide_context(config);
    provide_context(AppGlobalContext::new());
    provide_context(ModalStackService::new());

    view! {
        <AuthProvider>
            <AppShell />
            <ModalHost />
        </AuthProvider>
    }
}
