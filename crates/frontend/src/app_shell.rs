//! Auth gate, context resolution and main layout.

use contracts::system::auth::UserInfo;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::layout::center::Tabs;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::left::Sidebar;
use crate::layout::tabs::tab_labels::DEFAULT_TAB;
use crate::layout::Shell;
use crate::shared::api::use_api;
use crate::system::auth::context::{do_logout, use_auth};
use crate::system::context::api::fetch_context;
use crate::system::context::AppContext;
use crate::system::pages::login::LoginPage;

#[derive(Clone)]
enum ContextState {
    Loading,
    Ready(AppContext),
    Failed(String),
}

#[component]
fn MainLayout(context: AppContext) -> impl IntoView {
    provide_context(RwSignal::new(context));

    let tabs_store = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");
    tabs_store.init_router_integration(DEFAULT_TAB);

    view! {
        <Shell
            left=|| view! { <Sidebar /> }.into_any()
            center=|| view! { <Tabs /> }.into_any()
        />
    }
}

/// Resolves `/contexte` once the user is known, then mounts the layout.
#[component]
fn Workspace() -> impl IntoView {
    let api = use_api();
    let (auth_state, set_auth_state) = use_auth();
    let state = RwSignal::new(ContextState::Loading);

    let resolve = move |user: UserInfo| {
        state.set(ContextState::Loading);
        spawn_local(async move {
            match fetch_context(&api).await {
                Ok(response) => {
                    let context = AppContext::new(response, user);
                    log::info!(
                        "context: {} / {} / {}",
                        context.ecole.libelle,
                        context.annee.libelle,
                        context.periode_label()
                    );
                    api.set_context(&context);
                    state.set(ContextState::Ready(context));
                }
                Err(e) if e.is_unauthorized() => do_logout(api, set_auth_state).await,
                Err(e) => {
                    log::warn!("context: {}", e);
                    state.set(ContextState::Failed(e.to_string()));
                }
            }
        });
    };

    // The profile may arrive after the token (session restore).
    Effect::new(move |resolved: Option<bool>| {
        if resolved == Some(true) {
            return true;
        }
        match auth_state.with(|s| s.user_info.clone()) {
            Some(user) => {
                resolve(user);
                true
            }
            None => false,
        }
    });

    let retry = move |_| {
        if let Some(user) = auth_state.with_untracked(|s| s.user_info.clone()) {
            resolve(user);
        }
    };

    view! {
        {move || match state.get() {
            ContextState::Loading => view! {
                <div class="app-loading">
                    <Spinner />
                    <span>"Chargement de l'établissement..."</span>
                </div>
            }.into_any(),
            ContextState::Failed(message) => view! {
                <div class="app-loading">
                    <div class="warning-box warning-box--error">
                        <span class="warning-box__icon">"⚠"</span>
                        <span class="warning-box__text">
                            {format!("Impossible de charger le contexte: {}", message)}
                        </span>
                    </div>
                    <Button appearance=ButtonAppearance::Primary on_click=retry>"Réessayer"</Button>
                </div>
            }.into_any(),
            ContextState::Ready(context) => view! { <MainLayout context=context /> }.into_any(),
        }}
    }
}

/// Login page until a session exists, the workspace afterwards.
#[component]
pub fn AppShell() -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || auth_state.with(|s| s.is_authenticated())
            fallback=|| view! { <LoginPage /> }
        >
            <Workspace />
        </Show>
    }
}
