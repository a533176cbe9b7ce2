//! Top bar: brand, school year, period switch, user menu.

use contracts::domain::common::EntityId;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_label_for_key;
use crate::shared::api::use_api;
use crate::shared::icons::icon;
use crate::system::auth::context::{do_logout, use_auth};
use crate::system::context::use_app_context;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let app_ctx = use_app_context();
    let api = use_api();
    let (auth_state, set_auth_state) = use_auth();

    let is_sidebar_visible = move || ctx.left_open.get();

    // Scoped endpoints and cached lists follow the selected period.
    let switch_periode = move |id: EntityId| {
        let next = app_ctx.with_untracked(|c| c.with_periode(id));
        log::info!("period switched to {}", next.periode_label());
        api.set_context(&next);
        app_ctx.set(next);
    };

    let logout = move |_| {
        ctx.close_all();
        spawn_local(async move {
            do_logout(api, set_auth_state).await;
        });
    };

    let open = move |key: &'static str| ctx.open_tab(key, tab_label_for_key(key));

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_left()
                    title=move || if is_sidebar_visible() { "Masquer le menu" } else { "Afficher le menu" }
                >
                    {icon("menu")}
                </button>
                <span class="top-header__title">"PULS"</span>
                <span class="top-header__school">
                    {move || app_ctx.with(|c| format!("{} · {}", c.ecole.libelle, c.annee.libelle))}
                </span>
            </div>

            <div class="top-header__actions">
                <select
                    class="top-header__period"
                    title="Période"
                    on:change=move |ev| {
                        if let Ok(id) = event_target_value(&ev).parse::<EntityId>() {
                            switch_periode(id);
                        }
                    }
                >
                    {move || app_ctx.with(|c| {
                        let current = c.periode.as_ref().map(|p| p.id);
                        c.periodes
                            .iter()
                            .map(|p| {
                                let selected = current == Some(p.id);
                                view! {
                                    <option value=p.id.to_string() selected=selected>{p.display()}</option>
                                }
                            })
                            .collect_view()
                    })}
                </select>

                <div class="top-header__user">
                    {icon("user")}
                    <span>
                        {move || auth_state.get().user_info
                            .map(|u| u.display_name())
                            .unwrap_or_default()}
                    </span>
                </div>

                <button class="top-header__icon-btn" on:click=move |_| open("sys_profile") title="Mon profil">
                    {icon("user")}
                </button>
                <button class="top-header__icon-btn" on:click=move |_| open("sys_password") title="Changer le mot de passe">
                    {icon("key")}
                </button>
                <button class="top-header__icon-btn" on:click=logout title="Déconnexion">
                    {icon("logout")}
                </button>
            </div>
        </div>
    }
}
