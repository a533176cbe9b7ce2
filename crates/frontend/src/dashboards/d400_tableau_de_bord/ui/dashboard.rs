use contracts::dashboards::d400_tableau_de_bord::DashboardStats;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::dashboards::d400_tableau_de_bord::api;
use crate::shared::api::use_api;
use crate::shared::components::{CardTone, StatCard};
use crate::shared::icons::icon;
use crate::system::context::use_app_context;

/// Home screen: counters of the school year.
#[component]
pub fn TableauDeBord() -> impl IntoView {
    let client = use_api();
    let app_ctx = use_app_context();

    let (stats, set_stats) = signal(None::<DashboardStats>);
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);
    let refresh = RwSignal::new(0u32);

    // Reloads on refresh and on every period switch.
    Effect::new(move |_| {
        refresh.track();
        app_ctx.track();
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::get_stats(&client).await {
                Ok(data) => set_stats.set(Some(data)),
                Err(e) => {
                    log::warn!("dashboard: {}", e);
                    set_error.set(Some(e.to_string()));
                }
            }
            set_loading.set(false);
        });
    });

    let counter = move |f: fn(&DashboardStats) -> u32| {
        Signal::derive(move || stats.with(|s| s.as_ref().map(|s| f(s) as i64)))
    };

    let taux = move || stats.with(|s| s.as_ref().map(|s| s.taux_affectation()).unwrap_or(0));

    view! {
        <div class="page dashboard">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">"Tableau de bord"</h1>
                    <span class="header__subtitle">
                        {move || app_ctx.with(|c| format!("{} · {} · {}", c.ecole.libelle, c.annee.libelle, c.periode_label()))}
                    </span>
                </div>
                <div class="header__actions">
                    <button
                        class="button button--secondary"
                        on:click=move |_| refresh.update(|n| *n += 1)
                        disabled=move || loading.get()
                    >
                        {icon("refresh")}
                        "Actualiser"
                    </button>
                </div>
            </div>

            {move || error.get().map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            <div class="stat-grid">
                <StatCard label="Classes" icon_name="school" value=counter(|s| s.classes) />
                <StatCard
                    label="Élèves"
                    icon_name="users"
                    value=counter(|s| s.eleves)
                    subtitle=Signal::derive(move || {
                        stats.with(|s| s.as_ref().map(|s| format!("{} non affecté(s)", s.eleves_non_affectes)))
                    })
                />
                <StatCard
                    label="Taux d'affectation"
                    icon_name="link"
                    value=Signal::derive(move || stats.with(|s| s.as_ref().map(|_| taux() as i64)))
                    tone=Signal::derive(move || if taux() >= 100 { CardTone::Success } else { CardTone::Warning })
                    subtitle=Signal::derive(|| Some("%".to_string()))
                />
                <StatCard label="Personnel" icon_name="briefcase" value=counter(|s| s.personnel) />
                <StatCard label="Salles" icon_name="door" value=counter(|s| s.salles) />
                <StatCard label="Évaluations" icon_name="clipboard" value=counter(|s| s.evaluations) />
            </div>
        </div>
    }
}
