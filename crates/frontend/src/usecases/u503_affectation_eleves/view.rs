use super::api;
use contracts::domain::common::EntityRef;
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u503_affectation_eleves::{AffectationEleves, AffectationElevesRequest};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::api::use_api;
use crate::shared::dialogs;
use crate::shared::dual_list::{DualList, DualListState, Side};
use crate::shared::icons::icon;
use crate::shared::modal_stack::ModalStackService;
use crate::shared::picker_aggregate::GenericAggregatePicker;
use crate::system::context::use_app_context;

#[component]
pub fn AffectationElevesView() -> impl IntoView {
    let api = use_api();
    let app_ctx = use_app_context();
    let modal_stack =
        use_context::<ModalStackService>().expect("ModalStackService not found in context");

    let (classes, set_classes) = signal(Vec::<EntityRef>::new());
    let (classes_error, set_classes_error) = signal(None::<String>);
    let (classes_loading, set_classes_loading) = signal(false);
    let classe = RwSignal::new(None::<EntityRef>);
    let state = RwSignal::new(DualListState::<EntityRef>::new());
    let (submitting, set_submitting) = signal(false);
    let (error, set_error) = signal(None::<String>);
    let refresh = RwSignal::new(0u32);

    Effect::new(move |_| {
        app_ctx.track();
        set_classes_loading.set(true);
        spawn_local(async move {
            match api::fetch_classes(&api).await {
                Ok(list) => {
                    set_classes.set(list);
                    set_classes_error.set(None);
                }
                Err(e) => set_classes_error.set(Some(e.to_string())),
            }
            set_classes_loading.set(false);
        });
    });

    Effect::new(move |_| {
        refresh.track();
        let Some(current) = classe.get() else {
            state.update(|s| s.clear());
            return;
        };
        let Some(ticket) = state.try_update(|s| s.begin_load()) else {
            return;
        };
        spawn_local(async move {
            match api::fetch_eleves(&api, current.id).await {
                Ok((source, target)) => {
                    let applied = state
                        .try_update(|s| s.finish_load(ticket, source, target))
                        .unwrap_or(false);
                    if applied {
                        set_error.set(None);
                    }
                }
                Err(e) => {
                    if state.try_update(|s| s.fail_load(ticket)).unwrap_or(false) {
                        set_error.set(Some(e.to_string()));
                    }
                }
            }
        });
    });

    let pick_classe = move |_| {
        let initial = classe.get_untracked().map(|c| c.id.to_string());
        modal_stack.push_with_frame(
            Some("max-width: min(560px, 95vw); width: min(560px, 95vw);".to_string()),
            Some("picker-modal".to_string()),
            move |handle| {
                view! {
                    <GenericAggregatePicker
                        items=classes
                        error=classes_error
                        loading=classes_loading
                        initial_selected_id=initial.clone()
                        title="Choisir une classe".to_string()
                        on_confirm={move |picked: Option<EntityRef>| {
                            handle.close();
                            if picked.is_some() {
                                classe.set(picked);
                            }
                        }}
                        on_cancel=move |_| handle.close()
                    />
                }
                .into_any()
            },
        );
    };

    let handle_submit = move |_| {
        let Some(current) = classe.get_untracked() else {
            return;
        };
        let eleves = match state.with_untracked(|s| s.submit()) {
            Ok(list) => list,
            Err(e) => {
                dialogs::alert(&e.to_string());
                return;
            }
        };
        let request = AffectationElevesRequest {
            classe: current.clone(),
            annee_id: app_ctx.with_untracked(|c| c.annee.id),
            eleves,
        };
        set_submitting.set(true);
        spawn_local(async move {
            let result = api::submit(&api, &request).await;
            set_submitting.set(false);
            match result {
                Ok(()) => {
                    log::info!(
                        "u503: {} élève(s) affecté(s) à {}",
                        request.eleves.len(),
                        current.display()
                    );
                    state.update(|s| s.clear());
                    refresh.update(|n| *n += 1);
                }
                Err(e) => dialogs::alert(&format!("Échec de l'affectation: {}", e)),
            }
        });
    };

    let busy = Signal::derive(move || state.with(|s| s.is_loading()) || submitting.get());

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">{AffectationEleves::display_name()}</h1>
                    <span class="header__subtitle">{AffectationEleves::description()}</span>
                </div>
                <div class="header__actions">
                    <button class="button button--secondary" on:click=pick_classe>
                        {icon("search")}
                        {move || match classe.get() {
                            Some(c) => format!("Classe: {}", c.display()),
                            None => "Choisir une classe".to_string(),
                        }}
                    </button>
                    <button
                        class="button button--primary"
                        on:click=handle_submit
                        disabled=move || busy.get() || classe.with(|c| c.is_none()) || state.with(|s| s.len(Side::Target) == 0)
                    >
                        {icon("check")}
                        "Valider l'affectation"
                    </button>
                </div>
            </div>

            {move || error.get().map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            <Show
                when=move || classe.with(|c| c.is_some())
                fallback=|| view! { <div class="info-box">"Choisissez d'abord la classe à compléter."</div> }
            >
                <DualList
                    state=state
                    source_title="Élèves sans classe"
                    target_title="Élèves de la classe"
                    disabled=busy
                />
            </Show>
        </div>
    }
}
