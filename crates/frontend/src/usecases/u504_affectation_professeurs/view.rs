use super::api;
use contracts::domain::a004_personnel::Personnel;
use contracts::domain::a005_matiere::Matiere;
use contracts::domain::common::{EntityId, EntityRef};
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u504_affectation_professeurs::{
    AffectationProfesseurs, AffectationProfesseursRequest,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::api::{use_api, Resource};
use crate::shared::components::ReferenceSelect;
use crate::shared::dialogs;
use crate::shared::dual_list::{DualList, DualListState, Side};
use crate::shared::icons::icon;
use crate::shared::references::use_choices;
use crate::system::context::use_app_context;

fn find(list: &[EntityRef], id: Option<EntityId>) -> Option<EntityRef> {
    let id = id?;
    list.iter().find(|r| r.id == id).cloned()
}

#[component]
pub fn AffectationProfesseursView() -> impl IntoView {
    let api = use_api();
    let app_ctx = use_app_context();
    let professeurs = use_choices::<Personnel>(Resource::Personnel, Personnel::to_ref);
    let matieres = use_choices::<Matiere>(Resource::Matieres, Matiere::to_ref);

    let professeur_id = RwSignal::new(None::<EntityId>);
    let matiere_id = RwSignal::new(None::<EntityId>);
    let state = RwSignal::new(DualListState::<EntityRef>::new());
    let (submitting, set_submitting) = signal(false);
    let (error, set_error) = signal(None::<String>);
    let refresh = RwSignal::new(0u32);

    Effect::new(move |_| {
        refresh.track();
        let (Some(professeur), Some(matiere)) = (professeur_id.get(), matiere_id.get()) else {
            state.update(|s| s.clear());
            return;
        };
        let Some(ticket) = state.try_update(|s| s.begin_load()) else {
            return;
        };
        spawn_local(async move {
            match api::fetch_classes(&api, professeur, matiere).await {
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

    let handle_submit = move |_| {
        let professeur = professeurs.with_untracked(|l| find(l, professeur_id.get_untracked()));
        let matiere = matieres.with_untracked(|l| find(l, matiere_id.get_untracked()));
        let (Some(professeur), Some(matiere)) = (professeur, matiere) else {
            dialogs::alert("Choisissez le professeur et la matière");
            return;
        };
        let classes = match state.with_untracked(|s| s.submit()) {
            Ok(list) => list,
            Err(e) => {
                dialogs::alert(&e.to_string());
                return;
            }
        };
        let request = AffectationProfesseursRequest {
            professeur,
            matiere,
            annee_id: app_ctx.with_untracked(|c| c.annee.id),
            classes,
        };
        set_submitting.set(true);
        spawn_local(async move {
            let result = api::submit(&api, &request).await;
            set_submitting.set(false);
            match result {
                Ok(()) => {
                    log::info!(
                        "u504: {} classe(s) pour {} en {}",
                        request.classes.len(),
                        request.professeur.display(),
                        request.matiere.libelle
                    );
                    state.update(|s| s.clear());
                    refresh.update(|n| *n += 1);
                }
                Err(e) => dialogs::alert(&format!("Échec de l'affectation: {}", e)),
            }
        });
    };

    let busy = Signal::derive(move || state.with(|s| s.is_loading()) || submitting.get());
    let ready = move || professeur_id.with(|p| p.is_some()) && matiere_id.with(|m| m.is_some());

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">{AffectationProfesseurs::display_name()}</h1>
                    <span class="header__subtitle">{AffectationProfesseurs::description()}</span>
                </div>
                <div class="header__actions">
                    <button
                        class="button button--primary"
                        on:click=handle_submit
                        disabled=move || busy.get() || !ready() || state.with(|s| s.len(Side::Target) == 0)
                    >
                        {icon("check")}
                        "Valider l'affectation"
                    </button>
                </div>
            </div>

            <div class="form-row">
                <ReferenceSelect
                    id="u504_professeur"
                    label="Professeur"
                    choices=professeurs
                    value=professeur_id
                    on_change=Callback::new(move |v| professeur_id.set(v))
                    disabled=busy
                />
                <ReferenceSelect
                    id="u504_matiere"
                    label="Matière"
                    choices=matieres
                    value=matiere_id
                    on_change=Callback::new(move |v| matiere_id.set(v))
                    disabled=busy
                />
            </div>

            {move || error.get().map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            <Show
                when=ready
                fallback=|| view! { <div class="info-box">"Choisissez le professeur puis la matière."</div> }
            >
                <DualList
                    state=state
                    source_title="Classes"
                    target_title="Classes attribuées"
                    disabled=busy
                />
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_resolves_selected_reference() {
        let list = vec![EntityRef::new(1, None, "Yao Koffi"), EntityRef::new(2, None, "Bamba Ali")];
        assert_eq!(find(&list, Some(2)).map(|r| r.libelle), Some("Bamba Ali".to_string()));
        assert_eq!(find(&list, None), None);
        assert_eq!(find(&list, Some(9)), None);
    }
}
