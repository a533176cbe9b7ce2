use super::api;
use contracts::domain::a006_evaluation::Evaluation;
use contracts::domain::common::EntityId;
use contracts::shared::import::ImportBatch;
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u502_import_notes::{apply_note_bounds, ImportNotes, SCHEMA};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::api::use_api;
use crate::shared::excel_importer::ImportWidget;
use crate::shared::list_utils::format_decimal;
use crate::system::context::use_app_context;

#[component]
pub fn ImportNotesView() -> impl IntoView {
    let api = use_api();
    let app_ctx = use_app_context();

    let (evaluations, set_evaluations) = signal(Vec::<Evaluation>::new());
    let (error, set_error) = signal(None::<String>);
    let (selected_id, set_selected_id) = signal(None::<EntityId>);

    Effect::new(move |_| {
        let periode = app_ctx.with(|c| c.periode.as_ref().map(|p| p.id));
        set_selected_id.set(None);
        spawn_local(async move {
            match api::fetch_evaluations(&api, periode).await {
                Ok(list) => {
                    set_evaluations.set(list);
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(format!("Chargement des évaluations: {}", e))),
            }
        });
    });

    let selected = Memo::new(move |_| {
        let id = selected_id.get()?;
        evaluations.with(|list| list.iter().find(|e| e.id == id).cloned())
    });

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">{ImportNotes::display_name()}</h1>
                    <span class="header__subtitle">{ImportNotes::description()}</span>
                </div>
            </div>

            {move || error.get().map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            <div class="form-group">
                <label for="u502_evaluation">"Évaluation"</label>
                <select
                    id="u502_evaluation"
                    on:change=move |ev| set_selected_id.set(event_target_value(&ev).parse().ok())
                >
                    <option value="" selected=move || selected_id.get().is_none()>
                        "-- Choisir une évaluation --"
                    </option>
                    {move || evaluations.get().into_iter().map(|e| view! {
                        <option value=e.id.to_string()>{e.title()}</option>
                    }).collect_view()}
                </select>
            </div>

            // Changing the evaluation rebuilds the widget: the note bounds
            // apply from parsing on.
            {move || match selected.get() {
                None => view! {
                    <div class="info-box">"Choisissez l'évaluation avant de charger le fichier des notes."</div>
                }.into_any(),
                Some(evaluation) => {
                    let note_sur = evaluation.note_sur;
                    let submit_url = Signal::stored(Some(api.endpoints().import_notes(evaluation.id)));
                    let refine = Callback::new(move |mut batch: ImportBatch| {
                        apply_note_bounds(&mut batch, note_sur);
                        batch
                    });
                    view! {
                        <ImportWidget
                            schema=SCHEMA
                            title=format!("Notes sur {}: {}", format_decimal(note_sur), evaluation.title())
                            submit_url=submit_url
                            refine=refine
                        />
                    }.into_any()
                }
            }}
        </div>
    }
}
