use super::view_model::EvaluationDetailsViewModel;
use contracts::domain::common::EntityId;
use leptos::prelude::*;

use crate::shared::components::{ReferenceSelect, TextField};
use crate::shared::icons::icon;

#[component]
pub fn EvaluationDetails(
    id: Option<EntityId>,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let vm = EvaluationDetailsViewModel::new();
    vm.load_if_needed(id);

    view! {
        <div class="details-container evaluation-details">
            <div class="details-header">
                <h3>{move || if vm.is_edit_mode() { "Modifier l'évaluation" } else { "Nouvelle évaluation" }}</h3>
            </div>

            {move || vm.error.get().map(|e| view! { <div class="error">{e}</div> })}

            <div class="details-form">
                <div class="form-row">
                    <TextField
                        id="evaluation_code"
                        label="Code"
                        required=true
                        value=Signal::derive(move || vm.form.with(|f| f.code.clone()))
                        on_input=Callback::new(move |v| vm.form.update(|f| f.code = v))
                    />
                    <ReferenceSelect
                        id="evaluation_type"
                        label="Type"
                        choices=vm.types
                        value=Signal::derive(move || vm.form.with(|f| f.type_evaluation_id))
                        on_change=Callback::new(move |v| vm.form.update(|f| f.type_evaluation_id = v))
                    />
                </div>
                <div class="form-row">
                    <ReferenceSelect
                        id="evaluation_classe"
                        label="Classe"
                        choices=vm.classes
                        value=Signal::derive(move || vm.form.with(|f| f.classe_id))
                        on_change=Callback::new(move |v| vm.form.update(|f| f.classe_id = v))
                    />
                    <ReferenceSelect
                        id="evaluation_matiere"
                        label="Matière"
                        choices=vm.matieres
                        value=Signal::derive(move || vm.form.with(|f| f.matiere_id))
                        on_change=Callback::new(move |v| vm.form.update(|f| f.matiere_id = v))
                    />
                </div>
                <div class="form-row">
                    <ReferenceSelect
                        id="evaluation_periode"
                        label="Période"
                        choices=vm.periodes
                        value=Signal::derive(move || vm.form.with(|f| f.periode_id))
                        on_change=Callback::new(move |v| vm.form.update(|f| f.periode_id = v))
                    />
                    <TextField
                        id="evaluation_date"
                        label="Date"
                        input_type="date"
                        required=true
                        value=Signal::derive(move || vm.form.with(|f| f.date.clone()))
                        on_input=Callback::new(move |v| vm.form.update(|f| f.date = v))
                    />
                    <TextField
                        id="evaluation_note_sur"
                        label="Noté sur"
                        input_type="number"
                        value=Signal::derive(move || vm.form.with(|f| f.note_sur.clone()))
                        on_input=Callback::new(move |v| vm.form.update(|f| f.note_sur = v))
                    />
                </div>
            </div>

            <div class="details-actions">
                <button
                    class="btn btn-primary"
                    on:click=move |_| vm.save_command(on_saved)
                    disabled=move || !vm.is_form_valid() || vm.saving.get()
                >
                    {icon("check")}
                    {move || if vm.is_edit_mode() { "Enregistrer" } else { "Créer" }}
                </button>
                <button class="btn btn-secondary" on:click=move |_| on_cancel.run(())>
                    {icon("x")}
                    "Annuler"
                </button>
            </div>
        </div>
    }
}
