use super::view_model::CoefficientDetailsViewModel;
use contracts::domain::common::EntityId;
use leptos::prelude::*;

use crate::shared::components::{ReferenceSelect, TextField};
use crate::shared::icons::icon;

#[component]
pub fn CoefficientDetails(
    id: Option<EntityId>,
    branche_id: Option<EntityId>,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let vm = CoefficientDetailsViewModel::new(branche_id);
    vm.load_if_needed(id);

    view! {
        <div class="details-container coefficient-details">
            <div class="details-header">
                <h3>{move || if vm.is_edit_mode() { "Modifier le coefficient" } else { "Nouveau coefficient" }}</h3>
            </div>

            {move || vm.error.get().map(|e| view! { <div class="error">{e}</div> })}

            <div class="details-form">
                <ReferenceSelect
                    id="coefficient_branche"
                    label="Branche"
                    choices=vm.branches
                    value=Signal::derive(move || vm.form.with(|f| f.branche_id))
                    on_change=Callback::new(move |v| vm.form.update(|f| f.branche_id = v))
                    disabled=Signal::derive(move || vm.is_edit_mode())
                />
                <ReferenceSelect
                    id="coefficient_matiere"
                    label="Matière"
                    choices=vm.matieres
                    value=Signal::derive(move || vm.form.with(|f| f.matiere_id))
                    on_change=Callback::new(move |v| vm.form.update(|f| f.matiere_id = v))
                    disabled=Signal::derive(move || vm.is_edit_mode())
                />
                <TextField
                    id="coefficient_valeur"
                    label="Coefficient"
                    input_type="number"
                    required=true
                    placeholder="ex. 2"
                    value=Signal::derive(move || vm.form.with(|f| f.valeur.clone()))
                    on_input=Callback::new(move |v| vm.form.update(|f| f.valeur = v))
                />
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
