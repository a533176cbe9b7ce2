use super::view_model::ClasseDetailsViewModel;
use contracts::domain::common::EntityId;
use leptos::prelude::*;

use crate::shared::components::{ReferenceSelect, TextField};
use crate::shared::icons::icon;

#[component]
pub fn ClasseDetails(
    id: Option<EntityId>,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let vm = ClasseDetailsViewModel::new();
    vm.load_if_needed(id);

    view! {
        <div class="details-container classe-details">
            <div class="details-header">
                <h3>{move || if vm.is_edit_mode() { "Modifier la classe" } else { "Nouvelle classe" }}</h3>
            </div>

            {move || vm.error.get().map(|e| view! { <div class="error">{e}</div> })}

            <div class="details-form">
                <TextField
                    id="classe_code"
                    label="Code"
                    required=true
                    placeholder="ex. 6E1"
                    value=Signal::derive(move || vm.form.with(|f| f.code.clone()))
                    on_input=Callback::new(move |v| vm.form.update(|f| f.code = v))
                />
                <TextField
                    id="classe_libelle"
                    label="Libellé"
                    required=true
                    placeholder="ex. Sixième 1"
                    value=Signal::derive(move || vm.form.with(|f| f.libelle.clone()))
                    on_input=Callback::new(move |v| vm.form.update(|f| f.libelle = v))
                />
                <ReferenceSelect
                    id="classe_branche"
                    label="Branche"
                    choices=vm.branches
                    value=Signal::derive(move || vm.form.with(|f| f.branche_id))
                    on_change=Callback::new(move |v| vm.form.update(|f| f.branche_id = v))
                />
                <ReferenceSelect
                    id="classe_salle"
                    label="Salle"
                    placeholder="-- Aucune --"
                    choices=vm.salles
                    value=Signal::derive(move || vm.form.with(|f| f.salle_id))
                    on_change=Callback::new(move |v| vm.form.update(|f| f.salle_id = v))
                />
                <TextField
                    id="classe_effectif"
                    label="Effectif maximum"
                    input_type="number"
                    value=Signal::derive(move || {
                        vm.form.with(|f| f.effectif_max.map(|v| v.to_string()).unwrap_or_default())
                    })
                    on_input=Callback::new(move |v: String| {
                        vm.form.update(|f| f.effectif_max = v.trim().parse().ok())
                    })
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
