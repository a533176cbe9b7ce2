use super::view_model::SalleDetailsViewModel;
use contracts::domain::common::EntityId;
use leptos::prelude::*;

use crate::shared::components::TextField;
use crate::shared::icons::icon;

#[component]
pub fn SalleDetails(
    id: Option<EntityId>,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let vm = SalleDetailsViewModel::new();
    vm.load_if_needed(id);

    view! {
        <div class="details-container salle-details">
            <div class="details-header">
                <h3>{move || if vm.is_edit_mode() { "Modifier la salle" } else { "Nouvelle salle" }}</h3>
            </div>

            {move || vm.error.get().map(|e| view! { <div class="error">{e}</div> })}

            <div class="details-form">
                <TextField
                    id="salle_code"
                    label="Code"
                    required=true
                    value=Signal::derive(move || vm.form.with(|f| f.code.clone()))
                    on_input=Callback::new(move |v| vm.form.update(|f| f.code = v))
                />
                <TextField
                    id="salle_libelle"
                    label="Libellé"
                    required=true
                    value=Signal::derive(move || vm.form.with(|f| f.libelle.clone()))
                    on_input=Callback::new(move |v| vm.form.update(|f| f.libelle = v))
                />
                <TextField
                    id="salle_capacite"
                    label="Capacité"
                    input_type="number"
                    value=Signal::derive(move || {
                        vm.form.with(|f| f.capacite.map(|v| v.to_string()).unwrap_or_default())
                    })
                    on_input=Callback::new(move |v: String| {
                        vm.form.update(|f| f.capacite = v.trim().parse().ok())
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
