use super::view_model::PersonnelDetailsViewModel;
use contracts::domain::common::EntityId;
use leptos::prelude::*;

use crate::shared::components::{ReferenceSelect, TextField};
use crate::shared::icons::icon;

#[component]
pub fn PersonnelDetails(
    id: Option<EntityId>,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let vm = PersonnelDetailsViewModel::new();
    vm.load_if_needed(id);

    view! {
        <div class="details-container personnel-details">
            <div class="details-header">
                <h3>{move || if vm.is_edit_mode() { "Modifier le membre du personnel" } else { "Nouveau membre du personnel" }}</h3>
            </div>

            {move || vm.error.get().map(|e| view! { <div class="error">{e}</div> })}

            <div class="details-form">
                <TextField
                    id="personnel_matricule"
                    label="Matricule"
                    required=true
                    value=Signal::derive(move || vm.form.with(|f| f.matricule.clone()))
                    on_input=Callback::new(move |v| vm.form.update(|f| f.matricule = v))
                />
                <div class="form-row">
                    <TextField
                        id="personnel_nom"
                        label="Nom"
                        required=true
                        value=Signal::derive(move || vm.form.with(|f| f.nom.clone()))
                        on_input=Callback::new(move |v| vm.form.update(|f| f.nom = v))
                    />
                    <TextField
                        id="personnel_prenoms"
                        label="Prénoms"
                        required=true
                        value=Signal::derive(move || vm.form.with(|f| f.prenoms.clone()))
                        on_input=Callback::new(move |v| vm.form.update(|f| f.prenoms = v))
                    />
                </div>
                <ReferenceSelect
                    id="personnel_fonction"
                    label="Fonction"
                    choices=vm.fonctions
                    value=Signal::derive(move || vm.form.with(|f| f.fonction_id))
                    on_change=Callback::new(move |v| vm.form.update(|f| f.fonction_id = v))
                />
                <div class="form-row">
                    <TextField
                        id="personnel_contact"
                        label="Contact"
                        input_type="tel"
                        value=Signal::derive(move || vm.form.with(|f| f.contact.clone()))
                        on_input=Callback::new(move |v| vm.form.update(|f| f.contact = v))
                    />
                    <TextField
                        id="personnel_email"
                        label="E-mail"
                        input_type="email"
                        value=Signal::derive(move || vm.form.with(|f| f.email.clone()))
                        on_input=Callback::new(move |v| vm.form.update(|f| f.email = v))
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
