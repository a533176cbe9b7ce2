use super::view_model::EleveDetailsViewModel;
use contracts::domain::common::{EntityId, Sexe};
use leptos::prelude::*;

use crate::shared::components::TextField;
use crate::shared::icons::icon;

#[component]
pub fn EleveDetails(
    id: Option<EntityId>,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let vm = EleveDetailsViewModel::new();
    vm.load_if_needed(id);

    let sexe_code = move || vm.form.with(|f| f.sexe.map(|s| s.code()).unwrap_or(""));

    view! {
        <div class="details-container eleve-details">
            <div class="details-header">
                <h3>{move || if vm.is_edit_mode() { "Modifier l'élève" } else { "Nouvel élève" }}</h3>
            </div>

            {move || vm.error.get().map(|e| view! { <div class="error">{e}</div> })}

            <div class="details-form">
                <TextField
                    id="eleve_matricule"
                    label="Matricule"
                    required=true
                    value=Signal::derive(move || vm.form.with(|f| f.matricule.clone()))
                    on_input=Callback::new(move |v| vm.form.update(|f| f.matricule = v))
                />
                <div class="form-row">
                    <TextField
                        id="eleve_nom"
                        label="Nom"
                        required=true
                        value=Signal::derive(move || vm.form.with(|f| f.nom.clone()))
                        on_input=Callback::new(move |v| vm.form.update(|f| f.nom = v))
                    />
                    <TextField
                        id="eleve_prenoms"
                        label="Prénoms"
                        required=true
                        value=Signal::derive(move || vm.form.with(|f| f.prenoms.clone()))
                        on_input=Callback::new(move |v| vm.form.update(|f| f.prenoms = v))
                    />
                </div>
                <div class="form-group">
                    <label for="eleve_sexe">"Sexe"</label>
                    <select
                        id="eleve_sexe"
                        on:change=move |ev| {
                            let code = event_target_value(&ev);
                            vm.form.update(|f| f.sexe = Sexe::from_code(&code));
                        }
                    >
                        <option value="" selected=move || sexe_code().is_empty()>"-- Non renseigné --"</option>
                        {[Sexe::Masculin, Sexe::Feminin]
                            .into_iter()
                            .map(|s| view! {
                                <option value=s.code() selected=move || sexe_code() == s.code()>
                                    {s.label()}
                                </option>
                            })
                            .collect_view()}
                    </select>
                </div>
                <div class="form-row">
                    <TextField
                        id="eleve_date_naissance"
                        label="Date de naissance"
                        input_type="date"
                        value=Signal::derive(move || vm.form.with(|f| f.date_naissance.clone()))
                        on_input=Callback::new(move |v| vm.form.update(|f| f.date_naissance = v))
                    />
                    <TextField
                        id="eleve_lieu_naissance"
                        label="Lieu de naissance"
                        value=Signal::derive(move || vm.form.with(|f| f.lieu_naissance.clone()))
                        on_input=Callback::new(move |v| vm.form.update(|f| f.lieu_naissance = v))
                    />
                </div>
                {move || vm.classe.get().map(|c| view! {
                    <div class="form-group">
                        <label>"Classe"</label>
                        <span class="form-readonly">{c.display()}</span>
                    </div>
                })}
                {move || vm.validation_message().map(|m| view! {
                    <div class="form-hint">{m}</div>
                })}
            </div>

            <div class="details-actions">
                <button
                    class="btn btn-primary"
                    on:click=move |_| vm.save_command(on_saved)
                    disabled=move || vm.validation_message().is_some() || vm.saving.get()
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
