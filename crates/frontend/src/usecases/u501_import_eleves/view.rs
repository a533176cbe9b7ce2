use contracts::shared::import::OutcomeSummary;
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u501_import_eleves::{ImportEleves, SCHEMA};
use leptos::prelude::*;

use crate::shared::api::{use_api, Resource};
use crate::shared::excel_importer::ImportWidget;

#[component]
pub fn ImportElevesView() -> impl IntoView {
    let api = use_api();
    let submit_url = Signal::derive(move || Some(api.endpoints().import_eleves()));
    let on_completed = Callback::new(|summary: OutcomeSummary| {
        log::info!(
            "u501: {} accepted, {} rejected",
            summary.accepted,
            summary.rejected
        );
    });

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">{ImportEleves::display_name()}</h1>
                    <span class="header__subtitle">{ImportEleves::description()}</span>
                </div>
            </div>
            <div class="info-box">
                <p>"Colonnes attendues: Matricule, Nom, Prénoms (obligatoires), Sexe (M/F), Date de naissance, Lieu de naissance."</p>
                <p>"Les élèves importés sont créés sans classe; utilisez ensuite l'affectation des élèves."</p>
            </div>
            <ImportWidget
                schema=SCHEMA
                title="Fichier des élèves"
                submit_url=submit_url
                invalidates=&[Resource::Eleves]
                on_completed=on_completed
            />
        </div>
    }
}
