//! Tab key → screen.

use crate::dashboards::d400_tableau_de_bord::TableauDeBord;
use crate::domain::a001_classe::ui::list::ClasseList;
use crate::domain::a002_salle::ui::list::SalleList;
use crate::domain::a003_eleve::ui::list::EleveList;
use crate::domain::a004_personnel::ui::list::PersonnelList;
use crate::domain::a005_matiere::ui::list::MatiereList;
use crate::domain::a006_evaluation::ui::list::EvaluationList;
use crate::domain::a007_coefficient::ui::list::CoefficientList;
use crate::layout::global_context::AppGlobalContext;
use crate::system::pages::change_password::ChangePasswordPage;
use crate::system::pages::profile::ProfilePage;
use crate::usecases::u501_import_eleves::ImportElevesView;
use crate::usecases::u502_import_notes::ImportNotesView;
use crate::usecases::u503_affectation_eleves::AffectationElevesView;
use crate::usecases::u504_affectation_professeurs::AffectationProfesseursView;
use leptos::prelude::*;

pub fn render_tab_content(key: &str, tabs_store: AppGlobalContext) -> AnyView {
    let key_for_close = key.to_string();
    let on_close = Callback::new(move |_| tabs_store.close_tab(&key_for_close));

    match key {
        "d400_tableau_de_bord" => view! { <TableauDeBord /> }.into_any(),

        "a001_classe" => view! { <ClasseList /> }.into_any(),
        "a002_salle" => view! { <SalleList /> }.into_any(),
        "a003_eleve" => view! { <EleveList /> }.into_any(),
        "a004_personnel" => view! { <PersonnelList /> }.into_any(),
        "a005_matiere" => view! { <MatiereList /> }.into_any(),
        "a006_evaluation" => view! { <EvaluationList /> }.into_any(),
        "a007_coefficient" => view! { <CoefficientList /> }.into_any(),

        "u501_import_eleves" => view! { <ImportElevesView /> }.into_any(),
        "u502_import_notes" => view! { <ImportNotesView /> }.into_any(),
        "u503_affectation_eleves" => view! { <AffectationElevesView /> }.into_any(),
        "u504_affectation_professeurs" => view! { <AffectationProfesseursView /> }.into_any(),

        "sys_profile" => view! { <ProfilePage on_close=on_close /> }.into_any(),
        "sys_password" => view! { <ChangePasswordPage on_close=on_close /> }.into_any(),

        _ => {
            log::warn!("unknown tab: {}", key);
            view! { <div class="placeholder">"Écran indisponible"</div> }.into_any()
        }
    }
}
