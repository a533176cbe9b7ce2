//! Tab titles, one place for the sidebar and the tab bar.

use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u501_import_eleves::ImportEleves;
use contracts::usecases::u502_import_notes::ImportNotes;
use contracts::usecases::u503_affectation_eleves::AffectationEleves;
use contracts::usecases::u504_affectation_professeurs::AffectationProfesseurs;

pub const DEFAULT_TAB: &str = "d400_tableau_de_bord";

pub fn tab_label_for_key(key: &str) -> &'static str {
    match key {
        "d400_tableau_de_bord" => "Tableau de bord",

        "a001_classe" => "Classes",
        "a002_salle" => "Salles",
        "a003_eleve" => "Élèves",
        "a004_personnel" => "Personnel",
        "a005_matiere" => "Matières",
        "a006_evaluation" => "Évaluations",
        "a007_coefficient" => "Coefficients",

        "u501_import_eleves" => ImportEleves::display_name(),
        "u502_import_notes" => ImportNotes::display_name(),
        "u503_affectation_eleves" => AffectationEleves::display_name(),
        "u504_affectation_professeurs" => AffectationProfesseurs::display_name(),

        "sys_profile" => "Mon profil",
        "sys_password" => "Mot de passe",

        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usecase_tabs_use_their_metadata() {
        assert_eq!(ImportEleves::full_name(), "u501_import_eleves");
        assert_eq!(tab_label_for_key(&ImportEleves::full_name()), "Import des élèves");
        assert_eq!(tab_label_for_key(DEFAULT_TAB), "Tableau de bord");
        assert_eq!(tab_label_for_key("inconnu"), "");
    }
}
