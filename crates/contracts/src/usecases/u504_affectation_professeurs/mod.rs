pub mod request;

pub use request::AffectationProfesseursRequest;

use crate::usecases::common::UseCaseMetadata;

pub struct AffectationProfesseurs;

impl UseCaseMetadata for AffectationProfesseurs {
    fn usecase_index() -> &'static str {
        "u504"
    }

    fn usecase_name() -> &'static str {
        "affectation_professeurs"
    }

    fn display_name() -> &'static str {
        "Affectation des professeurs"
    }

    fn description() -> &'static str {
        "Attribution d'une matière et de ses classes à un enseignant"
    }
}
