pub mod request;

pub use request::AffectationElevesRequest;

use crate::usecases::common::UseCaseMetadata;

pub struct AffectationEleves;

impl UseCaseMetadata for AffectationEleves {
    fn usecase_index() -> &'static str {
        "u503"
    }

    fn usecase_name() -> &'static str {
        "affectation_eleves"
    }

    fn display_name() -> &'static str {
        "Affectation des élèves"
    }

    fn description() -> &'static str {
        "Répartition des élèves dans une classe pour l'année en cours"
    }
}
