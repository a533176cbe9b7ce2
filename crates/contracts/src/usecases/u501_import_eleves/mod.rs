pub mod schema;

pub use schema::SCHEMA;

use crate::usecases::common::UseCaseMetadata;

pub struct ImportEleves;

impl UseCaseMetadata for ImportEleves {
    fn usecase_index() -> &'static str {
        "u501"
    }

    fn usecase_name() -> &'static str {
        "import_eleves"
    }

    fn display_name() -> &'static str {
        "Import des élèves"
    }

    fn description() -> &'static str {
        "Chargement d'une liste d'élèves depuis un fichier Excel ou CSV"
    }
}
