pub mod schema;

pub use schema::{apply_note_bounds, SCHEMA};

use crate::usecases::common::UseCaseMetadata;

pub struct ImportNotes;

impl UseCaseMetadata for ImportNotes {
    fn usecase_index() -> &'static str {
        "u502"
    }

    fn usecase_name() -> &'static str {
        "import_notes"
    }

    fn display_name() -> &'static str {
        "Import des notes"
    }

    fn description() -> &'static str {
        "Saisie des notes d'une évaluation depuis un fichier"
    }
}
