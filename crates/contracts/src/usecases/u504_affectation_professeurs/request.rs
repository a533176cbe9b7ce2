use serde::{Deserialize, Serialize};

use crate::domain::common::EntityRef;

/// Body of `POST /affectations/professeurs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffectationProfesseursRequest {
    pub professeur: EntityRef,
    pub matiere: EntityRef,
    pub annee_id: i64,
    pub classes: Vec<EntityRef>,
}
