use serde::{Deserialize, Serialize};

use crate::domain::common::EntityRef;

/// Response of `GET /contexte`: where the signed-in user works.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContexteResponse {
    pub ecole: EntityRef,
    pub annee: EntityRef,
    /// Active period, if the school has opened one.
    #[serde(default)]
    pub periode: Option<EntityRef>,
    #[serde(default)]
    pub periodes: Vec<EntityRef>,
}
