use serde::{Deserialize, Serialize};

use crate::domain::common::{non_empty, validate_code_libelle, EntityId, EntityRef};

/// Matière enseignée.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Matiere {
    pub id: EntityId,
    pub code: String,
    pub libelle: String,
    #[serde(default)]
    pub categorie: Option<String>,
}

impl Matiere {
    pub fn to_ref(&self) -> EntityRef {
        EntityRef::new(self.id, Some(self.code.clone()), self.libelle.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MatiereDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    pub code: String,
    pub libelle: String,
    pub categorie: Option<String>,
}

impl From<&Matiere> for MatiereDto {
    fn from(m: &Matiere) -> Self {
        Self {
            id: Some(m.id),
            code: m.code.clone(),
            libelle: m.libelle.clone(),
            categorie: m.categorie.clone(),
        }
    }
}

impl MatiereDto {
    pub fn validate(&self) -> Result<(), String> {
        validate_code_libelle(&self.code, &self.libelle)
    }

    /// Trimmed copy ready to send.
    pub fn normalized(&self) -> Self {
        Self {
            id: self.id,
            code: self.code.trim().to_uppercase(),
            libelle: self.libelle.trim().to_string(),
            categorie: self.categorie.as_deref().and_then(non_empty),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_trims_and_drops_blank_category() {
        let dto = MatiereDto {
            id: None,
            code: " math ".into(),
            libelle: " Mathématiques ".into(),
            categorie: Some("  ".into()),
        };
        let n = dto.normalized();
        assert_eq!(n.code, "MATH");
        assert_eq!(n.libelle, "Mathématiques");
        assert_eq!(n.categorie, None);
        assert!(n.validate().is_ok());
    }
}
