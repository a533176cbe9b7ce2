use serde::{Deserialize, Serialize};

use crate::domain::common::{validate_code_libelle, EntityId, EntityRef};

/// Salle de cours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Salle {
    pub id: EntityId,
    pub code: String,
    pub libelle: String,
    #[serde(default)]
    pub capacite: Option<u32>,
}

impl Salle {
    pub fn to_ref(&self) -> EntityRef {
        EntityRef::new(self.id, Some(self.code.clone()), self.libelle.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SalleDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    pub code: String,
    pub libelle: String,
    pub capacite: Option<u32>,
}

impl From<&Salle> for SalleDto {
    fn from(s: &Salle) -> Self {
        Self {
            id: Some(s.id),
            code: s.code.clone(),
            libelle: s.libelle.clone(),
            capacite: s.capacite,
        }
    }
}

impl SalleDto {
    pub fn validate(&self) -> Result<(), String> {
        validate_code_libelle(&self.code, &self.libelle)?;
        if let Some(0) = self.capacite {
            return Err("La capacité doit être supérieure à zéro".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_requires_code_and_label() {
        let mut dto = SalleDto {
            id: None,
            code: "".into(),
            libelle: "Salle A".into(),
            capacite: Some(40),
        };
        assert!(dto.validate().is_err());
        dto.code = "SA".into();
        assert!(dto.validate().is_ok());
        dto.libelle = "   ".into();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn new_salle_omits_id() {
        let dto = SalleDto {
            id: None,
            code: "SA".into(),
            libelle: "Salle A".into(),
            capacite: None,
        };
        let json = serde_json::to_value(&dto).unwrap();
        assert!(json.get("id").is_none());
    }
}
