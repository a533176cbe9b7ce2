use serde::{Deserialize, Serialize};

use crate::domain::common::{EntityId, EntityRef};

/// Coefficient d'une matière pour une branche.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coefficient {
    pub id: EntityId,
    pub branche: EntityRef,
    pub matiere: EntityRef,
    pub valeur: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CoefficientDto {
    pub id: Option<EntityId>,
    pub branche_id: Option<EntityId>,
    pub matiere_id: Option<EntityId>,
    pub valeur: String,
}

impl From<&Coefficient> for CoefficientDto {
    fn from(c: &Coefficient) -> Self {
        Self {
            id: Some(c.id),
            branche_id: Some(c.branche.id),
            matiere_id: Some(c.matiere.id),
            valeur: c.valeur.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoefficientPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    pub branche: EntityRef,
    pub matiere: EntityRef,
    pub valeur: f64,
}

impl CoefficientDto {
    fn parsed_valeur(&self) -> Result<f64, String> {
        match self.valeur.trim().parse::<f64>() {
            Ok(v) if v.is_finite() && v > 0.0 && v <= 20.0 => Ok(v),
            _ => Err(format!(
                "Coefficient invalide: '{}' (attendu entre 0 et 20)",
                self.valeur.trim()
            )),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.branche_id.is_none() {
            return Err("La branche est obligatoire".into());
        }
        if self.matiere_id.is_none() {
            return Err("La matière est obligatoire".into());
        }
        self.parsed_valeur().map(|_| ())
    }

    pub fn to_payload(
        &self,
        branches: &[EntityRef],
        matieres: &[EntityRef],
    ) -> Result<CoefficientPayload, String> {
        self.validate()?;
        Ok(CoefficientPayload {
            id: self.id,
            branche: EntityRef::from_choices(self.branche_id.unwrap_or_default(), branches),
            matiere: EntityRef::from_choices(self.matiere_id.unwrap_or_default(), matieres),
            valeur: self.parsed_valeur()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valeur_bounds() {
        let mut dto = CoefficientDto {
            id: None,
            branche_id: Some(1),
            matiere_id: Some(2),
            valeur: "4".into(),
        };
        assert!(dto.validate().is_ok());
        dto.valeur = "0".into();
        assert!(dto.validate().is_err());
        dto.valeur = "abc".into();
        assert!(dto.validate().is_err());
        dto.valeur = "2.5".into();
        assert_eq!(dto.to_payload(&[], &[]).unwrap().valeur, 2.5);
    }
}
