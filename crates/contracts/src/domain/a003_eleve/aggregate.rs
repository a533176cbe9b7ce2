use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::common::{non_empty, EntityId, EntityRef, Sexe};

/// Élève inscrit dans l'établissement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Eleve {
    pub id: EntityId,
    pub matricule: String,
    pub nom: String,
    pub prenoms: String,
    #[serde(default)]
    pub sexe: Option<Sexe>,
    #[serde(default)]
    pub date_naissance: Option<NaiveDate>,
    #[serde(default)]
    pub lieu_naissance: Option<String>,
    #[serde(default)]
    pub classe: Option<EntityRef>,
}

impl Eleve {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.nom, self.prenoms)
    }

    pub fn to_ref(&self) -> EntityRef {
        EntityRef::new(self.id, Some(self.matricule.clone()), self.full_name())
    }
}

/// Form state. Dates stay as the `yyyy-mm-dd` text an `<input type="date">` produces.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EleveDto {
    pub id: Option<EntityId>,
    pub matricule: String,
    pub nom: String,
    pub prenoms: String,
    pub sexe: Option<Sexe>,
    pub date_naissance: String,
    pub lieu_naissance: String,
}

impl From<&Eleve> for EleveDto {
    fn from(e: &Eleve) -> Self {
        Self {
            id: Some(e.id),
            matricule: e.matricule.clone(),
            nom: e.nom.clone(),
            prenoms: e.prenoms.clone(),
            sexe: e.sexe,
            date_naissance: e
                .date_naissance
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            lieu_naissance: e.lieu_naissance.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElevePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    pub matricule: String,
    pub nom: String,
    pub prenoms: String,
    pub sexe: Option<Sexe>,
    pub date_naissance: Option<NaiveDate>,
    pub lieu_naissance: Option<String>,
}

impl EleveDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.matricule.trim().is_empty() {
            return Err("Le matricule est obligatoire".into());
        }
        if self.nom.trim().is_empty() {
            return Err("Le nom est obligatoire".into());
        }
        if self.prenoms.trim().is_empty() {
            return Err("Les prénoms sont obligatoires".into());
        }
        self.parsed_birth_date()?;
        Ok(())
    }

    fn parsed_birth_date(&self) -> Result<Option<NaiveDate>, String> {
        match non_empty(&self.date_naissance) {
            None => Ok(None),
            Some(text) => NaiveDate::parse_from_str(&text, "%Y-%m-%d")
                .map(Some)
                .map_err(|_| format!("Date de naissance invalide: {}", text)),
        }
    }

    pub fn to_payload(&self) -> Result<ElevePayload, String> {
        self.validate()?;
        Ok(ElevePayload {
            id: self.id,
            matricule: self.matricule.trim().to_uppercase(),
            nom: self.nom.trim().to_string(),
            prenoms: self.prenoms.trim().to_string(),
            sexe: self.sexe,
            date_naissance: self.parsed_birth_date()?,
            lieu_naissance: non_empty(&self.lieu_naissance),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto() -> EleveDto {
        EleveDto {
            id: None,
            matricule: " 12345a ".into(),
            nom: "KOUASSI".into(),
            prenoms: "Ama Grâce".into(),
            sexe: Some(Sexe::Feminin),
            date_naissance: "2012-03-09".into(),
            lieu_naissance: "".into(),
        }
    }

    #[test]
    fn payload_normalizes_matricule_and_dates() {
        let p = dto().to_payload().unwrap();
        assert_eq!(p.matricule, "12345A");
        assert_eq!(p.date_naissance, NaiveDate::from_ymd_opt(2012, 3, 9));
        assert_eq!(p.lieu_naissance, None);
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["dateNaissance"], "2012-03-09");
        assert_eq!(json["sexe"], "F");
    }

    #[test]
    fn bad_birth_date_is_reported() {
        let mut d = dto();
        d.date_naissance = "09/03/2012".into();
        let err = d.validate().unwrap_err();
        assert!(err.contains("Date de naissance"));
    }

    #[test]
    fn required_fields() {
        let mut d = dto();
        d.prenoms = " ".into();
        assert!(d.validate().is_err());
    }
}
