use serde::{Deserialize, Serialize};

use crate::domain::common::{non_empty, EntityId, EntityRef};

/// Membre du personnel (enseignant, administration, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Personnel {
    pub id: EntityId,
    pub matricule: String,
    pub nom: String,
    pub prenoms: String,
    pub fonction: EntityRef,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl Personnel {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.nom, self.prenoms)
    }

    pub fn to_ref(&self) -> EntityRef {
        EntityRef::new(self.id, Some(self.matricule.clone()), self.full_name())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PersonnelDto {
    pub id: Option<EntityId>,
    pub matricule: String,
    pub nom: String,
    pub prenoms: String,
    pub fonction_id: Option<EntityId>,
    pub contact: String,
    pub email: String,
}

impl From<&Personnel> for PersonnelDto {
    fn from(p: &Personnel) -> Self {
        Self {
            id: Some(p.id),
            matricule: p.matricule.clone(),
            nom: p.nom.clone(),
            prenoms: p.prenoms.clone(),
            fonction_id: Some(p.fonction.id),
            contact: p.contact.clone().unwrap_or_default(),
            email: p.email.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonnelPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    pub matricule: String,
    pub nom: String,
    pub prenoms: String,
    pub fonction: EntityRef,
    pub contact: Option<String>,
    pub email: Option<String>,
}

/// Loose e-mail shape check: one `@`, something on both sides, a dot in the domain.
pub fn looks_like_email(value: &str) -> bool {
    let mut parts = value.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        _ => false,
    }
}

impl PersonnelDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.matricule.trim().is_empty() {
            return Err("Le matricule est obligatoire".into());
        }
        if self.nom.trim().is_empty() || self.prenoms.trim().is_empty() {
            return Err("Le nom et les prénoms sont obligatoires".into());
        }
        if self.fonction_id.is_none() {
            return Err("La fonction est obligatoire".into());
        }
        if let Some(email) = non_empty(&self.email) {
            if !looks_like_email(&email) {
                return Err(format!("Adresse e-mail invalide: {}", email));
            }
        }
        Ok(())
    }

    pub fn to_payload(&self, fonctions: &[EntityRef]) -> Result<PersonnelPayload, String> {
        self.validate()?;
        let fonction_id = self
            .fonction_id
            .ok_or_else(|| "La fonction est obligatoire".to_string())?;
        Ok(PersonnelPayload {
            id: self.id,
            matricule: self.matricule.trim().to_uppercase(),
            nom: self.nom.trim().to_string(),
            prenoms: self.prenoms.trim().to_string(),
            fonction: EntityRef::from_choices(fonction_id, fonctions),
            contact: non_empty(&self.contact),
            email: non_empty(&self.email),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shape() {
        assert!(looks_like_email("prof@ecole.ci"));
        assert!(!looks_like_email("prof@ecole"));
        assert!(!looks_like_email("@ecole.ci"));
        assert!(!looks_like_email("a@b@c.ci"));
    }

    #[test]
    fn payload_resolves_fonction() {
        let dto = PersonnelDto {
            id: Some(5),
            matricule: "p-01".into(),
            nom: "Traoré".into(),
            prenoms: "Issa".into(),
            fonction_id: Some(2),
            contact: "".into(),
            email: "issa@ecole.ci".into(),
        };
        let fonctions = vec![EntityRef::new(2, None, "Enseignant")];
        let p = dto.to_payload(&fonctions).unwrap();
        assert_eq!(p.fonction.libelle, "Enseignant");
        assert_eq!(p.matricule, "P-01");
        assert_eq!(p.contact, None);
    }

    #[test]
    fn missing_fonction_is_rejected() {
        let dto = PersonnelDto {
            matricule: "P1".into(),
            nom: "A".into(),
            prenoms: "B".into(),
            ..Default::default()
        };
        assert_eq!(dto.validate().unwrap_err(), "La fonction est obligatoire");
    }
}
