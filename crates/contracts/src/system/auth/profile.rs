use serde::{Deserialize, Serialize};

use crate::domain::a004_personnel::looks_like_email;
use crate::domain::common::non_empty;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub nom: String,
    pub prenoms: String,
    pub email: Option<String>,
    pub contact: Option<String>,
}

impl UpdateProfileRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.nom.trim().is_empty() {
            return Err("Le nom est obligatoire".into());
        }
        if self.prenoms.trim().is_empty() {
            return Err("Les prénoms sont obligatoires".into());
        }
        if let Some(email) = self.email.as_deref().and_then(non_empty) {
            if !looks_like_email(&email) {
                return Err(format!("Adresse e-mail invalide: {}", email));
            }
        }
        Ok(())
    }

    /// Trimmed copy with blank optionals dropped.
    pub fn normalized(&self) -> Self {
        Self {
            nom: self.nom.trim().to_string(),
            prenoms: self.prenoms.trim().to_string(),
            email: self.email.as_deref().and_then(non_empty),
            contact: self.contact.as_deref().and_then(non_empty),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_and_normalizes() {
        let req = UpdateProfileRequest {
            nom: " Kouadio ".into(),
            prenoms: "Jean".into(),
            email: Some("  ".into()),
            contact: Some("0700000000".into()),
        };
        assert!(req.validate().is_ok());
        let n = req.normalized();
        assert_eq!(n.nom, "Kouadio");
        assert_eq!(n.email, None);

        let bad = UpdateProfileRequest {
            email: Some("jean@".into()),
            ..n
        };
        assert!(bad.validate().is_err());
    }
}
