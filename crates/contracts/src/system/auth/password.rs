use serde::{Deserialize, Serialize};

pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
    /// Only checked client-side.
    #[serde(skip)]
    pub confirm_password: String,
}

impl ChangePasswordRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.old_password.is_empty() {
            return Err("Saisissez votre mot de passe actuel".into());
        }
        if self.new_password.chars().count() < MIN_PASSWORD_LEN {
            return Err(format!(
                "Le nouveau mot de passe doit contenir au moins {} caractères",
                MIN_PASSWORD_LEN
            ));
        }
        let has_letter = self.new_password.chars().any(|c| c.is_alphabetic());
        let has_digit = self.new_password.chars().any(|c| c.is_ascii_digit());
        if !has_letter || !has_digit {
            return Err("Le nouveau mot de passe doit contenir des lettres et des chiffres".into());
        }
        if self.new_password != self.confirm_password {
            return Err("La confirmation ne correspond pas au nouveau mot de passe".into());
        }
        if self.new_password == self.old_password {
            return Err("Le nouveau mot de passe doit être différent de l'actuel".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(old: &str, new: &str, confirm: &str) -> ChangePasswordRequest {
        ChangePasswordRequest {
            old_password: old.into(),
            new_password: new.into(),
            confirm_password: confirm.into(),
        }
    }

    #[test]
    fn accepts_strong_distinct_password() {
        assert!(req("ancien123", "nouveau2024", "nouveau2024").validate().is_ok());
    }

    #[test]
    fn rejects_each_rule() {
        assert!(req("", "nouveau2024", "nouveau2024").validate().is_err());
        assert!(req("ancien123", "court1", "court1").validate().is_err());
        assert!(req("ancien123", "seulementlettres", "seulementlettres").validate().is_err());
        assert!(req("ancien123", "12345678", "12345678").validate().is_err());
        assert!(req("ancien123", "nouveau2024", "nouveau2025").validate().is_err());
        assert!(req("meme2024ok", "meme2024ok", "meme2024ok").validate().is_err());
    }

    #[test]
    fn confirm_is_not_sent() {
        let json = serde_json::to_value(req("a", "b", "c")).unwrap();
        assert!(json.get("confirmPassword").is_none());
        assert_eq!(json["newPassword"], "b");
    }
}
