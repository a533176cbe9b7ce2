//! Login, session and account types.

mod password;
mod profile;

pub use password::ChangePasswordRequest;
pub use profile::UpdateProfileRequest;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub user: UserInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub nom: String,
    #[serde(default)]
    pub prenoms: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl UserInfo {
    /// Name for the header; falls back to the login.
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.prenoms.trim(), self.nom.trim());
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_falls_back_to_username() {
        let mut user: UserInfo =
            serde_json::from_str(r#"{"id":1,"username":"directeur"}"#).unwrap();
        assert_eq!(user.display_name(), "directeur");
        user.nom = "Kouadio".into();
        user.prenoms = "Jean".into();
        assert_eq!(user.display_name(), "Jean Kouadio");
    }
}
