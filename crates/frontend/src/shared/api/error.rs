use thiserror::Error;

/// Failure of one HTTP call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Serveur injoignable: {0}")]
    Network(String),
    #[error("{message}")]
    Http { status: u16, message: String },
    #[error("Réponse inattendue du serveur: {0}")]
    Decode(String),
}

impl ApiError {
    /// Builds an `Http` error out of a failed response body.
    pub fn from_response(status: u16, body: &str) -> Self {
        Self::Http {
            status,
            message: extract_message(status, body),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

const MESSAGE_KEYS: &[&str] = &["message", "error", "detail"];
const MAX_RAW_LEN: usize = 300;

/// Human message for a failed response.
///
/// JSON bodies are searched for `message`, `error` then `detail`; other
/// non-empty bodies are shown as-is (truncated); empty bodies fall back to a
/// status-derived text.
pub fn extract_message(status: u16, body: &str) -> String {
    let body = body.trim();
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        let found = MESSAGE_KEYS
            .iter()
            .filter_map(|key| json.get(*key))
            .find_map(|v| match v {
                serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
                serde_json::Value::Object(o) => o
                    .get("message")
                    .and_then(|m| m.as_str())
                    .map(|m| m.to_string()),
                _ => None,
            });
        if let Some(message) = found {
            return message;
        }
    } else if !body.is_empty() && !body.starts_with('<') {
        return body.chars().take(MAX_RAW_LEN).collect();
    }
    status_message(status)
}

fn status_message(status: u16) -> String {
    match status {
        400 => "Requête invalide".to_string(),
        401 => "Session expirée, veuillez vous reconnecter".to_string(),
        403 => "Accès refusé".to_string(),
        404 => "Ressource introuvable".to_string(),
        409 => "Conflit avec des données existantes".to_string(),
        422 => "Données refusées par le serveur".to_string(),
        s if s >= 500 => format!("Erreur serveur (HTTP {})", s),
        s => format!("Erreur HTTP {}", s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_keys_in_priority_order() {
        assert_eq!(
            extract_message(400, r#"{"detail":"d","message":"Matricule en double"}"#),
            "Matricule en double"
        );
        assert_eq!(extract_message(400, r#"{"error":"Classe pleine"}"#), "Classe pleine");
        assert_eq!(
            extract_message(422, r#"{"error":{"message":"nested"}}"#),
            "nested"
        );
    }

    #[test]
    fn falls_back_to_raw_text_then_status() {
        assert_eq!(extract_message(500, "boom"), "boom");
        assert_eq!(extract_message(404, ""), "Ressource introuvable");
        assert_eq!(extract_message(502, "<html>bad gateway</html>"), "Erreur serveur (HTTP 502)");
        assert_eq!(extract_message(400, r#"{"code":12}"#), "Requête invalide");
    }

    #[test]
    fn display_uses_message() {
        let err = ApiError::from_response(409, r#"{"message":"Code déjà utilisé"}"#);
        assert_eq!(err.to_string(), "Code déjà utilisé");
        assert_eq!(err.status(), Some(409));
        assert!(!err.is_unauthorized());
    }
}
