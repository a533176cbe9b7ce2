//! Blocking browser dialogs.

/// `window.confirm`; `false` when no window is available.
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

pub fn alert(message: &str) {
    if let Some(w) = web_sys::window() {
        let _ = w.alert_with_message(message);
    }
}

/// Text of the alert raised when a save request fails.
pub fn save_failed_message(error: &impl std::fmt::Display) -> String {
    format!("Échec de l'enregistrement: {}", error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::api::ApiError;

    #[test]
    fn save_failure_carries_the_server_message() {
        let error = ApiError::Http {
            status: 409,
            message: "Code déjà utilisé".into(),
        };
        let text = save_failed_message(&error);
        assert!(text.starts_with("Échec de l'enregistrement: "));
        assert!(text.contains("Code déjà utilisé"));
    }
}
