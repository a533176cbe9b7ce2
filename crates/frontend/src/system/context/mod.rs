//! Where the signed-in user works: school, academic year, active period.

pub mod api;

use contracts::domain::common::{EntityId, EntityRef};
use contracts::system::auth::UserInfo;
use contracts::system::context::ContexteResponse;
use leptos::prelude::*;

/// Ambient parameters of every scoped request and screen.
#[derive(Debug, Clone, PartialEq)]
pub struct AppContext {
    pub ecole: EntityRef,
    pub annee: EntityRef,
    pub periode: Option<EntityRef>,
    pub periodes: Vec<EntityRef>,
    pub user: UserInfo,
}

impl AppContext {
    pub fn new(response: ContexteResponse, user: UserInfo) -> Self {
        Self {
            ecole: response.ecole,
            annee: response.annee,
            periode: response.periode,
            periodes: response.periodes,
            user,
        }
    }

    /// Same context on another period of the year. Unknown ids leave it as is.
    pub fn with_periode(&self, id: EntityId) -> Self {
        let mut next = self.clone();
        if let Some(p) = self.periodes.iter().find(|p| p.id == id) {
            next.periode = Some(p.clone());
        }
        next
    }

    pub fn periode_label(&self) -> String {
        self.periode
            .as_ref()
            .map(|p| p.display())
            .unwrap_or_else(|| "Aucune période".to_string())
    }
}

/// Provided by the workspace once the context is resolved.
pub fn use_app_context() -> RwSignal<AppContext> {
    use_context::<RwSignal<AppContext>>().expect("AppContext not provided: context not resolved yet")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AppContext {
        let response: ContexteResponse = serde_json::from_value(serde_json::json!({
            "ecole": { "id": 1, "libelle": "Collège Saint-Michel" },
            "annee": { "id": 2024, "libelle": "2024-2025" },
            "periode": { "id": 1, "code": "T1", "libelle": "Trimestre 1" },
            "periodes": [
                { "id": 1, "code": "T1", "libelle": "Trimestre 1" },
                { "id": 2, "code": "T2", "libelle": "Trimestre 2" }
            ]
        }))
        .unwrap();
        let user = serde_json::from_value(serde_json::json!({ "id": 3, "username": "censeur" })).unwrap();
        AppContext::new(response, user)
    }

    #[test]
    fn switching_period() {
        let ctx = sample();
        assert_eq!(ctx.periode_label(), "T1 - Trimestre 1");
        let next = ctx.with_periode(2);
        assert_eq!(next.periode.as_ref().map(|p| p.id), Some(2));
        assert_eq!(ctx.with_periode(99), ctx);
    }
}
