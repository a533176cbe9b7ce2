use contracts::domain::common::{EntityId, ReferenceKind};
use serde::Serialize;

use crate::system::context::AppContext;

/// CRUD collections exposed by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Classes,
    Salles,
    Eleves,
    Personnel,
    Matieres,
    Evaluations,
    Coefficients,
}

impl Resource {
    pub fn path(&self) -> &'static str {
        match self {
            Self::Classes => "/classes",
            Self::Salles => "/salles",
            Self::Eleves => "/eleves",
            Self::Personnel => "/personnel",
            Self::Matieres => "/matieres",
            Self::Evaluations => "/evaluations",
            Self::Coefficients => "/coefficients",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
struct ScopeQuery {
    ecole: i64,
    annee: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    periode: Option<i64>,
}

/// URL builder for every API call the console makes.
///
/// Requests made after the context is resolved carry the school, year and
/// period as query parameters; auth calls are unscoped.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoints {
    root: String,
    scope: Option<ScopeQuery>,
}

impl Endpoints {
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into().trim_end_matches('/').to_string(),
            scope: None,
        }
    }

    pub fn scoped(&self, ctx: &AppContext) -> Self {
        Self {
            root: self.root.clone(),
            scope: Some(ScopeQuery {
                ecole: ctx.ecole.id,
                annee: ctx.annee.id,
                periode: ctx.periode.as_ref().map(|p| p.id),
            }),
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    fn url(&self, path: &str, extra: &[(&str, String)]) -> String {
        let mut query = self
            .scope
            .as_ref()
            .and_then(|s| serde_qs::to_string(s).ok())
            .unwrap_or_default();
        for (key, value) in extra {
            if !query.is_empty() {
                query.push('&');
            }
            query.push_str(key);
            query.push('=');
            query.push_str(&urlencoding::encode(value));
        }
        if query.is_empty() {
            format!("{}{}", self.root, path)
        } else {
            format!("{}{}?{}", self.root, path, query)
        }
    }

    // auth

    pub fn login(&self) -> String {
        format!("{}/auth/login", self.root)
    }

    pub fn logout(&self) -> String {
        format!("{}/auth/logout", self.root)
    }

    pub fn me(&self) -> String {
        format!("{}/auth/me", self.root)
    }

    pub fn change_password(&self) -> String {
        format!("{}/auth/password", self.root)
    }

    pub fn profile(&self) -> String {
        format!("{}/auth/profile", self.root)
    }

    pub fn context(&self) -> String {
        format!("{}/contexte", self.root)
    }

    // scoped

    pub fn dashboard(&self) -> String {
        self.url("/tableau-de-bord", &[])
    }

    pub fn reference(&self, kind: ReferenceKind) -> String {
        self.url(&format!("/references/{}", kind.path()), &[])
    }

    pub fn collection(&self, resource: Resource) -> String {
        self.url(resource.path(), &[])
    }

    pub fn collection_filtered(&self, resource: Resource, filters: &[(&str, String)]) -> String {
        self.url(resource.path(), filters)
    }

    pub fn item(&self, resource: Resource, id: EntityId) -> String {
        self.url(&format!("{}/{}", resource.path(), id), &[])
    }

    /// Every cached URL of `resource` starts with this.
    pub fn invalidation_prefix(&self, resource: Resource) -> String {
        format!("{}{}", self.root, resource.path())
    }

    pub fn import_eleves(&self) -> String {
        self.url("/imports/eleves", &[])
    }

    pub fn import_notes(&self, evaluation_id: EntityId) -> String {
        self.url(&format!("/imports/notes/{}", evaluation_id), &[])
    }

    pub fn affectation_eleves(&self) -> String {
        self.url("/affectations/eleves", &[])
    }

    /// Classes currently taught by `professeur` in `matiere` (GET) or the
    /// assignment itself (POST, no filters).
    pub fn affectation_professeurs(&self, filter: Option<(EntityId, EntityId)>) -> String {
        match filter {
            Some((professeur, matiere)) => self.url(
                "/affectations/professeurs",
                &[
                    ("professeur", professeur.to_string()),
                    ("matiere", matiere.to_string()),
                ],
            ),
            None => self.url("/affectations/professeurs", &[]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::common::EntityRef;
    use contracts::system::auth::UserInfo;

    fn ctx(periode: Option<EntityRef>) -> AppContext {
        AppContext {
            ecole: EntityRef::new(7, None, "Lycée moderne"),
            annee: EntityRef::new(2024, None, "2024-2025"),
            periode,
            periodes: Vec::new(),
            user: UserInfo {
                id: 1,
                username: "admin".into(),
                nom: String::new(),
                prenoms: String::new(),
                email: None,
                contact: None,
                role: None,
            },
        }
    }

    #[test]
    fn unscoped_auth_urls() {
        let e = Endpoints::new("http://localhost:3000/api/v1/");
        assert_eq!(e.login(), "http://localhost:3000/api/v1/auth/login");
        assert_eq!(e.context(), "http://localhost:3000/api/v1/contexte");
        assert_eq!(e.collection(Resource::Salles), "http://localhost:3000/api/v1/salles");
    }

    #[test]
    fn scoped_urls_carry_context_ids() {
        let e = Endpoints::new("/api/v1").scoped(&ctx(Some(EntityRef::from_id(3))));
        assert_eq!(e.item(Resource::Classes, 12), "/api/v1/classes/12?ecole=7&annee=2024&periode=3");
        assert_eq!(e.import_notes(55), "/api/v1/imports/notes/55?ecole=7&annee=2024&periode=3");
        assert_eq!(
            e.reference(ReferenceKind::TypesEvaluation),
            "/api/v1/references/types-evaluation?ecole=7&annee=2024&periode=3"
        );

        let e = Endpoints::new("/api/v1").scoped(&ctx(None));
        assert_eq!(
            e.collection_filtered(Resource::Eleves, &[("classe", "4".into()), ("q", "kone awa".into())]),
            "/api/v1/eleves?ecole=7&annee=2024&classe=4&q=kone%20awa"
        );
        assert_eq!(
            e.affectation_professeurs(Some((9, 2))),
            "/api/v1/affectations/professeurs?ecole=7&annee=2024&professeur=9&matiere=2"
        );
    }

    #[test]
    fn invalidation_prefix_covers_item_and_collection() {
        let e = Endpoints::new("/api/v1").scoped(&ctx(None));
        let prefix = e.invalidation_prefix(Resource::Classes);
        assert!(e.collection(Resource::Classes).starts_with(&prefix));
        assert!(e.item(Resource::Classes, 1).starts_with(&prefix));
        assert!(!e.collection(Resource::Salles).starts_with(&prefix));
    }
}
