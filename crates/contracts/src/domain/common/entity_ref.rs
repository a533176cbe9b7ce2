use serde::{Deserialize, Serialize};

/// Nested reference object used by the PULS API instead of bare foreign keys.
///
/// `{ "id": 12, "code": "6E1", "libelle": "Sixième 1" }`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct EntityRef {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default)]
    pub libelle: String,
}

impl EntityRef {
    pub fn new(id: i64, code: Option<String>, libelle: impl Into<String>) -> Self {
        Self {
            id,
            code,
            libelle: libelle.into(),
        }
    }

    /// Bare reference when only the id is known (the server resolves the rest).
    pub fn from_id(id: i64) -> Self {
        Self {
            id,
            code: None,
            libelle: String::new(),
        }
    }

    /// Rebuild the nested shape for a selected id out of a reference list.
    ///
    /// Falls back to a bare id reference when the list does not know the id,
    /// so a stale cache never blocks a save.
    pub fn from_choices(id: i64, choices: &[EntityRef]) -> Self {
        choices
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .unwrap_or_else(|| Self::from_id(id))
    }

    /// Label for selects and table cells: "CODE - Libellé" or just the libellé.
    pub fn display(&self) -> String {
        match self.code.as_deref() {
            Some(code) if !code.is_empty() => format!("{} - {}", code, self.libelle),
            _ => self.libelle.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_choices_reuses_known_reference() {
        let choices = vec![
            EntityRef::new(1, Some("6E".into()), "Sixième"),
            EntityRef::new(2, Some("5E".into()), "Cinquième"),
        ];
        let r = EntityRef::from_choices(2, &choices);
        assert_eq!(r.libelle, "Cinquième");
        assert_eq!(r.code.as_deref(), Some("5E"));
    }

    #[test]
    fn from_choices_falls_back_to_bare_id() {
        let r = EntityRef::from_choices(42, &[]);
        assert_eq!(r, EntityRef::from_id(42));
    }

    #[test]
    fn serializes_without_empty_code() {
        let json = serde_json::to_value(EntityRef::new(3, None, "Salle A")).unwrap();
        assert_eq!(json, serde_json::json!({ "id": 3, "libelle": "Salle A" }));
    }

    #[test]
    fn display_prefers_code() {
        assert_eq!(EntityRef::new(1, Some("M1".into()), "Maths").display(), "M1 - Maths");
        assert_eq!(EntityRef::new(1, None, "Maths").display(), "Maths");
    }
}
