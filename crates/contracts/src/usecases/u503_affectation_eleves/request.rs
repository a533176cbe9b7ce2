use serde::{Deserialize, Serialize};

use crate::domain::common::EntityRef;

/// Body of `POST /affectations/eleves`. The target list is sent whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffectationElevesRequest {
    pub classe: EntityRef,
    pub annee_id: i64,
    pub eleves: Vec<EntityRef>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_nested_references() {
        let body = AffectationElevesRequest {
            classe: EntityRef::new(4, Some("6E1".into()), "Sixième 1"),
            annee_id: 2024,
            eleves: vec![EntityRef::new(10, None, "KONE Awa")],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["anneeId"], 2024);
        assert_eq!(json["classe"]["code"], "6E1");
        assert_eq!(json["eleves"][0]["id"], 10);
        assert!(json["eleves"][0].get("code").is_none());
    }
}
