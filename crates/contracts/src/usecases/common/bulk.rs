use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::shared::import::FieldValue;

/// One validated row as sent to the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportPayloadRow {
    pub line: usize,
    pub fields: BTreeMap<String, FieldValue>,
}

/// Body of `POST /imports/*`: the whole upload in one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkImportRequest {
    pub ecole_id: i64,
    pub annee_id: i64,
    pub rows: Vec<ImportPayloadRow>,
}

/// Per-row verdict of the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowOutcome {
    pub line: usize,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BulkImportResponse {
    #[serde(default)]
    pub outcomes: Vec<RowOutcome>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_uses_camel_case() {
        let mut fields = BTreeMap::new();
        fields.insert("note".to_string(), FieldValue::Number(12.5));
        let body = BulkImportRequest {
            ecole_id: 3,
            annee_id: 2024,
            rows: vec![ImportPayloadRow { line: 2, fields }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["ecoleId"], 3);
        assert_eq!(json["anneeId"], 2024);
        assert_eq!(json["rows"][0]["line"], 2);
        assert_eq!(json["rows"][0]["fields"]["note"], 12.5);
    }

    #[test]
    fn response_tolerates_missing_fields() {
        let resp: BulkImportResponse =
            serde_json::from_str(r#"{"outcomes":[{"line":2,"success":true}]}"#).unwrap();
        assert_eq!(resp.outcomes[0].message, None);

        let empty: BulkImportResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.outcomes.is_empty());
    }
}
