use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::schema::ImportSchema;
use super::validator::{validate_row, RawRow};
use super::value::FieldValue;
use crate::usecases::common::{ImportPayloadRow, RowOutcome};

/// One spreadsheet line after validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRow {
    /// 1-based line in the source file, blank lines included.
    pub line: usize,
    pub raw_values: RawRow,
    pub normalized_fields: BTreeMap<String, FieldValue>,
    pub validation_errors: Vec<String>,
    pub is_valid: bool,
    /// Server verdict, filled after submission.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<RowOutcome>,
}

impl ImportRow {
    pub fn new(
        line: usize,
        raw_values: RawRow,
        normalized_fields: BTreeMap<String, FieldValue>,
        validation_errors: Vec<String>,
    ) -> Self {
        let is_valid = validation_errors.is_empty();
        Self {
            line,
            raw_values,
            normalized_fields,
            validation_errors,
            is_valid,
            outcome: None,
        }
    }

    /// Adds a post-validation error (cross-field or context rules).
    pub fn push_error(&mut self, error: impl Into<String>) {
        self.validation_errors.push(error.into());
        self.is_valid = false;
    }

    pub fn field(&self, key: &str) -> Option<&FieldValue> {
        self.normalized_fields.get(key)
    }

    /// Rejected by the server after a submission.
    pub fn is_rejected(&self) -> bool {
        matches!(&self.outcome, Some(o) if !o.success)
    }
}

/// Result of merging server outcomes into a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeSummary {
    pub accepted: usize,
    pub rejected: usize,
    /// Valid rows the server said nothing about.
    pub unreported: usize,
}

/// All rows of one upload with their counts. Rows are only reachable through
/// methods that recount, so `valid_count + invalid_count == total_count`
/// always holds. Deserialization reads the rows and recounts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredBatch")]
pub struct ImportBatch {
    rows: Vec<ImportRow>,
    total_count: usize,
    valid_count: usize,
    invalid_count: usize,
}

#[derive(Deserialize)]
struct StoredBatch {
    #[serde(default)]
    rows: Vec<ImportRow>,
}

impl From<StoredBatch> for ImportBatch {
    fn from(stored: StoredBatch) -> Self {
        Self::new(stored.rows)
    }
}

impl ImportBatch {
    pub fn new(rows: Vec<ImportRow>) -> Self {
        let mut batch = Self {
            rows,
            ..Default::default()
        };
        batch.recount();
        batch
    }

    /// Validates rows that carry their source line.
    pub fn validate_lines<I>(rows: I, schema: &ImportSchema) -> Self
    where
        I: IntoIterator<Item = (usize, RawRow)>,
    {
        let rows = rows
            .into_iter()
            .map(|(line, raw)| validate_row(line, raw, schema))
            .collect();
        Self::new(rows)
    }

    /// Validates contiguous rows right under the header: the first is line 2.
    pub fn validate(rows: Vec<RawRow>, schema: &ImportSchema) -> Self {
        Self::validate_lines(
            rows.into_iter().enumerate().map(|(idx, raw)| (idx + 2, raw)),
            schema,
        )
    }

    fn recount(&mut self) {
        self.total_count = self.rows.len();
        self.valid_count = self.rows.iter().filter(|r| r.is_valid).count();
        self.invalid_count = self.total_count - self.valid_count;
    }

    pub fn rows(&self) -> &[ImportRow] {
        &self.rows
    }

    pub fn total_count(&self) -> usize {
        self.total_count
    }

    pub fn valid_count(&self) -> usize {
        self.valid_count
    }

    pub fn invalid_count(&self) -> usize {
        self.invalid_count
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Mutates rows in place, then recounts.
    pub fn update_rows<F>(&mut self, f: F)
    where
        F: FnOnce(&mut [ImportRow]),
    {
        f(&mut self.rows);
        self.recount();
    }

    pub fn valid_rows(&self) -> impl Iterator<Item = &ImportRow> {
        self.rows.iter().filter(|r| r.is_valid)
    }

    /// Body rows for the bulk request: valid rows only.
    pub fn payload_rows(&self) -> Vec<ImportPayloadRow> {
        self.valid_rows()
            .map(|r| ImportPayloadRow {
                line: r.line,
                fields: r.normalized_fields.clone(),
            })
            .collect()
    }

    /// Attaches server outcomes by line. Outcomes for unknown lines are
    /// ignored. Counts are unaffected: they describe client validation.
    pub fn merge_outcomes(&mut self, outcomes: &[RowOutcome]) -> OutcomeSummary {
        let by_line: HashMap<usize, &RowOutcome> = outcomes.iter().map(|o| (o.line, o)).collect();
        let mut summary = OutcomeSummary::default();

        for row in self.rows.iter_mut().filter(|r| r.is_valid) {
            match by_line.get(&row.line) {
                Some(outcome) => {
                    if outcome.success {
                        summary.accepted += 1;
                    } else {
                        summary.rejected += 1;
                    }
                    row.outcome = Some((*outcome).clone());
                }
                None => summary.unreported += 1,
            }
        }
        summary
    }

    /// Rows the user has to fix: invalid locally or rejected by the server.
    pub fn invalid_or_rejected(&self) -> impl Iterator<Item = &ImportRow> {
        self.rows.iter().filter(|r| !r.is_valid || r.is_rejected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::import::schema::FieldRule;

    const FIELDS: &[FieldRule] = &[
        FieldRule::text("nom", "Nom", &["nom"]).required(),
        FieldRule::text("prenoms", "Prénoms", &["prenom", "prenoms"]).required(),
        FieldRule::text("matricule", "Matricule", &["matricule"]).required(),
    ];
    const SCHEMA: ImportSchema = ImportSchema {
        name: "eleves",
        fields: FIELDS,
    };

    fn raw(nom: &str, prenom: &str, matricule: &str) -> RawRow {
        [("nom", nom), ("prenom", prenom), ("matricule", matricule)]
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn sample() -> ImportBatch {
        ImportBatch::validate(
            vec![
                raw("Kouassi", "Awa", "A001"),
                raw("Traoré", "Issa", ""),
                raw("Yao", "Marc", "A003"),
            ],
            &SCHEMA,
        )
    }

    fn assert_counts(batch: &ImportBatch) {
        assert_eq!(batch.valid_count() + batch.invalid_count(), batch.total_count());
        assert_eq!(batch.total_count(), batch.rows().len());
    }

    #[test]
    fn three_rows_one_missing_matricule() {
        let batch = sample();
        assert_eq!(batch.total_count(), 3);
        assert_eq!(batch.valid_count(), 2);
        assert_eq!(batch.invalid_count(), 1);

        let second = &batch.rows()[1];
        assert_eq!(second.line, 3);
        assert!(!second.is_valid);
        assert!(second
            .validation_errors
            .contains(&"matricule required".to_string()));
        assert_counts(&batch);
    }

    #[test]
    fn counts_hold_after_updates() {
        let mut batch = sample();
        batch.update_rows(|rows| rows[0].push_error("note: 25 is outside 0..20"));
        assert_eq!(batch.valid_count(), 1);
        assert_counts(&batch);

        batch.update_rows(|rows| {
            for row in rows.iter_mut() {
                row.push_error("x");
            }
        });
        assert_eq!(batch.valid_count(), 0);
        assert_eq!(batch.invalid_count(), 3);
        assert_counts(&batch);

        let empty = ImportBatch::new(Vec::new());
        assert!(empty.is_empty());
        assert_counts(&empty);
    }

    #[test]
    fn payload_contains_only_valid_rows() {
        let payload = sample().payload_rows();
        let lines: Vec<usize> = payload.iter().map(|r| r.line).collect();
        assert_eq!(lines, vec![2, 4]);
        assert_eq!(
            payload[0].fields.get("matricule"),
            Some(&FieldValue::Text("A001".into()))
        );
    }

    #[test]
    fn outcomes_merge_by_line() {
        let mut batch = sample();
        let summary = batch.merge_outcomes(&[
            RowOutcome {
                line: 4,
                success: false,
                message: Some("matricule déjà utilisé".into()),
            },
            RowOutcome {
                line: 99,
                success: true,
                message: None,
            },
        ]);
        assert_eq!(
            summary,
            OutcomeSummary {
                accepted: 0,
                rejected: 1,
                unreported: 1
            }
        );
        assert!(batch.rows()[2].is_rejected());
        assert_eq!(batch.rows()[0].outcome, None);
        assert_counts(&batch);

        let to_fix: Vec<usize> = batch.invalid_or_rejected().map(|r| r.line).collect();
        assert_eq!(to_fix, vec![3, 4]);
    }

    #[test]
    fn deserialized_counts_are_recomputed() {
        let mut json = serde_json::to_value(sample()).unwrap();
        json["totalCount"] = 10.into();
        json["validCount"] = 10.into();
        json["invalidCount"] = 0.into();

        let batch: ImportBatch = serde_json::from_value(json).unwrap();
        assert_eq!(
            (batch.total_count(), batch.valid_count(), batch.invalid_count()),
            (3, 2, 1)
        );
        assert_counts(&batch);
    }

    #[test]
    fn source_lines_survive_gaps() {
        let mut batch = ImportBatch::validate_lines(
            vec![(2, raw("Kone", "Awa", "A01")), (4, raw("Traore", "Ali", ""))],
            &SCHEMA,
        );
        let invalid: Vec<usize> = batch.invalid_or_rejected().map(|r| r.line).collect();
        assert_eq!(invalid, vec![4]);
        assert_eq!(batch.payload_rows()[0].line, 2);

        let summary = batch.merge_outcomes(&[RowOutcome {
            line: 2,
            success: true,
            message: None,
        }]);
        assert_eq!(summary.accepted, 1);
        assert_counts(&batch);
    }
}
