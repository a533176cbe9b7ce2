use crate::shared::import::{FieldRule, ImportBatch, ImportSchema};

const FIELDS: &[FieldRule] = &[
    FieldRule::text("matricule", "Matricule", &["matricule"]).required(),
    FieldRule::number("note", "Note", &["note", "notes"]).required(),
    FieldRule::text("appreciation", "Appréciation", &["appreciation", "observation"]),
];

pub const SCHEMA: ImportSchema = ImportSchema {
    name: "notes",
    fields: FIELDS,
};

/// Marks every note outside `0..=max` as invalid. Runs after schema
/// validation because `max` comes from the selected evaluation.
pub fn apply_note_bounds(batch: &mut ImportBatch, max: f64) {
    batch.update_rows(|rows| {
        for row in rows.iter_mut() {
            let note = row.field("note").and_then(|v| v.as_number());
            if let Some(note) = note {
                if !(0.0..=max).contains(&note) {
                    row.push_error(format!("note: {} is outside 0..{}", note, max));
                }
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::import::RawRow;

    fn row(matricule: &str, note: &str) -> RawRow {
        [("matricule", matricule), ("note", note)]
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn notes_outside_bounds_become_invalid() {
        let mut batch = ImportBatch::validate(
            vec![row("A1", "12"), row("A2", "21"), row("A3", "-1"), row("A4", "abc")],
            &SCHEMA,
        );
        assert_eq!(batch.valid_count(), 3);

        apply_note_bounds(&mut batch, 20.0);
        assert_eq!(batch.valid_count(), 1);
        assert_eq!(batch.invalid_count(), 3);
        assert_eq!(
            batch.rows()[1].validation_errors,
            vec!["note: 21 is outside 0..20".to_string()]
        );
        // non-numeric note keeps its single schema error
        assert_eq!(batch.rows()[3].validation_errors.len(), 1);
    }

    #[test]
    fn upper_bound_is_inclusive() {
        let mut batch = ImportBatch::validate(vec![row("A1", "10"), row("A2", "0")], &SCHEMA);
        apply_note_bounds(&mut batch, 10.0);
        assert_eq!(batch.valid_count(), 2);
    }
}
