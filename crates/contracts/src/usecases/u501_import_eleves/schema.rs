use crate::domain::common::Sexe;
use crate::shared::import::{FieldRule, ImportSchema};

const FIELDS: &[FieldRule] = &[
    FieldRule::text("matricule", "Matricule", &["matricule"]).required(),
    FieldRule::text("nom", "Nom", &["nom"]).required(),
    FieldRule::text("prenoms", "Prénoms", &["prenom", "prenoms"]).required(),
    FieldRule::one_of("sexe", "Sexe", &["sexe"], Sexe::CODES),
    FieldRule::date(
        "date_naissance",
        "Date de naissance",
        &["date_naissance", "date de naissance", "né le"],
    ),
    FieldRule::text("lieu_naissance", "Lieu de naissance", &["lieu_naissance", "lieu de naissance"]),
];

pub const SCHEMA: ImportSchema = ImportSchema {
    name: "eleves",
    fields: FIELDS,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::import::{FieldValue, ImportBatch, RawRow};

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn typical_school_export() {
        let batch = ImportBatch::validate(
            vec![
                row(&[
                    ("Matricule", "20-1234A"),
                    ("NOM", "Koné"),
                    ("Prénoms", "Mariam"),
                    ("Sexe", "f"),
                    ("Date de naissance", "14/07/2011"),
                    ("Lieu de naissance", "Bouaké"),
                ]),
                row(&[("Matricule", "20-1235B"), ("NOM", "Diallo"), ("Prénoms", "")]),
            ],
            &SCHEMA,
        );
        assert_eq!(batch.valid_count(), 1);
        let first = &batch.rows()[0];
        assert_eq!(first.field("sexe"), Some(&FieldValue::Text("F".into())));
        assert_eq!(
            first.field("lieu_naissance").and_then(|v| v.as_text()),
            Some("Bouaké")
        );
        assert_eq!(
            batch.rows()[1].validation_errors,
            vec!["prenoms required".to_string()]
        );
    }
}
