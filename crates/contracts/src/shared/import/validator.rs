use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;

use super::batch::ImportRow;
use super::schema::{FieldKind, FieldRule, ImportSchema};
use super::value::FieldValue;

/// One spreadsheet row as read from the file: header text -> cell text.
pub type RawRow = BTreeMap<String, String>;

const DATE_FORMATS: &[&str] = &["%d/%m/%Y", "%d-%m-%Y", "%Y-%m-%d", "%Y/%m/%d"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Locale-agnostic number parsing. `12,5` is rejected, not guessed.
pub fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Accepts `dd/mm/yyyy`, `dd-mm-yyyy`, ISO dates and ISO datetimes.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .or_else(|| DateTime::parse_from_rfc3339(text).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Cell for `rule`, empty when no column matches.
fn lookup<'a>(raw: &'a RawRow, rule: &FieldRule) -> &'a str {
    raw.iter()
        .find(|(header, _)| rule.matches_header(header))
        .map(|(_, value)| value.trim())
        .unwrap_or("")
}

/// `Ok(None)` for an empty optional cell.
fn coerce(rule: &FieldRule, value: &str) -> Result<Option<FieldValue>, String> {
    if value.is_empty() {
        return if rule.required {
            Err(format!("{} required", rule.key))
        } else {
            Ok(None)
        };
    }

    match rule.kind {
        FieldKind::Text => Ok(Some(FieldValue::Text(value.to_string()))),
        FieldKind::Number => parse_number(value)
            .map(|v| Some(FieldValue::Number(v)))
            .ok_or_else(|| format!("{}: '{}' is not a number", rule.key, value)),
        FieldKind::Date => parse_date(value)
            .map(|d| Some(FieldValue::Date(d)))
            .ok_or_else(|| format!("{}: '{}' is not a valid date", rule.key, value)),
        FieldKind::OneOf(allowed) => allowed
            .iter()
            .find(|candidate| candidate.eq_ignore_ascii_case(value))
            .map(|canonical| Some(FieldValue::Text((*canonical).to_string())))
            .ok_or_else(|| {
                format!(
                    "{}: '{}' must be one of {}",
                    rule.key,
                    value,
                    allowed.join(", ")
                )
            }),
    }
}

/// Validate one raw row against `schema`.
///
/// Every field the validator could coerce lands in `normalized_fields`; every
/// failure is appended to `validation_errors` in schema order. Never panics.
pub fn validate_row(line: usize, raw: RawRow, schema: &ImportSchema) -> ImportRow {
    let mut normalized = BTreeMap::new();
    let mut errors = Vec::new();

    for rule in schema.fields {
        match coerce(rule, lookup(&raw, rule)) {
            Ok(Some(value)) => {
                normalized.insert(rule.key.to_string(), value);
            }
            Ok(None) => {}
            Err(e) => errors.push(e),
        }
    }

    ImportRow::new(line, raw, normalized, errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELDS: &[FieldRule] = &[
        FieldRule::text("matricule", "Matricule", &["matricule"]).required(),
        FieldRule::number("note", "Note", &["note"]).required(),
        FieldRule::date("date_naissance", "Date de naissance", &["date_naissance", "né le"]),
        FieldRule::one_of("sexe", "Sexe", &["sexe"], &["M", "F"]),
    ];
    const SCHEMA: ImportSchema = ImportSchema {
        name: "test",
        fields: FIELDS,
    };

    fn raw(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn valid_row_is_fully_normalized() {
        let row = validate_row(
            2,
            raw(&[
                ("Matricule", " 123A "),
                ("NOTE", "14.5"),
                ("Né le", "09/03/2012"),
                ("sexe", "f"),
            ]),
            &SCHEMA,
        );
        assert!(row.is_valid);
        assert!(row.validation_errors.is_empty());
        assert_eq!(row.normalized_fields["matricule"], FieldValue::Text("123A".into()));
        assert_eq!(row.normalized_fields["note"], FieldValue::Number(14.5));
        assert_eq!(
            row.normalized_fields["date_naissance"],
            FieldValue::Date(NaiveDate::from_ymd_opt(2012, 3, 9).unwrap())
        );
        assert_eq!(row.normalized_fields["sexe"], FieldValue::Text("F".into()));
    }

    #[test]
    fn missing_column_counts_as_empty() {
        let row = validate_row(3, raw(&[("note", "12")]), &SCHEMA);
        assert!(!row.is_valid);
        assert_eq!(row.validation_errors, vec!["matricule required".to_string()]);
        assert!(row.normalized_fields.contains_key("note"));
    }

    #[test]
    fn errors_follow_schema_order() {
        let row = validate_row(
            4,
            raw(&[
                ("sexe", "X"),
                ("date_naissance", "31/02/2012"),
                ("note", "12,5"),
            ]),
            &SCHEMA,
        );
        assert_eq!(row.validation_errors.len(), 4);
        assert_eq!(row.validation_errors[0], "matricule required");
        assert!(row.validation_errors[1].starts_with("note:"));
        assert!(row.validation_errors[2].starts_with("date_naissance:"));
        assert_eq!(row.validation_errors[3], "sexe: 'X' must be one of M, F");
        assert!(row.normalized_fields.is_empty());
    }

    #[test]
    fn empty_optional_fields_are_skipped() {
        let row = validate_row(
            5,
            raw(&[("matricule", "A1"), ("note", "0"), ("sexe", "  ")]),
            &SCHEMA,
        );
        assert!(row.is_valid);
        assert!(!row.normalized_fields.contains_key("sexe"));
        assert!(!row.normalized_fields.contains_key("date_naissance"));
    }

    #[test]
    fn number_parsing_is_locale_agnostic() {
        assert_eq!(parse_number(" 12 "), Some(12.0));
        assert_eq!(parse_number("-3.25"), Some(-3.25));
        assert_eq!(parse_number("12,5"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("douze"), None);
    }

    #[test]
    fn date_formats() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(parse_date("05/01/2024"), Some(d));
        assert_eq!(parse_date("05-01-2024"), Some(d));
        assert_eq!(parse_date("2024-01-05"), Some(d));
        assert_eq!(parse_date("2024-01-05T08:30:00"), Some(d));
        assert_eq!(parse_date("2024-01-05T08:30:00Z"), Some(d));
        assert_eq!(parse_date("2024-01-05T08:30:00.250+01:00"), Some(d));
        assert_eq!(parse_date("5 janvier 2024"), None);
        assert_eq!(parse_date(""), None);
    }
}
