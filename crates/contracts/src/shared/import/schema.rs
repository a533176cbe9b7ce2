use serde::{Deserialize, Serialize};

/// Expected type of an imported column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    Text,
    Number,
    Date,
    /// Closed list of accepted values, matched case-insensitively.
    OneOf(&'static [&'static str]),
}

/// One column of an import schema. Declared as `const` data, see
/// `usecases::u501_import_eleves::SCHEMA`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldRule {
    /// Key used in normalized fields and in error messages.
    pub key: &'static str,
    /// Human label for the preview table.
    pub label: &'static str,
    /// Accepted header spellings.
    pub headers: &'static [&'static str],
    pub required: bool,
    pub kind: FieldKind,
}

impl FieldRule {
    pub const fn text(key: &'static str, label: &'static str, headers: &'static [&'static str]) -> Self {
        Self {
            key,
            label,
            headers,
            required: false,
            kind: FieldKind::Text,
        }
    }

    pub const fn number(key: &'static str, label: &'static str, headers: &'static [&'static str]) -> Self {
        Self {
            kind: FieldKind::Number,
            ..Self::text(key, label, headers)
        }
    }

    pub const fn date(key: &'static str, label: &'static str, headers: &'static [&'static str]) -> Self {
        Self {
            kind: FieldKind::Date,
            ..Self::text(key, label, headers)
        }
    }

    pub const fn one_of(
        key: &'static str,
        label: &'static str,
        headers: &'static [&'static str],
        values: &'static [&'static str],
    ) -> Self {
        Self {
            kind: FieldKind::OneOf(values),
            ..Self::text(key, label, headers)
        }
    }

    pub const fn required(self) -> Self {
        Self {
            required: true,
            ..self
        }
    }

    pub fn matches_header(&self, header: &str) -> bool {
        let folded = fold_header(header);
        !folded.is_empty() && self.headers.iter().any(|h| fold_header(h) == folded)
    }
}

/// Canonical form of a header for comparison: trimmed, lowercase, accents
/// stripped, `_`/`-` treated as spaces, inner whitespace collapsed.
pub fn fold_header(header: &str) -> String {
    let mapped: String = header
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'à' | 'â' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'î' | 'ï' => 'i',
            'ô' | 'ö' => 'o',
            'ù' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            '_' | '-' => ' ',
            other => other,
        })
        .collect();
    mapped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Mapping status of a schema field against the uploaded headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub key: String,
    pub label: String,
    pub required: bool,
    /// Header found in the file, if any.
    pub found: Option<String>,
}

/// Static description of what one import type expects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImportSchema {
    pub name: &'static str,
    pub fields: &'static [FieldRule],
}

impl ImportSchema {
    pub fn field(&self, key: &str) -> Option<&FieldRule> {
        self.fields.iter().find(|f| f.key == key)
    }

    pub fn column_mapping(&self, headers: &[String]) -> Vec<ColumnMapping> {
        self.fields
            .iter()
            .map(|rule| ColumnMapping {
                key: rule.key.to_string(),
                label: rule.label.to_string(),
                required: rule.required,
                found: headers.iter().find(|h| rule.matches_header(h)).cloned(),
            })
            .collect()
    }

    /// Required fields with no matching column. Every row will fail on them,
    /// so the preview shows them once at the top.
    pub fn missing_required_columns(&self, headers: &[String]) -> Vec<&'static str> {
        self.fields
            .iter()
            .filter(|rule| rule.required && !headers.iter().any(|h| rule.matches_header(h)))
            .map(|rule| rule.key)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELDS: &[FieldRule] = &[
        FieldRule::text("matricule", "Matricule", &["matricule"]).required(),
        FieldRule::text("prenoms", "Prénoms", &["prenom", "prénoms"]).required(),
        FieldRule::date("date_naissance", "Né(e) le", &["date_naissance"]),
    ];
    const SCHEMA: ImportSchema = ImportSchema {
        name: "test",
        fields: FIELDS,
    };

    #[test]
    fn header_folding() {
        assert_eq!(fold_header("  Date_de  Naissance "), "date de naissance");
        assert_eq!(fold_header("Prénoms"), "prenoms");
        assert!(FIELDS[1].matches_header("PRENOMS"));
        assert!(FIELDS[1].matches_header("Prénom"));
        assert!(FIELDS[2].matches_header("Date-Naissance"));
        assert!(!FIELDS[0].matches_header(""));
    }

    #[test]
    fn const_builders_set_flags() {
        assert!(FIELDS[0].required);
        assert_eq!(FIELDS[2].kind, FieldKind::Date);
        assert!(!FIELDS[2].required);
    }

    #[test]
    fn mapping_reports_found_and_missing() {
        let headers = vec!["Matricule".to_string(), "Nom".to_string()];
        let mapping = SCHEMA.column_mapping(&headers);
        assert_eq!(mapping[0].found.as_deref(), Some("Matricule"));
        assert_eq!(mapping[1].found, None);
        assert_eq!(SCHEMA.missing_required_columns(&headers), vec!["prenoms"]);
    }
}
