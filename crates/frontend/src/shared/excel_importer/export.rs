use contracts::shared::import::ImportBatch;
use csv::WriterBuilder;

/// CSV of the rows the user still has to fix: locally invalid rows and rows
/// the server rejected. Columns are the line number, the original file
/// columns, then the error messages joined by " | ".
pub fn errors_csv(batch: &ImportBatch, headers: &[String]) -> Result<String, csv::Error> {
    let mut writer = WriterBuilder::new().delimiter(b';').from_writer(Vec::new());

    let mut header_row = vec!["ligne".to_string()];
    header_row.extend(headers.iter().cloned());
    header_row.push("erreurs".to_string());
    writer.write_record(&header_row)?;

    for row in batch.invalid_or_rejected() {
        let mut errors = row.validation_errors.clone();
        if let Some(outcome) = row.outcome.as_ref().filter(|o| !o.success) {
            errors.push(
                outcome
                    .message
                    .clone()
                    .unwrap_or_else(|| "Rejeté par le serveur".to_string()),
            );
        }
        let mut record = vec![row.line.to_string()];
        record.extend(
            headers
                .iter()
                .map(|h| row.raw_values.get(h).cloned().unwrap_or_default()),
        );
        record.push(errors.join(" | "));
        writer.write_record(&record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// `eleves.xlsx` → `eleves_erreurs.csv`
pub fn errors_file_name(source: &str) -> String {
    let stem = source.rsplit_once('.').map(|(s, _)| s).unwrap_or(source);
    let stem = if stem.trim().is_empty() { "import" } else { stem };
    format!("{}_erreurs.csv", stem)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::import::RawRow;
    use contracts::usecases::common::RowOutcome;
    use contracts::usecases::u502_import_notes::SCHEMA;

    fn row(matricule: &str, note: &str) -> RawRow {
        let mut r = RawRow::new();
        r.insert("matricule".into(), matricule.into());
        r.insert("note".into(), note.into());
        r
    }

    #[test]
    fn exports_invalid_and_rejected_rows() {
        let mut batch = ImportBatch::validate(
            vec![row("A01", "12"), row("A02", "douze"), row("A03", "15")],
            &SCHEMA,
        );
        batch.merge_outcomes(&[
            RowOutcome { line: 2, success: true, message: None },
            RowOutcome { line: 4, success: false, message: Some("Élève inconnu".into()) },
        ]);
        let headers = vec!["matricule".to_string(), "note".to_string()];
        let csv = errors_csv(&batch, &headers).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "ligne;matricule;note;erreurs");
        assert_eq!(lines[1], "3;A02;douze;note: 'douze' is not a number");
        assert_eq!(lines[2], "4;A03;15;Élève inconnu");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn file_name_keeps_the_stem() {
        assert_eq!(errors_file_name("eleves.xlsx"), "eleves_erreurs.csv");
        assert_eq!(errors_file_name(""), "import_erreurs.csv");
    }
}
