use contracts::shared::import::{ImportBatch, ImportSchema, OutcomeSummary};
use contracts::usecases::common::{BulkImportResponse, ImportPayloadRow};
use thiserror::Error;

use super::types::{ParseError, ParsedSheet};

/// Guards of the import flow and the affectation picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("Aucune ligne valide à importer")]
    NothingToSubmit,
    #[error("Un envoi est déjà en cours")]
    SubmitInFlight,
    #[error("Les données ne sont pas encore prêtes")]
    NotReady,
    #[error("La liste de destination est vide")]
    EmptyTarget,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FlowState {
    Idle,
    Parsing,
    Parsed,
    Submitting,
    Completed(OutcomeSummary),
    /// Last submit failed; the batch is kept so the user can retry.
    Failed(String),
}

/// Token handed out per file selection. Parse results carrying an older
/// ticket belong to a superseded file and are dropped.
pub type Ticket = u64;

/// Upload → preview → submit state machine, without any DOM or network.
#[derive(Debug, Clone)]
pub struct ImportFlow {
    schema: ImportSchema,
    state: FlowState,
    batch: ImportBatch,
    file_name: Option<String>,
    parse_error: Option<ParseError>,
    missing_columns: Vec<&'static str>,
    ticket: Ticket,
}

impl ImportFlow {
    pub fn new(schema: ImportSchema) -> Self {
        Self {
            schema,
            state: FlowState::Idle,
            batch: ImportBatch::default(),
            file_name: None,
            parse_error: None,
            missing_columns: Vec::new(),
            ticket: 0,
        }
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    pub fn batch(&self) -> &ImportBatch {
        &self.batch
    }

    pub fn schema(&self) -> &ImportSchema {
        &self.schema
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn parse_error(&self) -> Option<&ParseError> {
        self.parse_error.as_ref()
    }

    /// Required columns absent from the uploaded header row.
    pub fn missing_columns(&self) -> &[&'static str] {
        &self.missing_columns
    }

    pub fn is_submitting(&self) -> bool {
        self.state == FlowState::Submitting
    }

    pub fn can_submit(&self) -> bool {
        matches!(self.state, FlowState::Parsed | FlowState::Failed(_)) && self.batch.valid_count() > 0
    }

    /// Start over with a new file. The current batch is discarded.
    pub fn select_file(&mut self, file_name: impl Into<String>) -> Result<Ticket, FlowError> {
        if self.is_submitting() {
            return Err(FlowError::SubmitInFlight);
        }
        self.clear();
        self.file_name = Some(file_name.into());
        self.state = FlowState::Parsing;
        log::debug!("import {}: parsing (ticket {})", self.schema.name, self.ticket);
        Ok(self.ticket)
    }

    /// Back to `Idle`; any pending parse becomes stale.
    pub fn reset(&mut self) -> Result<(), FlowError> {
        if self.is_submitting() {
            return Err(FlowError::SubmitInFlight);
        }
        self.clear();
        Ok(())
    }

    fn clear(&mut self) {
        self.ticket += 1;
        self.state = FlowState::Idle;
        self.batch = ImportBatch::default();
        self.file_name = None;
        self.parse_error = None;
        self.missing_columns.clear();
    }

    /// Validate a parsed sheet. `refine` runs on the fresh batch for checks
    /// that need more than one row or outside data (grade bounds).
    ///
    /// Returns `false` when the result was stale and ignored.
    pub fn parse_finished<F>(
        &mut self,
        ticket: Ticket,
        result: Result<ParsedSheet, ParseError>,
        refine: F,
    ) -> bool
    where
        F: FnOnce(&mut ImportBatch),
    {
        if ticket != self.ticket || self.state != FlowState::Parsing {
            log::debug!("import {}: dropping stale parse result", self.schema.name);
            return false;
        }
        match result {
            Ok(sheet) => {
                self.missing_columns = self.schema.missing_required_columns(&sheet.headers);
                let mut batch = ImportBatch::validate_lines(
                    sheet.rows.into_iter().map(|row| (row.line, row.values)),
                    &self.schema,
                );
                refine(&mut batch);
                log::debug!(
                    "import {}: {} rows, {} valid, {} invalid",
                    self.schema.name,
                    batch.total_count(),
                    batch.valid_count(),
                    batch.invalid_count()
                );
                self.batch = batch;
                self.state = FlowState::Parsed;
            }
            Err(error) => {
                log::warn!("import {}: {}", self.schema.name, error);
                self.parse_error = Some(error);
                self.file_name = None;
                self.state = FlowState::Idle;
            }
        }
        true
    }

    /// Enter `Submitting` and hand out the valid rows as one payload.
    pub fn begin_submit(&mut self) -> Result<Vec<ImportPayloadRow>, FlowError> {
        match self.state {
            FlowState::Parsed | FlowState::Failed(_) => {}
            FlowState::Submitting => return Err(FlowError::SubmitInFlight),
            _ => return Err(FlowError::NotReady),
        }
        if self.batch.valid_count() == 0 {
            return Err(FlowError::NothingToSubmit);
        }
        self.state = FlowState::Submitting;
        log::debug!("import {}: submitting {} rows", self.schema.name, self.batch.valid_count());
        Ok(self.batch.payload_rows())
    }

    pub fn submit_succeeded(&mut self, response: &BulkImportResponse) -> Option<OutcomeSummary> {
        if !self.is_submitting() {
            return None;
        }
        let summary = self.batch.merge_outcomes(&response.outcomes);
        log::debug!(
            "import {}: completed, {} accepted, {} rejected",
            self.schema.name,
            summary.accepted,
            summary.rejected
        );
        self.state = FlowState::Completed(summary);
        Some(summary)
    }

    pub fn submit_failed(&mut self, message: impl Into<String>) {
        if self.is_submitting() {
            let message = message.into();
            log::warn!("import {}: submit failed: {}", self.schema.name, message);
            self.state = FlowState::Failed(message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::excel_importer::parser::parse_bytes;
    use crate::shared::excel_importer::types::SheetRow;
    use contracts::shared::import::RawRow;
    use contracts::usecases::common::RowOutcome;
    use contracts::usecases::u501_import_eleves::SCHEMA;

    fn sheet(rows: &[(&str, &str, &str)]) -> ParsedSheet {
        ParsedSheet {
            file_name: "eleves.csv".into(),
            headers: vec!["nom".into(), "prenom".into(), "matricule".into()],
            rows: rows
                .iter()
                .enumerate()
                .map(|(idx, (nom, prenom, matricule))| {
                    let mut values = RawRow::new();
                    values.insert("nom".into(), nom.to_string());
                    values.insert("prenom".into(), prenom.to_string());
                    values.insert("matricule".into(), matricule.to_string());
                    SheetRow {
                        line: idx + 2,
                        values,
                    }
                })
                .collect(),
        }
    }

    fn parsed(rows: &[(&str, &str, &str)]) -> ImportFlow {
        let mut flow = ImportFlow::new(SCHEMA);
        let ticket = flow.select_file("eleves.csv").unwrap();
        assert!(flow.parse_finished(ticket, Ok(sheet(rows)), |_| {}));
        flow
    }

    #[test]
    fn three_rows_one_missing_matricule() {
        let flow = parsed(&[("Kone", "Awa", "A01"), ("Traore", "Ali", ""), ("Yao", "Ines", "A03")]);
        assert_eq!(flow.state(), &FlowState::Parsed);
        let batch = flow.batch();
        assert_eq!(
            (batch.total_count(), batch.valid_count(), batch.invalid_count()),
            (3, 2, 1)
        );
        let invalid = &batch.rows()[1];
        assert_eq!(invalid.line, 3);
        assert!(invalid.validation_errors.contains(&"matricule required".to_string()));
    }

    #[test]
    fn lines_come_from_the_parsed_file() {
        let text = "nom,prenom,matricule\nKone,Awa,A01\n,,\nTraore,Ali,\n";
        let parsed = parse_bytes(text.as_bytes(), "eleves.csv", "text/csv", 100);
        let mut flow = ImportFlow::new(SCHEMA);
        let ticket = flow.select_file("eleves.csv").unwrap();
        assert!(flow.parse_finished(ticket, parsed, |_| {}));

        let invalid: Vec<usize> = flow.batch().invalid_or_rejected().map(|r| r.line).collect();
        assert_eq!(invalid, vec![4]);
        let payload = flow.begin_submit().unwrap();
        assert_eq!(payload.iter().map(|r| r.line).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn nothing_to_submit_keeps_state() {
        let mut flow = parsed(&[("Kone", "Awa", "")]);
        assert!(!flow.can_submit());
        assert_eq!(flow.begin_submit(), Err(FlowError::NothingToSubmit));
        assert_eq!(flow.state(), &FlowState::Parsed);
    }

    #[test]
    fn submit_sends_only_valid_rows_and_merges_outcomes() {
        let mut flow = parsed(&[("Kone", "Awa", "A01"), ("Traore", "Ali", ""), ("Yao", "Ines", "A03")]);
        let payload = flow.begin_submit().unwrap();
        assert_eq!(payload.iter().map(|r| r.line).collect::<Vec<_>>(), vec![2, 4]);
        assert!(flow.is_submitting());
        assert_eq!(flow.select_file("autre.csv"), Err(FlowError::SubmitInFlight));
        assert_eq!(flow.begin_submit(), Err(FlowError::SubmitInFlight));

        let response = BulkImportResponse {
            outcomes: vec![
                RowOutcome { line: 2, success: true, message: None },
                RowOutcome { line: 4, success: false, message: Some("Matricule déjà utilisé".into()) },
            ],
        };
        let summary = flow.submit_succeeded(&response).unwrap();
        assert_eq!((summary.accepted, summary.rejected), (1, 1));
        assert_eq!(flow.state(), &FlowState::Completed(summary));
    }

    #[test]
    fn failed_submit_allows_retry_without_reupload() {
        let mut flow = parsed(&[("Kone", "Awa", "A01")]);
        flow.begin_submit().unwrap();
        flow.submit_failed("Erreur 500");
        assert_eq!(flow.state(), &FlowState::Failed("Erreur 500".into()));
        assert!(flow.can_submit());
        assert_eq!(flow.begin_submit().unwrap().len(), 1);
    }

    #[test]
    fn stale_parse_result_is_ignored() {
        let mut flow = ImportFlow::new(SCHEMA);
        let first = flow.select_file("a.csv").unwrap();
        let second = flow.select_file("b.csv").unwrap();
        assert!(!flow.parse_finished(first, Ok(sheet(&[("Kone", "Awa", "A01")])), |_| {}));
        assert_eq!(flow.state(), &FlowState::Parsing);
        assert!(flow.parse_finished(second, Ok(sheet(&[("Yao", "Ines", "A03")])), |_| {}));
        assert_eq!(flow.file_name(), Some("b.csv"));
        assert_eq!(flow.batch().total_count(), 1);
    }

    #[test]
    fn parse_error_returns_to_idle() {
        let mut flow = ImportFlow::new(SCHEMA);
        let ticket = flow.select_file("vide.csv").unwrap();
        flow.parse_finished(ticket, Err(ParseError::NoDataRows), |_| {});
        assert_eq!(flow.state(), &FlowState::Idle);
        assert_eq!(flow.parse_error(), Some(&ParseError::NoDataRows));
        assert_eq!(flow.begin_submit(), Err(FlowError::NotReady));
    }

    #[test]
    fn missing_required_columns_are_reported() {
        let mut flow = ImportFlow::new(SCHEMA);
        let ticket = flow.select_file("eleves.csv").unwrap();
        let mut partial = sheet(&[("Kone", "Awa", "A01")]);
        partial.headers.retain(|h| h != "matricule");
        for row in partial.rows.iter_mut() {
            row.values.remove("matricule");
        }
        flow.parse_finished(ticket, Ok(partial), |_| {});
        assert_eq!(flow.missing_columns(), &["matricule"]);
        assert_eq!(flow.batch().invalid_count(), 1);
    }

    #[test]
    fn refine_runs_before_counts_are_read() {
        let mut flow = ImportFlow::new(SCHEMA);
        let ticket = flow.select_file("eleves.csv").unwrap();
        flow.parse_finished(ticket, Ok(sheet(&[("Kone", "Awa", "A01")])), |batch| {
            batch.update_rows(|rows| rows[0].push_error("rejeté"));
        });
        assert_eq!(flow.batch().valid_count(), 0);
    }
}
