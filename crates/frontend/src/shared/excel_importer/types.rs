use contracts::shared::import::RawRow;
use thiserror::Error;

/// First sheet of an uploaded file: header row plus data rows keyed by header.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedSheet {
    pub file_name: String,
    pub headers: Vec<String>,
    pub rows: Vec<SheetRow>,
}

/// A data row and the 1-based line it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetRow {
    pub line: usize,
    pub values: RawRow,
}

impl ParsedSheet {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Container format, decided from the file name first and the MIME type second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    Delimited,
    Spreadsheet,
}

impl ImportFormat {
    pub fn detect(file_name: &str, mime: &str) -> Option<Self> {
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.trim().to_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "csv" | "txt" => return Some(Self::Delimited),
            "xlsx" | "xlsm" | "xls" | "ods" => return Some(Self::Spreadsheet),
            _ => {}
        }
        match mime.trim().to_lowercase().as_str() {
            "text/csv" | "text/plain" | "application/csv" => Some(Self::Delimited),
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            | "application/vnd.ms-excel"
            | "application/vnd.oasis.opendocument.spreadsheet" => Some(Self::Spreadsheet),
            _ => None,
        }
    }
}

/// Accepted extensions, for the file input.
pub const ACCEPTED_EXTENSIONS: &str = ".csv,.txt,.xlsx,.xlsm,.xls,.ods";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Format de fichier non pris en charge: {0}")]
    UnsupportedFormat(String),
    #[error("Fichier illisible: {0}")]
    Unreadable(String),
    #[error("La première ligne doit contenir les en-têtes de colonnes")]
    MissingHeaders,
    #[error("Le fichier ne contient aucune ligne de données")]
    NoDataRows,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_wins_over_mime() {
        assert_eq!(ImportFormat::detect("eleves.CSV", ""), Some(ImportFormat::Delimited));
        assert_eq!(
            ImportFormat::detect("notes.xlsx", "text/plain"),
            Some(ImportFormat::Spreadsheet)
        );
        assert_eq!(ImportFormat::detect("export", "text/csv"), Some(ImportFormat::Delimited));
        assert_eq!(ImportFormat::detect("photo.png", "image/png"), None);
    }
}
