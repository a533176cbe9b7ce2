use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use contracts::shared::import::RawRow;
use csv::ReaderBuilder;

use super::types::{ImportFormat, ParseError, ParsedSheet, SheetRow};

/// Cells of one source line, with its 1-based line number.
type Line = (usize, Vec<String>);

const CANDIDATE_DELIMITERS: [u8; 4] = [b',', b';', b'\t', b'|'];

/// Read an uploaded file into memory.
pub async fn read_file(file: &web_sys::File) -> Result<Vec<u8>, ParseError> {
    use wasm_bindgen_futures::JsFuture;

    let array_buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| ParseError::Unreadable(format!("{:?}", e)))?;

    let uint8_array = js_sys::Uint8Array::new(&array_buffer);
    let mut bytes = vec![0; uint8_array.length() as usize];
    uint8_array.copy_to(&mut bytes);
    Ok(bytes)
}

/// Parse the first sheet of a CSV or spreadsheet file.
///
/// Every row is keyed by the trimmed header text; cells are trimmed strings.
/// Fully blank rows are skipped.
pub fn parse_bytes(
    bytes: &[u8],
    file_name: &str,
    mime: &str,
    max_rows: usize,
) -> Result<ParsedSheet, ParseError> {
    let format = ImportFormat::detect(file_name, mime).ok_or_else(|| {
        ParseError::UnsupportedFormat(if file_name.is_empty() {
            mime.to_string()
        } else {
            file_name.to_string()
        })
    })?;

    let grid = match format {
        ImportFormat::Delimited => read_delimited(bytes)?,
        ImportFormat::Spreadsheet => read_spreadsheet(bytes)?,
    };
    let mut sheet = rows_to_sheet(grid, max_rows)?;
    sheet.file_name = file_name.to_string();
    log::debug!(
        "parsed '{}': {} columns, {} rows",
        file_name,
        sheet.headers.len(),
        sheet.rows.len()
    );
    Ok(sheet)
}

/// UTF-8 with optional BOM, falling back to Latin-1.
fn decode_text(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

/// Most frequent candidate delimiter in the header line, quotes excluded.
fn detect_delimiter(text: &str) -> u8 {
    let header = text.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
    let mut counts = [0usize; CANDIDATE_DELIMITERS.len()];
    let mut in_quotes = false;
    for b in header.bytes() {
        if b == b'"' {
            in_quotes = !in_quotes;
            continue;
        }
        if in_quotes {
            continue;
        }
        if let Some(i) = CANDIDATE_DELIMITERS.iter().position(|d| *d == b) {
            counts[i] += 1;
        }
    }
    let mut best = 0;
    for i in 1..counts.len() {
        if counts[i] > counts[best] {
            best = i;
        }
    }
    CANDIDATE_DELIMITERS[best]
}

fn read_delimited(bytes: &[u8]) -> Result<Vec<Line>, ParseError> {
    let text = decode_text(bytes);
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .delimiter(detect_delimiter(&text))
        .from_reader(text.as_bytes());

    let mut grid = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| ParseError::Unreadable(e.to_string()))?;
        // The reader skips empty lines; its position keeps the real line.
        let line = match record.position() {
            Some(pos) => pos.line() as usize,
            None => grid.len() + 1,
        };
        grid.push((line, record.iter().map(|c| c.to_string()).collect()));
    }
    Ok(grid)
}

fn read_spreadsheet(bytes: &[u8]) -> Result<Vec<Line>, ParseError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| ParseError::Unreadable(e.to_string()))?;
    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range.map_err(|e| ParseError::Unreadable(e.to_string()))?,
        None => return Err(ParseError::MissingHeaders),
    };
    // The used range may start below the first row of the sheet.
    let first_line = range.start().map_or(0, |(row, _)| row as usize) + 1;
    Ok(range
        .rows()
        .enumerate()
        .map(|(idx, row)| (first_line + idx, row.iter().map(cell_to_string).collect()))
        .collect())
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => format_float(*f),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(ndt) if ndt.time() == chrono::NaiveTime::MIN => {
                ndt.date().format("%Y-%m-%d").to_string()
            }
            Some(ndt) => ndt.format("%Y-%m-%dT%H:%M:%S").to_string(),
            None => dt.as_f64().to_string(),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(e) => e.to_string(),
    }
}

/// Integral values print without a fractional part ("12", not "12.0").
fn format_float(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        f.to_string()
    }
}

fn rows_to_sheet(grid: Vec<Line>, max_rows: usize) -> Result<ParsedSheet, ParseError> {
    let mut lines = grid.into_iter().map(|(line, row)| {
        (line, row.into_iter().map(|c| c.trim().to_string()).collect::<Vec<_>>())
    });

    let (_, header_row) = lines.next().ok_or(ParseError::MissingHeaders)?;
    if header_row.iter().all(|h| h.is_empty()) {
        return Err(ParseError::MissingHeaders);
    }

    // Blank and repeated header cells keep their column out of the rows.
    let mut headers: Vec<String> = Vec::new();
    let columns: Vec<Option<usize>> = header_row
        .iter()
        .map(|h| {
            if h.is_empty() || headers.contains(h) {
                None
            } else {
                headers.push(h.clone());
                Some(headers.len() - 1)
            }
        })
        .collect();

    let mut rows = Vec::new();
    for (line, cells) in lines {
        if cells.iter().all(|c| c.is_empty()) {
            continue;
        }
        if rows.len() == max_rows {
            return Err(ParseError::Unreadable(format!(
                "le fichier dépasse la limite de {} lignes",
                max_rows
            )));
        }
        let mut values = RawRow::new();
        for (col, value) in cells.into_iter().enumerate() {
            if let Some(Some(h)) = columns.get(col) {
                values.insert(headers[*h].clone(), value);
            }
        }
        rows.push(SheetRow { line, values });
    }

    if rows.is_empty() {
        return Err(ParseError::NoDataRows);
    }
    Ok(ParsedSheet {
        file_name: String::new(),
        headers,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_csv(text: &str) -> Result<ParsedSheet, ParseError> {
        parse_bytes(text.as_bytes(), "eleves.csv", "text/csv", 100)
    }

    #[test]
    fn csv_rows_are_keyed_by_header() {
        let sheet = parse_csv("nom,prenom,matricule\nKone, Awa ,A01\nTraore,Ali,\n").unwrap();
        assert_eq!(sheet.headers, vec!["nom", "prenom", "matricule"]);
        assert_eq!(sheet.row_count(), 2);
        assert_eq!(sheet.rows[0].values["prenom"], "Awa");
        assert_eq!(sheet.rows[1].values["matricule"], "");
    }

    #[test]
    fn detects_semicolon_and_ignores_quoted_commas() {
        let sheet = parse_csv("nom;lieu_naissance\n\"Kone, Awa\";\"Abidjan, Cocody\"\n").unwrap();
        assert_eq!(sheet.headers, vec!["nom", "lieu_naissance"]);
        assert_eq!(sheet.rows[0].values["lieu_naissance"], "Abidjan, Cocody");
        assert_eq!(detect_delimiter("a\tb\tc"), b'\t');
        assert_eq!(detect_delimiter("\"a,b\"|c|d"), b'|');
    }

    #[test]
    fn strips_bom_and_reads_latin1() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice("nom\nKone\n".as_bytes());
        let sheet = parse_bytes(&bytes, "a.csv", "", 10).unwrap();
        assert_eq!(sheet.headers, vec!["nom"]);

        // "né le" in Latin-1
        let bytes = [b'n', 0xE9, b' ', b'l', b'e', b'\n', b'1', b'\n'];
        let sheet = parse_bytes(&bytes, "a.csv", "", 10).unwrap();
        assert_eq!(sheet.headers, vec!["né le"]);
    }

    #[test]
    fn blank_rows_are_skipped() {
        let sheet = parse_csv("nom,prenom\n\n , \nKone,Awa\n,,\n").unwrap();
        assert_eq!(sheet.row_count(), 1);
        assert_eq!(sheet.rows[0].line, 4);
    }

    #[test]
    fn rows_keep_their_file_line_across_blank_lines() {
        let sheet = parse_csv("nom,prenom,matricule\nKone,Awa,A01\n,,\nTraore,Ali,\n\nYao,Ines,A03\n").unwrap();
        let lines: Vec<usize> = sheet.rows.iter().map(|r| r.line).collect();
        assert_eq!(lines, vec![2, 4, 6]);
        assert_eq!(sheet.rows[1].values["nom"], "Traore");
    }

    #[test]
    fn error_cases() {
        assert_eq!(parse_csv(""), Err(ParseError::MissingHeaders));
        assert_eq!(parse_csv(" , \nKone,Awa\n"), Err(ParseError::MissingHeaders));
        assert_eq!(parse_csv("nom,prenom\n"), Err(ParseError::NoDataRows));
        assert!(matches!(
            parse_bytes(b"x", "photo.png", "image/png", 10),
            Err(ParseError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            parse_bytes(b"not a zip", "notes.xlsx", "", 10),
            Err(ParseError::Unreadable(_))
        ));
    }

    #[test]
    fn row_limit_is_enforced() {
        let text = "nom\na\nb\nc\n";
        assert_eq!(parse_bytes(text.as_bytes(), "a.csv", "", 3).unwrap().row_count(), 3);
        assert!(matches!(
            parse_bytes(text.as_bytes(), "a.csv", "", 2),
            Err(ParseError::Unreadable(_))
        ));
    }

    #[test]
    fn xlsx_first_sheet_is_read() {
        use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};

        let mut workbook = Workbook::new();
        let date_format = Format::new().set_num_format("dd/mm/yyyy");
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "matricule").unwrap();
        sheet.write_string(0, 1, "note").unwrap();
        sheet.write_string(0, 2, "date_naissance").unwrap();
        sheet.write_string(1, 0, "A01").unwrap();
        sheet.write_number(1, 1, 12.0).unwrap();
        let date = ExcelDateTime::from_ymd(2010, 5, 3).unwrap();
        sheet.write_datetime_with_format(1, 2, &date, &date_format).unwrap();
        sheet.write_string(2, 0, "A02").unwrap();
        sheet.write_number(2, 1, 13.5).unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let parsed = parse_bytes(&bytes, "notes.xlsx", "", 100).unwrap();
        assert_eq!(parsed.headers, vec!["matricule", "note", "date_naissance"]);
        assert_eq!(parsed.row_count(), 2);
        assert_eq!(parsed.rows[0].values["note"], "12");
        assert_eq!(parsed.rows[0].values["date_naissance"], "2010-05-03");
        assert_eq!(parsed.rows[1].values["note"], "13.5");
        assert_eq!(parsed.rows[1].values.get("date_naissance").map(String::as_str), Some(""));
        assert_eq!(
            parsed.rows.iter().map(|r| r.line).collect::<Vec<_>>(),
            vec![2, 3]
        );
    }

    #[test]
    fn xlsx_lines_follow_the_sheet_rows() {
        use rust_xlsxwriter::Workbook;

        // Header on row 3, one empty row between the two data rows.
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(2, 0, "matricule").unwrap();
        sheet.write_string(3, 0, "A01").unwrap();
        sheet.write_string(5, 0, "A02").unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let parsed = parse_bytes(&bytes, "notes.xlsx", "", 100).unwrap();
        assert_eq!(parsed.headers, vec!["matricule"]);
        assert_eq!(
            parsed.rows.iter().map(|r| r.line).collect::<Vec<_>>(),
            vec![4, 6]
        );
    }

    #[test]
    fn floats_render_like_the_sheet() {
        assert_eq!(format_float(3.0), "3");
        assert_eq!(format_float(-2.0), "-2");
        assert_eq!(format_float(0.25), "0.25");
    }
}
