//! Spreadsheet (CSV/XLSX) sow import: parsing, per-row validation, and
//! outcome tallying.
//!
//! Parsing and validation are pure so they can be tested without the API
//! layer. The handler supplies the set of ear tags already in the database;
//! in-file duplicate tracking happens here. Valid rows are inserted one at
//! a time by the caller, which tallies per-row outcomes rather than
//! aborting the whole file on the first bad row.

use std::collections::{HashMap, HashSet};
use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};
use chrono::NaiveDate;
use serde::Serialize;

use crate::error::CoreError;
use crate::validation::{validate_ear_tag, AnimalStatus};

/// The import/export column set, in file order.
pub const IMPORT_COLUMNS: &[&str] = &[
    "ear_tag",
    "name",
    "birth_date",
    "breed",
    "status",
    "right_ear_notch",
    "left_ear_notch",
    "registration_number",
    "notes",
];

/// Columns that must be present in the header row.
const REQUIRED_COLUMNS: &[&str] = &["birth_date", "breed", "status"];

/// Accepted birth-date formats, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One raw data row as read from the file, all fields still strings.
#[derive(Debug, Clone, Default)]
pub struct RawSowRow {
    /// 1-based data row number (the header row is not counted).
    pub line: usize,
    pub ear_tag: Option<String>,
    pub name: Option<String>,
    pub birth_date: String,
    pub breed: String,
    pub status: String,
    pub right_ear_notch: Option<String>,
    pub left_ear_notch: Option<String>,
    pub registration_number: Option<String>,
    pub notes: Option<String>,
}

/// A row that passed validation, typed and ready for insertion.
#[derive(Debug, Clone, Serialize)]
pub struct ValidSowRow {
    pub ear_tag: Option<String>,
    pub name: Option<String>,
    pub birth_date: NaiveDate,
    pub breed: String,
    pub status: AnimalStatus,
    pub right_ear_notch: Option<i32>,
    pub left_ear_notch: Option<i32>,
    pub registration_number: Option<String>,
    pub notes: Option<String>,
}

/// Why a row was not imported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionKind {
    /// Duplicate ear tag (in the database or earlier in the file).
    Skipped,
    /// Invalid data.
    Failed,
}

/// A rejected row with its line number and reason.
#[derive(Debug, Clone, Serialize)]
pub struct RowRejection {
    pub line: usize,
    pub kind: RejectionKind,
    pub reason: String,
}

/// Per-file outcome tally returned to the client.
#[derive(Debug, Default, Serialize)]
pub struct ImportTally {
    pub imported: u32,
    pub skipped: u32,
    pub failed: u32,
    pub errors: Vec<RowRejection>,
}

impl ImportTally {
    pub fn record_imported(&mut self) {
        self.imported += 1;
    }

    pub fn record_rejection(&mut self, rejection: RowRejection) {
        match rejection.kind {
            RejectionKind::Skipped => self.skipped += 1,
            RejectionKind::Failed => self.failed += 1,
        }
        self.errors.push(rejection);
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse an uploaded spreadsheet by file extension.
///
/// `.csv` and `.xlsx` are supported; anything else is rejected.
pub fn parse_spreadsheet(file_name: &str, bytes: &[u8]) -> Result<Vec<RawSowRow>, CoreError> {
    let extension = file_name
        .rsplit('.')
        .next()
        .map(str::to_lowercase)
        .unwrap_or_default();
    match extension.as_str() {
        "csv" => parse_csv(bytes),
        "xlsx" => parse_xlsx(bytes),
        other => Err(CoreError::validation(format!(
            "Unsupported file type '.{other}'. Upload a .csv or .xlsx file"
        ))),
    }
}

/// Parse CSV bytes into raw rows. The first record must be a header row.
pub fn parse_csv(bytes: &[u8]) -> Result<Vec<RawSowRow>, CoreError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| CoreError::validation(format!("Unreadable CSV header: {e}")))?;
    let columns = column_indices(headers.iter())?;

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record =
            record.map_err(|e| CoreError::validation(format!("Unreadable CSV row: {e}")))?;
        let cell = |name: &str| -> Option<String> {
            columns
                .get(name)
                .and_then(|&idx| record.get(idx))
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        rows.push(raw_row(i + 1, &cell));
    }
    Ok(rows)
}

/// Parse the first worksheet of an XLSX workbook into raw rows.
pub fn parse_xlsx(bytes: &[u8]) -> Result<Vec<RawSowRow>, CoreError> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes.to_vec()))
        .map_err(|e| CoreError::validation(format!("Unreadable XLSX file: {e}")))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| CoreError::validation("XLSX workbook has no worksheets"))?
        .map_err(|e| CoreError::validation(format!("Unreadable XLSX worksheet: {e}")))?;

    let mut row_iter = range.rows();
    let header_row = row_iter
        .next()
        .ok_or_else(|| CoreError::validation("XLSX worksheet is empty"))?;
    let header_strings: Vec<String> = header_row.iter().map(cell_to_string).collect();
    let columns = column_indices(header_strings.iter().map(String::as_str))?;

    let mut rows = Vec::new();
    for (i, cells) in row_iter.enumerate() {
        // Skip fully empty spacer rows.
        if cells.iter().all(|c| matches!(c, Data::Empty)) {
            continue;
        }
        let cell = |name: &str| -> Option<String> {
            columns
                .get(name)
                .and_then(|&idx| cells.get(idx))
                .map(cell_to_string)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };
        rows.push(raw_row(i + 1, &cell));
    }
    Ok(rows)
}

/// Map recognised header names (case-insensitive) to their column index.
fn column_indices<'a, I: Iterator<Item = &'a str>>(
    headers: I,
) -> Result<HashMap<String, usize>, CoreError> {
    let mut columns = HashMap::new();
    for (idx, header) in headers.enumerate() {
        let name = header.trim().to_lowercase();
        if IMPORT_COLUMNS.contains(&name.as_str()) {
            columns.entry(name).or_insert(idx);
        }
    }

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|c| !columns.contains_key(*c))
        .collect();
    if !missing.is_empty() {
        return Err(CoreError::validation(format!(
            "Missing required columns: {}",
            missing.join(", ")
        )));
    }
    Ok(columns)
}

fn raw_row(line: usize, cell: &dyn Fn(&str) -> Option<String>) -> RawSowRow {
    RawSowRow {
        line,
        ear_tag: cell("ear_tag"),
        name: cell("name"),
        birth_date: cell("birth_date").unwrap_or_default(),
        breed: cell("breed").unwrap_or_default(),
        status: cell("status").unwrap_or_default(),
        right_ear_notch: cell("right_ear_notch"),
        left_ear_notch: cell("left_ear_notch"),
        registration_number: cell("registration_number"),
        notes: cell("notes"),
    }
}

/// Render an XLSX cell as the string the CSV path would have seen.
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            // Whole floats render without the trailing ".0" so numeric ear
            // notches and tags survive the spreadsheet round trip.
            if f.fract() == 0.0 {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(naive) => naive.date().format("%Y-%m-%d").to_string(),
            None => dt.as_f64().to_string(),
        },
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("{e:?}"),
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Try each accepted format in order.
pub fn parse_birth_date(s: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Validate one raw row.
///
/// `existing_tags` holds the organization's ear tags already in the
/// database; `seen_tags` accumulates tags seen earlier in this file.
/// Duplicates are [`RejectionKind::Skipped`], invalid data is
/// [`RejectionKind::Failed`].
pub fn validate_row(
    row: &RawSowRow,
    existing_tags: &HashSet<String>,
    seen_tags: &mut HashSet<String>,
) -> Result<ValidSowRow, RowRejection> {
    let fail = |reason: String| RowRejection {
        line: row.line,
        kind: RejectionKind::Failed,
        reason,
    };
    let skip = |reason: String| RowRejection {
        line: row.line,
        kind: RejectionKind::Skipped,
        reason,
    };

    if let Some(tag) = &row.ear_tag {
        validate_ear_tag(tag).map_err(|e| fail(e.to_string()))?;
        if existing_tags.contains(tag) {
            return Err(skip(format!("Ear tag '{tag}' already exists")));
        }
        if seen_tags.contains(tag) {
            return Err(skip(format!(
                "Ear tag '{tag}' appears earlier in this file"
            )));
        }
    }

    if row.birth_date.is_empty() {
        return Err(fail("Missing birth_date".to_string()));
    }
    let birth_date = parse_birth_date(&row.birth_date).ok_or_else(|| {
        fail(format!(
            "Unparseable birth_date '{}' (expected YYYY-MM-DD or MM/DD/YYYY)",
            row.birth_date
        ))
    })?;

    if row.breed.is_empty() {
        return Err(fail("Missing breed".to_string()));
    }

    if row.status.is_empty() {
        return Err(fail("Missing status".to_string()));
    }
    let status = AnimalStatus::parse(&row.status).map_err(|e| fail(e.to_string()))?;

    let right_ear_notch = parse_notch(row.right_ear_notch.as_deref(), "right_ear_notch")
        .map_err(fail)?;
    let left_ear_notch =
        parse_notch(row.left_ear_notch.as_deref(), "left_ear_notch").map_err(fail)?;

    if let Some(tag) = &row.ear_tag {
        seen_tags.insert(tag.clone());
    }

    Ok(ValidSowRow {
        ear_tag: row.ear_tag.clone(),
        name: row.name.clone(),
        birth_date,
        breed: row.breed.clone(),
        status,
        right_ear_notch,
        left_ear_notch,
        registration_number: row.registration_number.clone(),
        notes: row.notes.clone(),
    })
}

fn parse_notch(value: Option<&str>, field: &str) -> Result<Option<i32>, String> {
    match value {
        None => Ok(None),
        Some(s) => match s.parse::<i32>() {
            Ok(n) if n >= 0 => Ok(Some(n)),
            Ok(n) => Err(format!("{field} cannot be negative (got {n})")),
            Err(_) => Err(format!("{field} '{s}' is not a whole number")),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV_HEADER: &str =
        "ear_tag,name,birth_date,breed,status,right_ear_notch,left_ear_notch,registration_number,notes";

    fn csv_with_rows(rows: &[&str]) -> Vec<u8> {
        let mut body = String::from(CSV_HEADER);
        for row in rows {
            body.push('\n');
            body.push_str(row);
        }
        body.into_bytes()
    }

    fn validate_single(
        row: &RawSowRow,
        existing: &[&str],
    ) -> Result<ValidSowRow, RowRejection> {
        let existing: HashSet<String> = existing.iter().map(|s| s.to_string()).collect();
        let mut seen = HashSet::new();
        validate_row(row, &existing, &mut seen)
    }

    fn raw(ear_tag: Option<&str>, birth_date: &str, breed: &str, status: &str) -> RawSowRow {
        RawSowRow {
            line: 1,
            ear_tag: ear_tag.map(String::from),
            birth_date: birth_date.to_string(),
            breed: breed.to_string(),
            status: status.to_string(),
            ..Default::default()
        }
    }

    // -- parse_csv --

    #[test]
    fn csv_parses_rows_and_trims_cells() {
        let bytes = csv_with_rows(&[
            "S-100, Petunia ,2023-01-15,Yorkshire,active,12,3,REG-1,good mother",
            ",,2023-02-01,Duroc,active,,,,",
        ]);
        let rows = parse_csv(&bytes).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].ear_tag.as_deref(), Some("S-100"));
        assert_eq!(rows[0].name.as_deref(), Some("Petunia"));
        assert_eq!(rows[0].line, 1);
        assert!(rows[1].ear_tag.is_none());
        assert_eq!(rows[1].line, 2);
    }

    #[test]
    fn csv_missing_required_column_rejected() {
        let bytes = b"ear_tag,name,breed\nS-1,Pig,Duroc".to_vec();
        let err = parse_csv(&bytes).unwrap_err();
        assert!(err.to_string().contains("birth_date"));
        assert!(err.to_string().contains("status"));
    }

    #[test]
    fn csv_header_matching_is_case_insensitive() {
        let bytes =
            b"Ear_Tag,Name,Birth_Date,Breed,Status\nS-1,Pig,2023-01-01,Duroc,active".to_vec();
        let rows = parse_csv(&bytes).unwrap();
        assert_eq!(rows[0].ear_tag.as_deref(), Some("S-1"));
        assert_eq!(rows[0].status, "active");
    }

    // -- parse_spreadsheet --

    #[test]
    fn unknown_extension_rejected() {
        let err = parse_spreadsheet("herd.pdf", b"").unwrap_err();
        assert!(err.to_string().contains(".pdf"));
    }

    // -- parse_birth_date --

    #[test]
    fn birth_date_accepts_both_formats() {
        let expected = NaiveDate::from_ymd_opt(2023, 1, 15).unwrap();
        assert_eq!(parse_birth_date("2023-01-15"), Some(expected));
        assert_eq!(parse_birth_date("01/15/2023"), Some(expected));
    }

    #[test]
    fn birth_date_rejects_garbage() {
        assert_eq!(parse_birth_date("15.01.2023"), None);
        assert_eq!(parse_birth_date("soon"), None);
    }

    // -- validate_row --

    #[test]
    fn valid_row_passes() {
        let row = raw(Some("S-1"), "2023-01-15", "Yorkshire", "active");
        let valid = validate_single(&row, &[]).unwrap();
        assert_eq!(valid.ear_tag.as_deref(), Some("S-1"));
        assert_eq!(valid.status, AnimalStatus::Active);
    }

    #[test]
    fn row_without_ear_tag_is_valid() {
        let row = raw(None, "2023-01-15", "Yorkshire", "culled");
        assert!(validate_single(&row, &[]).is_ok());
    }

    #[test]
    fn duplicate_against_database_is_skipped() {
        let row = raw(Some("S-1"), "2023-01-15", "Yorkshire", "active");
        let rejection = validate_single(&row, &["S-1"]).unwrap_err();
        assert_eq!(rejection.kind, RejectionKind::Skipped);
        assert!(rejection.reason.contains("already exists"));
    }

    #[test]
    fn duplicate_within_file_is_skipped() {
        let existing = HashSet::new();
        let mut seen = HashSet::new();
        let first = raw(Some("S-1"), "2023-01-15", "Yorkshire", "active");
        let second = RawSowRow {
            line: 2,
            ..first.clone()
        };

        assert!(validate_row(&first, &existing, &mut seen).is_ok());
        let rejection = validate_row(&second, &existing, &mut seen).unwrap_err();
        assert_eq!(rejection.kind, RejectionKind::Skipped);
        assert_eq!(rejection.line, 2);
        assert!(rejection.reason.contains("earlier in this file"));
    }

    #[test]
    fn bad_birth_date_fails() {
        let row = raw(Some("S-1"), "yesterday", "Yorkshire", "active");
        let rejection = validate_single(&row, &[]).unwrap_err();
        assert_eq!(rejection.kind, RejectionKind::Failed);
        assert!(rejection.reason.contains("birth_date"));
    }

    #[test]
    fn empty_breed_fails() {
        let row = raw(Some("S-1"), "2023-01-15", "", "active");
        let rejection = validate_single(&row, &[]).unwrap_err();
        assert_eq!(rejection.kind, RejectionKind::Failed);
        assert!(rejection.reason.contains("breed"));
    }

    #[test]
    fn unknown_status_fails() {
        let row = raw(Some("S-1"), "2023-01-15", "Yorkshire", "retired");
        let rejection = validate_single(&row, &[]).unwrap_err();
        assert_eq!(rejection.kind, RejectionKind::Failed);
        assert!(rejection.reason.contains("status"));
    }

    #[test]
    fn negative_notch_fails() {
        let mut row = raw(Some("S-1"), "2023-01-15", "Yorkshire", "active");
        row.right_ear_notch = Some("-3".to_string());
        let rejection = validate_single(&row, &[]).unwrap_err();
        assert_eq!(rejection.kind, RejectionKind::Failed);
        assert!(rejection.reason.contains("negative"));
    }

    #[test]
    fn rejected_row_does_not_reserve_its_tag() {
        // A row that fails validation must not block a later valid row
        // carrying the same tag.
        let existing = HashSet::new();
        let mut seen = HashSet::new();

        let bad = raw(Some("S-9"), "not-a-date", "Yorkshire", "active");
        assert!(validate_row(&bad, &existing, &mut seen).is_err());

        let good = RawSowRow {
            line: 2,
            ..raw(Some("S-9"), "2023-01-15", "Yorkshire", "active")
        };
        assert!(validate_row(&good, &existing, &mut seen).is_ok());
    }

    // -- tally --

    #[test]
    fn tally_counts_outcomes() {
        let mut tally = ImportTally::default();
        tally.record_imported();
        tally.record_imported();
        tally.record_rejection(RowRejection {
            line: 3,
            kind: RejectionKind::Skipped,
            reason: "dup".into(),
        });
        tally.record_rejection(RowRejection {
            line: 4,
            kind: RejectionKind::Failed,
            reason: "bad".into(),
        });

        assert_eq!(tally.imported, 2);
        assert_eq!(tally.skipped, 1);
        assert_eq!(tally.failed, 1);
        assert_eq!(tally.errors.len(), 2);
    }
}
