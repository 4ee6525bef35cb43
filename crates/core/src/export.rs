//! CSV export of the herd, using the same column set the importer accepts
//! so an exported file round-trips through the import screen.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::CoreError;
use crate::import::IMPORT_COLUMNS;

/// One sow as it appears in the export file.
#[derive(Debug, Clone, Serialize)]
pub struct SowExportRow {
    pub ear_tag: Option<String>,
    pub name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub breed: String,
    pub status: String,
    pub right_ear_notch: Option<i32>,
    pub left_ear_notch: Option<i32>,
    pub registration_number: Option<String>,
    pub notes: Option<String>,
}

/// Serialize rows to CSV bytes with the standard header.
pub fn write_sows_csv(rows: &[SowExportRow]) -> Result<Vec<u8>, CoreError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer
        .write_record(IMPORT_COLUMNS)
        .map_err(|e| CoreError::Internal(format!("CSV header write failed: {e}")))?;

    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| CoreError::Internal(format!("CSV row write failed: {e}")))?;
    }

    writer
        .into_inner()
        .map_err(|e| CoreError::Internal(format!("CSV flush failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(ear_tag: &str) -> SowExportRow {
        SowExportRow {
            ear_tag: Some(ear_tag.to_string()),
            name: Some("Petunia".to_string()),
            birth_date: NaiveDate::from_ymd_opt(2023, 1, 15),
            breed: "Yorkshire".to_string(),
            status: "active".to_string(),
            right_ear_notch: Some(12),
            left_ear_notch: Some(3),
            registration_number: None,
            notes: None,
        }
    }

    #[test]
    fn export_writes_header_and_rows() {
        let bytes = write_sows_csv(&[row("S-1"), row("S-2")]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();

        assert_eq!(lines.next().unwrap(), IMPORT_COLUMNS.join(","));
        assert!(lines.next().unwrap().starts_with("S-1,Petunia,2023-01-15"));
        assert!(lines.next().unwrap().starts_with("S-2,"));
    }

    #[test]
    fn export_round_trips_through_import_parser() {
        let bytes = write_sows_csv(&[row("S-1")]).unwrap();
        let parsed = crate::import::parse_csv(&bytes).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].ear_tag.as_deref(), Some("S-1"));
        assert_eq!(parsed[0].birth_date, "2023-01-15");
    }

    #[test]
    fn empty_export_is_header_only() {
        let bytes = write_sows_csv(&[]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text.trim_end(), IMPORT_COLUMNS.join(","));
    }
}
