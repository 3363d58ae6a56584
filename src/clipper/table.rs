//! Annotation table parsing.
//!
//! Annotation tables are tab-separated selection tables with one labeled
//! event per row. Uses the `csv` crate with a tab delimiter.

use serde::Deserialize;

use crate::constants::{UTF8_BOM, columns};
use crate::error::{Error, Result, error_chain};

/// Internal record for row deserialization.
#[derive(Debug, Deserialize)]
struct AnnotationRecord {
    #[serde(rename = "Begin Time (s)")]
    begin: f64,
    #[serde(rename = "End Time (s)")]
    end: f64,
    sound_category: String,
    sound_type: String,
    label_id: String,
    confidence: f64,
}

impl AnnotationRecord {
    fn into_row(self, line: usize) -> std::result::Result<AnnotationRow, String> {
        if !self.confidence.is_finite() {
            return Err(format!(
                "confidence must be a finite number, got {}",
                self.confidence
            ));
        }
        Ok(AnnotationRow {
            line,
            begin: self.begin,
            end: self.end,
            sound_category: self.sound_category,
            sound_type: self.sound_type,
            label_id: self.label_id,
            confidence: format_confidence(self.confidence),
        })
    }
}

/// Render a confidence as a float column prints it: shortest round-trip
/// digits, keeping `.0` on whole numbers (`0.90` is `0.9`, `1` is `1.0`).
#[allow(clippy::float_cmp)]
fn format_confidence(value: f64) -> String {
    if value.trunc() == value && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

/// One labeled event from an annotation table.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationRow {
    /// 1-based line in the table (the header is line 1).
    pub line: usize,
    /// Event onset in seconds.
    pub begin: f64,
    /// Event offset in seconds.
    pub end: f64,
    /// Sound category label.
    pub sound_category: String,
    /// Sound type label.
    pub sound_type: String,
    /// Label identifier.
    pub label_id: String,
    /// Confidence, normalised for use in object keys.
    pub confidence: String,
}

/// A row that could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRow {
    /// 1-based line in the table.
    pub line: usize,
    /// Why the row was rejected.
    pub reason: String,
}

/// Parsed annotation table.
#[derive(Debug, Clone, Default)]
pub struct AnnotationTable {
    /// Rows in table order.
    pub rows: Vec<AnnotationRow>,
    /// Rows whose values could not be parsed.
    pub rejected: Vec<RejectedRow>,
}

impl AnnotationTable {
    /// Number of data lines seen, parsed or not.
    pub fn total_rows(&self) -> usize {
        self.rows.len() + self.rejected.len()
    }
}

/// Parse a tab-separated annotation table.
///
/// Required columns are `Begin Time (s)`, `End Time (s)`, `sound_category`,
/// `sound_type`, `label_id` and `confidence`; other columns are ignored.
/// A UTF-8 BOM and surrounding whitespace in fields are tolerated.
///
/// # Errors
///
/// Returns [`Error::MissingColumn`] for the first required column absent from
/// the header (an empty input has no columns), or [`Error::TableParse`] if the
/// header cannot be read. Malformed data rows do not fail the table; they are
/// collected in [`AnnotationTable::rejected`].
pub fn load_annotation_table(bytes: &[u8]) -> Result<AnnotationTable> {
    let bytes = bytes.strip_prefix(UTF8_BOM.as_slice()).unwrap_or(bytes);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| Error::TableParse { source: e })?
        .clone();

    if let Some(column) = columns::REQUIRED
        .into_iter()
        .find(|column| !headers.iter().any(|h| h == *column))
    {
        return Err(Error::MissingColumn { column });
    }

    let mut table = AnnotationTable::default();

    for (index, result) in reader.records().enumerate() {
        let line = index + 2;
        let parsed = result
            .and_then(|record| record.deserialize::<AnnotationRecord>(Some(&headers)))
            .map_err(|e| error_chain(&e))
            .and_then(|record| record.into_row(line));

        match parsed {
            Ok(row) => table.rows.push(row),
            Err(reason) => table.rejected.push(RejectedRow { line, reason }),
        }
    }

    Ok(table)
}
