//! Per-run extraction report.

use serde::Serialize;

/// Outcome of one extraction run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExtractionReport {
    /// Bucket read from and written to.
    pub bucket: String,
    /// Key of the source recording.
    pub audio_key: String,
    /// Key of the annotation table.
    pub table_key: String,
    /// Sample rate of the clips in Hz.
    pub sample_rate: u32,
    /// Channel count of the clips.
    pub channels: u16,
    /// Rows found in the table, parsed or not.
    pub total_rows: usize,
    /// Clips written, in table order.
    pub uploaded: Vec<UploadedClip>,
    /// Rows that produced no clip.
    pub skipped: Vec<SkippedRow>,
    /// Keys written more than once in this run (last write wins).
    pub overwritten_keys: Vec<String>,
}

impl ExtractionReport {
    /// Whether every row produced a clip.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// A clip that was uploaded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadedClip {
    /// Table line of the row.
    pub line: usize,
    /// Object key written.
    pub key: String,
    /// Onset in seconds.
    pub begin: f64,
    /// Offset in seconds.
    pub end: f64,
    /// Frames in the clip.
    pub frames: usize,
}

/// A row that produced no clip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    /// Table line of the row.
    pub line: usize,
    /// Label id, when the row could be read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_id: Option<String>,
    /// Failure category.
    pub reason: SkipReason,
    /// Human-readable detail.
    pub message: String,
}

/// Why a row was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Row values could not be parsed.
    Unparseable,
    /// Times are negative, non-finite, or `end <= begin`.
    InvalidInterval,
    /// A label used in the key is empty.
    MissingLabel,
    /// The interval starts at or past the end of the recording.
    EmptyClip,
    /// WAV encoding failed.
    EncodeFailed,
    /// The store rejected the upload.
    UploadFailed,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::Unparseable => "unparseable",
            Self::InvalidInterval => "invalid interval",
            Self::MissingLabel => "missing label",
            Self::EmptyClip => "empty clip",
            Self::EncodeFailed => "encode failed",
            Self::UploadFailed => "upload failed",
        };
        f.write_str(text)
    }
}
