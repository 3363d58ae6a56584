//! Clip extraction from a recording and its annotation table.

use std::collections::HashSet;

use indicatif::ProgressBar;
use tracing::{debug, info, warn};

use super::{
    AnnotationRow, AnnotationTable, ClipKey, ExtractionReport, SkipReason, SkippedRow,
    UploadedClip, load_annotation_table,
};
use crate::audio::{AudioBuffer, DecodeStrategy, decode_audio_bytes, encode_wav, trim};
use crate::constants::{DEFAULT_KEY_PREFIX, WAV_CONTENT_TYPE};
use crate::error::{Error, Result, error_chain};
use crate::store::ObjectStore;

/// Inputs of one extraction run.
#[derive(Debug, Clone)]
pub struct ExtractionJob {
    /// Bucket holding the inputs and receiving the clips.
    pub bucket: String,
    /// Key of the source recording.
    pub audio_key: String,
    /// Key of the tab-separated annotation table.
    pub table_key: String,
}

/// Settings that apply to every row of a run.
#[derive(Debug, Clone)]
pub struct ExtractionOptions {
    /// First segment of every clip key.
    pub key_prefix: String,
    /// How the recording is decoded.
    pub decode: DecodeStrategy,
    /// Abort on the first row that produces no clip.
    pub fail_fast: bool,
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self {
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            decode: DecodeStrategy::Native,
            fail_fast: false,
        }
    }
}

/// Extracts one clip per annotation row and uploads it.
pub struct ClipExtractor<'a, S: ObjectStore + ?Sized> {
    store: &'a S,
    options: ExtractionOptions,
    progress: ProgressBar,
}

impl<'a, S: ObjectStore + ?Sized> ClipExtractor<'a, S> {
    /// Create an extractor over `store`.
    pub fn new(store: &'a S, options: ExtractionOptions) -> Self {
        Self {
            store,
            options,
            progress: ProgressBar::hidden(),
        }
    }

    /// Report row progress on `progress`. Its length is set once the table is loaded.
    #[must_use]
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Run the extraction.
    ///
    /// Rows are processed in table order, each independently: a row that
    /// fails is recorded in [`ExtractionReport::skipped`] and the run
    /// continues, unless `fail_fast` is set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SourceUnavailable`] if the recording or the table
    /// cannot be fetched, decoded, or parsed. Nothing is uploaded in that
    /// case. With `fail_fast`, returns [`Error::RowFailed`] for the first
    /// skipped row.
    pub fn run(&self, job: &ExtractionJob) -> Result<ExtractionReport> {
        let audio = self.load_audio(job)?;
        let table = self.load_table(job)?;

        info!(
            "Loaded '{}' ({:.1}s, {} Hz, {} ch) and {} annotation rows",
            job.audio_key,
            audio.duration_secs(),
            audio.sample_rate,
            audio.channels,
            table.total_rows()
        );

        let mut report = ExtractionReport {
            bucket: job.bucket.clone(),
            audio_key: job.audio_key.clone(),
            table_key: job.table_key.clone(),
            sample_rate: audio.sample_rate,
            channels: audio.channels,
            total_rows: table.total_rows(),
            ..ExtractionReport::default()
        };

        for rejected in &table.rejected {
            self.record_skip(
                &mut report,
                SkippedRow {
                    line: rejected.line,
                    label_id: None,
                    reason: SkipReason::Unparseable,
                    message: rejected.reason.clone(),
                },
            )?;
        }

        self.progress.set_length(table.rows.len() as u64);
        let mut written: HashSet<ClipKey> = HashSet::new();

        for row in &table.rows {
            self.progress.set_message(row.label_id.clone());

            match self.process_row(job, &audio, row) {
                Ok((key, clip)) => {
                    if !written.insert(key.clone()) {
                        warn!(
                            "Line {}: key '{key}' was already written in this run, overwriting",
                            row.line
                        );
                        report.overwritten_keys.push(key.to_string());
                    }
                    report.uploaded.push(clip);
                }
                Err(skipped) => self.record_skip(&mut report, skipped)?,
            }

            self.progress.inc(1);
        }

        self.progress.finish_with_message("done");

        info!(
            "Uploaded {} clips to '{}', skipped {} rows",
            report.uploaded.len(),
            job.bucket,
            report.skipped.len()
        );

        Ok(report)
    }

    fn load_audio(&self, job: &ExtractionJob) -> Result<AudioBuffer> {
        self.store
            .fetch(&job.bucket, &job.audio_key)
            .and_then(|bytes| decode_audio_bytes(bytes, &job.audio_key, self.options.decode))
            .map_err(|e| unavailable("source audio", &job.audio_key, e))
    }

    fn load_table(&self, job: &ExtractionJob) -> Result<AnnotationTable> {
        self.store
            .fetch(&job.bucket, &job.table_key)
            .and_then(|bytes| load_annotation_table(&bytes))
            .map_err(|e| unavailable("annotation table", &job.table_key, e))
    }

    fn process_row(
        &self,
        job: &ExtractionJob,
        audio: &AudioBuffer,
        row: &AnnotationRow,
    ) -> std::result::Result<(ClipKey, UploadedClip), SkippedRow> {
        let skip = |reason: SkipReason, message: String| SkippedRow {
            line: row.line,
            label_id: Some(row.label_id.clone()),
            reason,
            message,
        };

        validate_interval(row).map_err(|message| skip(SkipReason::InvalidInterval, message))?;
        validate_labels(row).map_err(|message| skip(SkipReason::MissingLabel, message))?;

        let key = ClipKey::for_row(&self.options.key_prefix, row);
        let clip = trim(audio, row.begin, row.end);
        if clip.is_empty() {
            return Err(skip(
                SkipReason::EmptyClip,
                format!(
                    "interval {}s-{}s starts past the end of the recording ({:.3}s)",
                    row.begin,
                    row.end,
                    audio.duration_secs()
                ),
            ));
        }

        let bytes =
            encode_wav(&clip).map_err(|e| skip(SkipReason::EncodeFailed, error_chain(&e)))?;

        self.store
            .upload(&job.bucket, key.as_str(), bytes, WAV_CONTENT_TYPE)
            .map_err(|e| skip(SkipReason::UploadFailed, error_chain(&e)))?;

        debug!(
            "Line {}: {:.3}s-{:.3}s -> {key} ({} frames)",
            row.line,
            row.begin,
            row.end,
            clip.frames()
        );

        let uploaded = UploadedClip {
            line: row.line,
            key: key.to_string(),
            begin: row.begin,
            end: row.end,
            frames: clip.frames(),
        };
        Ok((key, uploaded))
    }

    fn record_skip(&self, report: &mut ExtractionReport, skipped: SkippedRow) -> Result<()> {
        warn!(
            "Skipping line {} ({}): {}",
            skipped.line, skipped.reason, skipped.message
        );

        if self.options.fail_fast {
            self.progress.abandon_with_message("failed");
            return Err(Error::RowFailed {
                line: skipped.line,
                reason: format!("{}: {}", skipped.reason, skipped.message),
            });
        }

        report.skipped.push(skipped);
        Ok(())
    }
}

/// Log a missing input once and wrap it as the run's error.
fn unavailable(what: &'static str, key: &str, source: Error) -> Error {
    warn!("{}", error_chain(&source));
    Error::SourceUnavailable {
        what,
        key: key.to_string(),
        source: Box::new(source),
    }
}

fn validate_interval(row: &AnnotationRow) -> std::result::Result<(), String> {
    if !row.begin.is_finite() || !row.end.is_finite() {
        return Err(format!(
            "times must be finite, got {}s-{}s",
            row.begin, row.end
        ));
    }
    if row.begin < 0.0 {
        return Err(format!("begin time {}s is negative", row.begin));
    }
    if row.end <= row.begin {
        return Err(format!(
            "end time ({}s) must be greater than begin time ({}s)",
            row.end, row.begin
        ));
    }
    Ok(())
}

fn validate_labels(row: &AnnotationRow) -> std::result::Result<(), String> {
    let fields = [
        ("sound_category", &row.sound_category),
        ("sound_type", &row.sound_type),
        ("label_id", &row.label_id),
    ];
    match fields.iter().find(|(_, value)| value.is_empty()) {
        Some((name, _)) => Err(format!("'{name}' is empty")),
        None => Ok(()),
    }
}
