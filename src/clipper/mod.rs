//! Clip extraction from annotated recordings.
//!
//! This module turns a recording plus its annotation table into one WAV
//! clip per annotated event, uploaded under a key derived from the event's
//! labels.

pub mod command;
mod extractor;
mod key;
mod report;
mod table;

pub use extractor::{ClipExtractor, ExtractionJob, ExtractionOptions};
pub use key::ClipKey;
pub use report::{ExtractionReport, SkipReason, SkippedRow, UploadedClip};
pub use table::{AnnotationRow, AnnotationTable, RejectedRow, load_annotation_table};
