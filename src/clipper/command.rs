//! Extract command execution.

use tracing::{info, warn};

use crate::Error;
use crate::audio::DecodeStrategy;
use crate::cli::ExtractArgs;
use crate::config::{Config, DecodeMode, OutputMode, StoreKind};
use crate::output::{ResultType, emit_json_result, progress};
use crate::store::{LocalStore, ObjectStore, S3Store};

use super::{ClipExtractor, ExtractionJob, ExtractionOptions, ExtractionReport};

/// JSON payload for the extraction result.
#[derive(Debug, serde::Serialize)]
struct ExtractionPayload<'a> {
    result_type: ResultType,
    #[serde(flatten)]
    report: &'a ExtractionReport,
}

/// Execute the extract command.
///
/// # Errors
///
/// Returns an error if the store cannot be built, if the recording or table
/// is unavailable, or if a row fails under `--fail-fast`.
pub fn execute(args: &ExtractArgs, config: &Config) -> Result<(), Error> {
    let store = build_store(args, config)?;
    let options = resolve_options(args, config);
    let output_mode = args.output_mode;

    let job = ExtractionJob {
        bucket: args.bucket.clone(),
        audio_key: args.audio.clone(),
        table_key: args.table.clone(),
    };

    info!(
        "Extracting clips from '{}' using '{}' in bucket '{}'",
        job.audio_key, job.table_key, job.bucket
    );

    let progress_enabled = !output_mode.is_structured() && !args.no_progress;
    let extractor = ClipExtractor::new(store.as_ref(), options)
        .with_progress(progress::create_row_progress(progress_enabled));

    let report = extractor.run(&job)?;

    match output_mode {
        OutputMode::Json => emit_json_result(&ExtractionPayload {
            result_type: ResultType::ClipExtraction,
            report: &report,
        }),
        OutputMode::Human => {
            for clip in &report.uploaded {
                println!("{}", clip.key);
            }
            if !report.is_complete() {
                warn!("{} row(s) produced no clip", report.skipped.len());
            }
        }
    }

    Ok(())
}

fn build_store(args: &ExtractArgs, config: &Config) -> Result<Box<dyn ObjectStore>, Error> {
    match args.store {
        StoreKind::S3 => Ok(Box::new(S3Store::from_config(config)?)),
        StoreKind::Local => {
            let root = args.local_root.clone().ok_or_else(|| Error::Internal {
                message: "--local-root is required with --store local".to_string(),
            })?;
            Ok(Box::new(LocalStore::new(root)))
        }
    }
}

/// Merge CLI overrides onto the `[extraction]` config section.
fn resolve_options(args: &ExtractArgs, config: &Config) -> ExtractionOptions {
    let extraction = &config.extraction;

    let mode = if args.resample_rate.is_some() {
        DecodeMode::Resample
    } else {
        args.decode.unwrap_or(extraction.decode)
    };

    let decode = match mode {
        DecodeMode::Native => DecodeStrategy::Native,
        DecodeMode::Resample => DecodeStrategy::Resample {
            target_rate: args.resample_rate.unwrap_or(extraction.resample_rate),
        },
    };

    ExtractionOptions {
        key_prefix: args
            .prefix
            .clone()
            .unwrap_or_else(|| extraction.key_prefix.clone()),
        decode,
        fail_fast: args.fail_fast,
    }
}
