//! CLI argument definitions.

use crate::config::{DecodeMode, OutputMode, StoreKind};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use super::validators::{parse_key_prefix, parse_sample_rate};

/// Extract annotated clips from field recordings into object storage.
#[derive(Debug, Parser)]
#[command(name = "selclip")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (defaults to the platform config directory).
    #[arg(long, global = true, env = "SELCLIP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only show warnings and errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Cut one clip per annotation row and upload it.
    Extract(ExtractArgs),
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create a configuration file with empty credentials.
    Init,
    /// Display current configuration (secret key masked).
    Show,
    /// Print configuration file path.
    Path,
}

/// Arguments for the extract subcommand.
#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// Bucket holding the recording and table; clips are written here too.
    #[arg(short, long, env = "SELCLIP_BUCKET")]
    pub bucket: String,

    /// Object key of the source recording.
    #[arg(short, long)]
    pub audio: String,

    /// Object key of the tab-separated annotation table.
    #[arg(short, long)]
    pub table: String,

    /// Storage backend.
    #[arg(long, value_enum, default_value_t = StoreKind::S3)]
    pub store: StoreKind,

    /// Root directory of the local store (one subdirectory per bucket).
    #[arg(long, required_if_eq("store", "local"))]
    pub local_root: Option<PathBuf>,

    /// Decode mode (overrides `extraction.decode`).
    #[arg(long, value_enum)]
    pub decode: Option<DecodeMode>,

    /// Resample to this rate in Hz; implies `--decode resample`.
    #[arg(long, value_parser = parse_sample_rate, conflicts_with = "decode")]
    pub resample_rate: Option<u32>,

    /// Key prefix for uploaded clips (overrides `extraction.key_prefix`).
    #[arg(long, value_parser = parse_key_prefix)]
    pub prefix: Option<String>,

    /// Output mode.
    #[arg(long, value_enum, default_value_t = OutputMode::Human)]
    pub output_mode: OutputMode,

    /// Stop at the first row that produces no clip.
    #[arg(long)]
    pub fail_fast: bool,

    /// Disable the progress bar.
    #[arg(long)]
    pub no_progress: bool,
}
