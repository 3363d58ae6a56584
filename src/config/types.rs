//! Configuration type definitions.

use crate::constants::{DEFAULT_KEY_PREFIX, DEFAULT_REGION, DEFAULT_RESAMPLE_RATE};
use serde::{Deserialize, Serialize};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage credentials.
    #[serde(default)]
    pub credentials: CredentialsConfig,

    /// Storage endpoint settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Clip extraction settings.
    #[serde(default)]
    pub extraction: ExtractionConfig,
}

/// Access keys for the object store.
///
/// Both fields are optional at parse time so that a missing key is reported
/// by name when the client is built, instead of as a TOML error.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialsConfig {
    /// Access key id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_key: Option<String>,

    /// Secret access key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_access_key: Option<String>,
}

impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("access_key", &self.access_key)
            .field(
                "secret_access_key",
                &self.secret_access_key.as_ref().map(|_| "********"),
            )
            .finish()
    }
}

/// Object store endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Region name.
    pub region: String,

    /// Custom endpoint URL for S3-compatible stores.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Use path-style addressing (`endpoint/bucket/key`).
    pub force_path_style: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            endpoint: None,
            force_path_style: false,
        }
    }
}

/// Clip extraction settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// First segment of every uploaded clip key.
    pub key_prefix: String,

    /// How source audio is decoded.
    pub decode: DecodeMode,

    /// Target rate for [`DecodeMode::Resample`].
    pub resample_rate: u32,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            decode: DecodeMode::Native,
            resample_rate: DEFAULT_RESAMPLE_RATE,
        }
    }
}

/// How source audio is decoded, as set in the config file or on the command line.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DecodeMode {
    /// Keep the file's own rate and channel layout.
    #[default]
    Native,
    /// Mix down to mono and resample to `resample_rate`.
    Resample,
}

/// Object store backend selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum StoreKind {
    /// S3 or an S3-compatible service.
    #[default]
    S3,
    /// A local directory, one subdirectory per bucket.
    Local,
}

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputMode {
    /// Log lines and a progress bar.
    #[default]
    Human,
    /// A single JSON result envelope.
    Json,
}

impl OutputMode {
    /// Whether output is machine-readable.
    pub const fn is_structured(self) -> bool {
        matches!(self, Self::Json)
    }
}
