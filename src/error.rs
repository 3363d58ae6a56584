//! Error types for selclip.

/// Result type alias for selclip operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for selclip.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    /// A storage credential is missing from the configuration.
    #[error("storage credential '{field}' is missing from the configuration")]
    MissingCredential {
        /// Name of the missing field.
        field: &'static str,
    },

    /// Failed to set up the storage client.
    #[error("failed to create storage client: {reason}")]
    StoreInit {
        /// Description of the failure.
        reason: String,
    },

    /// Failed to download an object.
    #[error("failed to download object '{key}' from bucket '{bucket}': {reason}")]
    ObjectFetch {
        /// Bucket name.
        bucket: String,
        /// Object key.
        key: String,
        /// Description of the failure.
        reason: String,
    },

    /// Failed to upload an object.
    #[error("failed to upload object '{key}' to bucket '{bucket}': {reason}")]
    ObjectUpload {
        /// Bucket name.
        bucket: String,
        /// Object key.
        key: String,
        /// Description of the failure.
        reason: String,
    },

    /// Object key is not usable by the store.
    #[error("invalid object key '{key}': {reason}")]
    InvalidObjectKey {
        /// Offending key.
        key: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Failed to open audio data.
    #[error("failed to open audio '{name}'")]
    AudioOpen {
        /// Name of the audio object.
        name: String,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to decode audio.
    #[error("failed to decode audio '{name}'")]
    AudioDecode {
        /// Name of the audio object.
        name: String,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// No audio tracks found.
    #[error("no audio tracks found in '{name}'")]
    NoAudioTracks {
        /// Name of the audio object.
        name: String,
    },

    /// Failed to resample audio.
    #[error("failed to resample audio: {reason}")]
    Resample {
        /// Description of the resampling failure.
        reason: String,
    },

    /// Failed to encode a WAV clip.
    #[error("failed to encode WAV clip")]
    WavEncode {
        /// Underlying error.
        #[source]
        source: hound::Error,
    },

    /// Annotation table is missing a required column.
    #[error("annotation table is missing required column '{column}'")]
    MissingColumn {
        /// Name of the missing column.
        column: &'static str,
    },

    /// Failed to parse the annotation table.
    #[error("failed to parse annotation table")]
    TableParse {
        /// Underlying error.
        #[source]
        source: csv::Error,
    },

    /// Source audio or annotation table could not be obtained.
    #[error("{what} '{key}' is unavailable, no clips can be extracted")]
    SourceUnavailable {
        /// Which input is missing.
        what: &'static str,
        /// Object key of the input.
        key: String,
        /// Underlying error.
        #[source]
        source: Box<Self>,
    },

    /// A row failed while fail-fast mode was active.
    #[error("row at line {line} failed: {reason}")]
    RowFailed {
        /// Source line of the row.
        line: usize,
        /// Why it failed.
        reason: String,
    },

    /// Internal error (for unexpected failures).
    #[error("internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}

impl Error {
    /// Stable `snake_case` identifier used in JSON error events.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::ConfigDirNotFound
            | Self::ConfigRead { .. }
            | Self::ConfigParse { .. }
            | Self::ConfigValidation { .. }
            | Self::ConfigWrite { .. }
            | Self::ConfigSerialize { .. } => "config_error",
            Self::MissingCredential { .. } => "missing_credential",
            Self::StoreInit { .. } => "store_init_failed",
            Self::ObjectFetch { .. } => "object_fetch_failed",
            Self::ObjectUpload { .. } => "object_upload_failed",
            Self::InvalidObjectKey { .. } => "invalid_object_key",
            Self::AudioOpen { .. } | Self::AudioDecode { .. } | Self::NoAudioTracks { .. } => {
                "audio_decode_failed"
            }
            Self::Resample { .. } => "resample_failed",
            Self::WavEncode { .. } => "wav_encode_failed",
            Self::MissingColumn { .. } | Self::TableParse { .. } => "invalid_table",
            Self::SourceUnavailable { .. } => "source_unavailable",
            Self::RowFailed { .. } => "row_failed",
            Self::Internal { .. } => "internal",
        }
    }
}

/// Render an error followed by its chain of sources, separated by `: `.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_chain_includes_sources() {
        let err = Error::SourceUnavailable {
            what: "source audio",
            key: "rec.wav".to_string(),
            source: Box::new(Error::ObjectFetch {
                bucket: "field".to_string(),
                key: "rec.wav".to_string(),
                reason: "no such key".to_string(),
            }),
        };
        let message = error_chain(&err);
        assert!(message.starts_with("source audio 'rec.wav' is unavailable"));
        assert!(message.ends_with("bucket 'field': no such key"));
        assert_eq!(err.code(), "source_unavailable");
    }
}
