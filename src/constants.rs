//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "selclip";

/// Config file name inside the configuration directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Default key prefix for uploaded clips.
pub const DEFAULT_KEY_PREFIX: &str = "soundfiles_trimmed";

/// Default target rate when the resampling decode strategy is selected.
pub const DEFAULT_RESAMPLE_RATE: u32 = 16_000;

/// Default storage region.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Content type set on uploaded clips.
pub const WAV_CONTENT_TYPE: &str = "audio/wav";

/// File extension of uploaded clips.
pub const WAV_EXTENSION: &str = "wav";

/// Bits per sample of encoded clips.
pub const WAV_BITS_PER_SAMPLE: u16 = 16;

/// UTF-8 Byte Order Mark, tolerated at the start of annotation tables.
pub const UTF8_BOM: &[u8; 3] = b"\xEF\xBB\xBF";

/// Annotation table column names.
pub mod columns {
    /// Event onset in seconds.
    pub const BEGIN_TIME: &str = "Begin Time (s)";
    /// Event offset in seconds.
    pub const END_TIME: &str = "End Time (s)";
    /// Sound category label.
    pub const SOUND_CATEGORY: &str = "sound_category";
    /// Sound type label.
    pub const SOUND_TYPE: &str = "sound_type";
    /// Label identifier, used as the clip file name.
    pub const LABEL_ID: &str = "label_id";
    /// Annotation confidence, used as a key segment.
    pub const CONFIDENCE: &str = "confidence";

    /// Columns that must be present, in reporting order.
    pub const REQUIRED: [&str; 6] = [
        BEGIN_TIME,
        END_TIME,
        SOUND_CATEGORY,
        SOUND_TYPE,
        LABEL_ID,
        CONFIDENCE,
    ];
}

/// Resampler settings.
pub mod resample {
    /// Input chunk size fed to the FFT resampler.
    pub const CHUNK_SIZE: usize = 1024;
    /// Sub-chunks per chunk.
    pub const SUB_CHUNKS: usize = 1;
}
