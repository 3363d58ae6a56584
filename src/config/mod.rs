//! Configuration loading and management.

mod file;
mod paths;
mod types;
mod validate;

pub use file::{load_config_file, save_config};
pub use paths::{config_dir, config_file_path};
pub use types::{
    Config, CredentialsConfig, DecodeMode, ExtractionConfig, OutputMode, StorageConfig, StoreKind,
};
pub use validate::{require_credentials, validate_config};
