//! Configuration validation.

use crate::config::{Config, CredentialsConfig};
use crate::error::{Error, Result};

/// Validate the entire configuration.
///
/// Credentials are not checked here; they are only required when the S3
/// store is built.
pub fn validate_config(config: &Config) -> Result<()> {
    let extraction = &config.extraction;

    if extraction.key_prefix.trim_matches('/').is_empty() {
        return Err(Error::ConfigValidation {
            message: "extraction.key_prefix must not be empty".to_string(),
        });
    }

    if extraction.resample_rate == 0 {
        return Err(Error::ConfigValidation {
            message: "extraction.resample_rate must be at least 1 Hz".to_string(),
        });
    }

    if config.storage.region.is_empty() {
        return Err(Error::ConfigValidation {
            message: "storage.region must not be empty".to_string(),
        });
    }

    Ok(())
}

/// Resolve the access key pair, naming the first missing field.
///
/// Empty strings count as missing.
pub fn require_credentials(creds: &CredentialsConfig) -> Result<(&str, &str)> {
    let access_key = non_empty(creds.access_key.as_deref()).ok_or(Error::MissingCredential {
        field: "access_key",
    })?;
    let secret = non_empty(creds.secret_access_key.as_deref()).ok_or(
        Error::MissingCredential {
            field: "secret_access_key",
        },
    )?;
    Ok((access_key, secret))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
