//! CLI argument validators.

/// Highest sample rate accepted for resampling.
const MAX_SAMPLE_RATE: u32 = 768_000;

/// Parse and validate a sample rate in Hz (1 to 768000).
pub fn parse_sample_rate(s: &str) -> Result<u32, String> {
    let value: u32 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid sample rate"))?;

    if !(1..=MAX_SAMPLE_RATE).contains(&value) {
        return Err(format!(
            "sample rate must be between 1 and {MAX_SAMPLE_RATE} Hz, got {value}"
        ));
    }

    Ok(value)
}

/// Parse a key prefix, rejecting ones that are empty once slashes are trimmed.
pub fn parse_key_prefix(s: &str) -> Result<String, String> {
    if s.trim_matches('/').is_empty() {
        return Err("key prefix must not be empty".to_string());
    }
    Ok(s.to_string())
}
