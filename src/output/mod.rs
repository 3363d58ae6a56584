//! Structured output for the command line.

pub mod json_envelope;
pub mod progress;

pub use json_envelope::{ErrorPayload, EventType, JsonEnvelope, ResultType};

use crate::error::{Error, error_chain};

/// Emit a JSON result event to stdout.
pub fn emit_json_result<T: serde::Serialize>(payload: &T) {
    emit(EventType::Result, payload);
}

/// Emit a JSON error event to stdout.
pub fn emit_json_error(err: &Error) {
    emit(
        EventType::Error,
        ErrorPayload {
            code: err.code().to_string(),
            message: error_chain(err),
        },
    );
}

fn emit<T: serde::Serialize>(event: EventType, payload: T) {
    let envelope = JsonEnvelope::new(event, payload);
    match serde_json::to_string(&envelope) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            // stderr keeps the stdout stream parseable
            eprintln!("error: failed to serialize JSON output: {e}");
        }
    }
}
