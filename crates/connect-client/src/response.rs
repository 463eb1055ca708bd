//! Backend response envelopes.

use connect_model::ParticipantRecord;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{ClientError, Result};

/// The `{ code, data }` envelope most endpoints answer with.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub code: u16,
    pub data: T,
}

/// Error bodies carry a human-readable `message`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    pub(crate) message: String,
}

/// Best-effort message extraction for a failed response.
pub(crate) fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|err| err.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

/// The error message for a failed response whose body may not have been
/// readable.
pub(crate) fn failed_body_message<E: std::fmt::Display>(
    body: std::result::Result<String, E>,
) -> String {
    match body {
        Ok(body) => error_message(&body),
        Err(e) => format!("<unreadable body: {e}>"),
    }
}

/// Parse participants from either a lookup response body or a single record.
///
/// Saved lookup responses (`{"code": 200, "data": [...]}`) and exported
/// single records are both accepted.
pub fn parse_participants(json: &str) -> Result<Vec<ParticipantRecord>> {
    let value: Value = serde_json::from_str(json)?;
    let is_envelope = value
        .as_object()
        .is_some_and(|object| object.contains_key("code") && object.contains_key("data"));
    if is_envelope {
        let response: ApiResponse<Vec<ParticipantRecord>> = serde_json::from_value(value)?;
        return Ok(response.data);
    }
    match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| ParticipantRecord::try_from(item).map_err(|e| ClientError::Decode(e.to_string())))
            .collect(),
        other => ParticipantRecord::try_from(other)
            .map(|record| vec![record])
            .map_err(|e| ClientError::Decode(e.to_string())),
    }
}
