//! Event normalizer — turns raw provider callback fields into typed events.
//!
//! Validates field presence and integer parseability only. Never touches
//! storage.

use std::collections::HashMap;

use callscribe_core::error::CallError;
use callscribe_core::event::{CallEvent, RecordingCompleted, RecordingTranscribed};
use callscribe_core::record::RecordingDuration;

/// Raw form fields posted by the telephony provider.
pub type CallbackFields = HashMap<String, String>;

const CALL_SID: &str = "CallSid";
const FROM: &str = "From";
const RECORDING_SID: &str = "RecordingSid";
const RECORDING_URL: &str = "RecordingUrl";
const RECORDING_DURATION: &str = "RecordingDuration";
const TRANSCRIPTION_SID: &str = "TranscriptionSid";
const TRANSCRIPTION_TEXT: &str = "TranscriptionText";

fn required(fields: &CallbackFields, name: &str) -> Result<String, CallError> {
    match fields.get(name).map(|v| v.trim()) {
        Some(value) if !value.is_empty() => Ok(value.to_owned()),
        _ => Err(CallError::InvalidInput(format!(
            "missing required field {name}"
        ))),
    }
}

/// Normalizes a transcription callback into a `RecordingTranscribed` event.
///
/// `TranscriptionText` may be empty or absent; every other field is required.
///
/// # Errors
///
/// Returns `CallError::InvalidInput` naming the first missing field.
pub fn transcription_event(fields: &CallbackFields) -> Result<CallEvent, CallError> {
    Ok(CallEvent::RecordingTranscribed(RecordingTranscribed {
        call_sid: required(fields, CALL_SID)?,
        caller: required(fields, FROM)?,
        recording_sid: required(fields, RECORDING_SID)?,
        recording_url: required(fields, RECORDING_URL)?,
        transcription_sid: required(fields, TRANSCRIPTION_SID)?,
        transcription_text: fields.get(TRANSCRIPTION_TEXT).cloned().unwrap_or_default(),
    }))
}

/// Normalizes a recording status callback into a `RecordingCompleted` event.
///
/// # Errors
///
/// Returns `CallError::InvalidInput` if `CallSid` is missing or
/// `RecordingDuration` is missing, not an integer, or negative.
pub fn completion_event(fields: &CallbackFields) -> Result<CallEvent, CallError> {
    let call_sid = required(fields, CALL_SID)?;
    let raw = required(fields, RECORDING_DURATION)?;
    let seconds: i64 = raw.parse().map_err(|_| {
        CallError::InvalidInput(format!(
            "could not convert {RECORDING_DURATION} {raw:?} to an integer"
        ))
    })?;

    Ok(CallEvent::RecordingCompleted(RecordingCompleted {
        call_sid,
        duration: RecordingDuration::new(seconds)?,
    }))
}
