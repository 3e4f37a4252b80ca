//! Typed webhook events.
//!
//! The provider delivers the transcription callback and the recording
//! completion callback independently and in no particular order. Each is
//! normalized at the boundary into one of the variants below.

use crate::record::RecordingDuration;

/// Emitted when a recording's transcription is ready. Carries the full call
/// metadata and is the only event that can create a call record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingTranscribed {
    /// Vendor-assigned correlation key.
    pub call_sid: String,
    /// The caller's address.
    pub caller: String,
    /// Recording identifier.
    pub recording_sid: String,
    /// Recording location.
    pub recording_url: String,
    /// Transcription identifier.
    pub transcription_sid: String,
    /// Transcribed text. May be empty.
    pub transcription_text: String,
}

/// Emitted when a recording has finished and its duration is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingCompleted {
    /// Vendor-assigned correlation key.
    pub call_sid: String,
    /// Recording length.
    pub duration: RecordingDuration,
}

/// Inbound call lifecycle events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallEvent {
    /// A transcription is ready.
    RecordingTranscribed(RecordingTranscribed),
    /// A recording completed.
    RecordingCompleted(RecordingCompleted),
}

impl CallEvent {
    /// Returns the correlation key the event belongs to.
    #[must_use]
    pub fn call_sid(&self) -> &str {
        match self {
            Self::RecordingTranscribed(e) => &e.call_sid,
            Self::RecordingCompleted(e) => &e.call_sid,
        }
    }

    /// Returns the event type name (used for logging).
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::RecordingTranscribed(_) => "call.recording_transcribed",
            Self::RecordingCompleted(_) => "call.recording_completed",
        }
    }
}
