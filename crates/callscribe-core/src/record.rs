//! Call record model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CallError;

/// Confirmation state of a call's recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordingStatus {
    /// The recording has not been confirmed by a completion event yet.
    Pending,
    /// A completion event reported the recording's duration.
    Confirmed,
}

impl RecordingStatus {
    /// Returns the storage representation of the status.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
        }
    }
}

impl fmt::Display for RecordingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordingStatus {
    type Err = CallError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            other => Err(CallError::PersistenceFailure(format!(
                "unknown recording status: {other}"
            ))),
        }
    }
}

/// Recording length in whole seconds. Never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordingDuration(i64);

impl RecordingDuration {
    /// Creates a duration from a number of seconds.
    ///
    /// # Errors
    ///
    /// Returns `CallError::InvalidInput` if `seconds` is negative.
    pub fn new(seconds: i64) -> Result<Self, CallError> {
        if seconds < 0 {
            return Err(CallError::InvalidInput(format!(
                "recording duration must be non-negative, got {seconds}"
            )));
        }
        Ok(Self(seconds))
    }

    /// Returns the duration in seconds.
    #[must_use]
    pub fn seconds(self) -> i64 {
        self.0
    }
}

/// The persisted state of one call's recording and transcription lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRecord {
    /// Surrogate identifier assigned by the store.
    pub id: i64,
    /// Vendor-assigned correlation key.
    pub call_sid: String,
    /// The caller's address.
    pub caller: String,
    /// Recording identifier, once a recording has been observed.
    pub recording_sid: Option<String>,
    /// Recording location, set together with `recording_sid`.
    pub recording_url: Option<String>,
    /// Transcription identifier.
    pub transcription_sid: Option<String>,
    /// Transcribed text. May be empty.
    pub transcription_text: Option<String>,
    /// Recording length, set only by a completion event.
    pub recording_duration: Option<RecordingDuration>,
    /// Confirmation state.
    pub recording_status: RecordingStatus,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last mutated.
    pub updated_at: DateTime<Utc>,
}

/// Insert payload used to create a new [`CallRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCallRecord {
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
    /// When the transcription event was received.
    pub received_at: DateTime<Utc>,
}
