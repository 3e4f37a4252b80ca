//! Query handlers for call records.

use callscribe_core::error::CallError;
use callscribe_core::record::{CallRecord, RecordingStatus};
use callscribe_core::repository::CallRepository;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Read-only view of a call record.
#[derive(Debug, Serialize)]
pub struct CallView {
    /// Surrogate identifier.
    pub id: i64,
    /// Vendor-assigned correlation key.
    pub call_sid: String,
    /// The caller's address.
    pub caller: String,
    /// Recording identifier.
    pub recording_sid: Option<String>,
    /// Recording location.
    pub recording_url: Option<String>,
    /// Transcription identifier.
    pub transcription_sid: Option<String>,
    /// Transcribed text.
    pub transcription_text: Option<String>,
    /// Recording length in seconds, once confirmed.
    pub recording_duration_seconds: Option<i64>,
    /// Confirmation state.
    pub recording_status: RecordingStatus,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last mutated.
    pub updated_at: DateTime<Utc>,
}

impl From<CallRecord> for CallView {
    fn from(record: CallRecord) -> Self {
        Self {
            id: record.id,
            call_sid: record.call_sid,
            caller: record.caller,
            recording_sid: record.recording_sid,
            recording_url: record.recording_url,
            transcription_sid: record.transcription_sid,
            transcription_text: record.transcription_text,
            recording_duration_seconds: record.recording_duration.map(|d| d.seconds()),
            recording_status: record.recording_status,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Returns whether a call record exists for `call_sid`. Never mutates.
///
/// # Errors
///
/// Returns `CallError::PersistenceFailure` if the lookup itself fails; a
/// failed lookup is never reported as absence.
pub async fn call_exists(call_sid: &str, repo: &dyn CallRepository) -> Result<bool, CallError> {
    repo.exists(call_sid).await
}

/// Retrieves a call record by its call SID.
///
/// # Errors
///
/// Returns `CallError::NotFound` if no record exists for the call SID.
/// Returns `CallError::PersistenceFailure` on storage errors.
pub async fn get_call_by_sid(
    call_sid: &str,
    repo: &dyn CallRepository,
) -> Result<CallView, CallError> {
    repo.find_by_call_sid(call_sid)
        .await?
        .map(CallView::from)
        .ok_or_else(|| CallError::NotFound(call_sid.to_owned()))
}
