//! Command handlers for call lifecycle events.
//!
//! A transcription event is the only event that carries enough data to
//! create a call record. A completion event is correlation-only: it confirms
//! an existing record and never creates one, even when it arrives first.

use callscribe_core::clock::Clock;
use callscribe_core::error::CallError;
use callscribe_core::event::{CallEvent, RecordingCompleted, RecordingTranscribed};
use callscribe_core::record::NewCallRecord;
use callscribe_core::repository::CallRepository;
use tracing::{debug, info};

/// The effect an event had on the call records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// A new call record was created with the given surrogate id.
    Recorded {
        /// Surrogate id of the created record.
        call_id: i64,
    },
    /// The call's recording was confirmed.
    Confirmed,
}

fn require_non_empty(field: &str, value: &str) -> Result<(), CallError> {
    if value.trim().is_empty() {
        return Err(CallError::InvalidInput(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Handles a `RecordingTranscribed` event: stores a new, pending call record.
///
/// # Errors
///
/// Returns `CallError::InvalidInput` if a required field is empty,
/// `CallError::DuplicateEvent` if the call was already recorded, and
/// `CallError::PersistenceFailure` if the store rejects the write.
pub async fn handle_record_transcription(
    event: &RecordingTranscribed,
    clock: &dyn Clock,
    repo: &dyn CallRepository,
) -> Result<i64, CallError> {
    require_non_empty("call_sid", &event.call_sid)?;
    require_non_empty("caller", &event.caller)?;
    require_non_empty("recording_sid", &event.recording_sid)?;
    require_non_empty("recording_url", &event.recording_url)?;
    require_non_empty("transcription_sid", &event.transcription_sid)?;

    let record = NewCallRecord {
        call_sid: event.call_sid.clone(),
        caller: event.caller.clone(),
        recording_sid: event.recording_sid.clone(),
        recording_url: event.recording_url.clone(),
        transcription_sid: event.transcription_sid.clone(),
        transcription_text: event.transcription_text.clone(),
        received_at: clock.now(),
    };

    let call_id = repo.insert_call(record).await?;
    info!(call_sid = %event.call_sid, call_id, "stored call transcription");

    Ok(call_id)
}

/// Handles a `RecordingCompleted` event: sets the recording duration and
/// confirms the recording of an existing call.
///
/// The existence check only produces a friendlier error. The conditional
/// update decides: zero rows affected is `NoEffect` even if the check passed.
///
/// # Errors
///
/// Returns `CallError::NotFound` if no record exists for the call,
/// `CallError::NoEffect` if the update touched no rows, and
/// `CallError::PersistenceFailure` on storage errors.
pub async fn handle_complete_recording(
    event: &RecordingCompleted,
    clock: &dyn Clock,
    repo: &dyn CallRepository,
) -> Result<(), CallError> {
    require_non_empty("call_sid", &event.call_sid)?;

    if !repo.exists(&event.call_sid).await? {
        return Err(CallError::NotFound(event.call_sid.clone()));
    }

    let affected = repo
        .complete_recording(&event.call_sid, event.duration, clock.now())
        .await?;
    debug!(call_sid = %event.call_sid, affected, "recording completion applied");

    if affected == 0 {
        return Err(CallError::NoEffect(event.call_sid.clone()));
    }

    info!(
        call_sid = %event.call_sid,
        duration_seconds = event.duration.seconds(),
        "confirmed call recording"
    );
    Ok(())
}

/// Applies any call event to its record.
///
/// # Errors
///
/// Returns the error of the handler the event was dispatched to.
pub async fn handle_event(
    event: &CallEvent,
    clock: &dyn Clock,
    repo: &dyn CallRepository,
) -> Result<EventOutcome, CallError> {
    match event {
        CallEvent::RecordingTranscribed(e) => handle_record_transcription(e, clock, repo)
            .await
            .map(|call_id| EventOutcome::Recorded { call_id }),
        CallEvent::RecordingCompleted(e) => handle_complete_recording(e, clock, repo)
            .await
            .map(|()| EventOutcome::Confirmed),
    }
}
