//! Test repositories — mock `CallRepository` implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use callscribe_core::error::CallError;
use callscribe_core::record::{CallRecord, NewCallRecord, RecordingDuration, RecordingStatus};
use callscribe_core::repository::CallRepository;
use chrono::{DateTime, Utc};

/// A call repository that keeps records in memory with the same uniqueness
/// and conditional-update semantics as the `SQLite` store.
#[derive(Debug, Default)]
pub struct InMemoryCallRepository {
    records: Mutex<Vec<CallRecord>>,
}

impl InMemoryCallRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all stored records, in insertion order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn records(&self) -> Vec<CallRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl CallRepository for InMemoryCallRepository {
    async fn insert_call(&self, record: NewCallRecord) -> Result<i64, CallError> {
        let mut records = self.records.lock().unwrap();
        if records.iter().any(|r| r.call_sid == record.call_sid) {
            return Err(CallError::DuplicateEvent(record.call_sid));
        }

        let id = i64::try_from(records.len()).unwrap() + 1;
        records.push(CallRecord {
            id,
            call_sid: record.call_sid,
            caller: record.caller,
            recording_sid: Some(record.recording_sid),
            recording_url: Some(record.recording_url),
            transcription_sid: Some(record.transcription_sid),
            transcription_text: Some(record.transcription_text),
            recording_duration: None,
            recording_status: RecordingStatus::Pending,
            created_at: record.received_at,
            updated_at: record.received_at,
        });
        Ok(id)
    }

    async fn complete_recording(
        &self,
        call_sid: &str,
        duration: RecordingDuration,
        completed_at: DateTime<Utc>,
    ) -> Result<u64, CallError> {
        let mut records = self.records.lock().unwrap();
        let mut affected = 0;
        for record in records.iter_mut().filter(|r| r.call_sid == call_sid) {
            record.recording_duration = Some(duration);
            record.recording_status = RecordingStatus::Confirmed;
            record.updated_at = completed_at;
            affected += 1;
        }
        Ok(affected)
    }

    async fn exists(&self, call_sid: &str) -> Result<bool, CallError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .any(|r| r.call_sid == call_sid))
    }

    async fn find_by_call_sid(&self, call_sid: &str) -> Result<Option<CallRecord>, CallError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.call_sid == call_sid)
            .cloned())
    }
}

/// A call repository whose records vanish between the existence check and
/// the update: `exists` always reports `true` while every update touches
/// zero rows. Useful for exercising the `NoEffect` path.
#[derive(Debug)]
pub struct VanishingCallRepository;

#[async_trait]
impl CallRepository for VanishingCallRepository {
    async fn insert_call(&self, _record: NewCallRecord) -> Result<i64, CallError> {
        Ok(1)
    }

    async fn complete_recording(
        &self,
        _call_sid: &str,
        _duration: RecordingDuration,
        _completed_at: DateTime<Utc>,
    ) -> Result<u64, CallError> {
        Ok(0)
    }

    async fn exists(&self, _call_sid: &str) -> Result<bool, CallError> {
        Ok(true)
    }

    async fn find_by_call_sid(&self, _call_sid: &str) -> Result<Option<CallRecord>, CallError> {
        Ok(None)
    }
}

/// A call repository that always returns a persistence failure. Useful for
/// testing error-handling paths.
#[derive(Debug)]
pub struct FailingCallRepository;

#[async_trait]
impl CallRepository for FailingCallRepository {
    async fn insert_call(&self, _record: NewCallRecord) -> Result<i64, CallError> {
        Err(CallError::PersistenceFailure("connection refused".into()))
    }

    async fn complete_recording(
        &self,
        _call_sid: &str,
        _duration: RecordingDuration,
        _completed_at: DateTime<Utc>,
    ) -> Result<u64, CallError> {
        Err(CallError::PersistenceFailure("connection refused".into()))
    }

    async fn exists(&self, _call_sid: &str) -> Result<bool, CallError> {
        Err(CallError::PersistenceFailure("connection refused".into()))
    }

    async fn find_by_call_sid(&self, _call_sid: &str) -> Result<Option<CallRecord>, CallError> {
        Err(CallError::PersistenceFailure("connection refused".into()))
    }
}
