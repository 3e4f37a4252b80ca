//! Call repository abstraction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::CallError;
use crate::record::{CallRecord, NewCallRecord, RecordingDuration};

/// Repository trait over the single store of call records.
///
/// Implementations must make each write a single atomic operation and must
/// enforce uniqueness of `call_sid` at the storage layer.
#[async_trait]
pub trait CallRepository: Send + Sync {
    /// Insert a new call record and return its surrogate id.
    ///
    /// A record that already exists for `record.call_sid` yields
    /// `CallError::DuplicateEvent` and leaves the stored row untouched.
    async fn insert_call(&self, record: NewCallRecord) -> Result<i64, CallError>;

    /// Set the recording duration and confirm the recording for `call_sid`.
    /// Returns the number of rows affected.
    async fn complete_recording(
        &self,
        call_sid: &str,
        duration: RecordingDuration,
        completed_at: DateTime<Utc>,
    ) -> Result<u64, CallError>;

    /// Returns whether a record exists for `call_sid`.
    async fn exists(&self, call_sid: &str) -> Result<bool, CallError>;

    /// Load the record for `call_sid`, if any.
    async fn find_by_call_sid(&self, call_sid: &str) -> Result<Option<CallRecord>, CallError>;
}
