//! `SQLite` implementation of the `CallRepository` trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::{debug, warn};

use callscribe_core::error::CallError;
use callscribe_core::record::{CallRecord, NewCallRecord, RecordingDuration, RecordingStatus};
use callscribe_core::repository::CallRepository;

const SELECT_CALL: &str = r"
SELECT id, call_sid, caller, recording_sid, recording_url, transcription_sid,
       transcription_text, recording_duration, recording_status, created_at, updated_at
FROM calls
WHERE call_sid = ?
";

/// SQLite-backed call repository.
#[derive(Debug, Clone)]
pub struct SqliteCallRepository {
    pool: SqlitePool,
}

impl SqliteCallRepository {
    /// Creates a new `SqliteCallRepository`.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Closes the underlying pool, waiting for checked-out connections.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn persistence_failure(err: &sqlx::Error) -> CallError {
    CallError::PersistenceFailure(err.to_string())
}

fn row_to_record(row: &SqliteRow) -> Result<CallRecord, CallError> {
    let get_err = |e: sqlx::Error| persistence_failure(&e);

    let status: String = row.try_get("recording_status").map_err(get_err)?;
    let duration: Option<i64> = row.try_get("recording_duration").map_err(get_err)?;
    let recording_duration = duration
        .map(RecordingDuration::new)
        .transpose()
        .map_err(|e| CallError::PersistenceFailure(format!("corrupt recording duration: {e}")))?;

    Ok(CallRecord {
        id: row.try_get("id").map_err(get_err)?,
        call_sid: row.try_get("call_sid").map_err(get_err)?,
        caller: row.try_get("caller").map_err(get_err)?,
        recording_sid: row.try_get("recording_sid").map_err(get_err)?,
        recording_url: row.try_get("recording_url").map_err(get_err)?,
        transcription_sid: row.try_get("transcription_sid").map_err(get_err)?,
        transcription_text: row.try_get("transcription_text").map_err(get_err)?,
        recording_duration,
        recording_status: status.parse()?,
        created_at: row.try_get("created_at").map_err(get_err)?,
        updated_at: row.try_get("updated_at").map_err(get_err)?,
    })
}

#[async_trait]
impl CallRepository for SqliteCallRepository {
    async fn insert_call(&self, record: NewCallRecord) -> Result<i64, CallError> {
        let result = sqlx::query(
            r"
            INSERT INTO calls (
                call_sid, caller, recording_sid, recording_url,
                transcription_sid, transcription_text, recording_status,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(&record.call_sid)
        .bind(&record.caller)
        .bind(&record.recording_sid)
        .bind(&record.recording_url)
        .bind(&record.transcription_sid)
        .bind(&record.transcription_text)
        .bind(RecordingStatus::Pending.as_str())
        .bind(record.received_at)
        .bind(record.received_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) => {
                let id = done.last_insert_rowid();
                debug!(call_sid = %record.call_sid, id, "inserted call record");
                Ok(id)
            }
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                warn!(call_sid = %record.call_sid, "call record already exists");
                Err(CallError::DuplicateEvent(record.call_sid))
            }
            Err(e) => Err(persistence_failure(&e)),
        }
    }

    async fn complete_recording(
        &self,
        call_sid: &str,
        duration: RecordingDuration,
        completed_at: DateTime<Utc>,
    ) -> Result<u64, CallError> {
        debug!(
            call_sid,
            duration_seconds = duration.seconds(),
            "confirming call recording"
        );

        let done = sqlx::query(
            r"
            UPDATE calls
            SET recording_duration = ?, recording_status = ?, updated_at = ?
            WHERE call_sid = ?
            ",
        )
        .bind(duration.seconds())
        .bind(RecordingStatus::Confirmed.as_str())
        .bind(completed_at)
        .bind(call_sid)
        .execute(&self.pool)
        .await
        .map_err(|e| persistence_failure(&e))?;

        let affected = done.rows_affected();
        debug!(call_sid, affected, "updated calls table with recording duration");
        Ok(affected)
    }

    async fn exists(&self, call_sid: &str) -> Result<bool, CallError> {
        let found: i64 = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM calls WHERE call_sid = ?)")
            .bind(call_sid)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| persistence_failure(&e))?;

        Ok(found != 0)
    }

    async fn find_by_call_sid(&self, call_sid: &str) -> Result<Option<CallRecord>, CallError> {
        let row = sqlx::query(SELECT_CALL)
            .bind(call_sid)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| persistence_failure(&e))?;

        row.as_ref().map(row_to_record).transpose()
    }
}
