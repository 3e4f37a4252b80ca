//! Routes for telephony provider callbacks.
//!
//! The provider posts form-encoded callbacks. A duplicate transcription is
//! acknowledged with 200, the same as a first delivery.

use axum::extract::State;
use axum::{Form, Json, Router, routing::post};
use serde::Serialize;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use callscribe_calls::application::command_handlers::{self, EventOutcome};
use callscribe_core::error::CallError;
use callscribe_core::event::CallEvent;

use crate::error::ApiError;
use crate::normalize::{self, CallbackFields};
use crate::state::AppState;

/// Response body returned when a callback is accepted.
#[derive(Debug, Serialize)]
pub struct CallbackResponse {
    /// `created`, `duplicate`, or `confirmed`.
    pub status: &'static str,
    /// Surrogate id of the record created by this callback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_id: Option<i64>,
}

async fn apply_callback(
    state: &AppState,
    event: Result<CallEvent, CallError>,
) -> Result<Json<CallbackResponse>, ApiError> {
    let correlation_id = Uuid::new_v4();
    let event = event.map_err(|err| {
        warn!(%correlation_id, error = %err, "rejecting malformed callback");
        ApiError::Callback(err)
    })?;

    info!(
        %correlation_id,
        call_sid = event.call_sid(),
        event_type = event.event_type(),
        "handling provider callback"
    );

    let outcome = command_handlers::handle_event(
        &event,
        state.clock.as_ref(),
        state.call_repository.as_ref(),
    )
    .await;

    match outcome {
        Ok(EventOutcome::Recorded { call_id }) => Ok(Json(CallbackResponse {
            status: "created",
            call_id: Some(call_id),
        })),
        Ok(EventOutcome::Confirmed) => Ok(Json(CallbackResponse {
            status: "confirmed",
            call_id: None,
        })),
        Err(CallError::DuplicateEvent(call_sid)) => {
            info!(%correlation_id, %call_sid, "accepting duplicate transcription callback");
            Ok(Json(CallbackResponse {
                status: "duplicate",
                call_id: None,
            }))
        }
        Err(err) => {
            warn!(%correlation_id, error = %err, "callback rejected");
            Err(ApiError::Callback(err))
        }
    }
}

/// POST /transcribed
#[instrument(skip_all)]
async fn transcribed(
    State(state): State<AppState>,
    Form(fields): Form<CallbackFields>,
) -> Result<Json<CallbackResponse>, ApiError> {
    apply_callback(&state, normalize::transcription_event(&fields)).await
}

/// POST /recorded
#[instrument(skip_all)]
async fn recorded(
    State(state): State<AppState>,
    Form(fields): Form<CallbackFields>,
) -> Result<Json<CallbackResponse>, ApiError> {
    apply_callback(&state, normalize::completion_event(&fields)).await
}

/// Returns the router for provider callbacks.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/transcribed", post(transcribed))
        .route("/recorded", post(recorded))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use callscribe_core::clock::Clock;
    use callscribe_core::repository::CallRepository;
    use callscribe_test_support::{
        FailingCallRepository, FixedClock, InMemoryCallRepository, VanishingCallRepository,
    };
    use chrono::{TimeZone, Utc};
    use serde_json::Value;
    use tower::ServiceExt;

    const TRANSCRIPTION_FORM: &str = "CallSid=CA1&From=%2B15551234567&RecordingSid=RE1\
        &RecordingUrl=https%3A%2F%2Fapi.example.com%2FRecordings%2FRE1\
        &TranscriptionSid=TR1&TranscriptionText=Call+me+back";

    fn app_state_with(call_repository: Arc<dyn CallRepository>) -> AppState {
        let clock: Arc<dyn Clock> = Arc::new(FixedClock(
            Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap(),
        ));
        AppState::new(clock, call_repository)
    }

    async fn post_form(state: AppState, uri: &str, body: &'static str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap();

        let response = router().with_state(state).oneshot(request).await.unwrap();
        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body_bytes).unwrap())
    }

    #[tokio::test]
    async fn test_transcribed_returns_200_with_call_id() {
        // Arrange
        let repo = Arc::new(InMemoryCallRepository::new());

        // Act
        let (status, json) =
            post_form(app_state_with(repo.clone()), "/transcribed", TRANSCRIPTION_FORM).await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "created");
        assert_eq!(json["call_id"], 1);

        let records = repo.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].caller, "+15551234567");
        assert_eq!(records[0].transcription_text.as_deref(), Some("Call me back"));
    }

    #[tokio::test]
    async fn test_duplicate_transcribed_returns_200() {
        // Arrange
        let repo = Arc::new(InMemoryCallRepository::new());
        post_form(app_state_with(repo.clone()), "/transcribed", TRANSCRIPTION_FORM).await;

        // Act
        let (status, json) =
            post_form(app_state_with(repo.clone()), "/transcribed", TRANSCRIPTION_FORM).await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "duplicate");
        assert_eq!(repo.records().len(), 1);
    }

    #[tokio::test]
    async fn test_transcribed_returns_400_for_missing_field() {
        let repo = Arc::new(InMemoryCallRepository::new());

        let (status, json) = post_form(
            app_state_with(repo.clone()),
            "/transcribed",
            "CallSid=CA1&From=%2B1555",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "invalid_input");
        assert!(repo.records().is_empty());
    }

    #[tokio::test]
    async fn test_recorded_returns_400_for_unknown_call() {
        let (status, json) = post_form(
            app_state_with(Arc::new(InMemoryCallRepository::new())),
            "/recorded",
            "CallSid=unknown-sid&RecordingDuration=42",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "not_found");
        assert!(json["message"].as_str().unwrap().contains("unknown-sid"));
    }

    #[tokio::test]
    async fn test_recorded_confirms_existing_call() {
        // Arrange
        let repo = Arc::new(InMemoryCallRepository::new());
        post_form(app_state_with(repo.clone()), "/transcribed", TRANSCRIPTION_FORM).await;

        // Act
        let (status, json) = post_form(
            app_state_with(repo.clone()),
            "/recorded",
            "CallSid=CA1&RecordingDuration=137",
        )
        .await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "confirmed");
        let record = &repo.records()[0];
        assert_eq!(record.recording_duration.map(|d| d.seconds()), Some(137));
    }

    #[tokio::test]
    async fn test_recorded_returns_400_for_negative_duration() {
        let repo = Arc::new(InMemoryCallRepository::new());
        post_form(app_state_with(repo.clone()), "/transcribed", TRANSCRIPTION_FORM).await;

        let (status, json) = post_form(
            app_state_with(repo.clone()),
            "/recorded",
            "CallSid=CA1&RecordingDuration=-5",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "invalid_input");
        assert_eq!(repo.records()[0].recording_duration, None);
    }

    #[tokio::test]
    async fn test_recorded_returns_400_when_update_has_no_effect() {
        let (status, json) = post_form(
            app_state_with(Arc::new(VanishingCallRepository)),
            "/recorded",
            "CallSid=CA1&RecordingDuration=10",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "no_effect");
    }

    #[tokio::test]
    async fn test_transcribed_returns_500_when_repository_fails() {
        let (status, json) = post_form(
            app_state_with(Arc::new(FailingCallRepository)),
            "/transcribed",
            TRANSCRIPTION_FORM,
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "persistence_failure");
    }

    #[tokio::test]
    async fn test_recorded_returns_500_when_existence_check_fails() {
        let (status, json) = post_form(
            app_state_with(Arc::new(FailingCallRepository)),
            "/recorded",
            "CallSid=CA1&RecordingDuration=10",
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "persistence_failure");
    }
}
