//! Read routes for call records.

use axum::extract::{Path, State};
use axum::{Json, Router, routing::get};
use tracing::instrument;

use callscribe_calls::application::query_handlers::{self, CallView};

use crate::error::ApiError;
use crate::state::AppState;

/// GET /calls/{call_sid}
#[instrument(skip(state))]
async fn get_call(
    State(state): State<AppState>,
    Path(call_sid): Path<String>,
) -> Result<Json<CallView>, ApiError> {
    let view = query_handlers::get_call_by_sid(&call_sid, state.call_repository.as_ref())
        .await
        .map_err(ApiError::Query)?;

    Ok(Json(view))
}

/// Returns the router for call reads.
pub fn router() -> Router<AppState> {
    Router::new().route("/{call_sid}", get(get_call))
}
