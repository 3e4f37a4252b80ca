//! Callscribe API — webhook boundary around the call correlation core.

pub mod config;
pub mod error;
pub mod normalize;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Builds the full application router.
pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::callbacks::router())
        .nest("/calls", routes::calls::router())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
