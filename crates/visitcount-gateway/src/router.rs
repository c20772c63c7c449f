//! Axum router wiring.
//!
//! Exposes a single `/count` route; every other path goes to the fallback
//! (preflight or 404).

use axum::{routing::any, Router};

use crate::{app_state::AppState, http::count};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/count", any(count::count))
        .fallback(count::fallback)
        .with_state(state)
}
