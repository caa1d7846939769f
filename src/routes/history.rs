//! Submission history endpoint: `GET /history`.

use axum::{extract::State, routing::get, Json, Router};
use tracing::debug;

use super::AppState;
use crate::HistoryEntry;

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new().route("/history", get(handler))
}

/// `GET /history`: every accepted submission as `[location, id]`, oldest first.
async fn handler(State((store, _)): State<AppState>) -> Json<Vec<HistoryEntry>> {
    // ---
    let history = store.history();
    debug!("GET /history - returning {} entries", history.len());
    Json(history)
}
