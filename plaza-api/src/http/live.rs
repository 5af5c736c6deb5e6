//! Live status endpoint
//!
//! A single idempotent read returning the current ordered sequence of live
//! streams. The aggregator degrades internally (failed providers drop out,
//! an unreachable store yields an empty set), so the endpoint itself never
//! fails; the UI layer polls it on the cache's cadence.

use axum::{extract::State, Json};

use crate::http::{AppResult, AppState};
use plaza_core::models::LiveStreamRecord;

/// GET /api/live
pub async fn get_live_streams(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<LiveStreamRecord>>> {
    let streams = state.live_service.get_live_streams().await;
    Ok(Json(streams))
}
