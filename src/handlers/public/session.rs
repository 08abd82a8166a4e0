// handlers/public/session.rs - POST /api/session handler

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::error::ApiResult;
use crate::state::AppState;

/// POST /api/session - Open a conversation owned by a randomly chosen admin
///
/// Returns `{ "sessionId": "<uuid>" }`, or 503 when no admin exists yet.
pub async fn session_start(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let session = state.sessions().start().await?;
    Ok(Json(json!({ "sessionId": session.id })))
}
