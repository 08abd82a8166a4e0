// handlers/protected/session.rs - PATCH /api/user/update

use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::database::models::Session;
use crate::error::ApiResult;
use crate::middleware::AuthAdmin;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReassignRequest {
    pub session_id: Uuid,
    pub admin_id: i32,
}

/// PATCH /api/user/update - Hand a session to another admin
///
/// 404 when either the session or the target admin does not exist.
pub async fn session_reassign(
    State(state): State<AppState>,
    Extension(admin): Extension<AuthAdmin>,
    payload: Result<Json<ReassignRequest>, JsonRejection>,
) -> ApiResult<Json<Session>> {
    let Json(request) = payload?;

    let session = state
        .sessions()
        .reassign(request.session_id, request.admin_id)
        .await?;
    tracing::info!(by = %admin.username, session_id = %session.id, to = session.admin_id, "Reassignment requested");

    Ok(Json(session))
}
