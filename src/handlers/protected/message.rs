// handlers/protected/message.rs - POST /api/admin/message

use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde::Deserialize;

use crate::database::models::Message;
use crate::error::ApiResult;
use crate::handlers::public::message::non_empty;
use crate::middleware::{AuthAdmin, SessionIdHeader};
use crate::state::AppState;
use crate::types::Role;

#[derive(Debug, Deserialize)]
pub struct AdminMessageRequest {
    pub message: String,
}

/// POST /api/admin/message - Reply as admin in the session named by the `SessionId` header
pub async fn admin_message_post(
    State(state): State<AppState>,
    Extension(admin): Extension<AuthAdmin>,
    SessionIdHeader(session_id): SessionIdHeader,
    payload: Result<Json<AdminMessageRequest>, JsonRejection>,
) -> ApiResult<Json<Message>> {
    let Json(request) = payload?;
    let body = non_empty(request.message)?;

    let message = state.messages().send(Role::Admin, body, session_id).await?;
    tracing::debug!(admin = %admin.username, %session_id, "Admin replied");

    Ok(Json(message))
}
