// handlers/public/message.rs - Anonymous message endpoints

use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::database::models::Message;
use crate::error::{ApiError, ApiResult};
use crate::middleware::{session_id_from_headers, SessionIdHeader};
use crate::state::AppState;
use crate::types::Role;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserMessageRequest {
    pub message: String,
    /// Falls back to the `SessionId` header when omitted
    pub session_id: Option<Uuid>,
    /// Admin token; when present and valid the message is sent as the admin
    pub token: Option<String>,
}

/// POST /api/user/message - Append a message to a session
///
/// Anonymous callers send as `user`, including when `token` is blank. A
/// non-blank embedded `token` is checked through the same path as the admin
/// routes: a valid admin token upgrades the sender to `admin`, anything else
/// is rejected with 401/403.
pub async fn user_message_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<UserMessageRequest>, JsonRejection>,
) -> ApiResult<Json<Message>> {
    let Json(request) = payload?;

    let session_id = match request.session_id {
        Some(id) => id,
        None => session_id_from_headers(&headers)?
            .ok_or_else(|| ApiError::bad_request("sessionId is required"))?,
    };

    let body = non_empty(request.message)?;

    // A blank token field counts as no token at all
    let token = request.token.as_deref().filter(|t| !t.trim().is_empty());
    let sender = match token {
        Some(token) => {
            state.tokens.authorize(Some(token), Role::Admin)?;
            Role::Admin
        }
        None => Role::User,
    };

    let message = state.messages().send(sender, body, session_id).await?;
    Ok(Json(message))
}

/// GET /api/messages - All messages of the session named in the `SessionId` header
///
/// Ordered by arrival. An unknown session simply has no messages.
pub async fn messages_get(
    State(state): State<AppState>,
    SessionIdHeader(session_id): SessionIdHeader,
) -> ApiResult<Json<Vec<Message>>> {
    let messages = state.messages().list(session_id).await?;
    Ok(Json(messages))
}

pub(crate) fn non_empty(body: String) -> Result<String, ApiError> {
    if body.trim().is_empty() {
        return Err(ApiError::bad_request("message must not be empty"));
    }
    Ok(body)
}
