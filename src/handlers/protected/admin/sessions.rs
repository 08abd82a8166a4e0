// handlers/protected/admin/sessions.rs - GET /api/admin/sessions

use axum::{extract::State, Extension, Json};
use uuid::Uuid;

use crate::error::ApiResult;
use crate::middleware::AuthAdmin;
use crate::state::AppState;

/// GET /api/admin/sessions - Ids of the sessions currently owned by the caller
pub async fn admin_sessions(
    State(state): State<AppState>,
    Extension(admin): Extension<AuthAdmin>,
) -> ApiResult<Json<Vec<Uuid>>> {
    let ids = state.sessions().owned_by(admin.admin_id).await?;
    Ok(Json(ids))
}
