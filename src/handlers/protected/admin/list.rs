// handlers/protected/admin/list.rs - GET /api/admin/list

use axum::{extract::State, Json};

use crate::database::models::AdminSummary;
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/admin/list - Every admin as `{ adminId, username }`
pub async fn admin_list(State(state): State<AppState>) -> ApiResult<Json<Vec<AdminSummary>>> {
    let admins = state.store.list_admins().await?;
    Ok(Json(admins))
}
