// handlers/public/auth/login.rs - POST /api/admin/login handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::auth::{verify_password, PasswordError};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// POST /api/admin/login - Exchange admin credentials for a bearer token
///
/// Expected Input:
/// ```json
/// { "username": "string", "password": "string" }
/// ```
///
/// Expected Output (Success):
/// ```json
/// { "token": "eyJhbGciOiJIUzI1NiI..." }
/// ```
///
/// Unknown usernames and wrong passwords both answer 401 with the same message.
/// So does an account whose stored password is not an argon2 PHC string.
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let Json(LoginRequest { username, password }) = payload?;

    let rejected = || {
        tracing::warn!(%username, "Rejected admin login");
        ApiError::unauthorized("Invalid username or password")
    };

    let admin = state
        .store
        .find_admin_by_username(&username)
        .await?
        .ok_or_else(rejected)?;

    match verify_password(&password, &admin.password) {
        Ok(true) => {}
        Ok(false) => return Err(rejected()),
        Err(PasswordError::MalformedHash(reason)) => {
            tracing::error!(%username, %reason, "Stored password is not an argon2 hash");
            return Err(rejected());
        }
        Err(err) => return Err(err.into()),
    }

    let token = state.tokens.issue(&admin)?;
    tracing::info!(%username, admin_id = admin.admin_id, "Admin logged in");

    Ok(Json(LoginResponse { token }))
}
