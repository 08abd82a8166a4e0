use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::auth::Claims;
use crate::error::ApiError;
use crate::state::AppState;
use crate::types::Role;

/// Authenticated admin context extracted from the bearer token
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthAdmin {
    pub admin_id: i32,
    pub username: String,
}

impl From<Claims> for AuthAdmin {
    fn from(claims: Claims) -> Self {
        Self {
            admin_id: claims.admin_id,
            username: claims.username,
        }
    }
}

/// Admits requests carrying a valid admin token and attaches [`AuthAdmin`].
///
/// Rejects with 401 when the token is absent, malformed, or expired and with
/// 403 when it asserts any role other than admin.
pub async fn require_admin(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = state
        .tokens
        .authorize(bearer_token(request.headers()), Role::Admin)?;

    tracing::debug!(admin = %claims.username, path = %request.uri().path(), "Admin request admitted");
    request.extensions_mut().insert(AuthAdmin::from(claims));

    Ok(next.run(request).await)
}

/// Token from an `Authorization: Bearer <token>` header, if one is present
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
