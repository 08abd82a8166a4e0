// handlers/protected/admin/verify.rs - GET /api/admin/verify and GET /api/admin

use axum::{Extension, Json};
use serde_json::{json, Value};

use crate::middleware::AuthAdmin;

/// GET /api/admin/verify - Reaching this handler means the guard accepted the token
pub async fn admin_verify() -> Json<Value> {
    Json(json!({ "isValid": true }))
}

/// GET /api/admin - Greets the authenticated admin
pub async fn admin_welcome(Extension(admin): Extension<AuthAdmin>) -> Json<Value> {
    Json(json!({ "message": format!("Welcome {}", admin.username) }))
}
