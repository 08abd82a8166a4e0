// handlers/public/status.rs - GET / and GET /health

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::state::AppState;

pub async fn root() -> Json<Value> {
    Json(json!({
        "name": "Messaging API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "login": "POST /api/admin/login (public)",
            "session": "POST /api/session (public)",
            "user_message": "POST /api/user/message (public, optional admin token)",
            "messages": "GET /api/messages (public, SessionId header)",
            "admin": "/api/admin, /api/admin/verify, /api/admin/sessions, /api/admin/list (admin)",
            "admin_message": "POST /api/admin/message (admin, SessionId header)",
            "reassign": "PATCH /api/user/update (admin)"
        }
    }))
}

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable"
                })),
            )
        }
    }
}
