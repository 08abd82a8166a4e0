use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::config::SecurityConfig;
use crate::handlers::{protected, public};
use crate::middleware::{build_cors_layer, require_admin, security_headers_middleware};
use crate::state::AppState;

/// Full HTTP surface with global middleware applied
pub fn app(state: AppState, security: &SecurityConfig) -> Router {
    Router::new()
        .route("/", get(public::root))
        .route("/health", get(public::health))
        .merge(public_routes())
        .merge(admin_routes(state.clone()))
        // Global middleware
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(build_cors_layer(security))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/api/admin/login", post(public::admin_login))
        .route("/api/session", post(public::session_start))
        .route("/api/user/message", post(public::user_message_post))
        .route("/api/messages", get(public::messages_get))
}

fn admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/admin", get(protected::admin_welcome))
        .route("/api/admin/verify", get(protected::admin_verify))
        .route("/api/admin/sessions", get(protected::admin_sessions))
        .route("/api/admin/list", get(protected::admin_list))
        .route("/api/admin/message", post(protected::admin_message_post))
        .route("/api/user/update", patch(protected::session_reassign))
        .route_layer(middleware::from_fn_with_state(state, require_admin))
}
