pub mod auth;
pub mod cors;
pub mod security_headers;
pub mod session_id;

pub use auth::{bearer_token, require_admin, AuthAdmin};
pub use cors::build_cors_layer;
pub use security_headers::security_headers_middleware;
pub use session_id::{session_id_from_headers, SessionIdHeader, SESSION_ID_HEADER};
