// handlers/protected/mod.rs - Protected handlers (admin token required)
//
// Every route in this tier sits behind `middleware::require_admin`, which
// injects `AuthAdmin` into the request extensions.

pub mod admin;
pub mod message;
pub mod session;

pub use admin::*;
pub use message::admin_message_post;
pub use session::session_reassign;
