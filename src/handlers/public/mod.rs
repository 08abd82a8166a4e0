// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Token acquisition, session start, and the anonymous side of a conversation.

pub mod auth;
pub mod message;
pub mod session;
pub mod status;

pub use auth::admin_login;
pub use message::{messages_get, user_message_post};
pub use session::session_start;
pub use status::{health, root};
