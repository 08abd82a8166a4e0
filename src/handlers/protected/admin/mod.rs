// handlers/protected/admin/mod.rs - Admin identity and directory endpoints

pub mod list;
pub mod sessions;
pub mod verify;

pub use list::admin_list;
pub use sessions::admin_sessions;
pub use verify::{admin_verify, admin_welcome};
