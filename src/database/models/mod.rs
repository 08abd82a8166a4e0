pub mod admin;
pub mod message;
pub mod session;

pub use admin::{Admin, AdminSummary};
pub use message::{Message, NewMessage};
pub use session::Session;
