pub mod message_relay;
pub mod session_registry;

pub use message_relay::MessageRelay;
pub use session_registry::SessionRegistry;
