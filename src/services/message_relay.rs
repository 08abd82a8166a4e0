use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::database::models::{Message, NewMessage};
use crate::database::{DatabaseError, Store};
use crate::types::Role;

/// Appends messages to sessions and reads them back in arrival order.
pub struct MessageRelay {
    store: Arc<dyn Store>,
}

impl MessageRelay {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn send(
        &self,
        sender: Role,
        body: impl Into<String>,
        session_id: Uuid,
    ) -> Result<Message, DatabaseError> {
        if self.store.find_session(session_id).await?.is_none() {
            return Err(DatabaseError::NotFound(format!("session {}", session_id)));
        }

        let message = self
            .store
            .append_message(NewMessage {
                sender,
                message: body.into(),
                session_id,
            })
            .await?;

        debug!(%session_id, %sender, message_id = message.id, "Message recorded");
        Ok(message)
    }

    pub async fn list(&self, session_id: Uuid) -> Result<Vec<Message>, DatabaseError> {
        self.store.list_messages(session_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryStore;

    #[tokio::test]
    async fn messages_come_back_in_insertion_order() {
        let store = Arc::new(MemoryStore::new());
        let admin = store.create_admin("alice", "hash").await.unwrap();
        let session = Uuid::new_v4();
        let other = Uuid::new_v4();
        store.create_session(session, admin.admin_id).await.unwrap();
        store.create_session(other, admin.admin_id).await.unwrap();

        let relay = MessageRelay::new(store);
        relay.send(Role::User, "hi", session).await.unwrap();
        relay.send(Role::User, "elsewhere", other).await.unwrap();
        relay.send(Role::Admin, "hello, how can I help?", session).await.unwrap();
        relay.send(Role::User, "thanks", session).await.unwrap();

        let listed = relay.list(session).await.unwrap();
        let bodies: Vec<_> = listed.iter().map(|m| (m.sender, m.message.as_str())).collect();
        assert_eq!(
            bodies,
            vec![
                (Role::User, "hi"),
                (Role::Admin, "hello, how can I help?"),
                (Role::User, "thanks"),
            ]
        );
    }

    #[tokio::test]
    async fn unknown_session_cannot_receive_but_lists_empty() {
        let relay = MessageRelay::new(Arc::new(MemoryStore::new()));
        let session = Uuid::new_v4();

        assert!(matches!(
            relay.send(Role::User, "hi", session).await,
            Err(DatabaseError::NotFound(_))
        ));
        assert!(relay.list(session).await.unwrap().is_empty());
    }
}
