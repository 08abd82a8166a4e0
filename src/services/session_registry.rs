use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::database::models::Session;
use crate::database::{DatabaseError, Store};

/// Assigns sessions to admins. Ownership is read from the store every time.
pub struct SessionRegistry {
    store: Arc<dyn Store>,
}

impl SessionRegistry {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Opens a session owned by an admin picked uniformly at random.
    pub async fn start(&self) -> Result<Session, DatabaseError> {
        let admin_id = self
            .store
            .random_admin_id()
            .await?
            .ok_or(DatabaseError::NoAdmins)?;

        let session = self.store.create_session(Uuid::new_v4(), admin_id).await?;
        info!(session_id = %session.id, admin_id, "Session started");
        Ok(session)
    }

    pub async fn find(&self, session_id: Uuid) -> Result<Session, DatabaseError> {
        self.store
            .find_session(session_id)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("session {}", session_id)))
    }

    pub async fn owned_by(&self, admin_id: i32) -> Result<Vec<Uuid>, DatabaseError> {
        self.store.sessions_for_admin(admin_id).await
    }

    /// Hands a session to another admin. Messages already in the session are untouched.
    pub async fn reassign(&self, session_id: Uuid, admin_id: i32) -> Result<Session, DatabaseError> {
        if !self.store.admin_exists(admin_id).await? {
            return Err(DatabaseError::NotFound(format!("admin {}", admin_id)));
        }

        let session = self
            .store
            .reassign_session(session_id, admin_id)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("session {}", session_id)))?;

        debug!(%session_id, admin_id, "Session reassigned");
        Ok(session)
    }
}
