use async_trait::async_trait;
use chrono::Utc;
use rand::seq::SliceRandom;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::manager::DatabaseError;
use super::models::{Admin, AdminSummary, Message, NewMessage, Session};
use super::store::Store;

/// In-process store with the same semantics as [`super::PgStore`].
/// Used by `serve --memory` and by the test suite.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Tables>,
}

#[derive(Default)]
struct Tables {
    admins: Vec<Admin>,
    sessions: HashMap<Uuid, Session>,
    messages: Vec<Message>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }

    async fn create_admin(&self, username: &str, password_hash: &str) -> Result<Admin, DatabaseError> {
        let mut tables = self.inner.write().await;
        if tables.admins.iter().any(|a| a.username == username) {
            return Err(DatabaseError::Conflict(format!("admin '{}' already exists", username)));
        }

        let admin = Admin {
            admin_id: tables.admins.iter().map(|a| a.admin_id).max().unwrap_or(0) + 1,
            username: username.to_string(),
            password: password_hash.to_string(),
        };
        tables.admins.push(admin.clone());
        Ok(admin)
    }

    async fn find_admin_by_username(&self, username: &str) -> Result<Option<Admin>, DatabaseError> {
        let tables = self.inner.read().await;
        Ok(tables.admins.iter().find(|a| a.username == username).cloned())
    }

    async fn admin_exists(&self, admin_id: i32) -> Result<bool, DatabaseError> {
        let tables = self.inner.read().await;
        Ok(tables.admins.iter().any(|a| a.admin_id == admin_id))
    }

    async fn list_admins(&self) -> Result<Vec<AdminSummary>, DatabaseError> {
        let tables = self.inner.read().await;
        Ok(tables.admins.iter().map(AdminSummary::from).collect())
    }

    async fn random_admin_id(&self) -> Result<Option<i32>, DatabaseError> {
        let tables = self.inner.read().await;
        Ok(tables
            .admins
            .choose(&mut rand::thread_rng())
            .map(|a| a.admin_id))
    }

    async fn create_session(&self, id: Uuid, admin_id: i32) -> Result<Session, DatabaseError> {
        let mut tables = self.inner.write().await;
        if !tables.admins.iter().any(|a| a.admin_id == admin_id) {
            return Err(DatabaseError::NotFound(format!("admin {}", admin_id)));
        }
        if tables.sessions.contains_key(&id) {
            return Err(DatabaseError::Conflict(format!("session {} already exists", id)));
        }

        let now = Utc::now();
        let session = Session {
            id,
            admin_id,
            created_at: now,
            updated_at: now,
        };
        tables.sessions.insert(id, session.clone());
        Ok(session)
    }

    async fn find_session(&self, id: Uuid) -> Result<Option<Session>, DatabaseError> {
        let tables = self.inner.read().await;
        Ok(tables.sessions.get(&id).cloned())
    }

    async fn sessions_for_admin(&self, admin_id: i32) -> Result<Vec<Uuid>, DatabaseError> {
        let tables = self.inner.read().await;
        let mut owned: Vec<&Session> = tables
            .sessions
            .values()
            .filter(|s| s.admin_id == admin_id)
            .collect();
        owned.sort_by_key(|s| (s.created_at, s.id));
        Ok(owned.into_iter().map(|s| s.id).collect())
    }

    async fn reassign_session(&self, id: Uuid, admin_id: i32) -> Result<Option<Session>, DatabaseError> {
        let mut tables = self.inner.write().await;
        Ok(tables.sessions.get_mut(&id).map(|session| {
            session.admin_id = admin_id;
            session.updated_at = Utc::now();
            session.clone()
        }))
    }

    async fn append_message(&self, message: NewMessage) -> Result<Message, DatabaseError> {
        let mut tables = self.inner.write().await;
        if !tables.sessions.contains_key(&message.session_id) {
            return Err(DatabaseError::NotFound(format!("session {}", message.session_id)));
        }

        let stored = Message {
            id: tables.messages.len() as i64 + 1,
            sender: message.sender,
            message: message.message,
            session_id: message.session_id,
            created_at: Utc::now(),
        };
        tables.messages.push(stored.clone());
        Ok(stored)
    }

    async fn list_messages(&self, session_id: Uuid) -> Result<Vec<Message>, DatabaseError> {
        let tables = self.inner.read().await;
        Ok(tables
            .messages
            .iter()
            .filter(|m| m.session_id == session_id)
            .cloned()
            .collect())
    }
}
