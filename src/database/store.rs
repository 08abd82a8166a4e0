use async_trait::async_trait;
use uuid::Uuid;

use super::manager::DatabaseError;
use super::models::{Admin, AdminSummary, Message, NewMessage, Session};

/// Persistence operations backing the credential store, session registry,
/// and message relay.
///
/// The persisted store is the only source of truth for session ownership;
/// nothing above this layer caches it.
#[async_trait]
pub trait Store: Send + Sync {
    async fn health_check(&self) -> Result<(), DatabaseError>;

    // Admins

    async fn create_admin(&self, username: &str, password_hash: &str) -> Result<Admin, DatabaseError>;

    async fn find_admin_by_username(&self, username: &str) -> Result<Option<Admin>, DatabaseError>;

    async fn admin_exists(&self, admin_id: i32) -> Result<bool, DatabaseError>;

    /// All admins ordered by id.
    async fn list_admins(&self) -> Result<Vec<AdminSummary>, DatabaseError>;

    /// One admin chosen uniformly at random, or `None` when there are none.
    async fn random_admin_id(&self) -> Result<Option<i32>, DatabaseError>;

    // Sessions

    async fn create_session(&self, id: Uuid, admin_id: i32) -> Result<Session, DatabaseError>;

    async fn find_session(&self, id: Uuid) -> Result<Option<Session>, DatabaseError>;

    /// Ids of sessions owned by `admin_id`, oldest first.
    async fn sessions_for_admin(&self, admin_id: i32) -> Result<Vec<Uuid>, DatabaseError>;

    /// Changes the owner and bumps `updated_at`. Returns `None` if the session is unknown.
    async fn reassign_session(&self, id: Uuid, admin_id: i32) -> Result<Option<Session>, DatabaseError>;

    // Messages

    async fn append_message(&self, message: NewMessage) -> Result<Message, DatabaseError>;

    /// Messages of one session in arrival order.
    async fn list_messages(&self, session_id: Uuid) -> Result<Vec<Message>, DatabaseError>;
}
