use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::manager::DatabaseError;
use super::models::{Admin, AdminSummary, Message, NewMessage, Session};
use super::store::Store;
use crate::types::Role;

/// PostgreSQL-backed store over the `admins`, `sessions`, and `user_messages` tables
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// SQLSTATE of a database-reported error, if any.
fn sqlstate(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db) => db.code().map(|code| code.into_owned()),
        _ => None,
    }
}

/// `user_messages` row as stored; `sender` is validated on the way out.
#[derive(FromRow)]
struct MessageRow {
    id: i64,
    sender: String,
    message: String,
    session: Uuid,
    created_at: DateTime<Utc>,
}

impl TryFrom<MessageRow> for Message {
    type Error = DatabaseError;

    fn try_from(row: MessageRow) -> Result<Self, Self::Error> {
        let sender = row
            .sender
            .parse::<Role>()
            .map_err(|e| DatabaseError::Decode(format!("user_messages.id={}: {}", row.id, e)))?;

        Ok(Message {
            id: row.id,
            sender,
            message: row.message,
            session_id: row.session,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl Store for PgStore {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn create_admin(&self, username: &str, password_hash: &str) -> Result<Admin, DatabaseError> {
        let admin = sqlx::query_as::<_, Admin>(
            r#"
            INSERT INTO admins (username, password)
            VALUES ($1, $2)
            ON CONFLICT (username) DO NOTHING
            RETURNING admin_id, username, password
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_optional(&self.pool)
        .await?;

        admin.ok_or_else(|| DatabaseError::Conflict(format!("admin '{}' already exists", username)))
    }

    async fn find_admin_by_username(&self, username: &str) -> Result<Option<Admin>, DatabaseError> {
        let admin = sqlx::query_as::<_, Admin>(
            "SELECT admin_id, username, password FROM admins WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(admin)
    }

    async fn admin_exists(&self, admin_id: i32) -> Result<bool, DatabaseError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM admins WHERE admin_id = $1)")
            .bind(admin_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn list_admins(&self) -> Result<Vec<AdminSummary>, DatabaseError> {
        let admins = sqlx::query_as::<_, AdminSummary>(
            "SELECT admin_id, username FROM admins ORDER BY admin_id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(admins)
    }

    async fn random_admin_id(&self) -> Result<Option<i32>, DatabaseError> {
        let admin_id = sqlx::query_scalar::<_, i32>("SELECT admin_id FROM admins ORDER BY RANDOM() LIMIT 1")
            .fetch_optional(&self.pool)
            .await?;
        Ok(admin_id)
    }

    async fn create_session(&self, id: Uuid, admin_id: i32) -> Result<Session, DatabaseError> {
        let session = sqlx::query_as::<_, Session>(
            r#"
            INSERT INTO sessions (id, admin_id)
            VALUES ($1, $2)
            RETURNING id, admin_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(admin_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match sqlstate(&e).as_deref() {
            Some(FOREIGN_KEY_VIOLATION) => DatabaseError::NotFound(format!("admin {}", admin_id)),
            Some(UNIQUE_VIOLATION) => DatabaseError::Conflict(format!("session {} already exists", id)),
            _ => e.into(),
        })?;
        Ok(session)
    }

    async fn find_session(&self, id: Uuid) -> Result<Option<Session>, DatabaseError> {
        let session = sqlx::query_as::<_, Session>(
            "SELECT id, admin_id, created_at, updated_at FROM sessions WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(session)
    }

    async fn sessions_for_admin(&self, admin_id: i32) -> Result<Vec<Uuid>, DatabaseError> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM sessions WHERE admin_id = $1 ORDER BY created_at, id",
        )
        .bind(admin_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(ids)
    }

    async fn reassign_session(&self, id: Uuid, admin_id: i32) -> Result<Option<Session>, DatabaseError> {
        let session = sqlx::query_as::<_, Session>(
            r#"
            UPDATE sessions
            SET admin_id = $2, updated_at = now()
            WHERE id = $1
            RETURNING id, admin_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(admin_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(session)
    }

    async fn append_message(&self, message: NewMessage) -> Result<Message, DatabaseError> {
        let row = sqlx::query_as::<_, MessageRow>(
            r#"
            INSERT INTO user_messages (sender, message, session)
            VALUES ($1, $2, $3)
            RETURNING id, sender, message, session, created_at
            "#,
        )
        .bind(message.sender.as_str())
        .bind(&message.message)
        .bind(message.session_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match sqlstate(&e).as_deref() {
            Some(FOREIGN_KEY_VIOLATION) => DatabaseError::NotFound(format!("session {}", message.session_id)),
            _ => e.into(),
        })?;
        row.try_into()
    }

    async fn list_messages(&self, session_id: Uuid) -> Result<Vec<Message>, DatabaseError> {
        sqlx::query_as::<_, MessageRow>(
            r#"
            SELECT id, sender, message, session, created_at
            FROM user_messages
            WHERE session = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(Message::try_from)
        .collect()
    }
}
