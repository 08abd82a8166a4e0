use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::Role;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: i64,
    pub sender: Role,
    pub message: String,
    pub session_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// A message about to be appended to a session.
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub sender: Role,
    pub message: String,
    pub session_id: Uuid,
}
