use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Row of the `admins` table. `password` holds an argon2 PHC string.
#[derive(Debug, Clone, FromRow)]
pub struct Admin {
    pub admin_id: i32,
    pub username: String,
    pub password: String,
}

/// Public view of an admin, safe to return from the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AdminSummary {
    pub admin_id: i32,
    pub username: String,
}

impl From<&Admin> for AdminSummary {
    fn from(admin: &Admin) -> Self {
        Self {
            admin_id: admin.admin_id,
            username: admin.username.clone(),
        }
    }
}
