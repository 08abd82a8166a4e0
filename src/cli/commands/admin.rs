use clap::Subcommand;
use serde_json::json;

use crate::auth::hash_password;
use crate::cli::{utils::output_success, OutputFormat};
use crate::config;
use crate::database::models::Admin;
use crate::database::{DatabaseManager, PgStore, Store};

#[derive(Subcommand)]
pub enum AdminCommands {
    #[command(about = "Create an admin with an argon2-hashed password")]
    Create {
        #[arg(help = "Login name")]
        username: String,
        #[arg(help = "Plaintext password (stored hashed)")]
        password: String,
    },

    #[command(about = "List admins")]
    List,
}

pub async fn handle(cmd: AdminCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let pool = DatabaseManager::connect(&config::config().database).await?;
    DatabaseManager::migrate(&pool).await?;
    let store = PgStore::new(pool);

    let result = match cmd {
        AdminCommands::Create { username, password } => {
            let admin = create_admin(&store, &username, &password).await?;
            output_success(
                output_format,
                &format!("Created admin '{}' (id {})", admin.username, admin.admin_id),
                Some(json!({ "adminId": admin.admin_id, "username": admin.username })),
            )
        }
        AdminCommands::List => {
            let admins = store.list_admins().await?;
            match output_format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&admins)?),
                OutputFormat::Text => {
                    for admin in &admins {
                        println!("{}\t{}", admin.admin_id, admin.username);
                    }
                }
            }
            Ok(())
        }
    };

    store.pool().close().await;
    result
}

/// Hashes the password and stores the admin.
pub async fn create_admin(store: &dyn Store, username: &str, password: &str) -> anyhow::Result<Admin> {
    let hash = hash_password(password)?;
    Ok(store.create_admin(username, &hash).await?)
}
