use anyhow::Context;
use clap::Args;
use std::sync::Arc;
use tracing::{info, warn};

use crate::auth::TokenService;
use crate::cli::utils::parse_credentials;
use crate::config;
use crate::database::{DatabaseError, DatabaseManager, MemoryStore, PgStore, Store};
use crate::state::AppState;

#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    #[arg(long, help = "Keep all data in process memory instead of PostgreSQL")]
    pub memory: bool,

    #[arg(long = "admin", value_name = "USERNAME:PASSWORD", help = "Ensure this admin exists at startup (repeatable)")]
    pub admins: Vec<String>,
}

pub async fn handle(args: ServeArgs) -> anyhow::Result<()> {
    let config = config::config();
    info!("Starting messaging API in {:?} mode", config.environment);

    let tokens = TokenService::new(&config.security)
        .context("invalid SECURITY_JWT_SECRET or SECURITY_JWT_EXPIRY_MINUTES")?;

    let store: Arc<dyn Store> = if args.memory {
        warn!("Using in-memory store; all data is lost on exit");
        Arc::new(MemoryStore::new())
    } else {
        let pool = DatabaseManager::connect(&config.database)
            .await
            .context("failed to connect to the database")?;
        DatabaseManager::migrate(&pool).await?;
        Arc::new(PgStore::new(pool))
    };

    for raw in &args.admins {
        let (username, password) = parse_credentials(raw)?;
        match super::admin::create_admin(store.as_ref(), username, password).await {
            Ok(admin) => info!(admin_id = admin.admin_id, %username, "Seeded admin"),
            Err(e) if matches!(e.downcast_ref::<DatabaseError>(), Some(DatabaseError::Conflict(_))) => {
                info!(%username, "Admin already present");
            }
            Err(e) => return Err(e),
        }
    }

    let app = crate::app(AppState::new(store, tokens), &config.security);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!("Messaging API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
