#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use serde_json::Value;
use sqlx::{postgres::PgPoolOptions, Executor, PgPool};
use tower::ServiceExt;
use uuid::Uuid;

use messaging_api::auth::{hash_password, Claims, TokenService};
use messaging_api::config::SecurityConfig;
use messaging_api::database::models::Admin;
use messaging_api::database::{DatabaseManager, MemoryStore, PgStore, Store};
use messaging_api::types::Role;
use messaging_api::AppState;

pub const SECRET: &str = "integration-test-secret";

/// Router wired to an in-memory store, driven without a socket.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub tokens: TokenService,
}

pub struct Response {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Value,
}

pub fn security_config() -> SecurityConfig {
    SecurityConfig {
        cors_origins: vec!["http://localhost:3000".to_string()],
        jwt_secret: SECRET.to_string(),
        jwt_expiry_minutes: 60,
    }
}

impl TestApp {
    pub fn new() -> Self {
        let security = security_config();
        let store = Arc::new(MemoryStore::new());
        let tokens = TokenService::new(&security).expect("token service");
        let router = messaging_api::app(AppState::new(store.clone(), tokens.clone()), &security);

        Self { router, store, tokens }
    }

    /// Stores an admin with a real argon2 hash so it can log in.
    pub async fn admin_with_password(&self, username: &str, password: &str) -> Result<Admin> {
        let hash = hash_password(password)?;
        Ok(self.store.create_admin(username, &hash).await?)
    }

    /// Stores an admin that will only ever authenticate through [`TestApp::token_for`].
    pub async fn admin(&self, username: &str) -> Result<Admin> {
        Ok(self.store.create_admin(username, "unused").await?)
    }

    pub fn token_for(&self, admin: &Admin) -> String {
        self.tokens.issue(admin).expect("issue token")
    }

    /// Correctly signed token asserting the `user` role.
    pub fn user_role_token(&self) -> String {
        let now = Utc::now();
        self.tokens
            .sign(&Claims {
                username: "visitor".to_string(),
                admin_id: 0,
                role: Role::User,
                iat: now.timestamp(),
                exp: (now + Duration::minutes(10)).timestamp(),
            })
            .expect("sign")
    }

    /// Correctly signed admin token whose expiry is an hour in the past.
    pub fn expired_token_for(&self, admin: &Admin) -> String {
        let now = Utc::now();
        self.tokens
            .sign(&Claims {
                username: admin.username.clone(),
                admin_id: admin.admin_id,
                role: Role::Admin,
                iat: (now - Duration::hours(2)).timestamp(),
                exp: (now - Duration::hours(1)).timestamp(),
            })
            .expect("sign")
    }

    pub async fn send(&self, request: Request<Body>) -> Result<Response> {
        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        Ok(Response { status, headers, body })
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<Response> {
        self.send(
            RequestBuilder::new(Method::POST, "/api/admin/login")
                .json(serde_json::json!({ "username": username, "password": password })),
        )
        .await
    }

    pub async fn start_session(&self) -> Result<Uuid> {
        let response = self.send(RequestBuilder::new(Method::POST, "/api/session").empty()).await?;
        anyhow::ensure!(response.status == StatusCode::OK, "session start failed: {}", response.status);
        let id = response.body["sessionId"].as_str().context("sessionId missing")?;
        Ok(Uuid::parse_str(id)?)
    }
}

/// Small builder so tests read as method, path, headers, body.
pub struct RequestBuilder {
    inner: axum::http::request::Builder,
}

impl RequestBuilder {
    pub fn new(method: Method, uri: &str) -> Self {
        Self {
            inner: Request::builder().method(method).uri(uri),
        }
    }

    pub fn bearer(mut self, token: &str) -> Self {
        self.inner = self.inner.header(header::AUTHORIZATION, format!("Bearer {}", token));
        self
    }

    pub fn session(mut self, session_id: Uuid) -> Self {
        self.inner = self.inner.header("SessionId", session_id.to_string());
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.inner = self.inner.header(name, value);
        self
    }

    pub fn json(self, body: Value) -> Request<Body> {
        self.inner
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    pub fn empty(self) -> Request<Body> {
        self.inner.body(Body::empty()).expect("request")
    }
}

/// Throwaway schema on the database named by `DATABASE_URL`, migrated and
/// wrapped in a [`PgStore`]. Every pooled connection has its `search_path`
/// pinned to the schema, so concurrent tests never see each other's rows.
pub struct TestDatabase {
    pub store: PgStore,
    schema: String,
    admin: PgPool,
}

impl TestDatabase {
    /// `Ok(None)` when `DATABASE_URL` is unset, so Postgres-only checks skip.
    pub async fn create() -> Result<Option<Self>> {
        let Ok(url) = std::env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL not set; skipping Postgres store checks");
            return Ok(None);
        };

        let admin = PgPool::connect(&url).await.context("connect to DATABASE_URL")?;
        let schema = format!("store_test_{}", Uuid::new_v4().simple());
        admin.execute(format!("CREATE SCHEMA {schema}").as_str()).await?;

        let set_path = format!("SET search_path TO {schema}");
        let pool = PgPoolOptions::new()
            .max_connections(2)
            .after_connect(move |conn, _meta| {
                let sql = set_path.clone();
                Box::pin(async move {
                    conn.execute(sql.as_str()).await?;
                    Ok(())
                })
            })
            .connect(&url)
            .await?;
        DatabaseManager::migrate(&pool).await?;

        Ok(Some(Self {
            store: PgStore::new(pool),
            schema,
            admin,
        }))
    }

    pub async fn drop_schema(self) -> Result<()> {
        self.store.pool().close().await;
        self.admin
            .execute(format!("DROP SCHEMA {} CASCADE", self.schema).as_str())
            .await?;
        self.admin.close().await;
        Ok(())
    }
}
