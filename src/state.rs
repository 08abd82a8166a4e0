use std::sync::Arc;

use crate::auth::TokenService;
use crate::database::Store;
use crate::services::{MessageRelay, SessionRegistry};

/// Shared handles passed to every handler through axum's `State`.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub tokens: TokenService,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, tokens: TokenService) -> Self {
        Self { store, tokens }
    }

    pub fn sessions(&self) -> SessionRegistry {
        SessionRegistry::new(self.store.clone())
    }

    pub fn messages(&self) -> MessageRelay {
        MessageRelay::new(self.store.clone())
    }
}
