//! Session store.
//!
//! Every `initialize` call records a session keyed by a fresh UUID. Nothing
//! else consults the store: sessions carry no authority over later calls.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

/// A client session created by `initialize`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    /// Opaque client metadata, as supplied by the caller.
    pub client_info: Value,
    pub created: DateTime<Utc>,
}

/// Flat map from session id to session. Entries are never mutated or removed.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new session and return it.
    pub async fn create(&self, client_info: Value) -> Session {
        let session = Session {
            id: Uuid::new_v4().to_string(),
            client_info,
            created: Utc::now(),
        };

        self.sessions
            .write()
            .await
            .insert(session.id.clone(), session.clone());

        info!("Session created: {}", session.id);
        session
    }

    pub async fn get(&self, id: &str) -> Option<Session> {
        self.sessions.read().await.get(id).cloned()
    }

    pub async fn contains(&self, id: &str) -> bool {
        self.sessions.read().await.contains_key(id)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
