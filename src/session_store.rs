// src/session_store.rs

use crate::api::ApiClient;
use crate::errors::AgriChatResult;
use crate::models::Session;
use log::warn;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Client-side cache of the sessions known to the backend.
///
/// The cache is always a snapshot of backend truth: refreshes replace it
/// wholesale, never merge. A stale refresh landing after a newer one is
/// harmless under that policy; last write wins.
pub struct SessionStore {
    api: ApiClient,
    sessions: RwLock<Vec<Session>>,
}

impl SessionStore {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            sessions: RwLock::new(Vec::new()),
        }
    }

    /// Current snapshot of the session list.
    pub async fn sessions(&self) -> Vec<Session> {
        self.sessions.read().await.clone()
    }

    /// Fetches the authoritative session list and replaces the cache. On
    /// failure the previous cache is left unchanged.
    pub async fn refresh(&self) -> AgriChatResult<()> {
        let fresh = self.api.list_sessions().await?;
        *self.sessions.write().await = fresh;
        Ok(())
    }

    /// Spawns a refresh and does not join it. Listing is non-critical, so a
    /// failure is logged and the last known-good list stays on screen.
    pub fn refresh_in_background(self: &Arc<Self>) {
        let store = Arc::clone(self);
        tokio::spawn(async move {
            if let Err(err) = store.refresh().await {
                warn!("session list refresh failed: {}", err);
            }
        });
    }

    /// Asks the backend to mint a new session. Creation is on the critical
    /// path for sending, so failures propagate to the caller. A successful
    /// create triggers a background list refresh to pick up the new row.
    pub async fn create_session(self: &Arc<Self>, title: &str) -> AgriChatResult<Session> {
        let session = self.api.create_session(title).await?;
        self.refresh_in_background();
        Ok(session)
    }

    /// Deletes a session on the backend, then drops it from the cache without
    /// a re-fetch. On failure the cache is untouched and the error surfaces
    /// to the caller. The caller is responsible for telling the conversation
    /// controller when the deleted session was the active one.
    pub async fn delete_session(&self, id: &str) -> AgriChatResult<()> {
        self.api.delete_session(id).await?;
        self.sessions.write().await.retain(|s| s.id != id);
        Ok(())
    }
}
