// src/api.rs

use crate::errors::{AgriChatError, AgriChatResult};
use crate::models::{Session, StoredMessage};
use reqwest::{Client, Response};
use serde_json::{json, Value};

/// HTTP client for the advisory backend. Thin typed wrapper over the five
/// endpoints; every call maps transport failures and non-success statuses to
/// `AgriChatError::Transport`.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches the full session list, newest first (backend ordering).
    pub async fn list_sessions(&self) -> AgriChatResult<Vec<Session>> {
        let response = self
            .http
            .get(format!("{}/sessions", self.base_url))
            .send()
            .await
            .map_err(|e| AgriChatError::transport(format!("session list request failed: {}", e)))?;
        let response = Self::check_status(response, "session list").await?;

        response
            .json::<Vec<Session>>()
            .await
            .map_err(|e| AgriChatError::transport(format!("failed to parse session list: {}", e)))
    }

    /// Asks the backend to mint a new session with the given title.
    pub async fn create_session(&self, title: &str) -> AgriChatResult<Session> {
        let response = self
            .http
            .post(format!("{}/sessions", self.base_url))
            .json(&json!({ "title": title }))
            .send()
            .await
            .map_err(|e| {
                AgriChatError::transport(format!("session create request failed: {}", e))
            })?;
        let response = Self::check_status(response, "session create").await?;

        response
            .json::<Session>()
            .await
            .map_err(|e| AgriChatError::transport(format!("failed to parse new session: {}", e)))
    }

    /// Fetches the persisted message history of one session, oldest first.
    pub async fn fetch_messages(&self, session_id: &str) -> AgriChatResult<Vec<StoredMessage>> {
        let response = self
            .http
            .get(format!("{}/sessions/{}/messages", self.base_url, session_id))
            .send()
            .await
            .map_err(|e| AgriChatError::transport(format!("history request failed: {}", e)))?;
        let response = Self::check_status(response, "history fetch").await?;

        response
            .json::<Vec<StoredMessage>>()
            .await
            .map_err(|e| AgriChatError::transport(format!("failed to parse history: {}", e)))
    }

    /// Deletes one session. Success responses carry no body.
    pub async fn delete_session(&self, session_id: &str) -> AgriChatResult<()> {
        let response = self
            .http
            .delete(format!("{}/sessions/{}", self.base_url, session_id))
            .send()
            .await
            .map_err(|e| AgriChatError::transport(format!("delete request failed: {}", e)))?;
        Self::check_status(response, "session delete").await?;
        Ok(())
    }

    /// Sends one user turn and returns the assistant's reply text.
    pub async fn predict(&self, query: &str, session_id: &str) -> AgriChatResult<String> {
        if query.trim().is_empty() {
            return Err(AgriChatError::validation("query must not be blank"));
        }

        let payload = json!({ "query": query, "session_id": session_id });
        let response = self
            .http
            .post(format!("{}/predict", self.base_url))
            .json(&payload)
            .send()
            .await
            .map_err(|e| AgriChatError::transport(format!("predict request failed: {}", e)))?;
        let response = Self::check_status(response, "predict").await?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| AgriChatError::transport(format!("failed to parse predict reply: {}", e)))?;

        body["ai_message"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| AgriChatError::transport("predict reply missing ai_message"))
    }

    // Error bodies are not assumed to carry any machine-readable shape; the
    // status line (plus raw body text when present) becomes the diagnostic.
    async fn check_status(response: Response, what: &str) -> AgriChatResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let detail = response.text().await.unwrap_or_default();
        if detail.is_empty() {
            Err(AgriChatError::transport(format!("{} returned {}", what, status)))
        } else {
            Err(AgriChatError::transport(format!(
                "{} returned {} - {}",
                what, status, detail
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn predict_returns_ai_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predict"))
            .and(body_json(json!({ "query": "prediksi padi", "session_id": "s-1" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result_text": "ANALISIS SPESIFIK",
                "ai_message": "Padi cocok ditanam bulan depan."
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api = ApiClient::new(server.uri());
        let reply = api.predict("prediksi padi", "s-1").await.unwrap();
        assert_eq!(reply, "Padi cocok ditanam bulan depan.");
    }

    #[tokio::test]
    async fn predict_maps_non_success_status_to_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predict"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let api = ApiClient::new(server.uri());
        let err = api.predict("prediksi padi", "s-1").await.unwrap_err();
        match err {
            AgriChatError::Transport(msg) => assert!(msg.contains("500"), "{}", msg),
            other => panic!("expected transport error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn blank_query_is_rejected_before_any_request() {
        // Unroutable base URL: a request would fail loudly as Transport.
        let api = ApiClient::new("http://127.0.0.1:1");
        let err = api.predict("   ", "s-1").await.unwrap_err();
        assert!(matches!(err, AgriChatError::Validation(_)));
    }

    #[tokio::test]
    async fn list_sessions_parses_backend_rows() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/sessions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": "s-2", "title": "Prediksi Jagung", "created_at": "2026-08-02 10:30:00.123456" },
                { "id": "s-1", "title": "New Chat", "created_at": "2026-08-01 09:00:00" }
            ])))
            .mount(&server)
            .await;

        let api = ApiClient::new(server.uri());
        let sessions = api.list_sessions().await.unwrap();
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].id, "s-2");
        assert_eq!(sessions[1].title, "New Chat");
    }

    #[tokio::test]
    async fn create_session_posts_title_and_parses_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/sessions"))
            .and(body_json(json!({ "title": "New Chat" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "s-9", "title": "New Chat", "created_at": "2026-08-03 08:00:00"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api = ApiClient::new(server.uri());
        let session = api.create_session("New Chat").await.unwrap();
        assert_eq!(session.id, "s-9");
    }

    #[tokio::test]
    async fn delete_session_surfaces_failure() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/sessions/s-1"))
            .respond_with(ResponseTemplate::new(404).set_body_string("no such session"))
            .mount(&server)
            .await;

        let api = ApiClient::new(server.uri());
        let err = api.delete_session("s-1").await.unwrap_err();
        match err {
            AgriChatError::Transport(msg) => {
                assert!(msg.contains("404"), "{}", msg);
                assert!(msg.contains("no such session"), "{}", msg);
            }
            other => panic!("expected transport error, got {:?}", other),
        }
    }
}
