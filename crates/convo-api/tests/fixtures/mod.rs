#![allow(dead_code)]

use serde_json::{json, Value};
use wiremock::matchers::*;
use wiremock::{Mock, MockServer, ResponseTemplate};

use convo_api::{ApiClient, ClientConfig};

/// Mock backend for exercising the HTTP clients
pub struct BackendMockServer {
    server: MockServer,
}

impl BackendMockServer {
    pub async fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(&ClientConfig::new(&self.uri())).expect("valid mock server URL")
    }

    pub fn inner(&self) -> &MockServer {
        &self.server
    }

    /// Reply to a chat message with the given body, matching on the request body
    pub async fn mock_chat_reply(&self, request: Value, reply: Value) {
        Mock::given(method("POST"))
            .and(path("/api/chatbot/message"))
            .and(header("content-type", "application/json"))
            .and(body_json(request))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Answer every chat message with `status`
    pub async fn mock_chat_status(&self, status: u16) {
        Mock::given(method("POST"))
            .and(path("/api/chatbot/message"))
            .respond_with(
                ResponseTemplate::new(status).set_body_json(json!({"detail": "Internal error"})),
            )
            .mount(&self.server)
            .await;
    }

    /// Answer every chat message with a body that is not JSON
    pub async fn mock_chat_garbage(&self) {
        Mock::given(method("POST"))
            .and(path("/api/chatbot/message"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_history(&self, id: &str, messages: Value) {
        Mock::given(method("GET"))
            .and(path(format!("/api/chatbot/message/{}", id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "messages": messages })))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_conversation_list(&self, limit: u32, body: Value) {
        Mock::given(method("GET"))
            .and(path("/api/conversations"))
            .and(query_param("limit", limit.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_model_status(&self, body: Value) {
        Mock::given(method("GET"))
            .and(path("/api/models/status"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }
}
