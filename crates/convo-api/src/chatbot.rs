use async_trait::async_trait;

use convo_session::{ApiError, ConversationApi};
use convo_types::{endpoints, HistoryResponse, Message, SendReply, SendRequest, SessionHandle};

use crate::client::ApiClient;

/// `ConversationApi` over HTTP.
///
/// Any non-success status becomes [`ApiError::Status`] carrying the raw
/// body; the session decides what the user sees.
#[derive(Debug, Clone)]
pub struct HttpConversationApi {
    client: ApiClient,
}

impl HttpConversationApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    async fn get_text(&self, response: reqwest::Response) -> Result<String, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        response.text().await.map_err(transport)
    }
}

fn transport(error: reqwest::Error) -> ApiError {
    ApiError::Transport(error.to_string())
}

#[async_trait(?Send)]
impl ConversationApi for HttpConversationApi {
    async fn send_message(&self, request: &SendRequest) -> Result<SendReply, ApiError> {
        let url = self.client.endpoint(endpoints::CHATBOT_MESSAGE, None)?;
        log::debug!("POST {} (conversation: {:?})", url, request.id_conversation);

        let response = self
            .client
            .http()
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(transport)?;

        let body = self.get_text(response).await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn load_history(&self, handle: &SessionHandle) -> Result<Vec<Message>, ApiError> {
        let url = self
            .client
            .endpoint(endpoints::CHATBOT_MESSAGE, Some(handle.as_str()))?;
        log::debug!("GET {}", url);

        let response = self.client.http().get(url).send().await.map_err(transport)?;

        let body = self.get_text(response).await?;
        let history: HistoryResponse =
            serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(history.messages)
    }
}
