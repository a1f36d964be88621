use convo_types::{endpoints, ConversationSummary, DeleteResponse, SessionHandle};

use crate::client::ApiClient;
use crate::error::ClientError;

/// Client for the stored-conversation endpoints
#[derive(Debug, Clone)]
pub struct ConversationsClient {
    client: ApiClient,
}

impl ConversationsClient {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Most recent conversations, newest first as the server orders them
    pub async fn list(&self, limit: u32) -> Result<Vec<ConversationSummary>, ClientError> {
        let url = self.client.endpoint(endpoints::CONVERSATIONS, None)?;
        log::debug!("GET {} (limit {})", url, limit);

        let response = self
            .client
            .http()
            .get(url)
            .query(&[("limit", limit)])
            .send()
            .await?;
        let response = ApiClient::check(response, "Failed to load conversations").await?;

        // The server answers `null` when there is nothing stored
        let conversations: Option<Vec<ConversationSummary>> = ApiClient::read_json(response).await?;
        Ok(conversations.unwrap_or_default())
    }

    /// Full stored history of one conversation, in whatever shape the
    /// server keeps it
    pub async fn show(&self, id: &SessionHandle) -> Result<serde_json::Value, ClientError> {
        let url = self
            .client
            .endpoint(endpoints::CONVERSATIONS, Some(id.as_str()))?;
        log::debug!("GET {}", url);

        let response = self.client.http().get(url).send().await?;
        let response = ApiClient::check(response, "Failed to fetch the conversation history").await?;
        ApiClient::read_json(response).await
    }

    pub async fn delete(&self, id: &SessionHandle) -> Result<DeleteResponse, ClientError> {
        let url = self
            .client
            .endpoint(endpoints::CONVERSATIONS, Some(id.as_str()))?;
        log::debug!("DELETE {}", url);

        let response = self.client.http().delete(url).send().await?;
        let response = ApiClient::check(response, "Failed to delete the conversation").await?;
        let deleted: DeleteResponse = ApiClient::read_json(response).await?;
        log::info!("Deleted conversation {}", id);
        Ok(deleted)
    }
}
