use async_trait::async_trait;

use convo_types::{Message, SendReply, SendRequest, SessionHandle};

/// Transport-level failure talking to the conversation service
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The service answered with a non-success status
    #[error("server error: {status}")]
    Status { status: u16, body: String },

    /// The request never got a response
    #[error("request failed: {0}")]
    Transport(String),

    /// The response body was not what the contract promises
    #[error("malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Conversation endpoints the session depends on.
///
/// Futures are not required to be `Send`: the session runs on a single
/// event loop (the browser, or the main task of the CLI).
#[async_trait(?Send)]
pub trait ConversationApi {
    /// `POST /api/chatbot/message`
    async fn send_message(&self, request: &SendRequest) -> Result<SendReply, ApiError>;

    /// `GET /api/chatbot/message/{id}`, messages in server order
    async fn load_history(&self, handle: &SessionHandle) -> Result<Vec<Message>, ApiError>;
}

#[async_trait(?Send)]
impl<T: ConversationApi + ?Sized> ConversationApi for std::rc::Rc<T> {
    async fn send_message(&self, request: &SendRequest) -> Result<SendReply, ApiError> {
        (**self).send_message(request).await
    }

    async fn load_history(&self, handle: &SessionHandle) -> Result<Vec<Message>, ApiError> {
        (**self).load_history(handle).await
    }
}
