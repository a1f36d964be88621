use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use wasm_bindgen::JsValue;
use web_sys::FormData;

use convo_session::{ApiError, ConversationApi};
use convo_types::{
    endpoints, ConversationSummary, HistoryResponse, Message, ModelActionResponse, ModelKind,
    ModelStatus, SendReply, SendRequest, SessionHandle,
};

use crate::utils::{encode_segment, error_message};

/// `ConversationApi` over `fetch`, against the page's own origin
#[derive(Debug, Clone, Default)]
pub struct GlooConversationApi;

impl GlooConversationApi {
    pub fn new() -> Self {
        Self
    }
}

async fn read_body(response: Response) -> Result<String, ApiError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    if !response.ok() {
        return Err(ApiError::Status { status, body });
    }
    Ok(body)
}

#[async_trait(?Send)]
impl ConversationApi for GlooConversationApi {
    async fn send_message(&self, request: &SendRequest) -> Result<SendReply, ApiError> {
        log::debug!("POST {} (conversation: {:?})", endpoints::CHATBOT_MESSAGE, request.id_conversation);

        let response = Request::post(endpoints::CHATBOT_MESSAGE)
            .json(request)
            .map_err(|e| ApiError::Transport(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let body = read_body(response).await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn load_history(&self, handle: &SessionHandle) -> Result<Vec<Message>, ApiError> {
        let url = format!("{}/{}", endpoints::CHATBOT_MESSAGE, encode_segment(handle.as_str()));
        log::debug!("GET {}", url);

        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let body = read_body(response).await?;
        let history: HistoryResponse =
            serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(history.messages)
    }
}

// ============================================================================
// Conversation list and model dashboard requests
//
// Errors come back as a single display line: the server's `detail` when it
// sent one, otherwise `fallback`.
// ============================================================================

async fn expect_json<T: DeserializeOwned>(
    request: Result<Response, gloo_net::Error>,
    fallback: &str,
) -> Result<T, JsValue> {
    let response = request.map_err(|e| {
        log::error!("{}: {}", fallback, e);
        JsValue::from_str(fallback)
    })?;

    let ok = response.ok();
    let body = response
        .text()
        .await
        .map_err(|e| JsValue::from_str(&format!("{}: {}", fallback, e)))?;

    if !ok {
        log::error!("{} (status {})", fallback, response.status());
        return Err(JsValue::from_str(&error_message(&body, fallback)));
    }

    serde_json::from_str(&body).map_err(|e| {
        log::error!("{}: malformed response: {}", fallback, e);
        JsValue::from_str(fallback)
    })
}

pub async fn list_conversations(limit: u32) -> Result<Vec<ConversationSummary>, JsValue> {
    let url = format!("{}?limit={}", endpoints::CONVERSATIONS, limit);
    log::debug!("GET {}", url);
    let rows: Option<Vec<ConversationSummary>> =
        expect_json(Request::get(&url).send().await, "Failed to load conversations").await?;
    Ok(rows.unwrap_or_default())
}

pub async fn fetch_conversation(id: &SessionHandle) -> Result<serde_json::Value, JsValue> {
    let url = format!("{}/{}", endpoints::CONVERSATIONS, encode_segment(id.as_str()));
    log::debug!("GET {}", url);
    expect_json(
        Request::get(&url).send().await,
        "Failed to fetch the conversation history",
    )
    .await
}

pub async fn delete_conversation(id: &SessionHandle) -> Result<(), JsValue> {
    let url = format!("{}/{}", endpoints::CONVERSATIONS, encode_segment(id.as_str()));
    log::debug!("DELETE {}", url);
    let _: serde_json::Value = expect_json(
        Request::delete(&url).send().await,
        "Failed to delete the conversation",
    )
    .await?;
    Ok(())
}

pub async fn model_status() -> Result<ModelStatus, JsValue> {
    log::debug!("GET {}", endpoints::MODELS_STATUS);
    expect_json(
        Request::get(endpoints::MODELS_STATUS).send().await,
        "Failed to fetch model status",
    )
    .await
}

/// `form` must carry `tipo` and `file`
pub async fn upload_model(form: FormData) -> Result<ModelActionResponse, JsValue> {
    log::debug!("POST {}", endpoints::MODELS_UPLOAD);
    let request = Request::post(endpoints::MODELS_UPLOAD)
        .body(form)
        .map_err(|e| JsValue::from_str(&format!("Failed to build upload: {}", e)))?;
    expect_json(request.send().await, "Failed to upload the model").await
}

pub async fn load_model(kind: ModelKind) -> Result<ModelActionResponse, JsValue> {
    let url = endpoints::model_load_path(kind);
    log::debug!("POST {}", url);
    expect_json(Request::post(&url).send().await, "Failed to load the model").await
}
