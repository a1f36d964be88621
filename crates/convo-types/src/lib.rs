//! Core types for the convo client
//!
//! This crate provides the wire format of the conversation API and the
//! value types shared by the session core, the native client and the
//! browser front end. Nothing in here performs I/O.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub mod endpoints;

// ============================================================================
// Constants
// ============================================================================

/// Key under which the browser keeps the active conversation id
pub const SESSION_STORAGE_KEY: &str = "id_conversation";

/// Default page size for the conversation list
pub const DEFAULT_CONVERSATION_LIMIT: u32 = 20;

// ============================================================================
// Session Handle
// ============================================================================

/// Opaque conversation identifier issued by the remote service.
///
/// The reference backend hands out integer ids while the client treats them
/// as strings, so both JSON forms are accepted and a string is always
/// written back.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionHandle(String);

impl SessionHandle {
    /// Wrap a raw id. Returns `None` for an empty or blank id.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for SessionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for SessionHandle {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for SessionHandle {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(s) => SessionHandle::new(s)
                .ok_or_else(|| serde::de::Error::custom("empty conversation id")),
            serde_json::Value::Number(n) => Ok(SessionHandle(n.to_string())),
            other => Err(serde::de::Error::custom(format!(
                "conversation id must be a string or a number, got {}",
                other
            ))),
        }
    }
}

/// Deserialize an optional handle where `null`, `""` and a missing field
/// all mean "no handle".
pub fn deserialize_optional_handle<'de, D>(deserializer: D) -> Result<Option<SessionHandle>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(SessionHandle::new(s)),
        Some(serde_json::Value::Number(n)) => Ok(Some(SessionHandle(n.to_string()))),
        Some(other) => Err(serde::de::Error::custom(format!(
            "conversation id must be a string or a number, got {}",
            other
        ))),
    }
}

// ============================================================================
// Messages
// ============================================================================

/// Who authored a message in the transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    #[serde(alias = "assistant")]
    Bot,
}

impl Sender {
    /// CSS class used when rendering a message of this sender
    pub fn css_class(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Bot => "bot",
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_class())
    }
}

/// A single sender-tagged line of the transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
        }
    }
}

// ============================================================================
// Chatbot API
// ============================================================================

/// Body of `POST /api/chatbot/message`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendRequest {
    pub message: String,
    /// Always present on the wire, `null` before the first reply
    #[serde(default, deserialize_with = "deserialize_optional_handle")]
    pub id_conversation: Option<SessionHandle>,
}

/// Response of `POST /api/chatbot/message`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendReply {
    pub reply: String,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_handle",
        skip_serializing_if = "Option::is_none"
    )]
    pub id_conversation: Option<SessionHandle>,
}

/// Response of `GET /api/chatbot/message/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub messages: Vec<Message>,
}

// ============================================================================
// Conversations API
// ============================================================================

/// One row of `GET /api/conversations`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationSummary {
    #[serde(default, deserialize_with = "deserialize_optional_handle")]
    pub id_conversation: Option<SessionHandle>,
    #[serde(default, deserialize_with = "deserialize_optional_handle")]
    pub id: Option<SessionHandle>,
    #[serde(default)]
    pub last_message: Option<String>,
}

impl ConversationSummary {
    /// Conversation id, preferring `id_conversation` over `id`
    pub fn handle(&self) -> Option<&SessionHandle> {
        self.id_conversation.as_ref().or(self.id.as_ref())
    }

    /// Last message, `N/A` when the server did not send one
    pub fn last_message_or_default(&self) -> &str {
        match self.last_message.as_deref() {
            Some(text) if !text.is_empty() => text,
            _ => "N/A",
        }
    }
}

/// Response of `DELETE /api/conversations/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub status: String,
    #[serde(default, deserialize_with = "deserialize_optional_handle")]
    pub id_conversation: Option<SessionHandle>,
}

// ============================================================================
// Models API
// ============================================================================

/// Model artifacts the backend knows how to store and load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    Autoencoder,
    Embeddings,
    Matriz,
    Cursos,
}

impl ModelKind {
    pub const ALL: [ModelKind; 4] = [
        ModelKind::Autoencoder,
        ModelKind::Embeddings,
        ModelKind::Matriz,
        ModelKind::Cursos,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::Autoencoder => "autoencoder",
            ModelKind::Embeddings => "embeddings",
            ModelKind::Matriz => "matriz",
            ModelKind::Cursos => "cursos",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown model type '{0}' (expected one of: autoencoder, embeddings, matriz, cursos)")]
pub struct ParseModelKindError(pub String);

impl FromStr for ModelKind {
    type Err = ParseModelKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ModelKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| ParseModelKindError(s.to_string()))
    }
}

/// Response of `GET /api/models/status`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelStatus {
    #[serde(default)]
    pub autoencoder: bool,
    #[serde(default)]
    pub embeddings: bool,
    #[serde(default)]
    pub matriz: bool,
    #[serde(default)]
    pub cursos: bool,
    #[serde(default)]
    pub cursos_info: bool,
}

impl ModelStatus {
    /// Display label and loaded flag for each artifact, in dashboard order
    pub fn entries(&self) -> [(&'static str, bool); 5] {
        [
            ("Autoencoder", self.autoencoder),
            ("Embeddings", self.embeddings),
            ("Matrix", self.matriz),
            ("Courses", self.cursos),
            ("Courses info", self.cursos_info),
        ]
    }

    pub fn all_loaded(&self) -> bool {
        self.entries().iter().all(|(_, loaded)| *loaded)
    }
}

/// Shown when the server confirms an upload without a message
pub const DEFAULT_UPLOAD_MESSAGE: &str = "Model uploaded successfully.";

/// Shown when the server confirms a load without a message
pub const DEFAULT_LOAD_MESSAGE: &str = "Model loaded successfully.";

/// Response of the upload and load endpoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelActionResponse {
    #[serde(default)]
    pub message: Option<String>,
}

impl ModelActionResponse {
    pub fn message_or(self, default: &str) -> String {
        self.message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| default.to_string())
    }
}

/// Error body returned by the backend on failed requests
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorDetail {
    /// Extract `detail` from an error body, if it is there
    pub fn from_body(body: &str) -> Option<String> {
        let parsed: ErrorDetail = serde_json::from_str(body).ok()?;
        match parsed.detail? {
            serde_json::Value::String(s) => Some(s),
            other => Some(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_handle_accepts_string_and_number() {
        let from_str: SessionHandle = serde_json::from_value(json!("abc")).unwrap();
        let from_num: SessionHandle = serde_json::from_value(json!(42)).unwrap();
        assert_eq!(from_str.as_str(), "abc");
        assert_eq!(from_num.as_str(), "42");
        assert_eq!(serde_json::to_value(&from_num).unwrap(), json!("42"));
    }

    #[test]
    fn test_handle_rejects_blank() {
        assert!(SessionHandle::new("   ").is_none());
        assert!(serde_json::from_value::<SessionHandle>(json!("")).is_err());
        assert!(serde_json::from_value::<SessionHandle>(json!(true)).is_err());
    }

    #[test]
    fn test_send_request_always_carries_handle_field() {
        let req = SendRequest {
            message: "hola".to_string(),
            id_conversation: None,
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"message": "hola", "id_conversation": null})
        );
    }

    #[test]
    fn test_send_reply_handle_variants() {
        let reply: SendReply = serde_json::from_value(json!({"reply": "hi"})).unwrap();
        assert_eq!(reply.id_conversation, None);

        let reply: SendReply =
            serde_json::from_value(json!({"reply": "hi", "id_conversation": ""})).unwrap();
        assert_eq!(reply.id_conversation, None);

        let reply: SendReply =
            serde_json::from_value(json!({"reply": "hi", "id_conversation": 7})).unwrap();
        assert_eq!(reply.id_conversation, SessionHandle::new("7"));
    }

    #[test]
    fn test_history_senders() {
        let history: HistoryResponse = serde_json::from_value(json!({
            "messages": [
                {"sender": "user", "text": "a"},
                {"sender": "bot", "text": "b"},
                {"sender": "assistant", "text": "c"}
            ]
        }))
        .unwrap();
        assert_eq!(
            history.messages,
            vec![Message::user("a"), Message::bot("b"), Message::bot("c")]
        );
        assert_eq!(Sender::Bot.css_class(), "bot");
    }

    #[test]
    fn test_conversation_summary_fallbacks() {
        let summary: ConversationSummary =
            serde_json::from_value(json!({"id": 3, "last_message": null})).unwrap();
        assert_eq!(summary.handle().map(|h| h.as_str()), Some("3"));
        assert_eq!(summary.last_message_or_default(), "N/A");

        let summary: ConversationSummary = serde_json::from_value(
            json!({"id_conversation": "9", "id": 3, "last_message": "bye"}),
        )
        .unwrap();
        assert_eq!(summary.handle().map(|h| h.as_str()), Some("9"));
        assert_eq!(summary.last_message_or_default(), "bye");
    }

    #[test]
    fn test_model_kind_parse() {
        assert_eq!("Matriz".parse::<ModelKind>().unwrap(), ModelKind::Matriz);
        assert_eq!(" cursos ".parse::<ModelKind>().unwrap(), ModelKind::Cursos);
        assert!("cursos_info".parse::<ModelKind>().is_err());
    }

    #[test]
    fn test_model_status_defaults_missing_to_false() {
        let status: ModelStatus =
            serde_json::from_value(json!({"autoencoder": true, "cursos": true})).unwrap();
        assert!(status.autoencoder);
        assert!(!status.embeddings);
        assert!(!status.all_loaded());
        assert_eq!(status.entries()[3], ("Courses", true));
    }

    #[test]
    fn test_error_detail_extraction() {
        assert_eq!(
            ErrorDetail::from_body(r#"{"detail": "Archivo no encontrado"}"#),
            Some("Archivo no encontrado".to_string())
        );
        assert_eq!(ErrorDetail::from_body("not json"), None);
        assert_eq!(ErrorDetail::from_body("{}"), None);
    }

    #[test]
    fn test_action_message_falls_back_to_default() {
        let empty: ModelActionResponse = serde_json::from_value(json!({"message": ""})).unwrap();
        let missing: ModelActionResponse = serde_json::from_value(json!({})).unwrap();
        let given: ModelActionResponse =
            serde_json::from_value(json!({"message": "Modelo cargado"})).unwrap();

        assert_eq!(empty.message_or(DEFAULT_LOAD_MESSAGE), DEFAULT_LOAD_MESSAGE);
        assert_eq!(missing.message_or(DEFAULT_UPLOAD_MESSAGE), DEFAULT_UPLOAD_MESSAGE);
        assert_eq!(given.message_or(DEFAULT_LOAD_MESSAGE), "Modelo cargado");
    }
}
