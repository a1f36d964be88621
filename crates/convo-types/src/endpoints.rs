//! Paths of the conversation API, relative to the server origin.
//!
//! Ids are appended as a single path segment by the caller so each
//! transport can apply its own escaping.

use crate::ModelKind;

/// `POST` a message, `GET {CHATBOT_MESSAGE}/{id}` for its history
pub const CHATBOT_MESSAGE: &str = "/api/chatbot/message";

/// `GET` list, `GET`/`DELETE` `{CONVERSATIONS}/{id}`
pub const CONVERSATIONS: &str = "/api/conversations";

/// Upload target; the trailing slash matches the backend route
pub const MODELS_UPLOAD: &str = "/api/models/";

pub const MODELS_STATUS: &str = "/api/models/status";

const MODELS: &str = "/api/models";

/// Path segments under `/api/models` for loading a model into memory
pub fn model_load_path(kind: ModelKind) -> String {
    format!("{}/{}/load", MODELS, kind.as_str())
}

/// Path for downloading the stored artifact of a model
pub fn model_download_path(kind: ModelKind) -> String {
    format!("{}/{}/download", MODELS, kind.as_str())
}
