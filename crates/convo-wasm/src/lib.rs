//! Browser front end for the course-recommendation chatbot.
//!
//! Each page calls one of the exported entry points after the module has
//! loaded:
//!
//! - [`init_chat_widget`]: the chat box, backed by `sessionStorage`
//! - [`init_conversation_list`]: stored conversations, history viewer, delete
//! - [`init_model_dashboard`]: model status, upload and load

use wasm_bindgen::prelude::*;
use web_sys::{Document, Window};

mod chat_widget;
mod conversation_list;
mod dom;
mod http;
mod model_dashboard;
mod storage;
mod utils;

pub use http::GlooConversationApi;
pub use storage::BrowserSessionStore;

/// Initialize the WASM application
/// This sets up panic hooks and logging
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());

    log::info!("Convo WASM initialized");
}

/// Wire up the chat page and replay the tab's conversation, if any
#[wasm_bindgen]
pub async fn init_chat_widget() -> Result<(), JsValue> {
    log::info!("Initializing chat widget");
    chat_widget::ChatWidget::new()?.start().await
}

/// Wire up the conversation list page and load the first page of rows
#[wasm_bindgen]
pub async fn init_conversation_list() -> Result<(), JsValue> {
    log::info!("Initializing conversation list");
    conversation_list::ConversationListApp::new()?.start().await
}

/// Wire up the model dashboard and fetch the current status
#[wasm_bindgen]
pub async fn init_model_dashboard() -> Result<(), JsValue> {
    log::info!("Initializing model dashboard");
    model_dashboard::ModelDashboard::new()?.start().await
}

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("No window object"))
}

fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("No document object"))
}
