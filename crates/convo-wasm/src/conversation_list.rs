use wasm_bindgen::JsValue;
use web_sys::{Document, Element, HtmlElement};

use convo_types::{ConversationSummary, SessionHandle, DEFAULT_CONVERSATION_LIMIT};

use crate::dom;
use crate::http;
use crate::utils::escape_html;

pub struct ConversationListApp {
    document: Document,
}

impl ConversationListApp {
    pub fn new() -> Result<Self, JsValue> {
        Ok(Self {
            document: crate::document()?,
        })
    }

    pub async fn start(self) -> Result<(), JsValue> {
        self.setup_reload_button()?;
        self.setup_close_button()?;

        load_conversations(self.document.clone()).await;
        Ok(())
    }

    fn setup_reload_button(&self) -> Result<(), JsValue> {
        let Some(button) = self.document.get_element_by_id("reload-btn") else {
            return Ok(());
        };
        let document = self.document.clone();

        dom::add_click_listener(&button, move || {
            let doc = document.clone();
            wasm_bindgen_futures::spawn_local(load_conversations(doc));
        })
    }

    fn setup_close_button(&self) -> Result<(), JsValue> {
        let Some(button) = self.document.get_element_by_id("close-history") else {
            return Ok(());
        };
        let section = dom::get_html_element_by_id(&self.document, "history-section")?;

        dom::add_click_listener(&button, move || section.set_hidden(true))
    }
}

/// Fetch and render the list; failures are shown in place of the list
async fn load_conversations(document: Document) {
    let rendered = match http::list_conversations(DEFAULT_CONVERSATION_LIMIT).await {
        Ok(rows) => render_conversations(&document, &rows),
        Err(e) => render_error(&document, &e),
    };

    if let Err(e) = rendered {
        log::error!("Failed to render conversations: {:?}", e);
    }
}

fn render_error(document: &Document, error: &JsValue) -> Result<(), JsValue> {
    let container = dom::get_element_by_id(document, "conversations-list")?;
    dom::clear_element(&container);
    let message = error
        .as_string()
        .unwrap_or_else(|| "Failed to load conversations".to_string());
    let p = dom::create_text_element(document, "p", "error", &format!("❌ {}", message))?;
    container.append_child(&p)?;
    Ok(())
}

fn render_conversations(document: &Document, rows: &[ConversationSummary]) -> Result<(), JsValue> {
    let container = dom::get_element_by_id(document, "conversations-list")?;
    dom::clear_element(&container);

    if rows.is_empty() {
        let empty = dom::create_text_element(document, "p", "", "No conversations recorded.")?;
        container.append_child(&empty)?;
        return Ok(());
    }

    for row in rows {
        let Some(id) = row.handle().cloned() else {
            log::warn!("Skipping conversation without an id");
            continue;
        };
        let card = create_conversation_card(document, &id, row.last_message_or_default())?;
        container.append_child(&card)?;
    }

    Ok(())
}

fn create_conversation_card(
    document: &Document,
    id: &SessionHandle,
    last_message: &str,
) -> Result<Element, JsValue> {
    let card = document.create_element("div")?;
    card.set_class_name("conversation-card");
    card.set_inner_html(&format!(
        r#"
        <div>
            <strong>ID:</strong> {}<br>
            <small>Last message: {}</small>
        </div>
        "#,
        escape_html(id.as_str()),
        escape_html(last_message)
    ));

    let actions = document.create_element("div")?;

    let view_btn = dom::create_text_element(document, "button", "action-btn btn-view", "View")?;
    let doc = document.clone();
    let view_id = id.clone();
    dom::add_click_listener(&view_btn, move || {
        let doc = doc.clone();
        let id = view_id.clone();
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = view_conversation(&doc, &id).await {
                log::error!("Failed to show conversation {}: {:?}", id, e);
                dom::alert("❌ Could not fetch the conversation history.");
            }
        });
    })?;

    let delete_btn =
        dom::create_text_element(document, "button", "action-btn btn-delete", "Delete")?;
    let doc = document.clone();
    let delete_id = id.clone();
    dom::add_click_listener(&delete_btn, move || {
        if !dom::confirm(&format!("Delete conversation {}?", delete_id)) {
            return;
        }
        let doc = doc.clone();
        let id = delete_id.clone();
        wasm_bindgen_futures::spawn_local(async move {
            match http::delete_conversation(&id).await {
                Ok(()) => {
                    dom::alert("✅ Conversation deleted");
                    load_conversations(doc).await;
                }
                Err(e) => {
                    log::error!("Failed to delete conversation {}: {:?}", id, e);
                    dom::alert("❌ Could not delete the conversation.");
                }
            }
        });
    })?;

    actions.append_child(&view_btn)?;
    actions.append_child(&delete_btn)?;
    card.append_child(&actions)?;
    Ok(card)
}

async fn view_conversation(document: &Document, id: &SessionHandle) -> Result<(), JsValue> {
    let history = http::fetch_conversation(id).await?;
    let pretty = serde_json::to_string_pretty(&history)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let content = dom::get_element_by_id(document, "history-content")?;
    dom::clear_element(&content);
    content.append_child(&dom::create_text_element(
        document,
        "h3",
        "",
        &format!("Conversation history {}", id),
    )?.into())?;
    content.append_child(&dom::create_text_element(document, "pre", "", &pretty)?.into())?;

    let section: HtmlElement = dom::get_html_element_by_id(document, "history-section")?;
    section.set_hidden(false);
    section.scroll_into_view();
    Ok(())
}
