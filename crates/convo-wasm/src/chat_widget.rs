use std::rc::Rc;

use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use convo_session::{ChatSession, Confirm, Message, ReplayOutcome, TranscriptView};

use crate::dom;
use crate::http::GlooConversationApi;
use crate::storage::BrowserSessionStore;

type BrowserSession = ChatSession<GlooConversationApi, BrowserSessionStore>;

/// Renders transcript changes into `#chat-box`
struct DomTranscript {
    document: Document,
    chat_box: Element,
}

impl TranscriptView for DomTranscript {
    fn append(&self, message: &Message) {
        let appended = dom::create_text_element(
            &self.document,
            "div",
            message.sender.css_class(),
            &message.text,
        )
        .and_then(|el| self.chat_box.append_child(&el).map(|_| ()));

        if let Err(e) = appended {
            log::error!("Failed to render message: {:?}", e);
            return;
        }
        self.chat_box.set_scroll_top(self.chat_box.scroll_height());
    }

    fn clear(&self) {
        dom::clear_element(&self.chat_box);
    }
}

struct BrowserConfirm;

impl Confirm for BrowserConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        dom::confirm(prompt)
    }
}

pub struct ChatWidget {
    document: Document,
    session: Rc<BrowserSession>,
}

impl ChatWidget {
    pub fn new() -> Result<Self, JsValue> {
        let document = crate::document()?;
        let chat_box = dom::get_element_by_id(&document, "chat-box")?;

        let view = Rc::new(DomTranscript {
            document: document.clone(),
            chat_box,
        });
        let session = ChatSession::new(GlooConversationApi::new(), BrowserSessionStore::new())
            .with_view(view);

        Ok(Self {
            document,
            session: Rc::new(session),
        })
    }

    pub async fn start(self) -> Result<(), JsValue> {
        self.setup_chat_form()?;
        self.setup_reset_button()?;

        match self.session.replay_history().await {
            ReplayOutcome::Replayed { count } => log::info!("Restored {} messages", count),
            ReplayOutcome::NoSession => log::debug!("No conversation in this tab yet"),
            // Logged by the session; the widget stays usable
            ReplayOutcome::Failed(_) => {}
            ReplayOutcome::Dropped => log::debug!("Reset before the history arrived"),
        }

        Ok(())
    }

    fn setup_chat_form(&self) -> Result<(), JsValue> {
        let form = dom::get_element_by_id(&self.document, "chat-form")?;
        let input = dom::get_input_by_id(&self.document, "user-input")?;
        let session = self.session.clone();

        dom::add_submit_listener(&form, move || {
            let Some(pending) = session.begin_send(&input.value()) else {
                return;
            };
            input.set_value("");

            // Each send runs on its own; replies land on their own message
            let session = session.clone();
            wasm_bindgen_futures::spawn_local(async move {
                session.complete_send(pending).await;
            });
        })
    }

    fn setup_reset_button(&self) -> Result<(), JsValue> {
        let button = dom::get_element_by_id(&self.document, "reset-chat")?;
        let session = self.session.clone();

        dom::add_click_listener(&button, move || {
            session.reset_session(&BrowserConfirm);
        })
    }
}
