#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use futures::channel::oneshot;

use convo_session::{ApiError, ConversationApi, Message, SessionHandle, TranscriptView};
use convo_types::{SendReply, SendRequest};

pub fn handle(raw: &str) -> SessionHandle {
    SessionHandle::new(raw).expect("valid handle")
}

/// In-memory stand-in for the conversation service.
///
/// By default it behaves like the real backend: the first send creates a
/// conversation and returns its id, later sends with that id are appended
/// to it, and the history endpoint returns everything stored so far.
pub struct FakeApi {
    conversations: RefCell<HashMap<String, Vec<Message>>>,
    next_id: Cell<u32>,
    requests: RefCell<Vec<SendRequest>>,
    failures: RefCell<VecDeque<ApiError>>,
    deferred: RefCell<VecDeque<oneshot::Receiver<SendReply>>>,
    history_failure: RefCell<Option<ApiError>>,
    deferred_history: RefCell<Option<oneshot::Receiver<Vec<Message>>>>,
    history_calls: Cell<usize>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            conversations: RefCell::new(HashMap::new()),
            next_id: Cell::new(1),
            requests: RefCell::new(Vec::new()),
            failures: RefCell::new(VecDeque::new()),
            deferred: RefCell::new(VecDeque::new()),
            history_failure: RefCell::new(None),
            deferred_history: RefCell::new(None),
            history_calls: Cell::new(0),
        }
    }

    /// Make the next send fail with `error`
    pub fn fail_next_send(&self, error: ApiError) {
        self.failures.borrow_mut().push_back(error);
    }

    /// Hold the next send until the returned sender is used
    pub fn defer_reply(&self) -> oneshot::Sender<SendReply> {
        let (tx, rx) = oneshot::channel();
        self.deferred.borrow_mut().push_back(rx);
        tx
    }

    /// Hold the next history fetch until the returned sender is used
    pub fn defer_history(&self) -> oneshot::Sender<Vec<Message>> {
        let (tx, rx) = oneshot::channel();
        *self.deferred_history.borrow_mut() = Some(rx);
        tx
    }

    pub fn fail_history(&self, error: ApiError) {
        *self.history_failure.borrow_mut() = Some(error);
    }

    pub fn requests(&self) -> Vec<SendRequest> {
        self.requests.borrow().clone()
    }

    pub fn history_calls(&self) -> usize {
        self.history_calls.get()
    }

    pub fn stored(&self, handle: &SessionHandle) -> Vec<Message> {
        self.conversations
            .borrow()
            .get(handle.as_str())
            .cloned()
            .unwrap_or_default()
    }

    fn echo(&self, request: &SendRequest) -> SendReply {
        let mut conversations = self.conversations.borrow_mut();
        let (id, issued) = match &request.id_conversation {
            Some(h) if conversations.contains_key(h.as_str()) => (h.as_str().to_string(), false),
            _ => {
                let id = self.next_id.get().to_string();
                self.next_id.set(self.next_id.get() + 1);
                conversations.insert(id.clone(), Vec::new());
                (id, true)
            }
        };

        let reply = format!("echo: {}", request.message);
        let stored = conversations.entry(id.clone()).or_default();
        stored.push(Message::user(request.message.clone()));
        stored.push(Message::bot(reply.clone()));

        SendReply {
            reply,
            id_conversation: if issued { SessionHandle::new(id) } else { None },
        }
    }
}

#[async_trait(?Send)]
impl ConversationApi for FakeApi {
    async fn send_message(&self, request: &SendRequest) -> Result<SendReply, ApiError> {
        self.requests.borrow_mut().push(request.clone());

        if let Some(error) = self.failures.borrow_mut().pop_front() {
            return Err(error);
        }

        let deferred = self.deferred.borrow_mut().pop_front();
        if let Some(rx) = deferred {
            return rx
                .await
                .map_err(|_| ApiError::Transport("connection dropped".to_string()));
        }

        Ok(self.echo(request))
    }

    async fn load_history(&self, handle: &SessionHandle) -> Result<Vec<Message>, ApiError> {
        self.history_calls.set(self.history_calls.get() + 1);

        if let Some(error) = self.history_failure.borrow().clone() {
            return Err(error);
        }

        let deferred = self.deferred_history.borrow_mut().take();
        if let Some(rx) = deferred {
            return rx
                .await
                .map_err(|_| ApiError::Transport("connection dropped".to_string()));
        }

        self.conversations
            .borrow()
            .get(handle.as_str())
            .cloned()
            .ok_or(ApiError::Status {
                status: 404,
                body: r#"{"detail":"Conversation not found"}"#.to_string(),
            })
    }
}

/// View that records what it was asked to render
#[derive(Default)]
pub struct RecordingView {
    events: RefCell<Vec<String>>,
}

impl RecordingView {
    pub fn events(&self) -> Vec<String> {
        self.events.borrow().clone()
    }
}

impl TranscriptView for RecordingView {
    fn append(&self, message: &Message) {
        self.events
            .borrow_mut()
            .push(format!("{}: {}", message.sender.css_class(), message.text));
    }

    fn clear(&self) {
        self.events.borrow_mut().push("clear".to_string());
    }
}
