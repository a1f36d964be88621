use std::cell::{Ref, RefCell};
use std::rc::Rc;

use convo_types::{Message, SendRequest, SessionHandle};

use crate::api::{ApiError, ConversationApi};
use crate::store::SessionStore;
use crate::transcript::{OutgoingId, Transcript, TranscriptError};

/// Bot message shown in place of a reply when a send fails for any reason
pub const SEND_FAILURE_MESSAGE: &str = "⚠️ There was a problem processing your message.";

/// Question asked before a reset wipes the local conversation
pub const RESET_PROMPT: &str = "Start a new conversation? The current history will be cleared.";

/// Mirrors transcript changes into a UI (DOM list, terminal, ...)
pub trait TranscriptView {
    fn append(&self, message: &Message);
    fn clear(&self);
}

/// Blocking yes/no prompt
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// A user message that has been rendered but not yet sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSend {
    pub id: OutgoingId,
    pub text: String,
    pub handle: Option<SessionHandle>,
}

/// How a send ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Empty or whitespace-only input; nothing rendered, nothing sent
    Ignored,
    /// The reply was rendered. `adopted` is the handle issued with it, if any.
    Delivered {
        reply: String,
        adopted: Option<SessionHandle>,
    },
    /// The apology was rendered in place of a reply
    Failed(ApiError),
    /// The transcript was reset while the request was in flight; nothing
    /// was rendered and no handle was adopted
    Dropped,
}

/// How a history replay ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplayOutcome {
    /// No stored handle, nothing to fetch
    NoSession,
    Replayed { count: usize },
    /// Logged only; the transcript is left as it was
    Failed(ApiError),
    /// The transcript was reset before the history arrived; nothing was
    /// rendered
    Dropped,
}

/// One tab's worth of conversation state.
///
/// Methods take `&self` so several sends can be in flight at once; no
/// borrow of the transcript is held across an await point.
pub struct ChatSession<A, S> {
    api: A,
    store: S,
    transcript: RefCell<Transcript>,
    view: Option<Rc<dyn TranscriptView>>,
}

impl<A, S> ChatSession<A, S>
where
    A: ConversationApi,
    S: SessionStore,
{
    pub fn new(api: A, store: S) -> Self {
        Self {
            api,
            store,
            transcript: RefCell::new(Transcript::new()),
            view: None,
        }
    }

    /// Mirror every transcript change into `view`
    pub fn with_view(mut self, view: Rc<dyn TranscriptView>) -> Self {
        self.view = Some(view);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn transcript(&self) -> Ref<'_, Transcript> {
        self.transcript.borrow()
    }

    /// The stored handle, unvalidated
    pub fn active_session(&self) -> Option<SessionHandle> {
        self.store.load()
    }

    /// Remember a handle issued by the service, replacing any previous one
    pub fn adopt_session(&self, handle: &SessionHandle) {
        match self.store.save(handle) {
            Ok(()) => log::info!("Adopted conversation {}", handle),
            Err(e) => log::warn!("Could not persist conversation {}: {}", handle, e),
        }
    }

    /// Forget the handle and clear the transcript, after asking.
    ///
    /// Returns `false` and touches nothing when the user declines. The
    /// service is not told anything.
    pub fn reset_session(&self, confirm: &dyn Confirm) -> bool {
        if !confirm.confirm(RESET_PROMPT) {
            log::debug!("Reset cancelled");
            return false;
        }

        if let Err(e) = self.store.clear() {
            log::warn!("Could not clear stored conversation: {}", e);
        }
        self.transcript.borrow_mut().clear();
        if let Some(view) = &self.view {
            view.clear();
        }

        log::info!("Conversation reset");
        true
    }

    /// Render the user's message and capture what the request will carry.
    ///
    /// Returns `None` for blank input.
    pub fn begin_send(&self, input: &str) -> Option<PendingSend> {
        let text = input.trim();
        if text.is_empty() {
            return None;
        }

        let id = self.transcript.borrow_mut().begin_outgoing(text);
        self.notify(&Message::user(text));

        Some(PendingSend {
            id,
            text: text.to_string(),
            handle: self.store.load(),
        })
    }

    /// Send a message rendered by [`begin_send`](Self::begin_send) and
    /// render the reply, or the apology if anything goes wrong.
    pub async fn complete_send(&self, pending: PendingSend) -> SendOutcome {
        let request = SendRequest {
            message: pending.text,
            id_conversation: pending.handle,
        };

        match self.api.send_message(&request).await {
            Ok(reply) => {
                let delivered = self
                    .transcript
                    .borrow_mut()
                    .deliver(pending.id, reply.reply.as_str())
                    .map(Message::clone);

                match delivered {
                    Ok(message) => {
                        if let Some(handle) = &reply.id_conversation {
                            self.adopt_session(handle);
                        }
                        self.notify(&message);
                        SendOutcome::Delivered {
                            reply: reply.reply,
                            adopted: reply.id_conversation,
                        }
                    }
                    Err(e) => {
                        self.log_dropped(e);
                        SendOutcome::Dropped
                    }
                }
            }
            Err(error) => {
                log::error!("Sending message failed: {}", error);
                let apology = self
                    .transcript
                    .borrow_mut()
                    .fail(pending.id, SEND_FAILURE_MESSAGE)
                    .map(Message::clone);

                match apology {
                    Ok(message) => {
                        self.notify(&message);
                        SendOutcome::Failed(error)
                    }
                    Err(e) => {
                        self.log_dropped(e);
                        SendOutcome::Dropped
                    }
                }
            }
        }
    }

    /// [`begin_send`](Self::begin_send) followed by
    /// [`complete_send`](Self::complete_send)
    pub async fn send(&self, input: &str) -> SendOutcome {
        match self.begin_send(input) {
            Some(pending) => self.complete_send(pending).await,
            None => SendOutcome::Ignored,
        }
    }

    /// Fetch and render the stored conversation, if there is one.
    ///
    /// A failed fetch is logged and leaves the transcript untouched. An
    /// unknown or stale handle ends up here too; it is kept so the next
    /// send can let the service decide what to do with it.
    ///
    /// History that arrives after a confirmed reset belongs to the
    /// forgotten conversation and is dropped.
    pub async fn replay_history(&self) -> ReplayOutcome {
        let Some(handle) = self.store.load() else {
            return ReplayOutcome::NoSession;
        };
        let generation = self.transcript.borrow().generation();

        match self.api.load_history(&handle).await {
            Ok(_) if self.transcript.borrow().generation() != generation => {
                log::debug!("Dropping late history of conversation {}", handle);
                ReplayOutcome::Dropped
            }
            Ok(messages) => {
                let count = messages.len();
                for message in messages {
                    self.transcript.borrow_mut().push(message.clone());
                    self.notify(&message);
                }
                log::info!("Replayed {} messages of conversation {}", count, handle);
                ReplayOutcome::Replayed { count }
            }
            Err(error) => {
                log::warn!("Failed to load history of conversation {}: {}", handle, error);
                ReplayOutcome::Failed(error)
            }
        }
    }

    fn notify(&self, message: &Message) {
        if let Some(view) = &self.view {
            view.append(message);
        }
    }

    fn log_dropped(&self, error: TranscriptError) {
        // The transcript was reset while the request was in flight
        log::debug!("Dropping late response: {}", error);
    }
}
