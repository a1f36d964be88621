//! # convo-session
//!
//! Client-side handle to a conversation with the chatbot service.
//!
//! A [`ChatSession`] owns the rendered [`Transcript`], reads and writes the
//! active [`SessionHandle`](convo_types::SessionHandle) through a
//! [`SessionStore`], and talks to the service through a [`ConversationApi`].
//! Front ends plug in a [`TranscriptView`] to mirror the transcript and a
//! [`Confirm`] implementation for the reset prompt.
//!
//! ## Example
//!
//! ```rust,ignore
//! use convo_session::{ChatSession, MemorySessionStore, SendOutcome};
//!
//! let session = ChatSession::new(api, MemorySessionStore::new());
//! session.replay_history().await;
//! match session.send("I want to learn Rust").await {
//!     SendOutcome::Delivered { reply, .. } => println!("{}", reply),
//!     SendOutcome::Failed(err) => eprintln!("{}", err),
//!     SendOutcome::Ignored | SendOutcome::Dropped => {}
//! }
//! ```

pub mod api;
pub mod session;
pub mod store;
pub mod transcript;

pub use api::{ApiError, ConversationApi};
pub use session::{
    ChatSession, Confirm, PendingSend, ReplayOutcome, SendOutcome, TranscriptView, RESET_PROMPT,
    SEND_FAILURE_MESSAGE,
};
pub use store::{MemorySessionStore, SessionStore, StoreError};
pub use transcript::{DeliveryState, Outgoing, OutgoingId, Transcript, TranscriptError};

// Re-export the wire types callers need alongside the session
pub use convo_types::{Message, Sender, SessionHandle};
