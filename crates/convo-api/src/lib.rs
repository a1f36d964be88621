//! # convo-api
//!
//! Native HTTP clients for the chatbot backend, built on `reqwest`.
//!
//! - [`HttpConversationApi`]: the chat endpoints, plugged into
//!   [`convo_session::ChatSession`]
//! - [`ConversationsClient`]: list, inspect and delete stored conversations
//! - [`ModelsClient`]: model status, upload, load and download
//!
//! All three share one [`ApiClient`], which owns the connection pool and
//! the normalized base URL.

pub mod chatbot;
pub mod client;
pub mod config;
pub mod conversations;
pub mod error;
pub mod models;

pub use chatbot::HttpConversationApi;
pub use client::ApiClient;
pub use config::{normalize_base_url, ClientConfig, DEFAULT_BASE_URL};
pub use conversations::ConversationsClient;
pub use error::ClientError;
pub use models::ModelsClient;
