//! Convo terminal client
//!
//! Interactive chat with the course-recommendation chatbot plus the
//! conversation and model management commands.

pub mod app;
pub mod cli;
pub mod logging;
pub mod prompt;
pub mod render;

pub use app::{run_repl_mode, setup_from_cli, AppConfig};
pub use cli::{Cli, Commands, ConversationCommands, ModelCommands};
