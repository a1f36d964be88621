use std::cell::Cell;

use colored::Colorize;

use convo_session::{Message, Sender, TranscriptView};
use convo_types::{ConversationSummary, ModelStatus};

/// Prints the transcript to stdout as it changes.
///
/// Once the user is typing at the prompt their own lines are already on
/// screen, so user messages are only echoed while `echo_user` is set
/// (history replay).
pub struct TerminalView {
    echo_user: Cell<bool>,
}

impl TerminalView {
    pub fn new() -> Self {
        Self {
            echo_user: Cell::new(true),
        }
    }

    pub fn set_echo_user(&self, echo: bool) {
        self.echo_user.set(echo);
    }
}

impl Default for TerminalView {
    fn default() -> Self {
        Self::new()
    }
}

impl TranscriptView for TerminalView {
    fn append(&self, message: &Message) {
        if message.sender == Sender::User && !self.echo_user.get() {
            return;
        }
        println!("{}", format_message(message));
    }

    fn clear(&self) {
        println!("{}", "── conversation cleared ──".bright_black());
    }
}

pub fn format_message(message: &Message) -> String {
    match message.sender {
        Sender::User => format!("{} {}", "you ›".green().bold(), message.text),
        Sender::Bot => format!("{} {}", "bot ›".cyan().bold(), message.text),
    }
}

pub fn format_conversation_list(conversations: &[ConversationSummary]) -> String {
    if conversations.is_empty() {
        return "No conversations recorded.".to_string();
    }

    conversations
        .iter()
        .map(|conv| {
            let id = conv
                .handle()
                .map(|h| h.as_str().to_string())
                .unwrap_or_else(|| "?".to_string());
            format!(
                "{} {}\n   {} {}",
                "ID:".bright_yellow(),
                id,
                "Last message:".bright_black(),
                conv.last_message_or_default()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_model_status(status: &ModelStatus) -> String {
    status
        .entries()
        .iter()
        .map(|(label, loaded)| {
            let state = if *loaded {
                "✅ loaded".green()
            } else {
                "❌ not loaded".red()
            };
            format!("{:<14} {}", format!("{}:", label), state)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
