use anyhow::{Context, Result};

use convo_api::ConversationsClient;
use convo_session::Confirm;
use convo_types::{HistoryResponse, SessionHandle};

use crate::app::setup::AppConfig;
use crate::cli::ConversationCommands;
use crate::render::{format_conversation_list, format_message};

impl ConversationCommands {
    /// Run the subcommand and return what should be printed
    pub async fn execute(&self, config: &AppConfig, confirm: &dyn Confirm) -> Result<String> {
        let client = ConversationsClient::new(config.api_client()?);

        match self {
            ConversationCommands::List { limit } => {
                let conversations = client.list(*limit).await?;
                Ok(format_conversation_list(&conversations))
            }
            ConversationCommands::Show { id } => {
                let id = parse_id(id)?;
                let body = client.show(&id).await?;
                format_history(body)
            }
            ConversationCommands::Delete { id } => {
                let id = parse_id(id)?;
                if !confirm.confirm(&format!("Delete conversation {}?", id)) {
                    return Ok("Deletion cancelled.".to_string());
                }
                client.delete(&id).await?;
                Ok(format!("Conversation {} deleted.", id))
            }
        }
    }
}

fn parse_id(raw: &str) -> Result<SessionHandle> {
    SessionHandle::new(raw).context("Conversation id cannot be empty")
}

/// Render a stored history. Bodies in the `{messages: [...]}` shape are
/// shown as a transcript, anything else as pretty JSON.
fn format_history(body: serde_json::Value) -> Result<String> {
    match serde_json::from_value::<HistoryResponse>(body.clone()) {
        Ok(history) if history.messages.is_empty() => Ok("No messages recorded.".to_string()),
        Ok(history) => Ok(history
            .messages
            .iter()
            .map(format_message)
            .collect::<Vec<_>>()
            .join("\n")),
        Err(_) => serde_json::to_string_pretty(&body).context("Failed to render conversation"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_history_is_rendered_as_transcript() {
        colored::control::set_override(false);
        let out = format_history(json!({
            "messages": [
                {"sender": "user", "text": "hola"},
                {"sender": "bot", "text": "¿En qué te ayudo?"}
            ]
        }))
        .unwrap();
        assert_eq!(out, "you › hola\nbot › ¿En qué te ayudo?");
    }

    #[test]
    fn test_unknown_history_shape_is_pretty_printed() {
        let out = format_history(json!({"historial": [1, 2]})).unwrap();
        assert!(out.contains("\"historial\""));
        assert!(out.contains('\n'));
    }

    #[test]
    fn test_empty_history() {
        let out = format_history(json!({"messages": []})).unwrap();
        assert_eq!(out, "No messages recorded.");
    }

    #[test]
    fn test_blank_id_is_rejected() {
        assert!(parse_id(" ").is_err());
        assert_eq!(parse_id("9").unwrap().as_str(), "9");
    }
}
