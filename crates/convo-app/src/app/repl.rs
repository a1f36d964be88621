use std::rc::Rc;

use anyhow::Result;
use colored::Colorize;
use rustyline::error::ReadlineError;

use convo_api::HttpConversationApi;
use convo_session::{ChatSession, MemorySessionStore, ReplayOutcome, SendOutcome};

use crate::app::setup::AppConfig;
use crate::prompt::Prompter;
use crate::render::TerminalView;

const HELP: &str = "Commands: /reset  start over • /session  show the conversation id • exit, quit";

/// Run the interactive chat loop
pub async fn run_repl_mode(config: &AppConfig) -> Result<()> {
    println!("{}", "🎓 Course recommendation chat".bright_cyan().bold());
    println!("{}", format!("Server: {}", config.client_config.base_url).bright_black());
    println!("{}", format!("{}\n", HELP).bright_black());

    let api = HttpConversationApi::new(config.api_client()?);
    let store = match &config.seed_conversation {
        Some(handle) => MemorySessionStore::with_handle(handle.clone()),
        None => MemorySessionStore::new(),
    };
    let view = Rc::new(TerminalView::new());
    let session = ChatSession::new(api, store).with_view(view.clone());

    match session.replay_history().await {
        ReplayOutcome::Replayed { count } => {
            println!("{}", format!("Restored {} messages", count).bright_black());
        }
        // Already logged; the chat still works, the server decides what to
        // do with the handle on the next send
        ReplayOutcome::Failed(_) | ReplayOutcome::NoSession | ReplayOutcome::Dropped => {}
    }
    view.set_echo_user(false);

    let prompter = Prompter::new(config.assume_yes)?;

    loop {
        let line = match prompter.read_line(&format!("{} ", "you ›".green().bold())) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        prompter.add_history(input);

        match input {
            "exit" | "quit" => break,
            "/help" => println!("{}", HELP.bright_black()),
            "/session" => match session.active_session() {
                Some(handle) => println!("Conversation: {}", handle),
                None => println!("Conversation: {}", "none".bright_black()),
            },
            "/reset" => {
                if !session.reset_session(&prompter) {
                    println!("{}", "Kept the current conversation".bright_black());
                }
            }
            _ => {
                if let SendOutcome::Failed(e) = session.send(input).await {
                    log::debug!("Send failed: {}", e);
                }
            }
        }
    }

    println!("{}", "Goodbye!".bright_black());
    Ok(())
}
