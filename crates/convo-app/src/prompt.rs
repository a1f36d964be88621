use std::cell::RefCell;

use anyhow::{Context, Result};
use rustyline::DefaultEditor;

use convo_session::Confirm;

/// Line editor shared by the chat prompt and yes/no confirmations
pub struct Prompter {
    editor: RefCell<DefaultEditor>,
    assume_yes: bool,
}

impl Prompter {
    pub fn new(assume_yes: bool) -> Result<Self> {
        let editor = DefaultEditor::new().context("Failed to initialize line editor")?;
        Ok(Self {
            editor: RefCell::new(editor),
            assume_yes,
        })
    }

    pub fn read_line(&self, prompt: &str) -> rustyline::Result<String> {
        self.editor.borrow_mut().readline(prompt)
    }

    pub fn add_history(&self, line: &str) {
        let _ = self.editor.borrow_mut().add_history_entry(line);
    }
}

impl Confirm for Prompter {
    fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        match self.read_line(&format!("{} [y/N] ", prompt)) {
            Ok(answer) => is_yes(&answer),
            // Ctrl-C / Ctrl-D count as "no"
            Err(_) => false,
        }
    }
}

/// Whether a typed answer means yes. Anything else, including an empty
/// line, is a no.
pub fn is_yes(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "s" | "si" | "sí"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y"));
        assert!(is_yes(" YES "));
        assert!(is_yes("sí"));
        assert!(!is_yes(""));
        assert!(!is_yes("n"));
        assert!(!is_yes("yep, no"));
    }
}
