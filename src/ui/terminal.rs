//! Terminal prompt implementation.

use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;

use crate::error::{OutfitterError, Result};

use super::{interpret_answer, FileHistory, Prompt};

/// Convert dialoguer errors to OutfitterError.
fn map_dialoguer_err(e: dialoguer::Error) -> OutfitterError {
    OutfitterError::Io(e.into())
}

/// Interactive prompt on the controlling terminal.
///
/// Answers to [`ask`](Prompt::ask) are recorded in the history file, which is
/// saved when the prompt is dropped. Private answers bypass the history.
pub struct TerminalPrompt {
    theme: ColorfulTheme,
    history: FileHistory,
}

impl TerminalPrompt {
    /// Prompt with history at the default location, or in-memory history
    /// when no home directory exists.
    pub fn new() -> Self {
        let history = match FileHistory::default_path() {
            Some(path) => FileHistory::load(path),
            None => FileHistory::disabled(),
        };
        Self::with_history(history)
    }

    pub fn with_history(history: FileHistory) -> Self {
        Self {
            theme: ColorfulTheme::default(),
            history,
        }
    }
}

impl Default for TerminalPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TerminalPrompt {
    fn drop(&mut self) {
        if let Err(e) = self.history.save() {
            tracing::warn!("failed to save prompt history: {}", e);
        }
    }
}

impl Prompt for TerminalPrompt {
    fn ask(&mut self, question: &str, default: Option<&str>) -> Result<String> {
        let mut input = Input::<String>::with_theme(&self.theme)
            .with_prompt(question)
            .history_with(&mut self.history);

        input = match default {
            Some(value) => input.default(value.to_string()),
            None => input.allow_empty(true),
        };

        input.interact_text().map_err(map_dialoguer_err)
    }

    fn ask_private(&mut self, question: &str) -> Result<String> {
        Input::<String>::with_theme(&self.theme)
            .with_prompt(question)
            .allow_empty(true)
            .interact_text()
            .map_err(map_dialoguer_err)
    }

    fn confirm(&mut self, question: &str, default_accept: bool) -> Result<bool> {
        let hint = if default_accept { "[Y/n]" } else { "[y/N]" };

        loop {
            let raw: String = Input::with_theme(&self.theme)
                .with_prompt(format!("{} {}", question, hint))
                .allow_empty(true)
                .interact_text()
                .map_err(map_dialoguer_err)?;

            match interpret_answer(&raw, default_accept) {
                Some(answer) => return Ok(answer),
                None => println!("{}", style("Please answer 'y' or 'n'.").yellow()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Interactive behavior needs a terminal; these cover construction only.

    #[test]
    fn with_history_starts_from_given_entries() {
        let mut history = FileHistory::disabled();
        history.record("previous answer");

        let prompt = TerminalPrompt::with_history(history);

        assert_eq!(prompt.history.entries(), ["previous answer"]);
    }

    #[test]
    fn drop_without_backing_file_is_silent() {
        let prompt = TerminalPrompt::with_history(FileHistory::disabled());
        drop(prompt);
    }
}
