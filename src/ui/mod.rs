//! Operator interaction.
//!
//! This module provides:
//! - [`Prompt`] trait for operator input abstraction
//! - [`TerminalPrompt`] for interactive terminal usage
//! - [`FileHistory`] for the persistent prompt history file
//! - [`MockPrompt`] with canned answers for tests
//!
//! Prompts are the only blocking wait besides child processes; both are
//! synchronous and uncancellable by design.

pub mod history;
pub mod mock;
pub mod terminal;

pub use history::FileHistory;
pub use mock::MockPrompt;
pub use terminal::TerminalPrompt;

use crate::error::Result;

/// Trait for operator interactions.
///
/// This trait allows mocking the prompts in tests.
pub trait Prompt {
    /// Ask for a line of text. A bare return yields `default` when given,
    /// otherwise the empty string.
    fn ask(&mut self, question: &str, default: Option<&str>) -> Result<String>;

    /// Like [`ask`](Prompt::ask), but the answer is held in memory only:
    /// never written to the history file and never logged. Used for
    /// credentials such as the remote username.
    fn ask_private(&mut self, question: &str) -> Result<String>;

    /// Ask a yes/no question. An empty answer yields `default_accept`.
    fn confirm(&mut self, question: &str, default_accept: bool) -> Result<bool>;
}

const ACCEPT: &[&str] = &["y", "yes"];
const DECLINE: &[&str] = &["n", "no"];

/// Interpret a raw confirmation answer.
///
/// Matching is case-insensitive against the accepted sets; an empty answer
/// (bare return) yields the default, anything unrecognized yields `None` so
/// the caller can re-ask.
///
/// # Example
///
/// ```
/// use outfitter::ui::interpret_answer;
///
/// assert_eq!(interpret_answer("YES", false), Some(true));
/// assert_eq!(interpret_answer("", true), Some(true));
/// assert_eq!(interpret_answer("maybe", true), None);
/// ```
pub fn interpret_answer(raw: &str, default_accept: bool) -> Option<bool> {
    let normalized = raw.trim().to_lowercase();
    if normalized.is_empty() {
        return Some(default_accept);
    }
    if ACCEPT.contains(&normalized.as_str()) {
        Some(true)
    } else if DECLINE.contains(&normalized.as_str()) {
        Some(false)
    } else {
        None
    }
}
