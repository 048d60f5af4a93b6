//! Mock prompt implementation for testing.
//!
//! `MockPrompt` implements the [`Prompt`] trait with queued canned answers
//! and captures every question asked for later assertion.
//!
//! # Example
//!
//! ```
//! use outfitter::ui::{MockPrompt, Prompt};
//!
//! let mut prompt = MockPrompt::new();
//! prompt.push_answer("alice");
//! prompt.push_confirm(false);
//!
//! assert_eq!(prompt.ask("Username", None).unwrap(), "alice");
//! assert!(!prompt.confirm("Proceed?", true).unwrap());
//! assert_eq!(prompt.questions().len(), 2);
//! ```

use std::collections::VecDeque;

use crate::error::Result;

use super::Prompt;

/// Mock prompt with pre-queued answers.
///
/// When a queue is exhausted, `ask` falls back to the question's default (or
/// the empty string) and `confirm` falls back to its default, which mirrors
/// an operator hitting bare return.
#[derive(Debug, Default)]
pub struct MockPrompt {
    answers: VecDeque<String>,
    confirms: VecDeque<bool>,
    questions: Vec<String>,
    private_questions: Vec<String>,
}

impl MockPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an answer for the next `ask` or `ask_private`.
    pub fn push_answer(&mut self, answer: &str) {
        self.answers.push_back(answer.to_string());
    }

    /// Queue an answer for the next `confirm`.
    pub fn push_confirm(&mut self, accept: bool) {
        self.confirms.push_back(accept);
    }

    /// Every question asked, in order (private ones included).
    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    /// Questions asked through `ask_private`.
    pub fn private_questions(&self) -> &[String] {
        &self.private_questions
    }
}

impl Prompt for MockPrompt {
    fn ask(&mut self, question: &str, default: Option<&str>) -> Result<String> {
        self.questions.push(question.to_string());
        Ok(self
            .answers
            .pop_front()
            .unwrap_or_else(|| default.unwrap_or_default().to_string()))
    }

    fn ask_private(&mut self, question: &str) -> Result<String> {
        self.questions.push(question.to_string());
        self.private_questions.push(question.to_string());
        Ok(self.answers.pop_front().unwrap_or_default())
    }

    fn confirm(&mut self, question: &str, default_accept: bool) -> Result<bool> {
        self.questions.push(question.to_string());
        Ok(self.confirms.pop_front().unwrap_or(default_accept))
    }
}
