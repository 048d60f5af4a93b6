//! Prompt history persistence.
//!
//! An append-only history file in the operator's home directory, loaded at
//! start and saved at exit. A convenience only; provisioning logic never
//! reads it.

use std::fs;
use std::io;
use std::path::PathBuf;

/// File-backed prompt history.
///
/// Integrates with `dialoguer` input prompts through its
/// [`History`](dialoguer::History) trait.
#[derive(Debug, Default)]
pub struct FileHistory {
    path: Option<PathBuf>,
    entries: Vec<String>,
}

impl FileHistory {
    /// Default location: `~/.outfitter_history`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".outfitter_history"))
    }

    /// Load history from `path`. A missing file starts empty.
    pub fn load(path: PathBuf) -> Self {
        let entries = fs::read_to_string(&path)
            .map(|text| text.lines().map(str::to_string).collect())
            .unwrap_or_default();
        Self {
            path: Some(path),
            entries,
        }
    }

    /// In-memory history with no backing file (tests, no home directory).
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Append an entry. Blank lines and immediate repeats are dropped.
    pub fn record(&mut self, entry: &str) {
        let entry = entry.trim();
        if entry.is_empty() || self.entries.last().is_some_and(|last| last == entry) {
            return;
        }
        self.entries.push(entry.to_string());
    }

    /// Write all entries back to the backing file, if any.
    pub fn save(&self) -> io::Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let mut text = self.entries.join("\n");
        if !text.is_empty() {
            text.push('\n');
        }
        fs::write(path, text)
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl dialoguer::History<String> for FileHistory {
    fn read(&self, pos: usize) -> Option<String> {
        // pos 0 is the most recent entry.
        self.entries
            .len()
            .checked_sub(pos + 1)
            .and_then(|idx| self.entries.get(idx).cloned())
    }

    fn write(&mut self, val: &String) {
        self.record(val);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dialoguer::History;
    use tempfile::TempDir;

    #[test]
    fn load_missing_file_starts_empty() {
        let temp = TempDir::new().unwrap();
        let history = FileHistory::load(temp.path().join("none"));
        assert!(history.is_empty());
    }

    #[test]
    fn record_and_save_round_trips() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("history");

        let mut history = FileHistory::load(path.clone());
        history.record("alice");
        history.record("~/miniconda3");
        history.save().unwrap();

        let reloaded = FileHistory::load(path);
        assert_eq!(reloaded.entries(), ["alice", "~/miniconda3"]);
    }

    #[test]
    fn record_drops_blanks_and_repeats() {
        let mut history = FileHistory::disabled();
        history.record("");
        history.record("  ");
        history.record("x");
        history.record("x");
        history.record("y");
        assert_eq!(history.entries(), ["x", "y"]);
    }

    #[test]
    fn disabled_save_is_noop() {
        let mut history = FileHistory::disabled();
        history.record("anything");
        history.save().unwrap();
    }

    #[test]
    fn dialoguer_read_is_most_recent_first() {
        let mut history = FileHistory::disabled();
        history.record("first");
        history.record("second");

        assert_eq!(history.read(0), Some("second".to_string()));
        assert_eq!(history.read(1), Some("first".to_string()));
        assert_eq!(history.read(2), None);
    }

    #[test]
    fn dialoguer_write_records() {
        let mut history = FileHistory::disabled();
        History::write(&mut history, &"entry".to_string());
        assert_eq!(history.entries(), ["entry"]);
    }
}
