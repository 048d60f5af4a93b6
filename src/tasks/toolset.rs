//! Auxiliary toolset clone.

use std::path::PathBuf;

use crate::config::Config;
use crate::error::Result;
use crate::shell;
use crate::task::Task;

/// Clone the pipeline toolset repository.
pub struct CloneToolset {
    url: String,
    clone_dir: PathBuf,
}

impl CloneToolset {
    pub fn new(config: &Config) -> Self {
        Self {
            url: config.toolset_url.clone(),
            clone_dir: config.toolset_dir.clone(),
        }
    }

    pub fn spec(config: &Config) -> Result<Box<dyn Task>> {
        Ok(Box::new(Self::new(config)))
    }
}

impl Task for CloneToolset {
    fn name(&self) -> &str {
        "clone-toolset"
    }

    fn is_complete(&self) -> bool {
        self.clone_dir.join(".git").exists()
    }

    fn install(&mut self) -> Result<()> {
        shell::run(&format!(
            "git clone {} {}",
            shell::quote(&self.url),
            shell::quote_path(&self.clone_dir)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn incomplete_without_clone() {
        let temp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.toolset_dir = temp.path().join("tools");

        assert!(!CloneToolset::new(&config).is_complete());
    }

    #[test]
    fn complete_when_git_dir_exists() {
        let temp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.toolset_dir = temp.path().to_path_buf();
        fs::create_dir(temp.path().join(".git")).unwrap();

        assert!(CloneToolset::new(&config).is_complete());
    }
}
