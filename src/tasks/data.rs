//! Data fixtures.
//!
//! The fixtures come from a locally cached archive when one exists, otherwise
//! over `scp` from the data host, which needs an operator-supplied username.
//! The username lives in this task instance only; it is never written back
//! into the shared manifest, never logged, and never recorded in the prompt
//! history.

use std::fs;
use std::path::PathBuf;

use crate::config::Config;
use crate::error::Result;
use crate::shell;
use crate::task::Task;
use crate::ui::Prompt;

/// Fetch and unpack the pipeline's data fixtures.
pub struct FetchData {
    archive: PathBuf,
    data_dir: PathBuf,
    remote_host: String,
    remote_path: String,
    configured_user: Option<String>,
    remote_user: Option<String>,
}

impl FetchData {
    pub fn new(config: &Config) -> Self {
        Self {
            archive: config.data_archive.clone(),
            data_dir: config.data_dir.clone(),
            remote_host: config.data_remote_host.clone(),
            remote_path: config.data_remote_path.clone(),
            configured_user: config.remote_user.clone(),
            remote_user: None,
        }
    }

    pub fn spec(config: &Config) -> Result<Box<dyn Task>> {
        Ok(Box::new(Self::new(config)))
    }
}

impl Task for FetchData {
    fn name(&self) -> &str {
        "data-fixtures"
    }

    fn is_complete(&self) -> bool {
        self.data_dir.is_dir()
    }

    fn pre_install(&mut self, prompt: &mut dyn Prompt) -> Result<bool> {
        if self.archive.exists() {
            return prompt.confirm(
                &format!("Unpack cached data archive {}?", self.archive.display()),
                true,
            );
        }

        let user = match &self.configured_user {
            Some(user) => user.clone(),
            None => prompt.ask_private(&format!("Username on {}", self.remote_host))?,
        };

        if !prompt.confirm(
            &format!(
                "Download the data archive from {} now? This can take a while",
                self.remote_host
            ),
            true,
        )? {
            return Ok(false);
        }

        self.remote_user = Some(user);
        Ok(true)
    }

    fn install(&mut self) -> Result<()> {
        if !self.archive.exists() {
            // An empty username is not validated here; scp fails loudly.
            let user = self.remote_user.as_deref().unwrap_or_default();
            shell::run(&format!(
                "scp {} {}",
                shell::quote(&format!(
                    "{}@{}:{}",
                    user, self.remote_host, self.remote_path
                )),
                shell::quote_path(&self.archive)
            ))?;
        }

        fs::create_dir_all(&self.data_dir)?;
        shell::run(&format!(
            "tar xf {} -C {}",
            shell::quote_path(&self.archive),
            shell::quote_path(&self.data_dir)
        ))
    }
}
