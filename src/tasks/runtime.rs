//! Language runtime installation.

use std::env;
use std::path::PathBuf;

use crate::config::Config;
use crate::error::Result;
use crate::shell;
use crate::task::Task;

/// Install the conda distribution that hosts the scientific stack.
///
/// The installer is downloaded into the temp directory and run in batch mode
/// against the target prefix.
pub struct InstallRuntime {
    install_dir: PathBuf,
    url: String,
}

impl InstallRuntime {
    pub fn new(config: &Config) -> Self {
        Self {
            install_dir: config.runtime_dir.clone(),
            url: config.runtime_url.clone(),
        }
    }

    pub fn spec(config: &Config) -> Result<Box<dyn Task>> {
        Ok(Box::new(Self::new(config)))
    }

    fn conda_binary(&self) -> PathBuf {
        self.install_dir.join("bin").join("conda")
    }

    fn installer_path(&self) -> PathBuf {
        let name = self.url.rsplit('/').next().unwrap_or("runtime-installer.sh");
        env::temp_dir().join(name)
    }
}

impl Task for InstallRuntime {
    fn name(&self) -> &str {
        "install-runtime"
    }

    fn is_complete(&self) -> bool {
        self.conda_binary().exists()
    }

    fn install(&mut self) -> Result<()> {
        let installer = self.installer_path();

        shell::run(&format!(
            "curl -fsSL -o {} {}",
            shell::quote_path(&installer),
            shell::quote(&self.url)
        ))?;
        shell::run(&format!(
            "bash {} -b -p {}",
            shell::quote_path(&installer),
            shell::quote_path(&self.install_dir)
        ))?;

        Ok(())
    }
}
