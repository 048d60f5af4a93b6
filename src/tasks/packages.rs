//! Package-set installation into the runtime.
//!
//! Two tasks share the same shape: probe the installed set through the
//! package manager's listing command, install whatever the manifest names in
//! one batch invocation. The package managers are treated as opaque
//! synchronous commands; their own resolution output streams straight to the
//! operator's terminal.

use std::path::PathBuf;

use crate::config::Config;
use crate::error::Result;
use crate::shell;
use crate::task::Task;

/// Install the conda package set.
pub struct CondaPackages {
    conda: PathBuf,
    packages: Vec<String>,
}

impl CondaPackages {
    pub fn new(config: &Config) -> Self {
        Self {
            conda: config.runtime_dir.join("bin").join("conda"),
            packages: config.conda_packages.clone(),
        }
    }

    pub fn spec(config: &Config) -> Result<Box<dyn Task>> {
        Ok(Box::new(Self::new(config)))
    }
}

impl Task for CondaPackages {
    fn name(&self) -> &str {
        "conda-packages"
    }

    fn is_complete(&self) -> bool {
        if self.packages.is_empty() {
            return true;
        }
        let Ok(listing) =
            shell::capture(&format!("{} list --export", shell::quote_path(&self.conda)))
        else {
            return false;
        };
        all_listed(&self.packages, &listing, "=", normalize_conda)
    }

    fn install(&mut self) -> Result<()> {
        shell::run(&format!(
            "{} install --yes {}",
            shell::quote_path(&self.conda),
            quoted_list(&self.packages)
        ))
    }
}

/// Install the pip package set.
pub struct PipPackages {
    pip: PathBuf,
    packages: Vec<String>,
}

impl PipPackages {
    pub fn new(config: &Config) -> Self {
        Self {
            pip: config.runtime_dir.join("bin").join("pip"),
            packages: config.pip_packages.clone(),
        }
    }

    pub fn spec(config: &Config) -> Result<Box<dyn Task>> {
        Ok(Box::new(Self::new(config)))
    }
}

impl Task for PipPackages {
    fn name(&self) -> &str {
        "pip-packages"
    }

    fn is_complete(&self) -> bool {
        if self.packages.is_empty() {
            return true;
        }
        let Ok(listing) = shell::capture(&format!(
            "{} list --format=freeze",
            shell::quote_path(&self.pip)
        )) else {
            return false;
        };
        all_listed(&self.packages, &listing, "==", normalize_pip)
    }

    fn install(&mut self) -> Result<()> {
        shell::run(&format!(
            "{} install {}",
            shell::quote_path(&self.pip),
            quoted_list(&self.packages)
        ))
    }
}

fn quoted_list(packages: &[String]) -> String {
    packages
        .iter()
        .map(|pkg| shell::quote(pkg))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Check that every wanted package has a `name<sep>version` line in a
/// listing, comparing names through `normalize`.
fn all_listed(
    packages: &[String],
    listing: &str,
    sep: &str,
    normalize: fn(&str) -> String,
) -> bool {
    let installed: Vec<String> = listing
        .lines()
        .filter_map(|line| line.split_once(sep))
        .map(|(name, _)| normalize(name))
        .collect();
    packages.iter().all(|pkg| installed.contains(&normalize(pkg)))
}

fn normalize_conda(name: &str) -> String {
    name.to_lowercase()
}

/// PEP 503 name normalization: case-insensitive, with runs of `-`, `_`,
/// and `.` comparing equal.
fn normalize_pip(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_sep = false;
    for ch in name.to_lowercase().chars() {
        if matches!(ch, '-' | '_' | '.') {
            if !prev_sep {
                out.push('-');
            }
            prev_sep = true;
        } else {
            out.push(ch);
            prev_sep = false;
        }
    }
    out
}
