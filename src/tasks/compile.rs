//! Source-compiled dependencies.

use std::env;
use std::path::{Path, PathBuf};

use crate::config::{CompiledDep as Descriptor, Config};
use crate::error::Result;
use crate::shell;
use crate::task::Task;

/// Build and install one dependency from source.
///
/// The descriptor is resolved from the manifest at construction, so a task
/// for an undeclared dependency fails before the pipeline runs anything.
/// The classic ritual: download, unpack, `./configure --prefix`, `make`,
/// `make install`, all under the scoped directory change.
#[derive(Debug)]
pub struct CompileDep {
    name: String,
    descriptor: Descriptor,
    prefix: PathBuf,
}

impl CompileDep {
    pub fn new(dep_name: &str, config: &Config) -> Result<Self> {
        let descriptor = config.compiled(dep_name)?.clone();
        Ok(Self {
            name: format!("compile:{}", dep_name),
            descriptor,
            prefix: config.prefix.clone(),
        })
    }

    pub fn spec(dep_name: &str, config: &Config) -> Result<Box<dyn Task>> {
        Ok(Box::new(Self::new(dep_name, config)?))
    }
}

impl Task for CompileDep {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_complete(&self) -> bool {
        self.descriptor.marker_path(&self.prefix).exists()
    }

    fn install(&mut self) -> Result<()> {
        let descriptor = &self.descriptor;
        let prefix = &self.prefix;

        shell::with_dir(&env::temp_dir(), || {
            shell::run(&format!("curl -fsSL -O {}", shell::quote(&descriptor.url)))?;
            shell::run(&format!("tar xf {}", shell::quote(descriptor.archive_name())))?;

            shell::with_dir(Path::new(&descriptor.unpack_dir), || {
                shell::run(&configure_command(descriptor, prefix))?;
                shell::run("make")?;
                shell::run("make install")
            })
        })
    }
}

/// Build the configure invocation, quoting the prefix and every extra
/// argument so spaced paths stay single arguments.
fn configure_command(descriptor: &Descriptor, prefix: &Path) -> String {
    let mut configure = format!(
        "./configure {}",
        shell::quote(&format!("--prefix={}", prefix.display()))
    );
    for arg in &descriptor.configure_args {
        configure.push(' ');
        configure.push_str(&shell::quote(arg));
    }
    configure
}
