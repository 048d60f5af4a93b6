//! Concrete provisioning tasks.
//!
//! Each module holds one step of the standard pipeline. The tasks are
//! configuration data plugged into the runner in `crate::task`; they read the
//! shared manifest at construction, probe the system read-only, and mutate it
//! only through the shell boundary.

pub mod compile;
pub mod data;
pub mod packages;
pub mod runtime;
pub mod toolset;

pub use compile::CompileDep;
pub use data::FetchData;
pub use packages::{CondaPackages, PipPackages};
pub use runtime::InstallRuntime;
pub use toolset::CloneToolset;

use crate::task::Pipeline;

/// The standard provisioning pipeline.
///
/// Order is the dependency order: the runtime before its packages, compiled
/// libraries before the toolset that links against them, data last so a
/// declined download never blocks the toolchain itself.
pub fn standard_pipeline() -> Pipeline {
    Pipeline::new()
        .task("install-runtime", InstallRuntime::spec)
        .task("conda-packages", CondaPackages::spec)
        .task("pip-packages", PipPackages::spec)
        .task("compile:cfitsio", |config| CompileDep::spec("cfitsio", config))
        .task("compile:wcslib", |config| CompileDep::spec("wcslib", config))
        .task("clone-toolset", CloneToolset::spec)
        .task("data-fixtures", FetchData::spec)
}
