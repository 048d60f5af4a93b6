//! Outfitter - interactive provisioning of a scientific computing toolchain.
//!
//! Outfitter installs a language runtime, package sets, source-compiled
//! libraries, an auxiliary toolset, and data fixtures by running a fixed,
//! ordered pipeline of idempotent tasks. Every task probes whether its goal
//! state already holds before acting, so re-running after a failure resumes
//! where the last run stopped.
//!
//! # Modules
//!
//! - [`config`] - The provisioning manifest and its loading
//! - [`error`] - Error types and result aliases
//! - [`shell`] - External command execution and the scoped directory change
//! - [`summary`] - The final environment-variable report
//! - [`task`] - The idempotent task runner and the pipeline
//! - [`tasks`] - The concrete provisioning steps
//! - [`ui`] - Operator prompts, history, and the test mock
//!
//! # Example
//!
//! ```
//! use outfitter::config::Config;
//! use outfitter::task::Pipeline;
//! use outfitter::ui::MockPrompt;
//!
//! // An empty pipeline runs cleanly against the built-in manifest.
//! let report = Pipeline::new()
//!     .run(&Config::default(), &mut MockPrompt::new())
//!     .unwrap();
//! assert_eq!(report.installed(), 0);
//! ```

pub mod config;
pub mod error;
pub mod shell;
pub mod summary;
pub mod task;
pub mod tasks;
pub mod ui;

pub use error::{OutfitterError, Result};
