//! The idempotent task runner.
//!
//! A [`Task`] is one provisioning step: a named unit with a completion probe,
//! a pre-install gate, a required install action, and a post-install hook.
//! [`run_task`] drives the lifecycle; [`Pipeline`] sequences many tasks.
//!
//! Idempotence comes from the probe: a task whose goal state already holds is
//! reported as already complete and its mutating action never runs, which
//! makes re-running a partially failed pipeline safe.

pub mod pipeline;

pub use pipeline::{Pipeline, RunReport, TaskReport, TaskSpec};

use crate::error::Result;
use crate::ui::Prompt;

/// One idempotent provisioning step.
///
/// `install` is the only method without a default: a step that cannot say how
/// to install itself does not compile. All system mutation belongs in
/// `install`; the probe must be read-only.
pub trait Task {
    /// Name shown to the operator and used in failure reports.
    fn name(&self) -> &str;

    /// Read-only probe of whether the goal state already holds.
    fn is_complete(&self) -> bool {
        false
    }

    /// Gate before installation. Returning `Ok(false)` skips the step for
    /// this run without failing it. May confirm with the operator or collect
    /// a credential.
    fn pre_install(&mut self, _prompt: &mut dyn Prompt) -> Result<bool> {
        tracing::info!("installing {}", self.name());
        Ok(true)
    }

    /// The mutating action. Failures propagate unretried and abort the run.
    fn install(&mut self) -> Result<()>;

    /// Hook after a successful installation. The boolean is not interpreted
    /// by the runner; it exists for side effects only.
    fn post_install(&mut self) -> Result<bool> {
        tracing::info!("{} installed", self.name());
        Ok(true)
    }
}

/// How a task's run terminated successfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    /// The completion probe held; nothing was touched.
    AlreadyComplete,

    /// The pre-install gate declined; nothing was installed.
    Skipped,

    /// The install action ran to completion.
    Installed,
}

impl std::fmt::Display for TaskOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TaskOutcome::AlreadyComplete => "already complete",
            TaskOutcome::Skipped => "skipped",
            TaskOutcome::Installed => "installed",
        };
        write!(f, "{}", s)
    }
}

/// Drive one task through its lifecycle.
///
/// Probe first; if the goal state holds, neither the gate nor the action
/// runs. A declined gate terminates successfully. Install failures propagate
/// to the caller, which aborts the pipeline.
pub fn run_task(task: &mut dyn Task, prompt: &mut dyn Prompt) -> Result<TaskOutcome> {
    if task.is_complete() {
        tracing::info!("{}: already complete", task.name());
        return Ok(TaskOutcome::AlreadyComplete);
    }

    if !task.pre_install(prompt)? {
        tracing::info!("{}: skipping", task.name());
        return Ok(TaskOutcome::Skipped);
    }

    task.install()?;
    task.post_install()?;

    Ok(TaskOutcome::Installed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OutfitterError;
    use crate::ui::MockPrompt;

    /// Scripted task recording which lifecycle phases ran.
    #[derive(Default)]
    struct Scripted {
        complete: bool,
        accept: bool,
        fail_install: bool,
        installs: usize,
        posts: usize,
        gates: usize,
    }

    impl Scripted {
        fn fresh() -> Self {
            Scripted {
                accept: true,
                ..Default::default()
            }
        }
    }

    impl Task for Scripted {
        fn name(&self) -> &str {
            "scripted"
        }

        fn is_complete(&self) -> bool {
            self.complete
        }

        fn pre_install(&mut self, _prompt: &mut dyn Prompt) -> Result<bool> {
            self.gates += 1;
            Ok(self.accept)
        }

        fn install(&mut self) -> Result<()> {
            self.installs += 1;
            if self.fail_install {
                return Err(OutfitterError::CommandFailed {
                    command: "make".into(),
                    code: Some(2),
                });
            }
            self.complete = true;
            Ok(())
        }

        fn post_install(&mut self) -> Result<bool> {
            self.posts += 1;
            Ok(true)
        }
    }

    #[test]
    fn fresh_task_installs() {
        let mut task = Scripted::fresh();
        let mut prompt = MockPrompt::new();

        let outcome = run_task(&mut task, &mut prompt).unwrap();

        assert_eq!(outcome, TaskOutcome::Installed);
        assert_eq!(task.installs, 1);
        assert_eq!(task.posts, 1);
    }

    #[test]
    fn complete_task_is_untouched() {
        let mut task = Scripted {
            complete: true,
            ..Scripted::fresh()
        };
        let mut prompt = MockPrompt::new();

        let outcome = run_task(&mut task, &mut prompt).unwrap();

        assert_eq!(outcome, TaskOutcome::AlreadyComplete);
        assert_eq!(task.gates, 0);
        assert_eq!(task.installs, 0);
        assert_eq!(task.posts, 0);
    }

    #[test]
    fn second_run_reports_already_complete() {
        let mut task = Scripted::fresh();
        let mut prompt = MockPrompt::new();

        assert_eq!(
            run_task(&mut task, &mut prompt).unwrap(),
            TaskOutcome::Installed
        );
        assert_eq!(
            run_task(&mut task, &mut prompt).unwrap(),
            TaskOutcome::AlreadyComplete
        );
        assert_eq!(task.installs, 1);
    }

    #[test]
    fn declined_gate_skips_without_failing() {
        let mut task = Scripted {
            accept: false,
            ..Scripted::fresh()
        };
        let mut prompt = MockPrompt::new();

        let outcome = run_task(&mut task, &mut prompt).unwrap();

        assert_eq!(outcome, TaskOutcome::Skipped);
        assert_eq!(task.installs, 0);
        assert_eq!(task.posts, 0);
    }

    #[test]
    fn install_failure_propagates_and_stops_hooks() {
        let mut task = Scripted {
            fail_install: true,
            ..Scripted::fresh()
        };
        let mut prompt = MockPrompt::new();

        let err = run_task(&mut task, &mut prompt).unwrap_err();

        assert!(matches!(err, OutfitterError::CommandFailed { .. }));
        assert_eq!(task.installs, 1);
        assert_eq!(task.posts, 0);
    }

    #[test]
    fn default_gate_accepts() {
        struct Minimal {
            installed: bool,
        }

        impl Task for Minimal {
            fn name(&self) -> &str {
                "minimal"
            }

            fn install(&mut self) -> Result<()> {
                self.installed = true;
                Ok(())
            }
        }

        let mut task = Minimal { installed: false };
        let mut prompt = MockPrompt::new();

        let outcome = run_task(&mut task, &mut prompt).unwrap();

        assert_eq!(outcome, TaskOutcome::Installed);
        assert!(task.installed);
    }

    #[test]
    fn outcome_display() {
        assert_eq!(TaskOutcome::AlreadyComplete.to_string(), "already complete");
        assert_eq!(TaskOutcome::Skipped.to_string(), "skipped");
        assert_eq!(TaskOutcome::Installed.to_string(), "installed");
    }
}
