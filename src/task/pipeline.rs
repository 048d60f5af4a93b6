//! The provisioning pipeline.
//!
//! A [`Pipeline`] is an ordered list of [`TaskSpec`]s, each a factory from
//! the shared manifest to a ready-to-run task. Tasks are constructed fresh
//! for every run, all of them before any runs, so a missing manifest key
//! fails before anything touches the system. Execution is strictly
//! sequential and aborts on the first failure; later steps assume earlier
//! steps' artifacts exist.

use crate::config::Config;
use crate::error::{OutfitterError, Result};
use crate::task::{run_task, Task, TaskOutcome};
use crate::ui::Prompt;

/// Factory yielding a task bound to the shared manifest.
pub type TaskFactory = Box<dyn Fn(&Config) -> Result<Box<dyn Task>>>;

/// A named task specification.
pub struct TaskSpec {
    name: String,
    factory: TaskFactory,
}

impl TaskSpec {
    pub fn new<F>(name: &str, factory: F) -> Self
    where
        F: Fn(&Config) -> Result<Box<dyn Task>> + 'static,
    {
        Self {
            name: name.to_string(),
            factory: Box::new(factory),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Report of one task's outcome within a run.
#[derive(Debug)]
pub struct TaskReport {
    pub name: String,
    pub outcome: TaskOutcome,
}

/// Report of a full pipeline run.
#[derive(Debug, Default)]
pub struct RunReport {
    outcomes: Vec<TaskReport>,
}

impl RunReport {
    fn record(&mut self, name: &str, outcome: TaskOutcome) {
        self.outcomes.push(TaskReport {
            name: name.to_string(),
            outcome,
        });
    }

    pub fn outcomes(&self) -> &[TaskReport] {
        &self.outcomes
    }

    fn count(&self, outcome: TaskOutcome) -> usize {
        self.outcomes.iter().filter(|r| r.outcome == outcome).count()
    }

    pub fn installed(&self) -> usize {
        self.count(TaskOutcome::Installed)
    }

    pub fn skipped(&self) -> usize {
        self.count(TaskOutcome::Skipped)
    }

    pub fn already_complete(&self) -> usize {
        self.count(TaskOutcome::AlreadyComplete)
    }

    /// One-line summary for the operator.
    pub fn summary(&self) -> String {
        format!(
            "{} installed, {} skipped, {} already complete",
            self.installed(),
            self.skipped(),
            self.already_complete()
        )
    }
}

/// An ordered sequence of task specifications.
///
/// The order is the dependency order; it is declared, not inferred.
#[derive(Default)]
pub struct Pipeline {
    specs: Vec<TaskSpec>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a task specification.
    pub fn task<F>(mut self, name: &str, factory: F) -> Self
    where
        F: Fn(&Config) -> Result<Box<dyn Task>> + 'static,
    {
        self.specs.push(TaskSpec::new(name, factory));
        self
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Construct every task against `config`, then run them in order.
    ///
    /// Construction errors and run errors are both wrapped with the task's
    /// name so the operator sees which step aborted the run.
    pub fn run(&self, config: &Config, prompt: &mut dyn Prompt) -> Result<RunReport> {
        let mut tasks: Vec<(&str, Box<dyn Task>)> = Vec::with_capacity(self.specs.len());
        for spec in &self.specs {
            let task = (spec.factory)(config).map_err(|e| fail(spec.name(), e))?;
            tasks.push((spec.name(), task));
        }

        let mut report = RunReport::default();
        for (name, mut task) in tasks {
            tracing::info!("task: {}", name);
            let outcome = run_task(task.as_mut(), prompt).map_err(|e| fail(name, e))?;
            report.record(name, outcome);
        }

        Ok(report)
    }
}

fn fail(task: &str, source: OutfitterError) -> OutfitterError {
    OutfitterError::TaskFailed {
        task: task.to_string(),
        source: Box::new(source),
    }
}
