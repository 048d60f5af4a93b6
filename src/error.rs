//! Error types for Outfitter operations.
//!
//! This module defines [`OutfitterError`], the primary error type used
//! throughout the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `OutfitterError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `OutfitterError::Other`) for unexpected errors
//! - No local recovery, no retry: every failure surfaces by aborting the run
//!   with the failing task and command visible to the operator

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for Outfitter operations.
#[derive(Debug, Error)]
pub enum OutfitterError {
    /// External command exited with a nonzero status.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// Command string could not be tokenized (unbalanced quoting).
    #[error("Cannot parse command: {command}")]
    CommandParse { command: String },

    /// External command could not be started at all.
    #[error("Cannot run command '{command}': {source}")]
    CommandSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Manifest file not found at expected location.
    #[error("Manifest not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse manifest file.
    #[error("Failed to parse manifest at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// No compiled-dependency descriptor with this name in the manifest.
    #[error("No compiled dependency named '{name}' in manifest")]
    MissingDependency { name: String },

    /// A task aborted the pipeline.
    #[error("Task '{task}' failed: {source}")]
    TaskFailed {
        task: String,
        #[source]
        source: Box<OutfitterError>,
    },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl OutfitterError {
    /// Exit code to report to the calling shell.
    ///
    /// A failed external command propagates the child's own exit code;
    /// everything else maps to 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            OutfitterError::CommandFailed { code, .. } => code.unwrap_or(1),
            OutfitterError::TaskFailed { source, .. } => source.exit_code(),
            _ => 1,
        }
    }
}

/// Result type alias for Outfitter operations.
pub type Result<T> = std::result::Result<T, OutfitterError>;
