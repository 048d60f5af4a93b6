//! Scoped working-directory change.
//!
//! The current working directory is process-wide mutable state. Only this
//! module may change it, and the previous directory is always restored before
//! control returns to the pipeline, including when the body fails.

use std::env;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Guard that restores the previous working directory on drop.
pub struct DirGuard {
    previous: PathBuf,
}

impl DirGuard {
    /// Record the current directory and switch to `path`.
    pub fn change(path: &Path) -> Result<Self> {
        let previous = env::current_dir()?;
        env::set_current_dir(path)?;
        tracing::debug!("cd {}", path.display());
        Ok(Self { previous })
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        if let Err(e) = env::set_current_dir(&self.previous) {
            tracing::warn!(
                "failed to restore working directory {}: {}",
                self.previous.display(),
                e
            );
        }
    }
}

/// Run `body` with the working directory switched to `path`.
///
/// Restoration happens unconditionally, whether `body` returns `Ok` or `Err`.
pub fn with_dir<T>(path: &Path, body: impl FnOnce() -> Result<T>) -> Result<T> {
    let _guard = DirGuard::change(path)?;
    body()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OutfitterError;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // The working directory is shared across the whole test process.
    static CWD_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn with_dir_switches_and_restores() {
        let _lock = CWD_LOCK.lock().unwrap();
        let temp = TempDir::new().unwrap();
        let before = env::current_dir().unwrap();

        let seen = with_dir(temp.path(), || Ok(env::current_dir()?)).unwrap();

        assert_eq!(seen.canonicalize().unwrap(), temp.path().canonicalize().unwrap());
        assert_eq!(env::current_dir().unwrap(), before);
    }

    #[test]
    fn with_dir_restores_on_failure() {
        let _lock = CWD_LOCK.lock().unwrap();
        let temp = TempDir::new().unwrap();
        let before = env::current_dir().unwrap();

        let result: Result<()> = with_dir(temp.path(), || {
            Err(OutfitterError::CommandFailed {
                command: "make".into(),
                code: Some(2),
            })
        });

        assert!(result.is_err());
        assert_eq!(env::current_dir().unwrap(), before);
    }

    #[test]
    fn with_dir_fails_on_missing_path() {
        let _lock = CWD_LOCK.lock().unwrap();
        let before = env::current_dir().unwrap();

        let result: Result<()> = with_dir(Path::new("/nonexistent/build/dir"), || Ok(()));

        assert!(result.is_err());
        assert_eq!(env::current_dir().unwrap(), before);
    }

    #[test]
    fn with_dir_nests() {
        let _lock = CWD_LOCK.lock().unwrap();
        let outer = TempDir::new().unwrap();
        let inner = outer.path().join("inner");
        std::fs::create_dir(&inner).unwrap();
        let before = env::current_dir().unwrap();

        with_dir(outer.path(), || {
            with_dir(Path::new("inner"), || {
                assert_eq!(
                    env::current_dir()?.canonicalize()?,
                    inner.canonicalize()?
                );
                Ok(())
            })?;
            assert_eq!(
                env::current_dir()?.canonicalize()?,
                outer.path().canonicalize()?
            );
            Ok(())
        })
        .unwrap();

        assert_eq!(env::current_dir().unwrap(), before);
    }
}
