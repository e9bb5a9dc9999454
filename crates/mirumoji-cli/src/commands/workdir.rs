use anyhow::Context;
use std::path::{Path, PathBuf};

/// Remembers the process working directory and restores it when dropped,
/// whether the operation succeeded, failed or panicked.
pub(crate) struct WorkdirGuard {
    original: PathBuf,
}

impl WorkdirGuard {
    pub(crate) fn capture() -> anyhow::Result<Self> {
        let original =
            std::env::current_dir().context("failed to read the current working directory")?;
        Ok(Self { original })
    }

    pub(crate) fn enter(&self, dir: &Path) -> anyhow::Result<()> {
        std::env::set_current_dir(dir)
            .with_context(|| format!("failed to change directory to {}", dir.display()))?;
        println!("Changed working directory to: {}", dir.display());
        Ok(())
    }
}

impl Drop for WorkdirGuard {
    fn drop(&mut self) {
        match std::env::set_current_dir(&self.original) {
            Ok(()) => println!(
                "Returned to original working directory: {}",
                self.original.display()
            ),
            // arch-lint: allow(no-error-swallowing) reason="Drop cannot propagate; the failure is reported to the operator"
            Err(e) => {
                tracing::error!(error = %e, dir = %self.original.display(), "failed to restore working directory");
                eprintln!(
                    "Error: could not return to {}: {e}",
                    self.original.display()
                );
            }
        }
    }
}
