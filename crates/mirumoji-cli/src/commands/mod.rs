mod launch;
mod prompt;
mod screen;
mod shutdown;
mod workdir;

#[cfg(test)]
mod testing;

use mirumoji_core::{Confirm, LauncherConfig};
use mirumoji_runner::{CommandError, CommandExecutor, LanResolver};
use std::path::PathBuf;

pub use prompt::StdinPrompter;
pub use screen::Screen;

/// Deployment orchestrator behind `mirumoji launch` and `mirumoji shutdown`.
///
/// Generic over its collaborators so both workflows can run against mocks.
/// `base_dir` is the directory the launcher was invoked from: the working
/// copy, `mirumoji.toml` and the secrets file are all located relative to it.
pub struct Launcher<E, P, L> {
    executor: E,
    prompter: P,
    lan: L,
    settings: LauncherConfig,
    base_dir: PathBuf,
    screen: Screen,
}

impl<E, P, L> Launcher<E, P, L>
where
    E: CommandExecutor,
    P: Confirm,
    L: LanResolver,
{
    pub fn new(
        executor: E,
        prompter: P,
        lan: L,
        settings: LauncherConfig,
        base_dir: PathBuf,
        screen: Screen,
    ) -> Self {
        Self {
            executor,
            prompter,
            lan,
            settings,
            base_dir,
            screen,
        }
    }

    fn repo_path(&self) -> PathBuf {
        self.settings.repo_path(&self.base_dir)
    }
}

/// Process exit code for a failed operation: a failing child's own exit code
/// when there is one, 1 otherwise.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<CommandError>())
        .map_or(1, CommandError::exit_code)
}
