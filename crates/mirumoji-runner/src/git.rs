use crate::error::CommandError;
use crate::executor::{CommandExecutor, CommandSpec};
use mirumoji_core::SubmoduleMode;
use std::path::Path;

/// What `git rev-parse --abbrev-ref HEAD` prints on a detached HEAD.
pub const DETACHED_HEAD: &str = "HEAD";

/// How [`GitClient::ensure`] brought the working copy up to date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The working copy did not exist and was cloned.
    Cloned,
    /// The working copy existed and `branch` was pulled.
    Updated {
        branch: String,
        recovered_detached_head: bool,
    },
}

/// Keeps a local working copy in step with its remote, parameterized over
/// the executor for testability.
pub struct GitClient<'a, E: CommandExecutor> {
    executor: &'a E,
    default_branch: String,
}

impl<'a, E: CommandExecutor> GitClient<'a, E> {
    pub fn new(executor: &'a E, default_branch: impl Into<String>) -> Self {
        Self {
            executor,
            default_branch: default_branch.into(),
        }
    }

    /// Clone `remote_url` into `local_path` if it is absent, otherwise fetch,
    /// leave a detached HEAD for the default branch, and pull. Submodules are
    /// then updated according to `submodules`.
    ///
    /// Any failing step aborts the sync; a half-finished clone or pull is
    /// left on disk for the operator to inspect.
    pub async fn ensure(
        &self,
        remote_url: &str,
        local_path: &Path,
        submodules: SubmoduleMode,
    ) -> Result<SyncOutcome, CommandError> {
        let outcome = if local_path.is_dir() {
            self.update(local_path).await?
        } else {
            println!(
                "Cloning repository: {remote_url} into {}...",
                local_path.display()
            );
            let mut clone = CommandSpec::new("git")
                .args(["clone", remote_url])
                .arg(local_path.display().to_string());
            if let Some(parent) = local_path.parent().filter(|p| p.is_dir()) {
                clone = clone.current_dir(parent);
            }
            self.executor.run(&clone).await?;
            SyncOutcome::Cloned
        };

        self.update_submodules(local_path, submodules).await?;
        println!("Repository setup complete.");
        Ok(outcome)
    }

    async fn update(&self, repo: &Path) -> Result<SyncOutcome, CommandError> {
        println!(
            "Repo {} already exists. Fetching updates...",
            repo.display()
        );
        self.executor
            .run(&git(repo).args(["fetch", "--all"]))
            .await?;

        let mut branch = self.current_branch(repo).await?;
        let recovered_detached_head = branch == DETACHED_HEAD;
        if recovered_detached_head {
            println!("Currently in a detached HEAD state.");
            println!(
                "Attempting to checkout default branch ({})...",
                self.default_branch
            );
            self.executor
                .run(&git(repo).args(["checkout", self.default_branch.as_str()]))
                .await?;
            // No fallback here: a HEAD that is still unresolvable after the
            // checkout must not turn into `git pull origin HEAD`.
            branch = self.executor.capture(&branch_query(repo)).await?;
        }

        println!("Pulling latest changes for branch '{branch}'...");
        self.executor
            .run(&git(repo).args(["pull", "origin", branch.as_str()]))
            .await?;

        Ok(SyncOutcome::Updated {
            branch,
            recovered_detached_head,
        })
    }

    /// Name of the checked-out branch, or [`DETACHED_HEAD`].
    ///
    /// A failing `rev-parse` (no commits yet, corrupted HEAD) is treated as a
    /// detached HEAD so the default-branch checkout gets a chance to fix it.
    pub async fn current_branch(&self, repo: &Path) -> Result<String, CommandError> {
        match self.executor.capture(&branch_query(repo)).await {
            Ok(branch) => Ok(branch),
            // arch-lint: allow(no-error-swallowing) reason="an unresolvable HEAD is recovered by the default-branch checkout"
            Err(err @ CommandError::Failed { .. }) => {
                tracing::warn!(error = %err, "could not resolve current branch; assuming detached HEAD");
                Ok(DETACHED_HEAD.to_owned())
            }
            Err(err) => Err(err),
        }
    }

    async fn update_submodules(
        &self,
        repo: &Path,
        mode: SubmoduleMode,
    ) -> Result<(), CommandError> {
        let Some(command) = submodule_command(repo, mode) else {
            tracing::debug!("submodule update disabled");
            return Ok(());
        };
        println!("Initializing/updating submodules...");
        self.executor.run(&command).await?;
        Ok(())
    }
}

/// The submodule update for `mode`, or `None` when submodules are disabled.
///
/// [`SubmoduleMode::Remote`] adds `--remote`, moving every submodule to the
/// tip of its tracked branch instead of the commit the superproject records.
pub fn submodule_command(repo: &Path, mode: SubmoduleMode) -> Option<CommandSpec> {
    let update = git(repo).args(["submodule", "update", "--init", "--recursive"]);
    match mode {
        SubmoduleMode::Remote => Some(update.arg("--remote")),
        SubmoduleMode::Pinned => Some(update),
        SubmoduleMode::Disabled => None,
    }
}

fn branch_query(repo: &Path) -> CommandSpec {
    git(repo).args(["rev-parse", "--abbrev-ref", "HEAD"])
}

fn git(repo: &Path) -> CommandSpec {
    CommandSpec::new("git").current_dir(repo)
}
