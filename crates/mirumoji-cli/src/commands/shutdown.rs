use super::Launcher;
use super::workdir::WorkdirGuard;
use anyhow::Context;
use mirumoji_core::resolve::VOLUMES_QUESTION;
use mirumoji_core::{Confirm, decide};
use mirumoji_runner::{CommandExecutor, DockerClient, GitClient, LanResolver};

impl<E, P, L> Launcher<E, P, L>
where
    E: CommandExecutor,
    P: Confirm,
    L: LanResolver,
{
    /// Sync the working copy and stop everything started under the compose
    /// project name, deleting volumes when asked to.
    pub async fn shutdown(&mut self, delete_volumes: Option<bool>) -> anyhow::Result<()> {
        self.screen.header("Mirumoji Launcher");
        let workdir = WorkdirGuard::capture()?;
        let repo = self.repo_path();
        let repository = &self.settings.repository;

        self.screen.header("Repository");
        GitClient::new(&self.executor, repository.default_branch.as_str())
            .ensure(&repository.url, &repo, repository.submodules)
            .await
            .context("failed to synchronize the working copy")?;
        tracing::info!(repo = %repo.display(), "working copy synchronized");
        workdir.enter(&repo)?;
        self.screen.clear();

        let delete_volumes = decide(delete_volumes, &mut self.prompter, VOLUMES_QUESTION, false)
            .context("failed to resolve shutdown options")?;
        self.screen.clear();

        self.screen.header("Stopping Services");
        DockerClient::new(&self.executor, self.settings.compose.project_name.as_str())
            .compose_down(delete_volumes, &repo)
            .await
            .context("failed to stop services")?;
        tracing::info!(delete_volumes, "services stopped");
        self.screen.clear();

        println!("All Services Stopped.");
        Ok(())
    }
}
