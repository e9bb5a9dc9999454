use super::Launcher;
use super::workdir::WorkdirGuard;
use anyhow::Context;
use mirumoji_core::run::HOST_LAN_IP;
use mirumoji_core::{Confirm, LaunchChoices, RunConfiguration, resolve, secrets};
use mirumoji_runner::{CommandExecutor, DockerClient, GitClient, LanResolver};
use std::net::Ipv4Addr;
use std::path::PathBuf;

/// What a successful launch started and where it can be reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchReport {
    pub config: RunConfiguration,
    pub compose_file: PathBuf,
    pub lan_ip: Ipv4Addr,
}

impl<E, P, L> Launcher<E, P, L>
where
    E: CommandExecutor,
    P: Confirm,
    L: LanResolver,
{
    /// Resolve the configuration, sync the working copy, optionally build the
    /// images, validate secrets and bring the services up.
    ///
    /// The process working directory is the working copy from the sync
    /// onwards and is restored before this returns, on every path.
    pub async fn launch(&mut self, choices: LaunchChoices) -> anyhow::Result<LaunchReport> {
        self.screen.header("Mirumoji Launcher");
        let config = resolve(choices, &mut self.prompter)
            .context("failed to resolve launch configuration")?;
        self.screen.clear();
        self.screen.say(format_args!("Selected: {config}"));
        tracing::info!(%config, "launch configuration resolved");

        let workdir = WorkdirGuard::capture()?;
        self.launch_in(config, &workdir).await
    }

    async fn launch_in(
        &self,
        config: RunConfiguration,
        workdir: &WorkdirGuard,
    ) -> anyhow::Result<LaunchReport> {
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

        let docker = DockerClient::new(&self.executor, self.settings.compose.project_name.as_str());
        let images = config.images_to_build()?;
        if images.is_empty() {
            println!("\nUsing pre-built images.");
        } else {
            self.screen.header("Building Docker Images");
            for image in &images {
                println!("\nBuilding {}...", image.tag);
                docker
                    .build(image, &repo)
                    .await
                    .with_context(|| format!("failed to build image {}", image.tag))?;
                println!("Built {}.", image.tag);
                tracing::info!(tag = image.tag, "image built");
            }
            self.screen.clear();
        }

        let secrets_path = self.settings.secrets_path(&self.base_dir);
        self.screen.header(format_args!("Checking {}", secrets_path.display()));
        let required = config.required_secrets()?;
        secrets::check(&required, &secrets_path)?;
        println!("Variable Configuration Passed");
        tracing::info!(path = %secrets_path.display(), "secrets validated");
        self.screen.clear();

        self.screen.header("Getting HOST IPv4");
        let lan_ip = self
            .lan
            .lan_ipv4()
            .context("the LAN address is required to report the access endpoint")?;
        secrets::export(HOST_LAN_IP, &lan_ip.to_string());
        println!("HOST IPv4 Acquired : {lan_ip}");
        self.screen.clear();

        let compose_file = config.compose_file()?;
        self.screen.header("Running Docker Compose");
        println!("Using compose file: {}", compose_file.display());
        docker
            .compose_up(compose_file, &repo)
            .await
            .context("failed to start services")?;
        tracing::info!(compose_file = %compose_file.display(), "services started");
        self.screen.clear();

        println!();
        println!("--- Accessible at ---");
        println!();
        println!("Local: 'https://localhost'");
        println!("LAN: 'https://{lan_ip}'");
        println!();
        println!("--- Launcher Stop Command ---");
        println!();
        println!("mirumoji shutdown");
        println!();
        println!("--- Docker Stop Command ---");
        println!();
        println!("{}", docker.stop_hint());
        println!();

        Ok(LaunchReport {
            config,
            compose_file: compose_file.to_path_buf(),
            lan_ip,
        })
    }
}
