use crate::error::CommandError;
use crate::executor::{CommandExecutor, CommandSpec};
use mirumoji_core::ImageSpec;
use std::path::Path;

/// Docker image builds and Compose lifecycle, parameterized over the
/// executor for testability.
pub struct DockerClient<'a, E: CommandExecutor> {
    executor: &'a E,
    project_name: String,
}

impl<'a, E: CommandExecutor> DockerClient<'a, E> {
    pub fn new(executor: &'a E, project_name: impl Into<String>) -> Self {
        Self {
            executor,
            project_name: project_name.into(),
        }
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    /// `docker build -t <tag> -f <dockerfile> <context>`, paths relative to `workdir`.
    pub async fn build(&self, image: &ImageSpec, workdir: &Path) -> Result<(), CommandError> {
        self.executor
            .run(&build_command(image, workdir))
            .await?;
        Ok(())
    }

    /// Start the services of `compose_file` detached under the project name.
    pub async fn compose_up(&self, compose_file: &Path, workdir: &Path) -> Result<(), CommandError> {
        self.executor
            .run(&self.up_command(compose_file, workdir))
            .await?;
        Ok(())
    }

    /// Stop the services started under the project name, optionally
    /// deleting their volumes.
    pub async fn compose_down(
        &self,
        delete_volumes: bool,
        workdir: &Path,
    ) -> Result<(), CommandError> {
        self.executor
            .run(&self.down_command(delete_volumes, workdir))
            .await?;
        Ok(())
    }

    pub fn up_command(&self, compose_file: &Path, workdir: &Path) -> CommandSpec {
        CommandSpec::new("docker")
            .args(["compose", "-f"])
            .arg(compose_file.display().to_string())
            .args(["-p", self.project_name.as_str(), "up", "-d"])
            .current_dir(workdir)
    }

    pub fn down_command(&self, delete_volumes: bool, workdir: &Path) -> CommandSpec {
        let down = CommandSpec::new("docker")
            .args(["compose", "-p", self.project_name.as_str(), "down"])
            .current_dir(workdir);
        if delete_volumes { down.arg("-v") } else { down }
    }

    /// The command an operator can run by hand to stop the deployment.
    pub fn stop_hint(&self) -> String {
        format!("docker compose -p {} down", self.project_name)
    }
}

pub fn build_command(image: &ImageSpec, workdir: &Path) -> CommandSpec {
    CommandSpec::new("docker")
        .args([
            "build",
            "-t",
            image.tag,
            "-f",
            image.dockerfile,
            image.context,
        ])
        .current_dir(workdir)
}
