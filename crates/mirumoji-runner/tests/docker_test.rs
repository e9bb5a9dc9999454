use mirumoji_core::run::FRONTEND_IMAGE;
use mirumoji_core::Backend;
use mirumoji_runner::docker::DockerClient;
use mirumoji_runner::error::CommandError;
use mirumoji_runner::executor::{CommandExecutor, CommandSpec};
use mockall::mock;
use std::path::Path;

mock! {
    Executor {}

    impl CommandExecutor for Executor {
        async fn run(&self, command: &CommandSpec) -> Result<i32, CommandError>;
        async fn capture(&self, command: &CommandSpec) -> Result<String, CommandError>;
    }
}

#[tokio::test]
async fn build_runs_in_working_copy() {
    let mut mock = MockExecutor::new();

    mock.expect_run()
        .withf(|cmd| {
            cmd.program == "docker"
                && cmd.args_line()
                    == "build -t mirumoji_backend_cpu_local:latest -f apps/backend/Dockerfile.cpu apps/backend"
                && cmd.cwd.as_deref() == Some(Path::new("/ws"))
        })
        .times(1)
        .returning(|_| Ok(0));

    let docker = DockerClient::new(&mock, "mirumoji");
    docker
        .build(&Backend::Cpu.image().unwrap(), Path::new("/ws"))
        .await
        .unwrap();
}

#[tokio::test]
async fn build_failure_propagates_exit_code() {
    let mut mock = MockExecutor::new();

    mock.expect_run().times(1).returning(|cmd| {
        Err(CommandError::Failed {
            command: cmd.to_string(),
            code: Some(2),
        })
    });

    let docker = DockerClient::new(&mock, "mirumoji");
    let err = docker
        .build(&FRONTEND_IMAGE, Path::new("/ws"))
        .await
        .unwrap_err();

    assert_eq!(err.exit_code(), 2);
    assert!(err.to_string().contains("docker build"));
}

#[tokio::test]
async fn compose_up_uses_project_name() {
    let mut mock = MockExecutor::new();

    mock.expect_run()
        .withf(|cmd| {
            cmd.args_line() == "compose -f compose/docker-compose.gpu.yaml -p demo up -d"
        })
        .times(1)
        .returning(|_| Ok(0));

    let docker = DockerClient::new(&mock, "demo");
    docker
        .compose_up(Path::new("compose/docker-compose.gpu.yaml"), Path::new("/ws"))
        .await
        .unwrap();
}

#[tokio::test]
async fn compose_down_with_volumes() {
    let mut mock = MockExecutor::new();

    mock.expect_run()
        .withf(|cmd| cmd.args_line() == "compose -p mirumoji down -v")
        .times(1)
        .returning(|_| Ok(0));

    let docker = DockerClient::new(&mock, "mirumoji");
    docker.compose_down(true, Path::new("/ws")).await.unwrap();
}
