use mirumoji_runner::error::CommandError;
use mirumoji_runner::executor::{CommandExecutor, CommandSpec, RealExecutor};
use tempfile::TempDir;

#[tokio::test]
async fn successful_command_returns_zero() {
    let code = RealExecutor
        .run(&CommandSpec::shell("echo streamed; echo to-stderr >&2"))
        .await
        .unwrap();
    assert_eq!(code, 0);
}

#[tokio::test]
async fn non_zero_exit_is_command_failed() {
    let result = RealExecutor
        .run(&CommandSpec::shell("echo before failing; exit 17"))
        .await;

    match result {
        Err(CommandError::Failed { command, code }) => {
            assert_eq!(command, "echo before failing; exit 17");
            assert_eq!(code, Some(17));
        }
        other => panic!("expected Failed, got {other:?}"),
    }
}

#[tokio::test]
async fn allow_failure_reports_code() {
    let code = RealExecutor
        .run(&CommandSpec::shell("exit 3").allow_failure())
        .await
        .unwrap();
    assert_eq!(code, 3);
}

#[tokio::test]
async fn missing_executable_is_distinct() {
    let result = RealExecutor
        .run(&CommandSpec::new("nonexistent_command_12345").arg("--version"))
        .await;

    assert!(matches!(
        result,
        Err(CommandError::ExecutableNotFound { ref name }) if name == "nonexistent_command_12345"
    ));
}

#[tokio::test]
async fn runs_in_requested_directory() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("marker.txt"), "here").unwrap();

    let listing = RealExecutor
        .capture(&CommandSpec::new("ls").current_dir(tmp.path()))
        .await
        .unwrap();
    assert_eq!(listing, "marker.txt");
}

#[tokio::test]
async fn capture_trims_output() {
    let out = RealExecutor
        .capture(&CommandSpec::shell("printf '  feature/x \\n'"))
        .await
        .unwrap();
    assert_eq!(out, "feature/x");
}

#[tokio::test]
async fn capture_failure_carries_code() {
    let result = RealExecutor.capture(&CommandSpec::shell("exit 5")).await;
    assert!(matches!(
        result,
        Err(CommandError::Failed { code: Some(5), .. })
    ));
}
