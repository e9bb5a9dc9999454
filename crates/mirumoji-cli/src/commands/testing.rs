//! Shared fixtures for the orchestrator tests.

use super::{Launcher, Screen};
use mirumoji_core::{Confirm, LauncherConfig};
use mirumoji_runner::{CommandError, CommandExecutor, CommandSpec, LanResolver, NetError};
use mockall::mock;
use std::collections::VecDeque;
use std::net::Ipv4Addr;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tempfile::TempDir;

mock! {
    pub Executor {}

    impl CommandExecutor for Executor {
        async fn run(&self, command: &CommandSpec) -> Result<i32, CommandError>;
        async fn capture(&self, command: &CommandSpec) -> Result<String, CommandError>;
    }
}

pub(crate) const LAN_IP: Ipv4Addr = Ipv4Addr::new(192, 168, 1, 23);

/// Tests that touch the process working directory take this first.
pub(crate) fn cwd_lock() -> MutexGuard<'static, ()> {
    static LOCK: Mutex<()> = Mutex::new(());
    LOCK.lock()
        // arch-lint: allow(no-silent-result-drop) reason="a test that panicked while holding the lock must not fail every later test"
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// An invocation directory with an existing working copy and, optionally,
/// a `.env` file.
pub(crate) fn fixture(secrets: Option<&str>) -> TempDir {
    let tmp = TempDir::new().unwrap();
    std::fs::create_dir(tmp.path().join("mirumoji_workspace")).unwrap();
    if let Some(content) = secrets {
        std::fs::write(tmp.path().join(".env"), content).unwrap();
    }
    tmp
}

pub(crate) fn launcher<P: Confirm>(
    mock: MockExecutor,
    prompter: P,
    base_dir: &Path,
) -> Launcher<MockExecutor, P, FixedLan> {
    Launcher::new(
        mock,
        prompter,
        FixedLan,
        LauncherConfig::default(),
        base_dir.to_path_buf(),
        Screen::disabled(),
    )
}

/// Expectations for syncing an existing working copy on `main`.
pub(crate) fn sync_expectations(mock: &mut MockExecutor) {
    mock.expect_run()
        .withf(|cmd| cmd.program == "git" && cmd.args_line() == "fetch --all")
        .times(1)
        .returning(|_| Ok(0));
    mock.expect_capture()
        .withf(|cmd| cmd.program == "git" && cmd.has_arg("rev-parse"))
        .times(1)
        .returning(|_| Ok("main".to_owned()));
    mock.expect_run()
        .withf(|cmd| cmd.program == "git" && cmd.args_line() == "pull origin main")
        .times(1)
        .returning(|_| Ok(0));
    mock.expect_run()
        .withf(|cmd| {
            cmd.program == "git" && cmd.args_line() == "submodule update --init --recursive --remote"
        })
        .times(1)
        .returning(|_| Ok(0));
}

pub(crate) struct FixedLan;

impl LanResolver for FixedLan {
    fn lan_ipv4(&self) -> Result<Ipv4Addr, NetError> {
        Ok(LAN_IP)
    }
}

/// Fails every prompt, like a non-interactive stdin.
pub(crate) struct NoTerminal;

impl Confirm for NoTerminal {
    fn confirm(&mut self, question: &str, _default: bool) -> mirumoji_core::Result<bool> {
        Err(mirumoji_core::Error::Configuration {
            detail: format!("cannot ask \"{question}\": not a terminal"),
        })
    }
}

/// Answers prompts from a fixed script.
pub(crate) struct Scripted(VecDeque<bool>);

impl Scripted {
    pub(crate) fn new(answers: &[bool]) -> Self {
        Self(answers.iter().copied().collect())
    }
}

impl Confirm for Scripted {
    fn confirm(&mut self, question: &str, _default: bool) -> mirumoji_core::Result<bool> {
        self.0
            .pop_front()
            .ok_or_else(|| mirumoji_core::Error::Configuration {
                detail: format!("unexpected prompt: {question}"),
            })
    }
}
