use crate::error::CommandError;
use std::fmt;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::Stdio;

/// Exit code reported when a child was terminated without one (by a signal).
pub const NO_EXIT_CODE: i32 = -1;

/// An external command to run: program, arguments, working directory and
/// whether a non-zero exit is an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    pub must_succeed: bool,
    shell: bool,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            must_succeed: true,
            shell: false,
        }
    }

    /// A command line interpreted by `sh -c`.
    pub fn shell(script: impl Into<String>) -> Self {
        let mut spec = Self::new("sh").args(["-c".to_owned(), script.into()]);
        spec.shell = true;
        spec
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Report a non-zero exit through the returned code instead of an error.
    pub fn allow_failure(mut self) -> Self {
        self.must_succeed = false;
        self
    }

    pub fn has_arg(&self, arg: &str) -> bool {
        self.args.iter().any(|a| a == arg)
    }

    /// Arguments that follow `program`, joined with spaces.
    pub fn args_line(&self) -> String {
        self.args.join(" ")
    }

    fn to_command(&self) -> tokio::process::Command {
        let mut cmd = tokio::process::Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }
        cmd
    }

    fn spawn_error(&self, source: io::Error) -> CommandError {
        CommandError::from_spawn(&self.program, self.to_string(), source)
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.shell {
            if let Some(script) = self.args.last() {
                return f.write_str(script);
            }
        }
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Abstraction over subprocess execution for testability.
///
/// Production code uses [`RealExecutor`], tests use mockall-generated mocks.
#[allow(async_fn_in_trait)]
pub trait CommandExecutor: Send + Sync {
    /// Run a command, echoing its merged stdout/stderr line by line as it is
    /// produced. Returns the exit code once all output has been relayed.
    async fn run(&self, command: &CommandSpec) -> Result<i32, CommandError>;

    /// Run a command quietly and return its trimmed stdout.
    async fn capture(&self, command: &CommandSpec) -> Result<String, CommandError>;
}

/// Executor backed by real child processes.
pub struct RealExecutor;

impl CommandExecutor for RealExecutor {
    async fn run(&self, command: &CommandSpec) -> Result<i32, CommandError> {
        let command_line = command.to_string();
        println!("CWD: {}", describe_dir(command.cwd.as_deref()));
        println!("Running command: '{command_line}'");
        tracing::debug!(program = %command.program, args = ?command.args, "spawning");

        let (mut child, output) = spawn_merged(command)?;

        let relay =
            tokio::task::spawn_blocking(move || relay_lines(BufReader::new(output), echo_line));
        let relayed = match relay.await {
            Ok(result) => result,
            Err(join_err) => Err(io::Error::other(join_err)),
        };
        if let Err(source) = relayed {
            // arch-lint: allow(no-error-swallowing) reason="the relay error is the one reported; a failed kill is only logged"
            if let Err(kill_err) = child.kill().await {
                tracing::warn!(error = %kill_err, command = %command_line, "failed to kill child after output error");
            }
            return Err(CommandError::Stream {
                command: command_line,
                source,
            });
        }

        let status = child.wait().await.map_err(|source| CommandError::Stream {
            command: command_line.clone(),
            source,
        })?;
        tracing::debug!(command = %command_line, %status, "child exited");

        if command.must_succeed && !status.success() {
            return Err(CommandError::Failed {
                command: command_line,
                code: status.code(),
            });
        }
        let code = status
            .code()
            // arch-lint: allow(no-silent-result-drop) reason="a signal-terminated child has no exit code; allow_failure callers get a sentinel"
            .unwrap_or(NO_EXIT_CODE);
        Ok(code)
    }

    async fn capture(&self, command: &CommandSpec) -> Result<String, CommandError> {
        let output = command
            .to_command()
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| command.spawn_error(e))?;

        if command.must_succeed && !output.status.success() {
            tracing::debug!(
                command = %command,
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "captured command failed"
            );
            return Err(CommandError::Failed {
                command: command.to_string(),
                code: output.status.code(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_owned())
    }
}

/// Spawn `command` with stdout and stderr sharing one pipe, so the returned
/// reader yields the child's output in the order it was written.
///
/// The parent's copies of the write end are closed before returning; the
/// reader hits EOF once the child (and anything it forked) has exited.
pub(crate) fn spawn_merged(
    command: &CommandSpec,
) -> Result<(tokio::process::Child, io::PipeReader), CommandError> {
    let launch_err = |source| CommandError::Launch {
        command: command.to_string(),
        source,
    };
    let (reader, writer) = io::pipe().map_err(launch_err)?;
    let stderr_writer = writer.try_clone().map_err(launch_err)?;

    let mut cmd = command.to_command();
    cmd.stdout(Stdio::from(writer))
        .stderr(Stdio::from(stderr_writer));
    let spawned = cmd.spawn();
    drop(cmd);

    let child = spawned.map_err(|e| command.spawn_error(e))?;
    Ok((child, reader))
}

fn describe_dir(dir: Option<&Path>) -> String {
    match dir {
        Some(dir) => dir.display().to_string(),
        None => match std::env::current_dir() {
            Ok(dir) => dir.display().to_string(),
            Err(e) => format!("<unavailable: {e}>"),
        },
    }
}

fn echo_line(line: &str) {
    if !line.is_empty() {
        println!("  ↪ {line}");
    }
}

/// Feed `reader` to `sink` one line at a time as lines become available.
///
/// Invalid UTF-8 is replaced instead of failing; trailing `\r\n`/`\n` is
/// stripped. Returns at EOF.
pub(crate) fn relay_lines<R: BufRead>(
    mut reader: R,
    mut sink: impl FnMut(&str),
) -> io::Result<()> {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(());
        }
        let line = String::from_utf8_lossy(&buf);
        sink(line.trim_end_matches(['\r', '\n']));
    }
}
