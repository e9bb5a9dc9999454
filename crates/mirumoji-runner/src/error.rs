#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("command not found: {name}; ensure it is installed and in your PATH")]
    ExecutableNotFound { name: String },

    #[error("command '{command}' {}", describe_exit(*code))]
    Failed { command: String, code: Option<i32> },

    #[error("failed to launch '{command}'")]
    Launch {
        command: String,
        source: std::io::Error,
    },

    #[error("failed to read output of '{command}'")]
    Stream {
        command: String,
        source: std::io::Error,
    },
}

impl CommandError {
    /// Exit code the launcher should terminate with for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Failed {
                code: Some(code), ..
            } if *code != 0 => *code,
            _ => 1,
        }
    }

    pub(crate) fn from_spawn(program: &str, command: String, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::ExecutableNotFound {
                name: program.to_owned(),
            }
        } else {
            Self::Launch { command, source }
        }
    }
}

fn describe_exit(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("returned non-zero exit status {code}"),
        None => "was terminated by a signal".to_owned(),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NetError {
    #[error("failed to determine the host LAN IPv4 address via {probe}")]
    LookupFailed {
        probe: String,
        source: std::io::Error,
    },

    #[error("host LAN address {addr} is not IPv4")]
    NotIpv4 { addr: std::net::IpAddr },
}
