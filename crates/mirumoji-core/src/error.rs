use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to load config from {path}")]
    ConfigLoad {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config at {path}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    // ── Secrets file ──
    #[error(
        "secrets file not found at {path}; create it with the variables: {}",
        required.join(", ")
    )]
    SecretsFileMissing {
        path: PathBuf,
        required: Vec<String>,
    },

    #[error("failed to parse secrets file at {path}")]
    SecretsParse {
        path: PathBuf,
        source: dotenvy::Error,
    },

    #[error(
        "missing or empty variables in {path}: {}",
        names.join(", ")
    )]
    MissingVariables { path: PathBuf, names: Vec<String> },

    // ── Run configuration ──
    #[error("configuration error: {detail}")]
    Configuration { detail: String },
}
