use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// File name of the optional launcher settings, looked up in the invocation directory.
pub const CONFIG_FILE_NAME: &str = "mirumoji.toml";

/// mirumoji.toml configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LauncherConfig {
    #[serde(default)]
    pub repository: RepositoryConfig,
    #[serde(default)]
    pub compose: ComposeConfig,
    #[serde(default)]
    pub secrets: SecretsConfig,
    #[serde(default)]
    pub network: NetworkConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryConfig {
    /// Remote the working copy is cloned from
    #[serde(default = "default_repo_url")]
    pub url: String,
    /// Working copy location, relative to the invocation directory
    #[serde(default = "default_repo_directory")]
    pub directory: PathBuf,
    /// Branch checked out when the working copy is on a detached HEAD
    #[serde(default = "default_branch")]
    pub default_branch: String,
    /// How submodules are brought up to date after a sync
    #[serde(default)]
    pub submodules: SubmoduleMode,
}

/// Submodule handling after the superproject is synchronized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmoduleMode {
    /// `git submodule update --init --recursive --remote`: submodules follow
    /// their upstream tip, so their content can change between runs without
    /// a superproject commit.
    #[default]
    Remote,
    /// Submodules stay on the commit recorded in the superproject.
    Pinned,
    /// Submodules are left alone.
    Disabled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposeConfig {
    /// Compose project name shared by `launch` and `shutdown`
    #[serde(default = "default_project_name")]
    pub project_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecretsConfig {
    /// Secrets file, relative to the invocation directory
    #[serde(default = "default_secrets_file")]
    pub file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Public address a throwaway UDP socket is connected to in order to
    /// learn the outbound LAN address. No packet is sent.
    #[serde(default = "default_probe_address")]
    pub probe_address: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            url: default_repo_url(),
            directory: default_repo_directory(),
            default_branch: default_branch(),
            submodules: SubmoduleMode::default(),
        }
    }
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            project_name: default_project_name(),
        }
    }
}

impl Default for SecretsConfig {
    fn default() -> Self {
        Self {
            file: default_secrets_file(),
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            probe_address: default_probe_address(),
        }
    }
}

impl LauncherConfig {
    /// Load from mirumoji.toml in the given directory, or return defaults if not found.
    pub fn load(base_dir: &Path) -> crate::Result<Self> {
        let config_path = base_dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            let content =
                std::fs::read_to_string(&config_path).map_err(|e| crate::Error::ConfigLoad {
                    path: config_path.clone(),
                    source: e,
                })?;
            toml::from_str(&content).map_err(|e| crate::Error::ConfigParse {
                path: config_path,
                source: e,
            })
        } else {
            Ok(Self::default())
        }
    }

    /// Absolute location of the working copy.
    pub fn repo_path(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.repository.directory)
    }

    /// Absolute location of the secrets file.
    pub fn secrets_path(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.secrets.file)
    }
}

fn default_repo_url() -> String {
    "https://github.com/svdC1/mirumoji.git".to_owned()
}

fn default_repo_directory() -> PathBuf {
    PathBuf::from("mirumoji_workspace")
}

fn default_branch() -> String {
    "main".to_owned()
}

fn default_project_name() -> String {
    "mirumoji".to_owned()
}

fn default_secrets_file() -> PathBuf {
    PathBuf::from(".env")
}

fn default_probe_address() -> String {
    "8.8.8.8:80".to_owned()
}
