mod commands;

use anyhow::Context;
use clap::{Parser, Subcommand};
use commands::{Launcher, Screen, StdinPrompter};
use mirumoji_core::{LaunchChoices, LauncherConfig};
use mirumoji_runner::{RealExecutor, UdpProbe};

#[derive(Parser)]
#[command(
    name = "mirumoji",
    about = "Mirumoji Launcher: set up and run Mirumoji with Docker"
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sync the source tree, optionally build images, and start Mirumoji
    Launch {
        /// Build Docker images locally
        #[arg(long, conflicts_with = "pull")]
        build: bool,
        /// Pull pre-built images from a registry
        #[arg(long)]
        pull: bool,
        /// Use the GPU version of the backend (NVIDIA GPU required)
        #[arg(long, conflicts_with = "cpu")]
        gpu: bool,
        /// Use the CPU version of the backend
        #[arg(long)]
        cpu: bool,
        /// Pull images from the GitHub registry
        #[arg(long, conflicts_with = "docker_pull")]
        github_pull: bool,
        /// Pull images from Docker Hub
        #[arg(long)]
        docker_pull: bool,
        /// Do not clear the terminal after each step
        #[arg(long)]
        no_clear: bool,
    },
    /// Stop the services started by `launch`
    Shutdown {
        /// Delete Docker volumes
        #[arg(long, conflicts_with = "no_clean")]
        clean: bool,
        /// Keep Docker volumes
        #[arg(long)]
        no_clean: bool,
        /// Do not clear the terminal after each step
        #[arg(long)]
        no_clear: bool,
    },
}

/// Collapse a `--flag`/`--no-flag` pair into "yes", "no" or "ask".
fn tri_state(yes: bool, no: bool) -> Option<bool> {
    match (yes, no) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                // arch-lint: allow(no-silent-result-drop) reason="an unset or invalid RUST_LOG falls back to the default warn filter"
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err:#}");
        std::process::exit(commands::exit_code(&err));
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let base_dir =
        std::env::current_dir().context("failed to read the current working directory")?;
    let settings = LauncherConfig::load(&base_dir)?;
    let probe = UdpProbe::new(settings.network.probe_address.as_str());

    match cli.command {
        Commands::Launch {
            build,
            pull,
            gpu,
            cpu,
            github_pull,
            docker_pull,
            no_clear,
        } => {
            let choices = LaunchChoices {
                build_locally: tri_state(build, pull),
                use_gpu: tri_state(gpu, cpu),
                github_registry: tri_state(github_pull, docker_pull),
            };
            let mut launcher = Launcher::new(
                RealExecutor,
                StdinPrompter,
                probe,
                settings,
                base_dir,
                Screen::new(no_clear),
            );
            let report = launcher.launch(choices).await?;
            tracing::info!(
                config = %report.config,
                compose_file = %report.compose_file.display(),
                lan_ip = %report.lan_ip,
                "launch complete"
            );
        }
        Commands::Shutdown {
            clean,
            no_clean,
            no_clear,
        } => {
            let mut launcher = Launcher::new(
                RealExecutor,
                StdinPrompter,
                probe,
                settings,
                base_dir,
                Screen::new(no_clear),
            );
            launcher.shutdown(tri_state(clean, no_clean)).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tri_state_maps_flag_pairs() {
        assert_eq!(tri_state(true, false), Some(true));
        assert_eq!(tri_state(false, true), Some(false));
        assert_eq!(tri_state(false, false), None);
    }

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn conflicting_flags_are_rejected() {
        assert!(Cli::try_parse_from(["mirumoji", "launch", "--build", "--pull"]).is_err());
        assert!(Cli::try_parse_from(["mirumoji", "launch", "--gpu", "--cpu"]).is_err());
        assert!(Cli::try_parse_from(["mirumoji", "shutdown", "--clean", "--no-clean"]).is_err());
    }
}
