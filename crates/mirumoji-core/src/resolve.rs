use crate::run::{Backend, ImageSource, Registry, RunConfiguration};

/// Ask a yes/no question with a default answer.
///
/// The terminal implementation lives in the CLI; tests script the answers.
pub trait Confirm {
    fn confirm(&mut self, question: &str, default: bool) -> crate::Result<bool>;
}

pub const BUILD_QUESTION: &str = "Build Docker images locally?";
pub const GPU_QUESTION: &str = "Run Local GPU version of the backend (NVIDIA GPU required)?";
pub const REGISTRY_QUESTION: &str = "Pull from GitHub Registry? (N = Pull from DockerHub)";
pub const VOLUMES_QUESTION: &str = "Delete Data (Docker Volumes)?";

/// Choices passed on the command line. `None` means "ask".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LaunchChoices {
    pub build_locally: Option<bool>,
    pub use_gpu: Option<bool>,
    pub github_registry: Option<bool>,
}

/// Use the explicit answer if there is one, otherwise ask.
pub fn decide(
    explicit: Option<bool>,
    confirm: &mut impl Confirm,
    question: &str,
    default: bool,
) -> crate::Result<bool> {
    match explicit {
        Some(answer) => Ok(answer),
        None => confirm.confirm(question, default),
    }
}

/// Turn explicit choices and prompt answers into a [`RunConfiguration`].
///
/// All questions default to "no": pre-built images, CPU backend, DockerHub.
/// The registry question is never asked for a local build.
pub fn resolve(
    choices: LaunchChoices,
    confirm: &mut impl Confirm,
) -> crate::Result<RunConfiguration> {
    let build_locally = decide(choices.build_locally, confirm, BUILD_QUESTION, false)?;
    let use_gpu = decide(choices.use_gpu, confirm, GPU_QUESTION, false)?;

    let source = if build_locally {
        ImageSource::Local
    } else if decide(choices.github_registry, confirm, REGISTRY_QUESTION, false)? {
        ImageSource::Prebuilt(Registry::GitHub)
    } else {
        ImageSource::Prebuilt(Registry::DockerHub)
    };
    let backend = if use_gpu { Backend::Gpu } else { Backend::Cpu };

    let config = RunConfiguration::new(source, backend);
    tracing::debug!(%config, "run configuration resolved");
    Ok(config)
}
