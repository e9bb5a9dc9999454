//! Resolved run configuration and the static path table it selects from.
//!
//! Every path here is relative to the root of the synchronized working copy.
//! Adding a backend variant or registry means adding rows to the tables below;
//! the lookups themselves never branch on individual values.

use std::fmt;
use std::path::Path;

/// Container image registry that pre-built images are pulled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Registry {
    GitHub,
    DockerHub,
}

/// Backend flavour: CPU (offloads inference to Modal) or local NVIDIA GPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    Cpu,
    Gpu,
}

/// Where the images come from. The registry only exists for pre-built images,
/// so a local build can never carry one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageSource {
    Local,
    Prebuilt(Registry),
}

/// A fully resolved launch configuration. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunConfiguration {
    pub source: ImageSource,
    pub backend: Backend,
}

/// A locally buildable image: tag, Dockerfile and build context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSpec {
    pub tag: &'static str,
    pub dockerfile: &'static str,
    pub context: &'static str,
}

/// Variable that always has to be present in the secrets file.
pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
/// Modal credentials, only needed by the CPU backend.
pub const MODAL_TOKEN_ID: &str = "MODAL_TOKEN_ID";
pub const MODAL_TOKEN_SECRET: &str = "MODAL_TOKEN_SECRET";

/// Name of the variable the detected LAN address is exported under.
pub const HOST_LAN_IP: &str = "HOST_LAN_IP";

pub const FRONTEND_IMAGE: ImageSpec = ImageSpec {
    tag: "mirumoji_frontend_local:latest",
    dockerfile: "apps/frontend/Dockerfile",
    context: "apps/frontend",
};

const BACKEND_IMAGES: &[(Backend, ImageSpec)] = &[
    (
        Backend::Gpu,
        ImageSpec {
            tag: "mirumoji_backend_gpu_local:latest",
            dockerfile: "apps/backend/Dockerfile",
            context: "apps/backend",
        },
    ),
    (
        Backend::Cpu,
        ImageSpec {
            tag: "mirumoji_backend_cpu_local:latest",
            dockerfile: "apps/backend/Dockerfile.cpu",
            context: "apps/backend",
        },
    ),
];

const COMPOSE_FILES: &[(ImageSource, Backend, &str)] = &[
    (
        ImageSource::Local,
        Backend::Cpu,
        "compose/docker-compose.local.cpu.yaml",
    ),
    (
        ImageSource::Local,
        Backend::Gpu,
        "compose/docker-compose.local.gpu.yaml",
    ),
    (
        ImageSource::Prebuilt(Registry::GitHub),
        Backend::Cpu,
        "compose/docker-compose.cpu.yaml",
    ),
    (
        ImageSource::Prebuilt(Registry::GitHub),
        Backend::Gpu,
        "compose/docker-compose.gpu.yaml",
    ),
    (
        ImageSource::Prebuilt(Registry::DockerHub),
        Backend::Cpu,
        "compose/docker-compose.cpu.dockerpull.yaml",
    ),
    (
        ImageSource::Prebuilt(Registry::DockerHub),
        Backend::Gpu,
        "compose/docker-compose.gpu.dockerpull.yaml",
    ),
];

const REQUIRED_SECRETS: &[(Backend, &[&str])] = &[
    (
        Backend::Cpu,
        &[OPENAI_API_KEY, MODAL_TOKEN_ID, MODAL_TOKEN_SECRET],
    ),
    (Backend::Gpu, &[OPENAI_API_KEY]),
];

impl RunConfiguration {
    pub fn new(source: ImageSource, backend: Backend) -> Self {
        Self { source, backend }
    }

    pub fn builds_locally(&self) -> bool {
        self.source == ImageSource::Local
    }

    pub fn registry(&self) -> Option<Registry> {
        match self.source {
            ImageSource::Local => None,
            ImageSource::Prebuilt(registry) => Some(registry),
        }
    }

    /// Every configuration the launcher can produce.
    pub fn all() -> Vec<Self> {
        let sources = [
            ImageSource::Local,
            ImageSource::Prebuilt(Registry::GitHub),
            ImageSource::Prebuilt(Registry::DockerHub),
        ];
        sources
            .into_iter()
            .flat_map(|source| {
                [Backend::Cpu, Backend::Gpu]
                    .into_iter()
                    .map(move |backend| Self::new(source, backend))
            })
            .collect()
    }

    /// Compose definition for this configuration, relative to the working copy.
    pub fn compose_file(&self) -> crate::Result<&'static Path> {
        COMPOSE_FILES
            .iter()
            .find(|(source, backend, _)| *source == self.source && *backend == self.backend)
            .map(|(_, _, path)| Path::new(*path))
            .ok_or_else(|| crate::Error::Configuration {
                detail: format!("no compose file registered for {self}"),
            })
    }

    /// Backend image built when the images are built locally.
    pub fn backend_image(&self) -> crate::Result<ImageSpec> {
        self.backend.image()
    }

    /// Images to build, in build order. Empty for pre-built images.
    pub fn images_to_build(&self) -> crate::Result<Vec<ImageSpec>> {
        if self.builds_locally() {
            Ok(vec![FRONTEND_IMAGE, self.backend_image()?])
        } else {
            Ok(Vec::new())
        }
    }

    /// Variables the secrets file has to define for this run.
    pub fn required_secrets(&self) -> crate::Result<Vec<&'static str>> {
        self.backend.required_secrets()
    }
}

impl Backend {
    pub fn image(self) -> crate::Result<ImageSpec> {
        BACKEND_IMAGES
            .iter()
            .find(|(backend, _)| *backend == self)
            .map(|(_, spec)| *spec)
            .ok_or_else(|| crate::Error::Configuration {
                detail: format!("no backend image registered for {self}"),
            })
    }

    pub fn required_secrets(self) -> crate::Result<Vec<&'static str>> {
        REQUIRED_SECRETS
            .iter()
            .find(|(backend, _)| *backend == self)
            .map(|(_, names)| names.to_vec())
            .ok_or_else(|| crate::Error::Configuration {
                detail: format!("no required secrets registered for {self}"),
            })
    }
}

impl fmt::Display for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GitHub => f.write_str("GitHub"),
            Self::DockerHub => f.write_str("DockerHub"),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cpu => f.write_str("CPU"),
            Self::Gpu => f.write_str("GPU"),
        }
    }
}

impl fmt::Display for RunConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.source {
            ImageSource::Local => write!(f, "local build, {} backend", self.backend),
            ImageSource::Prebuilt(registry) => {
                write!(f, "pre-built from {registry}, {} backend", self.backend)
            }
        }
    }
}
