//! Subprocess execution and external tool clients for the Mirumoji launcher.
//!
//! Everything here reaches the outside world through a [`CommandExecutor`]
//! (git, docker) or a socket ([`UdpProbe`]), so callers can swap in mocks.

pub mod docker;
pub mod error;
pub mod executor;
pub mod git;
pub mod net;

pub use docker::DockerClient;
pub use error::{CommandError, NetError};
pub use executor::{CommandExecutor, CommandSpec, RealExecutor};
pub use git::{GitClient, SyncOutcome};
pub use net::{LanResolver, UdpProbe};
