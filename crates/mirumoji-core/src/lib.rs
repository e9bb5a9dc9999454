//! Core types and configuration for the Mirumoji launcher.
//!
//! This crate defines the resolved run configuration and its static path
//! table ([`RunConfiguration`]), the interactive-or-explicit resolver
//! ([`resolve`]), `.env` secrets validation ([`secrets`]), the
//! `mirumoji.toml` schema ([`LauncherConfig`]) and shared error types.

pub mod config;
pub mod error;
pub mod resolve;
pub mod run;
pub mod secrets;

pub use config::{
    ComposeConfig, LauncherConfig, NetworkConfig, RepositoryConfig, SecretsConfig, SubmoduleMode,
};
pub use error::{Error, Result};
pub use resolve::{Confirm, LaunchChoices, decide, resolve};
pub use run::{Backend, ImageSource, ImageSpec, Registry, RunConfiguration};
