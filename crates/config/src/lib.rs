//! Configuration resolution for the Docker Parse Server launcher
//!
//! This crate turns a snapshot of the process environment into a single
//! [`ServerConfig`]. Optional features (push, file storage adapter, email
//! verification) are switched on only when their inputs are complete and,
//! for certificate bundles, when the referenced files exist.

pub mod credentials;
pub mod email;
pub mod env;
pub mod links;
pub mod loader;
pub mod push;
pub mod schema;
pub mod storage;
pub mod validation;

pub use credentials::{CredentialFile, CredentialFileResolver};
pub use email::EmailAdapterConfigBuilder;
pub use env::EnvironmentMap;
pub use links::{ContainerLink, DockerLinks};
pub use loader::ConfigLoader;
pub use push::{PushConfigBuilder, PushTier, PushTierInputs};
pub use schema::*;
pub use storage::{GcsInputs, S3Inputs, StorageAdapterSelector};
pub use validation::*;
