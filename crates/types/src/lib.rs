//! Shared types for the Docker Parse Server launcher
//!
//! This crate contains the domain types produced by configuration resolution
//! and consumed by the server binary: push, file storage and email settings,
//! plus the error taxonomy shared across the workspace.

pub mod email;
pub mod error;
pub mod push;
pub mod storage;
pub mod utils;

// Re-export commonly used types
pub use email::{EmailAdapterConfig, EmailOptions, EmailSettings};
pub use error::ConfigError;
pub use push::{AndroidPushConfig, IosPushBundle, PushConfig};
pub use storage::FilesAdapterConfig;
