//! Backoffice Core Library
//!
//! This crate provides configuration, error types, constants and the wire models
//! shared by the upload authorization and social publishing crates.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{BaseConfig, Config, InstagramConfig, StorageConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
