//! Pafolio Core Library
//!
//! This crate provides the core domain models, error types, configuration,
//! and constants shared across all pafolio components.

pub mod config;
pub mod constants;
pub mod error;
pub mod indicators;
pub mod models;

// Re-export commonly used types
pub use config::Config;
pub use error::AppError;
pub use indicators::{indicator_title, Indicator, INDICATORS};
pub use models::{MediaKind, UploadRecord};
