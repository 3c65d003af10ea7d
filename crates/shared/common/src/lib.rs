//! Common utilities shared across the invoicing crates.
//!
//! This crate provides:
//! - Process settings loaded from the environment
//! - Unified error handling

pub mod config;
pub mod error;

pub use config::{ConfigError, DatabaseOptions, Settings};
pub use error::{AppError, AppResult};
