//! Shared utilities, configuration, and error handling for Worklane
//!
//! This crate provides common functionality used across the Worklane application:
//! - Configuration management following 12-factor principles
//! - Error types and handling
//! - Repository and state-machine error types
//! - Custom axum extractors

pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod state;

pub use config::Config;
pub use db::RepositoryError;
pub use error::{Error, Result};
pub use extractors::{Pagination, ValidatedJson};
pub use state::StateError;
