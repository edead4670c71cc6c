//! Media configuration for a video/audio capture-and-encode device.
//!
//! This library loads the device's operating parameters from a key-value
//! source, converts and validates each value, reconciles settings that depend
//! on each other, and hands the rest of the application a single immutable
//! [`MediaConfig`](config::MediaConfig).

pub mod config;
pub mod error;
pub mod logging;
pub mod resolution;
pub mod store;

pub use config::{MediaConfig, MediaConfigHandle};
pub use error::{AppResult, ConfigError, ConfigIssue};
