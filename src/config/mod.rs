//! Media configuration loading.
//!
//! This module turns a key-value source into a validated [`MediaConfig`]:
//! scalar fields are loaded with per-field defaults and validators, the
//! resolution lists are parsed with built-in fallbacks, and the cross-field
//! rules (resolution mode, audio feature gating) are applied last.
//!
//! # Configuration Sources
//!
//! - `name=value` options files (default: `config/media_config.conf`)
//! - TOML files (`*.toml`), with environment variables prefixed with `MEDIA_`
//!   overriding file values
//!
//! # Example
//!
//! ```no_run
//! use media_config::config::MediaConfig;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (config, issues) = MediaConfig::load_with_report("config/media_config.conf")?;
//!
//!     println!("Max bitrate: {}", config.max_bitrate);
//!     println!("Resolution mode: {}", config.resolution_mode);
//!     for issue in issues {
//!         eprintln!("corrected: {}", issue);
//!     }
//!     Ok(())
//! }
//! ```

pub mod audio;
pub mod diagnostics;
pub mod field;
pub mod handle;
pub mod keys;
pub mod media_config;
pub mod mode;

pub use audio::AudioProcessing;
pub use diagnostics::Diagnostics;
pub use field::{FieldValue, RawField, ScalarField, Validator};
pub use handle::MediaConfigHandle;
pub use media_config::{MediaConfig, Rotation, SourceFormat, DEFAULT_CONFIG_PATH};
pub use mode::{InitialResolutionRequest, ResolutionMode, DEFAULT_INITIAL_RESOLUTION};
