//! Error types for configuration loading.
//!
//! Loading distinguishes two kinds of problems:
//!
//! - **`ConfigError`**: hard failures at the boundary of the load call. The only
//!   way a load fails is when the underlying key-value source cannot be opened or
//!   parsed at all. No partial configuration is produced in that case.
//! - **`ConfigIssue`**: problems with individual values that the loader recovers
//!   from locally (substituting a default, skipping a token, forcing a mode). They
//!   never abort the load; they are logged and collected so callers and tests can
//!   inspect what was corrected.
//!
//! By using `#[from]`, `ConfigError` can be created from figment errors with the
//! `?` operator.

use std::path::PathBuf;

use thiserror::Error;

use crate::resolution::{AspectRatio, Resolution};

/// Convenience alias for results using the configuration error type.
pub type AppResult<T> = std::result::Result<T, ConfigError>;

/// Hard failure of a configuration load.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The source file could not be read.
    #[error("Configuration source '{}' is unavailable: {source}", .path.display())]
    SourceUnavailable {
        /// Path that was tried.
        path: PathBuf,
        /// Underlying read error.
        #[source]
        source: std::io::Error,
    },

    /// The TOML source or an environment override could not be parsed.
    #[error("Configuration load error: {0}")]
    Figment(#[from] figment::Error),
}

/// A recovered problem with one configuration value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssue {
    /// A value that does not decode as the field's type.
    #[error("Config \"{key}\" value is not valid: {value}")]
    FieldMalformed {
        /// Configuration key.
        key: String,
        /// Raw text found in the source.
        value: String,
    },

    /// A well-formed value rejected by the field's validator.
    #[error("Config \"{key}\" value {value} is out of range, resetting to default {default}")]
    FieldOutOfRange {
        /// Configuration key.
        key: String,
        /// Rejected value.
        value: String,
        /// Default that replaced it.
        default: String,
    },

    /// A resolution list token that was skipped.
    #[error("Failed to add resolution from \"{key}\": {token}")]
    ResolutionTokenMalformed {
        /// List key.
        key: String,
        /// Offending token.
        token: String,
    },

    /// A configured list with no valid token; the built-in list was used.
    #[error("No valid resolution in \"{key}\", using built-in list")]
    ResolutionListEmpty {
        /// List key.
        key: String,
    },

    /// The initial resolution was requested without a resolution.
    #[error("Initial video resolution config is not found")]
    InitialResolutionMissing,

    /// The requested initial resolution is missing from the active list.
    #[error("Initial resolution \"{resolution}\" is not in the {aspect} resolution list")]
    ResolutionNotInList {
        /// Requested initial resolution.
        resolution: Resolution,
        /// Active aspect ratio.
        aspect: AspectRatio,
    },

    /// Neither resolution mode was enabled; the initial mode was forced.
    #[error("Both dynamic and initial video resolution disabled, forcing initial resolution {forced}")]
    InconsistentModeSelection {
        /// Resolution the encoder is pinned to.
        forced: Resolution,
    },
}
