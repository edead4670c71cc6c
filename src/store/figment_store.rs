//! TOML-backed store with environment variable overrides, using Figment.
//!
//! Keys are top-level TOML keys with the same names as in the options file.
//! Environment variables with the `MEDIA_` prefix override file values:
//!
//! ```text
//! MEDIA_MAX_BITRATE=1000000
//! MEDIA_USE_4_3_VIDEO_RESOLUTION=false
//! ```
//!
//! Values of any scalar TOML type are rendered back to strings for lookup, and
//! an array is joined with `,` so resolution lists may be written either way:
//!
//! ```toml
//! video_resolution_list_16_9 = ["640x360", "1280x720"]
//! video_resolution_list_4_3 = "320x240,640x480"
//! ```

use std::path::Path;

use figment::{
    providers::{Env, Format, Toml},
    value::{Dict, Value},
    Figment,
};
use tracing::debug;

use super::ConfigStore;
use crate::error::ConfigError;

/// Prefix of environment variables that override file values.
pub const ENV_PREFIX: &str = "MEDIA_";

/// A merged TOML + environment configuration source.
#[derive(Debug, Clone)]
pub struct FigmentStore {
    figment: Figment,
}

impl FigmentStore {
    /// Load the TOML file at `path` and merge `MEDIA_` environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SourceUnavailable`] if the file cannot be read and
    /// [`ConfigError::Figment`] if it is not valid TOML.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text =
            std::fs::read_to_string(path).map_err(|source| ConfigError::SourceUnavailable {
                path: path.to_path_buf(),
                source,
            })?;

        let figment = Figment::new()
            .merge(Toml::string(&text))
            .merge(Env::prefixed(ENV_PREFIX));

        let store = Self::from_figment(figment)?;
        debug!(path = %path.display(), "Loaded TOML media config");
        Ok(store)
    }

    /// Wrap an already assembled figment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if any provider fails to produce data.
    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        // surface syntax errors here instead of as missing keys later
        figment.extract::<Dict>()?;
        Ok(Self { figment })
    }
}

fn render(value: &Value) -> Option<String> {
    match value {
        Value::String(_, s) => Some(s.clone()),
        Value::Char(_, c) => Some(c.to_string()),
        Value::Bool(_, b) => Some(b.to_string()),
        // floats keep their fractional form so integer fields reject them
        Value::Num(..) => value
            .to_i128()
            .map(|n| n.to_string())
            .or_else(|| value.deserialize::<f64>().ok().map(|f| format!("{:?}", f))),
        Value::Array(_, items) => items
            .iter()
            .map(render)
            .collect::<Option<Vec<_>>>()
            .map(|tokens| tokens.join(",")),
        Value::Dict(..) | Value::Empty(..) => None,
    }
}

impl ConfigStore for FigmentStore {
    fn get_string(&self, key: &str) -> Option<String> {
        self.figment.find_value(key).ok().as_ref().and_then(render)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn toml_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    #[serial]
    fn test_scalars_render_as_strings() {
        let file = toml_file(
            r#"
max_bitrate = 2000000
video_vflip = true
initial_video_resolution = "640x480"
video_resolution_list_16_9 = ["640x360", "1280x720"]
"#,
        );
        let store = FigmentStore::load(file.path()).unwrap();

        assert_eq!(store.get_int("max_bitrate"), Some(2_000_000));
        assert_eq!(store.get_string("video_vflip").as_deref(), Some("true"));
        assert_eq!(
            store.get_string("initial_video_resolution").as_deref(),
            Some("640x480")
        );
        assert_eq!(
            store.get_string("video_resolution_list_16_9").as_deref(),
            Some("640x360,1280x720")
        );
        assert_eq!(store.get_string("missing"), None);
    }

    #[test]
    #[serial]
    fn test_floats_are_not_integers() {
        let file = toml_file("video_rotation = 90.0\nmax_bitrate = 1e6\n");
        let store = FigmentStore::load(file.path()).unwrap();

        assert_eq!(store.get_string("video_rotation").as_deref(), Some("90.0"));
        assert_eq!(store.get_string("max_bitrate").as_deref(), Some("1000000.0"));
        assert_eq!(store.get_int("video_rotation"), None);
        assert_eq!(store.get_int("max_bitrate"), None);
    }

    #[test]
    #[serial]
    fn test_env_overrides_file() {
        let file = toml_file("max_bitrate = 2000000\n");
        std::env::set_var("MEDIA_MAX_BITRATE", "1000000");
        let store = FigmentStore::load(file.path());
        std::env::remove_var("MEDIA_MAX_BITRATE");

        assert_eq!(store.unwrap().get_int("max_bitrate"), Some(1_000_000));
    }

    #[test]
    #[serial]
    fn test_invalid_toml_is_error() {
        let file = toml_file("max_bitrate = = 3\n");
        assert!(matches!(
            FigmentStore::load(file.path()),
            Err(ConfigError::Figment(_))
        ));
    }

    #[test]
    #[serial]
    fn test_missing_file_is_source_unavailable() {
        assert!(matches!(
            FigmentStore::load("/nonexistent/media_config.toml"),
            Err(ConfigError::SourceUnavailable { .. })
        ));
    }
}
