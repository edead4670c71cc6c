//! Line-oriented `name=value` configuration file.
//!
//! ```text
//! # video
//! max_bitrate=3500000
//! use_4_3_video_resolution=true
//! video_resolution_list_4_3=320x240,640x480,1024x768
//! ```
//!
//! Everything before the first `=` is the key and everything after it is the
//! value; both are trimmed. Blank lines and `#` comments are ignored, lines
//! without `=` are skipped with a warning, and a repeated key keeps the last value.

use std::collections::HashMap;
use std::convert::Infallible;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::{debug, warn};

use super::ConfigStore;
use crate::error::ConfigError;

/// A parsed `name=value` file.
#[derive(Debug, Clone, Default)]
pub struct OptionsFile {
    path: Option<PathBuf>,
    values: HashMap<String, String>,
}

impl OptionsFile {
    /// Read and parse the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SourceUnavailable`] if the file cannot be read.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text =
            std::fs::read_to_string(path).map_err(|source| ConfigError::SourceUnavailable {
                path: path.to_path_buf(),
                source,
            })?;

        let mut file = Self::parse_text(&text);
        file.path = Some(path.to_path_buf());
        debug!(path = %path.display(), keys = file.len(), "Loaded options file");
        Ok(file)
    }

    fn parse_text(text: &str) -> Self {
        let mut values = HashMap::new();

        for (index, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match line.split_once('=') {
                Some((key, value)) if !key.trim().is_empty() => {
                    values.insert(key.trim().to_string(), value.trim().to_string());
                }
                _ => warn!(line = index + 1, content = line, "Ignoring malformed line"),
            }
        }

        Self { path: None, values }
    }

    /// Path the file was loaded from, if it came from disk.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// `true` if no key was parsed.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromStr for OptionsFile {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse_text(s))
    }
}

impl ConfigStore for OptionsFile {
    fn get_string(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}
