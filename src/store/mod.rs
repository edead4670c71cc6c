//! Key-value sources the media configuration is read from.
//!
//! The loader only needs string and integer lookups by key, so any source that
//! implements [`ConfigStore`] can back it:
//!
//! - [`OptionsFile`]: the device's native `name=value` text file.
//! - [`FigmentStore`]: a TOML file with `MEDIA_` environment variable overrides.

pub mod figment_store;
pub mod options_file;

pub use figment_store::{FigmentStore, ENV_PREFIX};
pub use options_file::OptionsFile;

/// Lookup interface over a loaded key-value source.
pub trait ConfigStore {
    /// Raw string value for `key`, or `None` when the key is absent.
    fn get_string(&self, key: &str) -> Option<String>;

    /// Integer value for `key`. `None` when the key is absent or its value is
    /// not an integer.
    fn get_int(&self, key: &str) -> Option<i64> {
        self.get_string(key)?.trim().parse().ok()
    }
}
