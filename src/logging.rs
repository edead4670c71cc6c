//! Tracing subscriber setup.
//!
//! `RUST_LOG` takes precedence when set; otherwise this crate logs at `level`
//! and above while dependencies stay quiet:
//!
//! ```bash
//! RUST_LOG=media_config=debug,figment=trace media-config --config config/media_config.toml
//! ```

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Filter directive used when `RUST_LOG` is unset.
pub fn default_directive(level: Level) -> String {
    format!(
        "{}={}",
        env!("CARGO_CRATE_NAME"),
        level.as_str().to_ascii_lowercase()
    )
}

/// Install the global fmt subscriber. Returns `false` if one was already set.
pub fn init(level: Level, json: bool) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(level)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().try_init().is_ok()
    } else {
        builder.try_init().is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_default_directive_targets_this_crate() {
        assert_eq!(default_directive(Level::WARN), "media_config=warn");
        assert_eq!(default_directive(Level::DEBUG), "media_config=debug");
    }

    #[test]
    #[serial]
    fn test_second_init_is_harmless() {
        init(Level::INFO, false);
        assert!(!init(Level::DEBUG, false));
    }
}
