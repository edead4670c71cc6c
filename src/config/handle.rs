//! Shared, read-only access to the current media configuration.
//!
//! Uses `tokio::sync::watch` so any number of consumers can read the current
//! configuration or wait for a replacement. A reload builds a complete new
//! [`MediaConfig`] first and then swaps it in, so readers never observe a
//! partially updated configuration.
//!
//! # Example
//!
//! ```no_run
//! use media_config::config::{MediaConfig, MediaConfigHandle};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let handle = MediaConfigHandle::new(MediaConfig::load()?);
//!
//! let encoder_view = handle.clone();
//! println!("max bitrate: {}", encoder_view.current().max_bitrate);
//! # Ok(())
//! # }
//! ```

use std::path::Path;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;

use super::media_config::MediaConfig;
use crate::error::{AppResult, ConfigIssue};

/// Cloneable handle to the current [`MediaConfig`].
#[derive(Debug, Clone)]
pub struct MediaConfigHandle {
    sender: Arc<watch::Sender<Arc<MediaConfig>>>,
}

impl MediaConfigHandle {
    /// Start publishing `config`.
    pub fn new(config: MediaConfig) -> Self {
        let (sender, _) = watch::channel(Arc::new(config));
        Self {
            sender: Arc::new(sender),
        }
    }

    /// The configuration in effect now.
    pub fn current(&self) -> Arc<MediaConfig> {
        self.sender.borrow().clone()
    }

    /// Receiver that is notified whenever the configuration is replaced.
    pub fn subscribe(&self) -> watch::Receiver<Arc<MediaConfig>> {
        self.sender.subscribe()
    }

    /// Swap in a new configuration, returning the previous one.
    pub fn replace(&self, config: MediaConfig) -> Arc<MediaConfig> {
        self.sender.send_replace(Arc::new(config))
    }

    /// Load `path` and swap the result in.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read. The current
    /// configuration is left untouched in that case.
    pub fn reload<P: AsRef<Path>>(&self, path: P) -> AppResult<Vec<ConfigIssue>> {
        let (config, issues) = MediaConfig::load_with_report(path.as_ref())?;
        self.replace(config);
        info!(path = %path.as_ref().display(), "Media configuration replaced");
        Ok(issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_clones_share_state() {
        let handle = MediaConfigHandle::new(MediaConfig::default());
        let other = handle.clone();

        let updated = MediaConfig {
            max_bitrate: 1_000_000,
            ..MediaConfig::default()
        };
        let previous = handle.replace(updated);

        assert_eq!(previous.max_bitrate, 3_500_000);
        assert_eq!(other.current().max_bitrate, 1_000_000);
    }

    #[test]
    fn test_failed_reload_keeps_current() {
        let handle = MediaConfigHandle::new(MediaConfig::default());
        assert!(handle.reload("/nonexistent/media_config.conf").is_err());
        assert_eq!(*handle.current(), MediaConfig::default());
    }

    #[tokio::test]
    async fn test_subscriber_sees_reload() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "video_rotation=90").unwrap();

        let handle = MediaConfigHandle::new(MediaConfig::default());
        let mut rx = handle.subscribe();

        let issues = handle.reload(file.path()).unwrap();
        assert!(issues.is_empty());

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().video_rotation.degrees(), 90);
    }
}
