//! The resolved media configuration and its load sequence.
//!
//! Loading runs once, front to back:
//!
//! 1. scalar video fields (bitrate, rotation, flips, aspect ratio, dynamic mode)
//! 2. both resolution lists, falling back to the built-in lists
//! 3. the initial resolution request, checked against the active list
//! 4. resolution mode reconciliation
//! 5. audio flags
//!
//! Individual bad values never fail the load. They are replaced, logged and
//! returned as [`ConfigIssue`]s by [`MediaConfig::load_with_report`]. The only
//! hard failure is a source that cannot be read.

use std::fmt;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use super::audio::AudioProcessing;
use super::diagnostics::Diagnostics;
use super::keys::{
    INITIAL_VIDEO_FRAMERATE, MAX_BITRATE, USE_4_3_VIDEO_RESOLUTION, USE_DYNAMIC_VIDEO_RESOLUTION,
    VIDEO_HFLIP, VIDEO_ROTATION, VIDEO_VFLIP,
};
use super::mode::{InitialResolutionRequest, ResolutionMode};
use crate::error::{AppResult, ConfigIssue};
use crate::resolution::{AspectRatio, Resolution, ResolutionCatalog, ResolutionList};
use crate::store::{ConfigStore, FigmentStore, OptionsFile};

/// Default location of the configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "config/media_config.conf";

/// Camera image rotation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(into = "u16")]
pub enum Rotation {
    /// Upright.
    #[default]
    Deg0,
    /// Quarter turn.
    Deg90,
    /// Upside down.
    Deg180,
    /// Three quarter turn.
    Deg270,
}

impl Rotation {
    /// Rotation angle in degrees.
    pub fn degrees(&self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }
}

impl From<Rotation> for u16 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

impl TryFrom<i64> for Rotation {
    type Error = i64;

    fn try_from(degrees: i64) -> Result<Self, Self::Error> {
        match degrees {
            0 => Ok(Rotation::Deg0),
            90 => Ok(Rotation::Deg90),
            180 => Ok(Rotation::Deg180),
            270 => Ok(Rotation::Deg270),
            other => Err(other),
        }
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.degrees())
    }
}

/// Which store implementation reads a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// `name=value` lines, see [`OptionsFile`].
    Options,
    /// TOML with environment overrides, see [`FigmentStore`].
    Toml,
}

impl SourceFormat {
    /// `.toml` files are read as TOML, everything else as an options file.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => SourceFormat::Toml,
            _ => SourceFormat::Options,
        }
    }

    /// Open `path` with the matching store.
    pub fn open(&self, path: &Path) -> AppResult<Box<dyn ConfigStore>> {
        Ok(match self {
            SourceFormat::Options => Box::new(OptionsFile::load(path)?),
            SourceFormat::Toml => Box::new(FigmentStore::load(path)?),
        })
    }
}

/// Fully resolved media configuration.
///
/// Constructed once per load and read-only afterwards; share it through
/// [`MediaConfigHandle`](super::handle::MediaConfigHandle) or by reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaConfig {
    /// Encoder bitrate ceiling in bits per second.
    pub max_bitrate: u32,
    /// Camera image rotation.
    pub video_rotation: Rotation,
    /// Vertical flip.
    pub video_vflip: bool,
    /// Horizontal flip.
    pub video_hflip: bool,
    /// Which resolution list is active.
    pub aspect_ratio: AspectRatio,
    /// Framerate the encoder starts with when an initial resolution is set.
    pub initial_video_framerate: u32,
    /// How the encoder picks its resolution.
    pub resolution_mode: ResolutionMode,
    /// Resolution lists for both aspect ratios.
    pub resolutions: ResolutionCatalog,
    /// Audio processing flags.
    pub audio: AudioProcessing,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            max_bitrate: to_u32(MAX_BITRATE.default, 0),
            video_rotation: Rotation::default(),
            video_vflip: VIDEO_VFLIP.default,
            video_hflip: VIDEO_HFLIP.default,
            aspect_ratio: AspectRatio::from_use_4_3(USE_4_3_VIDEO_RESOLUTION.default),
            initial_video_framerate: to_u32(INITIAL_VIDEO_FRAMERATE.default, 0),
            resolution_mode: ResolutionMode::default(),
            resolutions: ResolutionCatalog::default(),
            audio: AudioProcessing::default(),
        }
    }
}

fn to_u32(value: i64, fallback: u32) -> u32 {
    u32::try_from(value).unwrap_or(fallback)
}

impl MediaConfig {
    /// Load from [`DEFAULT_CONFIG_PATH`].
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read.
    pub fn load() -> AppResult<Self> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Load from `path`, choosing the store by file extension.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or parsed at all.
    pub fn load_from<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        Self::load_with_report(path).map(|(config, _)| config)
    }

    /// Load from `path` and also return every issue that was recovered from.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or parsed at all.
    pub fn load_with_report<P: AsRef<Path>>(path: P) -> AppResult<(Self, Vec<ConfigIssue>)> {
        let path = path.as_ref();
        Self::load_with_format(path, SourceFormat::from_path(path))
    }

    /// Load from `path` with an explicit store format.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or parsed at all.
    pub fn load_with_format(
        path: &Path,
        format: SourceFormat,
    ) -> AppResult<(Self, Vec<ConfigIssue>)> {
        let store = format.open(path)?;
        let (config, issues) = Self::from_store_with_report(store.as_ref());
        debug!(
            path = %path.display(),
            issues = issues.len(),
            "Media configuration loaded"
        );
        Ok((config, issues))
    }

    /// Resolve a configuration from an already loaded store.
    pub fn from_store(store: &dyn ConfigStore) -> Self {
        Self::from_store_with_report(store).0
    }

    /// Resolve a configuration from an already loaded store, returning the
    /// recovered issues alongside it.
    pub fn from_store_with_report(store: &dyn ConfigStore) -> (Self, Vec<ConfigIssue>) {
        let mut diag = Diagnostics::default();

        let max_bitrate = to_u32(MAX_BITRATE.load(store, &mut diag), 0);
        // the validator only lets the four legal angles through
        let video_rotation =
            Rotation::try_from(VIDEO_ROTATION.load(store, &mut diag)).unwrap_or_default();
        let video_vflip = VIDEO_VFLIP.load(store, &mut diag);
        let video_hflip = VIDEO_HFLIP.load(store, &mut diag);
        let aspect_ratio =
            AspectRatio::from_use_4_3(USE_4_3_VIDEO_RESOLUTION.load(store, &mut diag));
        let use_dynamic = USE_DYNAMIC_VIDEO_RESOLUTION.load(store, &mut diag);

        let resolutions = ResolutionCatalog::load(store, &mut diag);

        let initial = InitialResolutionRequest::load(store, aspect_ratio, &resolutions, &mut diag);
        let resolution_mode = ResolutionMode::resolve(
            use_dynamic,
            initial.resolution,
            resolutions.list(aspect_ratio),
            &mut diag,
        );

        let audio = AudioProcessing::load(store, &mut diag);

        let config = Self {
            max_bitrate,
            video_rotation,
            video_vflip,
            video_hflip,
            aspect_ratio,
            initial_video_framerate: initial.framerate,
            resolution_mode,
            resolutions,
            audio,
        };

        info!(
            max_bitrate = config.max_bitrate,
            rotation = %config.video_rotation,
            aspect = %config.aspect_ratio,
            mode = %config.resolution_mode,
            audio_processing = config.audio.enabled,
            "Media configuration resolved"
        );

        (config, diag.into_issues())
    }

    /// Aspect ratio of the active resolution list.
    pub fn active_aspect_ratio(&self) -> AspectRatio {
        self.aspect_ratio
    }

    /// The resolution list for the active aspect ratio.
    pub fn active_resolution_list(&self) -> &ResolutionList {
        self.resolutions.list(self.aspect_ratio)
    }

    /// Whether `resolution` is in the active resolution list.
    pub fn validate_resolution(&self, resolution: &Resolution) -> bool {
        self.resolutions
            .validate_resolution(self.aspect_ratio, resolution)
    }

    /// Whether the encoder may change resolution at runtime.
    pub fn use_dynamic_video_resolution(&self) -> bool {
        self.resolution_mode.use_dynamic_video_resolution()
    }

    /// Whether encoding starts at a fixed initial resolution.
    pub fn use_initial_video_resolution(&self) -> bool {
        self.resolution_mode.use_initial_video_resolution()
    }

    /// The initial resolution, if one is in use.
    pub fn initial_video_resolution(&self) -> Option<Resolution> {
        self.resolution_mode.initial_resolution()
    }
}
