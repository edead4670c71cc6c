//! Resolution mode selection.
//!
//! `use_dynamic_video_resolution` and `use_initial_video_resolution` are
//! loaded independently but only three combinations are meaningful, so they are
//! folded into a single [`ResolutionMode`]. The fourth combination (neither
//! enabled) is resolved by forcing a fixed initial resolution.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use super::diagnostics::Diagnostics;
use super::keys::{INITIAL_VIDEO_FRAMERATE, INITIAL_VIDEO_RESOLUTION, USE_INITIAL_VIDEO_RESOLUTION};
use crate::error::ConfigIssue;
use crate::resolution::{parse_resolution_token, AspectRatio, Resolution, ResolutionCatalog, ResolutionList};
use crate::store::ConfigStore;

/// Compiled-in initial resolution, used when initial mode has to be forced on.
pub const DEFAULT_INITIAL_RESOLUTION: Resolution = Resolution::new(640, 480);

/// How the encoder chooses its resolution at runtime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionMode {
    /// Resolution follows the achievable bitrate.
    #[default]
    Dynamic,
    /// Start at the given resolution, then follow the achievable bitrate.
    DynamicFromInitial(Resolution),
    /// Stay at the given resolution.
    Fixed(Resolution),
}

impl ResolutionMode {
    /// Combine the two mode flags.
    ///
    /// `initial` is the accepted initial resolution, if the initial mode was
    /// requested and validated. When neither mode is enabled the initial mode is
    /// forced on with [`DEFAULT_INITIAL_RESOLUTION`], or with the first entry of
    /// `active` if that is not a member of it.
    pub fn resolve(
        use_dynamic: bool,
        initial: Option<Resolution>,
        active: &ResolutionList,
        diag: &mut Diagnostics,
    ) -> Self {
        match (use_dynamic, initial) {
            (true, None) => ResolutionMode::Dynamic,
            (true, Some(resolution)) => ResolutionMode::DynamicFromInitial(resolution),
            (false, Some(resolution)) => ResolutionMode::Fixed(resolution),
            (false, None) => {
                let forced = if active.contains(&DEFAULT_INITIAL_RESOLUTION) {
                    DEFAULT_INITIAL_RESOLUTION
                } else {
                    active.first()
                };
                diag.report(ConfigIssue::InconsistentModeSelection { forced });
                ResolutionMode::Fixed(forced)
            }
        }
    }

    /// `true` for both dynamic variants.
    pub fn use_dynamic_video_resolution(&self) -> bool {
        matches!(
            self,
            ResolutionMode::Dynamic | ResolutionMode::DynamicFromInitial(_)
        )
    }

    /// `true` when a starting resolution is set.
    pub fn use_initial_video_resolution(&self) -> bool {
        self.initial_resolution().is_some()
    }

    /// The fixed starting resolution, if the initial mode is active.
    pub fn initial_resolution(&self) -> Option<Resolution> {
        match self {
            ResolutionMode::Dynamic => None,
            ResolutionMode::DynamicFromInitial(resolution) | ResolutionMode::Fixed(resolution) => {
                Some(*resolution)
            }
        }
    }
}

impl fmt::Display for ResolutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionMode::Dynamic => f.write_str("dynamic"),
            ResolutionMode::DynamicFromInitial(resolution) => {
                write!(f, "dynamic from {}", resolution)
            }
            ResolutionMode::Fixed(resolution) => write!(f, "fixed {}", resolution),
        }
    }
}

/// Result of interpreting `use_initial_video_resolution` and its companion keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitialResolutionRequest {
    /// Accepted initial resolution; `None` if not requested or rejected.
    pub resolution: Option<Resolution>,
    /// Starting framerate, validated or defaulted.
    pub framerate: u32,
}

impl InitialResolutionRequest {
    /// Read the initial resolution request.
    ///
    /// The companion `initial_video_resolution` and `initial_video_framerate`
    /// keys are only read when the flag is exactly `true`. The resolution must
    /// parse and be a member of the `aspect` list to be accepted.
    pub fn load(
        store: &dyn ConfigStore,
        aspect: AspectRatio,
        catalog: &ResolutionCatalog,
        diag: &mut Diagnostics,
    ) -> Self {
        let mut request = Self {
            resolution: None,
            framerate: framerate_default(),
        };

        if !USE_INITIAL_VIDEO_RESOLUTION.load(store, diag) {
            return request;
        }

        let Some(raw) = store.get_string(INITIAL_VIDEO_RESOLUTION) else {
            diag.report(ConfigIssue::InitialResolutionMissing);
            return request;
        };

        let framerate = INITIAL_VIDEO_FRAMERATE.load(store, diag);
        request.framerate = u32::try_from(framerate).unwrap_or_else(|_| framerate_default());

        let Some(resolution) = parse_resolution_token(&raw) else {
            diag.report(ConfigIssue::FieldMalformed {
                key: INITIAL_VIDEO_RESOLUTION.to_string(),
                value: raw,
            });
            return request;
        };

        if !catalog.validate_resolution(aspect, &resolution) {
            diag.report(ConfigIssue::ResolutionNotInList { resolution, aspect });
            return request;
        }

        debug!(%resolution, framerate = request.framerate, "Initial video resolution accepted");
        request.resolution = Some(resolution);
        request
    }
}

fn framerate_default() -> u32 {
    u32::try_from(INITIAL_VIDEO_FRAMERATE.default).unwrap_or(30)
}
