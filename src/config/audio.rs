//! Audio processing flags.
//!
//! The processing sub-features only take effect when processing itself is
//! enabled, so they are read from the source only when `audio_processing_enable`
//! is `true`. Level control works without the processing chain and is always read.

use serde::Serialize;

use super::diagnostics::Diagnostics;
use super::keys::{
    AUDIO_ECHO_CANCELLATION, AUDIO_GAIN_CONTROL, AUDIO_HIGH_PASS_FILTER, AUDIO_LEVEL_CONTROL,
    AUDIO_NOISE_SUPPRESSION, AUDIO_PROCESSING_ENABLE,
};
use crate::store::ConfigStore;

/// Resolved audio processing settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AudioProcessing {
    /// Whether the audio processing chain runs at all. CPU heavy.
    pub enabled: bool,
    /// Acoustic echo cancellation.
    pub echo_cancellation: bool,
    /// Automatic gain control.
    pub gain_control: bool,
    /// High-pass filter on the capture path.
    pub high_pass_filter: bool,
    /// Noise suppression.
    pub noise_suppression: bool,
    /// Input level control, independent of `enabled`.
    pub level_control: bool,
}

impl Default for AudioProcessing {
    fn default() -> Self {
        Self {
            enabled: AUDIO_PROCESSING_ENABLE.default,
            echo_cancellation: AUDIO_ECHO_CANCELLATION.default,
            gain_control: AUDIO_GAIN_CONTROL.default,
            high_pass_filter: AUDIO_HIGH_PASS_FILTER.default,
            noise_suppression: AUDIO_NOISE_SUPPRESSION.default,
            level_control: AUDIO_LEVEL_CONTROL.default,
        }
    }
}

impl AudioProcessing {
    /// Load the audio flags, gating the processing sub-features on `enabled`.
    pub fn load(store: &dyn ConfigStore, diag: &mut Diagnostics) -> Self {
        let mut audio = Self {
            enabled: AUDIO_PROCESSING_ENABLE.load(store, diag),
            ..Self::default()
        };

        if audio.enabled {
            audio.echo_cancellation =
                AUDIO_ECHO_CANCELLATION.load_bare(store, audio.echo_cancellation, diag);
            audio.gain_control = AUDIO_GAIN_CONTROL.load_bare(store, audio.gain_control, diag);
            audio.high_pass_filter =
                AUDIO_HIGH_PASS_FILTER.load_bare(store, audio.high_pass_filter, diag);
            audio.noise_suppression =
                AUDIO_NOISE_SUPPRESSION.load_bare(store, audio.noise_suppression, diag);
        }

        audio.level_control = AUDIO_LEVEL_CONTROL.load_bare(store, audio.level_control, diag);
        audio
    }
}
