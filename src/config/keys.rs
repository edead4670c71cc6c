//! Recognized configuration keys, their compiled-in defaults and validators.

use super::field::ScalarField;

// video
/// Encoder bitrate ceiling in bits per second.
pub const MAX_BITRATE: ScalarField<i64> =
    ScalarField::validated("max_bitrate", 3_500_000, validate_max_bitrate);
/// Camera rotation in degrees.
pub const VIDEO_ROTATION: ScalarField<i64> =
    ScalarField::validated("video_rotation", 0, validate_video_rotation);
/// Vertical flip.
pub const VIDEO_VFLIP: ScalarField<bool> = ScalarField::new("video_vflip", false);
/// Horizontal flip.
pub const VIDEO_HFLIP: ScalarField<bool> = ScalarField::new("video_hflip", false);
/// Selects the 4:3 list when `true`, the 16:9 list otherwise.
pub const USE_4_3_VIDEO_RESOLUTION: ScalarField<bool> =
    ScalarField::new("use_4_3_video_resolution", true);
/// Let the encoder adapt the resolution at runtime.
pub const USE_DYNAMIC_VIDEO_RESOLUTION: ScalarField<bool> =
    ScalarField::new("use_dynamic_video_resolution", true);
/// Start from `initial_video_resolution`.
pub const USE_INITIAL_VIDEO_RESOLUTION: ScalarField<bool> =
    ScalarField::new("use_initial_video_resolution", false);
/// Starting framerate when the initial resolution is used.
pub const INITIAL_VIDEO_FRAMERATE: ScalarField<i64> =
    ScalarField::validated("initial_video_framerate", 30, validate_framerate);

/// Holds a `WIDTHxHEIGHT` token, read only when the initial resolution is requested.
pub const INITIAL_VIDEO_RESOLUTION: &str = "initial_video_resolution";

// audio
/// Master switch for the processing sub-features below.
pub const AUDIO_PROCESSING_ENABLE: ScalarField<bool> =
    ScalarField::new("audio_processing_enable", false);
/// Echo cancellation.
pub const AUDIO_ECHO_CANCELLATION: ScalarField<bool> =
    ScalarField::new("audio_echo_cancellation", true);
/// Automatic gain control.
pub const AUDIO_GAIN_CONTROL: ScalarField<bool> = ScalarField::new("audio_gain_control", true);
/// High-pass filter. The key has no underscore between `pass` and `filter`.
pub const AUDIO_HIGH_PASS_FILTER: ScalarField<bool> =
    ScalarField::new("audio_high_passfilter", true);
/// Noise suppression.
pub const AUDIO_NOISE_SUPPRESSION: ScalarField<bool> =
    ScalarField::new("audio_noise_suppression", true);
/// Level control, read regardless of the master switch.
pub const AUDIO_LEVEL_CONTROL: ScalarField<bool> =
    ScalarField::new("audio_level_control_enable", true);

/// Lowest accepted `max_bitrate` in bits per second.
pub const MIN_BITRATE: i64 = 200;
/// Highest accepted `max_bitrate`, the 1080p ceiling of the camera encoder.
pub const MAX_BITRATE_LIMIT: i64 = 17_000_000;

/// Accepts `MIN_BITRATE..=MAX_BITRATE_LIMIT`.
pub fn validate_max_bitrate(value: &i64) -> bool {
    (MIN_BITRATE..=MAX_BITRATE_LIMIT).contains(value)
}

/// Accepts the four right angles.
pub fn validate_video_rotation(value: &i64) -> bool {
    matches!(value, 0 | 90 | 180 | 270)
}

/// Zero means "unset" and falls back to the default.
pub fn validate_framerate(value: &i64) -> bool {
    (1..=i64::from(u32::MAX)).contains(value)
}
