//! End-to-end loading of options files from disk.

use std::io::Write;
use std::path::Path;

use media_config::config::{MediaConfig, ResolutionMode, Rotation, DEFAULT_INITIAL_RESOLUTION};
use media_config::resolution::{
    AspectRatio, Resolution, ResolutionList, DEFAULT_RESOLUTION_LIST_16_9,
    DEFAULT_RESOLUTION_LIST_4_3,
};
use media_config::{ConfigError, ConfigIssue};
use tempfile::NamedTempFile;
use tracing_test::traced_test;

/// Writes `content` to a temporary `.conf` file.
fn conf_file(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".conf").tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn load(content: &str) -> (MediaConfig, Vec<ConfigIssue>) {
    let file = conf_file(content);
    MediaConfig::load_with_report(file.path()).unwrap()
}

#[test]
fn test_missing_file_fails_load() {
    let result = MediaConfig::load_from("/nonexistent/dir/media_config.conf");
    assert!(matches!(result, Err(ConfigError::SourceUnavailable { .. })));
}

#[test]
fn test_sample_config_is_clean() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/media_config.conf");
    let (config, issues) = MediaConfig::load_with_report(&path).unwrap();

    assert!(issues.is_empty(), "unexpected issues: {:?}", issues);
    assert_eq!(config, MediaConfig::default());
}

#[test]
fn test_default_lists_only_reproduce_default_state() {
    let (config, issues) = load(&format!(
        "video_resolution_list_4_3={}\nvideo_resolution_list_16_9={}\n",
        DEFAULT_RESOLUTION_LIST_4_3, DEFAULT_RESOLUTION_LIST_16_9
    ));
    assert!(issues.is_empty());
    assert_eq!(config, MediaConfig::default());
}

#[test]
fn test_full_custom_config() {
    let (config, issues) = load(
        "\
max_bitrate=2000000
video_rotation=270
video_vflip=true
video_hflip=true
use_4_3_video_resolution=false
use_dynamic_video_resolution=false
video_resolution_list_16_9=640x360,1280x720,1920x1080
use_initial_video_resolution=true
initial_video_resolution=1280x720
initial_video_framerate=24
audio_processing_enable=true
audio_echo_cancellation=false
audio_noise_suppression=false
audio_level_control_enable=false
",
    );

    assert!(issues.is_empty(), "unexpected issues: {:?}", issues);
    assert_eq!(config.max_bitrate, 2_000_000);
    assert_eq!(config.video_rotation, Rotation::Deg270);
    assert!(config.video_vflip && config.video_hflip);
    assert_eq!(config.active_aspect_ratio(), AspectRatio::Wide);
    assert_eq!(
        config.resolution_mode,
        ResolutionMode::Fixed(Resolution::new(1280, 720))
    );
    assert_eq!(config.initial_video_framerate, 24);
    assert_eq!(
        config.active_resolution_list().max_resolution(),
        Resolution::new(1920, 1080)
    );
    // the inactive list keeps its built-in entries
    assert_eq!(
        config.resolutions.list_4_3,
        ResolutionList::builtin(AspectRatio::Standard)
    );

    assert!(config.audio.enabled);
    assert!(!config.audio.echo_cancellation);
    assert!(config.audio.gain_control);
    assert!(config.audio.high_pass_filter);
    assert!(!config.audio.noise_suppression);
    assert!(!config.audio.level_control);
}

#[test]
fn test_partially_malformed_list_keeps_valid_entries() {
    let (config, issues) = load("video_resolution_list_4_3=320x240,bogus,640x480\n");

    assert_eq!(
        config.resolutions.list_4_3.as_slice(),
        &[Resolution::new(320, 240), Resolution::new(640, 480)]
    );
    assert_eq!(
        issues,
        vec![ConfigIssue::ResolutionTokenMalformed {
            key: "video_resolution_list_4_3".into(),
            token: "bogus".into(),
        }]
    );
}

#[test]
fn test_wholly_invalid_lists_use_builtin() {
    let (config, _) = load(
        "video_resolution_list_4_3=a,b,c\nvideo_resolution_list_16_9=0x0,1280\n",
    );
    assert_eq!(
        config.resolutions.list_4_3,
        ResolutionList::builtin(AspectRatio::Standard)
    );
    assert_eq!(
        config.resolutions.list_16_9,
        ResolutionList::builtin(AspectRatio::Wide)
    );
    assert!(!config.resolutions.list_4_3.is_empty());
    assert!(!config.resolutions.list_16_9.is_empty());
}

#[test]
fn test_initial_resolution_outside_list_is_rejected() {
    let (config, issues) = load(
        "\
use_4_3_video_resolution=true
use_initial_video_resolution=true
initial_video_resolution=800x600
",
    );
    assert!(!config.use_initial_video_resolution());
    assert!(config.use_dynamic_video_resolution());
    assert_eq!(config.initial_video_resolution(), None);
    assert!(issues.contains(&ConfigIssue::ResolutionNotInList {
        resolution: Resolution::new(800, 600),
        aspect: AspectRatio::Standard,
    }));
}

#[test]
fn test_neither_mode_is_overridden() {
    let (config, issues) = load("use_dynamic_video_resolution=false\n");

    assert_eq!(
        config.resolution_mode,
        ResolutionMode::Fixed(DEFAULT_INITIAL_RESOLUTION)
    );
    assert_eq!(
        issues,
        vec![ConfigIssue::InconsistentModeSelection {
            forced: DEFAULT_INITIAL_RESOLUTION
        }]
    );
}

#[test]
fn test_rejected_initial_with_dynamic_off_still_has_a_mode() {
    let (config, _) = load(
        "\
use_4_3_video_resolution=false
use_dynamic_video_resolution=false
use_initial_video_resolution=true
initial_video_resolution=640x480
",
    );
    // 640x480 is not 16:9, so both the request and the usual fallback are rejected
    let initial = config.initial_video_resolution().unwrap();
    assert!(config.validate_resolution(&initial));
    assert!(!config.use_dynamic_video_resolution());
}

#[test]
fn test_audio_sub_features_need_processing_enabled() {
    let (config, _) = load(
        "\
audio_echo_cancellation=false
audio_gain_control=false
audio_high_passfilter=false
audio_noise_suppression=false
audio_level_control_enable=false
",
    );
    assert!(!config.audio.enabled);
    assert!(config.audio.echo_cancellation);
    assert!(config.audio.gain_control);
    assert!(config.audio.high_pass_filter);
    assert!(config.audio.noise_suppression);
    assert!(!config.audio.level_control);
}

#[test]
#[traced_test]
fn test_corrections_are_logged() {
    let (config, issues) = load("video_rotation=45\nvideo_vflip=sideways\n");

    assert_eq!(config.video_rotation, Rotation::Deg0);
    assert!(!config.video_vflip);
    assert_eq!(issues.len(), 2);
    assert!(logs_contain("video_rotation"));
    assert!(logs_contain("sideways"));
}
