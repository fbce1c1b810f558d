//! Tests for configuration loading, overrides and validation

use std::fs;

use birthday_room::room::types::*;

#[test]
fn test_missing_file_yields_defaults() {
    let path = std::env::temp_dir().join("birthday_room_missing_config.ron");
    let _ = fs::remove_file(&path);
    let config = RoomConfig::load(&path).unwrap();
    assert_eq!(config, RoomConfig::default());
}

#[test]
fn test_file_on_disk_is_loaded() {
    let path = std::env::temp_dir().join("birthday_room_config_test.ron");
    fs::write(&path, "(window: (title: \"Party\"), audio: (start_muted: true))").unwrap();

    let config = RoomConfig::load(&path).unwrap();
    assert_eq!(config.window.title, "Party");
    assert!(config.audio.start_muted);
    assert_eq!(config.window.width, 1280);

    let _ = fs::remove_file(&path);
}

#[test]
fn test_load_reports_where_values_came_from() {
    let missing = std::env::temp_dir().join("birthday_room_source_missing.ron");
    let _ = fs::remove_file(&missing);
    let (_, source) = RoomConfig::load_with_source(&missing).unwrap();
    assert_eq!(source, ConfigSource::Defaults(missing));

    let present = std::env::temp_dir().join("birthday_room_source_present.ron");
    fs::write(&present, "()").unwrap();
    let (config, source) = RoomConfig::load_with_source(&present).unwrap();
    assert_eq!(config, RoomConfig::default());
    assert_eq!(source, ConfigSource::File(present.clone()));
    let _ = fs::remove_file(&present);
}

#[test]
fn test_malformed_file_is_a_parse_error() {
    let err = RoomConfig::from_ron_str("(window: (width: \"wide\"))").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_overrides_take_precedence() {
    let mut config = RoomConfig::default();
    config.apply_overrides(&ConfigOverrides {
        muted: true,
        volume: Some(0.8),
        width: Some(1920),
        height: None,
    });

    assert!(config.audio.start_muted);
    assert_eq!(config.audio.volume, 0.8);
    assert_eq!(config.window.width, 1920);
    assert_eq!(config.window.height, 720);
}

#[test]
fn test_override_can_make_config_invalid() {
    let mut config = RoomConfig::default();
    config.apply_overrides(&ConfigOverrides {
        volume: Some(-0.1),
        ..Default::default()
    });
    assert!(matches!(
        config.validate(),
        Err(ConfigError::Invalid {
            field: "audio.volume",
            ..
        })
    ));
}

#[test]
fn test_validation_rejects_bad_values() {
    let cases = [
        "(controls: (move_speed: 0.0))",
        "(controls: (smoothing: 1.5))",
        "(controls: (mouse_sensitivity: -1.0))",
        "(assets: (photos: []))",
        "(lighting: (sky_color: \"not a color\"))",
        "(window: (height: 0))",
    ];
    for case in cases {
        assert!(
            matches!(RoomConfig::from_ron_str(case), Err(ConfigError::Invalid { .. })),
            "expected {case} to be rejected"
        );
    }
}

#[test]
fn test_validation_rejects_nan() {
    let mut config = RoomConfig::default();
    config.controls.move_speed = f32::NAN;
    assert!(config.validate().is_err());

    let mut config = RoomConfig::default();
    config.controls.mouse_sensitivity = f32::NAN;
    assert!(config.validate().is_err());

    let mut config = RoomConfig::default();
    config.controls.interaction_distance = f32::INFINITY;
    assert!(config.validate().is_err());

    let mut config = RoomConfig::default();
    config.audio.volume = f32::NAN;
    assert!(config.validate().is_err());
}

#[test]
fn test_serialized_config_reloads() {
    let mut config = RoomConfig::default();
    config.audio.volume = 0.3;
    config.assets.photos = vec!["a.png".to_string(), "b.png".to_string()];

    let text = config.to_ron_string().unwrap();
    let reloaded = RoomConfig::from_ron_str(&text).unwrap();
    assert_eq!(reloaded, config);
}

#[test]
fn test_photos_cycle_when_fewer_configured() {
    let config = RoomConfig::from_ron_str("(assets: (photos: [\"one.png\", \"two.png\"]))").unwrap();
    assert_eq!(config.photo(0), "one.png");
    assert_eq!(config.photo(3), "two.png");
    assert_eq!(config.photo(4), "one.png");
}

#[test]
fn test_colors_accept_css_forms() {
    assert!(parse_color("test", "#1a1a2e").is_ok());
    assert!(parse_color("test", "pink").is_ok());
    assert!(parse_color("test", "rgb(10, 20, 30)").is_ok());
    assert!(parse_color("test", "#zzzzzz").is_err());
}
