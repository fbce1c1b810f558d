//! Room configuration types and loading
//!
//! The configuration lives in a RON file next to the executable. Every field
//! has a default, so a partial file (or no file at all) is valid.

use std::fs;
use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default location of the configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "birthday_room.ron";

/// Errors raised while loading or validating the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] ron::Error),

    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

// ============================================================================
// Sections
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowSetting {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

impl Default for WindowSetting {
    fn default() -> Self {
        Self {
            title: default_title(),
            width: default_width(),
            height: default_height(),
        }
    }
}

fn default_title() -> String {
    "Birthday Room".to_string()
}
fn default_width() -> u32 {
    1280
}
fn default_height() -> u32 {
    720
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioSetting {
    #[serde(default = "default_music")]
    pub music: String,
    #[serde(default = "default_volume")]
    pub volume: f32,
    #[serde(default)]
    pub start_muted: bool,
}

impl Default for AudioSetting {
    fn default() -> Self {
        Self {
            music: default_music(),
            volume: default_volume(),
            start_muted: false,
        }
    }
}

fn default_music() -> String {
    "audio/song.mp3".to_string()
}
fn default_volume() -> f32 {
    0.5
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetSetting {
    /// Photos shown in the pickable frames and the wall galleries, in order.
    #[serde(default = "default_photos")]
    pub photos: Vec<String>,
    #[serde(default = "default_gallery_backing")]
    pub gallery_backing: String,
    #[serde(default = "default_bouquet_model")]
    pub bouquet_model: String,
    /// Must contain Arabic glyphs, the default Bevy font does not.
    #[serde(default = "default_font")]
    pub font: String,
}

impl Default for AssetSetting {
    fn default() -> Self {
        Self {
            photos: default_photos(),
            gallery_backing: default_gallery_backing(),
            bouquet_model: default_bouquet_model(),
            font: default_font(),
        }
    }
}

fn default_photos() -> Vec<String> {
    (1..=6).map(|i| format!("photos/image_{i}.png")).collect()
}
fn default_gallery_backing() -> String {
    "photos/frame-bg.jpg".to_string()
}
fn default_bouquet_model() -> String {
    "models/flower_bouquet.glb".to_string()
}
fn default_font() -> String {
    "fonts/NotoNaskhArabic-Regular.ttf".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlSetting {
    /// Radians of look rotation per pixel of mouse motion.
    #[serde(default = "default_mouse_sensitivity")]
    pub mouse_sensitivity: f32,
    /// Walk speed in world units per 60 Hz frame.
    #[serde(default = "default_move_speed")]
    pub move_speed: f32,
    /// Velocity smoothing factor per 60 Hz frame, in (0, 1].
    #[serde(default = "default_smoothing")]
    pub smoothing: f32,
    #[serde(default = "default_interaction_distance")]
    pub interaction_distance: f32,
}

impl Default for ControlSetting {
    fn default() -> Self {
        Self {
            mouse_sensitivity: default_mouse_sensitivity(),
            move_speed: default_move_speed(),
            smoothing: default_smoothing(),
            interaction_distance: default_interaction_distance(),
        }
    }
}

fn default_mouse_sensitivity() -> f32 {
    0.002
}
fn default_move_speed() -> f32 {
    0.12
}
fn default_smoothing() -> f32 {
    0.15
}
fn default_interaction_distance() -> f32 {
    5.0
}

/// Scale factors from the scene's unitless light levels to Bevy units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightingSetting {
    #[serde(default = "default_point_lumens")]
    pub point_lumens_per_unit: f32,
    #[serde(default = "default_spot_lumens")]
    pub spot_lumens_per_unit: f32,
    #[serde(default = "default_candle_lumens")]
    pub candle_lumens_per_unit: f32,
    #[serde(default = "default_ambient_brightness")]
    pub ambient_brightness_per_unit: f32,
    #[serde(default = "default_sky_color")]
    pub sky_color: String,
    #[serde(default = "default_fog_color")]
    pub fog_color: String,
}

impl Default for LightingSetting {
    fn default() -> Self {
        Self {
            point_lumens_per_unit: default_point_lumens(),
            spot_lumens_per_unit: default_spot_lumens(),
            candle_lumens_per_unit: default_candle_lumens(),
            ambient_brightness_per_unit: default_ambient_brightness(),
            sky_color: default_sky_color(),
            fog_color: default_fog_color(),
        }
    }
}

fn default_point_lumens() -> f32 {
    400_000.0
}
fn default_spot_lumens() -> f32 {
    1_000_000.0
}
fn default_candle_lumens() -> f32 {
    12_000.0
}
fn default_ambient_brightness() -> f32 {
    400.0
}
fn default_sky_color() -> String {
    "#0b0b1e".to_string()
}
fn default_fog_color() -> String {
    "#1a1a2e".to_string()
}

// ============================================================================
// RoomConfig
// ============================================================================

/// Where the resolved configuration was read from.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    /// No file at this path.
    Defaults(PathBuf),
}

/// Resolved configuration, inserted as a resource at startup.
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoomConfig {
    #[serde(default)]
    pub window: WindowSetting,
    #[serde(default)]
    pub audio: AudioSetting,
    #[serde(default)]
    pub assets: AssetSetting,
    #[serde(default)]
    pub controls: ControlSetting,
    #[serde(default)]
    pub lighting: LightingSetting,
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub muted: bool,
    pub volume: Option<f32>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl RoomConfig {
    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::load_with_source(path).map(|(config, _)| config)
    }

    /// Like [`RoomConfig::load`], also reporting where the values came from.
    /// Runs before logging is set up, so callers log the source later.
    pub fn load_with_source(path: &Path) -> Result<(Self, ConfigSource), ConfigError> {
        if !path.exists() {
            return Ok((Self::default(), ConfigSource::Defaults(path.to_path_buf())));
        }

        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_ron_str(&text)?;
        Ok((config, ConfigSource::File(path.to_path_buf())))
    }

    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        let pretty = ron::ser::PrettyConfig::new().depth_limit(3);
        Ok(ron::ser::to_string_pretty(self, pretty)?)
    }

    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if overrides.muted {
            self.audio.start_muted = true;
        }
        if let Some(volume) = overrides.volume {
            self.audio.volume = volume;
        }
        if let Some(width) = overrides.width {
            self.window.width = width;
        }
        if let Some(height) = overrides.height {
            self.window.height = height;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.audio.volume) {
            return Err(invalid("audio.volume", "must be within 0.0..=1.0"));
        }
        if self.window.width == 0 || self.window.height == 0 {
            return Err(invalid("window", "width and height must be non-zero"));
        }
        if !is_positive(self.controls.mouse_sensitivity) {
            return Err(invalid("controls.mouse_sensitivity", "must be positive"));
        }
        if !is_positive(self.controls.move_speed) {
            return Err(invalid("controls.move_speed", "must be positive"));
        }
        if !(self.controls.smoothing > 0.0 && self.controls.smoothing <= 1.0) {
            return Err(invalid("controls.smoothing", "must be within (0.0, 1.0]"));
        }
        if !is_positive(self.controls.interaction_distance) {
            return Err(invalid("controls.interaction_distance", "must be positive"));
        }
        if self.assets.photos.is_empty() {
            return Err(invalid("assets.photos", "at least one photo is required"));
        }
        parse_color("lighting.sky_color", &self.lighting.sky_color)?;
        parse_color("lighting.fog_color", &self.lighting.fog_color)?;
        Ok(())
    }

    /// Photo for slot `index`, cycling when fewer photos are configured.
    pub fn photo(&self, index: usize) -> &str {
        let photos = &self.assets.photos;
        if photos.is_empty() {
            return "";
        }
        &photos[index % photos.len()]
    }

    pub fn sky_color(&self) -> Color {
        parse_color("lighting.sky_color", &self.lighting.sky_color).unwrap_or(Color::BLACK)
    }

    pub fn fog_color(&self) -> Color {
        parse_color("lighting.fog_color", &self.lighting.fog_color).unwrap_or(Color::BLACK)
    }
}

/// Positive and finite; NaN fails.
fn is_positive(value: f32) -> bool {
    value > 0.0 && value.is_finite()
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}

/// Parse a CSS color string (`#rrggbb`, `pink`, `rgb(...)`).
pub fn parse_color(field: &'static str, value: &str) -> Result<Color, ConfigError> {
    let parsed = csscolorparser::parse(value).map_err(|e| ConfigError::Invalid {
        field,
        reason: e.to_string(),
    })?;
    let [r, g, b, a] = parsed.to_rgba8();
    Ok(Color::srgba_u8(r, g, b, a))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = RoomConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.assets.photos.len(), 6);
        assert_eq!(config.audio.volume, 0.5);
        assert_eq!(config.controls.interaction_distance, 5.0);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config = RoomConfig::from_ron_str("(audio: (volume: 0.25))").unwrap();
        assert_eq!(config.audio.volume, 0.25);
        assert_eq!(config.audio.music, "audio/song.mp3");
        assert_eq!(config.window.width, 1280);
    }

    #[test]
    fn test_rejects_out_of_range_volume() {
        let err = RoomConfig::from_ron_str("(audio: (volume: 1.5))").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "audio.volume", .. }));
    }

    #[test]
    fn test_rejects_bad_color() {
        let err = RoomConfig::from_ron_str("(lighting: (fog_color: \"#zzzzzz\"))").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_malformed_ron_is_parse_error() {
        let err = RoomConfig::from_ron_str("(audio: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_overrides() {
        let mut config = RoomConfig::default();
        config.apply_overrides(&ConfigOverrides {
            muted: true,
            volume: Some(0.1),
            width: Some(800),
            height: None,
        });
        assert!(config.audio.start_muted);
        assert_eq!(config.audio.volume, 0.1);
        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 720);
    }

    #[test]
    fn test_photo_cycles() {
        let mut config = RoomConfig::default();
        config.assets.photos = vec!["a.png".into(), "b.png".into()];
        assert_eq!(config.photo(0), "a.png");
        assert_eq!(config.photo(3), "b.png");
    }

    #[test]
    fn test_round_trip_through_ron() {
        let config = RoomConfig::default();
        let text = config.to_ron_string().unwrap();
        assert_eq!(RoomConfig::from_ron_str(&text).unwrap(), config);
    }
}
