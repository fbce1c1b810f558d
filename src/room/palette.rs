//! Material helpers shared by the scene builders
//!
//! Scene colors are written as CSS hex strings, the same way they appear in
//! the room's design notes, and parsed once at spawn time.

use bevy::prelude::*;

use crate::room::types::parse_color;

/// Emissive strength of `1.0` in scene units, in Bevy's emissive scale.
pub const EMISSIVE_SCALE: f32 = 4.0;

/// Parse a hex color. Falls back to magenta so a typo is visible in-scene.
pub fn hex(value: &str) -> Color {
    parse_color("palette", value).unwrap_or(Color::srgb(1.0, 0.0, 1.0))
}

/// Linear emissive color for `value` at `intensity` scene units.
pub fn glow(value: &str, intensity: f32) -> LinearRgba {
    let linear = hex(value).to_linear();
    LinearRgba::rgb(linear.red, linear.green, linear.blue) * (intensity * EMISSIVE_SCALE)
}

/// Surface description used by the scene builders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Finish {
    pub color: &'static str,
    pub roughness: f32,
    pub metallic: f32,
    pub emissive: Option<(&'static str, f32)>,
    pub opacity: f32,
}

impl Finish {
    pub const fn matte(color: &'static str, roughness: f32) -> Self {
        Self {
            color,
            roughness,
            metallic: 0.0,
            emissive: None,
            opacity: 1.0,
        }
    }

    pub const fn metal(color: &'static str, metallic: f32, roughness: f32) -> Self {
        Self {
            color,
            roughness,
            metallic,
            emissive: None,
            opacity: 1.0,
        }
    }

    pub const fn glowing(mut self, color: &'static str, intensity: f32) -> Self {
        self.emissive = Some((color, intensity));
        self
    }

    pub const fn translucent(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn material(&self) -> StandardMaterial {
        let base = hex(self.color);
        StandardMaterial {
            base_color: base.with_alpha(self.opacity),
            perceptual_roughness: self.roughness,
            metallic: self.metallic,
            emissive: self
                .emissive
                .map(|(color, intensity)| glow(color, intensity))
                .unwrap_or(LinearRgba::BLACK),
            alpha_mode: if self.opacity < 1.0 {
                AlphaMode::Blend
            } else {
                AlphaMode::Opaque
            },
            ..default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_parses() {
        let c = hex("#ff0000").to_srgba();
        assert!((c.red - 1.0).abs() < 1e-6);
        assert!(c.green.abs() < 1e-6);
    }

    #[test]
    fn test_translucent_finish_blends() {
        let material = Finish::matte("#ffffff", 0.5).translucent(0.4).material();
        assert!(matches!(material.alpha_mode, AlphaMode::Blend));
        assert!((material.base_color.alpha() - 0.4).abs() < 1e-6);
    }
}
