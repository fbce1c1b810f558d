//! Candle State
//!
//! Flame flicker math, smoke and spark motion, the floating hearts around the
//! cake, and the blow-out progression. Everything here is a pure function of
//! elapsed time so it can be tested without an `App`.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, TAU};

use bevy::prelude::*;

use crate::room::types::REFERENCE_FPS;

pub const CAKE_LAYER_HEIGHT: f32 = 0.15;
pub const CAKE_BASE_RADIUS: f32 = 0.6;
pub const CANDLE_HEIGHT: f32 = 0.25;
/// Height of the flame anchor above a candle's center.
pub const FLAME_HEIGHT: f32 = CANDLE_HEIGHT / 2.0 + 0.05;
/// Height of a candle's center above the cake origin.
pub const CANDLE_CENTER_Y: f32 = CAKE_LAYER_HEIGHT * 3.5 + 0.11 + CANDLE_HEIGHT / 2.0;

/// Candle offsets on the top tier of the cake.
pub const CANDLE_OFFSETS: [Vec2; 5] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(0.15, 0.15),
    Vec2::new(-0.15, 0.15),
    Vec2::new(0.15, -0.15),
    Vec2::new(-0.15, -0.15),
];

pub const SMOKE_PUFFS_PER_CANDLE: usize = 3;
pub const SPARKS_PER_CANDLE: usize = 4;
pub const CAKE_HEART_COUNT: usize = 4;
pub const CANDLE_LIGHT_RANGE: f32 = 1.5;

/// Blow progress gained per second (0.02 per 60 Hz frame).
pub const BLOW_RATE: f32 = 0.02 * REFERENCE_FPS;

/// Phase offset that keeps the candles out of step with each other.
pub fn phase_offset(index: usize) -> f32 {
    index as f32 * 1.234
}

/// Combined flicker signal, roughly in `[-0.3, 0.3]`.
pub fn flicker(time: f32, index: usize) -> f32 {
    let o = phase_offset(index);
    (time * 12.0 + o).sin() * 0.15
        + (time * 8.0 + o * 1.5).cos() * 0.1
        + (time * 20.0 + o * 2.0).sin() * 0.05
}

// ============================================================================
// Blow-out state
// ============================================================================

/// Resource tracking whether the candles burn, and how far a blow has got.
#[derive(Resource, Debug, Clone)]
pub struct CandleState {
    pub lit: bool,
    pub blowing: bool,
    /// Blow progress in `[0, 1]`.
    pub progress: f32,
}

impl Default for CandleState {
    fn default() -> Self {
        Self {
            lit: true,
            blowing: false,
            progress: 0.0,
        }
    }
}

impl CandleState {
    /// Start blowing. Ignored while already blowing or once extinguished.
    pub fn begin_blow(&mut self) -> bool {
        if self.blowing || !self.lit {
            return false;
        }
        self.blowing = true;
        self.progress = 0.0;
        true
    }

    /// Advance the blow. Returns true on the frame the flames go out.
    pub fn advance(&mut self, dt: f32) -> bool {
        if !self.blowing {
            return false;
        }
        self.progress = (self.progress + BLOW_RATE * dt).min(1.0);
        if self.progress >= 1.0 {
            self.blowing = false;
            self.lit = false;
            return true;
        }
        false
    }

    /// Flame size and brightness multiplier.
    pub fn intensity(&self) -> f32 {
        if !self.lit {
            0.0
        } else if self.blowing {
            1.0 - self.progress
        } else {
            1.0
        }
    }

    /// Sideways lean of the outer flame while blowing.
    pub fn sway(&self) -> f32 {
        if self.blowing {
            self.progress * 0.05
        } else {
            0.0
        }
    }
}

// ============================================================================
// Flames
// ============================================================================

/// Local pose and material values for one flame layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerSample {
    pub offset: Vec3,
    pub scale: Vec3,
    pub emissive: f32,
    pub opacity: f32,
}

/// All animated values of one candle's flame at an instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlameSample {
    pub outer: LayerSample,
    pub inner: LayerSample,
    pub core: LayerSample,
    /// Green channel of the outer layer's emissive color.
    pub outer_green: f32,
    pub light_intensity: f32,
    /// Hue of the candle light in `[0, 1]`.
    pub light_hue: f32,
}

impl FlameSample {
    pub fn at(time: f32, index: usize, intensity: f32, sway: f32) -> Self {
        let o = phase_offset(index);
        let f = flicker(time, index);
        let i = intensity;

        let outer = LayerSample {
            offset: Vec3::new(
                (time * 3.0 + o).sin() * 0.01 + sway,
                0.0,
                (time * 2.5 + o).cos() * 0.01,
            ),
            scale: Vec3::new(
                (1.0 - f * 0.2) * i,
                (1.0 + f * 0.3) * i,
                (1.0 - f * 0.2) * i,
            ),
            emissive: (1.5 + f * 0.8) * i,
            opacity: 0.85 * i,
        };

        let inner = LayerSample {
            offset: Vec3::new(
                (time * 4.0 + o).sin() * 0.008,
                (time * 6.0 + o).sin() * 0.005,
                (time * 3.5 + o).cos() * 0.008,
            ),
            scale: Vec3::new(
                (1.0 - f * 0.15) * i,
                (1.0 + f * 0.4) * i,
                (1.0 - f * 0.15) * i,
            ),
            emissive: (2.0 + f * 1.2) * i,
            opacity: 0.9 * i,
        };

        let core = LayerSample {
            offset: Vec3::new(0.0, (time * 8.0 + o).sin() * 0.003, 0.0),
            scale: Vec3::new(i, (1.0 + f * 0.5) * i, i),
            emissive: (3.0 + f * 1.5) * i,
            opacity: 0.95 * i,
        };

        Self {
            outer,
            inner,
            core,
            outer_green: 0.3 + (time * 5.0 + o).sin() * 0.1,
            light_intensity: (1.8 + f * 0.6) * i,
            light_hue: 0.1 + (time * 3.0 + o).sin() * 0.02,
        }
    }

    pub fn light_color(&self) -> Color {
        Color::hsl(self.light_hue * 360.0, 1.0, 0.6)
    }
}

// ============================================================================
// Smoke
// ============================================================================

/// One rising smoke puff above a candle, in candle-local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmokePuff {
    pub position: Vec3,
    pub opacity: f32,
}

impl SmokePuff {
    pub fn new(slot: usize) -> Self {
        Self {
            position: Vec3::new(0.0, FLAME_HEIGHT + 0.05 + slot as f32 * 0.02, 0.0),
            opacity: 0.3,
        }
    }

    fn reset_height(slot: usize) -> f32 {
        0.05 + slot as f32 * 0.02
    }

    /// Move the puff up one step, recycling it above the ceiling. Smoke
    /// rises faster and higher once the candles are out.
    pub fn step(&mut self, dt: f32, time: f32, slot: usize, lit: bool) {
        let frames = dt * REFERENCE_FPS;
        let wobble = slot as f32 * 0.5;
        let (rise, ceiling, base) = if lit {
            (0.008, 0.3, 0.3)
        } else {
            (0.015, 0.5, 0.5)
        };

        self.position.y += rise * frames;
        self.position.x += (time * 2.0 + wobble).sin() * 0.002 * frames;
        self.position.z += (time * 1.8 + wobble).cos() * 0.002 * frames;

        if self.position.y > ceiling {
            self.position = Vec3::new(0.0, Self::reset_height(slot), 0.0);
            self.opacity = base;
        } else {
            self.opacity = (base - self.position.y).max(0.0);
        }
    }

    pub fn scale(&self, lit: bool) -> f32 {
        (1.0 + self.position.y * 2.0) * if lit { 1.0 } else { 1.5 }
    }
}

// ============================================================================
// Sparks and hearts
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SparkSample {
    pub offset: Vec3,
    pub emissive: f32,
    pub scale: f32,
}

/// Spark `slot` of candle `candle`, orbiting the flame.
pub fn spark_pose(time: f32, candle: usize, slot: usize) -> SparkSample {
    let s = (candle * 2 + slot) as f32;
    let angle = slot as f32 / SPARKS_PER_CANDLE as f32 * TAU + time * 2.0;
    let radius = 0.035 + (time * 5.0 + s).sin() * 0.008;
    let height = (time * 4.0 + s).sin() * 0.015 + (slot % 2) as f32 * 0.01;

    SparkSample {
        offset: Vec3::new(angle.cos() * radius, height, angle.sin() * radius),
        emissive: 2.5 + (time * 8.0 + s).sin(),
        scale: if (time * 6.0 + s).sin() > 0.9 { 1.5 } else { 1.0 },
    }
}

/// Floating heart `index` circling the cake, relative to the cake origin.
pub fn heart_pose(time: f32, index: usize) -> Transform {
    let i = index as f32;
    let o = i * 0.7;
    let height = 0.5 + i * 0.15 + (time * 1.5 + o).sin() * 0.08;
    let angle = i / CAKE_HEART_COUNT as f32 * TAU + time * 0.3 + FRAC_PI_4;
    let radius = 0.85 + (time * 2.0 + o).sin() * 0.05;
    let scale = 0.15 * (1.0 + (time * 2.0 + o).sin() * 0.15);

    Transform::from_xyz(angle.cos() * radius, height, angle.sin() * radius)
        .with_rotation(Quat::from_rotation_y(time * 0.5 + i * FRAC_PI_2))
        .with_scale(Vec3::splat(scale))
}

// ============================================================================
// Components
// ============================================================================

/// Root of the cake.
#[derive(Component)]
pub struct BirthdayCake;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlamePart {
    Outer,
    Inner,
    Core,
}

/// One animated flame mesh. Each carries its own material.
#[derive(Component, Debug, Clone, Copy)]
pub struct FlameLayer {
    pub candle: usize,
    pub part: FlamePart,
    /// Rest offset inside the flame anchor.
    pub rest: Vec3,
}

/// Static glow around a flame; shrinks with the flame.
#[derive(Component)]
pub struct FlameGlow;

#[derive(Component)]
pub struct CandleLight {
    pub candle: usize,
}

#[derive(Component, Debug, Clone)]
pub struct SmokeParticle {
    pub slot: usize,
    pub puff: SmokePuff,
}

#[derive(Component)]
pub struct Spark {
    pub candle: usize,
    pub slot: usize,
}

#[derive(Component)]
pub struct CakeHeart {
    pub index: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flicker_formula() {
        let t: f32 = 0.37;
        let o: f32 = 2.0 * 1.234;
        let expected = (12.0 * t + o).sin() * 0.15
            + (8.0 * t + 1.5 * o).cos() * 0.1
            + (20.0 * t + 2.0 * o).sin() * 0.05;
        assert!((flicker(t, 2) - expected).abs() < 1e-6);
        assert!(flicker(t, 2).abs() <= 0.3 + 1e-6);
    }

    #[test]
    fn test_extinguished_flame_is_zeroed() {
        let sample = FlameSample::at(1.5, 0, 0.0, 0.0);
        assert_eq!(sample.outer.scale, Vec3::ZERO);
        assert_eq!(sample.core.opacity, 0.0);
        assert_eq!(sample.light_intensity, 0.0);
    }

    #[test]
    fn test_begin_blow_is_idempotent() {
        let mut state = CandleState::default();
        assert!(state.begin_blow());
        state.advance(0.1);
        let progress = state.progress;
        assert!(!state.begin_blow());
        assert_eq!(state.progress, progress);
    }

    #[test]
    fn test_extinguish_fires_once() {
        let mut state = CandleState::default();
        state.begin_blow();
        let mut fired = 0;
        for _ in 0..120 {
            if state.advance(1.0 / 60.0) {
                fired += 1;
            }
        }
        assert_eq!(fired, 1);
        assert!(!state.lit);
        assert_eq!(state.intensity(), 0.0);
        assert!(!state.begin_blow());
    }

    #[test]
    fn test_blow_takes_about_fifty_frames() {
        let mut state = CandleState::default();
        state.begin_blow();
        let mut frames = 0;
        while !state.advance(1.0 / 60.0) {
            frames += 1;
            assert!(frames < 100);
        }
        assert!((49..=50).contains(&frames));
    }

    #[test]
    fn test_smoke_resets_above_lit_ceiling() {
        let mut puff = SmokePuff {
            position: Vec3::new(0.01, 0.299, 0.0),
            opacity: 0.0,
        };
        puff.step(1.0 / 60.0, 0.0, 1, true);
        assert!((puff.position - Vec3::new(0.0, 0.07, 0.0)).length() < 1e-6);
        assert_eq!(puff.opacity, 0.3);
    }

    #[test]
    fn test_smoke_rises_higher_when_extinguished() {
        let mut puff = SmokePuff {
            position: Vec3::new(0.0, 0.35, 0.0),
            opacity: 0.0,
        };
        puff.step(1.0 / 60.0, 0.0, 0, false);
        assert!(puff.position.y > 0.35);
        assert!((puff.opacity - (0.5 - puff.position.y)).abs() < 1e-6);
        assert!((puff.scale(false) - (1.0 + puff.position.y * 2.0) * 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_spark_pop() {
        // sin(6t + s) with s = 0 peaks at t = pi/12.
        let t = std::f32::consts::PI / 12.0;
        assert_eq!(spark_pose(t, 0, 0).scale, 1.5);
        assert_eq!(spark_pose(0.0, 0, 0).scale, 1.0);
    }

    #[test]
    fn test_heart_orbit_radius() {
        let pose = heart_pose(0.0, 0);
        let radius = Vec2::new(pose.translation.x, pose.translation.z).length();
        assert!((radius - 0.85).abs() < 1e-5);
        assert!((pose.translation.y - 0.5).abs() < 1e-5);
        assert!((pose.scale.x - 0.15).abs() < 1e-6);
    }
}
