//! Room lighting levels and music state

use bevy::prelude::*;

/// The room lights whose level follows the player.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomLight {
    Pink,
    Gold,
    Magenta,
    CakeSpot,
}

impl RoomLight {
    pub const ALL: [RoomLight; 4] = [
        RoomLight::Pink,
        RoomLight::Gold,
        RoomLight::Magenta,
        RoomLight::CakeSpot,
    ];

    pub fn position(self) -> Vec3 {
        match self {
            RoomLight::Pink => Vec3::new(0.0, 3.0, 0.0),
            RoomLight::Gold => Vec3::new(3.0, 2.0, 3.0),
            RoomLight::Magenta => Vec3::new(-3.0, 2.0, -3.0),
            RoomLight::CakeSpot => Vec3::new(0.0, 4.0, -3.0),
        }
    }

    pub fn range(self) -> f32 {
        match self {
            RoomLight::Pink => 12.0,
            _ => 20.0,
        }
    }

    pub fn color_hex(self) -> &'static str {
        match self {
            RoomLight::Pink => "#ff69b4",
            RoomLight::Gold => "#ffd700",
            RoomLight::Magenta => "#ff1493",
            RoomLight::CakeSpot => "#ffffff",
        }
    }
}

/// Unitless light levels; scaled to lumens by the lighting config.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightingLevels {
    pub ambient: f32,
    pub pink: f32,
    pub gold: f32,
    pub magenta: f32,
    pub cake_spot: f32,
}

impl LightingLevels {
    pub const NORMAL: LightingLevels = LightingLevels {
        ambient: 0.5,
        pink: 1.0,
        gold: 0.5,
        magenta: 0.5,
        cake_spot: 0.8,
    };

    pub const DIMMED: LightingLevels = LightingLevels {
        ambient: 0.15,
        pink: 0.2,
        gold: 0.1,
        magenta: 0.1,
        cake_spot: 0.2,
    };

    /// The room dims while the player stands by the lit cake. Once the
    /// candles are out the lights stay up.
    pub fn for_state(near_cake: bool, candles_blown_out: bool) -> Self {
        if near_cake && !candles_blown_out {
            Self::DIMMED
        } else {
            Self::NORMAL
        }
    }

    pub fn level(&self, light: RoomLight) -> f32 {
        match light {
            RoomLight::Pink => self.pink,
            RoomLight::Gold => self.gold,
            RoomLight::Magenta => self.magenta,
            RoomLight::CakeSpot => self.cake_spot,
        }
    }
}

/// Progress of the birthday moment after a wish.
#[derive(Resource, Debug, Default)]
pub struct Celebration {
    pub candles_blown_out: bool,
    /// Seconds left before the blow-out is considered finished.
    pub blow_out_in: Option<f32>,
}

/// Delay between submitting a wish and the room settling after the blow.
pub const BLOW_OUT_SETTLE_SECS: f32 = 3.5;

impl Celebration {
    pub fn schedule_blow_out(&mut self) {
        if self.candles_blown_out || self.blow_out_in.is_some() {
            return;
        }
        self.blow_out_in = Some(BLOW_OUT_SETTLE_SECS);
    }

    /// Returns true on the tick that finishes the blow-out.
    pub fn tick(&mut self, dt: f32) -> bool {
        let Some(remaining) = self.blow_out_in else {
            return false;
        };
        let remaining = remaining - dt;
        if remaining <= 0.0 {
            self.blow_out_in = None;
            self.candles_blown_out = true;
            true
        } else {
            self.blow_out_in = Some(remaining);
            false
        }
    }
}

/// Marker for the background music entity.
#[derive(Component)]
pub struct BackgroundMusic;

#[derive(Resource, Debug, Default)]
pub struct MusicState {
    pub muted: bool,
    pub started: bool,
    pub failed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_table() {
        assert_eq!(LightingLevels::for_state(false, false), LightingLevels::NORMAL);
        assert_eq!(LightingLevels::for_state(true, false), LightingLevels::DIMMED);
        assert_eq!(LightingLevels::for_state(true, true), LightingLevels::NORMAL);
        assert_eq!(LightingLevels::DIMMED.level(RoomLight::CakeSpot), 0.2);
    }

    #[test]
    fn test_blow_out_settles_once() {
        let mut celebration = Celebration::default();
        celebration.schedule_blow_out();
        assert!(!celebration.tick(3.0));
        assert!(celebration.tick(0.6));
        assert!(celebration.candles_blown_out);
        assert!(!celebration.tick(1.0));

        // A second wish cannot restart it.
        celebration.schedule_blow_out();
        assert!(celebration.blow_out_in.is_none());
    }
}
