//! First-person camera types and movement math
//!
//! This module contains the camera marker, the player controller component,
//! and the pure functions used by the movement systems. Walking constants
//! were tuned against a 60 Hz frame and are converted to `dt` here.

use bevy::prelude::*;

/// Frame rate the per-frame tuning constants refer to.
pub const REFERENCE_FPS: f32 = 60.0;

pub const PLAYER_SPAWN: Vec3 = Vec3::new(0.0, EYE_HEIGHT, 8.0);
pub const EYE_HEIGHT: f32 = 2.2;
pub const FIELD_OF_VIEW_DEGREES: f32 = 60.0;
pub const PITCH_LIMIT: f32 = 89.0_f32 * std::f32::consts::PI / 180.0;

/// Walkable square is `[-ROOM_HALF_EXTENT, ROOM_HALF_EXTENT]` on X and Z.
pub const ROOM_HALF_EXTENT: f32 = 9.0;

// Table footprint on the floor (XZ).
pub const TABLE_MIN: Vec2 = Vec2::new(-1.7, -4.2);
pub const TABLE_MAX: Vec2 = Vec2::new(1.7, -1.8);
pub const TABLE_SAFE_DISTANCE: f32 = 0.4;
pub const TABLE_PUSH_MARGIN: f32 = 0.1;

/// Velocities below this (units per 60 Hz frame) are not applied.
pub const MIN_APPLIED_SPEED: f32 = 0.001;

pub const CAKE_POSITION: Vec3 = Vec3::new(0.0, 1.05, -3.0);
pub const NEAR_CAKE_DISTANCE: f32 = 2.5;

pub const WISH_VIEW_POSITION: Vec3 = Vec3::new(0.0, 2.5, 0.5);
pub const WISH_FRAMING_RATE: f32 = 0.05;
pub const WISH_FRAMING_SNAP: f32 = 0.05;

/// Marker component for the main 3D camera
#[derive(Component)]
pub struct MainCamera;

/// First-person look and walk state, lives on the camera entity.
#[derive(Component, Debug, Default)]
pub struct PlayerController {
    pub yaw: f32,
    pub pitch: f32,
    /// Smoothed velocity in world units per second.
    pub velocity: Vec3,
}

impl PlayerController {
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    pub fn look(&mut self, delta: Vec2, sensitivity: f32) {
        self.yaw -= delta.x * sensitivity;
        self.pitch = (self.pitch - delta.y * sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Re-derive yaw/pitch from a rotation set elsewhere (wish framing).
    pub fn sync_from_rotation(&mut self, rotation: Quat) {
        let (yaw, pitch, _) = rotation.to_euler(EulerRot::YXZ);
        self.yaw = yaw;
        self.pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }
}

/// Cursor lock bookkeeping.
#[derive(Resource, Debug, Default)]
pub struct CursorLock {
    pub locked: bool,
    /// The player has clicked into the room at least once.
    pub entered: bool,
    /// Seconds until the cursor is grabbed again after a dialog closes.
    pub relock_in: Option<f32>,
}

/// Distance from the camera to the cake, refreshed every frame.
#[derive(Resource, Debug)]
pub struct PlayerProximity {
    pub distance_to_cake: f32,
}

impl Default for PlayerProximity {
    fn default() -> Self {
        Self {
            distance_to_cake: PLAYER_SPAWN.distance(CAKE_POSITION),
        }
    }
}

impl PlayerProximity {
    pub fn is_near(&self) -> bool {
        self.distance_to_cake < NEAR_CAKE_DISTANCE
    }
}

/// Camera glide toward the wish viewpoint.
#[derive(Resource, Debug, Default)]
pub struct WishFraming {
    pub active: bool,
}

/// Held movement keys, already normalized across layouts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveInput {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveInput {
    /// `x` is right minus left, `y` is forward minus back.
    pub fn axes(&self) -> Vec2 {
        let axis = |pos: bool, neg: bool| pos as i32 as f32 - neg as i32 as f32;
        Vec2::new(axis(self.right, self.left), axis(self.forward, self.back))
    }
}

/// Per-frame lerp factor expressed for an arbitrary `dt`.
pub fn frame_lerp_factor(per_frame: f32, dt: f32) -> f32 {
    1.0 - (1.0 - per_frame).powf(REFERENCE_FPS * dt)
}

/// Desired walk velocity in world units per second.
pub fn target_velocity(axes: Vec2, look_forward: Vec3, speed_per_frame: f32) -> Vec3 {
    let forward = Vec3::new(look_forward.x, 0.0, look_forward.z).normalize_or_zero();
    let right = forward.cross(Vec3::Y).normalize_or_zero();
    let speed = speed_per_frame * REFERENCE_FPS;
    forward * axes.y * speed + right * axes.x * speed
}

pub fn smooth_velocity(current: Vec3, target: Vec3, smoothing: f32, dt: f32) -> Vec3 {
    current.lerp(target, frame_lerp_factor(smoothing, dt))
}

/// Whether a velocity (units per second) is large enough to move the player.
pub fn should_apply(velocity: Vec3) -> bool {
    velocity.length() > MIN_APPLIED_SPEED * REFERENCE_FPS
}

/// Keep the eye inside the room at a fixed height.
pub fn clamp_to_room(position: Vec3) -> Vec3 {
    Vec3::new(
        position.x.clamp(-ROOM_HALF_EXTENT, ROOM_HALF_EXTENT),
        EYE_HEIGHT,
        position.z.clamp(-ROOM_HALF_EXTENT, ROOM_HALF_EXTENT),
    )
}

/// Push a position that ended up inside the inflated table footprint out
/// through its nearest edge.
pub fn push_out_of_table(position: Vec3) -> Vec3 {
    let min = TABLE_MIN - Vec2::splat(TABLE_SAFE_DISTANCE);
    let max = TABLE_MAX + Vec2::splat(TABLE_SAFE_DISTANCE);

    let to_left = position.x - min.x;
    let to_right = max.x - position.x;
    let to_back = position.z - min.y;
    let to_front = max.y - position.z;

    if to_left <= 0.0 || to_right <= 0.0 || to_back <= 0.0 || to_front <= 0.0 {
        return position;
    }

    let nearest = to_left.min(to_right).min(to_back).min(to_front);
    let mut out = position;
    if nearest == to_left {
        out.x = min.x - TABLE_PUSH_MARGIN;
    } else if nearest == to_right {
        out.x = max.x + TABLE_PUSH_MARGIN;
    } else if nearest == to_back {
        out.z = min.y - TABLE_PUSH_MARGIN;
    } else {
        out.z = max.y + TABLE_PUSH_MARGIN;
    }
    out
}

/// One step of the wish-view glide. Returns the new position and whether it
/// snapped onto the target.
pub fn framing_step(current: Vec3, dt: f32) -> (Vec3, bool) {
    let next = current.lerp(WISH_VIEW_POSITION, frame_lerp_factor(WISH_FRAMING_RATE, dt));
    if next.distance(WISH_VIEW_POSITION) < WISH_FRAMING_SNAP {
        (WISH_VIEW_POSITION, true)
    } else {
        (next, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / REFERENCE_FPS;

    #[test]
    fn test_frame_lerp_factor_matches_per_frame_at_60hz() {
        assert!((frame_lerp_factor(0.15, DT) - 0.15).abs() < 1e-5);
        assert!(frame_lerp_factor(0.15, DT * 2.0) > 0.15);
    }

    #[test]
    fn test_clamp_to_room() {
        let p = clamp_to_room(Vec3::new(12.0, 5.0, -10.0));
        assert_eq!(p, Vec3::new(9.0, EYE_HEIGHT, -9.0));
    }

    #[test]
    fn test_push_out_of_table_nearest_edge() {
        // Just inside the inflated front edge (z max = -1.4).
        let p = push_out_of_table(Vec3::new(0.0, EYE_HEIGHT, -1.5));
        assert!((p.z - (-1.3)).abs() < 1e-5);
        assert_eq!(p.x, 0.0);

        // Just inside the inflated left edge (x min = -2.1).
        let p = push_out_of_table(Vec3::new(-2.0, EYE_HEIGHT, -3.0));
        assert!((p.x - (-2.2)).abs() < 1e-5);
    }

    #[test]
    fn test_outside_table_untouched() {
        let p = Vec3::new(3.0, EYE_HEIGHT, -3.0);
        assert_eq!(push_out_of_table(p), p);
    }

    #[test]
    fn test_target_velocity_ignores_pitch() {
        let look = Vec3::new(0.0, -0.9, -0.1);
        let v = target_velocity(Vec2::new(0.0, 1.0), look, 0.12);
        assert!(v.y.abs() < 1e-6);
        assert!((v.length() - 0.12 * REFERENCE_FPS).abs() < 1e-4);
        assert!(v.z < 0.0);
    }

    #[test]
    fn test_strafe_right_is_positive_x_when_facing_forward() {
        let v = target_velocity(Vec2::new(1.0, 0.0), Vec3::NEG_Z, 0.12);
        assert!(v.x > 0.0);
    }

    #[test]
    fn test_move_input_axes() {
        let input = MoveInput {
            forward: true,
            back: false,
            left: true,
            right: true,
        };
        assert_eq!(input.axes(), Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_framing_eventually_snaps() {
        let mut pos = PLAYER_SPAWN;
        let mut snapped = false;
        for _ in 0..600 {
            let (next, done) = framing_step(pos, DT);
            pos = next;
            if done {
                snapped = true;
                break;
            }
        }
        assert!(snapped);
        assert_eq!(pos, WISH_VIEW_POSITION);
    }

    #[test]
    fn test_look_clamps_pitch() {
        let mut controller = PlayerController::default();
        controller.look(Vec2::new(0.0, -100_000.0), 0.002);
        assert!((controller.pitch - PITCH_LIMIT).abs() < 1e-6);
    }
}
