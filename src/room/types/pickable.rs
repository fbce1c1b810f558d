//! Pickable objects and the pickup state machine
//!
//! Photo frames and the flower bouquet can be picked up and carried in front
//! of the camera. Only one object is held at a time.

use std::fmt;

use bevy::prelude::*;

/// Offset from the camera, in camera space, of a held photo frame.
pub const FRAME_HOLD_OFFSET: Vec3 = Vec3::new(0.0, 0.05, -0.5);
/// Offset from the camera, in camera space, of the held bouquet.
pub const BOUQUET_HOLD_OFFSET: Vec3 = Vec3::new(0.2, -0.7, -0.7);

/// Number of pickable photo frames on the table.
pub const PICKABLE_FRAME_COUNT: u8 = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PickableKind {
    Frame,
    Bouquet,
}

impl PickableKind {
    pub fn hold_offset(self) -> Vec3 {
        match self {
            PickableKind::Frame => FRAME_HOLD_OFFSET,
            PickableKind::Bouquet => BOUQUET_HOLD_OFFSET,
        }
    }
}

/// Stable identifier of a pickable (`frame-1` .. `frame-6`, `flower-bouquet`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PickableId {
    Frame(u8),
    Bouquet,
}

impl PickableId {
    pub fn kind(self) -> PickableKind {
        match self {
            PickableId::Frame(_) => PickableKind::Frame,
            PickableId::Bouquet => PickableKind::Bouquet,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        if s == "flower-bouquet" {
            return Some(PickableId::Bouquet);
        }
        let number: u8 = s.strip_prefix("frame-")?.parse().ok()?;
        (1..=PICKABLE_FRAME_COUNT)
            .contains(&number)
            .then_some(PickableId::Frame(number))
    }
}

impl fmt::Display for PickableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PickableId::Frame(n) => write!(f, "frame-{n}"),
            PickableId::Bouquet => write!(f, "flower-bouquet"),
        }
    }
}

/// Component on the root entity of every pickable object.
#[derive(Component, Debug, Clone)]
pub struct PickableObject {
    pub id: PickableId,
    /// Where the object rests when not held.
    pub home: Transform,
}

/// A single change of held state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickupTransition {
    pub id: PickableId,
    pub held: bool,
}

/// Resource tracking what the crosshair is over and what is being carried.
#[derive(Resource, Debug, Default)]
pub struct PickupState {
    hovered: Option<PickableId>,
    held: Option<PickableId>,
}

impl PickupState {
    pub fn hovered(&self) -> Option<PickableId> {
        self.hovered
    }

    pub fn held(&self) -> Option<PickableId> {
        self.held
    }

    pub fn is_held(&self, id: PickableId) -> bool {
        self.held == Some(id)
    }

    /// Update the hovered object. Returns true when it changed.
    pub fn set_hovered(&mut self, hit: Option<PickableId>) -> bool {
        if self.hovered == hit {
            return false;
        }
        self.hovered = hit;
        true
    }

    /// Resolve a click against the current hover target.
    ///
    /// Clicking the held object drops it; clicking another object while
    /// holding one drops the held object first, then picks the new one.
    pub fn click(&mut self) -> Vec<PickupTransition> {
        let Some(target) = self.hovered else {
            return Vec::new();
        };

        match self.held {
            Some(held) if held == target => {
                self.held = None;
                vec![PickupTransition {
                    id: held,
                    held: false,
                }]
            }
            Some(held) => {
                self.held = Some(target);
                vec![
                    PickupTransition {
                        id: held,
                        held: false,
                    },
                    PickupTransition {
                        id: target,
                        held: true,
                    },
                ]
            }
            None => {
                self.held = Some(target);
                vec![PickupTransition {
                    id: target,
                    held: true,
                }]
            }
        }
    }

    pub fn drop_held(&mut self) -> Option<PickupTransition> {
        self.held.take().map(|id| PickupTransition { id, held: false })
    }
}

/// World pose of an object carried by a camera at `camera`.
pub fn held_pose(camera: &Transform, kind: PickableKind) -> (Vec3, Quat) {
    let translation = camera.translation + camera.rotation * kind.hold_offset();
    (translation, camera.rotation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_round_trip_names() {
        assert_eq!(PickableId::Frame(3).to_string(), "frame-3");
        assert_eq!(PickableId::parse("frame-6"), Some(PickableId::Frame(6)));
        assert_eq!(PickableId::parse("frame-7"), None);
        assert_eq!(
            PickableId::parse("flower-bouquet"),
            Some(PickableId::Bouquet)
        );
        assert_eq!(PickableId::parse("vase"), None);
    }

    #[test]
    fn test_click_without_hover_is_noop() {
        let mut state = PickupState::default();
        assert!(state.click().is_empty());
        assert_eq!(state.held(), None);
    }

    #[test]
    fn test_click_same_object_toggles() {
        let mut state = PickupState::default();
        state.set_hovered(Some(PickableId::Bouquet));
        assert_eq!(
            state.click(),
            vec![PickupTransition {
                id: PickableId::Bouquet,
                held: true
            }]
        );
        assert_eq!(
            state.click(),
            vec![PickupTransition {
                id: PickableId::Bouquet,
                held: false
            }]
        );
        assert_eq!(state.held(), None);
    }

    #[test]
    fn test_hover_change_detection() {
        let mut state = PickupState::default();
        assert!(state.set_hovered(Some(PickableId::Frame(1))));
        assert!(!state.set_hovered(Some(PickableId::Frame(1))));
        assert!(state.set_hovered(None));
    }

    #[test]
    fn test_held_pose_uses_camera_rotation() {
        let camera = Transform::from_xyz(0.0, 2.2, 0.0)
            .with_rotation(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));
        let (pos, rot) = held_pose(&camera, PickableKind::Frame);
        // Facing -X after a quarter turn left.
        assert!((pos - Vec3::new(-0.5, 2.25, 0.0)).length() < 1e-5);
        assert_eq!(rot, camera.rotation);
    }
}
