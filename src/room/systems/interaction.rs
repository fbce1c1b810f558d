//! Hover and pickup
//!
//! A ray from the screen center finds the pickable under the crosshair.
//! Clicking picks it up; the held object then rides in front of the camera.

use bevy::input::keyboard::Key;
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::room::types::*;
use crate::room::wish::WishDialogState;

/// `G` on a Latin layout, `ل` on the Arabic one.
pub fn is_drop_key(key: &Key) -> bool {
    match key {
        Key::Character(c) => matches!(c.as_str(), "g" | "G" | "ل"),
        _ => false,
    }
}

pub fn update_hover(
    rapier: ReadRapierContext,
    config: Res<RoomConfig>,
    camera: Query<&GlobalTransform, With<MainCamera>>,
    pickables: Query<&PickableObject>,
    mut pickup: ResMut<PickupState>,
    mut hover: MessageWriter<HoverChanged>,
) {
    let Ok(camera) = camera.single() else {
        return;
    };
    let Ok(context) = rapier.single() else {
        return;
    };

    let is_pickable = |entity: Entity| pickables.contains(entity);
    let filter = QueryFilter::default().predicate(&is_pickable);

    let hit = context
        .cast_ray(
            camera.translation(),
            *camera.forward(),
            config.controls.interaction_distance,
            true,
            filter,
        )
        .and_then(|(entity, _)| pickables.get(entity).ok())
        .map(|pickable| pickable.id);

    if pickup.bypass_change_detection().hovered() == hit {
        return;
    }
    pickup.set_hovered(hit);
    debug!("Hovering {:?}", hit);
    hover.write(HoverChanged {
        target: hit.map(|id| (id, id.kind())),
    });
}

/// Left click picks up or drops; `G` drops.
pub fn handle_pickup_input(
    mouse: Res<ButtonInput<MouseButton>>,
    codes: Res<ButtonInput<KeyCode>>,
    keys: Res<ButtonInput<Key>>,
    cursor: Res<CursorLock>,
    dialog: Res<WishDialogState>,
    mut pickup: ResMut<PickupState>,
    mut changes: MessageWriter<PickupChanged>,
    mut drops: MessageWriter<DropHeld>,
) {
    if dialog.is_open() {
        return;
    }

    if codes.just_pressed(KeyCode::KeyG) || keys.get_just_pressed().any(is_drop_key) {
        drops.write(DropHeld);
    }

    if !cursor.locked || !mouse.just_pressed(MouseButton::Left) {
        return;
    }

    let transitions = pickup.click();
    if transitions.is_empty() {
        debug!("Click with nothing under the crosshair");
    }
    for PickupTransition { id, held } in transitions {
        info!("{} {}", if held { "Picked up" } else { "Dropped" }, id);
        changes.write(PickupChanged {
            id,
            kind: id.kind(),
            held,
        });
    }
}

pub fn drop_held_object(
    mut drops: MessageReader<DropHeld>,
    mut pickup: ResMut<PickupState>,
    mut changes: MessageWriter<PickupChanged>,
) {
    if drops.read().count() == 0 {
        return;
    }
    if let Some(PickupTransition { id, held }) = pickup.drop_held() {
        info!("Dropped {}", id);
        changes.write(PickupChanged {
            id,
            kind: id.kind(),
            held,
        });
    }
}

/// Keep the held object in front of the camera; everything else at home.
pub fn place_pickables(
    pickup: Res<PickupState>,
    camera: Query<&Transform, (With<MainCamera>, Without<PickableObject>)>,
    mut pickables: Query<(&PickableObject, &mut Transform)>,
) {
    let Ok(camera) = camera.single() else {
        return;
    };

    for (pickable, mut transform) in pickables.iter_mut() {
        if pickup.is_held(pickable.id) {
            let (translation, rotation) = held_pose(camera, pickable.id.kind());
            transform.translation = translation;
            transform.rotation = rotation;
        } else if *transform != pickable.home {
            *transform = pickable.home;
        }
    }
}
