//! First-person controller
//!
//! Click to grab the cursor, mouse to look, WASD / arrows / Arabic-layout
//! letters to walk. The camera glides to the wish viewpoint while the wish
//! dialog is up.

use bevy::input::keyboard::Key;
use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, CursorOptions, PrimaryWindow};

use crate::room::types::*;
use crate::room::wish::WishDialogState;

const FORWARD_KEYS: &[&str] = &["w", "W", "ص"];
const LEFT_KEYS: &[&str] = &["a", "A", "ش"];
const BACK_KEYS: &[&str] = &["s", "S", "س"];
const RIGHT_KEYS: &[&str] = &["d", "D", "ي"];

pub fn set_cursor_grab(options: &mut CursorOptions, locked: bool) {
    options.grab_mode = if locked {
        CursorGrabMode::Locked
    } else {
        CursorGrabMode::None
    };
    options.visible = !locked;
}

/// Held movement keys. Physical codes cover any layout; logical characters
/// catch the Arabic letters on layouts that report them.
pub fn read_move_input(codes: &ButtonInput<KeyCode>, keys: &ButtonInput<Key>) -> MoveInput {
    let logical = |chars: &[&str]| {
        chars
            .iter()
            .any(|c| keys.pressed(Key::Character((*c).into())))
    };

    MoveInput {
        forward: codes.any_pressed([KeyCode::KeyW, KeyCode::ArrowUp]) || logical(FORWARD_KEYS),
        back: codes.any_pressed([KeyCode::KeyS, KeyCode::ArrowDown]) || logical(BACK_KEYS),
        left: codes.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]) || logical(LEFT_KEYS),
        right: codes.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]) || logical(RIGHT_KEYS),
    }
}

/// Grab the cursor on a left click into the room; Escape lets it go.
pub fn toggle_cursor_grab(
    mouse: Res<ButtonInput<MouseButton>>,
    codes: Res<ButtonInput<KeyCode>>,
    dialog: Res<WishDialogState>,
    buttons: Query<&Interaction, With<Button>>,
    mut cursor: ResMut<CursorLock>,
    mut options: Query<&mut CursorOptions, With<PrimaryWindow>>,
) {
    let Ok(mut options) = options.single_mut() else {
        return;
    };

    if cursor.locked {
        if codes.just_pressed(KeyCode::Escape) {
            set_cursor_grab(&mut options, false);
            cursor.locked = false;
            debug!("Cursor released");
        }
        return;
    }

    if dialog.is_open() || !mouse.just_pressed(MouseButton::Left) {
        return;
    }
    // Clicks on HUD buttons stay with the buttons.
    if buttons.iter().any(|i| *i == Interaction::Pressed) {
        return;
    }

    set_cursor_grab(&mut options, true);
    cursor.locked = true;
    cursor.relock_in = None;
    if !cursor.entered {
        cursor.entered = true;
        info!("Player entered the room");
    }
}

/// Grab the cursor again shortly after the wish dialog closed.
pub fn relock_cursor(
    time: Res<Time>,
    dialog: Res<WishDialogState>,
    mut cursor: ResMut<CursorLock>,
    mut options: Query<&mut CursorOptions, With<PrimaryWindow>>,
) {
    let Some(remaining) = cursor.relock_in else {
        return;
    };
    let remaining = remaining - time.delta_secs();
    if remaining > 0.0 {
        cursor.relock_in = Some(remaining);
        return;
    }

    cursor.relock_in = None;
    if dialog.is_open() {
        return;
    }
    if let Ok(mut options) = options.single_mut() {
        set_cursor_grab(&mut options, true);
        cursor.locked = true;
        debug!("Cursor re-grabbed");
    }
}

pub fn mouse_look(
    motion: Res<AccumulatedMouseMotion>,
    config: Res<RoomConfig>,
    cursor: Res<CursorLock>,
    framing: Res<WishFraming>,
    dialog: Res<WishDialogState>,
    mut camera: Query<(&mut Transform, &mut PlayerController), With<MainCamera>>,
) {
    if !cursor.locked || framing.active || dialog.is_open() || motion.delta == Vec2::ZERO {
        return;
    }
    let Ok((mut transform, mut controller)) = camera.single_mut() else {
        return;
    };

    controller.look(motion.delta, config.controls.mouse_sensitivity);
    transform.rotation = controller.rotation();
}

pub fn move_player(
    time: Res<Time>,
    config: Res<RoomConfig>,
    framing: Res<WishFraming>,
    dialog: Res<WishDialogState>,
    codes: Res<ButtonInput<KeyCode>>,
    keys: Res<ButtonInput<Key>>,
    mut camera: Query<(&mut Transform, &mut PlayerController), With<MainCamera>>,
) {
    let Ok((mut transform, mut controller)) = camera.single_mut() else {
        return;
    };

    if framing.active || dialog.is_open() {
        controller.velocity = Vec3::ZERO;
        return;
    }

    let dt = time.delta_secs();
    let input = read_move_input(&codes, &keys);
    let target = target_velocity(input.axes(), *transform.forward(), config.controls.move_speed);
    controller.velocity =
        smooth_velocity(controller.velocity, target, config.controls.smoothing, dt);

    if !should_apply(controller.velocity) {
        return;
    }

    let next = clamp_to_room(transform.translation + controller.velocity * dt);
    transform.translation = push_out_of_table(next);
}

/// Start the glide when the dialog opens. Closing the dialog does not stop
/// it; only reaching the viewpoint does.
pub fn track_wish_framing(mut opened: MessageReader<WishDialogOpened>, mut framing: ResMut<WishFraming>) {
    if opened.read().count() > 0 {
        info!("Framing the cake for the wish");
        framing.active = true;
    }
}

/// Glide toward the wish viewpoint, keeping the cake in view.
pub fn apply_wish_framing(
    time: Res<Time>,
    mut framing: ResMut<WishFraming>,
    mut camera: Query<(&mut Transform, &mut PlayerController), With<MainCamera>>,
) {
    if !framing.active {
        return;
    }
    let Ok((mut transform, mut controller)) = camera.single_mut() else {
        return;
    };

    let (position, snapped) = framing_step(transform.translation, time.delta_secs());
    transform.translation = position;
    transform.look_at(CAKE_POSITION, Vec3::Y);
    controller.sync_from_rotation(transform.rotation);
    controller.velocity = Vec3::ZERO;

    if snapped {
        debug!("Wish framing settled");
        framing.active = false;
    }
}

pub fn update_proximity(
    mut proximity: ResMut<PlayerProximity>,
    camera: Query<&Transform, With<MainCamera>>,
) {
    let Ok(transform) = camera.single() else {
        return;
    };
    let distance = transform.translation.distance(CAKE_POSITION);
    let was_near = proximity.is_near();
    proximity.distance_to_cake = distance;
    if proximity.is_near() != was_near {
        debug!("Near cake: {}", proximity.is_near());
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bevy::time::TimeUpdateStrategy;

    use super::*;

    fn stepped_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(
                1.0 / REFERENCE_FPS,
            )));
        app
    }

    fn spawn_player(app: &mut App) -> Entity {
        app.world_mut()
            .spawn((
                MainCamera,
                PlayerController::default(),
                Transform::from_translation(PLAYER_SPAWN),
            ))
            .id()
    }

    #[test]
    fn test_arabic_letters_move() {
        let codes = ButtonInput::<KeyCode>::default();
        let mut keys = ButtonInput::<Key>::default();
        keys.press(Key::Character("ص".into()));
        keys.press(Key::Character("ي".into()));

        let input = read_move_input(&codes, &keys);
        assert_eq!(input.axes(), Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_arrows_and_physical_keys() {
        let mut codes = ButtonInput::<KeyCode>::default();
        let keys = ButtonInput::<Key>::default();
        codes.press(KeyCode::ArrowDown);
        codes.press(KeyCode::KeyA);

        let input = read_move_input(&codes, &keys);
        assert!(input.back && input.left);
        assert_eq!(input.axes(), Vec2::new(-1.0, -1.0));
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut codes = ButtonInput::<KeyCode>::default();
        let mut keys = ButtonInput::<Key>::default();
        codes.press(KeyCode::KeyW);
        keys.press(Key::Character("س".into()));

        assert_eq!(read_move_input(&codes, &keys).axes().y, 0.0);
    }

    #[test]
    fn test_proximity_follows_camera() {
        let mut app = App::new();
        app.init_resource::<PlayerProximity>()
            .add_systems(Update, update_proximity);
        app.world_mut().spawn((
            MainCamera,
            Transform::from_xyz(0.0, EYE_HEIGHT, -1.0),
        ));
        app.update();

        let proximity = app.world().resource::<PlayerProximity>();
        assert!(proximity.is_near());
    }

    #[test]
    fn test_framing_finishes_after_dialog_closes() {
        let mut app = stepped_app();
        app.add_message::<WishDialogOpened>()
            .init_resource::<WishFraming>()
            .add_systems(Update, (track_wish_framing, apply_wish_framing).chain());
        let player = spawn_player(&mut app);

        app.world_mut().write_message(WishDialogOpened);
        app.update();
        app.update();
        // Cancelled mid-glide.
        assert!(app.world().resource::<WishFraming>().active);

        for _ in 0..300 {
            app.update();
        }

        let transform = app.world().get::<Transform>(player).copied();
        assert_eq!(transform.map(|t| t.translation), Some(WISH_VIEW_POSITION));
        assert!(!app.world().resource::<WishFraming>().active);
    }

    #[test]
    fn test_walking_before_first_click() {
        let mut app = stepped_app();
        app.init_resource::<RoomConfig>()
            .init_resource::<CursorLock>()
            .init_resource::<WishFraming>()
            .init_resource::<WishDialogState>()
            .init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<ButtonInput<Key>>()
            .add_systems(Update, move_player);
        let player = spawn_player(&mut app);

        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::KeyW);
        for _ in 0..30 {
            app.update();
        }

        assert!(!app.world().resource::<CursorLock>().entered);
        let z = app.world().get::<Transform>(player).map(|t| t.translation.z);
        assert!(z.is_some_and(|z| z < PLAYER_SPAWN.z - 0.5));
    }
}
