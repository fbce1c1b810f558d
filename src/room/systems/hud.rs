//! HUD
//!
//! Crosshair, pickup hints, the instructions overlay, the loading screen and
//! the mute indicator.

use bevy::prelude::*;

use crate::room::assets::{count_settled, RoomAssets};
use crate::room::strings;
use crate::room::types::*;

const ROSE: Color = Color::srgb(1.0, 0.41, 0.71);
const OVERLAY: Color = Color::srgba(0.05, 0.02, 0.08, 0.85);

/// Hint for the current pickup situation. Holding takes precedence.
pub fn hint_text(hovered: Option<PickableKind>, held: Option<PickableKind>) -> Option<&'static str> {
    match (held, hovered) {
        (Some(PickableKind::Bouquet), _) => Some(strings::HOLDING_BOUQUET),
        (Some(PickableKind::Frame), _) => Some(strings::HOLDING_FRAME),
        (None, Some(PickableKind::Bouquet)) => Some(strings::HOVER_BOUQUET),
        (None, Some(PickableKind::Frame)) => Some(strings::HOVER_FRAME),
        (None, None) => None,
    }
}

pub fn loading_label(percent: f32) -> String {
    format!("{} {:.0}%", strings::LOADING, percent)
}

pub fn spawn_hud(mut commands: Commands, assets: Res<RoomAssets>, music: Res<MusicState>) {
    let font = assets.font.clone();
    let text_font = |size: f32| TextFont {
        font: font.clone(),
        font_size: size,
        ..default()
    };

    // Crosshair
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            Crosshair,
            Visibility::Hidden,
            ZIndex(5),
        ))
        .with_children(|parent| {
            parent
                .spawn((
                    Node {
                        width: Val::Px(22.0),
                        height: Val::Px(22.0),
                        justify_content: JustifyContent::Center,
                        align_items: AlignItems::Center,
                        ..default()
                    },
                    BackgroundColor(ROSE.with_alpha(0.35)),
                    BorderRadius::MAX,
                ))
                .with_children(|ring| {
                    ring.spawn((
                        Node {
                            width: Val::Px(6.0),
                            height: Val::Px(6.0),
                            ..default()
                        },
                        BackgroundColor(Color::WHITE),
                        BorderRadius::MAX,
                    ));
                });
        });

    // Hint
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(80.0),
                right: Val::Px(20.0),
                padding: UiRect::axes(Val::Px(16.0), Val::Px(10.0)),
                ..default()
            },
            BackgroundColor(OVERLAY),
            BorderRadius::all(Val::Px(12.0)),
            HintPanel,
            Visibility::Hidden,
            ZIndex(10),
        ))
        .with_children(|panel| {
            panel.spawn((
                Text::new(""),
                text_font(16.0),
                TextColor(Color::WHITE),
                HintText,
            ));
        });

    // Mute indicator
    commands
        .spawn((
            Button,
            MuteButton,
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(20.0),
                right: Val::Px(20.0),
                width: Val::Px(44.0),
                height: Val::Px(44.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(OVERLAY),
            BorderRadius::MAX,
            ZIndex(10),
        ))
        .with_children(|button| {
            button.spawn((
                Text::new(mute_label(music.muted)),
                text_font(20.0),
                TextColor(Color::WHITE),
                MuteLabel,
            ));
        });

    // Instructions
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                row_gap: Val::Px(10.0),
                ..default()
            },
            BackgroundColor(OVERLAY),
            InstructionsOverlay,
            ZIndex(50),
        ))
        .with_children(|overlay| {
            overlay.spawn((
                Text::new(strings::WELCOME_TITLE),
                text_font(42.0),
                TextColor(ROSE),
            ));
            overlay.spawn((
                Text::new(strings::CLICK_TO_ENTER),
                text_font(22.0),
                TextColor(Color::WHITE),
            ));
            for (line, size) in [
                (strings::CONTROLS_HEADING, 20.0),
                (strings::CONTROLS_MOVE, 18.0),
                (strings::CONTROLS_LOOK, 18.0),
                (strings::CONTROLS_LAYOUTS, 16.0),
                (strings::EXPLORE_HINT, 18.0),
            ] {
                overlay.spawn((
                    Text::new(line),
                    text_font(size),
                    TextColor(Color::WHITE.with_alpha(0.85)),
                ));
            }
        });

    // Loading screen
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::srgb(0.04, 0.04, 0.12)),
            LoadingScreen,
            ZIndex(1000),
        ))
        .with_children(|screen| {
            screen.spawn((
                Text::new(loading_label(0.0)),
                text_font(28.0),
                TextColor(ROSE),
                LoadingPercentText,
            ));
        });
}

fn mute_label(muted: bool) -> &'static str {
    if muted {
        strings::MUTE_ON
    } else {
        strings::MUTE_OFF
    }
}

fn show(visibility: &mut Visibility, visible: bool) {
    let wanted = if visible {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
    if *visibility != wanted {
        *visibility = wanted;
    }
}

/// What the HUD knows about pickups, rebuilt from pickup messages.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HudPickup {
    pub hovered: Option<PickableKind>,
    pub held: Option<(PickableId, PickableKind)>,
}

impl HudPickup {
    pub fn on_hover(&mut self, message: &HoverChanged) {
        self.hovered = message.target.map(|(_, kind)| kind);
    }

    pub fn on_pickup(&mut self, message: &PickupChanged) {
        if message.held {
            self.held = Some((message.id, message.kind));
        } else if self.held.is_some_and(|(id, _)| id == message.id) {
            self.held = None;
        }
    }

    pub fn hint(&self) -> Option<&'static str> {
        hint_text(self.hovered, self.held.map(|(_, kind)| kind))
    }
}

pub fn update_crosshair(
    cursor: Res<CursorLock>,
    mut hover: MessageReader<HoverChanged>,
    mut hovering: Local<bool>,
    mut crosshair: Query<&mut Visibility, With<Crosshair>>,
) {
    if let Some(last) = hover.read().last() {
        *hovering = last.target.is_some();
    }
    for mut visibility in crosshair.iter_mut() {
        show(&mut visibility, cursor.locked && *hovering);
    }
}

pub fn update_hint(
    mut hover: MessageReader<HoverChanged>,
    mut pickups: MessageReader<PickupChanged>,
    mut state: Local<HudPickup>,
    mut panels: Query<&mut Visibility, With<HintPanel>>,
    mut texts: Query<&mut Text, With<HintText>>,
) {
    let before = *state;
    for message in hover.read() {
        state.on_hover(message);
    }
    for message in pickups.read() {
        state.on_pickup(message);
    }
    if *state == before {
        return;
    }

    let hint = state.hint();
    for mut visibility in panels.iter_mut() {
        show(&mut visibility, hint.is_some());
    }
    if let Some(hint) = hint {
        for mut text in texts.iter_mut() {
            text.0 = hint.to_string();
        }
    }
}

pub fn update_instructions(
    cursor: Res<CursorLock>,
    mut overlays: Query<&mut Visibility, With<InstructionsOverlay>>,
) {
    for mut visibility in overlays.iter_mut() {
        show(&mut visibility, !cursor.entered);
    }
}

/// Count tracked assets that have loaded or failed.
pub fn track_asset_loading(
    time: Res<Time>,
    asset_server: Res<AssetServer>,
    assets: Res<RoomAssets>,
    mut progress: ResMut<LoadingProgress>,
) {
    if progress.is_finished() {
        return;
    }

    let tracked = assets.tracked();
    let settled = count_settled(&tracked, |id| asset_server.get_load_state(id));
    let before = progress.settled;
    progress.update(settled, tracked.len(), time.delta_secs());
    if progress.settled != before {
        debug!("Loaded {}/{} assets", progress.settled, progress.total);
    }
}

/// Fade the loading screen out and remove it.
pub fn update_loading_screen(
    mut commands: Commands,
    progress: Res<LoadingProgress>,
    mut screens: Query<(Entity, &mut BackgroundColor), With<LoadingScreen>>,
    mut labels: Query<(&mut Text, &mut TextColor), With<LoadingPercentText>>,
) {
    if screens.is_empty() {
        return;
    }

    if progress.is_finished() {
        info!("Room assets ready");
        for (entity, _) in screens.iter() {
            commands.entity(entity).despawn();
        }
        return;
    }

    let opacity = progress.opacity();
    for (_, mut background) in screens.iter_mut() {
        background.0.set_alpha(opacity);
    }
    for (mut text, mut color) in labels.iter_mut() {
        text.0 = loading_label(progress.percent());
        color.0.set_alpha(opacity);
    }
}

pub fn update_mute_indicator(music: Res<MusicState>, mut labels: Query<&mut Text, With<MuteLabel>>) {
    if !music.is_changed() {
        return;
    }
    for mut text in labels.iter_mut() {
        text.0 = mute_label(music.muted).to_string();
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::sync::Arc;

    use bevy::asset::io::AssetReaderError;
    use bevy::asset::{AssetLoadError, LoadState};

    use super::*;
    use crate::room::assets::TrackedAsset;

    #[test]
    fn test_hint_prefers_held_object() {
        assert_eq!(hint_text(None, None), None);
        assert_eq!(
            hint_text(Some(PickableKind::Frame), None),
            Some(strings::HOVER_FRAME)
        );
        assert_eq!(
            hint_text(Some(PickableKind::Frame), Some(PickableKind::Bouquet)),
            Some(strings::HOLDING_BOUQUET)
        );
    }

    #[test]
    fn test_hud_follows_pickup_messages() {
        let mut hud = HudPickup::default();
        hud.on_hover(&HoverChanged {
            target: Some((PickableId::Frame(3), PickableKind::Frame)),
        });
        assert_eq!(hud.hint(), Some(strings::HOVER_FRAME));

        hud.on_pickup(&PickupChanged {
            id: PickableId::Frame(3),
            kind: PickableKind::Frame,
            held: true,
        });
        assert_eq!(hud.hint(), Some(strings::HOLDING_FRAME));

        // Swap: the old drop may arrive after the new pickup is recorded.
        hud.on_pickup(&PickupChanged {
            id: PickableId::Bouquet,
            kind: PickableKind::Bouquet,
            held: true,
        });
        hud.on_pickup(&PickupChanged {
            id: PickableId::Frame(3),
            kind: PickableKind::Frame,
            held: false,
        });
        assert_eq!(hud.hint(), Some(strings::HOLDING_BOUQUET));

        hud.on_hover(&HoverChanged { target: None });
        hud.on_pickup(&PickupChanged {
            id: PickableId::Bouquet,
            kind: PickableKind::Bouquet,
            held: false,
        });
        assert_eq!(hud.hint(), None);
    }

    #[test]
    fn test_hint_panel_reacts_to_messages() {
        let mut app = App::new();
        app.add_message::<HoverChanged>()
            .add_message::<PickupChanged>()
            .add_systems(Update, update_hint);
        let panel = app.world_mut().spawn((HintPanel, Visibility::Hidden)).id();
        let text = app.world_mut().spawn((HintText, Text::default())).id();

        app.world_mut().write_message(HoverChanged {
            target: Some((PickableId::Bouquet, PickableKind::Bouquet)),
        });
        app.update();

        assert_eq!(app.world().get::<Visibility>(panel), Some(&Visibility::Inherited));
        assert_eq!(
            app.world().get::<Text>(text).map(|t| t.0.as_str()),
            Some(strings::HOVER_BOUQUET)
        );
    }

    #[test]
    fn test_loading_label_rounds() {
        assert!(loading_label(42.6).ends_with("43%"));
    }

    #[test]
    fn test_failed_asset_still_clears_loading_screen() {
        let images = Assets::<Image>::default();
        let photo = images.reserve_handle().id();
        let missing = images.reserve_handle().id();
        let tracked = [TrackedAsset::new(photo), TrackedAsset::new(missing)];

        let failed: AssetLoadError = AssetReaderError::NotFound(PathBuf::from("audio/song.mp3")).into();
        let mut states = HashMap::new();
        states.insert(photo.untyped(), LoadState::Loaded);
        states.insert(missing.untyped(), LoadState::Failed(Arc::new(failed)));

        let mut app = App::new();
        app.init_resource::<LoadingProgress>()
            .add_systems(Update, update_loading_screen);
        let screen = app
            .world_mut()
            .spawn((LoadingScreen, Node::default(), BackgroundColor(OVERLAY)))
            .id();

        let settled = count_settled(&tracked, |id| states.get(&id).cloned());
        assert_eq!(settled, 2);
        for _ in 0..3 {
            app.world_mut()
                .resource_mut::<LoadingProgress>()
                .update(settled, tracked.len(), 0.3);
            app.update();
        }

        assert!(app.world().resource::<LoadingProgress>().is_finished());
        assert!(app.world().get_entity(screen).is_err());
    }
}
