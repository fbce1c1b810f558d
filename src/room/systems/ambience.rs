//! Room lighting and background music
//!
//! The lights dim while the player stands by the lit cake and come back up
//! for good once the candles are blown out.

use bevy::audio::{AudioPlayer, PlaybackSettings, Volume};
use bevy::asset::LoadState;
use bevy::input::keyboard::Key;
use bevy::prelude::*;

use crate::room::assets::RoomAssets;
use crate::room::types::*;
use crate::room::wish::WishDialogState;

/// `M` on a Latin layout, `ة` on the Arabic one.
pub fn is_mute_key(key: &Key) -> bool {
    match key {
        Key::Character(c) => matches!(c.as_str(), "m" | "M" | "ة"),
        _ => false,
    }
}

pub fn apply_lighting_levels(
    proximity: Res<PlayerProximity>,
    celebration: Res<Celebration>,
    config: Res<RoomConfig>,
    mut current: Local<Option<LightingLevels>>,
    mut points: Query<(&RoomLight, &mut PointLight)>,
    mut spots: Query<(&RoomLight, &mut SpotLight)>,
    mut ambient: Query<&mut AmbientLight, With<MainCamera>>,
) {
    let levels = LightingLevels::for_state(proximity.is_near(), celebration.candles_blown_out);
    if *current == Some(levels) {
        return;
    }

    let lighting = &config.lighting;
    for (light, mut point) in points.iter_mut() {
        point.intensity = levels.level(*light) * lighting.point_lumens_per_unit;
    }
    for (light, mut spot) in spots.iter_mut() {
        spot.intensity = levels.level(*light) * lighting.spot_lumens_per_unit;
    }
    for mut ambient in ambient.iter_mut() {
        ambient.brightness = levels.ambient * lighting.ambient_brightness_per_unit;
    }

    if current.is_some() {
        if levels == LightingLevels::DIMMED {
            info!("Dimming the room around the cake");
        } else {
            info!("Room lights restored");
        }
    }
    *current = Some(levels);
}

/// Startup system spawning the (paused) looping music player.
pub fn spawn_background_music(
    mut commands: Commands,
    assets: Res<RoomAssets>,
    config: Res<RoomConfig>,
    mut music: ResMut<MusicState>,
) {
    music.muted = config.audio.start_muted;
    commands.spawn((
        AudioPlayer(assets.music.clone()),
        PlaybackSettings::LOOP
            .with_volume(Volume::Linear(config.audio.volume))
            .paused(),
        BackgroundMusic,
    ));
}

/// Start the music the first time the player enters the room.
pub fn start_music_on_enter(
    cursor: Res<CursorLock>,
    mut music: ResMut<MusicState>,
    sinks: Query<&AudioSink, With<BackgroundMusic>>,
) {
    if music.started || !cursor.entered {
        return;
    }
    let Ok(sink) = sinks.single() else {
        return;
    };
    sink.play();
    music.started = true;
    info!("Background music started");
}

/// Report a missing or undecodable track once; the room carries on silently.
pub fn watch_music_asset(
    asset_server: Res<AssetServer>,
    assets: Res<RoomAssets>,
    mut music: ResMut<MusicState>,
) {
    if music.failed {
        return;
    }
    if let Some(LoadState::Failed(err)) = asset_server.get_load_state(assets.music.id()) {
        warn!("Background music unavailable: {}", err);
        music.failed = true;
    }
}

pub fn toggle_mute(
    codes: Res<ButtonInput<KeyCode>>,
    keys: Res<ButtonInput<Key>>,
    dialog: Res<WishDialogState>,
    cursor: Res<CursorLock>,
    buttons: Query<&Interaction, (Changed<Interaction>, With<MuteButton>)>,
    mut music: ResMut<MusicState>,
) {
    if dialog.is_open() {
        return;
    }

    let key = codes.just_pressed(KeyCode::KeyM) || keys.get_just_pressed().any(is_mute_key);
    let clicked = !cursor.locked && buttons.iter().any(|i| *i == Interaction::Pressed);
    if !key && !clicked {
        return;
    }

    music.muted = !music.muted;
    info!("Music {}", if music.muted { "muted" } else { "unmuted" });
}

pub fn sync_music_mute(music: Res<MusicState>, mut sinks: Query<&mut AudioSink, With<BackgroundMusic>>) {
    for mut sink in sinks.iter_mut() {
        if sink.is_muted() != music.muted {
            if music.muted {
                sink.mute();
            } else {
                sink.unmute();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mute_key_on_both_layouts() {
        assert!(is_mute_key(&Key::Character("m".into())));
        assert!(is_mute_key(&Key::Character("ة".into())));
        assert!(!is_mute_key(&Key::Character("n".into())));
    }

    #[test]
    fn test_lights_dim_near_cake_then_restore() {
        let mut app = App::new();
        app.init_resource::<PlayerProximity>()
            .init_resource::<Celebration>()
            .init_resource::<RoomConfig>()
            .add_systems(Update, apply_lighting_levels);
        let pink = app
            .world_mut()
            .spawn((RoomLight::Pink, PointLight::default()))
            .id();

        let per_unit = RoomConfig::default().lighting.point_lumens_per_unit;
        let intensity = |app: &App| app.world().get::<PointLight>(pink).map(|p| p.intensity);

        app.update();
        assert_eq!(intensity(&app), Some(LightingLevels::NORMAL.pink * per_unit));

        app.world_mut().resource_mut::<PlayerProximity>().distance_to_cake = 1.0;
        app.update();
        assert_eq!(intensity(&app), Some(LightingLevels::DIMMED.pink * per_unit));

        app.world_mut().resource_mut::<Celebration>().candles_blown_out = true;
        app.update();
        assert_eq!(intensity(&app), Some(LightingLevels::NORMAL.pink * per_unit));
    }
}
