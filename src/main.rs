// Hide console window on Windows for release builds (GUI app).
// In debug builds, keep the console so panics/backtraces are visible.
#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

use std::path::PathBuf;

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use clap::Parser;

use birthday_room::room::assets::load_room_assets;
use birthday_room::room::breath::*;
use birthday_room::room::candles::*;
use birthday_room::room::scene::*;
use birthday_room::room::systems::*;
use birthday_room::room::types::*;
use birthday_room::room::wish::*;

/// Birthday Room - walk around a birthday room, make a wish and blow out the candles
#[derive(Parser, Debug)]
#[command(name = "birthday_room")]
#[command(author, version, about = "Birthday Room - a first-person 3D birthday scene")]
struct Cli {
    /// Path to the RON configuration file
    #[arg(short = 'c', long = "config", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Start with the music muted
    #[arg(long)]
    muted: bool,

    /// Music volume between 0.0 and 1.0
    #[arg(long)]
    volume: Option<f32>,

    /// Window width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Window height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Print the resolved configuration as RON and exit
    #[arg(long)]
    print_config: bool,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            muted: self.muted,
            volume: self.volume,
            width: self.width,
            height: self.height,
        }
    }
}

fn resolve_config(cli: &Cli) -> Result<(RoomConfig, ConfigSource), ConfigError> {
    let (mut config, source) = RoomConfig::load_with_source(&cli.config)?;
    config.apply_overrides(&cli.overrides());
    config.validate()?;
    Ok((config, source))
}

fn main() {
    let cli = Cli::parse();

    let (config, source) = match resolve_config(&cli) {
        Ok(resolved) => resolved,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if cli.print_config {
        match config.to_ron_string() {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    run_room(config, source);
}

fn run_room(config: RoomConfig, source: ConfigSource) {
    let window = config.window.clone();

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: window.title,
                        resolution: (window.width, window.height).into(),
                        ..default()
                    }),
                    ..default()
                })
                .set(bevy::log::LogPlugin {
                    level: bevy::log::Level::INFO,
                    filter: "info,wgpu=error,naga=warn".to_string(),
                    ..default()
                }),
        )
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
        .insert_resource(config)
        .insert_resource(source)
        // Messages
        .add_message::<OpenWishDialog>()
        .add_message::<WishDialogOpened>()
        .add_message::<WishDialogClosed>()
        .add_message::<WishSubmitted>()
        .add_message::<BlowCandles>()
        .add_message::<CandlesExtinguished>()
        .add_message::<HoverChanged>()
        .add_message::<PickupChanged>()
        .add_message::<DropHeld>()
        // State
        .init_resource::<CandleState>()
        .init_resource::<BreathEmitter>()
        .init_resource::<PickupState>()
        .init_resource::<CursorLock>()
        .init_resource::<PlayerProximity>()
        .init_resource::<WishFraming>()
        .init_resource::<Celebration>()
        .init_resource::<MusicState>()
        .init_resource::<LoadingProgress>()
        .init_resource::<WishDialogState>()
        .add_systems(PreStartup, (log_config_source, load_room_assets))
        .add_systems(
            Startup,
            (
                setup_camera_and_lights,
                spawn_night_sky,
                spawn_room_shell,
                spawn_carpet,
                spawn_chandelier,
                spawn_table_and_chairs,
                spawn_plants,
                spawn_balloons_and_hearts,
                spawn_wall_fixtures,
                spawn_candlesticks,
                spawn_galleries,
                spawn_pickable_frames,
                spawn_bouquet,
                spawn_birthday_cake,
                spawn_breath_pool,
            ),
        )
        .add_systems(
            Startup,
            (spawn_background_music, spawn_hud, spawn_wish_ui).chain(),
        )
        .add_systems(
            Update,
            (
                // Wish dialog input runs first so typed keys never move the player
                handle_wish_text_input,
                handle_wish_buttons,
                request_wish_dialog,
                open_wish_dialog,
                tick_wish_submission,
                schedule_cursor_relock,
                celebrate_wish,
                tick_celebration,
            )
                .chain(),
        )
        .add_systems(
            Update,
            (
                toggle_cursor_grab,
                relock_cursor,
                mouse_look,
                move_player,
                track_wish_framing,
                apply_wish_framing,
                update_proximity,
            )
                .chain()
                .after(tick_celebration),
        )
        .add_systems(
            Update,
            (
                update_hover,
                handle_pickup_input,
                drop_held_object,
                place_pickables,
            )
                .chain()
                .after(update_proximity),
        )
        .add_systems(
            Update,
            (
                start_blowing_candles,
                advance_candle_blow,
                hide_extinguished_flames,
                animate_candle_flames,
                animate_candle_smoke,
                animate_candle_sparks,
                animate_cake_hearts,
            )
                .chain()
                .after(celebrate_wish),
        )
        .add_systems(
            Update,
            (
                start_breath,
                update_breath_particles,
                render_breath_particles,
            )
                .chain()
                .after(celebrate_wish)
                .after(apply_wish_framing),
        )
        .add_systems(
            Update,
            (
                apply_lighting_levels,
                start_music_on_enter,
                watch_music_asset,
                toggle_mute,
                sync_music_mute,
            )
                .chain()
                .after(update_proximity),
        )
        .add_systems(
            Update,
            (
                fit_frames_to_photos,
                update_wish_prompt,
                render_wish_dialog,
                update_crosshair,
                update_hint,
                update_instructions,
                (track_asset_loading, update_loading_screen).chain(),
                update_mute_indicator,
            )
                .after(place_pickables)
                .after(sync_music_mute),
        )
        .run();
}
