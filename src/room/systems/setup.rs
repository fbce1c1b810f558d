//! Scene setup system
//!
//! Spawns the player camera, the room lights and the night sky. Room geometry
//! lives in `room::scene`, the cake in `room::candles`.

use std::f32::consts::TAU;

use bevy::pbr::{DistanceFog, FogFalloff};
use bevy::prelude::*;
use rand::Rng;

use crate::room::palette::hex;
use crate::room::types::*;

pub const STAR_COUNT: usize = 1000;
pub const STAR_SHELL_RADIUS: f32 = 100.0;
pub const FOG_START: f32 = 15.0;
pub const FOG_END: f32 = 30.0;

/// Cone half-angle of the cake spotlight, radians.
const CAKE_SPOT_ANGLE: f32 = 0.5;
const CAKE_SPOT_PENUMBRA: f32 = 0.3;

/// Uniformly distributed point on a sphere of `radius`.
pub fn star_position(rng: &mut impl Rng, radius: f32) -> Vec3 {
    let theta = rng.gen_range(0.0..TAU);
    let phi = (rng.gen_range(-1.0f32..1.0)).acos();
    Vec3::new(
        radius * phi.sin() * theta.cos(),
        radius * phi.cos(),
        radius * phi.sin() * theta.sin(),
    )
}

pub fn config_source_message(source: &ConfigSource) -> String {
    match source {
        ConfigSource::File(path) => format!("Loaded config from {}", path.display()),
        ConfigSource::Defaults(path) => format!("No config at {}, using defaults", path.display()),
    }
}

/// Report where the configuration came from once logging is up.
pub fn log_config_source(source: Option<Res<ConfigSource>>) {
    if let Some(source) = source {
        info!("{}", config_source_message(&source));
    }
}

pub fn setup_camera_and_lights(mut commands: Commands, config: Res<RoomConfig>) {
    let lighting = &config.lighting;
    let levels = LightingLevels::NORMAL;

    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: FIELD_OF_VIEW_DEGREES.to_radians(),
            ..default()
        }),
        Transform::from_translation(PLAYER_SPAWN),
        DistanceFog {
            color: config.fog_color(),
            falloff: FogFalloff::Linear {
                start: FOG_START,
                end: FOG_END,
            },
            ..default()
        },
        AmbientLight {
            color: Color::WHITE,
            brightness: levels.ambient * lighting.ambient_brightness_per_unit,
            ..default()
        },
        MainCamera,
        PlayerController::default(),
    ));

    commands.insert_resource(ClearColor(config.sky_color()));

    for light in RoomLight::ALL {
        let intensity = levels.level(light);
        let transform = Transform::from_translation(light.position());
        match light {
            RoomLight::CakeSpot => {
                commands.spawn((
                    light,
                    SpotLight {
                        color: hex(light.color_hex()),
                        intensity: intensity * lighting.spot_lumens_per_unit,
                        range: light.range(),
                        outer_angle: CAKE_SPOT_ANGLE,
                        inner_angle: CAKE_SPOT_ANGLE * (1.0 - CAKE_SPOT_PENUMBRA),
                        shadows_enabled: true,
                        ..default()
                    },
                    transform.looking_at(Vec3::new(0.0, 1.0, -3.0), Vec3::Y),
                ));
            }
            _ => {
                commands.spawn((
                    light,
                    PointLight {
                        color: hex(light.color_hex()),
                        intensity: intensity * lighting.point_lumens_per_unit,
                        range: light.range(),
                        shadows_enabled: light == RoomLight::Pink,
                        ..default()
                    },
                    transform,
                ));
            }
        }
    }

    info!("Camera at {:?}, {} room lights", PLAYER_SPAWN, RoomLight::ALL.len());
}

pub fn spawn_night_sky(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let star_mesh = meshes.add(Sphere::new(0.15).mesh().uv(6, 4));
    let star_mat = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        unlit: true,
        fog_enabled: false,
        ..default()
    });

    let mut rng = rand::thread_rng();
    for _ in 0..STAR_COUNT {
        commands.spawn((
            Mesh3d(star_mesh.clone()),
            MeshMaterial3d(star_mat.clone()),
            Transform::from_translation(star_position(&mut rng, STAR_SHELL_RADIUS)),
        ));
    }
    debug!("Spawned {} stars", STAR_COUNT);
}
