//! Cake spawning
//!
//! Builds the four-tier cake with its five candles. Every animated mesh gets
//! its own material so flames, smoke and sparks can fade independently.

use std::f32::consts::{FRAC_PI_4, TAU};

use bevy::prelude::*;

use super::state::*;
use crate::room::palette::{glow, hex, Finish};
use crate::room::types::{RoomConfig, CAKE_POSITION};

/// (radius inset, y, height, finish) of each cake disc, bottom to top.
const CAKE_DISCS: [(f32, f32, f32, Finish); 8] = [
    (0.0, 0.0, CAKE_LAYER_HEIGHT, Finish::metal("#fff8dc", 0.1, 0.6)),
    (0.05, CAKE_LAYER_HEIGHT / 2.0 + 0.015, 0.03, Finish::metal("#ff69b4", 0.2, 0.3)),
    (0.05, CAKE_LAYER_HEIGHT + 0.03, CAKE_LAYER_HEIGHT, Finish::metal("#ffb6d9", 0.1, 0.6)),
    (0.1, CAKE_LAYER_HEIGHT * 1.5 + 0.045, 0.03, Finish::metal("#fffacd", 0.2, 0.3)),
    (0.1, CAKE_LAYER_HEIGHT * 2.0 + 0.06, CAKE_LAYER_HEIGHT, Finish::metal("#fff8dc", 0.1, 0.6)),
    (0.15, CAKE_LAYER_HEIGHT * 2.5 + 0.075, 0.03, Finish::metal("#ff69b4", 0.2, 0.3)),
    (0.15, CAKE_LAYER_HEIGHT * 3.0 + 0.09, CAKE_LAYER_HEIGHT, Finish::metal("#ffb6d9", 0.1, 0.6)),
    (
        0.15,
        CAKE_LAYER_HEIGHT * 3.5 + 0.1,
        0.02,
        Finish::metal("#ffffff", 0.3, 0.2).glowing("#ffb6c1", 0.2),
    ),
];

fn flame_material(color: &str, emissive: f32, opacity: f32) -> StandardMaterial {
    StandardMaterial {
        base_color: hex(color).with_alpha(opacity),
        emissive: glow(color, emissive),
        alpha_mode: AlphaMode::Blend,
        double_sided: true,
        cull_mode: None,
        ..default()
    }
}

/// Startup system spawning the cake, candles, flames and hearts.
pub fn spawn_birthday_cake(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<RoomConfig>,
) {
    let outer_mesh = meshes.add(Sphere::new(0.03).mesh().uv(16, 16));
    let inner_mesh = meshes.add(Sphere::new(0.02).mesh().uv(16, 16));
    let core_mesh = meshes.add(Sphere::new(0.01).mesh().uv(12, 12));
    let glow_mesh = meshes.add(Sphere::new(0.04).mesh().uv(16, 16));
    let smoke_mesh = meshes.add(Sphere::new(0.01).mesh().uv(8, 8));
    let spark_mesh = meshes.add(Sphere::new(0.003).mesh().uv(6, 6));
    let candle_mesh = meshes.add(Cylinder::new(0.015, CANDLE_HEIGHT));
    let wick_mesh = meshes.add(Cylinder::new(0.002, 0.03));
    let strawberry_mesh = meshes.add(Sphere::new(0.035).mesh().uv(16, 16));
    let heart_lobe_mesh = meshes.add(Sphere::new(0.25).mesh().uv(16, 16));
    let heart_point_mesh = meshes.add(Cuboid::new(0.35, 0.35, 0.3));

    let pink_wax = materials.add(Finish::metal("#ff69b4", 0.6, 0.4).material());
    let blue_wax = materials.add(Finish::metal("#87ceeb", 0.6, 0.4).material());
    let wick_mat = materials.add(Finish::matte("#222222", 0.9).material());
    let strawberry_mat = materials.add(Finish::metal("#ff1744", 0.1, 0.7).material());
    let heart_mat = materials.add(
        Finish::matte("#ff69b4", 0.5)
            .glowing("#ff1493", 0.8)
            .translucent(0.8)
            .material(),
    );
    let glow_mat = materials.add(StandardMaterial {
        base_color: hex("#ffaa00").with_alpha(0.3),
        emissive: glow("#ffaa00", 0.8),
        alpha_mode: AlphaMode::Blend,
        ..default()
    });

    let candle_lumens = config.lighting.candle_lumens_per_unit;

    commands
        .spawn((
            BirthdayCake,
            Transform::from_translation(CAKE_POSITION),
            Visibility::default(),
        ))
        .with_children(|cake| {
            for (inset, y, height, finish) in CAKE_DISCS {
                cake.spawn((
                    Mesh3d(meshes.add(Cylinder::new(CAKE_BASE_RADIUS - inset, height))),
                    MeshMaterial3d(materials.add(finish.material())),
                    Transform::from_xyz(0.0, y, 0.0),
                ));
            }

            // Plate
            cake.spawn((
                Mesh3d(meshes.add(Cylinder::new(CAKE_BASE_RADIUS + 0.15, 0.02))),
                MeshMaterial3d(materials.add(Finish::metal("#ffffff", 0.8, 0.2).material())),
                Transform::from_xyz(0.0, -0.02, 0.0),
            ));

            for i in 0..6 {
                let angle = i as f32 / 6.0 * TAU;
                cake.spawn((
                    Mesh3d(strawberry_mesh.clone()),
                    MeshMaterial3d(strawberry_mat.clone()),
                    Transform::from_xyz(
                        angle.cos() * 0.35,
                        CAKE_LAYER_HEIGHT * 3.5 + 0.13,
                        angle.sin() * 0.35,
                    ),
                ));
            }

            for (index, offset) in CANDLE_OFFSETS.iter().enumerate() {
                let wax = if index % 2 == 0 {
                    pink_wax.clone()
                } else {
                    blue_wax.clone()
                };

                cake.spawn((
                    Transform::from_xyz(offset.x, CANDLE_CENTER_Y, offset.y),
                    Visibility::default(),
                ))
                .with_children(|candle| {
                    candle.spawn((Mesh3d(candle_mesh.clone()), MeshMaterial3d(wax)));
                    candle.spawn((
                        Mesh3d(wick_mesh.clone()),
                        MeshMaterial3d(wick_mat.clone()),
                        Transform::from_xyz(0.0, CANDLE_HEIGHT / 2.0 + 0.02, 0.0),
                    ));

                    candle
                        .spawn((
                            Transform::from_xyz(0.0, FLAME_HEIGHT, 0.0),
                            Visibility::default(),
                        ))
                        .with_children(|flame| {
                            for (part, mesh, color, emissive, opacity, rest) in [
                                (FlamePart::Outer, &outer_mesh, "#ff3300", 1.5, 0.85, Vec3::ZERO),
                                (
                                    FlamePart::Inner,
                                    &inner_mesh,
                                    "#ff6600",
                                    2.0,
                                    0.9,
                                    Vec3::new(0.0, 0.005, 0.0),
                                ),
                                (FlamePart::Core, &core_mesh, "#ffff66", 3.0, 0.95, Vec3::ZERO),
                            ] {
                                flame.spawn((
                                    FlameLayer {
                                        candle: index,
                                        part,
                                        rest,
                                    },
                                    Mesh3d(mesh.clone()),
                                    MeshMaterial3d(
                                        materials.add(flame_material(color, emissive, opacity)),
                                    ),
                                    Transform::from_translation(rest),
                                ));
                            }

                            flame.spawn((
                                FlameGlow,
                                Mesh3d(glow_mesh.clone()),
                                MeshMaterial3d(glow_mat.clone()),
                                Transform::from_xyz(0.0, 0.01, 0.0),
                            ));

                            for slot in 0..SPARKS_PER_CANDLE {
                                let pose = spark_pose(0.0, index, slot);
                                flame.spawn((
                                    Spark {
                                        candle: index,
                                        slot,
                                    },
                                    Mesh3d(spark_mesh.clone()),
                                    MeshMaterial3d(
                                        materials.add(flame_material("#ffff00", 2.5, 0.8)),
                                    ),
                                    Transform::from_translation(pose.offset),
                                ));
                            }
                        });

                    for slot in 0..SMOKE_PUFFS_PER_CANDLE {
                        let puff = SmokePuff::new(slot);
                        candle.spawn((
                            SmokeParticle { slot, puff },
                            Mesh3d(smoke_mesh.clone()),
                            MeshMaterial3d(materials.add(StandardMaterial {
                                base_color: hex("#999999").with_alpha(puff.opacity),
                                alpha_mode: AlphaMode::Blend,
                                ..default()
                            })),
                            Transform::from_translation(puff.position),
                        ));
                    }

                    candle.spawn((
                        CandleLight { candle: index },
                        PointLight {
                            color: hex("#ffaa33"),
                            intensity: 1.8 * candle_lumens,
                            range: CANDLE_LIGHT_RANGE,
                            shadows_enabled: index == 0,
                            ..default()
                        },
                        Transform::from_xyz(0.0, FLAME_HEIGHT, 0.0),
                    ));
                });
            }

            for index in 0..CAKE_HEART_COUNT {
                let angle = index as f32 / CAKE_HEART_COUNT as f32 * TAU;
                cake.spawn((
                    CakeHeart { index },
                    heart_pose(0.0, index).with_rotation(Quat::from_rotation_y(angle)),
                    Visibility::default(),
                ))
                .with_children(|heart| {
                    for x in [-0.15, 0.15] {
                        heart.spawn((
                            Mesh3d(heart_lobe_mesh.clone()),
                            MeshMaterial3d(heart_mat.clone()),
                            Transform::from_xyz(x, 0.15, 0.0),
                        ));
                    }
                    heart.spawn((
                        Mesh3d(heart_point_mesh.clone()),
                        MeshMaterial3d(heart_mat.clone()),
                        Transform::from_xyz(0.0, -0.1, 0.0)
                            .with_rotation(Quat::from_rotation_z(FRAC_PI_4)),
                    ));
                });
            }
        });

    info!("Spawned cake with {} candles", CANDLE_OFFSETS.len());
}
