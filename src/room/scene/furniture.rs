//! Dining table, chairs and potted plants

use std::f32::consts::{FRAC_PI_2, PI};

use bevy::prelude::*;

use super::kit::*;
use crate::room::palette::Finish;

pub const TABLE_POSITION: Vec3 = Vec3::new(0.0, 1.0, -3.0);

const GOLD: Finish = Finish::metal("#ffd700", 0.9, 0.2);
const GOLD_DARK: Finish = Finish::metal("#d4af37", 0.9, 0.2);
const WALNUT: Finish = Finish::metal("#4a2511", 0.2, 0.6);

/// (position, yaw) of each chair around the table.
const CHAIRS: [(Vec3, f32); 4] = [
    (Vec3::new(-1.8, 0.5, -3.0), 0.0),
    (Vec3::new(1.8, 0.5, -3.0), PI),
    (Vec3::new(0.0, 0.5, -4.5), FRAC_PI_2),
    (Vec3::new(0.0, 0.5, -1.5), -FRAC_PI_2),
];

pub fn spawn_table_and_chairs(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mut kit = Kit::new(&mut meshes, &mut materials);

    commands
        .spawn((Transform::from_translation(TABLE_POSITION), Visibility::default()))
        .with_children(|table| {
            table.spawn((
                kit.part(
                    Cuboid::new(3.2, 0.12, 2.2),
                    Finish::metal("#3d1f00", 0.4, 0.5).glowing("#1a0d00", 0.1),
                ),
                Transform::default(),
            ));
            table.spawn((kit.part(Cuboid::new(3.3, 0.05, 2.3), GOLD), Transform::from_xyz(0.0, 0.08, 0.0)));

            let leg = kit.part(taper(0.08, 0.12, 1.0), WALNUT);
            let foot = kit.part(ball(0.1), GOLD);
            for x in [-1.3, 1.3] {
                for z in [-0.9, 0.9] {
                    table.spawn((leg.clone(), Transform::from_xyz(x, -0.5, z)));
                    table.spawn((foot.clone(), Transform::from_xyz(x, -1.0, z)));
                }
            }
        });

    let pink_ball = kit.part(ball(0.08), Finish::metal("#ff69b4", 0.3, 0.3));
    for x in [-1.3, 1.3] {
        for z in [-3.8, -2.2] {
            commands.spawn((pink_ball.clone(), Transform::from_xyz(x, 0.9, z)));
        }
    }

    let seat = kit.part(Cuboid::new(0.52, 0.12, 0.52), Finish::matte("#6b0f1a", 0.8));
    let piping = kit.part(Cuboid::new(0.54, 0.02, 0.54), GOLD);
    let back = kit.part(Cuboid::new(0.5, 0.7, 0.12), Finish::matte("#8b1a1a", 0.8));
    let slat = kit.part(Cylinder::new(0.02, 0.6), Finish::metal("#4a0f0f", 0.2, 0.6));
    let rail = kit.part(Cuboid::new(0.55, 0.1, 0.12), GOLD);
    let finial = kit.part(ball(0.05), GOLD_DARK);
    let chair_leg = kit.part(taper(0.035, 0.045, 0.5), WALNUT);
    let ring = kit.part(Cylinder::new(0.05, 0.03), Finish::metal("#8b4513", 0.3, 0.5));
    let ferrule = kit.part(taper(0.05, 0.04, 0.04), GOLD);
    let brace_x = kit.part(Cuboid::new(0.45, 0.03, 0.03), Finish::matte("#654321", 0.7));
    let brace_z = kit.part(Cuboid::new(0.03, 0.03, 0.45), Finish::matte("#654321", 0.7));

    for (position, yaw) in CHAIRS {
        commands
            .spawn((
                Transform::from_translation(position).with_rotation(Quat::from_rotation_y(yaw)),
                Visibility::default(),
            ))
            .with_children(|chair| {
                chair.spawn((seat.clone(), Transform::default()));
                chair.spawn((piping.clone(), Transform::from_xyz(0.0, 0.07, 0.0)));

                chair
                    .spawn((Transform::from_xyz(0.0, 0.4, -0.22), Visibility::default()))
                    .with_children(|back_group| {
                        back_group.spawn((back.clone(), Transform::default()));
                        for x in [-0.15, 0.0, 0.15] {
                            back_group.spawn((slat.clone(), Transform::from_xyz(x, 0.0, 0.07)));
                        }
                        back_group.spawn((rail.clone(), Transform::from_xyz(0.0, 0.37, 0.0)));
                        for x in [-0.25, 0.25] {
                            back_group.spawn((finial.clone(), Transform::from_xyz(x, 0.42, 0.0)));
                        }
                    });

                for x in [-0.2, 0.2] {
                    for z in [-0.2, 0.2] {
                        chair.spawn((chair_leg.clone(), Transform::from_xyz(x, -0.25, z)));
                        chair.spawn((ring.clone(), Transform::from_xyz(x, -0.1, z)));
                        chair.spawn((ring.clone(), Transform::from_xyz(x, -0.35, z)));
                        chair.spawn((ferrule.clone(), Transform::from_xyz(x, -0.51, z)));
                    }
                }
                chair.spawn((brace_x.clone(), Transform::from_xyz(0.0, -0.15, 0.0)));
                chair.spawn((brace_z.clone(), Transform::from_xyz(0.0, -0.15, 0.0)));
            });
    }

    debug!("Spawned table and {} chairs", CHAIRS.len());
}

pub fn spawn_plants(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mut kit = Kit::new(&mut meshes, &mut materials);

    // Ficus in a terracotta pot
    commands
        .spawn((Transform::from_xyz(8.0, 0.0, 6.0), Visibility::default()))
        .with_children(|plant| {
            plant.spawn((
                kit.part(taper(0.25, 0.3, 0.5), Finish::matte("#8b4513", 0.8)),
                Transform::from_xyz(0.0, 0.25, 0.0),
            ));
            plant.spawn((kit.part(Cylinder::new(0.32, 0.06), GOLD), Transform::from_xyz(0.0, 0.52, 0.0)));
            plant.spawn((
                kit.part(taper(0.32, 0.28, 0.08), Finish::matte("#654321", 0.7)),
                Transform::from_xyz(0.0, 0.02, 0.0),
            ));
            plant.spawn((kit.part(Cylinder::new(0.255, 0.03), GOLD_DARK), Transform::from_xyz(0.0, 0.35, 0.0)));
            plant.spawn((
                kit.part(Cylinder::new(0.24, 0.05), Finish::matte("#3d2817", 1.0)),
                Transform::from_xyz(0.0, 0.53, 0.0),
            ));

            let lower = kit.part(ball(0.25), Finish::matte("#1a5d1a", 0.8));
            let upper = kit.part(ball(0.22), Finish::matte("#228b22", 0.8));
            for i in 0..6 {
                let degrees = i as f32 * 60.0;
                plant.spawn((lower.clone(), Transform::from_translation(around(0.15, degrees, 0.75))));
                plant.spawn((
                    upper.clone(),
                    Transform::from_translation(around(0.12, degrees + 30.0, 0.95)),
                ));
            }
            plant.spawn((
                kit.part(ball(0.28), Finish::matte("#32cd32", 0.8)),
                Transform::from_xyz(0.0, 1.15, 0.0),
            ));
            plant.spawn((
                kit.part(ball(0.2), Finish::matte("#3cb371", 0.8)),
                Transform::from_xyz(0.1, 1.3, 0.0),
            ));
        });

    // Rose bush
    commands
        .spawn((Transform::from_xyz(-8.0, 0.0, 6.0), Visibility::default()))
        .with_children(|plant| {
            plant.spawn((
                kit.part(taper(0.18, 0.23, 0.4), Finish::metal("#cd5c5c", 0.1, 0.6)),
                Transform::from_xyz(0.0, 0.2, 0.0),
            ));
            for i in 0..3 {
                plant.spawn((
                    kit.part(
                        Cylinder::new(0.19 + i as f32 * 0.01, 0.02),
                        Finish::metal("#b8860b", 0.8, 0.3),
                    ),
                    Transform::from_xyz(0.0, 0.1 + i as f32 * 0.1, 0.0),
                ));
            }
            plant.spawn((
                kit.part(Cylinder::new(0.17, 0.04), Finish::matte("#2f1a06", 1.0)),
                Transform::from_xyz(0.0, 0.42, 0.0),
            ));

            let stem = kit.part(taper(0.02, 0.025, 0.9), Finish::matte("#0d5c0d", 0.8));
            let leaf = kit.part(Cuboid::new(0.08, 0.15, 0.02), Finish::matte("#228b22", 0.7));
            let petal = kit.part(ball(0.06), Finish::matte("#ff1493", 0.5));
            let heart = kit.part(ball(0.08), Finish::matte("#c71585", 0.5));
            let inner = kit.part(ball(0.04), Finish::matte("#ff69b4", 0.5));

            for (i, x) in [0.0, 0.2, -0.15].into_iter().enumerate() {
                plant.spawn((stem.clone(), Transform::from_xyz(x, 0.85, 0.0)));
                for (j, y) in [0.6, 0.8, 1.0].into_iter().enumerate() {
                    let side = if j % 2 == 0 { 1.0 } else { -1.0 };
                    plant.spawn((
                        leaf.clone(),
                        Transform::from_xyz(x + side * 0.08, y, 0.0)
                            .with_rotation(Quat::from_rotation_z(-side * 0.5)),
                    ));
                }

                let bloom = Vec3::new(x, 1.25 + i as f32 * 0.1, 0.0);
                for k in 0..8 {
                    plant.spawn((
                        petal.clone(),
                        Transform::from_translation(bloom + around(0.07, k as f32 * 45.0, 0.0)),
                    ));
                }
                plant.spawn((heart.clone(), Transform::from_translation(bloom)));
                for k in 0..3 {
                    plant.spawn((
                        inner.clone(),
                        Transform::from_translation(bloom + around(0.04, k as f32 * 120.0, 0.02)),
                    ));
                }
            }
        });

    debug!("Spawned plants");
}
