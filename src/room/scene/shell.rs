//! Room shell and carpet
//!
//! Floor, walls, ceiling and trim, plus the Persian carpet under the table.
//! The front of the room (+Z) is left open onto the night sky.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

use bevy::prelude::*;

use super::kit::*;
use crate::room::palette::{hex, Finish};

pub const ROOM_SIZE: f32 = 20.0;
pub const WALL_HEIGHT: f32 = 8.0;

const CARPET_Z: f32 = -3.0;
const GOLD_TRIM: Finish = Finish::metal("#d4af37", 0.3, 0.8);

fn wall_material(color: &str) -> StandardMaterial {
    StandardMaterial {
        base_color: hex(color),
        perceptual_roughness: 0.9,
        double_sided: true,
        cull_mode: None,
        ..default()
    }
}

pub fn spawn_room_shell(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mut kit = Kit::new(&mut meshes, &mut materials);
    let half = ROOM_SIZE / 2.0;

    // Floor
    commands.spawn((
        kit.part(panel(ROOM_SIZE, ROOM_SIZE), Finish::metal("#d4a574", 0.1, 0.8)),
        Transform::from_rotation(face_up()),
    ));

    let wall = kit.mesh(panel(ROOM_SIZE, WALL_HEIGHT));
    let back_mat = kit.material(wall_material("#fff0f5"));
    let side_mat = kit.material(wall_material("#fff5ee"));
    for (position, rotation, material) in [
        (Vec3::new(0.0, WALL_HEIGHT / 2.0, -half), 0.0, back_mat),
        (Vec3::new(-half, WALL_HEIGHT / 2.0, 0.0), FRAC_PI_2, side_mat.clone()),
        (Vec3::new(half, WALL_HEIGHT / 2.0, 0.0), -FRAC_PI_2, side_mat),
    ] {
        commands.spawn((
            Mesh3d(wall.clone()),
            MeshMaterial3d(material),
            Transform::from_translation(position).with_rotation(Quat::from_rotation_y(rotation)),
        ));
    }

    // Ceiling
    let ceiling = kit.material(StandardMaterial {
        perceptual_roughness: 0.8,
        ..wall_material("#f8f8ff")
    });
    commands.spawn((
        Mesh3d(kit.mesh(panel(ROOM_SIZE, ROOM_SIZE))),
        MeshMaterial3d(ceiling),
        Transform::from_xyz(0.0, WALL_HEIGHT, 0.0)
            .with_rotation(Quat::from_rotation_x(FRAC_PI_2)),
    ));

    // Crown molding and baseboards
    for (y, thickness, finish) in [
        (7.9, 0.2, Finish::metal("#ffffff", 0.3, 0.5)),
        (0.1, 0.1, Finish::matte("#ffffff", 0.6)),
    ] {
        let height = 0.2;
        commands.spawn((
            kit.part(Cuboid::new(ROOM_SIZE, height, thickness), finish),
            Transform::from_xyz(0.0, y, -half),
        ));
        for x in [-half, half] {
            commands.spawn((
                kit.part(Cuboid::new(thickness, height, ROOM_SIZE), finish),
                Transform::from_xyz(x, y, 0.0),
            ));
        }
    }

    // Ceiling medallion above the chandelier
    for (radius, y, finish) in [
        (1.2, 7.95, Finish::matte("#ffffff", 0.4)),
        (1.0, 7.9, Finish::metal("#ffd700", 0.6, 0.3)),
    ] {
        commands.spawn((
            kit.part(Cylinder::new(radius, 0.08), finish),
            Transform::from_xyz(0.0, y, CARPET_Z),
        ));
    }

    debug!("Spawned room shell");
}

pub fn spawn_carpet(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mut kit = Kit::new(&mut meshes, &mut materials);

    commands
        .spawn((
            Transform::from_xyz(0.0, 0.0, CARPET_Z),
            Visibility::default(),
        ))
        .with_children(|carpet| {
            let flat = |y: f32, x: f32, z: f32| {
                Transform::from_xyz(x, y, z).with_rotation(face_up())
            };

            carpet.spawn((
                kit.part(panel(5.2, 4.4), Finish::matte("#4a0000", 0.95)),
                flat(0.005, 0.0, 0.0),
            ));
            carpet.spawn((
                kit.part(
                    panel(4.8, 4.0),
                    Finish::matte("#8b0000", 0.9).glowing("#3d0000", 0.08),
                ),
                flat(0.01, 0.0, 0.0),
            ));

            // Gold border
            for (size, x, z) in [
                (Vec2::new(5.2, 0.25), 0.0, -2.075),
                (Vec2::new(5.2, 0.25), 0.0, 2.075),
                (Vec2::new(0.25, 3.9), -2.475, 0.0),
                (Vec2::new(0.25, 3.9), 2.475, 0.0),
            ] {
                carpet.spawn((
                    kit.part(panel(size.x, size.y), GOLD_TRIM),
                    flat(0.011, x, z),
                ));
            }

            for x in [-1.8, -0.9, 0.0, 0.9, 1.8] {
                carpet.spawn((
                    kit.part(Cuboid::new(0.15, 0.01, 0.15), Finish::metal("#ffd700", 0.6, 0.4)),
                    Transform::from_xyz(x, 0.012, 0.0).with_rotation(Quat::from_rotation_y(FRAC_PI_4)),
                ));
            }

            // Medallion and star
            carpet.spawn((
                kit.part(Cylinder::new(0.4, 0.01), Finish::metal("#8b6914", 0.4, 0.7)),
                Transform::from_xyz(0.0, 0.013, 0.0),
            ));
            carpet.spawn((
                kit.part(Cylinder::new(0.3, 0.012), Finish::metal("#ffd700", 0.5, 0.6)),
                Transform::from_xyz(0.0, 0.0135, 0.0),
            ));
            for i in 0..6 {
                let degrees = i as f32 * 60.0;
                carpet.spawn((
                    kit.part(Cuboid::new(0.08, 0.012, 0.25), Finish::metal("#b8860b", 0.5, 0.5)),
                    Transform::from_translation(around(0.12, degrees, 0.014))
                        .with_rotation(Quat::from_rotation_y(-degrees.to_radians())),
                ));
            }

            for (x, z) in [(-2.0, -1.5), (2.0, -1.5), (-2.0, 1.5), (2.0, 1.5)] {
                carpet.spawn((
                    kit.part(Cylinder::new(0.15, 0.01), Finish::metal("#daa520", 0.6, 0.5)),
                    Transform::from_xyz(x, 0.013, z),
                ));
            }

            // Fringe on both short ends
            let fringe = kit.part(Cuboid::new(0.03, 0.01, 0.2), Finish::matte("#654321", 0.9));
            for i in 0..20 {
                let x = -2.4 + i as f32 * 4.8 / 19.0;
                for z in [-2.2, 2.2] {
                    carpet.spawn((fringe.clone(), Transform::from_xyz(x, 0.01, z)));
                }
            }
        });

    debug!("Spawned carpet");
}
