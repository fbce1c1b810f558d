//! Balloons, floating hearts, sconces, columns and wax candlesticks

use bevy::prelude::*;

use super::kit::*;
use crate::room::palette::Finish;
use crate::room::types::RoomConfig;

const GOLD: Finish = Finish::metal("#ffd700", 0.9, 0.2);
const GOLD_DARK: Finish = Finish::metal("#d4af37", 0.9, 0.2);

/// (position, color, radius) of each balloon.
pub const BALLOONS: [(Vec3, &str, f32); 8] = [
    (Vec3::new(-4.0, 5.0, -8.0), "#ff69b4", 0.3),
    (Vec3::new(-2.0, 5.5, -7.0), "#87ceeb", 0.35),
    (Vec3::new(2.0, 5.2, -8.5), "#ffd700", 0.32),
    (Vec3::new(4.0, 5.8, -7.5), "#ff1493", 0.28),
    (Vec3::new(-6.0, 5.3, -6.0), "#ffb6c1", 0.33),
    (Vec3::new(6.0, 5.6, -6.5), "#dda0dd", 0.31),
    (Vec3::new(-5.0, 6.0, -5.0), "#ff1493", 0.3),
    (Vec3::new(5.0, 5.9, -5.5), "#87ceeb", 0.29),
];

const HEARTS: [(Vec3, f32); 8] = [
    (Vec3::new(-3.0, 3.0, -5.0), 0.15),
    (Vec3::new(3.0, 3.5, -6.0), 0.12),
    (Vec3::new(0.0, 3.8, -7.0), 0.1),
    (Vec3::new(-5.0, 4.2, -4.0), 0.13),
    (Vec3::new(5.0, 4.0, -5.0), 0.14),
    (Vec3::new(-2.0, 4.5, -8.0), 0.11),
    (Vec3::new(2.0, 4.3, -7.5), 0.12),
    (Vec3::new(0.0, 5.0, -6.0), 0.1),
];
const HEART_COLORS: [&str; 4] = ["#ff1493", "#ff69b4", "#ffb6c1", "#ff69b4"];

const CANDLESTICKS: [Vec3; 4] = [
    Vec3::new(5.0, 0.35, -9.0),
    Vec3::new(-5.0, 0.35, -9.0),
    Vec3::new(8.0, 0.35, 8.0),
    Vec3::new(-8.0, 0.35, 8.0),
];

/// Horizontal wiggle of the balloon string at `segment`.
pub fn string_curl(segment: usize) -> f32 {
    (segment as f32 * 0.8).sin() * 0.05
}

pub fn spawn_balloons_and_hearts(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mut kit = Kit::new(&mut meshes, &mut materials);
    let highlight_finish = Finish::matte("#ffffff", 0.1).translucent(0.4);
    let string = kit.part(Cylinder::new(0.008, 0.15), Finish::matte("#f5f5f5", 0.5));
    let knot_mesh = kit.mesh(ball(0.04));

    for (position, color, size) in BALLOONS {
        let body = kit.part(ball(size), Finish::metal(color, 0.15, 0.2).glowing(color, 0.1));
        let highlight = kit.part(ball(size * 0.3), highlight_finish);
        let knot = MeshMaterial3d(kit.finish(Finish::matte(color, 0.4)));

        commands
            .spawn((Transform::from_translation(position), Visibility::default()))
            .with_children(|balloon| {
                balloon.spawn((body, Transform::from_scale(Vec3::new(1.0, 1.15, 1.0))));
                balloon.spawn((
                    highlight,
                    Transform::from_xyz(-size * 0.4, size * 0.5, size * 0.4),
                ));
                balloon.spawn((
                    Mesh3d(knot_mesh.clone()),
                    knot,
                    Transform::from_xyz(0.0, -size * 1.15, 0.0),
                ));
                for segment in 0..5 {
                    let curl = string_curl(segment);
                    balloon.spawn((
                        string.clone(),
                        Transform::from_xyz(curl, -size * 1.2 - segment as f32 * 0.14, 0.0)
                            .with_rotation(Quat::from_rotation_z(curl * 2.0)),
                    ));
                }
            });
    }

    for (i, (position, size)) in HEARTS.into_iter().enumerate() {
        let color = HEART_COLORS[i % HEART_COLORS.len()];
        commands.spawn((
            kit.part(ball(size), Finish::matte(color, 0.5).glowing(color, 0.5)),
            Transform::from_translation(position)
                .with_rotation(Quat::from_euler(EulerRot::XYZ, 0.5, 0.5 * i as f32, 0.0)),
        ));
    }

    debug!("Spawned {} balloons and {} hearts", BALLOONS.len(), HEARTS.len());
}

pub fn spawn_wall_fixtures(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<RoomConfig>,
) {
    let mut kit = Kit::new(&mut meshes, &mut materials);
    let candle_lumens = config.lighting.candle_lumens_per_unit;

    // Sconces, lit toward the room
    let sconce = kit.part(Cuboid::new(0.2, 0.3, 0.2), Finish::metal("#d4af37", 0.9, 0.1));
    for side in [-1.0f32, 1.0] {
        commands
            .spawn((Transform::from_xyz(side * 9.5, 2.5, -5.0), Visibility::default()))
            .with_children(|fixture| {
                fixture.spawn((sconce.clone(), Transform::default()));
                fixture.spawn((
                    accent_light("#fff5e6", 0.4, 4.0, candle_lumens),
                    Transform::from_xyz(-side * 0.5, 0.0, 0.0),
                ));
            });
    }

    // Corner columns
    let shaft = kit.part(taper(0.2, 0.25, 3.0), Finish::metal("#ffffff", 0.1, 0.4));
    let capital = kit.part(Cuboid::new(0.5, 0.2, 0.5), GOLD);
    for x in [-9.5, 9.5] {
        for z in [-9.5, 9.5] {
            commands.spawn((shaft.clone(), Transform::from_xyz(x, 1.5, z)));
            commands.spawn((capital.clone(), Transform::from_xyz(x, 3.1, z)));
        }
    }

    debug!("Spawned sconces and columns");
}

type Part = ((Mesh3d, MeshMaterial3d<StandardMaterial>), Transform);

fn add(parts: &mut Vec<Part>, kit: &mut Kit, mesh: impl Into<Mesh>, finish: Finish, transform: Transform) {
    parts.push((kit.part(mesh, finish), transform));
}

pub fn spawn_candlesticks(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<RoomConfig>,
) {
    let mut kit = Kit::new(&mut meshes, &mut materials);
    let candle_lumens = config.lighting.candle_lumens_per_unit;

    let mut parts: Vec<Part> = Vec::new();
    let at = |y: f32| Transform::from_xyz(0.0, y, 0.0);

    // Base
    add(&mut parts, &mut kit, Cylinder::new(0.2, 0.03), Finish::metal("#3d1f00", 0.3, 0.5), at(-0.265));
    add(&mut parts, &mut kit, taper(0.21, 0.19, 0.05), GOLD, at(-0.24));
    add(&mut parts, &mut kit, Cylinder::new(0.16, 0.08), GOLD_DARK, at(-0.2));
    for i in 0..4 {
        add(
            &mut parts,
            &mut kit,
            ball(0.025),
            Finish::metal("#ff1493", 0.3, 0.2),
            Transform::from_translation(around(0.16, i as f32 * 90.0, -0.2)),
        );
    }

    // Stem and cup
    add(&mut parts, &mut kit, taper(0.08, 0.12, 0.25), Finish::metal("#c0c0c0", 0.9, 0.2), at(-0.075));
    for y in [-0.15, -0.05, 0.05] {
        add(&mut parts, &mut kit, Cylinder::new(0.13, 0.02), GOLD, at(y));
    }
    add(&mut parts, &mut kit, taper(0.09, 0.07, 0.08), GOLD, at(0.08));
    add(&mut parts, &mut kit, Cylinder::new(0.12, 0.02), GOLD, at(0.12));

    // Candle with wax drips
    add(&mut parts, &mut kit, Cylinder::new(0.065, 0.45), Finish::matte("#fffaf0", 0.6), at(0.25));
    let wax = Finish::matte("#fff8dc", 0.5).translucent(0.8);
    for (y, spread, height) in [(0.35, 1.1, 0.08), (0.28, 1.15, 0.1), (0.2, 1.2, 0.12), (0.12, 1.15, 0.08)] {
        add(&mut parts, &mut kit, taper(0.065 * spread, 0.065 * (spread - 0.05), height), wax, at(y));
    }
    for i in 0..3 {
        for k in 0..3 {
            add(
                &mut parts,
                &mut kit,
                ball(0.015),
                Finish::matte("#fffacd", 0.4),
                Transform::from_translation(around(0.07, i as f32 * 120.0, 0.38 - k as f32 * 0.05)),
            );
        }
    }

    // Wick and flame
    add(&mut parts, &mut kit, Cylinder::new(0.008, 0.06), Finish::matte("#1a1a1a", 0.9), at(0.51));
    add(&mut parts, &mut kit, ball(0.012), Finish::matte("#ff6600", 0.5).glowing("#ff6600", 1.0), at(0.54));
    for (radius, stretch, color, emissive, strength, opacity, y) in [
        (0.025, Vec3::new(1.0, 1.4, 1.0), "#ffffcc", "#ffffff", 1.2, 0.9, 0.52),
        (0.04, Vec3::new(1.0, 1.5, 1.0), "#ffcc00", "#ffaa00", 1.0, 0.7, 0.53),
        (0.055, Vec3::new(1.0, 1.6, 1.0), "#ff8800", "#ff6600", 0.8, 0.5, 0.54),
        (0.02, Vec3::new(0.8, 1.2, 0.8), "#ff6600", "#ff4400", 0.9, 1.0, 0.6),
    ] {
        add(
            &mut parts,
            &mut kit,
            ball(radius),
            Finish::matte(color, 0.5).glowing(emissive, strength).translucent(opacity),
            at(y).with_scale(stretch),
        );
    }
    for k in 0..3 {
        add(
            &mut parts,
            &mut kit,
            ball(0.015 + k as f32 * 0.005),
            Finish::matte("#888888", 1.0).translucent(0.15 - k as f32 * 0.04),
            at(0.62 + k as f32 * 0.08),
        );
    }

    for position in CANDLESTICKS {
        commands
            .spawn((Transform::from_translation(position), Visibility::default()))
            .with_children(|stick| {
                for (part, transform) in &parts {
                    stick.spawn((part.clone(), *transform));
                }
                stick.spawn((accent_light("#ffaa00", 0.6, 4.0, candle_lumens), at(0.52)));
                stick.spawn((accent_light("#ff8844", 0.3, 2.5, candle_lumens), at(0.52)));
            });
    }

    debug!("Spawned {} candlesticks of {} parts", CANDLESTICKS.len(), parts.len());
}
