//! Crystal chandelier hanging above the table

use bevy::prelude::*;

use super::kit::*;
use crate::room::palette::Finish;
use crate::room::types::RoomConfig;

pub const CHANDELIER_POSITION: Vec3 = Vec3::new(0.0, 6.5, -3.0);

const GOLD: Finish = Finish::metal("#ffd700", 0.9, 0.2);
const GOLD_DARK: Finish = Finish::metal("#d4af37", 0.9, 0.2);
const CANDLE_WHITE: Finish = Finish::matte("#ffffff", 0.4).translucent(0.95);

/// One ring of candle arms.
struct Tier {
    count: usize,
    start_degrees: f32,
    radius: f32,
    y: f32,
    candle: (f32, f32, f32),
    bead_radius: f32,
    bead_color: &'static str,
    drop_radius: f32,
    drop_stretch: f32,
    drop_color: &'static str,
    light: (&'static str, f32, f32),
}

const TIERS: [Tier; 3] = [
    Tier {
        count: 9,
        start_degrees: 0.0,
        radius: 0.45,
        y: 0.15,
        candle: (0.04, 0.02, 0.5),
        bead_radius: 0.045,
        bead_color: "#ffd700",
        drop_radius: 0.06,
        drop_stretch: 1.3,
        drop_color: "#e0f7ff",
        light: ("#fff5e6", 0.35, 2.5),
    },
    Tier {
        count: 9,
        start_degrees: 20.0,
        radius: 0.55,
        y: -0.05,
        candle: (0.045, 0.025, 0.6),
        bead_radius: 0.05,
        bead_color: "#ffe4e1",
        drop_radius: 0.07,
        drop_stretch: 1.4,
        drop_color: "#f0f8ff",
        light: ("#fff8dc", 0.4, 3.0),
    },
    Tier {
        count: 12,
        start_degrees: 0.0,
        radius: 0.65,
        y: -0.25,
        candle: (0.05, 0.03, 0.7),
        bead_radius: 0.055,
        bead_color: "#fff0f5",
        drop_radius: 0.08,
        drop_stretch: 1.5,
        drop_color: "#f5fffa",
        light: ("#fffacd", 0.45, 3.5),
    },
];

fn crystal(color: &'static str) -> Finish {
    Finish::metal(color, 0.1, 0.05).glowing(color, 0.1).translucent(0.85)
}

pub fn spawn_chandelier(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<RoomConfig>,
) {
    let mut kit = Kit::new(&mut meshes, &mut materials);
    let candle_lumens = config.lighting.candle_lumens_per_unit;
    let point_lumens = config.lighting.point_lumens_per_unit;

    commands
        .spawn((
            Transform::from_translation(CHANDELIER_POSITION),
            Visibility::default(),
        ))
        .with_children(|root| {
            // Ceiling mount and rosettes
            root.spawn((kit.part(Cylinder::new(0.25, 0.15), GOLD), Transform::from_xyz(0.0, 0.85, 0.0)));
            root.spawn((
                kit.part(Cylinder::new(0.2, 0.08), Finish::matte("#ffffff", 0.3)),
                Transform::from_xyz(0.0, 0.77, 0.0),
            ));
            let rosette = kit.part(ball(0.04), GOLD_DARK);
            for i in 0..8 {
                root.spawn((
                    rosette.clone(),
                    Transform::from_translation(around(0.22, i as f32 * 45.0, 0.78)),
                ));
            }

            // Chain
            let link = kit.part(Cylinder::new(0.025, 0.25), Finish::metal("#c0c0c0", 0.9, 0.2));
            let knot = kit.part(ball(0.035), GOLD);
            for i in 0..5 {
                let y = 0.7 - i as f32 * 0.3;
                root.spawn((link.clone(), Transform::from_xyz(0.0, y, 0.0)));
                root.spawn((knot.clone(), Transform::from_xyz(0.0, y + 0.13, 0.0)));
            }

            // Crown with alternating jewels
            root.spawn((
                kit.part(taper(0.4, 0.35, 0.2), GOLD.glowing("#ffeb3b", 0.2)),
                Transform::from_xyz(0.0, -0.6, 0.0),
            ));
            let jewel = kit.mesh(ball(0.05));
            for i in 0..12 {
                let color = if i % 2 == 0 { "#ff1493" } else { "#87ceeb" };
                let finish = Finish::metal(color, 0.3, 0.1).glowing(color, 0.5);
                root.spawn((
                    Mesh3d(jewel.clone()),
                    MeshMaterial3d(kit.finish(finish)),
                    Transform::from_translation(around(0.38, i as f32 * 30.0, -0.6)),
                ));
            }

            root.spawn((
                kit.part(ball(0.35), GOLD.glowing("#ffd700", 0.4)),
                Transform::from_xyz(0.0, -0.8, 0.0),
            ));

            for tier in &TIERS {
                let (top, bottom, height) = tier.candle;
                let candle = kit.part(taper(top, bottom, height), CANDLE_WHITE);
                let bead = kit.part(ball(tier.bead_radius), Finish::metal(tier.bead_color, 0.6, 0.2));
                let drop = kit.part(ball(tier.drop_radius), crystal(tier.drop_color));
                let (light_color, light_level, light_range) = tier.light;
                let step = 360.0 / tier.count as f32;

                for i in 0..tier.count {
                    let degrees = tier.start_degrees + i as f32 * step;
                    root.spawn((
                        Transform::from_translation(around(tier.radius, degrees, tier.y - 0.8)),
                        Visibility::default(),
                    ))
                    .with_children(|arm| {
                        arm.spawn((candle.clone(), Transform::default()));
                        arm.spawn((bead.clone(), Transform::from_xyz(0.0, height / 2.0 + 0.01, 0.0)));
                        arm.spawn((
                            drop.clone(),
                            Transform::from_xyz(0.0, -(height / 2.0 + 0.02), 0.0)
                                .with_scale(Vec3::new(1.0, tier.drop_stretch, 1.0)),
                        ));
                        arm.spawn((
                            accent_light(light_color, light_level, light_range, candle_lumens),
                            Transform::from_xyz(0.0, height / 2.0 + 0.05, 0.0),
                        ));
                    });
                }
            }

            // Bead strands
            let strand_bead = kit.part(ball(0.03), crystal("#ffffff"));
            for i in 0..6 {
                for j in 0..5 {
                    let radius = 0.42 + j as f32 * 0.05;
                    let y = 0.05 - j as f32 * 0.08 - 0.8;
                    root.spawn((
                        strand_bead.clone(),
                        Transform::from_translation(around(radius, i as f32 * 60.0, y)),
                    ));
                }
            }

            root.spawn((
                accent_light("#fff8dc", 1.2, 10.0, point_lumens),
                Transform::from_xyz(0.0, -0.8, 0.0),
            ));
            root.spawn((
                accent_light("#fffacd", 0.8, 8.0, point_lumens),
                Transform::from_xyz(0.0, -1.1, 0.0),
            ));

            // Finial
            root.spawn((
                kit.part(taper(0.08, 0.15, 0.25), GOLD.glowing("#ffd700", 0.3)),
                Transform::from_xyz(0.0, -1.5, 0.0),
            ));
            root.spawn((kit.part(ball(0.12), GOLD_DARK), Transform::from_xyz(0.0, -1.68, 0.0)));
            root.spawn((
                kit.part(ball(0.1), crystal("#ffffff")),
                Transform::from_xyz(0.0, -1.85, 0.0).with_scale(Vec3::new(1.0, 1.6, 1.0)),
            ));
            root.spawn((
                accent_light("#fff5e6", 0.5, 3.0, candle_lumens),
                Transform::from_xyz(0.0, -1.85, 0.0),
            ));
        });

    debug!("Spawned chandelier at {:?}", CHANDELIER_POSITION);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiers_fan_out_and_descend() {
        let arms: usize = TIERS.iter().map(|t| t.count).sum();
        assert_eq!(arms, 30);
        for pair in TIERS.windows(2) {
            assert!(pair[1].radius > pair[0].radius);
            assert!(pair[1].y < pair[0].y);
        }
    }
}
