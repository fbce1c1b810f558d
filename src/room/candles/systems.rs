//! Candle Systems
//!
//! Per-frame animation of the flames, smoke, sparks and hearts, plus the
//! blow-out progression driven by `BlowCandles`.

use bevy::prelude::*;

use super::state::*;
use crate::room::palette::{glow, EMISSIVE_SCALE};
use crate::room::types::{BlowCandles, CandlesExtinguished, RoomConfig};

/// Start the blow when asked to.
pub fn start_blowing_candles(
    mut blow_requests: MessageReader<BlowCandles>,
    mut candles: ResMut<CandleState>,
) {
    for _ in blow_requests.read() {
        if candles.begin_blow() {
            info!("Blowing out the candles");
        } else {
            debug!("Ignoring blow request (blowing: {}, lit: {})", candles.blowing, candles.lit);
        }
    }
}

pub fn advance_candle_blow(
    time: Res<Time>,
    mut candles: ResMut<CandleState>,
    mut extinguished: MessageWriter<CandlesExtinguished>,
) {
    if candles.advance(time.delta_secs()) {
        info!("Candles extinguished");
        extinguished.write(CandlesExtinguished);
    }
}

/// Hide the spent flame meshes, glows and lights once the candles are out.
pub fn hide_extinguished_flames(
    mut extinguished: MessageReader<CandlesExtinguished>,
    mut flames: Query<
        &mut Visibility,
        Or<(With<FlameLayer>, With<FlameGlow>, With<CandleLight>)>,
    >,
) {
    if extinguished.read().count() == 0 {
        return;
    }
    for mut visibility in flames.iter_mut() {
        *visibility = Visibility::Hidden;
    }
    debug!("Hid extinguished flames");
}

/// Flicker every flame layer and candle light.
pub fn animate_candle_flames(
    time: Res<Time>,
    candles: Res<CandleState>,
    config: Res<RoomConfig>,
    mut layers: Query<(&FlameLayer, &mut Transform, &MeshMaterial3d<StandardMaterial>)>,
    mut glows: Query<&mut Transform, (With<FlameGlow>, Without<FlameLayer>)>,
    mut lights: Query<(&CandleLight, &mut PointLight)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let t = time.elapsed_secs();
    let intensity = candles.intensity();
    let sway = candles.sway();

    for (layer, mut transform, material) in layers.iter_mut() {
        let sample = FlameSample::at(t, layer.candle, intensity, sway);
        let values = match layer.part {
            FlamePart::Outer => sample.outer,
            FlamePart::Inner => sample.inner,
            FlamePart::Core => sample.core,
        };

        transform.translation = layer.rest + values.offset;
        transform.scale = values.scale;

        let Some(mat) = materials.get_mut(&material.0) else {
            continue;
        };
        mat.base_color.set_alpha(values.opacity);
        mat.emissive = match layer.part {
            FlamePart::Outer => {
                LinearRgba::rgb(1.0, sample.outer_green, 0.0) * (values.emissive * EMISSIVE_SCALE)
            }
            FlamePart::Inner => glow("#ff6600", values.emissive),
            FlamePart::Core => glow("#ffff66", values.emissive),
        };
    }

    for mut transform in glows.iter_mut() {
        transform.scale = Vec3::splat(intensity);
    }

    let lumens = config.lighting.candle_lumens_per_unit;
    for (light, mut point) in lights.iter_mut() {
        let sample = FlameSample::at(t, light.candle, intensity, sway);
        point.intensity = sample.light_intensity * lumens;
        point.color = sample.light_color();
    }
}

pub fn animate_candle_smoke(
    time: Res<Time>,
    candles: Res<CandleState>,
    mut puffs: Query<(&mut SmokeParticle, &mut Transform, &MeshMaterial3d<StandardMaterial>)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let dt = time.delta_secs();
    let t = time.elapsed_secs();

    for (mut particle, mut transform, material) in puffs.iter_mut() {
        let slot = particle.slot;
        particle.puff.step(dt, t, slot, candles.lit);
        transform.translation = particle.puff.position;
        transform.scale = Vec3::splat(particle.puff.scale(candles.lit));

        if let Some(mat) = materials.get_mut(&material.0) {
            mat.base_color.set_alpha(particle.puff.opacity);
        }
    }
}

/// Sparks keep orbiting the wick, lit or not.
pub fn animate_candle_sparks(
    time: Res<Time>,
    mut sparks: Query<(&Spark, &mut Transform, &MeshMaterial3d<StandardMaterial>)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let t = time.elapsed_secs();

    for (spark, mut transform, material) in sparks.iter_mut() {
        let pose = spark_pose(t, spark.candle, spark.slot);
        transform.translation = pose.offset;
        transform.scale = Vec3::splat(pose.scale);

        if let Some(mat) = materials.get_mut(&material.0) {
            mat.emissive = glow("#ffff00", pose.emissive);
        }
    }
}

pub fn animate_cake_hearts(time: Res<Time>, mut hearts: Query<(&CakeHeart, &mut Transform)>) {
    let t = time.elapsed_secs();
    for (heart, mut transform) in hearts.iter_mut() {
        *transform = heart_pose(t, heart.index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blow_message_extinguishes_once() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_message::<BlowCandles>()
            .add_message::<CandlesExtinguished>()
            .init_resource::<CandleState>()
            .add_systems(Update, (start_blowing_candles, advance_candle_blow).chain());

        app.world_mut().write_message(BlowCandles);
        app.update();
        assert!(app.world().resource::<CandleState>().blowing);

        // Drive the blow to completion regardless of the real frame time.
        app.world_mut().resource_mut::<CandleState>().progress = 1.0;
        app.update();

        let state = app.world().resource::<CandleState>();
        assert!(!state.lit);
        assert!(!state.blowing);

        let messages = app.world().resource::<Messages<CandlesExtinguished>>();
        let mut cursor = messages.get_cursor();
        assert_eq!(cursor.read(messages).count(), 1);
    }

    #[test]
    fn test_extinguish_hides_flames_but_not_sparks() {
        let mut app = App::new();
        app.add_message::<CandlesExtinguished>()
            .add_systems(Update, hide_extinguished_flames);

        let flame = app
            .world_mut()
            .spawn((
                FlameLayer {
                    candle: 0,
                    part: FlamePart::Core,
                    rest: Vec3::ZERO,
                },
                Visibility::Inherited,
            ))
            .id();
        let light = app
            .world_mut()
            .spawn((CandleLight { candle: 0 }, Visibility::Inherited))
            .id();
        let spark = app
            .world_mut()
            .spawn((Spark { candle: 0, slot: 0 }, Visibility::Inherited))
            .id();

        app.update();
        assert_eq!(app.world().get::<Visibility>(flame), Some(&Visibility::Inherited));

        app.world_mut().write_message(CandlesExtinguished);
        app.update();
        assert_eq!(app.world().get::<Visibility>(flame), Some(&Visibility::Hidden));
        assert_eq!(app.world().get::<Visibility>(light), Some(&Visibility::Hidden));
        assert_eq!(app.world().get::<Visibility>(spark), Some(&Visibility::Inherited));
    }
}
