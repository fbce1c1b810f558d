//! Breath Systems
//!
//! The breath is drawn with a pool of pre-spawned billboards. Each frame slot
//! `k` shows particle `k` of the emitter, or hides when the pool is shorter.

use bevy::prelude::*;

use super::state::*;
use crate::room::palette::{glow, hex};
use crate::room::types::{BlowCandles, MainCamera, RoomConfig, CAKE_POSITION};

/// Startup system spawning the billboard pool and the breath light.
pub fn spawn_breath_pool(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    emitter: Res<BreathEmitter>,
) {
    let quad = meshes.add(Rectangle::new(0.1, 0.1));

    for slot in 0..emitter.capacity() {
        commands.spawn((
            BreathSlot(slot),
            Mesh3d(quad.clone()),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: hex(BREATH_COLOR).with_alpha(0.0),
                emissive: glow(BREATH_COLOR, 0.5),
                alpha_mode: AlphaMode::Add,
                unlit: true,
                double_sided: true,
                cull_mode: None,
                ..default()
            })),
            Transform::default(),
            Visibility::Hidden,
        ));
    }

    commands.spawn((
        BreathLight,
        PointLight {
            color: hex(BREATH_COLOR),
            intensity: 0.0,
            range: BREATH_LIGHT_RANGE,
            ..default()
        },
        Transform::default(),
    ));

    debug!("Spawned {} breath slots", emitter.capacity());
}

pub fn start_breath(mut blow_requests: MessageReader<BlowCandles>, mut emitter: ResMut<BreathEmitter>) {
    if blow_requests.read().count() > 0 {
        info!("Breath started");
        emitter.start();
    }
}

/// Tick the breath timer, emit a fresh batch toward the cake and age the pool.
pub fn update_breath_particles(
    time: Res<Time>,
    mut emitter: ResMut<BreathEmitter>,
    camera: Query<&Transform, With<MainCamera>>,
) {
    let dt = time.delta_secs();

    if emitter.tick(dt) {
        debug!("Breath finished");
        return;
    }

    if emitter.is_active() {
        if let Ok(camera) = camera.single() {
            let mut rng = rand::thread_rng();
            emitter.emit_with(BREATH_PARTICLES_PER_FRAME, || {
                breath_particle(&mut rng, camera, CAKE_POSITION)
            });
        }
    }

    emitter.update(dt);
}

pub fn render_breath_particles(
    emitter: Res<BreathEmitter>,
    config: Res<RoomConfig>,
    camera: Query<&Transform, (With<MainCamera>, Without<BreathSlot>, Without<BreathLight>)>,
    mut slots: Query<
        (
            &BreathSlot,
            &mut Transform,
            &mut Visibility,
            &MeshMaterial3d<StandardMaterial>,
        ),
        Without<BreathLight>,
    >,
    mut lights: Query<(&mut Transform, &mut PointLight), With<BreathLight>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let facing = camera
        .single()
        .map(|camera| camera.rotation)
        .unwrap_or_default();
    let particles = emitter.particles();

    for (slot, mut transform, mut visibility, material) in slots.iter_mut() {
        let Some(particle) = particles.get(slot.0) else {
            if *visibility != Visibility::Hidden {
                *visibility = Visibility::Hidden;
            }
            continue;
        };

        *visibility = Visibility::Visible;
        transform.translation = particle.position;
        transform.rotation = facing;
        transform.scale = Vec3::splat(particle.render_size());

        if let Some(mat) = materials.get_mut(&material.0) {
            mat.base_color.set_alpha(particle.alpha());
        }
    }

    for (mut transform, mut light) in lights.iter_mut() {
        match emitter.light_anchor().filter(|_| emitter.is_active()) {
            Some(anchor) => {
                transform.translation = anchor;
                light.intensity = BREATH_LIGHT_LEVEL * config.lighting.point_lumens_per_unit;
            }
            None => light.intensity = 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blow_starts_and_emits_toward_cake() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_message::<BlowCandles>()
            .init_resource::<BreathEmitter>()
            .add_systems(Update, (start_breath, update_breath_particles).chain());

        app.world_mut().spawn((
            MainCamera,
            Transform::from_xyz(0.0, 2.5, 0.5).looking_at(CAKE_POSITION, Vec3::Y),
        ));

        app.world_mut().write_message(BlowCandles);
        app.update();

        let emitter = app.world().resource::<BreathEmitter>();
        assert!(emitter.is_active());
        assert!(emitter.particles().len() <= BREATH_PARTICLES_PER_FRAME);
        assert!(emitter.particles().iter().all(|p| p.velocity.z < 0.0));
    }
}
