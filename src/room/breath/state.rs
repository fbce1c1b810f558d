//! Breath State
//!
//! A fixed-capacity particle pool for the breath stream that flies from the
//! viewer toward the cake when the candles are blown.

use bevy::prelude::*;
use rand::Rng;

use crate::room::types::REFERENCE_FPS;

pub const BREATH_CAPACITY: usize = 300;
pub const BREATH_DURATION_SECS: f32 = 3.0;
pub const BREATH_PARTICLES_PER_FRAME: usize = 10;
pub const BREATH_LIGHT_RANGE: f32 = 3.0;
pub const BREATH_LIGHT_LEVEL: f32 = 2.0;
pub const BREATH_COLOR: &str = "#c0e0ff";

/// Mouth position relative to the camera, in camera space.
pub const MOUTH_OFFSET: Vec3 = Vec3::new(0.0, -0.2, -0.3);

const LIFE_DECAY_PER_SEC: f32 = 0.6;
const DRAG_PER_FRAME: f32 = 0.96;
const UPWARD_DRIFT: f32 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BreathParticle {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Remaining life in `(0, 1]`.
    pub life: f32,
    pub size: f32,
}

impl BreathParticle {
    /// Advance by `dt`. Returns false once the particle has died.
    pub fn step(&mut self, dt: f32) -> bool {
        self.life -= dt * LIFE_DECAY_PER_SEC;
        if self.life <= 0.0 {
            return false;
        }

        self.position += self.velocity * dt;
        self.velocity *= DRAG_PER_FRAME.powf(REFERENCE_FPS * dt);
        self.position.y += dt * UPWARD_DRIFT;

        let tau = (1.0 - self.life) * 5.0;
        self.position.x += (tau * 2.0).sin() * dt * 0.3;
        self.position.y += (tau * 1.5).cos() * dt * 0.2;
        true
    }

    /// Rendered size; particles swell as they age.
    pub fn render_size(&self) -> f32 {
        self.size * (2.5 - self.life * 0.4)
    }

    pub fn alpha(&self) -> f32 {
        self.life.max(0.0).powf(0.4)
    }
}

/// Build one particle leaving the mouth of a viewer at `camera`, heading
/// toward `target`.
pub fn breath_particle(rng: &mut impl Rng, camera: &Transform, target: Vec3) -> BreathParticle {
    let mut direction = (target - camera.translation).normalize_or_zero();
    direction += Vec3::new(
        rng.gen_range(-0.075..0.075),
        rng.gen_range(-0.075..0.075),
        rng.gen_range(-0.075..0.075),
    );
    let direction = direction.normalize_or_zero();

    let spread = Vec3::new(
        rng.gen_range(-0.1..0.1),
        rng.gen_range(-0.1..0.1),
        rng.gen_range(-0.075..0.075),
    );
    let start = camera.translation + camera.rotation * MOUTH_OFFSET + camera.rotation * spread;

    BreathParticle {
        position: start,
        velocity: direction * rng.gen_range(3.5..6.0),
        life: 1.0,
        size: rng.gen_range(0.2..0.6),
    }
}

/// Resource owning the breath particle pool.
#[derive(Resource, Debug)]
pub struct BreathEmitter {
    particles: Vec<BreathParticle>,
    capacity: usize,
    remaining: Option<f32>,
}

impl Default for BreathEmitter {
    fn default() -> Self {
        Self::with_capacity(BREATH_CAPACITY)
    }
}

impl BreathEmitter {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            particles: Vec::with_capacity(capacity),
            capacity,
            remaining: None,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn particles(&self) -> &[BreathParticle] {
        &self.particles
    }

    pub fn is_active(&self) -> bool {
        self.remaining.is_some()
    }

    /// Begin (or restart) a breath lasting `BREATH_DURATION_SECS`.
    pub fn start(&mut self) {
        self.remaining = Some(BREATH_DURATION_SECS);
    }

    /// Count down the breath. When it runs out all particles are cleared and
    /// true is returned.
    pub fn tick(&mut self, dt: f32) -> bool {
        let Some(remaining) = self.remaining else {
            return false;
        };
        let remaining = remaining - dt;
        if remaining <= 0.0 {
            self.remaining = None;
            self.particles.clear();
            return true;
        }
        self.remaining = Some(remaining);
        false
    }

    /// Add up to `count` particles, truncated to the free capacity. Returns
    /// how many were added.
    pub fn emit_with(&mut self, count: usize, mut make: impl FnMut() -> BreathParticle) -> usize {
        let free = self.capacity.saturating_sub(self.particles.len());
        let count = count.min(free);
        self.particles.extend((0..count).map(|_| make()));
        count
    }

    /// Step every particle and drop the dead ones.
    pub fn update(&mut self, dt: f32) {
        self.particles.retain_mut(|particle| particle.step(dt));
    }

    /// Mean position of the young particles (life above one half).
    pub fn light_anchor(&self) -> Option<Vec3> {
        let (sum, count) = self
            .particles
            .iter()
            .filter(|p| p.life > 0.5)
            .fold((Vec3::ZERO, 0usize), |(sum, count), p| (sum + p.position, count + 1));
        (count > 0).then(|| sum / count as f32)
    }
}

/// One pre-spawned breath billboard; shows particle `0` of the pool or hides.
#[derive(Component, Debug, Clone, Copy)]
pub struct BreathSlot(pub usize);

#[derive(Component)]
pub struct BreathLight;

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn particle(life: f32) -> BreathParticle {
        BreathParticle {
            position: Vec3::ZERO,
            velocity: Vec3::new(0.0, 0.0, -4.0),
            life,
            size: 0.4,
        }
    }

    #[test]
    fn test_emit_truncates_to_capacity() {
        let mut emitter = BreathEmitter::with_capacity(25);
        assert_eq!(emitter.emit_with(10, || particle(1.0)), 10);
        assert_eq!(emitter.emit_with(10, || particle(1.0)), 10);
        assert_eq!(emitter.emit_with(10, || particle(1.0)), 5);
        assert_eq!(emitter.emit_with(10, || particle(1.0)), 0);
        assert_eq!(emitter.particles().len(), 25);
    }

    #[test]
    fn test_dead_particles_are_culled() {
        let mut emitter = BreathEmitter::default();
        emitter.emit_with(1, || particle(0.01));
        emitter.emit_with(1, || particle(1.0));
        emitter.update(0.1);
        assert_eq!(emitter.particles().len(), 1);
    }

    #[test]
    fn test_stops_and_clears_after_duration() {
        let mut emitter = BreathEmitter::default();
        emitter.start();
        emitter.emit_with(10, || particle(1.0));
        assert!(!emitter.tick(2.9));
        assert!(emitter.is_active());
        assert!(emitter.tick(0.2));
        assert!(!emitter.is_active());
        assert!(emitter.particles().is_empty());
    }

    #[test]
    fn test_drag_matches_per_frame_factor() {
        let mut p = particle(1.0);
        p.step(1.0 / 60.0);
        assert!((p.velocity.z - (-4.0 * 0.96)).abs() < 1e-4);
        assert!((p.life - 0.99).abs() < 1e-5);
    }

    #[test]
    fn test_render_attributes() {
        let p = particle(1.0);
        assert!((p.render_size() - 0.4 * 2.1).abs() < 1e-6);
        assert_eq!(p.alpha(), 1.0);
        assert!(particle(0.5).alpha() > 0.5);
    }

    #[test]
    fn test_light_anchor_uses_young_particles() {
        let mut emitter = BreathEmitter::default();
        assert_eq!(emitter.light_anchor(), None);
        emitter.emit_with(1, || BreathParticle {
            position: Vec3::new(1.0, 0.0, 0.0),
            ..particle(0.9)
        });
        emitter.emit_with(1, || BreathParticle {
            position: Vec3::new(3.0, 0.0, 0.0),
            ..particle(0.9)
        });
        emitter.emit_with(1, || BreathParticle {
            position: Vec3::new(100.0, 0.0, 0.0),
            ..particle(0.2)
        });
        assert_eq!(emitter.light_anchor(), Some(Vec3::new(2.0, 0.0, 0.0)));
    }

    #[test]
    fn test_particles_head_toward_target() {
        let mut rng = StdRng::seed_from_u64(7);
        let camera =
            Transform::from_xyz(0.0, 2.5, 0.5).looking_at(Vec3::new(0.0, 1.05, -3.0), Vec3::Y);
        for _ in 0..50 {
            let p = breath_particle(&mut rng, &camera, Vec3::new(0.0, 1.05, -3.0));
            assert!(p.velocity.z < 0.0);
            let speed = p.velocity.length();
            assert!((3.49..6.01).contains(&speed));
            assert!((0.2..0.6).contains(&p.size));
        }
    }
}
