//! Tests for the breath particle pool

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use birthday_room::room::breath::*;
use birthday_room::room::types::CAKE_POSITION;

fn camera() -> Transform {
    Transform::from_xyz(0.0, 2.2, 2.0).looking_at(CAKE_POSITION, Vec3::Y)
}

#[test]
fn test_pool_never_exceeds_capacity() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut emitter = BreathEmitter::with_capacity(25);
    emitter.start();

    let cam = camera();
    for _ in 0..10 {
        emitter.emit_with(BREATH_PARTICLES_PER_FRAME, || breath_particle(&mut rng, &cam, CAKE_POSITION));
        assert!(emitter.particles().len() <= emitter.capacity());
    }
    assert_eq!(emitter.particles().len(), 25);
}

#[test]
fn test_particles_head_for_the_cake() {
    let mut rng = StdRng::seed_from_u64(3);
    let cam = camera();
    let to_cake = (CAKE_POSITION - cam.translation).normalize();
    for _ in 0..50 {
        let particle = breath_particle(&mut rng, &cam, CAKE_POSITION);
        assert!(particle.velocity.normalize().dot(to_cake) > 0.9);
        assert_eq!(particle.life, 1.0);
    }
}

#[test]
fn test_dead_particles_are_culled() {
    let mut rng = StdRng::seed_from_u64(11);
    let cam = camera();
    let mut emitter = BreathEmitter::default();
    emitter.start();
    emitter.emit_with(5, || breath_particle(&mut rng, &cam, CAKE_POSITION));

    // Life decays by 0.6 per second.
    for _ in 0..120 {
        emitter.update(1.0 / 60.0);
    }
    assert_eq!(emitter.particles().len(), 0);
}

#[test]
fn test_breath_stops_and_clears_after_three_seconds() {
    let mut rng = StdRng::seed_from_u64(5);
    let cam = camera();
    let mut emitter = BreathEmitter::default();
    emitter.start();
    emitter.emit_with(10, || breath_particle(&mut rng, &cam, CAKE_POSITION));

    assert!(!emitter.tick(2.9));
    assert!(emitter.is_active());
    assert!(emitter.tick(0.2));
    assert!(!emitter.is_active());
    assert!(emitter.particles().is_empty());
    assert!(emitter.light_anchor().is_none());
}

#[test]
fn test_light_follows_young_particles() {
    let mut rng = StdRng::seed_from_u64(9);
    let cam = camera();
    let mut emitter = BreathEmitter::default();
    emitter.start();
    emitter.emit_with(10, || breath_particle(&mut rng, &cam, CAKE_POSITION));

    let anchor = emitter.light_anchor().unwrap();
    assert!(anchor.distance(cam.translation) < 1.0);
}
