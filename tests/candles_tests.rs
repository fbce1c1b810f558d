//! Tests for candle flicker, smoke and the blow-out

use bevy::prelude::*;

use birthday_room::room::candles::*;

const DT: f32 = 1.0 / 60.0;

#[test]
fn test_flicker_stays_bounded() {
    for candle in 0..CANDLE_OFFSETS.len() {
        for step in 0..600 {
            let value = flicker(step as f32 * DT, candle);
            assert!(value.abs() <= 0.3 + 1e-5);
        }
    }
}

#[test]
fn test_candles_flicker_out_of_step() {
    let t = 1.0;
    assert_ne!(flicker(t, 0), flicker(t, 1));
    assert_eq!(phase_offset(0), 0.0);
}

#[test]
fn test_blow_takes_under_a_second_and_fires_once() {
    let mut candles = CandleState::default();
    assert!(candles.begin_blow());
    assert!(!candles.begin_blow());

    let mut fired = 0;
    let mut frames = 0;
    while frames < 120 {
        if candles.advance(DT) {
            fired += 1;
        }
        frames += 1;
    }

    assert_eq!(fired, 1);
    assert!(!candles.lit);
    assert_eq!(candles.intensity(), 0.0);
    assert!(!candles.begin_blow());
}

#[test]
fn test_intensity_falls_while_blowing() {
    let mut candles = CandleState::default();
    assert_eq!(candles.intensity(), 1.0);
    candles.begin_blow();
    candles.advance(0.25);
    assert!(candles.intensity() < 1.0 && candles.intensity() > 0.0);
    assert!(candles.sway() > 0.0);
}

#[test]
fn test_smoke_recycles_at_ceiling() {
    let mut puff = SmokePuff::new(1);
    let mut recycled = false;
    for step in 0..600 {
        let before = puff.position.y;
        puff.step(DT, step as f32 * DT, 1, true);
        if puff.position.y < before {
            recycled = true;
            assert!((puff.opacity - 0.3).abs() < 1e-5);
            break;
        }
        assert!(puff.position.y <= 0.3 + 0.01);
    }
    assert!(recycled);
}

#[test]
fn test_extinguished_smoke_rises_higher() {
    let mut puff = SmokePuff::new(0);
    puff.position.y = 0.35;
    puff.step(DT, 0.0, 0, false);
    assert!(puff.position.y > 0.35);
    assert!(puff.scale(false) > puff.scale(true));
}

#[test]
fn test_sparks_orbit_close_to_flame() {
    for slot in 0..SPARKS_PER_CANDLE {
        let spark = spark_pose(2.0, 3, slot);
        let radius = Vec2::new(spark.offset.x, spark.offset.z).length();
        assert!(radius > 0.02 && radius < 0.05);
    }
}

#[test]
fn test_hearts_circle_the_cake() {
    for index in 0..CAKE_HEART_COUNT {
        let pose = heart_pose(3.0, index);
        let radius = Vec2::new(pose.translation.x, pose.translation.z).length();
        assert!((radius - 0.85).abs() <= 0.05 + 1e-4);
        assert!(pose.scale.x > 0.0);
    }
}
