use glam::{IVec2, Vec2};
use mazechase::map::coords::{alignment_tolerance, is_center_aligned, CoordinateMapper};
use speculoos::prelude::*;

#[test]
fn test_world_to_tile_rounds_to_nearest() {
    let mapper = CoordinateMapper::default();

    assert_that(&mapper.world_to_tile(Vec2::new(200.0, 200.0))).is_equal_to(IVec2::ZERO);
    assert_that(&mapper.world_to_tile(Vec2::new(215.9, 200.0))).is_equal_to(IVec2::new(0, 0));
    assert_that(&mapper.world_to_tile(Vec2::new(216.1, 200.0))).is_equal_to(IVec2::new(1, 0));
    assert_that(&mapper.world_to_tile(Vec2::new(200.0, 183.0))).is_equal_to(IVec2::new(0, -1));
}

#[test]
fn test_tile_to_world_is_inverse() {
    let mapper = CoordinateMapper::new(Vec2::new(10.0, -4.0), 16.0);

    for tile in [IVec2::new(0, 0), IVec2::new(3, 2), IVec2::new(27, 26), IVec2::new(-1, 5)] {
        let center = mapper.tile_to_world(tile);
        assert_that(&mapper.world_to_tile(center)).is_equal_to(tile);
    }
    assert_that(&mapper.tile_to_world(IVec2::new(3, 2))).is_equal_to(Vec2::new(58.0, 28.0));
}

#[test]
fn test_alignment_at_rest_uses_epsilon() {
    let center = Vec2::new(264.0, 232.0);

    assert_that(&is_center_aligned(center, center, Vec2::ZERO)).is_true();
    assert_that(&is_center_aligned(center, center + Vec2::new(0.09, 0.0), Vec2::ZERO)).is_true();
    assert_that(&is_center_aligned(center, center + Vec2::new(0.0, 0.2), Vec2::ZERO)).is_false();
}

#[test]
fn test_alignment_while_moving_uses_half_the_step() {
    let center = Vec2::new(264.0, 232.0);
    let velocity = Vec2::new(4.0, 0.0);

    assert_that(&alignment_tolerance(velocity)).is_equal_to(2.0);
    assert_that(&is_center_aligned(center, center + Vec2::new(1.9, 0.0), velocity)).is_true();
    assert_that(&is_center_aligned(center, center - Vec2::new(1.9, 0.0), velocity)).is_true();
    assert_that(&is_center_aligned(center, center + Vec2::new(2.5, 0.0), velocity)).is_false();
    // Both axes must be within tolerance
    assert_that(&is_center_aligned(center, center + Vec2::new(1.0, 2.5), velocity)).is_false();
}

#[test]
fn test_tolerance_never_drops_below_epsilon() {
    assert_that(&alignment_tolerance(Vec2::ZERO)).is_equal_to(0.1);
    assert_that(&alignment_tolerance(Vec2::new(0.0, 0.1))).is_equal_to(0.1);
    assert_that(&alignment_tolerance(Vec2::new(0.0, 3.0))).is_equal_to(1.5);
}
