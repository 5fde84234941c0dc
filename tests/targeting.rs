use glam::IVec2;
use mazechase::{
    map::direction::Direction,
    systems::{chase_target, target_tile, AdversaryKind, GhostMode, TargetingContext},
};
use speculoos::prelude::*;

fn context() -> TargetingContext {
    TargetingContext {
        player_tile: IVec2::new(5, 5),
        player_facing: Some(Direction::Right),
        pursuer_tile: Some(IVec2::new(3, 5)),
        own_tile: IVec2::new(20, 20),
        scatter_corner: IVec2::new(1, 25),
        house_tile: IVec2::new(13, 13),
    }
}

#[test]
fn test_pursuer_targets_player_tile() {
    let ctx = context();
    assert_that(&target_tile(AdversaryKind::Pursuer, GhostMode::Chase, &ctx)).is_equal_to(Some(IVec2::new(5, 5)));
}

#[test]
fn test_ambusher_targets_ahead_of_player() {
    let ctx = TargetingContext {
        player_facing: Some(Direction::Up),
        ..context()
    };
    assert_that(&chase_target(AdversaryKind::Ambusher, &ctx)).is_equal_to(IVec2::new(5, 1));

    let ctx = TargetingContext {
        player_facing: Some(Direction::Left),
        ..context()
    };
    assert_that(&chase_target(AdversaryKind::Ambusher, &ctx)).is_equal_to(IVec2::new(1, 5));
}

#[test]
fn test_flanker_reflects_through_pursuer() {
    let ctx = context();
    // Pivot is (7, 5); reflected through the pursuer at (3, 5)
    assert_that(&chase_target(AdversaryKind::Flanker, &ctx)).is_equal_to(IVec2::new(11, 5));

    let ctx = TargetingContext {
        pursuer_tile: Some(IVec2::new(7, 9)),
        ..context()
    };
    assert_that(&chase_target(AdversaryKind::Flanker, &ctx)).is_equal_to(IVec2::new(7, 1));
}

#[test]
fn test_flanker_without_pursuer_targets_pivot() {
    let ctx = TargetingContext {
        pursuer_tile: None,
        ..context()
    };
    assert_that(&chase_target(AdversaryKind::Flanker, &ctx)).is_equal_to(IVec2::new(7, 5));
}

#[test]
fn test_opportunist_retreats_when_close() {
    let far = TargetingContext {
        own_tile: IVec2::new(5, 15),
        ..context()
    };
    assert_that(&chase_target(AdversaryKind::Opportunist, &far)).is_equal_to(IVec2::new(5, 5));

    let close = TargetingContext {
        own_tile: IVec2::new(5, 12),
        ..context()
    };
    assert_that(&chase_target(AdversaryKind::Opportunist, &close)).is_equal_to(IVec2::new(1, 25));

    // Exactly at the radius still counts as close
    let boundary = TargetingContext {
        own_tile: IVec2::new(5, 13),
        ..context()
    };
    assert_that(&chase_target(AdversaryKind::Opportunist, &boundary)).is_equal_to(IVec2::new(1, 25));
}

#[test]
fn test_mode_overrides() {
    let ctx = context();
    for kind in [
        AdversaryKind::Pursuer,
        AdversaryKind::Ambusher,
        AdversaryKind::Flanker,
        AdversaryKind::Opportunist,
    ] {
        assert_that(&target_tile(kind, GhostMode::Scatter, &ctx)).is_equal_to(Some(ctx.scatter_corner));
        assert_that(&target_tile(kind, GhostMode::Eaten, &ctx)).is_equal_to(Some(ctx.house_tile));
        assert_that(&target_tile(kind, GhostMode::Frightened, &ctx)).is_none();
    }
}

#[test]
fn test_standing_player_adds_no_lookahead() {
    let ctx = TargetingContext {
        player_facing: None,
        ..context()
    };
    assert_that(&chase_target(AdversaryKind::Ambusher, &ctx)).is_equal_to(IVec2::new(5, 5));
    // Pivot is the player tile itself; reflected through the pursuer at (3, 5)
    assert_that(&chase_target(AdversaryKind::Flanker, &ctx)).is_equal_to(IVec2::new(7, 5));
}
