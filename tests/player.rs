use bevy_ecs::{event::Events, system::RunSystemOnce};
use glam::{IVec2, Vec2};
use mazechase::{
    config::SimulationConfig,
    constants::{ADVERSARY_SPEED, MAX_DELTA_TIME, PLAYER_SPEED},
    game::Game,
    map::{coords::CoordinateMapper, direction::Direction},
    systems::{
        player_animation_system, player_movement_system, AudioEvent, DeltaTime, DesiredDirection, GameClock, GhostMode,
        Motion, PlayerAnimation, ScoreResource,
    },
};
use speculoos::prelude::*;

mod common;

const POWER_LAYOUT: [&str; 3] = ["########", "#P*  R.#", "########"];

fn set_direction(world: &mut bevy_ecs::world::World, direction: Option<Direction>) {
    let player = common::player_entity(world);
    world.get_mut::<Motion>(player).unwrap().set_direction(direction);
}

#[test]
fn test_player_eats_pellet_once() {
    let mut game = common::create_game(&common::CORNER_LAYOUT);
    let player = common::player_entity(&mut game.world);
    common::place_at(&mut game.world, player, IVec2::new(2, 2));

    game.world.run_system_once(player_movement_system).expect("System should run successfully");
    assert_that(&game.world.resource::<ScoreResource>().0).is_equal_to(10);
    assert_that(&game.world.resource::<Events<AudioEvent>>().len()).is_equal_to(1);

    // Standing still on the same tile does not score again
    game.world.run_system_once(player_movement_system).expect("System should run successfully");
    assert_that(&game.world.resource::<ScoreResource>().0).is_equal_to(10);
    assert_that(&game.world.resource::<Events<AudioEvent>>().len()).is_equal_to(1);
}

#[test]
fn test_power_pellet_frightens_adversaries() {
    let mut game = common::create_game(&POWER_LAYOUT);
    let player = common::player_entity(&mut game.world);
    common::place_at(&mut game.world, player, IVec2::new(2, 1));
    game.world.resource_mut::<GameClock>().elapsed = 3.0;

    game.world.run_system_once(player_movement_system).expect("System should run successfully");

    assert_that(&game.world.resource::<ScoreResource>().0).is_equal_to(50);
    let pursuer = common::adversary_entities(&mut game.world)[0];
    let (adversary, motion) = common::adversary_state(&game.world, pursuer);
    assert_that(&adversary.mode).is_equal_to(GhostMode::Frightened);
    assert_that(&adversary.frightened_until).is_equal_to(10.0);
    assert_that(&motion.speed).is_equal_to(ADVERSARY_SPEED * 0.5);

    let events: Vec<AudioEvent> = game
        .world
        .resource_mut::<Events<AudioEvent>>()
        .drain()
        .collect();
    assert_that(&events).is_equal_to(vec![AudioEvent::PowerPellet]);
}

#[test]
fn test_desired_direction_waits_for_an_opening() {
    let mut game = common::create_game(&common::CORNER_LAYOUT);
    let player = common::player_entity(&mut game.world);
    game.world.insert_resource(DesiredDirection(Some(Direction::Up)));

    // Wall above (2, 2): keep going right, keep the request
    common::place_at(&mut game.world, player, IVec2::new(2, 2));
    set_direction(&mut game.world, Some(Direction::Right));
    game.world.run_system_once(player_movement_system).expect("System should run successfully");

    assert_that(&game.world.get::<Motion>(player).unwrap().direction).is_equal_to(Some(Direction::Right));
    assert_that(&game.world.resource::<DesiredDirection>().0).is_equal_to(Some(Direction::Up));

    // Opening above (3, 2): turn and clear the request
    common::place_at(&mut game.world, player, IVec2::new(3, 2));
    game.world.run_system_once(player_movement_system).expect("System should run successfully");

    let motion = *game.world.get::<Motion>(player).unwrap();
    assert_that(&motion.direction).is_equal_to(Some(Direction::Up));
    assert_that(&motion.facing).is_equal_to(Some(Direction::Up));
    assert_that(&game.world.resource::<DesiredDirection>().0).is_none();
}

#[test]
fn test_player_stops_at_wall() {
    let mut game = common::create_game(&common::CORNER_LAYOUT);
    let player = common::player_entity(&mut game.world);
    game.world.insert_resource(DeltaTime(common::DT));
    common::place_at(&mut game.world, player, IVec2::new(5, 2));
    set_direction(&mut game.world, Some(Direction::Right));
    let before = game.world.get::<Motion>(player).unwrap().position;

    game.world.run_system_once(player_movement_system).expect("System should run successfully");

    let motion = *game.world.get::<Motion>(player).unwrap();
    assert_that(&motion.direction).is_none();
    assert_that(&motion.velocity).is_equal_to(Vec2::ZERO);
    assert_that(&motion.position).is_equal_to(before);
    // Facing survives the stop
    assert_that(&motion.facing).is_equal_to(Some(Direction::Right));
}

#[test]
fn test_mid_tile_movement_is_never_blocked() {
    let mut game = common::create_game(&common::CORNER_LAYOUT);
    let player = common::player_entity(&mut game.world);
    game.world.insert_resource(DeltaTime(common::DT));
    common::place_at(&mut game.world, player, IVec2::new(5, 2));
    {
        let mut motion = game.world.get_mut::<Motion>(player).unwrap();
        motion.position.x -= 10.0;
        motion.set_direction(Some(Direction::Right));
    }
    let before = game.world.get::<Motion>(player).unwrap().position;

    game.world.run_system_once(player_movement_system).expect("System should run successfully");

    let motion = *game.world.get::<Motion>(player).unwrap();
    assert_that(&motion.direction).is_equal_to(Some(Direction::Right));
    assert_that(&(motion.position.x - before.x)).is_close_to(PLAYER_SPEED * common::DT, 1e-4);
}

#[test]
fn test_animation_advances_only_while_moving() {
    let mut game = common::create_game(&common::CORNER_LAYOUT);
    let player = common::player_entity(&mut game.world);
    game.world.insert_resource(DeltaTime(0.1));

    game.world.run_system_once(player_animation_system).expect("System should run successfully");
    assert_that(&game.world.get::<PlayerAnimation>(player).unwrap().frame).is_equal_to(0);

    set_direction(&mut game.world, Some(Direction::Right));
    for expected in [1, 2, 0] {
        game.world.run_system_once(player_animation_system).expect("System should run successfully");
        assert_that(&game.world.get::<PlayerAnimation>(player).unwrap().frame).is_equal_to(expected);
    }
}

#[test]
fn test_animation_frame_time() {
    let mut animation = PlayerAnimation::default();

    animation.tick(0.06, true);
    assert_that(&animation.frame).is_equal_to(0);
    animation.tick(0.06, true);
    assert_that(&animation.frame).is_equal_to(1);
    assert_that(&animation.elapsed).is_equal_to(0.0);

    animation.tick(1.0, false);
    assert_that(&animation.frame).is_equal_to(1);
}

/// Drives the player right along `CORNER_LAYOUT` with the given frame times.
fn run_right(frame_times: impl IntoIterator<Item = f32>) -> Motion {
    let mut game = common::create_game(&common::CORNER_LAYOUT);
    game.tick(common::DT, Some(Direction::Right));
    for dt in frame_times {
        game.tick(dt, None);
        let motion = common::player_motion(&mut game.world);
        assert_that(&motion.tile.x).is_less_than_or_equal_to(5);
    }
    common::player_motion(&mut game.world)
}

#[test]
fn test_uneven_frame_times_never_skip_a_center() {
    let mapper = CoordinateMapper::default();
    let last_open = IVec2::new(5, 2);

    // A short frame right before a long one, at every phase within a tile
    for lead in 0..12 {
        let frame_times = std::iter::repeat_n(common::DT, 36 + lead)
            .chain([0.02, 0.005, MAX_DELTA_TIME])
            .chain(std::iter::repeat_n(common::DT, 60));
        let motion = run_right(frame_times);

        assert_that(&motion.tile).is_equal_to(last_open);
        assert_that(&motion.position).is_equal_to(mapper.tile_to_world(last_open));
        assert_that(&motion.direction).is_none();
    }

    let cycle = [common::DT, 0.02, 0.005, MAX_DELTA_TIME];
    let motion = run_right(cycle.iter().copied().cycle().take(200));
    assert_that(&motion.tile).is_equal_to(last_open);
    assert_that(&motion.direction).is_none();
}

#[test]
fn test_long_frames_land_on_each_center() {
    let config = SimulationConfig::default().with_max_delta_time(None);
    let mut game = Game::with_layout(&common::CORNER_LAYOUT, config).unwrap();
    let mapper = *game.world.resource::<CoordinateMapper>();

    game.tick(1.0, Some(Direction::Right));
    let mut columns = vec![common::player_motion(&mut game.world).tile.x];
    for _ in 0..5 {
        game.tick(1.0, None);
        columns.push(common::player_motion(&mut game.world).tile.x);
    }

    assert_that(&columns).is_equal_to(vec![2, 3, 4, 5, 5, 5]);
    let motion = common::player_motion(&mut game.world);
    assert_that(&motion.position).is_equal_to(mapper.tile_to_world(IVec2::new(5, 2)));
    assert_that(&motion.direction).is_none();
    assert_that(&game.score()).is_equal_to(40);
}
