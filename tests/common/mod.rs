#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use bevy_ecs::entity::Entity;
use bevy_ecs::query::With;
use bevy_ecs::world::World;
use glam::IVec2;
use mazechase::{
    config::SimulationConfig,
    game::Game,
    map::{builder::TileMap, parser::MapTileParser},
    systems::{Adversary, AudioEvent, AudioSink, Motion, PlayerControlled},
};

/// One tick at 60 Hz.
pub const DT: f32 = 1.0 / 60.0;

/// A corridor with a single opening upward at column 3.
pub const CORNER_LAYOUT: [&str; 4] = ["#######", "###.###", "#P....#", "#######"];

/// A straight corridor with the player at (5, 5) and a pursuer at (1, 5).
pub const CHASE_LAYOUT: [&str; 7] = [
    "########", "########", "########", "########", "########", "#R   P.#", "########",
];

/// A corridor where the player eats a pellet before a pursuer walks into it.
pub const CAPTURE_LAYOUT: [&str; 3] = ["#######", "#.P R.#", "#######"];

/// An open ring around a single wall block.
pub const RING_LAYOUT: [&str; 5] = ["#####", "#...#", "#.#.#", "#P..#", "#####"];

pub fn create_game(rows: &[&str]) -> Game {
    Game::with_layout(rows, SimulationConfig::default()).expect("Layout should be valid")
}

pub fn create_map(rows: &[&str]) -> TileMap {
    TileMap::from_layout(&MapTileParser::parse_layout(rows).expect("Layout should be valid"))
}

pub fn player_entity(world: &mut World) -> Entity {
    world
        .query_filtered::<Entity, With<PlayerControlled>>()
        .single(world)
        .expect("Player should exist")
}

pub fn player_motion(world: &mut World) -> Motion {
    *world
        .query_filtered::<&Motion, With<PlayerControlled>>()
        .single(world)
        .expect("Player should exist")
}

/// Adversary entities in roster order.
pub fn adversary_entities(world: &mut World) -> Vec<Entity> {
    let mut adversaries: Vec<(usize, Entity)> = world
        .query::<(Entity, &Adversary)>()
        .iter(world)
        .map(|(entity, adversary)| (adversary.slot, entity))
        .collect();
    adversaries.sort();
    adversaries.into_iter().map(|(_, entity)| entity).collect()
}

pub fn adversary_state(world: &World, entity: Entity) -> (Adversary, Motion) {
    let adversary = *world.get::<Adversary>(entity).expect("Adversary should exist");
    let motion = *world.get::<Motion>(entity).expect("Adversary should have motion");
    (adversary, motion)
}

/// Moves an agent onto the center of `tile`, at rest.
pub fn place_at(world: &mut World, entity: Entity, tile: IVec2) {
    let mapper = *world.resource::<mazechase::map::coords::CoordinateMapper>();
    let mut motion = world.get_mut::<Motion>(entity).expect("Entity should have motion");
    motion.position = mapper.tile_to_world(tile);
    motion.tile = tile;
    motion.velocity = glam::Vec2::ZERO;
}

/// An audio sink that records every event it receives.
#[derive(Clone, Default)]
pub struct RecordingSink(pub Rc<RefCell<Vec<AudioEvent>>>);

impl AudioSink for RecordingSink {
    fn play(&mut self, event: AudioEvent) {
        self.0.borrow_mut().push(event);
    }
}
