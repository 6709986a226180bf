#![allow(dead_code)]

use bevy_ecs::entity::Entity;
use bevy_ecs::event::{EventRegistry, Events};
use bevy_ecs::world::World;
use glam::IVec2;
use maze_chase::config::GameConfig;
use maze_chase::events::SimEvent;
use maze_chase::game::{Game, TickReport};
use maze_chase::map::direction::Direction;
use maze_chase::map::grid::{TileGrid, TileValue};
use maze_chase::map::parser::MapTileParser;
use maze_chase::systems::{
    DotCounter, Ghost, GhostBundle, LoopState, ModeState, PlayerBundle, PlayerLives, RenderSnapshot, ScoreResource,
    SimClock, Spawn, SystemTimings, Tempo,
};

/// A 3×3 open room with a dot in every cell.
pub const ROOM: [&str; 5] = ["#####", "#...#", "#...#", "#...#", "#####"];

pub fn grid(rows: &[&str]) -> TileGrid {
    MapTileParser::parse_board(rows).expect("fixture board should parse")
}

pub fn standard_grid() -> TileGrid {
    GameConfig::standard().expect("standard board should parse").grid
}

/// A world holding every resource the logic systems read, with no actors yet.
pub fn create_test_world(grid: TileGrid) -> World {
    let mut world = World::default();
    EventRegistry::register_event::<SimEvent>(&mut world);

    let dots = grid.count(TileValue::Dot) as u32;
    world.insert_resource(GameConfig::with_grid(grid.clone()));
    world.insert_resource(grid);
    world.insert_resource(DotCounter::new(dots));
    world.insert_resource(ScoreResource::default());
    world.insert_resource(PlayerLives(3));
    world.insert_resource(ModeState::default());
    world.insert_resource(Tempo { tick_rate: 100 });
    world.insert_resource(SimClock::default());
    world.insert_resource(LoopState::Running);
    world.insert_resource(SystemTimings::default());
    world.insert_resource(RenderSnapshot::default());
    world
}

pub fn spawn_player(world: &mut World, tile: IVec2, direction: Direction) -> Entity {
    world
        .spawn(PlayerBundle::new(Spawn {
            tile,
            direction,
            speed: 1.0,
        }))
        .id()
}

pub fn spawn_ghost(world: &mut World, ghost: Ghost, tile: IVec2, direction: Direction) -> Entity {
    let mut entity = world.spawn(GhostBundle::new(
        ghost,
        Spawn {
            tile,
            direction,
            speed: 1.0,
        },
    ));
    if let Some(boost) = ghost.speed_boost() {
        entity.insert(boost);
    }
    entity.id()
}

pub fn drain_events(world: &mut World) -> Vec<SimEvent> {
    world.resource_mut::<Events<SimEvent>>().drain().collect()
}

/// Builds and starts a game at t = 0.
pub fn started(config: GameConfig) -> Game {
    let mut game = Game::new(config).expect("fixture config should be valid");
    game.start(std::time::Duration::ZERO);
    game
}

/// Runs ticks until one reports `event`, giving up after `limit` ticks.
pub fn tick_until(game: &mut Game, event: &SimEvent, limit: u64) -> Option<TickReport> {
    for _ in 0..limit {
        let report = game.tick()?;
        if report.contains(event) {
            return Some(report);
        }
    }
    None
}
