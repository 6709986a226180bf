//! Runtime configuration, defaulting to the values in [`constants`](crate::constants).

use std::time::Duration;

use bevy_ecs::resource::Resource;
use glam::IVec2;

use crate::constants::{self, animation, speed, spawn};
use crate::error::GameResult;
use crate::map::direction::Direction;
use crate::map::grid::TileGrid;
use crate::map::parser::MapTileParser;
use crate::systems::components::Ghost;

/// Everything that shapes a session: the layout, the actors and the timings.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    pub grid: TileGrid,
    pub player_spawn: IVec2,
    pub player_speed: f32,
    /// Ghosts to spawn and their spawn tiles. Update order is always the [`Ghost`] order.
    pub ghosts: Vec<(Ghost, IVec2)>,
    pub ghost_speed: f32,
    /// Direction every actor faces (and intends) when spawned.
    pub initial_direction: Direction,
    pub normal_tick_rate: u32,
    pub scatter_tick_rate: u32,
    pub frame_rate: u32,
    pub scatter_duration: Duration,
    pub path_budget: usize,
    pub starting_lives: u8,
    pub default_animation_delay: u8,
    pub player_scatter_animation_delay: u8,
}

impl GameConfig {
    /// The standard 19×22 board with all four ghosts.
    pub fn standard() -> GameResult<Self> {
        let grid = MapTileParser::parse_codes(&constants::RAW_BOARD)?;
        Ok(Self::with_grid(grid)
            .with_player_spawn(spawn::PLAYER)
            .with_ghosts([
                (Ghost::Inky, spawn::INKY),
                (Ghost::Pinky, spawn::PINKY),
                (Ghost::Clyde, spawn::CLYDE),
                (Ghost::Blinky, spawn::BLINKY),
            ]))
    }

    /// A configuration around an arbitrary grid, with no ghosts and the player at (1, 1).
    pub fn with_grid(grid: TileGrid) -> Self {
        Self {
            grid,
            player_spawn: IVec2::ONE,
            player_speed: speed::PLAYER,
            ghosts: Vec::new(),
            ghost_speed: speed::GHOST,
            initial_direction: Direction::East,
            normal_tick_rate: constants::NORMAL_TICK_RATE,
            scatter_tick_rate: constants::SCATTER_TICK_RATE,
            frame_rate: constants::FRAME_RATE,
            scatter_duration: constants::SCATTER_DURATION,
            path_budget: constants::PATH_EXPANSION_BUDGET,
            starting_lives: constants::STARTING_LIVES,
            default_animation_delay: animation::DEFAULT_DELAY,
            player_scatter_animation_delay: animation::PLAYER_SCATTER_DELAY,
        }
    }

    pub fn with_player_spawn(mut self, tile: IVec2) -> Self {
        self.player_spawn = tile;
        self
    }

    pub fn with_ghosts(mut self, ghosts: impl IntoIterator<Item = (Ghost, IVec2)>) -> Self {
        self.ghosts = ghosts.into_iter().collect();
        self.ghosts.sort_by_key(|(ghost, _)| *ghost);
        self
    }

    pub fn with_speeds(mut self, player: f32, ghost: f32) -> Self {
        self.player_speed = player;
        self.ghost_speed = ghost;
        self
    }

    pub fn with_initial_direction(mut self, direction: Direction) -> Self {
        self.initial_direction = direction;
        self
    }

    pub fn with_scatter_duration(mut self, duration: Duration) -> Self {
        self.scatter_duration = duration;
        self
    }

    pub fn with_path_budget(mut self, budget: usize) -> Self {
        self.path_budget = budget;
        self
    }

    pub fn with_starting_lives(mut self, lives: u8) -> Self {
        self.starting_lives = lives;
        self
    }

    pub fn normal_tick_interval(&self) -> Duration {
        constants::interval(self.normal_tick_rate)
    }

    pub fn frame_interval(&self) -> Duration {
        constants::interval(self.frame_rate)
    }
}
