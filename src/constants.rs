//! This module contains all the constants used in the simulation.

use std::time::Duration;

use glam::{IVec2, UVec2};

/// The size of each tile, in pixels.
pub const TILE_SIZE: u32 = 24;
/// The size of each actor sprite (and its collision box), in pixels.
pub const SPRITE_SIZE: u32 = 24;
/// The size of the game board, in tiles.
pub const BOARD_TILE_SIZE: UVec2 = UVec2::new(19, 22);
/// The size of the game board, in pixels.
pub const BOARD_PIXEL_SIZE: UVec2 = UVec2::new(BOARD_TILE_SIZE.x * TILE_SIZE, BOARD_TILE_SIZE.y * TILE_SIZE);

/// Logic ticks per second outside of Scatter.
pub const NORMAL_TICK_RATE: u32 = 100;
/// Logic ticks per second while Scatter is active.
pub const SCATTER_TICK_RATE: u32 = 200;
/// Render frames per second.
pub const FRAME_RATE: u32 = 60;

/// How long Scatter lasts, in simulated time.
pub const SCATTER_DURATION: Duration = Duration::from_secs(10);

/// Maximum number of node expansions a single path search may perform.
pub const PATH_EXPANSION_BUDGET: usize = 100;

/// Number of lives the player starts with.
pub const STARTING_LIVES: u8 = 3;

/// Movement speeds, in pixels per tick.
pub mod speed {
    pub const PLAYER: f32 = 1.0;
    pub const GHOST: f32 = 1.0;
    /// Applied once to a boosted ghost when half of the dots are gone.
    pub const BOOST_MULTIPLIER: f32 = 1.5;
}

/// Spawn tiles for every actor.
pub mod spawn {
    use glam::IVec2;

    pub const PLAYER: IVec2 = IVec2::new(9, 12);
    pub const INKY: IVec2 = IVec2::new(9, 10);
    pub const PINKY: IVec2 = IVec2::new(10, 10);
    pub const CLYDE: IVec2 = IVec2::new(9, 9);
    pub const BLINKY: IVec2 = IVec2::new(8, 10);
}

/// The corner Pinky retreats to while scattering.
pub const SCATTER_CORNER: IVec2 = IVec2::new(1, 1);

/// Animation timings and sprite-sheet frame tables.
pub mod animation {
    /// Render frames between animation steps.
    pub const DEFAULT_DELAY: u8 = 4;
    /// The player's animation delay while Scatter is active.
    pub const PLAYER_SCATTER_DELAY: u8 = 2;

    pub const PLAYER_EAST: [u8; 4] = [0, 1, 2, 3];
    pub const PLAYER_SOUTH: [u8; 4] = [4, 5, 6, 7];
    pub const PLAYER_WEST: [u8; 4] = [8, 9, 10, 11];
    pub const PLAYER_NORTH: [u8; 4] = [12, 13, 14, 15];

    pub const GHOST_EAST: [u8; 2] = [0, 1];
    pub const GHOST_SOUTH: [u8; 2] = [2, 3];
    pub const GHOST_WEST: [u8; 2] = [4, 5];
    pub const GHOST_NORTH: [u8; 2] = [6, 7];
    pub const GHOST_SCATTER: [u8; 2] = [8, 9];
}

/// The default board, as raw tile codes (0 wall, 1 dot, 2 empty, 3 ghost house, 4 pill).
pub const RAW_BOARD: [[u8; BOARD_TILE_SIZE.x as usize]; BOARD_TILE_SIZE.y as usize] = [
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 1, 1, 1, 1, 1, 1, 1, 1, 0, 1, 1, 1, 1, 1, 1, 1, 1, 0],
    [0, 4, 0, 0, 1, 0, 0, 0, 1, 0, 1, 0, 0, 0, 1, 0, 0, 4, 0],
    [0, 1, 0, 0, 1, 0, 0, 0, 1, 0, 1, 0, 0, 0, 1, 0, 0, 1, 0],
    [0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0],
    [0, 1, 0, 0, 1, 0, 1, 0, 0, 0, 0, 0, 1, 0, 1, 0, 0, 1, 0],
    [0, 1, 1, 1, 1, 0, 1, 1, 1, 0, 1, 1, 1, 0, 1, 1, 1, 1, 0],
    [0, 0, 0, 0, 1, 0, 0, 0, 1, 0, 1, 0, 0, 0, 1, 0, 0, 0, 0],
    [2, 2, 2, 0, 1, 0, 1, 1, 1, 1, 1, 1, 1, 0, 1, 0, 2, 2, 2],
    [0, 0, 0, 0, 1, 0, 1, 0, 0, 3, 0, 0, 1, 0, 1, 0, 0, 0, 0],
    [2, 2, 2, 2, 1, 1, 1, 0, 3, 3, 3, 0, 1, 1, 1, 2, 2, 2, 2],
    [0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0],
    [2, 2, 2, 0, 1, 0, 1, 1, 1, 2, 1, 1, 1, 0, 1, 0, 2, 2, 2],
    [0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0],
    [0, 1, 1, 1, 1, 1, 1, 1, 1, 0, 1, 1, 1, 1, 1, 1, 1, 1, 0],
    [0, 1, 0, 0, 1, 0, 0, 0, 1, 0, 1, 0, 0, 0, 1, 0, 0, 1, 0],
    [0, 4, 1, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 1, 4, 0],
    [0, 0, 1, 0, 1, 0, 1, 0, 0, 0, 0, 0, 1, 0, 1, 0, 1, 0, 0],
    [0, 1, 1, 1, 1, 0, 1, 1, 1, 0, 1, 1, 1, 0, 1, 1, 1, 1, 0],
    [0, 1, 0, 0, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 0, 0, 1, 0],
    [0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
];

/// Converts a rate (per second) into the interval between two events.
pub const fn interval(rate: u32) -> Duration {
    let rate = if rate == 0 { 1 } else { rate };
    Duration::from_nanos(1_000_000_000 / rate as u64)
}
