//! Centralized error types for the simulation.
//!
//! This module defines all error types used throughout the crate,
//! providing a consistent error handling approach.

use glam::IVec2;

/// Main error type for the simulation.
///
/// This is the primary error type that should be used in public APIs.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Grid error: {0}")]
    Grid(#[from] GridError),

    #[error("Map parsing error: {0}")]
    MapParse(#[from] ParseError),

    #[error("Map error: {0}")]
    Map(#[from] MapError),
}

/// Errors raised by tile lookups and mutations.
///
/// Movement and path search treat these as walls rather than propagating them.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    #[error("Tile {0} is outside the grid")]
    OutOfBounds(IVec2),
}

/// Error type for layout parsing operations.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown tile code: {0}")]
    UnknownTileCode(u8),
    #[error("Unknown character in board: {0}")]
    UnknownCharacter(char),
    #[error("Row {row} has {found} tiles, expected {expected}")]
    RaggedRow { row: usize, expected: usize, found: usize },
    #[error("Board is empty")]
    Empty,
}

/// Errors related to map configuration.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum MapError {
    #[error("Spawn tile {tile} for {actor} is not walkable")]
    BlockedSpawn { actor: &'static str, tile: IVec2 },

    #[error("Invalid map configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for simulation operations.
pub type GameResult<T> = Result<T, GameError>;
