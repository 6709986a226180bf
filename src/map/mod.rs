//! This module defines the tile grid and provides functions for interacting with it.

pub mod direction;
pub mod grid;
pub mod parser;
pub mod path;
