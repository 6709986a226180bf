//! Grid-constrained movement for actors with a continuous position.

use glam::Vec2;

use crate::constants::TILE_SIZE;
use crate::map::direction::Direction;
use crate::map::grid::TileGrid;
use crate::systems::components::{Movable, Position};

/// Offset from an actor's top-left corner to its opposite corners.
const INSET: f32 = (TILE_SIZE - 1) as f32;

/// The four corners of an actor's box placed at `position`.
pub fn corners(position: Vec2) -> [Vec2; 4] {
    [
        position,
        position + Vec2::new(INSET, 0.0),
        position + Vec2::new(0.0, INSET),
        position + Vec2::new(INSET, INSET),
    ]
}

/// Whether an actor's box fits at `position` without any corner over a wall.
/// Corners outside the grid count as walls.
pub fn fits(grid: &TileGrid, position: Vec2) -> bool {
    corners(position).into_iter().all(|corner| grid.is_passable_pixel(corner))
}

fn offset(position: Vec2, speed: f32, direction: Option<Direction>) -> Option<Vec2> {
    direction.map(|direction| position + direction.as_vec2() * speed)
}

/// Advances one actor by one tick.
///
/// First the intention is committed as the new direction if the box would fit one
/// step along it. Then the actor moves one step along its (possibly new) direction
/// if the box fits there; otherwise it stays put.
///
/// # Returns
///
/// `true` if the actor moved.
pub fn advance(grid: &TileGrid, position: &mut Position, movable: &mut Movable) -> bool {
    if let Some(turned) = offset(position.0, movable.speed, movable.intention) {
        if fits(grid, turned) {
            movable.direction = movable.intention;
        }
    }

    match offset(position.0, movable.speed, movable.direction) {
        Some(next) if fits(grid, next) => {
            position.0 = next;
            true
        }
        _ => false,
    }
}
