//! Breadth-first shortest paths over the tile grid.

use glam::IVec2;
use pathfinding::prelude::bfs;
use smallvec::SmallVec;
use tracing::trace;

use crate::map::direction::Direction;
use crate::map::grid::TileGrid;

/// An ordered list of tiles, starting with the first step after the source and
/// ending with the target.
pub type Path = Vec<IVec2>;

/// Finds a shortest path between two tiles.
///
/// Neighbors are explored East, West, South, North, which decides between equally
/// short paths. At most `budget` tiles are expanded; a search that runs out of
/// budget, an unreachable target and `start == target` all yield an empty path.
pub fn find_path(grid: &TileGrid, start: IVec2, target: IVec2, budget: usize) -> Path {
    if start == target || !grid.is_passable(target) {
        return Path::new();
    }

    let mut expansions = 0usize;
    let successors = |tile: &IVec2| -> SmallVec<[IVec2; 4]> {
        if expansions >= budget {
            return SmallVec::new();
        }
        expansions += 1;

        Direction::SEARCH_ORDER
            .iter()
            .map(|direction| *tile + direction.as_ivec2())
            .filter(|neighbor| grid.is_passable(*neighbor))
            .collect()
    };

    match bfs(&start, successors, |tile| *tile == target) {
        // The search result includes the start tile itself.
        Some(path) => path.into_iter().skip(1).collect(),
        None => {
            trace!(%start, %target, budget, "No path found");
            Path::new()
        }
    }
}

/// Returns the direction of the first step from `start` along `path`, if the step is
/// a single orthogonal move.
pub fn first_step_direction(start: IVec2, path: &[IVec2]) -> Option<Direction> {
    path.first().and_then(|next| Direction::from_delta(*next - start))
}
