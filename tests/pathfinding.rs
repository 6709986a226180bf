use std::collections::{HashMap, VecDeque};

use glam::IVec2;
use maze_chase::constants::PATH_EXPANSION_BUDGET;
use maze_chase::map::direction::Direction;
use maze_chase::map::grid::TileGrid;
use maze_chase::map::path::{find_path, first_step_direction};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

mod common;

const UNLIMITED: usize = usize::MAX;

/// Plain breadth-first distances from `start` to every reachable tile.
fn distances(grid: &TileGrid, start: IVec2) -> HashMap<IVec2, usize> {
    let mut seen = HashMap::from([(start, 0)]);
    let mut queue = VecDeque::from([start]);
    while let Some(tile) = queue.pop_front() {
        let distance = seen[&tile];
        for direction in Direction::SEARCH_ORDER {
            let next = tile + direction.as_ivec2();
            if grid.is_passable(next) && !seen.contains_key(&next) {
                seen.insert(next, distance + 1);
                queue.push_back(next);
            }
        }
    }
    seen
}

fn walkable(grid: &TileGrid) -> Vec<IVec2> {
    grid.iter().filter(|tile| tile.value.is_walkable()).map(|tile| tile.position).collect()
}

#[test]
fn test_paths_are_shortest_and_connected() {
    let grid = common::standard_grid();
    let tiles = walkable(&grid);

    for &start in tiles.iter().step_by(7) {
        let reference = distances(&grid, start);
        for &target in tiles.iter().step_by(5) {
            let path = find_path(&grid, start, target, UNLIMITED);
            match reference.get(&target) {
                Some(0) | None => assert_that(&path).is_empty(),
                Some(&distance) => {
                    assert_eq!(path.len(), distance, "{start} -> {target}");
                    assert_eq!(path.last(), Some(&target));
                    let mut previous = start;
                    for &step in &path {
                        assert!(grid.is_passable(step));
                        assert!(Direction::from_delta(step - previous).is_some());
                        previous = step;
                    }
                }
            }
        }
    }
}

#[test]
fn test_ties_follow_search_order() {
    let grid = common::grid(&common::ROOM);
    let path = find_path(&grid, IVec2::new(1, 1), IVec2::new(3, 3), UNLIMITED);

    assert_eq!(
        path,
        vec![IVec2::new(2, 1), IVec2::new(3, 1), IVec2::new(3, 2), IVec2::new(3, 3)]
    );
    assert_eq!(first_step_direction(IVec2::new(1, 1), &path), Some(Direction::East));

    // West is explored before South and North.
    let path = find_path(&grid, IVec2::new(3, 3), IVec2::new(1, 1), UNLIMITED);
    assert_eq!(path.first(), Some(&IVec2::new(2, 3)));
}

#[test]
fn test_start_equals_target_is_empty() {
    let grid = common::grid(&common::ROOM);
    assert_that(&find_path(&grid, IVec2::new(2, 2), IVec2::new(2, 2), UNLIMITED)).is_empty();
}

#[test]
fn test_walled_off_target_is_empty() {
    let grid = common::grid(&["#######", "#. # .#", "#######"]);
    assert_that(&find_path(&grid, IVec2::new(1, 1), IVec2::new(5, 1), UNLIMITED)).is_empty();
    assert_that(&find_path(&grid, IVec2::new(1, 1), IVec2::new(3, 1), UNLIMITED)).is_empty();
    assert_that(&find_path(&grid, IVec2::new(1, 1), IVec2::new(30, 1), UNLIMITED)).is_empty();
}

#[test]
fn test_expansion_budget() {
    let corridor = format!("#{}#", " ".repeat(150));
    let wall = "#".repeat(152);
    let grid = common::grid(&[wall.as_str(), corridor.as_str(), wall.as_str()]);
    let (start, target) = (IVec2::new(1, 1), IVec2::new(150, 1));

    // Reaching the far end takes 149 expansions.
    assert_that(&find_path(&grid, start, target, PATH_EXPANSION_BUDGET)).is_empty();
    assert_that(&find_path(&grid, start, target, 148)).is_empty();
    assert_that(&find_path(&grid, start, target, 149)).has_length(149);
}

#[test]
fn test_first_step_rejects_non_adjacent() {
    assert_eq!(first_step_direction(IVec2::ZERO, &[IVec2::new(2, 0)]), None);
    assert_eq!(first_step_direction(IVec2::ZERO, &[]), None);
    assert_eq!(first_step_direction(IVec2::ZERO, &[IVec2::new(0, -1)]), Some(Direction::North));
}
