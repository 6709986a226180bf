use glam::{IVec2, Vec2};
use maze_chase::map::direction::Direction;
use maze_chase::map::grid::pixel_to_tile;
use maze_chase::systems::movement::{advance, corners, fits};
use maze_chase::systems::{Movable, Position};
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use speculoos::prelude::*;
use strum::IntoEnumIterator;

mod common;

#[test]
fn test_actor_never_overlaps_a_wall() {
    let grid = common::standard_grid();
    let directions: Vec<Direction> = Direction::iter().collect();

    for (seed, speed) in [(1u64, 1.0f32), (2, 1.0), (3, 1.5)] {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut position = Position::at_tile(IVec2::new(9, 12));
        let mut movable = Movable::new(speed, Direction::East);

        for step in 0..5_000 {
            if step % 17 == 0 {
                movable.intention = directions.choose(&mut rng).copied();
            }
            advance(&grid, &mut position, &mut movable);

            assert!(fits(&grid, position.0), "seed {seed} step {step}: {:?}", position.0);
            for corner in corners(position.0) {
                assert!(grid.contains(pixel_to_tile(corner)));
            }
        }
    }
}

#[test]
fn test_turn_is_buffered_until_it_fits() {
    // A corridor running east with an opening south at tile (3, 1).
    let grid = common::grid(&["#####", "#   #", "### #", "#####"]);
    let mut position = Position::at_tile(IVec2::new(1, 1));
    let mut movable = Movable::new(1.0, Direction::East);
    movable.intention = Some(Direction::South);

    for _ in 0..48 {
        advance(&grid, &mut position, &mut movable);
        assert_that(&movable.direction).is_equal_to(Some(Direction::East));
    }
    assert_that(&position.0).is_equal_to(Vec2::new(72.0, 24.0));

    advance(&grid, &mut position, &mut movable);
    assert_that(&movable.direction).is_equal_to(Some(Direction::South));
    assert_that(&position.0).is_equal_to(Vec2::new(72.0, 25.0));
}

#[test]
fn test_reversal_is_immediate() {
    let grid = common::grid(&["#####", "#   #", "#####"]);
    let mut position = Position(Vec2::new(36.0, 24.0));
    let mut movable = Movable::new(1.0, Direction::East);
    movable.intention = Some(Direction::West);

    advance(&grid, &mut position, &mut movable);

    assert_that(&movable.direction).is_equal_to(Some(Direction::West));
    assert_that(&position.0).is_equal_to(Vec2::new(35.0, 24.0));
}

#[test]
fn test_misaligned_speed_turns_inside_the_window() {
    let grid = common::grid(&["#####", "#   #", "### #", "#####"]);
    let mut position = Position::at_tile(IVec2::new(1, 1));
    let mut movable = Movable::new(1.25, Direction::East);
    movable.intention = Some(Direction::South);

    // 24 + 1.25k skips x = 72, but x = 72.75 keeps the box inside column 3.
    for _ in 0..39 {
        advance(&grid, &mut position, &mut movable);
    }
    assert_that(&movable.direction).is_equal_to(Some(Direction::East));
    assert_that(&position.0).is_equal_to(Vec2::new(72.75, 24.0));

    advance(&grid, &mut position, &mut movable);
    assert_that(&movable.direction).is_equal_to(Some(Direction::South));
    assert_that(&position.0).is_equal_to(Vec2::new(72.75, 25.25));

    for _ in 0..160 {
        advance(&grid, &mut position, &mut movable);
        assert_that(&pixel_to_tile(position.0).x).is_equal_to(3);
    }
    assert_that(&position.0).is_equal_to(Vec2::new(72.75, 47.75));
}
