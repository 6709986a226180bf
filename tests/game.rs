use std::time::Duration;

use glam::{IVec2, Vec2};
use maze_chase::config::GameConfig;
use maze_chase::error::{GameError, MapError};
use maze_chase::events::{GameCommand, SimEvent};
use maze_chase::map::direction::Direction;
use maze_chase::map::grid::TileValue;
use maze_chase::game::Game;
use maze_chase::systems::{ActorKind, Ghost, LoopState, Mode};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

mod common;

const MS: Duration = Duration::from_millis(1);

#[test]
fn test_single_dot_is_eaten_and_clears_the_level() {
    let config = GameConfig::with_grid(common::grid(&["###", "#.#", "###"]));
    let mut game = common::started(config);
    assert_that(&game.dots()).is_equal_to(1);
    assert_that(&game.score()).is_equal_to(0);

    let report = game.tick().expect("a running game should tick");

    assert_eq!(
        report.events,
        vec![SimEvent::DotEaten { tile: IVec2::ONE }, SimEvent::LevelCleared]
    );
    assert_that(&game.dots()).is_equal_to(0);
    assert_that(&game.score()).is_equal_to(1);
    assert_that(&game.grid().tile_at(IVec2::ONE).unwrap().value).is_equal_to(TileValue::Empty);
    assert_that(&game.state()).is_equal_to(LoopState::Stopped);
}

#[test]
fn test_last_dot_stops_the_loop_in_the_same_tick() {
    let config = GameConfig::with_grid(common::grid(&["####", "#..#", "####"]));
    let mut game = common::started(config);

    let report = common::tick_until(&mut game, &SimEvent::LevelCleared, 100).expect("the level should clear");

    assert_that(&report.tick).is_equal_to(25);
    assert_that(&report.contains(&SimEvent::DotEaten { tile: IVec2::new(2, 1) })).is_true();
    assert_that(&game.state()).is_equal_to(LoopState::Stopped);
    assert_that(&game.tick()).is_none();
    assert_that(&game.frame(Duration::from_secs(60))).is_none();
}

#[test]
fn test_scatter_capture_returns_pursuer_to_its_spawn() {
    let config = GameConfig::with_grid(common::grid(&["#########", "#o     .#", "#########"]))
        .with_ghosts([(Ghost::Inky, IVec2::new(3, 1))]);
    let mut game = common::started(config);

    let first = game.tick().expect("a running game should tick");
    assert_that(&first.contains(&SimEvent::ScatterStarted)).is_true();
    assert_that(&game.mode()).is_equal_to(Mode::Scatter);

    let report = common::tick_until(&mut game, &SimEvent::GhostCaptured(Ghost::Inky), 50).expect("Inky should be captured");

    assert_that(&report.tick).is_equal_to(12);
    assert_that(&game.ghost_position(Ghost::Inky)).is_equal_to(Some(Vec2::new(72.0, 24.0)));
    assert_that(&game.player_position()).is_equal_to(Vec2::new(36.0, 24.0));
    assert_that(&game.lives()).is_equal_to(3);
}

#[test]
fn test_losing_every_life_ends_the_game() {
    let config = GameConfig::with_grid(common::grid(&["#######", "#.    #", "#######"]))
        .with_player_spawn(IVec2::new(2, 1))
        .with_ghosts([(Ghost::Inky, IVec2::new(3, 1)), (Ghost::Blinky, IVec2::new(1, 1))]);
    let mut game = common::started(config);

    let first = game.tick().expect("a running game should tick");
    assert_eq!(
        first.events,
        vec![
            SimEvent::PlayerCaught {
                ghost: Ghost::Inky,
                lives_left: 2
            },
            SimEvent::PlayerCaught {
                ghost: Ghost::Blinky,
                lives_left: 2
            },
        ]
    );
    assert_that(&game.player_position()).is_equal_to(Vec2::new(48.0, 24.0));

    game.tick();
    let last = game.tick().expect("a running game should tick");

    assert_that(&game.lives()).is_equal_to(0);
    assert_that(&last.events.last()).is_equal_to(Some(&SimEvent::GameOver));
    assert_that(&game.state()).is_equal_to(LoopState::Stopped);
    // The grid and score survive a lost life.
    assert_that(&game.dots()).is_equal_to(1);
}

#[test]
fn test_logic_and_render_cadences_are_independent() {
    let config = GameConfig::with_grid(common::grid(&["####", "#. #", "####"])).with_player_spawn(IVec2::new(2, 1));
    let mut game = common::started(config);

    let (mut ticks, mut frames, mut both) = (0, 0, 0);
    for ms in 1..=1000 {
        let frame = game.frame(MS * ms).expect("the loop should keep running");
        ticks += frame.tick.is_some() as u32;
        frames += frame.render.is_some() as u32;
        both += (frame.tick.is_some() && frame.render.is_some()) as u32;
    }

    // Ticks fire every 11 ms (strictly more than 10), frames every 17 ms.
    assert_that(&ticks).is_equal_to(90);
    assert_that(&frames).is_equal_to(58);
    assert_that(&both).is_equal_to(5);
    assert_that(&game.clock().elapsed).is_equal_to(Duration::from_secs(1));
}

#[test]
fn test_pause_freezes_ticks_and_simulated_time() {
    let config = GameConfig::with_grid(common::grid(&["####", "#. #", "####"])).with_player_spawn(IVec2::new(2, 1));
    let mut game = common::started(config);

    assert_that(&game.frame(MS * 11).and_then(|frame| frame.tick)).is_some();
    game.handle_command(GameCommand::TogglePause, MS * 11);
    assert_that(&game.state()).is_equal_to(LoopState::Paused);

    let paused = game.frame(Duration::from_secs(5)).expect("a paused loop keeps its callback");
    assert_that(&paused.tick).is_none();
    assert_that(&game.clock().elapsed).is_equal_to(MS * 11);
    assert_that(&game.clock().ticks).is_equal_to(1);
    assert_that(&game.tick()).is_none();

    game.resume();
    let resumed = game.frame(Duration::from_secs(5) + MS * 4).expect("the loop should be running");
    assert_that(&resumed.tick).is_some();
    assert_that(&game.clock().elapsed).is_equal_to(MS * 15);
}

#[test]
fn test_stop_is_final_until_restart() {
    let config = GameConfig::with_grid(common::grid(&common::ROOM)).with_player_spawn(IVec2::new(2, 2));
    let mut game = common::started(config);
    game.tick();
    assert_that(&game.dots()).is_equal_to(8);

    game.handle_command(GameCommand::Stop, MS);
    assert_that(&game.frame(MS * 100)).is_none();
    assert_that(&game.tick()).is_none();

    game.handle_command(GameCommand::Restart, MS * 200);
    assert_that(&game.state()).is_equal_to(LoopState::Running);
    assert_that(&game.dots()).is_equal_to(9);
    assert_that(&game.score()).is_equal_to(0);
    assert_that(&game.clock().ticks).is_equal_to(0);
    assert_that(&game.frame(MS * 211).and_then(|frame| frame.tick)).is_some();
}

#[test]
fn test_steering_sets_the_player_intention() {
    let config = GameConfig::with_grid(common::grid(&common::ROOM)).with_player_spawn(IVec2::new(2, 2));
    let mut game = common::started(config);

    game.handle_command(GameCommand::MovePlayer(Direction::North), Duration::ZERO);
    game.tick();

    assert_that(&game.player_position()).is_equal_to(Vec2::new(48.0, 47.0));
}

#[test]
fn test_snapshot_describes_the_world() {
    let config = GameConfig::standard().unwrap();
    let mut game = common::started(config);

    let snapshot = game.snapshot();

    assert_that(&snapshot.width).is_equal_to(19);
    assert_that(&snapshot.height).is_equal_to(22);
    assert_that(&snapshot.tiles.len()).is_equal_to(19 * 22);
    assert_that(&snapshot.dots).is_equal_to(game.dots());
    assert_that(&snapshot.lives).is_equal_to(3);
    assert_that(&snapshot.mode).is_equal_to(Mode::Normal);
    let kinds: Vec<ActorKind> = snapshot.actors.iter().map(|actor| actor.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ActorKind::Player,
            ActorKind::Ghost(Ghost::Inky),
            ActorKind::Ghost(Ghost::Pinky),
            ActorKind::Ghost(Ghost::Clyde),
            ActorKind::Ghost(Ghost::Blinky),
        ]
    );
    assert_that(&snapshot.player().map(|actor| actor.position)).is_equal_to(Some(Vec2::new(216.0, 288.0)));
}

#[test]
fn test_render_frames_advance_animations_while_running() {
    let config = GameConfig::with_grid(common::grid(&common::ROOM)).with_player_spawn(IVec2::new(2, 2));
    let mut game = common::started(config);

    let mut shown = Vec::new();
    for step in 1..=8u32 {
        let frame = game.frame(MS * 17 * step).expect("the loop should keep running");
        if let Some(render) = frame.render {
            shown.push(render.player().map(|actor| actor.frame).unwrap_or_default());
        }
    }

    // East frames 0..=3, one step every four render frames.
    assert_eq!(shown, vec![0, 0, 0, 1, 1, 1, 1, 2]);
}

#[test]
fn test_blocked_spawn_is_rejected() {
    let config = GameConfig::with_grid(common::grid(&common::ROOM)).with_ghosts([(Ghost::Clyde, IVec2::new(0, 0))]);

    let error = Game::new(config).err().expect("a spawn inside a wall should be rejected");

    assert!(matches!(
        error,
        GameError::Map(MapError::BlockedSpawn {
            actor: "clyde",
            tile
        }) if tile == IVec2::ZERO
    ));
}

#[test]
fn test_standard_game_runs_without_stopping_early() {
    let mut game = common::started(GameConfig::standard().unwrap());
    let initial = game.dots();

    for _ in 0..500 {
        let Some(report) = game.tick() else { break };
        assert_that(&report.events.contains(&SimEvent::LevelCleared)).is_false();
    }

    assert_that(&game.dots()).is_less_than_or_equal_to(initial);
}
