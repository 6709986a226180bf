use std::time::Duration;

use bevy_ecs::event::EventWriter;
use bevy_ecs::query::{With, Without};
use bevy_ecs::system::{Query, Res, ResMut};
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::events::SimEvent;
use crate::map::direction::Direction;
use crate::map::grid::{pixel_to_tile, TileGrid, TileValue};
use crate::systems::components::{DotCounter, Ghost, Movable, PlayerControlled, Position, ScoreResource, SimClock};
use crate::systems::mode::ModeState;
use crate::systems::movement;

/// What the player found on the tile it occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Consumed {
    Nothing,
    Dot,
    /// A pill; `entered` is false when Scatter was already active and only restarted.
    Pill { entered: bool },
}

/// Eats whatever sits on the player's tile.
///
/// A dot becomes Empty, decrements the dot counter and scores a point. A pill
/// becomes Empty and (re)starts Scatter at `now`. Pills do not count as dots.
pub fn consume_tile(
    grid: &mut TileGrid,
    position: &Position,
    dots: &mut DotCounter,
    score: &mut ScoreResource,
    mode: &mut ModeState,
    now: Duration,
    scatter_duration: Duration,
) -> Consumed {
    let Ok(tile) = grid.tile_at_pixel(position.0) else {
        return Consumed::Nothing;
    };

    let consumed = match tile.value {
        TileValue::Dot => {
            dots.remaining = dots.remaining.saturating_sub(1);
            score.0 += 1;
            Consumed::Dot
        }
        TileValue::Pill => Consumed::Pill {
            entered: mode.enter_scatter(now, scatter_duration),
        },
        _ => return Consumed::Nothing,
    };

    // The tile was just looked up, so it is in bounds.
    let _ = grid.set_value(tile.position, TileValue::Empty);
    consumed
}

/// Sets the direction the player wants to take at the next opportunity.
pub fn steer(movable: &mut Movable, direction: Direction) {
    movable.intention = Some(direction);
}

/// Eats the player's current tile, then moves the player.
#[allow(clippy::too_many_arguments)]
pub fn player_system(
    mut grid: ResMut<TileGrid>,
    config: Res<GameConfig>,
    clock: Res<SimClock>,
    mut mode: ResMut<ModeState>,
    mut dots: ResMut<DotCounter>,
    mut score: ResMut<ScoreResource>,
    mut players: Query<(&mut Position, &mut Movable), (With<PlayerControlled>, Without<Ghost>)>,
    mut events: EventWriter<SimEvent>,
) {
    let Ok((mut position, mut movable)) = players.single_mut() else {
        return;
    };

    let tile = pixel_to_tile(position.0);
    match consume_tile(
        &mut grid,
        &position,
        &mut dots,
        &mut score,
        &mut mode,
        clock.elapsed,
        config.scatter_duration,
    ) {
        Consumed::Nothing => {}
        Consumed::Dot => {
            debug!(tile = ?tile, remaining = dots.remaining, score = score.0, "Dot eaten");
            events.write(SimEvent::DotEaten { tile });
        }
        Consumed::Pill { entered } => {
            events.write(SimEvent::PillEaten { tile });
            if entered {
                info!(tile = ?tile, elapsed = ?clock.elapsed, "Scatter started");
                events.write(SimEvent::ScatterStarted);
            } else {
                debug!(tile = ?tile, "Scatter restarted");
            }
        }
    }

    movement::advance(&grid, &mut position, &mut movable);
}
