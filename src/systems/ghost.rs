use bevy_ecs::entity::Entity;
use bevy_ecs::event::EventWriter;
use bevy_ecs::query::{With, Without};
use bevy_ecs::system::{Query, Res};
use glam::IVec2;
use smallvec::SmallVec;
use tracing::{info, trace};

use crate::config::GameConfig;
use crate::events::SimEvent;
use crate::map::grid::{pixel_to_tile, TileGrid};
use crate::map::path::{find_path, first_step_direction};
use crate::systems::components::{DotCounter, Ghost, Movable, PlayerControlled, Position, SpeedBoost, TargetingRule};
use crate::systems::mode::{Mode, ModeState};
use crate::systems::movement;

/// Picks the tile a pursuer heads for, or `None` when it should hold its intention.
pub fn target_tile(rule: TargetingRule, mode: Mode, player_tile: IVec2, player: &Movable, grid: &TileGrid) -> Option<IVec2> {
    match (rule, mode) {
        (TargetingRule::Chase, Mode::Normal) => Some(player_tile),
        (TargetingRule::Chase, Mode::Scatter) => None,
        (TargetingRule::Ambush { corner }, Mode::Scatter) => Some(corner),
        (TargetingRule::Ambush { .. }, Mode::Normal) => {
            let Some(intention) = player.intention else {
                return Some(player_tile);
            };
            let lead = (2.0 * player.speed).round() as i32;
            let ahead = player_tile + intention.as_ivec2() * lead;
            Some(ahead.clamp(IVec2::ZERO, grid.size() - IVec2::ONE))
        }
    }
}

/// Points a pursuer at the first step of the shortest path toward `target`.
/// An empty path (already there, unreachable, budget exhausted) leaves the intention as is.
pub fn steer_toward(grid: &TileGrid, position: &Position, movable: &mut Movable, target: IVec2, budget: usize) {
    let start = pixel_to_tile(position.0);
    let path = find_path(grid, start, target, budget);
    if let Some(direction) = first_step_direction(start, &path) {
        movable.intention = Some(direction);
    }
}

/// Applies a pending speed boost once enough dots have been eaten.
///
/// # Returns
///
/// `true` if the boost was applied by this call.
pub fn apply_speed_boost(boost: &mut SpeedBoost, movable: &mut Movable, dots: &DotCounter) -> bool {
    if boost.applied || dots.remaining as f32 > dots.initial as f32 * boost.threshold {
        return false;
    }
    boost.applied = true;
    movable.speed *= boost.multiplier;
    true
}

/// Retargets and moves every pursuer, one at a time, in [`Ghost`] order.
pub fn ghost_system(
    grid: Res<TileGrid>,
    config: Res<GameConfig>,
    mode: Res<ModeState>,
    dots: Res<DotCounter>,
    player: Query<(&Position, &Movable), (With<PlayerControlled>, Without<Ghost>)>,
    mut ghosts: Query<
        (Entity, &Ghost, &TargetingRule, &mut Position, &mut Movable, Option<&mut SpeedBoost>),
        Without<PlayerControlled>,
    >,
    mut events: EventWriter<SimEvent>,
) {
    let Ok((player_position, player_movable)) = player.single() else {
        return;
    };
    let player_tile = pixel_to_tile(player_position.0);
    let player_movable = *player_movable;
    let current = mode.mode();

    let mut order: SmallVec<[(Ghost, Entity); 4]> = ghosts.iter().map(|(entity, ghost, ..)| (*ghost, entity)).collect();
    order.sort_unstable();

    for (ghost, entity) in order {
        let Ok((_, _, rule, mut position, mut movable, boost)) = ghosts.get_mut(entity) else {
            continue;
        };

        if let Some(mut boost) = boost {
            if apply_speed_boost(&mut boost, &mut movable, &dots) {
                info!(ghost = ghost.as_ref(), speed = movable.speed, remaining = dots.remaining, "Speed boost applied");
                events.write(SimEvent::SpeedBoosted(ghost));
            }
        }

        if let Some(target) = target_tile(*rule, current, player_tile, &player_movable, &grid) {
            steer_toward(&grid, &position, &mut movable, target, config.path_budget);
        }

        movement::advance(&grid, &mut position, &mut movable);
        trace!(ghost = ghost.as_ref(), position = ?position.0, direction = ?movable.direction, "Ghost moved");
    }
}
