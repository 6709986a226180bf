use bevy_ecs::entity::Entity;
use bevy_ecs::event::EventWriter;
use bevy_ecs::query::{With, Without};
use bevy_ecs::system::{Query, Res, ResMut};
use smallvec::SmallVec;
use tracing::{debug, info, warn};

use crate::events::SimEvent;
use crate::systems::components::{Collider, Ghost, Movable, PlayerControlled, PlayerLives, Position, Spawn};
use crate::systems::mode::ModeState;

/// Sends an actor back to its spawn tile facing its initial direction.
/// The current speed is kept, so a one-shot boost survives a reset.
pub fn reset_to_spawn(position: &mut Position, movable: &mut Movable, spawn: &Spawn) {
    *position = spawn.position();
    movable.direction = Some(spawn.direction);
    movable.intention = Some(spawn.direction);
}

/// Tests every pursuer against the player, in [`Ghost`] order, without stopping
/// at the first overlap.
///
/// During Scatter an overlapping pursuer is captured and placed back on its spawn
/// tile. Otherwise each overlap reports a catch, but at most one life is lost per
/// tick, after which every actor returns to its spawn.
pub fn collision_system(
    mode: Res<ModeState>,
    mut lives: ResMut<PlayerLives>,
    mut players: Query<(&mut Position, &mut Movable, &Collider, &Spawn), (With<PlayerControlled>, Without<Ghost>)>,
    mut ghosts: Query<(Entity, &Ghost, &mut Position, &mut Movable, &Collider, &Spawn), Without<PlayerControlled>>,
    mut events: EventWriter<SimEvent>,
) {
    let Ok((mut player_position, mut player_movable, player_collider, player_spawn)) = players.single_mut() else {
        return;
    };

    let mut order: SmallVec<[(Ghost, Entity); 4]> = ghosts.iter().map(|(entity, ghost, ..)| (*ghost, entity)).collect();
    order.sort_unstable();

    let mut catchers: SmallVec<[Ghost; 4]> = SmallVec::new();
    for &(ghost, entity) in &order {
        let Ok((_, _, mut position, _, collider, spawn)) = ghosts.get_mut(entity) else {
            continue;
        };
        if !collider.overlaps(position.0, player_collider, player_position.0) {
            continue;
        }

        if mode.is_scatter() {
            info!(ghost = ghost.as_ref(), at = ?position.0, "Ghost captured");
            *position = spawn.position();
            events.write(SimEvent::GhostCaptured(ghost));
        } else {
            catchers.push(ghost);
        }
    }

    if catchers.is_empty() {
        return;
    }

    lives.0 = lives.0.saturating_sub(1);
    warn!(by = ?catchers, lives_left = lives.0, "Player caught");
    for ghost in catchers {
        events.write(SimEvent::PlayerCaught {
            ghost,
            lives_left: lives.0,
        });
    }

    reset_to_spawn(&mut player_position, &mut player_movable, player_spawn);
    for (_, ghost, mut position, mut movable, _, spawn) in ghosts.iter_mut() {
        reset_to_spawn(&mut position, &mut movable, spawn);
        debug!(ghost = ghost.as_ref(), "Ghost returned to spawn");
    }
}
