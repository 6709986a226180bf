use bevy_ecs::query::Has;
use bevy_ecs::system::Query;

use crate::constants::animation;
use crate::map::direction::Direction;
use crate::systems::components::{Animation, ModeTag, Movable, PlayerControlled};
use crate::systems::mode::Mode;

/// The sprite-sheet frames cycled for an actor of the given kind, mode and facing.
pub fn frame_set(player: bool, mode: Mode, direction: Direction) -> &'static [u8] {
    match (player, mode, direction) {
        (true, _, Direction::East) => &animation::PLAYER_EAST,
        (true, _, Direction::South) => &animation::PLAYER_SOUTH,
        (true, _, Direction::West) => &animation::PLAYER_WEST,
        (true, _, Direction::North) => &animation::PLAYER_NORTH,
        (false, Mode::Scatter, _) => &animation::GHOST_SCATTER,
        (false, Mode::Normal, Direction::East) => &animation::GHOST_EAST,
        (false, Mode::Normal, Direction::South) => &animation::GHOST_SOUTH,
        (false, Mode::Normal, Direction::West) => &animation::GHOST_WEST,
        (false, Mode::Normal, Direction::North) => &animation::GHOST_NORTH,
    }
}

/// Counts one render frame; every `delay` frames, steps to the next frame of `frames`.
///
/// # Returns
///
/// `true` if the shown frame was advanced.
pub fn advance(animation: &mut Animation, frames: &[u8]) -> bool {
    animation.count = animation.count.saturating_add(1);
    if animation.count < animation.delay || frames.is_empty() {
        return false;
    }

    animation.count = 0;
    animation.frame_index = (animation.frame_index + 1) % frames.len();
    animation.frame = frames[animation.frame_index];
    true
}

/// Advances every actor's animation by one render frame.
pub fn animation_system(mut query: Query<(&mut Animation, &Movable, &ModeTag, Has<PlayerControlled>)>) {
    for (mut animation, movable, mode, player) in query.iter_mut() {
        let frames = frame_set(player, mode.0, movable.direction.unwrap_or_default());
        advance(&mut animation, frames);
    }
}
