use bevy_ecs::prelude::*;
use glam::IVec2;

use crate::map::direction::Direction;
use crate::systems::components::Ghost;

/// Commands fed into the simulation from the input collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameCommand {
    MovePlayer(Direction),
    TogglePause,
    Stop,
    Restart,
}

/// Everything notable that happened during a logic tick.
///
/// Written by the systems and drained into the [`TickReport`](crate::game::TickReport)
/// after every tick.
#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimEvent {
    DotEaten { tile: IVec2 },
    PillEaten { tile: IVec2 },
    ScatterStarted,
    ScatterEnded,
    SpeedBoosted(Ghost),
    GhostCaptured(Ghost),
    PlayerCaught { ghost: Ghost, lives_left: u8 },
    LevelCleared,
    GameOver,
}
