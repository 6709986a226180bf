use bevy_ecs::event::EventWriter;
use bevy_ecs::resource::Resource;
use bevy_ecs::system::{Res, ResMut};
use strum_macros::AsRefStr;
use tracing::info;

use crate::events::SimEvent;
use crate::systems::components::{DotCounter, PlayerLives, ScoreResource, SimClock};

/// Whether the scheduling loop is live.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum LoopState {
    #[default]
    Stopped,
    Running,
    /// Frames keep arriving, but no logic tick runs and simulated time is frozen.
    Paused,
}

impl LoopState {
    pub fn is_running(&self) -> bool {
        matches!(self, LoopState::Running)
    }

    pub fn is_stopped(&self) -> bool {
        matches!(self, LoopState::Stopped)
    }

    /// Flips between Running and Paused.
    ///
    /// # Returns
    ///
    /// `true` if the state changed. A stopped loop stays stopped.
    pub fn toggle_pause(&mut self) -> bool {
        *self = match self {
            LoopState::Running => LoopState::Paused,
            LoopState::Paused => LoopState::Running,
            LoopState::Stopped => return false,
        };
        true
    }
}

/// Stops the loop once the last dot is gone or the last life is lost.
pub fn end_of_tick_system(
    dots: Res<DotCounter>,
    lives: Res<PlayerLives>,
    score: Res<ScoreResource>,
    clock: Res<SimClock>,
    mut state: ResMut<LoopState>,
    mut events: EventWriter<SimEvent>,
) {
    if state.is_stopped() {
        return;
    }

    if dots.remaining == 0 {
        info!(score = score.0, ticks = clock.ticks, "Level cleared");
        *state = LoopState::Stopped;
        events.write(SimEvent::LevelCleared);
    } else if lives.0 == 0 {
        info!(score = score.0, ticks = clock.ticks, "Game over");
        *state = LoopState::Stopped;
        events.write(SimEvent::GameOver);
    }
}
