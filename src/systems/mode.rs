//! The Normal/Scatter mode state machine.
//!
//! Scatter is armed with an explicit expiry timestamp on the simulated clock, so
//! re-arming replaces the pending expiry and cancelling is a plain assignment.

use std::time::Duration;

use bevy_ecs::event::EventWriter;
use bevy_ecs::query::{With, Without};
use bevy_ecs::resource::Resource;
use bevy_ecs::system::{Query, Res, ResMut};
use strum_macros::AsRefStr;
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::events::SimEvent;
use crate::systems::components::{Animation, Ghost, ModeTag, PlayerControlled, SimClock, Tempo};

/// The global behavioral mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    #[default]
    Normal,
    Scatter,
}

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModeState {
    #[default]
    Normal,
    Scatter {
        expires_at: Duration,
    },
}

impl ModeState {
    pub fn mode(&self) -> Mode {
        match self {
            ModeState::Normal => Mode::Normal,
            ModeState::Scatter { .. } => Mode::Scatter,
        }
    }

    pub fn is_scatter(&self) -> bool {
        matches!(self, ModeState::Scatter { .. })
    }

    /// Enters Scatter, or restarts it if already active.
    ///
    /// # Returns
    ///
    /// `true` if the mode changed from Normal.
    pub fn enter_scatter(&mut self, now: Duration, duration: Duration) -> bool {
        let entered = !self.is_scatter();
        *self = ModeState::Scatter {
            expires_at: now + duration,
        };
        entered
    }

    /// Reverts to Normal if the pending expiry has been reached.
    ///
    /// # Returns
    ///
    /// `true` if Scatter ended.
    pub fn poll(&mut self, now: Duration) -> bool {
        match *self {
            ModeState::Scatter { expires_at } if now >= expires_at => {
                *self = ModeState::Normal;
                true
            }
            _ => false,
        }
    }

    /// Drops any pending expiry and returns to Normal.
    pub fn cancel(&mut self) {
        *self = ModeState::Normal;
    }

    pub fn remaining(&self, now: Duration) -> Option<Duration> {
        match self {
            ModeState::Normal => None,
            ModeState::Scatter { expires_at } => Some(expires_at.saturating_sub(now)),
        }
    }
}

/// Ends Scatter once the simulated clock reaches its expiry. Runs first in every tick.
pub fn mode_expiry_system(clock: Res<SimClock>, mut mode: ResMut<ModeState>, mut events: EventWriter<SimEvent>) {
    if mode.poll(clock.elapsed) {
        info!(elapsed = ?clock.elapsed, "Scatter ended");
        events.write(SimEvent::ScatterEnded);
    }
}

/// Applies the side effects of the current mode: ghost mode tags, the logic tick
/// rate and the player's animation speed. The player's own tag stays Normal.
/// Idempotent; runs last in every tick.
pub fn mode_sync_system(
    mode: Res<ModeState>,
    config: Res<GameConfig>,
    mut tempo: ResMut<Tempo>,
    mut ghosts: Query<&mut ModeTag, With<Ghost>>,
    mut player: Query<&mut Animation, (With<PlayerControlled>, Without<Ghost>)>,
) {
    let current = mode.mode();
    let (tick_rate, player_delay) = match current {
        Mode::Normal => (config.normal_tick_rate, config.default_animation_delay),
        Mode::Scatter => (config.scatter_tick_rate, config.player_scatter_animation_delay),
    };

    if tempo.tick_rate != tick_rate {
        debug!(from = tempo.tick_rate, to = tick_rate, "Tick rate changed");
        tempo.tick_rate = tick_rate;
    }

    for mut tag in ghosts.iter_mut() {
        if tag.0 != current {
            tag.0 = current;
        }
    }

    for mut animation in player.iter_mut() {
        if animation.delay != player_delay {
            animation.delay = player_delay;
            animation.count = animation.count.min(player_delay.saturating_sub(1));
        }
    }
}
