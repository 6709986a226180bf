use std::time::{Duration, Instant};

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use smallvec::SmallVec;
use strum::IntoEnumIterator;
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::error::GameResult;
use crate::events::{GameCommand, SimEvent};
use crate::game::{Game, TickReport};
use crate::input::Bindings;
use crate::map::direction::Direction;
use crate::map::grid::pixel_to_tile;
use crate::platform;
use crate::systems::LoopState;

/// How often the runner calls back into the game.
const CALLBACK_INTERVAL: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Stop after this many logic ticks.
    pub max_ticks: Option<u64>,
    /// Seed for the autopilot; random when absent.
    pub seed: Option<u64>,
    /// Scripted key presses, applied after the given tick.
    pub presses: Vec<(u64, String)>,
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub score: u32,
    pub dots: u32,
    pub lives: u8,
    pub frames: u64,
}

/// Steers the player at random whenever it stops making progress.
pub struct Autopilot {
    rng: SmallRng,
    last_position: Option<Vec2>,
}

impl Autopilot {
    pub fn new(rng: SmallRng) -> Self {
        Self {
            rng,
            last_position: None,
        }
    }

    /// Picks a new open direction if the player did not move since the last call.
    pub fn drive(&mut self, game: &mut Game) -> Option<Direction> {
        let position = game.player_position();
        let blocked = self.last_position == Some(position);
        self.last_position = Some(position);
        if !blocked {
            return None;
        }

        let tile = pixel_to_tile(position);
        let open: SmallVec<[Direction; 4]> = Direction::iter()
            .filter(|direction| game.grid().is_passable(tile + direction.as_ivec2()))
            .collect();
        let direction = *open.choose(&mut self.rng)?;
        game.steer(direction);
        debug!(?tile, direction = direction.as_ref(), "Autopilot turned");
        Some(direction)
    }
}

/// Drives a [`Game`] in real time until it stops.
pub struct App {
    game: Game,
    autopilot: Autopilot,
    bindings: Bindings,
    options: RunOptions,
    epoch: Instant,
}

impl App {
    pub fn new(config: GameConfig, options: RunOptions) -> GameResult<Self> {
        let game = Game::new(config)?;
        let autopilot = Autopilot::new(platform::rng(options.seed));
        Ok(Self {
            game,
            autopilot,
            bindings: Bindings::default(),
            options,
            epoch: Instant::now(),
        })
    }

    fn now(&self) -> Duration {
        self.epoch.elapsed()
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Applies the command bound to a key name, if any.
    pub fn press(&mut self, key: &str) -> Option<GameCommand> {
        let Some(command) = self.bindings.command(key) else {
            debug!(key, "Unbound key");
            return None;
        };
        let now = self.now();
        self.game.handle_command(command, now);
        Some(command)
    }

    /// Runs the loop to completion.
    pub fn run(&mut self) -> RunSummary {
        self.game.start(self.now());
        let mut frames = 0u64;

        loop {
            let Some(frame) = self.game.frame(self.now()) else {
                break;
            };

            if frame.render.is_some() {
                frames += 1;
            }
            if let Some(report) = frame.tick {
                self.after_tick(&report);
            }

            platform::sleep(CALLBACK_INTERVAL);
        }

        let summary = RunSummary {
            ticks: self.game.clock().ticks,
            score: self.game.score(),
            dots: self.game.dots(),
            lives: self.game.lives(),
            frames,
        };
        info!(
            ticks = summary.ticks,
            frames = summary.frames,
            score = summary.score,
            dots = summary.dots,
            lives = summary.lives,
            elapsed = ?self.game.clock().elapsed,
            "Run finished"
        );
        summary
    }

    fn after_tick(&mut self, report: &TickReport) {
        for event in &report.events {
            match event {
                SimEvent::DotEaten { .. } => {}
                event => debug!(?event, "Simulation event"),
            }
        }

        let keys: SmallVec<[String; 2]> = self
            .options
            .presses
            .iter()
            .filter(|(tick, _)| *tick == report.tick)
            .map(|(_, key)| key.clone())
            .collect();
        for key in keys {
            self.press(&key);
        }

        if self.game.state() == LoopState::Running {
            self.autopilot.drive(&mut self.game);
        }

        if self.options.max_ticks.is_some_and(|max| report.tick >= max) {
            info!(ticks = report.tick, "Tick limit reached");
            self.game.stop();
        }
    }

    /// The per-system timing table, one line per system.
    pub fn timing_table(&self) -> Vec<String> {
        self.game.timings().format_timing_display().into_vec()
    }
}
