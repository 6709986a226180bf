//! This module contains the simulation state and its scheduling loop.

use std::time::{Duration, Instant};

use bevy_ecs::entity::Entity;
use bevy_ecs::event::{EventRegistry, Events};
use bevy_ecs::schedule::{common_conditions::resource_equals, ExecutorKind, IntoScheduleConfigs, Schedule};
use bevy_ecs::system::RunSystemOnce;
use bevy_ecs::world::World;
use glam::{IVec2, Vec2};
use tracing::{debug, info, warn};

use crate::config::GameConfig;
use crate::error::{GameResult, MapError};
use crate::events::{GameCommand, SimEvent};
use crate::formatter;
use crate::map::direction::Direction;
use crate::map::grid::{TileGrid, TileValue};
use crate::systems::{
    self, animation_system, collision_system, end_of_tick_system, ghost_system, mode_expiry_system, mode_sync_system,
    player_system, profile, render_system, DotCounter, Ghost, GhostBundle, LoopState, Mode, ModeState, Movable,
    PlayerBundle, PlayerLives, Position, RenderSnapshot, ScoreResource, SimClock, Spawn, SystemId, SystemTimings, Tempo,
};

/// The outcome of one logic tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickReport {
    /// Number of this tick since the session started, starting at 1.
    pub tick: u64,
    /// Events in the order they were raised.
    pub events: Vec<SimEvent>,
}

impl TickReport {
    pub fn contains(&self, event: &SimEvent) -> bool {
        self.events.contains(event)
    }
}

/// What one scheduling callback did. Either part, both or neither may be present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub tick: Option<TickReport>,
    pub render: Option<RenderSnapshot>,
}

/// Core simulation manager built on the Bevy ECS architecture.
///
/// The `World` holds the grid, the actors and every counter, the logic `Schedule`
/// runs one tick and the render `Schedule` one animation frame. Time is supplied by
/// the caller as a monotonic timestamp on each [`Game::frame`] call, so the loop is
/// fully deterministic under test.
pub struct Game {
    pub world: World,
    logic: Schedule,
    render: Schedule,
    config: GameConfig,
    player: Entity,
    ghosts: Vec<(Ghost, Entity)>,
    last_tick: Duration,
    last_frame: Duration,
    last_callback: Option<Duration>,
}

impl Game {
    /// Validates the configuration and builds a stopped session.
    ///
    /// # Errors
    ///
    /// [`MapError::BlockedSpawn`] when a spawn tile is outside the grid or a wall,
    /// [`MapError::InvalidConfig`] for zero rates or a non-positive speed.
    pub fn new(config: GameConfig) -> GameResult<Self> {
        Self::validate(&config)?;

        let (world, player, ghosts) = Self::build_world(&config);
        let mut game = Game {
            world,
            logic: Self::logic_schedule(),
            render: Self::render_schedule(),
            config,
            player,
            ghosts,
            last_tick: Duration::ZERO,
            last_frame: Duration::ZERO,
            last_callback: None,
        };
        game.refresh_snapshot();

        debug!(
            width = game.config.grid.width(),
            height = game.config.grid.height(),
            dots = game.dots(),
            ghosts = game.ghosts.len(),
            "Game initialized"
        );
        Ok(game)
    }

    fn validate(config: &GameConfig) -> GameResult<()> {
        if config.normal_tick_rate == 0 || config.scatter_tick_rate == 0 || config.frame_rate == 0 {
            return Err(MapError::InvalidConfig("tick and frame rates must be positive".into()).into());
        }
        if config.player_speed <= 0.0 || config.ghost_speed <= 0.0 {
            return Err(MapError::InvalidConfig("speeds must be positive".into()).into());
        }

        let spawns = std::iter::once(("player", config.player_spawn))
            .chain(config.ghosts.iter().map(|(ghost, tile)| (<&'static str>::from(*ghost), *tile)));
        for (actor, tile) in spawns {
            if !config.grid.is_passable(tile) {
                return Err(MapError::BlockedSpawn { actor, tile }.into());
            }
        }
        Ok(())
    }

    fn build_world(config: &GameConfig) -> (World, Entity, Vec<(Ghost, Entity)>) {
        let mut world = World::default();
        EventRegistry::register_event::<SimEvent>(&mut world);

        let grid = config.grid.clone();
        let dots = grid.count(TileValue::Dot) as u32;
        world.insert_resource(grid);
        world.insert_resource(config.clone());
        world.insert_resource(DotCounter::new(dots));
        world.insert_resource(ScoreResource::default());
        world.insert_resource(PlayerLives(config.starting_lives));
        world.insert_resource(ModeState::default());
        world.insert_resource(Tempo {
            tick_rate: config.normal_tick_rate,
        });
        world.insert_resource(SimClock::default());
        world.insert_resource(LoopState::Stopped);
        world.insert_resource(SystemTimings::default());
        world.insert_resource(RenderSnapshot::default());

        let player = world
            .spawn(PlayerBundle::new(Spawn {
                tile: config.player_spawn,
                direction: config.initial_direction,
                speed: config.player_speed,
            }))
            .id();

        let ghosts = config
            .ghosts
            .iter()
            .map(|&(ghost, tile)| {
                let spawn = Spawn {
                    tile,
                    direction: config.initial_direction,
                    speed: config.ghost_speed,
                };
                let mut entity = world.spawn(GhostBundle::new(ghost, spawn));
                if let Some(boost) = ghost.speed_boost() {
                    entity.insert(boost);
                }
                (ghost, entity.id())
            })
            .collect();

        (world, player, ghosts)
    }

    fn logic_schedule() -> Schedule {
        let mut schedule = Schedule::default();
        schedule.set_executor_kind(ExecutorKind::SingleThreaded);
        schedule.add_systems(
            (
                profile(SystemId::ModeExpiry, mode_expiry_system),
                profile(SystemId::Ghost, ghost_system),
                profile(SystemId::Player, player_system),
                profile(SystemId::Collision, collision_system),
                profile(SystemId::EndOfTick, end_of_tick_system),
                profile(SystemId::ModeSync, mode_sync_system),
            )
                .chain(),
        );
        schedule
    }

    fn render_schedule() -> Schedule {
        let mut schedule = Schedule::default();
        schedule.set_executor_kind(ExecutorKind::SingleThreaded);
        schedule.add_systems(
            (
                profile(SystemId::Animation, animation_system).run_if(resource_equals(LoopState::Running)),
                render_system,
            )
                .chain(),
        );
        schedule
    }

    /// Starts a fresh session at `now`: the grid, counters and actors are rebuilt
    /// from the configuration.
    pub fn start(&mut self, now: Duration) {
        self.stop();

        let (world, player, ghosts) = Self::build_world(&self.config);
        self.world = world;
        self.player = player;
        self.ghosts = ghosts;
        self.logic = Self::logic_schedule();
        self.render = Self::render_schedule();

        self.world.insert_resource(LoopState::Running);
        formatter::set_tick(0);
        self.last_tick = now;
        self.last_frame = now;
        self.last_callback = Some(now);
        self.refresh_snapshot();

        info!(dots = self.dots(), lives = self.lives(), "Game started");
    }

    /// Stops the loop and drops any pending Scatter expiry, restoring Normal.
    /// Until the next [`Game::start`], [`Game::frame`] returns `None`.
    pub fn stop(&mut self) {
        let was = self.state();
        self.world.insert_resource(LoopState::Stopped);
        self.settle_stopped();
        if !was.is_stopped() {
            info!(score = self.score(), ticks = self.clock().ticks, "Game stopped");
        }
    }

    fn settle_stopped(&mut self) {
        if self.world.resource::<ModeState>().is_scatter() {
            self.world.resource_mut::<ModeState>().cancel();
            debug!("Pending scatter expiry cancelled");
        }
        if let Err(error) = self.world.run_system_once(mode_sync_system) {
            warn!(%error, "Failed to restore mode defaults");
        }
    }

    pub fn pause(&mut self) {
        if self.state() == LoopState::Running {
            self.world.insert_resource(LoopState::Paused);
            info!(ticks = self.clock().ticks, "Paused");
        }
    }

    pub fn resume(&mut self) {
        if self.state() == LoopState::Paused {
            self.world.insert_resource(LoopState::Running);
            info!(ticks = self.clock().ticks, "Resumed");
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.state() {
            LoopState::Running => self.pause(),
            LoopState::Paused => self.resume(),
            LoopState::Stopped => {}
        }
    }

    /// Applies an input command. `now` is only used by [`GameCommand::Restart`].
    pub fn handle_command(&mut self, command: GameCommand, now: Duration) {
        match command {
            GameCommand::MovePlayer(direction) => self.steer(direction),
            GameCommand::TogglePause => self.toggle_pause(),
            GameCommand::Stop => self.stop(),
            GameCommand::Restart => self.start(now),
        }
    }

    /// Sets the player's intention.
    pub fn steer(&mut self, direction: Direction) {
        if let Some(mut movable) = self.world.get_mut::<Movable>(self.player) {
            systems::player::steer(&mut movable, direction);
        }
    }

    /// One scheduling callback at timestamp `now`.
    ///
    /// Simulated time advances by the time since the previous callback while Running.
    /// A logic tick runs if more than the current tick interval has passed since the
    /// last one, and a render frame if more than the frame interval has passed since
    /// the last frame.
    ///
    /// # Returns
    ///
    /// `None` once the loop is stopped, meaning the callback should not be re-armed.
    pub fn frame(&mut self, now: Duration) -> Option<Frame> {
        let state = self.state();
        if state.is_stopped() {
            return None;
        }

        let since_callback = self.last_callback.map_or(Duration::ZERO, |last| now.saturating_sub(last));
        self.last_callback = Some(now);
        if state.is_running() {
            self.advance_clock(since_callback);
        }

        let mut frame = Frame::default();
        let tick_interval = self.world.resource::<Tempo>().interval();
        if state.is_running() && now.saturating_sub(self.last_tick) > tick_interval {
            frame.tick = self.tick();
            self.last_tick = now;
        }

        if now.saturating_sub(self.last_frame) > self.config.frame_interval() {
            self.render.run(&mut self.world);
            self.last_frame = now;
            frame.render = Some(self.world.resource::<RenderSnapshot>().clone());
        }

        Some(frame)
    }

    /// Moves simulated time forward without ticking.
    pub fn advance_clock(&mut self, by: Duration) {
        self.world.resource_mut::<SimClock>().elapsed += by;
    }

    /// Runs exactly one logic tick.
    ///
    /// # Returns
    ///
    /// `None` unless the loop is Running.
    pub fn tick(&mut self) -> Option<TickReport> {
        if !self.state().is_running() {
            return None;
        }

        let tick = {
            let mut clock = self.world.resource_mut::<SimClock>();
            clock.ticks += 1;
            clock.ticks
        };
        formatter::set_tick(tick);

        let start = Instant::now();
        self.logic.run(&mut self.world);
        let total = start.elapsed();

        let budget = self.world.resource::<Tempo>().interval();
        let timings = self.world.resource::<SystemTimings>();
        timings.add_timing(SystemId::Total, total, tick);
        if total > budget {
            let systems = timings
                .slowest_systems()
                .iter()
                .map(|(id, duration)| format!("{id} ({duration:.2?})"))
                .collect::<Vec<String>>()
                .join(", ");
            warn!(total = ?total, budget = ?budget, tick, systems, "Tick took longer than its interval");
        }

        let events: Vec<SimEvent> = self.world.resource_mut::<Events<SimEvent>>().drain().collect();
        if self.state().is_stopped() {
            self.settle_stopped();
        }

        Some(TickReport { tick, events })
    }

    fn refresh_snapshot(&mut self) {
        if let Err(error) = self.world.run_system_once(render_system) {
            warn!(%error, "Failed to capture render snapshot");
        }
    }

    /// The drawable state right now, without advancing animations.
    pub fn snapshot(&mut self) -> RenderSnapshot {
        self.refresh_snapshot();
        self.world.resource::<RenderSnapshot>().clone()
    }

    pub fn state(&self) -> LoopState {
        *self.world.resource::<LoopState>()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &TileGrid {
        self.world.resource::<TileGrid>()
    }

    pub fn score(&self) -> u32 {
        self.world.resource::<ScoreResource>().0
    }

    pub fn dots(&self) -> u32 {
        self.world.resource::<DotCounter>().remaining
    }

    pub fn lives(&self) -> u8 {
        self.world.resource::<PlayerLives>().0
    }

    pub fn mode(&self) -> Mode {
        self.world.resource::<ModeState>().mode()
    }

    pub fn clock(&self) -> SimClock {
        *self.world.resource::<SimClock>()
    }

    pub fn tick_rate(&self) -> u32 {
        self.world.resource::<Tempo>().tick_rate
    }

    pub fn timings(&self) -> &SystemTimings {
        self.world.resource::<SystemTimings>()
    }

    pub fn player_entity(&self) -> Entity {
        self.player
    }

    pub fn ghost_entity(&self, ghost: Ghost) -> Option<Entity> {
        self.ghosts.iter().find(|(g, _)| *g == ghost).map(|(_, entity)| *entity)
    }

    pub fn player_position(&self) -> Vec2 {
        self.world.get::<Position>(self.player).map_or(Vec2::ZERO, |position| position.0)
    }

    pub fn ghost_position(&self, ghost: Ghost) -> Option<Vec2> {
        self.ghost_entity(ghost)
            .and_then(|entity| self.world.get::<Position>(entity))
            .map(|position| position.0)
    }

    /// Places an actor on a tile, keeping its movement state.
    pub fn place(&mut self, entity: Entity, tile: IVec2) {
        if let Some(mut position) = self.world.get_mut::<Position>(entity) {
            *position = Position::at_tile(tile);
        }
    }
}
