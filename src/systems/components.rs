use std::time::Duration;

use bevy_ecs::{bundle::Bundle, component::Component, resource::Resource};
use glam::{IVec2, Vec2};
use strum_macros::{AsRefStr, EnumIter, IntoStaticStr};

use crate::constants::{self, animation, speed, SPRITE_SIZE};
use crate::map::direction::Direction;
use crate::map::grid::tile_to_pixel;
use crate::systems::mode::Mode;

/// A tag component for the entity controlled by the player.
#[derive(Default, Component, Debug, Clone, Copy)]
pub struct PlayerControlled;

/// The four pursuers. The declaration order is the order they are updated in
/// every tick, which keeps traces reproducible.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, AsRefStr, IntoStaticStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Ghost {
    Inky,
    Pinky,
    Clyde,
    Blinky,
}

impl Ghost {
    /// Default spawn tile on the standard board.
    pub const fn spawn_tile(self) -> IVec2 {
        match self {
            Ghost::Inky => constants::spawn::INKY,
            Ghost::Pinky => constants::spawn::PINKY,
            Ghost::Clyde => constants::spawn::CLYDE,
            Ghost::Blinky => constants::spawn::BLINKY,
        }
    }

    /// The targeting rule each ghost follows.
    pub const fn targeting_rule(self) -> TargetingRule {
        match self {
            Ghost::Pinky => TargetingRule::Ambush {
                corner: constants::SCATTER_CORNER,
            },
            Ghost::Inky | Ghost::Clyde | Ghost::Blinky => TargetingRule::Chase,
        }
    }

    /// Only Blinky speeds up once half the dots are gone.
    pub const fn speed_boost(self) -> Option<SpeedBoost> {
        match self {
            Ghost::Blinky => Some(SpeedBoost::new(0.5, speed::BOOST_MULTIPLIER)),
            _ => None,
        }
    }
}

/// How a pursuer picks the tile it paths toward.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetingRule {
    /// Heads for the player's tile. Holds its last intention while scattering.
    Chase,
    /// Aims `2 × speed` tiles ahead of the player along the player's intention,
    /// and heads for `corner` while scattering.
    Ambush { corner: IVec2 },
}

/// A one-shot speed increase applied when the remaining dots drop to a fraction
/// of the initial count.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct SpeedBoost {
    /// Fraction of the initial dots that must remain at most for the boost to apply.
    pub threshold: f32,
    pub multiplier: f32,
    pub applied: bool,
}

impl SpeedBoost {
    pub const fn new(threshold: f32, multiplier: f32) -> Self {
        Self {
            threshold,
            multiplier,
            applied: false,
        }
    }
}

/// Continuous pixel position of an actor's top-left corner.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Position(pub Vec2);

impl Position {
    pub fn at_tile(tile: IVec2) -> Self {
        Self(tile_to_pixel(tile))
    }
}

/// Movement state of an actor: speed in pixels per tick, the committed direction
/// and the direction it would like to turn to.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Movable {
    pub speed: f32,
    pub direction: Option<Direction>,
    pub intention: Option<Direction>,
}

impl Movable {
    pub fn new(speed: f32, direction: Direction) -> Self {
        Self {
            speed,
            direction: Some(direction),
            intention: Some(direction),
        }
    }
}

/// Where an actor starts, and where it returns to when reset.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Spawn {
    pub tile: IVec2,
    pub direction: Direction,
    pub speed: f32,
}

impl Spawn {
    pub fn position(&self) -> Position {
        Position::at_tile(self.tile)
    }

    pub fn movable(&self) -> Movable {
        Movable::new(self.speed, self.direction)
    }
}

/// The mode an actor is drawn and treated in.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModeTag(pub Mode);

/// Axis-aligned square collision box anchored at the actor's position.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub size: f32,
}

impl Collider {
    /// Inclusive overlap test: boxes that merely touch still collide.
    pub fn overlaps(&self, a: Vec2, other: &Collider, b: Vec2) -> bool {
        let reach = self.size.max(other.size);
        (a.x - b.x).abs() <= reach && (a.y - b.y).abs() <= reach
    }
}

impl Default for Collider {
    fn default() -> Self {
        Self {
            size: SPRITE_SIZE as f32,
        }
    }
}

/// Sprite-sheet animation state, advanced once per render frame.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Animation {
    /// Render frames between two animation steps.
    pub delay: u8,
    pub count: u8,
    pub frame_index: usize,
    /// The sprite-sheet frame currently shown.
    pub frame: u8,
}

impl Default for Animation {
    fn default() -> Self {
        Self::with_delay(animation::DEFAULT_DELAY)
    }
}

impl Animation {
    pub fn with_delay(delay: u8) -> Self {
        Self {
            delay,
            count: 0,
            frame_index: 0,
            frame: 0,
        }
    }
}

#[derive(Bundle)]
pub struct PlayerBundle {
    pub player: PlayerControlled,
    pub position: Position,
    pub movable: Movable,
    pub spawn: Spawn,
    pub mode: ModeTag,
    pub collider: Collider,
    pub animation: Animation,
}

impl PlayerBundle {
    pub fn new(spawn: Spawn) -> Self {
        Self {
            player: PlayerControlled,
            position: spawn.position(),
            movable: spawn.movable(),
            spawn,
            mode: ModeTag::default(),
            collider: Collider::default(),
            animation: Animation::default(),
        }
    }
}

#[derive(Bundle)]
pub struct GhostBundle {
    pub ghost: Ghost,
    pub rule: TargetingRule,
    pub position: Position,
    pub movable: Movable,
    pub spawn: Spawn,
    pub mode: ModeTag,
    pub collider: Collider,
    pub animation: Animation,
}

impl GhostBundle {
    pub fn new(ghost: Ghost, spawn: Spawn) -> Self {
        Self {
            ghost,
            rule: ghost.targeting_rule(),
            position: spawn.position(),
            movable: spawn.movable(),
            spawn,
            mode: ModeTag::default(),
            collider: Collider::default(),
            animation: Animation::default(),
        }
    }
}

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResource(pub u32);

/// Remaining and initial dot counts. `remaining` never increases during a session.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DotCounter {
    pub remaining: u32,
    pub initial: u32,
}

impl DotCounter {
    pub fn new(initial: u32) -> Self {
        Self {
            remaining: initial,
            initial,
        }
    }
}

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerLives(pub u8);

/// The current logic tick rate, in ticks per second.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tempo {
    pub tick_rate: u32,
}

impl Tempo {
    pub fn interval(&self) -> Duration {
        constants::interval(self.tick_rate)
    }
}

/// Simulated time: advances only while the loop is running, never while paused.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SimClock {
    pub elapsed: Duration,
    pub ticks: u64,
}
