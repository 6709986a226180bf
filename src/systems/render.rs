use bevy_ecs::query::Has;
use bevy_ecs::resource::Resource;
use bevy_ecs::system::{Query, Res, ResMut};
use glam::Vec2;

use crate::map::direction::Direction;
use crate::map::grid::TileGrid;
use crate::systems::components::{
    Animation, DotCounter, Ghost, ModeTag, Movable, PlayerControlled, PlayerLives, Position, ScoreResource,
};
use crate::systems::mode::{Mode, ModeState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorKind {
    Player,
    Ghost(Ghost),
}

/// Everything needed to draw one actor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActorSnapshot {
    pub kind: ActorKind,
    /// Top-left pixel position.
    pub position: Vec2,
    pub direction: Option<Direction>,
    pub mode: Mode,
    /// Sprite-sheet frame index.
    pub frame: u8,
}

/// The drawable state of the world after a render frame, handed to the renderer.
#[derive(Resource, Debug, Clone, PartialEq, Default)]
pub struct RenderSnapshot {
    /// Player first, then pursuers in update order.
    pub actors: Vec<ActorSnapshot>,
    /// Row-major tile codes.
    pub tiles: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub score: u32,
    pub dots: u32,
    pub mode: Mode,
    pub lives: u8,
}

impl RenderSnapshot {
    pub fn player(&self) -> Option<&ActorSnapshot> {
        self.actors.iter().find(|actor| actor.kind == ActorKind::Player)
    }

    pub fn ghost(&self, ghost: Ghost) -> Option<&ActorSnapshot> {
        self.actors.iter().find(|actor| actor.kind == ActorKind::Ghost(ghost))
    }
}

#[allow(clippy::too_many_arguments)]
pub fn render_system(
    grid: Res<TileGrid>,
    score: Res<ScoreResource>,
    dots: Res<DotCounter>,
    mode: Res<ModeState>,
    lives: Res<PlayerLives>,
    actors: Query<(&Position, &Movable, &ModeTag, &Animation, Option<&Ghost>, Has<PlayerControlled>)>,
    mut snapshot: ResMut<RenderSnapshot>,
) {
    let mut drawn: Vec<ActorSnapshot> = actors
        .iter()
        .filter_map(|(position, movable, tag, animation, ghost, player)| {
            let kind = match (player, ghost) {
                (true, _) => ActorKind::Player,
                (false, Some(ghost)) => ActorKind::Ghost(*ghost),
                (false, None) => return None,
            };
            Some(ActorSnapshot {
                kind,
                position: position.0,
                direction: movable.direction,
                mode: tag.0,
                frame: animation.frame,
            })
        })
        .collect();
    drawn.sort_by_key(|actor| match actor.kind {
        ActorKind::Player => None,
        ActorKind::Ghost(ghost) => Some(ghost),
    });

    *snapshot = RenderSnapshot {
        actors: drawn,
        tiles: grid.codes(),
        width: grid.width(),
        height: grid.height(),
        score: score.0,
        dots: dots.remaining,
        mode: mode.mode(),
        lives: lives.0,
    };
}
