//! The Entity-Component-System (ECS) module.
//!
//! This module contains the components, resources and systems that make up one
//! logic tick and one render frame.

pub mod animation;
pub mod collision;
pub mod components;
pub mod ghost;
pub mod mode;
pub mod movement;
pub mod player;
pub mod profiling;
pub mod render;
pub mod state;

pub use self::animation::animation_system;
pub use self::collision::collision_system;
pub use self::components::*;
pub use self::ghost::ghost_system;
pub use self::mode::{mode_expiry_system, mode_sync_system, Mode, ModeState};
pub use self::player::player_system;
pub use self::profiling::{profile, SystemId, SystemTimings};
pub use self::render::{render_system, ActorKind, ActorSnapshot, RenderSnapshot};
pub use self::state::{end_of_tick_system, LoopState};
