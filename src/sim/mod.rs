//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One synchronous pass per frame
//! - Seeded RNG only
//! - Stable iteration order (registry order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod patrol;
pub mod registry;
pub mod shield;
pub mod state;
pub mod tick;

pub use collision::{in_bounds, is_colliding, resolve_collisions};
pub use entity::{Entity, EntityId, EntityKind, FrameContext, FrameOutput, Invader, Player};
pub use patrol::PatrolController;
pub use registry::Registry;
pub use shield::{SHIELD_PATTERN, Shield};
pub use state::{GameEvent, GamePhase, GameState, Outcome};
pub use tick::{TickInput, tick};
