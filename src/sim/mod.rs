//! Deterministic simulation module
//!
//! All entity logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Time enters only as the tick timestamp passed in by the caller
//! - Stable iteration order (store order, by entity ID)
//! - No rendering or platform dependencies

pub mod behavior;
pub mod collision;
pub mod entity;
pub mod motion;
pub mod spawn;
pub mod state;
pub mod tick;

pub use behavior::EyePolicy;
pub use collision::{CollisionPolicy, CollisionReport, CollisionResult, Predation, circle_circle_collision, resolve_collisions};
pub use entity::{Entity, EntityId, EntityKind, EyeDirection, EyeSweep, Mouth, MouthPhase, Prey, Visibility};
pub use spawn::{RngState, Spawner};
pub use state::World;
pub use tick::{TickSummary, tick};
