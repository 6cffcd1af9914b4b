//! One simulation step
//!
//! Collision, then motion, then behaviour, each over the active entities only.

use super::behavior;
use super::collision::{self, Predation};
use super::motion;
use super::state::World;
use crate::settings::Settings;

/// What happened during one tick
#[derive(Debug, Clone, Default)]
pub struct TickSummary {
    pub tick: u64,
    /// Entities that took part this tick
    pub active: usize,
    pub contacts: usize,
    pub wall_hits: usize,
    pub predations: Vec<Predation>,
    pub restored: usize,
}

/// Advance the world by one tick at wall-clock time `now_ms`
pub fn tick(world: &mut World, settings: &Settings, now_ms: u64) -> TickSummary {
    world.time_ticks += 1;

    let viewport = world.viewport;
    let entities = world.active_mut();
    let active = entities.len();

    let collisions = collision::resolve_collisions(entities, settings.collision_policy, now_ms);
    let wall_hits = motion::integrate(entities, viewport);
    let behavior = behavior::update(entities, now_ms, settings.invisibility_ms);

    TickSummary {
        tick: world.time_ticks,
        active,
        contacts: collisions.contacts,
        wall_hits,
        predations: collisions.predations,
        restored: behavior.restored.len(),
    }
}
