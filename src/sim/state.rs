//! Entity store
//!
//! Owns every entity for the lifetime of a run. Nothing is added or removed
//! after population; only per-entity state changes.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId, EntityKind};
use super::spawn::{RngState, Spawner};
use crate::settings::{Activation, Settings};
use crate::{Rgb, Viewport};

/// Complete simulation state (deterministic given seed and clock)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub viewport: Viewport,
    /// Run seed for reproducibility
    pub rng_state: RngState,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub activation: Activation,
    /// Creation order is iteration order
    entities: Vec<Entity>,
    next_id: u32,
}

impl World {
    pub fn new(viewport: Viewport, activation: Activation, seed: u64) -> Self {
        Self {
            viewport,
            rng_state: RngState::new(seed),
            time_ticks: 0,
            activation,
            entities: Vec::new(),
            next_id: 1,
        }
    }

    /// World of `count` bouncing circles
    pub fn plain(settings: &Settings, seed: u64, count: u32) -> Self {
        let mut world = Self::new(settings.viewport(), settings.activation, seed);
        let mut spawner = Spawner::new(&world.rng_state, world.viewport);
        for _ in 0..count {
            let id = world.next_entity_id();
            world.entities.push(spawner.plain(id));
        }
        log::info!("Spawned {} circles (seed {})", count, seed);
        world
    }

    /// World of predators followed by prey
    pub fn predator_prey(settings: &Settings, seed: u64, predators: u32, prey: u32) -> Self {
        let mut world = Self::new(settings.viewport(), settings.activation, seed);
        let mut spawner = Spawner::new(&world.rng_state, world.viewport);
        for _ in 0..predators {
            let id = world.next_entity_id();
            world.entities.push(spawner.predator(id));
        }
        for _ in 0..prey {
            let id = world.next_entity_id();
            world.entities.push(spawner.prey(id));
        }
        log::info!("Spawned {} predators and {} prey (seed {})", predators, prey, seed);
        world
    }

    /// Allocate a new entity ID
    fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Place an entity explicitly (scenarios and tests)
    pub fn insert(&mut self, pos: DVec2, vel: DVec2, radius: u32, color: Rgb, kind: EntityKind) -> EntityId {
        let id = self.next_entity_id();
        self.entities.push(Entity::new(id, pos, vel, radius, color, kind));
        id
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        // Ids are dense and assigned in push order
        let index = (id.0 as usize).checked_sub(1)?;
        self.entities.get(index).filter(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        let index = (id.0 as usize).checked_sub(1)?;
        self.entities.get_mut(index).filter(|e| e.id == id)
    }

    /// How many entities currently take part in the simulation
    pub fn active_count(&self) -> usize {
        self.activation.limit(self.time_ticks, self.entities.len())
    }

    /// Entities taking part in simulation and drawing, in store order
    pub fn active(&self) -> &[Entity] {
        &self.entities[..self.active_count()]
    }

    pub fn active_mut(&mut self) -> &mut [Entity] {
        let count = self.active_count();
        &mut self.entities[..count]
    }
}
