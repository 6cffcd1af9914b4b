//! Seeded generation of initial entity attributes

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId, EntityKind};
use crate::consts::*;
use crate::{Rgb, Viewport};

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Rolls randomized entities inside a viewport
pub struct Spawner {
    rng: Pcg32,
    viewport: Viewport,
}

impl Spawner {
    pub fn new(state: &RngState, viewport: Viewport) -> Self {
        Self {
            rng: state.to_rng(),
            viewport,
        }
    }

    /// Bouncing circle: velocity 1..=5 per axis, random colour
    pub fn plain(&mut self, id: EntityId) -> Entity {
        let radius = self.radius();
        let pos = self.center(radius);
        let vel = self.velocity(1, 5);
        let color = self.color();
        Entity::new(id, pos, vel, radius, color, EntityKind::Plain)
    }

    /// Predator: velocity 1..=10 per axis, always yellow
    pub fn predator(&mut self, id: EntityId) -> Entity {
        let radius = self.radius();
        let pos = self.center(radius);
        let vel = self.velocity(1, 10);
        Entity::new(id, pos, vel, radius, PREDATOR_COLOR, EntityKind::predator())
    }

    /// Prey: drifts at 0..=1 per axis, random colour
    pub fn prey(&mut self, id: EntityId) -> Entity {
        let radius = self.radius();
        let pos = self.center(radius);
        let vel = self.velocity(0, 1);
        let color = self.color();
        Entity::new(id, pos, vel, radius, color, EntityKind::prey())
    }

    fn radius(&mut self) -> u32 {
        self.rng.random_range(MIN_RADIUS..=MAX_RADIUS)
    }

    /// Integer centre keeping the whole circle inside the viewport
    fn center(&mut self, radius: u32) -> DVec2 {
        let x = self.axis(radius, self.viewport.width);
        let y = self.axis(radius, self.viewport.height);
        DVec2::new(x as f64, y as f64)
    }

    fn axis(&mut self, radius: u32, extent: u32) -> u32 {
        let high = extent.saturating_sub(radius);
        if high <= radius {
            // Viewport too small for a free choice; settings validation keeps us out of here
            return extent / 2;
        }
        self.rng.random_range(radius..high)
    }

    fn velocity(&mut self, min: i32, max: i32) -> DVec2 {
        let vx = self.rng.random_range(min..=max);
        let vy = self.rng.random_range(min..=max);
        DVec2::new(vx as f64, vy as f64)
    }

    fn color(&mut self) -> Rgb {
        Rgb::new(self.rng.random(), self.rng.random(), self.rng.random())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_entities() {
        let viewport = Viewport::default();
        let mut a = Spawner::new(&RngState::new(7), viewport);
        let mut b = Spawner::new(&RngState::new(7), viewport);
        for i in 1..=20 {
            assert_eq!(a.prey(EntityId(i)), b.prey(EntityId(i)));
        }
    }

    #[test]
    fn test_spawn_ranges() {
        let viewport = Viewport::default();
        let mut spawner = Spawner::new(&RngState::new(12345), viewport);

        for i in 0..500 {
            let plain = spawner.plain(EntityId(i));
            assert!((MIN_RADIUS..=MAX_RADIUS).contains(&plain.radius()));
            assert!(viewport.contains_circle(plain.pos, plain.radius_f64()));
            assert!((1.0..=5.0).contains(&plain.vel.x) && (1.0..=5.0).contains(&plain.vel.y));
            assert_eq!(plain.pos, plain.pos.round(), "spawn positions are whole pixels");

            let predator = spawner.predator(EntityId(i));
            assert_eq!(predator.color, PREDATOR_COLOR);
            assert!((1.0..=10.0).contains(&predator.vel.x));
            assert!(predator.kind.is_predator());

            let prey = spawner.prey(EntityId(i));
            assert!((0.0..=1.0).contains(&prey.vel.x) && (0.0..=1.0).contains(&prey.vel.y));
            assert!(prey.prey().is_some_and(|p| p.is_visible()));
            assert!(viewport.contains_circle(prey.pos, prey.radius_f64()));
        }
    }
}
