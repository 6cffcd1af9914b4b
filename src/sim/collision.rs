//! Pairwise circle collision detection and response
//!
//! Every unordered pair of active entities is tested once per tick, in store
//! order, each pair seeing the positions left by the pairs before it. n is
//! small (tens of entities) so the O(n²) sweep is fine.

use std::str::FromStr;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId};

/// How overlapping circles are pushed apart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollisionPolicy {
    /// Push both circles apart along the centre line by half the overlap each,
    /// then exchange velocities
    #[default]
    Separate,
    /// Exchange velocities only; circles may stay interpenetrating for a few ticks
    Swap,
    /// Circles pass through each other; contacts are counted, nothing else
    Off,
}

impl CollisionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollisionPolicy::Separate => "separate",
            CollisionPolicy::Swap => "swap",
            CollisionPolicy::Off => "off",
        }
    }
}

impl FromStr for CollisionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "separate" | "separation" => Ok(CollisionPolicy::Separate),
            "swap" => Ok(CollisionPolicy::Swap),
            "off" | "none" | "pass-through" => Ok(CollisionPolicy::Off),
            other => Err(format!(
                "unknown collision policy `{other}` (expected separate, swap or off)"
            )),
        }
    }
}

/// Result of a collision check
#[derive(Debug, Clone, Copy)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Unit vector from the first centre toward the second
    pub normal: DVec2,
    /// Centre distance
    pub distance: f64,
    /// Overlap depth (sum of radii minus distance)
    pub penetration: f64,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: DVec2::ZERO,
            distance: 0.0,
            penetration: 0.0,
        }
    }
}

/// Check collision between two circles
///
/// Concentric circles have no centre line; they are separated along +x.
pub fn circle_circle_collision(a_pos: DVec2, a_radius: f64, b_pos: DVec2, b_radius: f64) -> CollisionResult {
    let delta = b_pos - a_pos;
    let distance = delta.length();
    let reach = a_radius + b_radius;

    if distance >= reach {
        return CollisionResult::miss();
    }

    CollisionResult {
        hit: true,
        normal: delta.try_normalize().unwrap_or(DVec2::X),
        distance,
        penetration: reach - distance,
    }
}

/// Move both circles apart so they just touch
pub fn separate(a: &mut Entity, b: &mut Entity, hit: &CollisionResult) {
    let push = hit.normal * (hit.penetration / 2.0);
    a.pos -= push;
    b.pos += push;
}

#[inline]
pub fn swap_velocities(a: &mut Entity, b: &mut Entity) {
    std::mem::swap(&mut a.vel, &mut b.vel);
}

/// A predator touched a visible prey
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Predation {
    pub predator: EntityId,
    pub prey: EntityId,
    pub at_ms: u64,
}

/// Hide the prey if exactly one side is a predator and the other a visible prey
fn apply_predation(a: &mut Entity, b: &mut Entity, now_ms: u64) -> Option<Predation> {
    let (predator, prey) = if a.kind.is_predator() && b.kind.is_prey() {
        (a.id, b)
    } else if b.kind.is_predator() && a.kind.is_prey() {
        (b.id, a)
    } else {
        return None;
    };
    let prey_id = prey.id;
    let hidden = prey.prey_mut().is_some_and(|state| state.hide(now_ms));
    hidden.then_some(Predation {
        predator,
        prey: prey_id,
        at_ms: now_ms,
    })
}

/// Outcome of one collision pass
#[derive(Debug, Clone, Default)]
pub struct CollisionReport {
    /// Overlapping pairs found
    pub contacts: usize,
    pub predations: Vec<Predation>,
}

/// Detect and resolve every overlapping pair among `entities`
pub fn resolve_collisions(entities: &mut [Entity], policy: CollisionPolicy, now_ms: u64) -> CollisionReport {
    let mut report = CollisionReport::default();

    for j in 1..entities.len() {
        let (head, tail) = entities.split_at_mut(j);
        let b = &mut tail[0];
        for a in head.iter_mut() {
            let hit = circle_circle_collision(a.pos, a.radius_f64(), b.pos, b.radius_f64());
            if !hit.hit {
                continue;
            }
            report.contacts += 1;
            log::trace!(
                "Contact {:?} <-> {:?}: distance {:.2}, overlap {:.2}",
                a.id,
                b.id,
                hit.distance,
                hit.penetration
            );

            match policy {
                CollisionPolicy::Off => continue,
                CollisionPolicy::Separate => {
                    separate(a, b, &hit);
                    swap_velocities(a, b);
                }
                CollisionPolicy::Swap => swap_velocities(a, b),
            }

            if let Some(predation) = apply_predation(a, b, now_ms) {
                log::debug!("{:?} ate {:?} at {} ms", predation.predator, predation.prey, now_ms);
                report.predations.push(predation);
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rgb;
    use crate::sim::entity::{EntityKind, Visibility};

    fn entity(id: u32, x: f64, y: f64, vx: f64, radius: u32, kind: EntityKind) -> Entity {
        Entity::new(
            EntityId(id),
            DVec2::new(x, y),
            DVec2::new(vx, 0.0),
            radius,
            Rgb::default(),
            kind,
        )
    }

    #[test]
    fn test_head_on_overlap_is_separated() {
        let mut entities = vec![
            entity(1, 100.0, 100.0, 1.0, 10, EntityKind::Plain),
            entity(2, 115.0, 100.0, -1.0, 10, EntityKind::Plain),
        ];

        let report = resolve_collisions(&mut entities, CollisionPolicy::Separate, 0);
        assert_eq!(report.contacts, 1);

        let distance = entities[0].pos.distance(entities[1].pos);
        assert!(distance >= 20.0 - 1e-9, "distance after separation: {distance}");
        assert_eq!(entities[0].vel, DVec2::new(-1.0, 0.0));
        assert_eq!(entities[1].vel, DVec2::new(1.0, 0.0));
    }

    #[test]
    fn test_swap_leaves_positions() {
        let mut entities = vec![
            entity(1, 100.0, 100.0, 1.0, 10, EntityKind::Plain),
            entity(2, 115.0, 100.0, -1.0, 10, EntityKind::Plain),
        ];

        resolve_collisions(&mut entities, CollisionPolicy::Swap, 0);
        assert_eq!(entities[0].pos, DVec2::new(100.0, 100.0));
        assert_eq!(entities[1].pos, DVec2::new(115.0, 100.0));
        assert_eq!(entities[0].vel.x, -1.0);
        assert_eq!(entities[1].vel.x, 1.0);
    }

    #[test]
    fn test_off_keeps_motion() {
        let mut entities = vec![
            entity(1, 100.0, 100.0, 1.0, 10, EntityKind::Plain),
            entity(2, 115.0, 100.0, -1.0, 10, EntityKind::Plain),
        ];

        let report = resolve_collisions(&mut entities, CollisionPolicy::Off, 0);
        assert_eq!(report.contacts, 1);
        assert_eq!(entities[0].vel.x, 1.0);
        assert_eq!(entities[1].pos.x, 115.0);
    }

    #[test]
    fn test_off_never_hides_prey() {
        let mut entities = vec![
            entity(1, 50.0, 50.0, 0.0, 15, EntityKind::predator()),
            entity(2, 60.0, 55.0, 0.0, 10, EntityKind::prey()),
        ];

        let report = resolve_collisions(&mut entities, CollisionPolicy::Off, 100);
        assert_eq!(report.contacts, 1);
        assert!(report.predations.is_empty());
        assert!(entities[1].prey().unwrap().is_visible());
    }

    #[test]
    fn test_concentric_circles_split_along_x() {
        let mut entities = vec![
            entity(1, 50.0, 50.0, 0.0, 10, EntityKind::Plain),
            entity(2, 50.0, 50.0, 0.0, 10, EntityKind::Plain),
        ];

        resolve_collisions(&mut entities, CollisionPolicy::Separate, 0);
        assert_eq!(entities[0].pos, DVec2::new(40.0, 50.0));
        assert_eq!(entities[1].pos, DVec2::new(60.0, 50.0));
        assert!(entities.iter().all(|e| e.pos.is_finite()));
    }

    #[test]
    fn test_touching_is_not_a_collision() {
        let hit = circle_circle_collision(DVec2::ZERO, 10.0, DVec2::new(20.0, 0.0), 10.0);
        assert!(!hit.hit);
    }

    #[test]
    fn test_predator_hides_visible_prey() {
        let mut entities = vec![
            Entity::new(
                EntityId(1),
                DVec2::new(50.0, 50.0),
                DVec2::ZERO,
                15,
                Rgb::new(255, 255, 0),
                EntityKind::predator(),
            ),
            Entity::new(
                EntityId(2),
                DVec2::new(60.0, 55.0),
                DVec2::ZERO,
                10,
                Rgb::new(0, 128, 255),
                EntityKind::prey(),
            ),
        ];

        let report = resolve_collisions(&mut entities, CollisionPolicy::Separate, 4_242);
        assert_eq!(
            report.predations,
            vec![Predation {
                predator: EntityId(1),
                prey: EntityId(2),
                at_ms: 4_242
            }]
        );
        let prey = entities[1].prey().unwrap();
        assert_eq!(prey.visibility, Visibility::Hidden { since_ms: 4_242 });
    }

    #[test]
    fn test_prey_first_in_pair_is_still_eaten() {
        let mut entities = vec![
            entity(1, 60.0, 55.0, 0.0, 10, EntityKind::prey()),
            entity(2, 50.0, 50.0, 0.0, 15, EntityKind::predator()),
        ];

        let report = resolve_collisions(&mut entities, CollisionPolicy::Swap, 10);
        assert_eq!(report.predations.len(), 1);
        assert_eq!(report.predations[0].prey, EntityId(1));
        assert!(!entities[0].prey().unwrap().is_visible());
    }

    #[test]
    fn test_hidden_prey_keeps_original_timestamp() {
        let mut entities = vec![
            entity(1, 50.0, 50.0, 0.0, 15, EntityKind::predator()),
            entity(2, 60.0, 55.0, 0.0, 10, EntityKind::prey()),
        ];
        resolve_collisions(&mut entities, CollisionPolicy::Swap, 100);
        let report = resolve_collisions(&mut entities, CollisionPolicy::Swap, 200);
        assert!(report.predations.is_empty());
        assert_eq!(entities[1].prey().unwrap().invisible_since(), Some(100));
    }

    #[test]
    fn test_same_kind_contacts_do_not_hide() {
        let mut entities = vec![
            entity(1, 50.0, 50.0, 0.0, 10, EntityKind::prey()),
            entity(2, 55.0, 50.0, 0.0, 10, EntityKind::prey()),
        ];
        let report = resolve_collisions(&mut entities, CollisionPolicy::Separate, 1);
        assert_eq!(report.contacts, 1);
        assert!(report.predations.is_empty());
        assert!(entities.iter().all(|e| e.prey().unwrap().is_visible()));
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("swap".parse::<CollisionPolicy>(), Ok(CollisionPolicy::Swap));
        assert_eq!("Separate".parse::<CollisionPolicy>(), Ok(CollisionPolicy::Separate));
        assert_eq!("off".parse::<CollisionPolicy>(), Ok(CollisionPolicy::Off));
        assert_eq!(CollisionPolicy::Off.as_str(), "off");
        assert!("bounce".parse::<CollisionPolicy>().is_err());
    }
}
