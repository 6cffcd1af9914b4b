//! Kinematic integration with wall reflection
//!
//! position += velocity each tick, then each axis is clamped so the whole
//! circle stays inside the viewport. A wall contact points that velocity
//! component back inside; there is no restitution loss.

use super::entity::Entity;
use crate::Viewport;

/// Advance every entity by one tick. Returns how many hit a wall.
pub fn integrate(entities: &mut [Entity], viewport: Viewport) -> usize {
    entities
        .iter_mut()
        .map(|entity| advance(entity, viewport))
        .filter(|&bounced| bounced)
        .count()
}

/// Move one entity and reflect it off the viewport edges
pub fn advance(entity: &mut Entity, viewport: Viewport) -> bool {
    entity.pos += entity.vel;
    let radius = entity.radius_f64();
    let bounced_x = reflect_axis(&mut entity.pos.x, &mut entity.vel.x, radius, viewport.width as f64);
    let bounced_y = reflect_axis(&mut entity.pos.y, &mut entity.vel.y, radius, viewport.height as f64);
    bounced_x || bounced_y
}

/// Clamp one axis to `[radius, extent - radius]`
#[inline]
fn reflect_axis(pos: &mut f64, vel: &mut f64, radius: f64, extent: f64) -> bool {
    if *pos - radius < 0.0 {
        *pos = radius;
        *vel = vel.abs();
        true
    } else if *pos + radius > extent {
        *pos = extent - radius;
        *vel = -vel.abs();
        true
    } else {
        false
    }
}
