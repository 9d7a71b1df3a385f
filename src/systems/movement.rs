//! Velocity integration.
//!
//! [`movement`] applies each body's enabled acceleration forces to its
//! velocity and then moves it by `velocity * delta` (semi-implicit Euler).
//! [`clamp_to_world_bounds`] keeps marked bodies inside the world.
use bevy_ecs::prelude::*;

use crate::components::boxcollider::BoxCollider;
use crate::components::collideworldbounds::CollideWorldBounds;
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::resources::worldbounds::WorldBounds;
use crate::resources::worldtime::WorldTime;

pub fn movement(mut query: Query<(&mut MapPosition, &mut RigidBody)>, time: Res<WorldTime>) {
    for (mut position, mut rigidbody) in query.iter_mut() {
        let acceleration = rigidbody.total_acceleration();
        rigidbody.velocity += acceleration * time.delta;
        position.pos += rigidbody.velocity * time.delta;
    }
}

/// Push bodies back inside [`WorldBounds`] and stop them on the clamped axis.
pub fn clamp_to_world_bounds(
    mut query: Query<(&mut MapPosition, &BoxCollider, &mut RigidBody), With<CollideWorldBounds>>,
    bounds: Res<WorldBounds>,
) {
    let area = bounds.area;
    for (mut position, collider, mut rigidbody) in query.iter_mut() {
        let body = collider.aabb(position.pos);
        if body.left() < area.left() {
            position.pos.x += area.left() - body.left();
            rigidbody.velocity.x = rigidbody.velocity.x.max(0.0);
        } else if body.right() > area.right() {
            position.pos.x -= body.right() - area.right();
            rigidbody.velocity.x = rigidbody.velocity.x.min(0.0);
        }
        if body.top() < area.top() {
            position.pos.y += area.top() - body.top();
            rigidbody.velocity.y = rigidbody.velocity.y.max(0.0);
        } else if body.bottom() > area.bottom() {
            position.pos.y -= body.bottom() - area.bottom();
            rigidbody.velocity.y = rigidbody.velocity.y.min(0.0);
        }
    }
}
