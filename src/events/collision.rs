//! Contact events reported by the collision system.
//!
//! [`collision_detector`](crate::systems::collision::collision_detector)
//! separates each actor from the surfaces listed in its
//! [`Colliders`](crate::components::collision::Colliders) and triggers one
//! [`CollisionEvent`] per resolved contact. The event carries the handler the
//! actor registered for that surface, so observers such as
//! [`ground_on_contact`](crate::systems::grounding::ground_on_contact) only
//! react to the pairs they were installed for.
use bevy_ecs::prelude::*;

use crate::components::boxcollider::Aabb;
use crate::components::collision::ContactHandler;

/// A colliding tile of a tile layer.
#[derive(Debug, Clone, PartialEq)]
pub struct TileContact {
    pub map: String,
    pub layer: String,
    pub x: u32,
    pub y: u32,
    /// World-space cell of the tile.
    pub bounds: Aabb,
}

/// The surface side of a contact.
#[derive(Debug, Clone, PartialEq)]
pub enum ContactSurface {
    /// A static body entity.
    Body(Entity),
    Tile(TileContact),
}

/// Event fired when an actor is separated from a surface it collides with.
///
/// Contacts are reported after separation, so the actor's position already
/// rests against the surface when observers run.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct CollisionEvent {
    pub actor: Entity,
    pub surface: ContactSurface,
    pub handler: ContactHandler,
}
