//! Arcade contact detection and separation.
//!
//! [`collision_detector`] tests every actor (an entity with [`Colliders`] and
//! a [`RigidBody`]) against the surfaces its colliders list: static bodies of
//! a group, or the colliding tiles of a tile layer. Overlapping actors are
//! pushed out along one axis, their velocity into the surface is zeroed, and
//! a [`CollisionEvent`] is triggered for observers.
//!
//! Separation respects the surface's [`FaceMask`]: a contact through a
//! disabled face is not resolved and not reported. Tile faces shared with a
//! colliding neighbour are disabled, so actors slide over tile seams.
use bevy_ecs::prelude::*;
use glam::Vec2;
use log::trace;

use crate::components::boxcollider::{Aabb, BoxCollider, FaceMask};
use crate::components::collision::{Colliders, SurfaceSource};
use crate::components::group::Group;
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::components::staticbody::StaticBody;
use crate::events::collision::{CollisionEvent, ContactSurface, TileContact};
use crate::resources::tilemapstore::TilemapStore;

/// Displacement that moves `actor` out of `surface`, if the contact can be
/// resolved.
///
/// The axis with the smaller overlap is tried first, the other one if the
/// face on the first axis is disabled. A face only blocks an actor moving
/// into it (or at rest): an actor rising through the bottom of a one-way
/// platform is left alone.
pub fn separation(actor: &Aabb, velocity: Vec2, surface: &Aabb, faces: FaceMask) -> Option<Vec2> {
    if !actor.overlaps(surface) {
        return None;
    }
    let overlap = actor.overlap(surface);

    let vertical = || {
        if actor.center().y <= surface.center().y {
            (faces.up && velocity.y >= 0.0).then(|| Vec2::new(0.0, -overlap.y))
        } else {
            (faces.down && velocity.y <= 0.0).then(|| Vec2::new(0.0, overlap.y))
        }
    };
    let horizontal = || {
        if actor.center().x <= surface.center().x {
            (faces.left && velocity.x >= 0.0).then(|| Vec2::new(-overlap.x, 0.0))
        } else {
            (faces.right && velocity.x <= 0.0).then(|| Vec2::new(overlap.x, 0.0))
        }
    };

    if overlap.y <= overlap.x {
        vertical().or_else(horizontal)
    } else {
        horizontal().or_else(vertical)
    }
}

/// Move the actor out of `surface` and stop it on the blocked axis.
/// Returns whether a contact was resolved.
fn separate(
    position: &mut Vec2,
    collider: &BoxCollider,
    velocity: &mut Vec2,
    surface: &Aabb,
    faces: FaceMask,
) -> bool {
    let Some(push) = separation(&collider.aabb(*position), *velocity, surface, faces) else {
        return false;
    };
    *position += push;
    if push.x != 0.0 {
        velocity.x = 0.0;
    }
    if push.y != 0.0 {
        velocity.y = 0.0;
    }
    true
}

pub fn collision_detector(
    mut commands: Commands,
    mut actors: Query<
        (
            Entity,
            &mut MapPosition,
            &BoxCollider,
            &mut RigidBody,
            &Colliders,
        ),
        Without<StaticBody>,
    >,
    bodies: Query<(Entity, &MapPosition, &BoxCollider, &Group), With<StaticBody>>,
    tilemaps: Res<TilemapStore>,
) {
    for (actor, mut position, collider, mut rigidbody, colliders) in actors.iter_mut() {
        for target in &colliders.targets {
            match &target.source {
                SurfaceSource::Group(name) => {
                    for (body, body_position, body_collider, group) in bodies.iter() {
                        if group.name() != name {
                            continue;
                        }
                        let surface = body_collider.aabb(body_position.pos);
                        if separate(
                            &mut position.pos,
                            collider,
                            &mut rigidbody.velocity,
                            &surface,
                            body_collider.faces,
                        ) {
                            trace!("{actor:?} blocked by body {body:?} of '{name}'");
                            commands.trigger(CollisionEvent {
                                actor,
                                surface: ContactSurface::Body(body),
                                handler: target.handler,
                            });
                        }
                    }
                }
                SurfaceSource::Layer { map, layer } => {
                    let Some(tilemap) = tilemaps.get(map) else {
                        continue;
                    };
                    let Some(tile_layer) = tilemap.layer(layer) else {
                        continue;
                    };
                    let region = collider.aabb(position.pos);
                    for tile in tile_layer.colliding_tiles_in(&region, tilemap.tile_size()) {
                        let bounds = tilemap.tile_bounds(tile);
                        let faces = tile_layer.tile_faces(tile.x, tile.y);
                        if separate(
                            &mut position.pos,
                            collider,
                            &mut rigidbody.velocity,
                            &bounds,
                            faces,
                        ) {
                            trace!("{actor:?} blocked by tile ({}, {}) of '{layer}'", tile.x, tile.y);
                            commands.trigger(CollisionEvent {
                                actor,
                                surface: ContactSurface::Tile(TileContact {
                                    map: map.clone(),
                                    layer: layer.clone(),
                                    x: tile.x,
                                    y: tile.y,
                                    bounds,
                                }),
                                handler: target.handler,
                            });
                        }
                    }
                }
            }
        }
    }
}
