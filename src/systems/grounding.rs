//! Grounding detector.
//!
//! [`ground_on_contact`] observes [`CollisionEvent`]s and sets the actor's
//! `grounded` flag for the current tick when the actor's lower edge is
//! strictly above the surface's lower edge. The comparison is the same for
//! tile and static-body surfaces; both expose their lower edge through
//! [`Surface`].
//!
//! The flag is never latched: [`reset_grounded`](crate::systems::character::reset_grounded)
//! clears it at the end of every tick and a resting actor is grounded again
//! only if the collision system reports the contact again.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use glam::Vec2;
use log::trace;

use crate::components::boxcollider::BoxCollider;
use crate::components::character::CharacterState;
use crate::components::collision::ContactHandler;
use crate::components::mapposition::MapPosition;
use crate::components::staticbody::StaticBody;
use crate::events::collision::{CollisionEvent, ContactSurface, TileContact};

/// Something an actor can stand on.
pub trait Surface {
    /// World-space y of the lower edge. Y grows downwards.
    fn bottom_edge(&self) -> f32;
}

impl Surface for TileContact {
    fn bottom_edge(&self) -> f32 {
        self.bounds.bottom()
    }
}

/// A static body's collider at its position.
#[derive(Debug, Clone, Copy)]
pub struct BodySurface {
    pub position: Vec2,
    pub collider: BoxCollider,
}

impl Surface for BodySurface {
    fn bottom_edge(&self) -> f32 {
        self.collider.bottom(self.position)
    }
}

/// The actor rests on `surface` if its lower edge is strictly above the
/// surface's lower edge.
pub fn rests_on(actor_bottom: f32, surface: &dyn Surface) -> bool {
    actor_bottom < surface.bottom_edge()
}

/// Observer setting `grounded` for contacts registered as ground.
pub fn ground_on_contact(
    trigger: On<CollisionEvent>,
    actors: Query<(&MapPosition, &BoxCollider), Without<StaticBody>>,
    bodies: Query<(&MapPosition, &BoxCollider), With<StaticBody>>,
    mut states: Query<&mut CharacterState>,
) {
    let event = trigger.event();
    if event.handler != ContactHandler::Ground {
        return;
    }
    let Ok((position, collider)) = actors.get(event.actor) else {
        return;
    };
    let actor_bottom = collider.bottom(position.pos);

    let grounded = match &event.surface {
        ContactSurface::Tile(tile) => rests_on(actor_bottom, tile),
        ContactSurface::Body(body) => match bodies.get(*body) {
            Ok((body_position, body_collider)) => rests_on(
                actor_bottom,
                &BodySurface {
                    position: body_position.pos,
                    collider: *body_collider,
                },
            ),
            Err(_) => false,
        },
    };

    if !grounded {
        return;
    }
    if let Ok(mut state) = states.get_mut(event.actor) {
        if !state.grounded {
            trace!("{:?} grounded on {:?}", event.actor, event.surface);
        }
        state.grounded = true;
    }
}
