use bevy_ecs::prelude::Resource;
use glam::Vec2;

use crate::components::boxcollider::Aabb;

/// Playable area in world pixels. Bodies marked with
/// [`CollideWorldBounds`](crate::components::collideworldbounds::CollideWorldBounds)
/// are kept inside it.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct WorldBounds {
    pub area: Aabb,
}

impl WorldBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            area: Aabb::from_size(Vec2::ZERO, Vec2::new(width, height)),
        }
    }
}
