use bevy_ecs::prelude::Component;

/// Marker for bodies that must stay inside
/// [`WorldBounds`](crate::resources::worldbounds::WorldBounds).
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct CollideWorldBounds;
