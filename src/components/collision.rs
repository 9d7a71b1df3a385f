//! Collider registrations for dynamic actors.
//!
//! An actor lists the surfaces it collides with in a [`Colliders`]
//! component. Each [`ColliderTarget`] names a surface source (a static group
//! or a collidable tile layer) and the [`ContactHandler`] to run when the
//! contact reporter detects a contact with it. Registering a target with
//! [`ContactHandler::Ground`] installs the grounding detector for that
//! (actor, surface) pair.
use bevy_ecs::prelude::Component;
use smallvec::SmallVec;

/// Where a set of collision surfaces comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceSource {
    /// Every static body whose [`Group`](super::group::Group) has this name.
    Group(String),
    /// Every colliding tile of a layer in a tilemap of the
    /// [`TilemapStore`](crate::resources::tilemapstore::TilemapStore).
    Layer { map: String, layer: String },
}

/// What to do when a contact with a target is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContactHandler {
    /// Block only (walls).
    #[default]
    Block,
    /// Block and run the grounding check.
    Ground,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColliderTarget {
    pub source: SurfaceSource,
    pub handler: ContactHandler,
}

#[derive(Component, Debug, Clone, Default)]
pub struct Colliders {
    pub targets: SmallVec<[ColliderTarget; 4]>,
}

impl Colliders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collide with a static group without any callback.
    pub fn with_wall_group(mut self, group: impl Into<String>) -> Self {
        self.targets.push(ColliderTarget {
            source: SurfaceSource::Group(group.into()),
            handler: ContactHandler::Block,
        });
        self
    }

    /// Collide with a static group and treat it as ground.
    pub fn with_ground_group(mut self, group: impl Into<String>) -> Self {
        self.targets.push(ColliderTarget {
            source: SurfaceSource::Group(group.into()),
            handler: ContactHandler::Ground,
        });
        self
    }

    /// Collide with a tile layer and treat it as ground.
    pub fn with_ground_layer(mut self, map: impl Into<String>, layer: impl Into<String>) -> Self {
        self.targets.push(ColliderTarget {
            source: SurfaceSource::Layer {
                map: map.into(),
                layer: layer.into(),
            },
            handler: ContactHandler::Ground,
        });
        self
    }
}
