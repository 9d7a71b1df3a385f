//! Static collision bodies built from annotated tiles.
//!
//! A [`CollisionBodySpec`] describes, for one family of tiles, the hitbox that
//! replaces the tile's default full-cell box. The geometry builder in
//! [`crate::systems::geometry`] turns each matching tile into an entity with
//! a [`StaticBody`], a [`Group`](super::group::Group), a
//! [`MapPosition`](super::mapposition::MapPosition) at the tile center and a
//! [`BoxCollider`] built from the family's hitbox.
use bevy_ecs::prelude::Component;
use glam::Vec2;

use crate::components::boxcollider::{BoxCollider, FaceMask};

/// Hitbox declaration for a tile family.
///
/// `offset` is measured from the tile's top-left corner, in the same units as
/// the tile grid (pixels).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionBodySpec {
    pub size: Vec2,
    pub offset: Vec2,
    pub faces: FaceMask,
}

impl CollisionBodySpec {
    pub fn new(size: Vec2, offset: Vec2) -> Self {
        Self {
            size,
            offset,
            faces: FaceMask::ALL,
        }
    }

    pub fn with_faces(mut self, faces: FaceMask) -> Self {
        self.faces = faces;
        self
    }

    /// Collider for a body whose pivot sits at the center of a `cell` sized tile.
    pub fn collider(&self, cell: Vec2) -> BoxCollider {
        BoxCollider {
            size: self.size,
            offset: self.offset - cell * 0.5,
            faces: self.faces,
        }
    }
}

/// Marks an immutable, never-moving body created from level geometry.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct StaticBody {
    pub spec: CollisionBodySpec,
    /// Layer the source tile was removed from.
    pub source_layer: String,
    pub tile_x: u32,
    pub tile_y: u32,
}
