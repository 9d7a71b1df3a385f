//! Axis-aligned box collider with per-face collision flags.
//!
//! A [`BoxCollider`] is positioned relative to an entity's
//! [`MapPosition`](super::mapposition::MapPosition) pivot through its
//! `offset`. The [`FaceMask`] decides which of the four box sides take part
//! in contact separation; a disabled face lets bodies pass through that side
//! (e.g. jumping up through a shelf from below).
use bevy_ecs::prelude::Component;
use glam::Vec2;

/// Axis-aligned bounding box in world space. Y grows downwards, so `max.y`
/// is the bottom edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_size(top_left: Vec2, size: Vec2) -> Self {
        let p1 = top_left + size;
        Self {
            min: top_left.min(p1),
            max: top_left.max(p1),
        }
    }

    pub fn top(&self) -> f32 {
        self.min.y
    }

    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    pub fn left(&self) -> f32 {
        self.min.x
    }

    pub fn right(&self) -> f32 {
        self.max.x
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Overlap depth on each axis. Negative components mean the boxes are
    /// apart on that axis; zero means the edges touch.
    pub fn overlap(&self, other: &Aabb) -> Vec2 {
        self.max.min(other.max) - self.min.max(other.min)
    }

    /// Strict overlap test: touching edges do not count.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let o = self.overlap(other);
        o.x > 0.0 && o.y > 0.0
    }

    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            min: self.min + delta,
            max: self.max + delta,
        }
    }
}

/// Which sides of a box participate in collision separation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceMask {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl FaceMask {
    pub const ALL: FaceMask = FaceMask {
        up: true,
        down: true,
        left: true,
        right: true,
    };

}

impl Default for FaceMask {
    fn default() -> Self {
        Self::ALL
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct BoxCollider {
    pub size: Vec2,
    pub offset: Vec2,
    pub faces: FaceMask,
}

impl BoxCollider {
    /// Create a BoxCollider with given size, no offset and all faces solid.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            offset: Vec2::ZERO,
            faces: FaceMask::ALL,
        }
    }

    /// Modify BoxCollider with given offset from the entity pivot.
    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_faces(mut self, faces: FaceMask) -> Self {
        self.faces = faces;
        self
    }

    /// World-space box for a given entity position.
    /// Handles negative size by normalizing to proper min/max.
    pub fn aabb(&self, position: Vec2) -> Aabb {
        Aabb::from_size(position + self.offset, self.size)
    }

    /// Lower edge of the box in world space.
    pub fn bottom(&self, position: Vec2) -> f32 {
        self.aabb(position).bottom()
    }
}
