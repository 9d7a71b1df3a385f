use bevy_ecs::prelude::Component;
use glam::Vec2;

/// Sprite is identified by a texture key and the spritesheet frame to show.
/// The origin is the pivot, as a fraction of the frame size (`(0, 1)` is the
/// bottom-left corner, `(0.5, 0.5)` the center). Drawing is left to the
/// host renderer.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct Sprite {
    pub tex_key: String,
    pub frame: usize,
    pub width: f32,
    pub height: f32,
    pub origin: Vec2,
    pub flip_h: bool,
}

impl Sprite {
    pub fn new(tex_key: impl Into<String>, frame: usize, width: f32, height: f32) -> Self {
        Self {
            tex_key: tex_key.into(),
            frame,
            width,
            height,
            origin: Vec2::splat(0.5),
            flip_h: false,
        }
    }

    pub fn with_origin(mut self, origin: Vec2) -> Self {
        self.origin = origin;
        self
    }
}
