//! Animation resource registry.
//!
//! This module provides a minimal store for animation definitions that can be
//! reused by multiple entities. Systems look up an animation by a string key
//! and drive playback from the immutable parameters stored here.

use std::sync::Arc;

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;

/// Central registry of reusable animation definitions keyed by string IDs.
#[derive(Resource, Debug, Default)]
pub struct AnimationStore {
    pub animations: FxHashMap<String, AnimationResource>,
}

impl AnimationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, animation: AnimationResource) {
        self.animations.insert(key.into(), animation);
    }

    pub fn get(&self, key: impl AsRef<str>) -> Option<&AnimationResource> {
        self.animations.get(key.as_ref())
    }
}

/// Immutable data describing a spritesheet animation.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationResource {
    /// Spritesheet texture key.
    pub tex_key: Arc<str>,
    /// Spritesheet frame indices, in playback order.
    pub frames: Vec<usize>,
    /// Frames per second playback speed.
    pub fps: f32,
    /// Whether the animation restarts after the last frame.
    pub looped: bool,
    /// Pause before each restart of a looped animation, in seconds.
    pub repeat_delay: f32,
}

impl AnimationResource {
    pub fn new(tex_key: &str, frames: impl Into<Vec<usize>>, fps: f32) -> Self {
        Self {
            tex_key: Arc::from(tex_key),
            frames: frames.into(),
            fps,
            looped: false,
            repeat_delay: 0.0,
        }
    }

    /// Frames `start..=end` of the sheet.
    pub fn range(tex_key: &str, start: usize, end: usize, fps: f32) -> Self {
        Self::new(tex_key, (start..=end).collect::<Vec<_>>(), fps)
    }

    pub fn looped(mut self) -> Self {
        self.looped = true;
        self
    }

    pub fn with_repeat_delay(mut self, seconds: f32) -> Self {
        self.repeat_delay = seconds;
        self
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn frame_duration(&self) -> f32 {
        1.0 / self.fps
    }
}
