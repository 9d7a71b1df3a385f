use bevy_ecs::prelude::Component;

/// Per-entity playback state for an animation stored in
/// [`AnimationStore`](crate::resources::animationstore::AnimationStore).
///
/// `frame_override` pins the displayed frame regardless of playback; the
/// character controller rewrites it every tick.
#[derive(Debug, Clone, Component)]
pub struct Animation {
    pub animation_key: String,
    pub frame_index: usize,
    pub elapsed_time: f32,
    /// Set when a non-looping animation has shown its last frame for a full
    /// frame duration.
    pub finished: bool,
    pub frame_override: Option<usize>,
}

impl Animation {
    pub fn new(animation_key: impl Into<String>) -> Self {
        Self {
            animation_key: animation_key.into(),
            frame_index: 0,
            elapsed_time: 0.0,
            finished: false,
            frame_override: None,
        }
    }

    /// True if `key` is the current animation and it has not completed.
    pub fn is_playing(&self, key: &str) -> bool {
        self.animation_key == key && !self.finished
    }

    /// Start playing `key` from its first frame.
    ///
    /// With `ignore_if_playing`, the call is a no-op while the same animation
    /// is still running. Returns whether playback was (re)started.
    pub fn play(&mut self, key: &str, ignore_if_playing: bool) -> bool {
        if ignore_if_playing && self.is_playing(key) {
            return false;
        }
        if self.animation_key != key {
            self.animation_key = key.to_string();
        }
        self.frame_index = 0;
        self.elapsed_time = 0.0;
        self.finished = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_ignores_same_running_animation() {
        let mut anim = Animation::new("cat-walk");
        anim.frame_index = 3;
        assert!(!anim.play("cat-walk", true));
        assert_eq!(anim.frame_index, 3);
    }

    #[test]
    fn play_restarts_without_ignore_flag() {
        let mut anim = Animation::new("cat-jump");
        anim.frame_index = 2;
        anim.elapsed_time = 0.1;
        assert!(anim.play("cat-jump", false));
        assert_eq!(anim.frame_index, 0);
        assert_eq!(anim.elapsed_time, 0.0);
    }

    #[test]
    fn play_restarts_finished_animation() {
        let mut anim = Animation::new("cat-paw");
        anim.finished = true;
        assert!(!anim.is_playing("cat-paw"));
        assert!(anim.play("cat-paw", true));
        assert!(anim.is_playing("cat-paw"));
    }

    #[test]
    fn play_switches_key() {
        let mut anim = Animation::new("cat-idle");
        assert!(anim.play("cat-sleep", true));
        assert_eq!(anim.animation_key, "cat-sleep");
    }
}
