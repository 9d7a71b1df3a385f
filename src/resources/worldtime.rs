use bevy_ecs::prelude::Resource;

/// Simulation clock. `delta` is the length of the current tick in seconds
/// and `frame_count` the number of ticks started so far (the first tick
/// sees 1).
#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct WorldTime {
    pub delta: f32,
    pub frame_count: u64,
}

impl WorldTime {
    /// Zero-based index of the tick currently running.
    pub fn tick_index(&self) -> u64 {
        self.frame_count.saturating_sub(1)
    }
}
