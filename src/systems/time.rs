//! Time update.
//!
//! Updates the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource once per tick.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Start a new tick lasting `dt` seconds: store the delta and count the tick.
pub fn update_world_time(world: &mut World, dt: f32) {
    let mut wt = world.resource_mut::<WorldTime>();
    wt.delta = dt;
    wt.frame_count += 1;
}
