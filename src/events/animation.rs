//! Animation completion events.
//!
//! When a non-looping animation shows its last frame for a full frame
//! duration, [`animation`](crate::systems::animation::animation) marks it
//! finished and triggers an [`AnimationCompleteEvent`]. Observers subscribe
//! to it to chain actions, e.g.
//! [`finish_paw`](crate::systems::character::finish_paw) clears the
//! character's busy flag.

use bevy_ecs::prelude::*;

/// Event emitted when a non-looping animation completes.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct AnimationCompleteEvent {
    /// The entity whose animation completed.
    pub entity: Entity,
    /// Key of the completed animation.
    pub animation_key: String,
}
