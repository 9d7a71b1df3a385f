//! Animation playback.
//!
//! [`animation`] advances every [`Animation`] through the frames of its
//! [`AnimationResource`](crate::resources::animationstore::AnimationResource)
//! and writes the frame to show into the entity's [`Sprite`].
//!
//! # Animation Flow
//!
//! 1. Animation data is defined in [`AnimationStore`]
//! 2. Entities have an [`Animation`] component pointing to a key
//! 3. The `animation` system advances frames based on `fps`; looped
//!    animations hold their last frame for an extra `repeat_delay` before
//!    wrapping around
//! 4. A non-looping animation that has shown its last frame for a full frame
//!    duration is marked finished and an [`AnimationCompleteEvent`] is
//!    triggered
//! 5. `frame_override`, when set, replaces the displayed frame without
//!    touching playback
use bevy_ecs::prelude::*;
use log::{debug, warn};

use crate::components::animation::Animation;
use crate::components::sprite::Sprite;
use crate::events::animation::AnimationCompleteEvent;
use crate::resources::animationstore::AnimationStore;
use crate::resources::worldtime::WorldTime;

/// Advance animation playback and update the sprite frame.
///
/// Contract
/// - Reads [`WorldTime`] for the tick delta.
/// - Looks up animation data from [`AnimationStore`]; unknown keys are
///   skipped.
/// - Mutates [`Animation`] playback state and the [`Sprite`] frame.
/// - Triggers [`AnimationCompleteEvent`] once per completed non-looping run.
pub fn animation(
    mut commands: Commands,
    mut query: Query<(Entity, &mut Animation, &mut Sprite)>,
    animation_store: Res<AnimationStore>,
    time: Res<WorldTime>,
) {
    for (entity, mut anim_comp, mut sprite) in query.iter_mut() {
        let Some(animation) = animation_store.get(&anim_comp.animation_key) else {
            warn!(
                "{entity:?} plays unknown animation '{}'",
                anim_comp.animation_key
            );
            continue;
        };
        if animation.frames.is_empty() || animation.fps <= 0.0 {
            continue;
        }
        let last = animation.frame_count() - 1;
        if anim_comp.frame_index > last {
            anim_comp.frame_index = last;
        }

        if !anim_comp.finished {
            anim_comp.elapsed_time += time.delta;
            loop {
                let mut hold = animation.frame_duration();
                if animation.looped && anim_comp.frame_index == last {
                    hold += animation.repeat_delay;
                }
                if anim_comp.elapsed_time < hold {
                    break;
                }
                anim_comp.elapsed_time -= hold;

                if anim_comp.frame_index < last {
                    anim_comp.frame_index += 1;
                } else if animation.looped {
                    anim_comp.frame_index = 0;
                } else {
                    anim_comp.finished = true;
                    anim_comp.elapsed_time = 0.0;
                    debug!("{entity:?} finished '{}'", anim_comp.animation_key);
                    commands.trigger(AnimationCompleteEvent {
                        entity,
                        animation_key: anim_comp.animation_key.clone(),
                    });
                    break;
                }
            }
        }

        let frame = anim_comp
            .frame_override
            .unwrap_or(animation.frames[anim_comp.frame_index]);
        if sprite.frame != frame {
            sprite.frame = frame;
        }
    }
}
