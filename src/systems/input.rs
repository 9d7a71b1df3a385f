//! Input sampling.
//!
//! The core never polls a device. A host writes
//! [`InputState`](crate::resources::input::InputState) directly; headless runs
//! install an [`InputScript`] and [`apply_input_script`] rewrites the held
//! keys from it at the start of every tick.
use bevy_ecs::prelude::*;

use crate::resources::input::InputState;
use crate::resources::inputscript::InputScript;
use crate::resources::worldtime::WorldTime;

/// Replace the held keys with the ones the script holds on the current tick.
/// Does nothing when no script is installed.
pub fn apply_input_script(
    script: Option<Res<InputScript>>,
    time: Res<WorldTime>,
    mut input: ResMut<InputState>,
) {
    let Some(script) = script else {
        return;
    };
    input.release_all();
    for key in script.held_at(time.tick_index()) {
        input.press(key);
    }
}
