//! Tick orchestration.
//!
//! One tick runs these systems strictly in order:
//!
//! 1. [`apply_input_script`] – sample input
//! 2. [`collision_detector`] – separate actors from surfaces and report
//!    contacts; [`ground_on_contact`] sets `grounded` before step 3
//! 3. [`character_controller`] – decide velocity, flags and animation
//! 4. [`animation`] – advance playback; [`finish_paw`] handles completions
//! 5. [`movement`] then [`clamp_to_world_bounds`] – integrate velocity
//! 6. [`reset_grounded`] – clear `grounded` for the next tick
//!
//! The chained schedule inserts a sync point after each system that queues
//! commands, so events triggered in one step are observed before the next
//! step starts.
use bevy_ecs::prelude::*;

use crate::systems::animation::animation;
use crate::systems::character::{character_controller, finish_paw, reset_grounded};
use crate::systems::collision::collision_detector;
use crate::systems::grounding::ground_on_contact;
use crate::systems::input::apply_input_script;
use crate::systems::movement::{clamp_to_world_bounds, movement};
use crate::systems::time::update_world_time;

/// Spawn the observers the tick relies on. Call once per world.
pub fn register_observers(world: &mut World) {
    world.spawn(Observer::new(ground_on_contact));
    world.spawn(Observer::new(finish_paw));
    // Ensure the observers are registered before any system triggers events.
    world.flush();
}

pub fn build_tick_schedule() -> Schedule {
    let mut tick = Schedule::default();
    tick.add_systems(
        (
            apply_input_script,
            collision_detector,
            character_controller,
            animation,
            movement,
            clamp_to_world_bounds,
            reset_grounded,
        )
            .chain(),
    );
    tick
}

/// Advance the world clock by `dt` seconds and run one tick.
pub fn run_tick(world: &mut World, schedule: &mut Schedule, dt: f32) {
    update_world_time(world, dt);
    schedule.run(world);
    world.clear_trackers();
}
