//! catwalk library.
//!
//! The gameplay core of a 2D platformer built on `bevy_ecs`: annotated tiles
//! become static collision bodies, and each cat runs a per-tick controller
//! that turns held keys and ground contacts into velocity and one of
//! idle/walk/jump/paw/sleep.
//!
//! - [`components`] – entity data (bodies, colliders, animation, character)
//! - [`events`] – contact and animation completion events
//! - [`level`] – the reference room and cat setup
//! - [`resources`] – tilemaps, input, configuration, time
//! - [`schedule`] – observer registration and the ordered tick schedule
//! - [`systems`] – geometry building, collision, grounding, controller,
//!   animation and movement

pub mod components;
pub mod events;
pub mod level;
pub mod resources;
pub mod schedule;
pub mod systems;
