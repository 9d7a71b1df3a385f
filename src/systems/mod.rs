//! Simulation systems and observers.
//!
//! Submodules overview
//! - [`animation`] – advance sprite animations and report completions
//! - [`character`] – per-tick character decisions, paw completion, grounded reset
//! - [`collision`] – contact detection, face-masked separation and events
//! - [`geometry`] – replace annotated tiles with static bodies
//! - [`grounding`] – set `grounded` from ground contacts
//! - [`input`] – feed scripted input into [`crate::resources::input::InputState`]
//! - [`movement`] – integrate forces and velocities, clamp to world bounds
//! - [`time`] – update simulation time and delta

pub mod animation;
pub mod character;
pub mod collision;
pub mod geometry;
pub mod grounding;
pub mod input;
pub mod movement;
pub mod time;
