//! ECS components for entities.
//!
//! This module groups all component types that can be attached to entities in
//! the game world.
//!
//! Submodules overview:
//! - [`animation`] – playback state of a sprite animation
//! - [`boxcollider`] – axis-aligned collider with per-face collision flags
//! - [`character`] – character controller configuration and per-tick flags
//! - [`collideworldbounds`] – marker keeping a body inside the world
//! - [`collision`] – surfaces an actor collides with and how contacts are handled
//! - [`group`] – name of the static group a body belongs to
//! - [`mapposition`] – world-space position (pivot) for an entity
//! - [`rigidbody`] – velocity and named acceleration forces
//! - [`sprite`] – spritesheet frame to display
//! - [`staticbody`] – immutable bodies built from annotated tiles

pub mod animation;
pub mod boxcollider;
pub mod character;
pub mod collideworldbounds;
pub mod collision;
pub mod group;
pub mod mapposition;
pub mod rigidbody;
pub mod sprite;
pub mod staticbody;
