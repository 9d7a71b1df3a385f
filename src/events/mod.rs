//! Event types exchanged between systems and observers.
//!
//! Submodules:
//! - [`animation`] – completion of non-looping animations
//! - [`collision`] – contacts reported by the collision system
pub mod animation;
pub mod collision;
