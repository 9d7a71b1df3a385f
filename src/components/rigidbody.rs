//! Kinematic body component with named acceleration forces.
//!
//! The [`RigidBody`] component stores the velocity the character controller
//! writes each tick and the named acceleration forces (gravity) the movement
//! system integrates.

use bevy_ecs::prelude::Component;
use glam::Vec2;
use rustc_hash::FxHashMap;

/// Kinematic body storing velocity and named acceleration forces.
///
/// # Example
/// ```ignore
/// let mut rb = RigidBody::new();
/// rb.add_force("gravity", Vec2::new(0.0, 400.0));
/// ```
#[derive(Component, Clone, Debug, Default)]
pub struct RigidBody {
    /// Current velocity in world units per second.
    pub velocity: Vec2,
    /// Named accelerations in world units per second squared. The total
    /// acceleration is their sum.
    pub forces: FxHashMap<String, Vec2>,
}

impl RigidBody {
    /// Create a RigidBody with zero velocity and no forces.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor with a single downward `"gravity"` force.
    pub fn with_gravity(gravity: f32) -> Self {
        let mut rb = Self::new();
        rb.add_force("gravity", Vec2::new(0.0, gravity));
        rb
    }

    /// Add or replace a named acceleration force.
    pub fn add_force(&mut self, name: &str, value: Vec2) {
        self.forces.insert(name.to_string(), value);
    }

    /// Sum of all forces.
    pub fn total_acceleration(&self) -> Vec2 {
        self.forces.values().copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gravity_constructor_adds_downward_force() {
        let rb = RigidBody::with_gravity(400.0);
        assert_eq!(rb.forces.get("gravity"), Some(&Vec2::new(0.0, 400.0)));
        assert_eq!(rb.total_acceleration(), Vec2::new(0.0, 400.0));
    }

    #[test]
    fn forces_add_up_and_replace_by_name() {
        let mut rb = RigidBody::with_gravity(400.0);
        rb.add_force("wind", Vec2::new(10.0, 0.0));
        assert_eq!(rb.total_acceleration(), Vec2::new(10.0, 400.0));
        rb.add_force("gravity", Vec2::new(0.0, 100.0));
        assert_eq!(rb.total_acceleration(), Vec2::new(10.0, 100.0));
    }
}
