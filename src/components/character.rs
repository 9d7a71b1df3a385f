//! Per-actor character controller data.
//!
//! - [`CharacterController`] – immutable configuration: tuning, key bindings
//!   and animation names
//! - [`CharacterState`] – the mutable `grounded`/`busy`/`facing` flags the
//!   controller, the grounding observer and the end-of-tick reset share
//!
//! Velocity lives in the actor's [`RigidBody`](super::rigidbody::RigidBody).
use bevy_ecs::prelude::Component;

use crate::resources::input::{KeyCode, KeySource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// The mutually exclusive animation states a character can select per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Locomotion {
    Idle,
    Walk,
    Jump,
    Paw,
    Sleep,
}

/// Logical actions sampled from the key source for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActionIntent {
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
    pub sleep: bool,
    pub paw: bool,
}

/// Maps the five logical actions to keys. Keys within one table are distinct,
/// so several actors can share one keyboard with disjoint tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBindings {
    pub move_left: KeyCode,
    pub move_right: KeyCode,
    pub jump: KeyCode,
    pub sleep: KeyCode,
    pub paw: KeyCode,
}

impl KeyBindings {
    pub fn new(
        move_left: KeyCode,
        move_right: KeyCode,
        jump: KeyCode,
        sleep: KeyCode,
        paw: KeyCode,
    ) -> Result<Self, String> {
        let keys = [move_left, move_right, jump, sleep, paw];
        for (i, a) in keys.iter().enumerate() {
            if keys[i + 1..].contains(a) {
                return Err(format!("key {a} is bound to more than one action"));
            }
        }
        Ok(Self {
            move_left,
            move_right,
            jump,
            sleep,
            paw,
        })
    }

    /// W/A/S/D with E to paw.
    pub fn wasd() -> Self {
        Self {
            move_left: KeyCode::Char('A'),
            move_right: KeyCode::Char('D'),
            jump: KeyCode::Char('W'),
            sleep: KeyCode::Char('S'),
            paw: KeyCode::Char('E'),
        }
    }

    /// Arrow keys with Enter to paw.
    pub fn arrows() -> Self {
        Self {
            move_left: KeyCode::Left,
            move_right: KeyCode::Right,
            jump: KeyCode::Up,
            sleep: KeyCode::Down,
            paw: KeyCode::Enter,
        }
    }

    pub fn sample(&self, keys: &impl KeySource) -> ActionIntent {
        ActionIntent {
            move_left: keys.is_key_down(self.move_left),
            move_right: keys.is_key_down(self.move_right),
            jump: keys.is_key_down(self.jump),
            sleep: keys.is_key_down(self.sleep),
            paw: keys.is_key_down(self.paw),
        }
    }
}

/// Horizontal speed and jump impulse, in pixels per second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterParams {
    pub speed: f32,
    pub jump_strength: f32,
}

impl CharacterParams {
    /// # Panics
    /// If either value is not a finite positive number.
    pub fn new(speed: f32, jump_strength: f32) -> Self {
        assert!(
            speed.is_finite() && speed > 0.0,
            "character speed must be finite and positive, got {speed}"
        );
        assert!(
            jump_strength.is_finite() && jump_strength > 0.0,
            "jump strength must be finite and positive, got {jump_strength}"
        );
        Self {
            speed,
            jump_strength,
        }
    }
}

/// Animation names for each [`Locomotion`] plus the frame shown while falling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationKeys {
    pub idle: String,
    pub walk: String,
    pub jump: String,
    pub paw: String,
    pub sleep: String,
    pub fall_frame: usize,
}

impl AnimationKeys {
    pub fn key(&self, locomotion: Locomotion) -> &str {
        match locomotion {
            Locomotion::Idle => &self.idle,
            Locomotion::Walk => &self.walk,
            Locomotion::Jump => &self.jump,
            Locomotion::Paw => &self.paw,
            Locomotion::Sleep => &self.sleep,
        }
    }
}

#[derive(Component, Debug, Clone)]
pub struct CharacterController {
    pub params: CharacterParams,
    pub bindings: KeyBindings,
    pub animations: AnimationKeys,
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CharacterState {
    /// Set by a grounding contact this tick; cleared at the end of every tick.
    pub grounded: bool,
    /// Set by paw/sleep. Cleared by the paw completion event or by walking.
    pub busy: bool,
    pub facing: Facing,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::input::InputState;

    #[test]
    fn duplicate_keys_are_rejected() {
        let err = KeyBindings::new(
            KeyCode::Char('A'),
            KeyCode::Char('D'),
            KeyCode::Char('W'),
            KeyCode::Char('A'),
            KeyCode::Char('E'),
        )
        .unwrap_err();
        assert!(err.contains("A"));
    }

    #[test]
    fn presets_are_valid_and_disjoint() {
        let wasd = KeyBindings::wasd();
        let arrows = KeyBindings::arrows();
        assert!(
            KeyBindings::new(
                wasd.move_left,
                wasd.move_right,
                wasd.jump,
                wasd.sleep,
                wasd.paw
            )
            .is_ok()
        );
        let a = [wasd.move_left, wasd.move_right, wasd.jump, wasd.sleep, wasd.paw];
        let b = [
            arrows.move_left,
            arrows.move_right,
            arrows.jump,
            arrows.sleep,
            arrows.paw,
        ];
        assert!(a.iter().all(|k| !b.contains(k)));
    }

    #[test]
    fn sample_reads_only_bound_keys() {
        let mut input = InputState::default();
        input.press(KeyCode::Char('D'));
        input.press(KeyCode::Left);
        let intent = KeyBindings::wasd().sample(&input);
        assert!(intent.move_right);
        assert!(!intent.move_left);
        let intent = KeyBindings::arrows().sample(&input);
        assert!(intent.move_left);
        assert!(!intent.move_right);
    }

    #[test]
    #[should_panic(expected = "speed")]
    fn zero_speed_panics() {
        CharacterParams::new(0.0, 320.0);
    }

    #[test]
    #[should_panic(expected = "jump strength")]
    fn nan_jump_panics() {
        CharacterParams::new(200.0, f32::NAN);
    }
}
