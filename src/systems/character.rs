//! Character controller.
//!
//! Each tick, [`character_controller`] samples every character's key
//! bindings, runs the ordered [`RULES`] table through [`decide`] and applies
//! the resulting [`Decision`]: velocity, facing, the `busy` flag, at most one
//! animation selection and the falling-frame pin.
//!
//! Rules run in this order and later rules override the animation chosen by
//! earlier ones:
//!
//! | rule          | guard                       | effect                                              |
//! |---------------|-----------------------------|-----------------------------------------------------|
//! | `horizontal`  | always                      | `vx = ±speed` or 0; walk (clears busy) or idle      |
//! | `paw`         | paw held and grounded       | select paw, `busy = true`                           |
//! | `sleep`       | sleep held and grounded     | select sleep, `busy = true`                         |
//! | `jump`        | jump held and grounded      | `vy = -jump_strength`, restart jump                 |
//! | `airborne_pin`| `vy > 0` (falling)          | show the falling frame whatever is selected         |
//!
//! When paw and sleep are both held, sleep wins because it is evaluated
//! later. `busy` set by paw is cleared by [`finish_paw`] when the paw
//! animation completes. `busy` set by sleep has no completion event and stays
//! set until the character walks while grounded.
//!
//! [`reset_grounded`] runs last in the tick and clears `grounded` on every
//! character.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use glam::Vec2;
use log::debug;

use crate::components::animation::Animation;
use crate::components::character::{
    ActionIntent, CharacterController, CharacterParams, CharacterState, Facing, Locomotion,
};
use crate::components::rigidbody::RigidBody;
use crate::components::sprite::Sprite;
use crate::events::animation::AnimationCompleteEvent;
use crate::resources::input::InputState;

/// Inputs of one decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickContext {
    pub intent: ActionIntent,
    pub grounded: bool,
    pub params: CharacterParams,
}

/// An animation selection. `restart` plays it from the first frame even if
/// it is already running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub locomotion: Locomotion,
    pub restart: bool,
}

/// Outcome of one decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub velocity: Vec2,
    pub facing: Facing,
    pub busy: bool,
    /// The last animation selected by the rules, if any.
    pub selected: Option<Selection>,
    /// Show the falling frame instead of the playing animation.
    pub pin_falling: bool,
}

impl Decision {
    fn select(&mut self, locomotion: Locomotion) {
        self.selected = Some(Selection {
            locomotion,
            restart: false,
        });
    }
}

/// A named guarded step of the decision chain.
pub struct Rule {
    pub name: &'static str,
    pub applies: fn(&TickContext, &Decision) -> bool,
    pub apply: fn(&TickContext, &mut Decision),
}

fn always(_: &TickContext, _: &Decision) -> bool {
    true
}

fn horizontal(ctx: &TickContext, d: &mut Decision) {
    let direction = match (ctx.intent.move_left, ctx.intent.move_right) {
        (true, false) => Some(Facing::Left),
        (false, true) => Some(Facing::Right),
        _ => None,
    };
    match direction {
        Some(facing) => {
            d.velocity.x = match facing {
                Facing::Left => -ctx.params.speed,
                Facing::Right => ctx.params.speed,
            };
            d.facing = facing;
            if ctx.grounded {
                d.select(Locomotion::Walk);
                d.busy = false;
            }
        }
        None => {
            d.velocity.x = 0.0;
            if ctx.grounded && !d.busy {
                d.select(Locomotion::Idle);
            }
        }
    }
}

fn paw_guard(ctx: &TickContext, _: &Decision) -> bool {
    ctx.intent.paw && ctx.grounded
}

fn paw(_: &TickContext, d: &mut Decision) {
    d.select(Locomotion::Paw);
    d.busy = true;
}

fn sleep_guard(ctx: &TickContext, _: &Decision) -> bool {
    ctx.intent.sleep && ctx.grounded
}

fn sleep(_: &TickContext, d: &mut Decision) {
    d.select(Locomotion::Sleep);
    d.busy = true;
}

fn jump_guard(ctx: &TickContext, _: &Decision) -> bool {
    ctx.intent.jump && ctx.grounded
}

fn jump(ctx: &TickContext, d: &mut Decision) {
    d.velocity.y = -ctx.params.jump_strength;
    d.selected = Some(Selection {
        locomotion: Locomotion::Jump,
        restart: true,
    });
}

fn falling(_: &TickContext, d: &Decision) -> bool {
    d.velocity.y > 0.0
}

fn pin_falling_frame(_: &TickContext, d: &mut Decision) {
    d.pin_falling = true;
}

pub const RULES: [Rule; 5] = [
    Rule {
        name: "horizontal",
        applies: always,
        apply: horizontal,
    },
    Rule {
        name: "paw",
        applies: paw_guard,
        apply: paw,
    },
    Rule {
        name: "sleep",
        applies: sleep_guard,
        apply: sleep,
    },
    Rule {
        name: "jump",
        applies: jump_guard,
        apply: jump,
    },
    Rule {
        name: "airborne_pin",
        applies: falling,
        apply: pin_falling_frame,
    },
];

/// Run [`RULES`] in order from the character's current state and velocity.
pub fn decide(ctx: &TickContext, state: &CharacterState, velocity: Vec2) -> Decision {
    let mut decision = Decision {
        velocity,
        facing: state.facing,
        busy: state.busy,
        selected: None,
        pin_falling: false,
    };
    for rule in &RULES {
        if (rule.applies)(ctx, &decision) {
            (rule.apply)(ctx, &mut decision);
        }
    }
    decision
}

/// Apply one decision per character.
pub fn character_controller(
    input: Res<InputState>,
    mut query: Query<(
        Entity,
        &CharacterController,
        &mut CharacterState,
        &mut RigidBody,
        &mut Animation,
        Option<&mut Sprite>,
    )>,
) {
    for (entity, controller, mut state, mut rigidbody, mut anim, sprite) in query.iter_mut() {
        let ctx = TickContext {
            intent: controller.bindings.sample(&*input),
            grounded: state.grounded,
            params: controller.params,
        };
        let decision = decide(&ctx, &state, rigidbody.velocity);

        rigidbody.velocity = decision.velocity;
        if state.busy != decision.busy || state.facing != decision.facing {
            state.busy = decision.busy;
            state.facing = decision.facing;
        }

        if let Some(selection) = decision.selected {
            let key = controller.animations.key(selection.locomotion);
            if anim.play(key, !selection.restart) {
                debug!("{entity:?} plays '{key}'");
            }
        }
        let pin = decision
            .pin_falling
            .then_some(controller.animations.fall_frame);
        if anim.frame_override != pin {
            anim.frame_override = pin;
        }

        if let Some(mut sprite) = sprite {
            let flip = decision.facing == Facing::Left;
            if sprite.flip_h != flip {
                sprite.flip_h = flip;
            }
        }
    }
}

/// Observer clearing `busy` when a character's paw animation completes and
/// returning it to idle.
pub fn finish_paw(
    trigger: On<AnimationCompleteEvent>,
    mut query: Query<(&CharacterController, &mut CharacterState, &mut Animation)>,
) {
    let event = trigger.event();
    let Ok((controller, mut state, mut anim)) = query.get_mut(event.entity) else {
        return;
    };
    if event.animation_key != controller.animations.paw {
        return;
    }
    state.busy = false;
    anim.play(&controller.animations.idle, true);
    debug!("{:?} finished pawing", event.entity);
}

/// End-of-tick reset: `grounded` must be re-asserted by a contact every tick.
pub fn reset_grounded(mut query: Query<&mut CharacterState>) {
    for mut state in query.iter_mut() {
        if state.grounded {
            state.grounded = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPEED: f32 = 200.0;
    const JUMP: f32 = 320.0;

    fn ctx(intent: ActionIntent, grounded: bool) -> TickContext {
        TickContext {
            intent,
            grounded,
            params: CharacterParams::new(SPEED, JUMP),
        }
    }

    fn state(busy: bool) -> CharacterState {
        CharacterState {
            busy,
            ..CharacterState::default()
        }
    }

    fn selected(d: &Decision) -> Option<Locomotion> {
        d.selected.map(|s| s.locomotion)
    }

    #[test]
    fn rule_order_is_fixed() {
        let names: Vec<&str> = RULES.iter().map(|r| r.name).collect();
        assert_eq!(names, ["horizontal", "paw", "sleep", "jump", "airborne_pin"]);
    }

    #[test]
    fn grounded_without_keys_idles_unless_busy() {
        let d = decide(&ctx(ActionIntent::default(), true), &state(false), Vec2::new(50.0, 3.0));
        assert_eq!(d.velocity, Vec2::new(0.0, 3.0));
        assert_eq!(selected(&d), Some(Locomotion::Idle));

        let d = decide(&ctx(ActionIntent::default(), true), &state(true), Vec2::ZERO);
        assert_eq!(selected(&d), None);
        assert!(d.busy);
    }

    #[test]
    fn walking_sets_speed_facing_and_clears_busy() {
        let left = ActionIntent {
            move_left: true,
            ..ActionIntent::default()
        };
        let d = decide(&ctx(left, true), &state(true), Vec2::ZERO);
        assert_eq!(d.velocity.x, -SPEED);
        assert_eq!(d.facing, Facing::Left);
        assert_eq!(selected(&d), Some(Locomotion::Walk));
        assert!(!d.busy);
    }

    #[test]
    fn both_directions_cancel_out() {
        let both = ActionIntent {
            move_left: true,
            move_right: true,
            ..ActionIntent::default()
        };
        let d = decide(&ctx(both, true), &state(false), Vec2::new(SPEED, 0.0));
        assert_eq!(d.velocity.x, 0.0);
        assert_eq!(selected(&d), Some(Locomotion::Idle));
    }

    #[test]
    fn airborne_move_changes_velocity_but_not_animation() {
        let right = ActionIntent {
            move_right: true,
            ..ActionIntent::default()
        };
        let d = decide(&ctx(right, false), &state(true), Vec2::new(0.0, -100.0));
        assert_eq!(d.velocity, Vec2::new(SPEED, -100.0));
        assert_eq!(selected(&d), None);
        assert!(d.busy);
    }

    #[test]
    fn sleep_wins_over_paw() {
        let both = ActionIntent {
            paw: true,
            sleep: true,
            ..ActionIntent::default()
        };
        let d = decide(&ctx(both, true), &state(false), Vec2::ZERO);
        assert_eq!(selected(&d), Some(Locomotion::Sleep));
        assert!(d.busy);
    }

    #[test]
    fn actions_need_ground() {
        let all = ActionIntent {
            paw: true,
            sleep: true,
            jump: true,
            ..ActionIntent::default()
        };
        let d = decide(&ctx(all, false), &state(false), Vec2::new(0.0, -50.0));
        assert_eq!(selected(&d), None);
        assert!(!d.busy);
        assert_eq!(d.velocity.y, -50.0);
    }

    #[test]
    fn jump_sets_vertical_velocity_and_restarts() {
        let jump = ActionIntent {
            jump: true,
            move_right: true,
            ..ActionIntent::default()
        };
        let d = decide(&ctx(jump, true), &state(false), Vec2::new(0.0, 2.0));
        assert_eq!(d.velocity, Vec2::new(SPEED, -JUMP));
        assert_eq!(
            d.selected,
            Some(Selection {
                locomotion: Locomotion::Jump,
                restart: true
            })
        );
        assert!(!d.pin_falling);
    }

    #[test]
    fn falling_pins_frame_over_any_selection() {
        let d = decide(&ctx(ActionIntent::default(), false), &state(false), Vec2::new(0.0, 10.0));
        assert!(d.pin_falling);
        let d = decide(&ctx(ActionIntent::default(), true), &state(false), Vec2::new(0.0, 10.0));
        assert_eq!(selected(&d), Some(Locomotion::Idle));
        assert!(d.pin_falling);
        let d = decide(&ctx(ActionIntent::default(), false), &state(false), Vec2::new(0.0, -10.0));
        assert!(!d.pin_falling);
    }
}
