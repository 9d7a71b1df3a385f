//! End-to-end tick tests on the reference room.
//!
//! Every test builds the room with [`setup_level`], registers the observers
//! and drives the full tick schedule at 60 Hz, writing held keys straight
//! into [`InputState`] the way a host would.

use bevy_ecs::prelude::*;
use glam::Vec2;

use catwalk::components::animation::Animation;
use catwalk::components::boxcollider::BoxCollider;
use catwalk::components::character::{CharacterState, Facing};
use catwalk::components::mapposition::MapPosition;
use catwalk::components::rigidbody::RigidBody;
use catwalk::components::sprite::Sprite;
use catwalk::level::{reference_room, setup_level};
use catwalk::resources::gameconfig::GameConfig;
use catwalk::resources::input::{InputState, KeyCode};
use catwalk::resources::inputscript::InputScript;
use catwalk::schedule::{build_tick_schedule, register_observers, run_tick};

const DT: f32 = 1.0 / 60.0;
const SPEED: f32 = 200.0;
const JUMP: f32 = 320.0;
const FLOOR_TOP: f32 = 416.0;

const A: KeyCode = KeyCode::Char('A');
const D: KeyCode = KeyCode::Char('D');
const W: KeyCode = KeyCode::Char('W');
const S: KeyCode = KeyCode::Char('S');
const E: KeyCode = KeyCode::Char('E');

struct Sim {
    world: World,
    schedule: Schedule,
    cats: Vec<Entity>,
}

impl Sim {
    fn with_config(config: GameConfig) -> Self {
        let mut world = World::new();
        register_observers(&mut world);
        let cats = setup_level(&mut world, &config, reference_room().unwrap()).unwrap();
        Sim {
            world,
            schedule: build_tick_schedule(),
            cats,
        }
    }

    fn new(players: usize) -> Self {
        let mut config = GameConfig::new();
        config.players = players;
        Self::with_config(config)
    }

    /// Spawned cats fall onto the floor; run until they have landed and idle.
    fn settled(players: usize) -> Self {
        let mut sim = Self::new(players);
        sim.run(120);
        sim
    }

    fn hold(&mut self, keys: &[KeyCode]) {
        let mut input = self.world.resource_mut::<InputState>();
        input.release_all();
        for key in keys {
            input.press(*key);
        }
    }

    fn tick(&mut self) {
        run_tick(&mut self.world, &mut self.schedule, DT);
    }

    fn run(&mut self, ticks: usize) {
        for _ in 0..ticks {
            self.tick();
        }
    }

    fn cat(&self) -> Entity {
        self.cats[0]
    }

    fn velocity(&self, cat: Entity) -> Vec2 {
        self.world.get::<RigidBody>(cat).unwrap().velocity
    }

    fn state(&self, cat: Entity) -> CharacterState {
        *self.world.get::<CharacterState>(cat).unwrap()
    }

    fn anim(&self, cat: Entity) -> &Animation {
        self.world.get::<Animation>(cat).unwrap()
    }

    fn anim_key(&self, cat: Entity) -> String {
        self.anim(cat).animation_key.clone()
    }

    fn body_bottom(&self, cat: Entity) -> f32 {
        let pos = self.world.get::<MapPosition>(cat).unwrap().pos;
        self.world.get::<BoxCollider>(cat).unwrap().bottom(pos)
    }

    fn body_left(&self, cat: Entity) -> f32 {
        let pos = self.world.get::<MapPosition>(cat).unwrap().pos;
        self.world.get::<BoxCollider>(cat).unwrap().aabb(pos).left()
    }

    fn body_top(&self, cat: Entity) -> f32 {
        let pos = self.world.get::<MapPosition>(cat).unwrap().pos;
        self.world.get::<BoxCollider>(cat).unwrap().aabb(pos).top()
    }

    fn place(&mut self, cat: Entity, pivot: Vec2) {
        self.world.get_mut::<MapPosition>(cat).unwrap().pos = pivot;
    }
}

fn resting_on(bottom: f32, surface_top: f32) -> bool {
    // one tick of gravity sinks a resting body slightly into its support
    bottom >= surface_top - 0.01 && bottom < surface_top + 0.5
}

#[test]
fn spawned_cat_falls_and_lands_on_the_floor() {
    let mut sim = Sim::new(1);
    let cat = sim.cat();
    sim.run(5);
    assert!(sim.velocity(cat).y > 0.0);
    sim.run(115);
    assert!(resting_on(sim.body_bottom(cat), FLOOR_TOP));
    assert_eq!(sim.anim_key(cat), "cat-idle");
    assert_eq!(sim.anim(cat).frame_override, None);
}

#[test]
fn walk_right_three_ticks_then_idle() {
    let mut sim = Sim::settled(1);
    let cat = sim.cat();

    sim.hold(&[D]);
    for _ in 0..3 {
        sim.tick();
        assert_eq!(sim.velocity(cat).x, SPEED);
        assert_eq!(sim.anim_key(cat), "cat-walk");
        assert_eq!(sim.state(cat).facing, Facing::Right);
    }

    sim.hold(&[]);
    sim.tick();
    assert_eq!(sim.velocity(cat).x, 0.0);
    assert_eq!(sim.anim_key(cat), "cat-idle");
}

#[test]
fn walking_left_flips_the_sprite() {
    let mut sim = Sim::settled(1);
    let cat = sim.cat();
    sim.hold(&[D]);
    sim.tick();
    sim.hold(&[A]);
    sim.tick();
    assert_eq!(sim.velocity(cat).x, -SPEED);
    assert_eq!(sim.state(cat).facing, Facing::Left);
    assert!(sim.world.get::<Sprite>(cat).unwrap().flip_h);
}

#[test]
fn jump_only_from_the_ground() {
    let mut sim = Sim::settled(1);
    let cat = sim.cat();

    sim.hold(&[W]);
    sim.tick();
    let lift_off = sim.velocity(cat).y;
    assert!((lift_off - (-JUMP + 400.0 * DT)).abs() < 1e-3);
    assert_eq!(sim.anim_key(cat), "cat-jump");

    // still held while airborne: gravity keeps slowing the cat down
    sim.tick();
    assert!(sim.velocity(cat).y > lift_off);
    assert_eq!(sim.anim_key(cat), "cat-jump");

    sim.hold(&[]);
    sim.run(150);
    assert!(resting_on(sim.body_bottom(cat), FLOOR_TOP));
    assert_eq!(sim.anim_key(cat), "cat-idle");
}

#[test]
fn falling_cat_shows_the_falling_frame() {
    let mut sim = Sim::settled(1);
    let cat = sim.cat();
    sim.hold(&[W]);
    sim.tick();
    sim.hold(&[]);
    while sim.velocity(cat).y <= 0.0 {
        sim.tick();
    }
    sim.tick();
    assert_eq!(sim.anim(cat).frame_override, Some(68));
    assert_eq!(sim.world.get::<Sprite>(cat).unwrap().frame, 68);

    sim.run(120);
    assert_eq!(sim.anim(cat).frame_override, None);
    assert_ne!(sim.world.get::<Sprite>(cat).unwrap().frame, 68);
}

#[test]
fn paw_sets_busy_until_the_animation_completes() {
    let mut sim = Sim::settled(1);
    let cat = sim.cat();

    sim.hold(&[E]);
    sim.tick();
    assert_eq!(sim.anim_key(cat), "cat-paw");
    assert!(sim.state(cat).busy);

    // released: busy keeps idle from taking over while the paw plays
    sim.hold(&[]);
    sim.run(20);
    assert_eq!(sim.anim_key(cat), "cat-paw");
    assert!(sim.state(cat).busy);

    // six frames at 12 fps take half a second
    sim.run(20);
    assert!(!sim.state(cat).busy);
    assert_eq!(sim.anim_key(cat), "cat-idle");
}

#[test]
fn sleep_wins_when_paw_and_sleep_are_both_held() {
    let mut sim = Sim::settled(1);
    let cat = sim.cat();
    sim.hold(&[E, S]);
    sim.tick();
    assert_eq!(sim.anim_key(cat), "cat-sleep");
    assert!(sim.state(cat).busy);
}

#[test]
fn sleep_busy_only_clears_by_walking() {
    let mut sim = Sim::settled(1);
    let cat = sim.cat();

    sim.hold(&[S]);
    sim.tick();
    sim.hold(&[]);
    sim.run(300);
    assert!(sim.state(cat).busy);
    assert_eq!(sim.anim_key(cat), "cat-sleep");

    sim.hold(&[D]);
    sim.tick();
    assert!(!sim.state(cat).busy);
    assert_eq!(sim.anim_key(cat), "cat-walk");
}

#[test]
fn actions_are_ignored_while_airborne() {
    let mut sim = Sim::new(1);
    let cat = sim.cat();
    sim.hold(&[E, S, W]);
    sim.run(10);
    assert!(!sim.state(cat).busy);
    assert_eq!(sim.anim_key(cat), "cat-idle");
    assert!(sim.velocity(cat).y > 0.0);
}

#[test]
fn two_cats_share_the_keyboard() {
    let mut sim = Sim::settled(2);
    let (first, second) = (sim.cats[0], sim.cats[1]);
    sim.hold(&[D, KeyCode::Left]);
    sim.tick();
    assert_eq!(sim.velocity(first).x, SPEED);
    assert_eq!(sim.velocity(second).x, -SPEED);
    assert_eq!(sim.state(second).facing, Facing::Left);

    sim.hold(&[KeyCode::Enter]);
    sim.tick();
    assert_eq!(sim.anim_key(first), "cat-idle");
    assert_eq!(sim.anim_key(second), "cat-paw");
}

#[test]
fn pillar_stops_the_cat() {
    let mut sim = Sim::settled(1);
    let cat = sim.cat();
    sim.hold(&[A]);
    sim.run(60);
    // pillar body spans x 0..16; the cat moves one tick into it after each push
    let left = sim.body_left(cat);
    assert!(left >= 16.0 - SPEED * DT - 0.01, "left edge {left}");
    assert!(left <= 16.0 + 0.01, "left edge {left}");
    assert!(resting_on(sim.body_bottom(cat), FLOOR_TOP));
}

#[test]
fn table_blocks_a_jump_from_below() {
    let mut sim = Sim::new(1);
    let cat = sim.cat();
    // under the middle table: body x 226..258, tables span x 192..288
    sim.place(cat, Vec2::new(194.0, FLOOR_TOP));
    sim.run(30);
    sim.hold(&[W]);
    sim.tick();
    sim.hold(&[]);
    let mut highest = f32::MAX;
    for _ in 0..60 {
        sim.tick();
        highest = highest.min(sim.body_top(cat));
    }
    // table bottom edge is at y = 384
    assert!(highest >= 384.0 - JUMP * DT - 0.01, "top reached {highest}");
    sim.run(60);
    assert!(resting_on(sim.body_bottom(cat), FLOOR_TOP));
}

#[test]
fn cat_jumps_up_through_the_shelf_and_lands_on_it() {
    let mut config = GameConfig::new();
    config.players = 1;
    config.cat_jump_strength = 360.0;
    let mut sim = Sim::with_config(config);
    let cat = sim.cat();
    // under the shelf: body x 362..394, shelf spans x 320..416, top at y = 292
    sim.place(cat, Vec2::new(330.0, FLOOR_TOP));
    sim.run(30);
    assert!(resting_on(sim.body_bottom(cat), FLOOR_TOP));

    sim.hold(&[W]);
    sim.tick();
    sim.hold(&[]);
    sim.run(120);
    assert!(
        resting_on(sim.body_bottom(cat), 292.0),
        "bottom at {}",
        sim.body_bottom(cat)
    );
    assert_eq!(sim.anim_key(cat), "cat-idle");

    // standing on the shelf is stable
    sim.run(60);
    assert!(resting_on(sim.body_bottom(cat), 292.0));
}

#[test]
fn scripted_input_drives_the_cat() {
    let mut sim = Sim::new(1);
    let cat = sim.cat();
    sim.world.insert_resource(InputScript::new(vec![
        "D@120..123".parse().unwrap(),
    ]));
    sim.run(120);
    for _ in 0..3 {
        sim.tick();
        assert_eq!(sim.velocity(cat).x, SPEED);
    }
    sim.tick();
    assert_eq!(sim.velocity(cat).x, 0.0);
    assert_eq!(sim.anim_key(cat), "cat-idle");
}
