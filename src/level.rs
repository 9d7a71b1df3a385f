//! The reference level: a single room with a floor, two wall pillars, a
//! table and a shelf, and one cat per player.
//!
//! [`setup_level`] inserts the resources the tick schedule needs, turns the
//! room's annotated tiles into collision geometry and spawns the cats. The
//! room can be supplied as a loaded [`Tilemap`] or built in code with
//! [`reference_room`].
use bevy_ecs::prelude::*;
use glam::Vec2;
use log::info;

use crate::components::animation::Animation;
use crate::components::boxcollider::{BoxCollider, FaceMask};
use crate::components::character::{
    AnimationKeys, CharacterController, CharacterParams, CharacterState, KeyBindings,
};
use crate::components::collideworldbounds::CollideWorldBounds;
use crate::components::collision::Colliders;
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::components::sprite::Sprite;
use crate::components::staticbody::CollisionBodySpec;
use crate::resources::animationstore::{AnimationResource, AnimationStore};
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputState;
use crate::resources::tilemapstore::{Tilemap, TilemapStore, Tileset};
use crate::resources::worldbounds::WorldBounds;
use crate::resources::worldtime::WorldTime;
use crate::systems::geometry::{BodyFamily, build_bodies, collide_layer_by_property};

pub const ROOM_MAP: &str = "room";

pub const WALL_BASE_LAYER: &str = "Wall Base";
pub const WALL_DOORS_LAYER: &str = "Wall Doors";
pub const PILLARS_LAYER: &str = "Pillars";
pub const FLOOR_LAYER: &str = "Floor";
pub const FURNITURE_BASE_LAYER: &str = "Furniture Base";
pub const FURNITURE_DECOR_LAYER: &str = "Furniture Decor";
pub const FURNITURE_FRONT_LAYER: &str = "Furniture Front";

pub const WALLS_GROUP: &str = "walls";
pub const FURNITURE_GROUP: &str = "furniture";

pub const FLOOR_PROPERTY: &str = "floor";

pub const CAT_TEXTURE: &str = "cat";
const CAT_FRAME_SIZE: f32 = 96.0;
const CAT_FALL_FRAME: usize = 68;
const SPAWN_POINTS: [Vec2; 2] = [Vec2::new(30.0, 230.0), Vec2::new(400.0, 230.0)];

const ROOM_WIDTH: u32 = 22;
const ROOM_HEIGHT: u32 = 15;
const TILE_SIZE: u32 = 32;

// global ids of the room tiles
const GID_FLOOR: u32 = 1;
const GID_RIGHT_PILLAR: u32 = 2;
const GID_LEFT_PILLAR: u32 = 3;
const GID_TABLE: u32 = 65;
const GID_SHELF_TOP: u32 = 66;
const GID_PLANT: u32 = 67;
const GID_WALL: u32 = 321;
const GID_DOOR: u32 = 322;

/// The reference room, built in code.
///
/// 22x15 tiles of 32px: a two-row floor, wall pillars on both sides, three
/// tables on row 11 and a three-tile shelf on row 9.
pub fn reference_room() -> Result<Tilemap, String> {
    let mut map = Tilemap::new(TILE_SIZE, TILE_SIZE, ROOM_WIDTH, ROOM_HEIGHT);
    map.add_tileset(
        Tileset::new("tile_room", 1, 64)
            .with_flag(0, FLOOR_PROPERTY)
            .with_flag(1, "right_facing_pillar")
            .with_flag(2, "left_facing_pillar"),
    );
    map.add_tileset(
        Tileset::new("indoors", 65, 256)
            .with_flag(0, "table")
            .with_flag(1, "shelf_top"),
    );
    map.add_tileset(Tileset::new("wall", 321, 2));

    for name in [
        WALL_BASE_LAYER,
        WALL_DOORS_LAYER,
        PILLARS_LAYER,
        FLOOR_LAYER,
        FURNITURE_BASE_LAYER,
        FURNITURE_DECOR_LAYER,
        FURNITURE_FRONT_LAYER,
    ] {
        map.add_layer(name)?;
    }

    let mut cells: Vec<(&str, u32, u32, u32)> = Vec::new();
    for y in 0..13 {
        for x in 0..ROOM_WIDTH {
            cells.push((WALL_BASE_LAYER, x, y, GID_WALL));
        }
    }
    for y in 10..13 {
        cells.push((WALL_DOORS_LAYER, 16, y, GID_DOOR));
        cells.push((WALL_DOORS_LAYER, 17, y, GID_DOOR));
    }
    for y in 1..13 {
        cells.push((PILLARS_LAYER, 0, y, GID_RIGHT_PILLAR));
        cells.push((PILLARS_LAYER, ROOM_WIDTH - 1, y, GID_LEFT_PILLAR));
    }
    for y in 13..ROOM_HEIGHT {
        for x in 0..ROOM_WIDTH {
            cells.push((FLOOR_LAYER, x, y, GID_FLOOR));
        }
    }
    for x in 6..9 {
        cells.push((FURNITURE_FRONT_LAYER, x, 11, GID_TABLE));
    }
    for x in 10..13 {
        cells.push((FURNITURE_BASE_LAYER, x, 9, GID_SHELF_TOP));
    }
    cells.push((FURNITURE_DECOR_LAYER, 11, 8, GID_PLANT));

    for (layer, x, y, gid) in cells {
        map.place(layer, x, y, gid)?;
    }
    Ok(map)
}

/// Tile families replaced by static bodies, in build order.
pub fn room_bodies() -> Vec<BodyFamily> {
    let pillar_faces = FaceMask {
        up: false,
        down: false,
        ..FaceMask::ALL
    };
    let shelf_faces = FaceMask {
        up: true,
        down: false,
        left: false,
        right: false,
    };
    vec![
        BodyFamily::new(
            PILLARS_LAYER,
            "right_facing_pillar",
            WALLS_GROUP,
            CollisionBodySpec::new(Vec2::new(16.0, 32.0), Vec2::ZERO).with_faces(pillar_faces),
        ),
        BodyFamily::new(
            PILLARS_LAYER,
            "left_facing_pillar",
            WALLS_GROUP,
            CollisionBodySpec::new(Vec2::new(16.0, 32.0), Vec2::new(16.0, 0.0))
                .with_faces(pillar_faces),
        ),
        BodyFamily::new(
            FURNITURE_FRONT_LAYER,
            "table",
            FURNITURE_GROUP,
            CollisionBodySpec::new(Vec2::new(32.0, 10.0), Vec2::new(0.0, 22.0)),
        ),
        BodyFamily::new(
            FURNITURE_BASE_LAYER,
            "shelf_top",
            FURNITURE_GROUP,
            CollisionBodySpec::new(Vec2::new(32.0, 6.0), Vec2::new(0.0, 4.0))
                .with_faces(shelf_faces),
        ),
    ]
}

/// Animation definitions of the cat spritesheet.
pub fn cat_animations() -> AnimationStore {
    let mut store = AnimationStore::new();
    store.insert(
        "cat-idle",
        AnimationResource::new(CAT_TEXTURE, vec![0, 1, 2, 3, 0], 6.0)
            .looped()
            .with_repeat_delay(1.5),
    );
    store.insert(
        "cat-walk",
        AnimationResource::range(CAT_TEXTURE, 32, 39, 10.0).looped(),
    );
    store.insert(
        "cat-jump",
        AnimationResource::range(CAT_TEXTURE, 65, 68, 4.0),
    );
    store.insert(
        "cat-paw",
        AnimationResource::range(CAT_TEXTURE, 56, 61, 12.0),
    );
    store.insert(
        "cat-sleep",
        AnimationResource::new(CAT_TEXTURE, vec![48, 49, 50, 51, 48], 2.0)
            .looped()
            .with_repeat_delay(2.0),
    );
    store
}

pub fn cat_animation_keys() -> AnimationKeys {
    AnimationKeys {
        idle: "cat-idle".to_string(),
        walk: "cat-walk".to_string(),
        jump: "cat-jump".to_string(),
        paw: "cat-paw".to_string(),
        sleep: "cat-sleep".to_string(),
        fall_frame: CAT_FALL_FRAME,
    }
}

/// Where player `index` (zero-based) appears. Players past the second are
/// spread out to the right of the first two spawn points.
pub fn spawn_point(index: usize) -> Vec2 {
    let shift = (index / SPAWN_POINTS.len()) as f32 * CAT_FRAME_SIZE / 2.0;
    SPAWN_POINTS[index % SPAWN_POINTS.len()] + Vec2::new(shift, 0.0)
}

/// Spawn a cat with its pivot (bottom-left of the sprite) at `position`.
///
/// The body is the lower middle third of the sprite: 32x24 pixels.
pub fn spawn_cat(
    world: &mut World,
    position: Vec2,
    bindings: KeyBindings,
    params: CharacterParams,
    gravity: f32,
) -> Entity {
    let keys = cat_animation_keys();
    world
        .spawn((
            MapPosition::from(position),
            Sprite::new(CAT_TEXTURE, 0, CAT_FRAME_SIZE, CAT_FRAME_SIZE)
                .with_origin(Vec2::new(0.0, 1.0)),
            BoxCollider::new(CAT_FRAME_SIZE / 3.0, CAT_FRAME_SIZE / 4.0)
                .with_offset(Vec2::new(CAT_FRAME_SIZE / 3.0, -CAT_FRAME_SIZE / 4.0)),
            RigidBody::with_gravity(gravity),
            CollideWorldBounds,
            Colliders::new()
                .with_wall_group(WALLS_GROUP)
                .with_ground_layer(ROOM_MAP, FLOOR_LAYER)
                .with_ground_group(FURNITURE_GROUP),
            Animation::new(keys.idle.clone()),
            CharacterState::default(),
            CharacterController {
                params,
                bindings,
                animations: keys,
            },
        ))
        .id()
}

/// Mark the floor as colliding and replace the room's furniture and pillars
/// with static bodies. Returns the number of bodies created.
pub fn build_room_geometry(world: &mut World) -> Result<usize, String> {
    let bodies = world.resource_scope(|world, mut store: Mut<TilemapStore>| {
        let tilemap = store
            .get_mut(ROOM_MAP)
            .ok_or_else(|| format!("no tilemap named '{ROOM_MAP}'"))?;
        collide_layer_by_property(tilemap, FLOOR_LAYER, FLOOR_PROPERTY)?;
        let mut commands = world.commands();
        build_bodies(&mut commands, tilemap, &room_bodies())
    })?;
    world.flush();
    Ok(bodies)
}

/// Insert the simulation resources, build the room and spawn one cat per
/// configured player. Returns the cats in player order.
pub fn setup_level(
    world: &mut World,
    config: &GameConfig,
    room: Tilemap,
) -> Result<Vec<Entity>, String> {
    config.validate()?;

    world.insert_resource(WorldTime::default());
    world.insert_resource(InputState::default());
    world.insert_resource(WorldBounds::new(config.world_width, config.world_height));
    world.insert_resource(cat_animations());
    let mut tilemaps = TilemapStore::new();
    tilemaps.insert(ROOM_MAP, room);
    world.insert_resource(tilemaps);

    let bodies = build_room_geometry(world)?;

    let params = CharacterParams::new(config.cat_speed, config.cat_jump_strength);
    let mut cats = Vec::with_capacity(config.players);
    for index in 0..config.players {
        let bindings = *config
            .player_bindings(index)
            .ok_or_else(|| format!("player {} has no key bindings", index + 1))?;
        let position = spawn_point(index);
        let cat = spawn_cat(world, position, bindings, params, config.gravity);
        info!(
            "player {} cat {cat:?} at ({}, {}) with keys {}/{}/{}/{}/{}",
            index + 1,
            position.x,
            position.y,
            bindings.move_left,
            bindings.move_right,
            bindings.jump,
            bindings.sleep,
            bindings.paw
        );
        cats.push(cat);
    }
    world.flush();

    info!(
        "level ready: {} static bodies, {} cats",
        bodies,
        cats.len()
    );
    Ok(cats)
}
