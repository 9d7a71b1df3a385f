//! Collision geometry builder.
//!
//! Turns annotated tiles into static bodies. Each matching tile is replaced by
//! an entity carrying a [`StaticBody`], a [`Group`], a [`MapPosition`] at the
//! tile's center, a [`BoxCollider`] built from the family's
//! [`CollisionBodySpec`] and a [`Sprite`] showing the tile's frame. The source
//! tile is removed from its layer so the tile and the body never both collide.
//!
//! Bodies are built in the order the caller lists them; no overlap detection
//! is performed.
use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::boxcollider::BoxCollider;
use crate::components::group::Group;
use crate::components::mapposition::MapPosition;
use crate::components::sprite::Sprite;
use crate::components::staticbody::{CollisionBodySpec, StaticBody};
use crate::resources::tilemapstore::Tilemap;

/// A family of tiles that become static bodies: every tile of `layer`
/// carrying `property` is replaced by a body in `group` shaped by `spec`.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyFamily {
    pub layer: String,
    pub property: String,
    pub group: String,
    pub spec: CollisionBodySpec,
}

impl BodyFamily {
    pub fn new(layer: &str, property: &str, group: &str, spec: CollisionBodySpec) -> Self {
        Self {
            layer: layer.to_string(),
            property: property.to_string(),
            group: group.to_string(),
            spec,
        }
    }
}

/// Replace the tile at `(x, y)` of `layer` with a static body.
///
/// Returns `Ok(None)` when the cell is already empty, so building the same
/// tile twice is a no-op. Fails if the layer does not exist or the tile's
/// global id belongs to no tileset.
pub fn replace_tile_with_body(
    commands: &mut Commands,
    tilemap: &mut Tilemap,
    layer: &str,
    x: u32,
    y: u32,
    group: &str,
    spec: &CollisionBodySpec,
) -> Result<Option<Entity>, String> {
    let source = tilemap
        .layer(layer)
        .ok_or_else(|| format!("no layer named '{layer}'"))?;
    let Some(tile) = source.get(x, y) else {
        debug!("tile ({x}, {y}) of '{layer}' already removed");
        return Ok(None);
    };
    let tileset = tilemap.tileset_for(tile.index).ok_or_else(|| {
        format!(
            "tile ({x}, {y}) of '{layer}' has gid {} outside every tileset",
            tile.index
        )
    })?;
    let frame = (tile.index - tileset.first_gid) as usize;
    let center = tilemap.tile_center(tile);
    let cell = tilemap.tile_size();

    let entity = commands
        .spawn((
            StaticBody {
                spec: *spec,
                source_layer: layer.to_string(),
                tile_x: x,
                tile_y: y,
            },
            Group::new(group),
            MapPosition::from(center),
            spec.collider(cell),
            Sprite::new(tileset.name.clone(), frame, cell.x, cell.y),
        ))
        .id();

    if let Some(source) = tilemap.layer_mut(layer) {
        source.remove_tile(x, y);
    }
    debug!("tile ({x}, {y}) of '{layer}' replaced by {entity:?} in group '{group}'");
    Ok(Some(entity))
}

/// Replace every tile of `layer` carrying `property` with a static body.
///
/// Matching tiles are collected first and then built one by one, in
/// row-major order.
pub fn replace_tiles_by_property(
    commands: &mut Commands,
    tilemap: &mut Tilemap,
    layer: &str,
    property: &str,
    group: &str,
    spec: &CollisionBodySpec,
) -> Result<Vec<Entity>, String> {
    let cells: Vec<(u32, u32)> = tilemap
        .layer(layer)
        .ok_or_else(|| format!("no layer named '{layer}'"))?
        .tiles_with_property(property)
        .map(|t| (t.x, t.y))
        .collect();

    let mut bodies = Vec::with_capacity(cells.len());
    for (x, y) in cells {
        if let Some(entity) = replace_tile_with_body(commands, tilemap, layer, x, y, group, spec)? {
            bodies.push(entity);
        }
    }
    Ok(bodies)
}

/// Build every family in order. Returns the number of bodies created.
pub fn build_bodies(
    commands: &mut Commands,
    tilemap: &mut Tilemap,
    families: &[BodyFamily],
) -> Result<usize, String> {
    let mut total = 0;
    for family in families {
        let bodies = replace_tiles_by_property(
            commands,
            tilemap,
            &family.layer,
            &family.property,
            &family.group,
            &family.spec,
        )?;
        info!(
            "{} '{}' tiles of '{}' became '{}' bodies",
            bodies.len(),
            family.property,
            family.layer,
            family.group
        );
        total += bodies.len();
    }
    Ok(total)
}

/// Mark the tiles of `layer` carrying `property` as colliding, making the
/// layer itself a collision surface.
pub fn collide_layer_by_property(
    tilemap: &mut Tilemap,
    layer: &str,
    property: &str,
) -> Result<usize, String> {
    let marked = tilemap
        .layer_mut(layer)
        .ok_or_else(|| format!("no layer named '{layer}'"))?
        .set_collision_by_property(property);
    info!("{marked} '{property}' tiles of '{layer}' collide");
    Ok(marked)
}
