//! Tilemap storage and data types.
//!
//! Provides the tile map data model the level builder works on, a JSON loader
//! for it and a store of loaded maps. Layers are row-major grids of optional
//! [`Tile`]s. Tile properties come from the tileset a tile's global id
//! belongs to and are used as predicate flags by the tile scanner.
//!
//! # JSON format
//!
//! ```json
//! {
//!   "tile_width": 32, "tile_height": 32, "width": 3, "height": 2,
//!   "tilesets": [
//!     { "name": "tile_room", "first_gid": 1, "tile_count": 64,
//!       "tiles": { "0": { "floor": true } } }
//!   ],
//!   "layers": [ { "name": "Floor", "data": [0, 0, 0, 1, 1, 1] } ]
//! }
//! ```
//!
//! A gid of `0` is an empty cell.

use std::path::Path;

use bevy_ecs::prelude::Resource;
use glam::Vec2;
use rustc_hash::FxHashMap;
use serde::Deserialize;
use serde_json::Value;

use crate::components::boxcollider::{Aabb, FaceMask};

pub type TileProperties = FxHashMap<String, Value>;

/// JavaScript-like truthiness for tile property values.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Single tile placed in a layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    /// X coordinate in tiles.
    pub x: u32,
    /// Y coordinate in tiles.
    pub y: u32,
    /// Global tile id.
    pub index: u32,
    pub properties: TileProperties,
    /// Whether the tile takes part in tile-layer collision.
    pub collides: bool,
}

impl Tile {
    pub fn new(x: u32, y: u32, index: u32) -> Self {
        Self {
            x,
            y,
            index,
            properties: TileProperties::default(),
            collides: false,
        }
    }

    /// True if the property exists and holds a truthy value.
    pub fn has_property(&self, name: &str) -> bool {
        self.properties.get(name).is_some_and(is_truthy)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Tileset {
    pub name: String,
    pub first_gid: u32,
    pub tile_count: u32,
    /// Properties keyed by tileset-local id.
    #[serde(default)]
    pub tiles: FxHashMap<u32, TileProperties>,
}

impl Tileset {
    pub fn new(name: impl Into<String>, first_gid: u32, tile_count: u32) -> Self {
        Self {
            name: name.into(),
            first_gid,
            tile_count,
            tiles: FxHashMap::default(),
        }
    }

    /// Attach a truthy flag property to a tileset-local id.
    pub fn with_flag(mut self, local_id: u32, property: &str) -> Self {
        self.tiles
            .entry(local_id)
            .or_default()
            .insert(property.to_string(), Value::Bool(true));
        self
    }

    pub fn contains(&self, gid: u32) -> bool {
        gid >= self.first_gid && gid - self.first_gid < self.tile_count
    }

    pub fn properties_for(&self, gid: u32) -> Option<&TileProperties> {
        if !self.contains(gid) {
            return None;
        }
        self.tiles.get(&(gid - self.first_gid))
    }
}

/// A named tile layer.
#[derive(Debug, Clone, PartialEq)]
pub struct TileLayer {
    pub name: String,
    pub width: u32,
    pub height: u32,
    tiles: Vec<Option<Tile>>,
}

/// Number of cells of a `width` x `height` grid. Fails if the product does
/// not fit a `u32`, so every cell index of a layer fits one too.
pub fn cell_count(width: u32, height: u32) -> Result<usize, String> {
    width
        .checked_mul(height)
        .map(|cells| cells as usize)
        .ok_or_else(|| format!("map size {width}x{height} overflows"))
}

impl TileLayer {
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Result<Self, String> {
        let cells = cell_count(width, height)?;
        Ok(Self {
            name: name.into(),
            width,
            height,
            tiles: vec![None; cells],
        })
    }

    fn cell(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| (y * self.width + x) as usize)
    }

    pub fn get(&self, x: u32, y: u32) -> Option<&Tile> {
        self.cell(x, y).and_then(|i| self.tiles[i].as_ref())
    }

    /// Place a tile at its own coordinates, replacing whatever was there.
    pub fn put_tile(&mut self, tile: Tile) -> Result<(), String> {
        let i = self.cell(tile.x, tile.y).ok_or_else(|| {
            format!(
                "tile ({}, {}) is outside layer '{}' ({}x{})",
                tile.x, tile.y, self.name, self.width, self.height
            )
        })?;
        self.tiles[i] = Some(tile);
        Ok(())
    }

    /// Remove the tile at `(x, y)`. Removing an empty cell is a no-op.
    pub fn remove_tile(&mut self, x: u32, y: u32) -> Option<Tile> {
        self.cell(x, y).and_then(|i| self.tiles[i].take())
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter().flatten()
    }

    pub fn tile_count(&self) -> usize {
        self.tiles().count()
    }

    /// Tiles satisfying `predicate`, in row-major order.
    pub fn scan<'a, F>(&'a self, predicate: F) -> impl Iterator<Item = &'a Tile> + 'a
    where
        F: Fn(&Tile) -> bool + 'a,
    {
        self.tiles().filter(move |t| predicate(t))
    }

    pub fn tiles_with_property<'a>(&'a self, property: &'a str) -> impl Iterator<Item = &'a Tile> + 'a {
        self.scan(move |t| t.has_property(property))
    }

    /// Mark every tile carrying `property` as colliding. Returns how many
    /// tiles were marked.
    pub fn set_collision_by_property(&mut self, property: &str) -> usize {
        let mut marked = 0;
        for tile in self.tiles.iter_mut().flatten() {
            if tile.has_property(property) {
                tile.collides = true;
                marked += 1;
            }
        }
        marked
    }

    fn is_colliding_at(&self, x: i64, y: i64) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        self.get(x as u32, y as u32).is_some_and(|t| t.collides)
    }

    /// Faces of a colliding tile that are not shared with a colliding
    /// neighbour. Internal seams between adjacent tiles never collide.
    pub fn tile_faces(&self, x: u32, y: u32) -> FaceMask {
        let (x, y) = (x as i64, y as i64);
        FaceMask {
            up: !self.is_colliding_at(x, y - 1),
            down: !self.is_colliding_at(x, y + 1),
            left: !self.is_colliding_at(x - 1, y),
            right: !self.is_colliding_at(x + 1, y),
        }
    }

    /// Colliding tiles whose cells intersect or touch `region`.
    pub fn colliding_tiles_in(
        &self,
        region: &Aabb,
        tile_size: Vec2,
    ) -> impl Iterator<Item = &Tile> + '_ {
        let span = |min: f32, max: f32, cell: f32, limit: u32| {
            let lo = (min / cell).floor().max(0.0) as u32;
            let hi = ((max / cell).floor() + 1.0).clamp(0.0, limit as f32) as u32;
            lo.min(hi)..hi
        };
        let xs = span(region.min.x, region.max.x, tile_size.x, self.width);
        let ys = span(region.min.y, region.max.y, tile_size.y, self.height);
        ys.flat_map(move |y| xs.clone().map(move |x| (x, y)))
            .filter_map(move |(x, y)| self.get(x, y))
            .filter(|t| t.collides)
    }
}

/// Tilemap metadata, tilesets and layers.
#[derive(Debug, Clone, PartialEq)]
pub struct Tilemap {
    /// Size of a tile in pixels.
    pub tile_width: u32,
    pub tile_height: u32,
    /// Map size in tiles.
    pub width: u32,
    pub height: u32,
    pub tilesets: Vec<Tileset>,
    pub layers: Vec<TileLayer>,
}

#[derive(Debug, Deserialize)]
struct TileLayerData {
    name: String,
    data: Vec<u32>,
}

#[derive(Debug, Deserialize)]
struct TilemapData {
    tile_width: u32,
    tile_height: u32,
    width: u32,
    height: u32,
    #[serde(default)]
    tilesets: Vec<Tileset>,
    #[serde(default)]
    layers: Vec<TileLayerData>,
}

impl Tilemap {
    pub fn new(tile_width: u32, tile_height: u32, width: u32, height: u32) -> Self {
        Self {
            tile_width,
            tile_height,
            width,
            height,
            tilesets: Vec::new(),
            layers: Vec::new(),
        }
    }

    pub fn tile_size(&self) -> Vec2 {
        Vec2::new(self.tile_width as f32, self.tile_height as f32)
    }

    pub fn add_tileset(&mut self, tileset: Tileset) {
        self.tilesets.push(tileset);
    }

    /// Append an empty layer sized to the map and return it.
    pub fn add_layer(&mut self, name: impl Into<String>) -> Result<&mut TileLayer, String> {
        self.layers
            .push(TileLayer::new(name, self.width, self.height)?);
        let last = self.layers.len() - 1;
        Ok(&mut self.layers[last])
    }

    pub fn layer(&self, name: &str) -> Option<&TileLayer> {
        self.layers.iter().find(|l| l.name == name)
    }

    pub fn layer_mut(&mut self, name: &str) -> Option<&mut TileLayer> {
        self.layers.iter_mut().find(|l| l.name == name)
    }

    /// The tileset a global id belongs to.
    pub fn tileset_for(&self, gid: u32) -> Option<&Tileset> {
        self.tilesets.iter().find(|ts| ts.contains(gid))
    }

    /// Build a tile carrying its tileset properties.
    pub fn make_tile(&self, x: u32, y: u32, gid: u32) -> Tile {
        let mut tile = Tile::new(x, y, gid);
        if let Some(props) = self.tileset_for(gid).and_then(|ts| ts.properties_for(gid)) {
            tile.properties = props.clone();
        }
        tile
    }

    /// Place a tile with global id `gid` in the named layer.
    pub fn place(&mut self, layer: &str, x: u32, y: u32, gid: u32) -> Result<(), String> {
        let tile = self.make_tile(x, y, gid);
        self.layer_mut(layer)
            .ok_or_else(|| format!("no layer named '{layer}'"))?
            .put_tile(tile)
    }

    /// World-space cell of a tile.
    pub fn tile_bounds(&self, tile: &Tile) -> Aabb {
        let size = self.tile_size();
        Aabb::from_size(Vec2::new(tile.x as f32, tile.y as f32) * size, size)
    }

    pub fn tile_center(&self, tile: &Tile) -> Vec2 {
        self.tile_bounds(tile).center()
    }

    pub fn from_json_str(json: &str) -> Result<Self, String> {
        let data: TilemapData =
            serde_json::from_str(json).map_err(|e| format!("Failed to parse tilemap JSON: {e}"))?;
        let mut map = Tilemap::new(data.tile_width, data.tile_height, data.width, data.height);
        if map.tile_width == 0 || map.tile_height == 0 {
            return Err("tile size must be non-zero".to_string());
        }
        map.tilesets = data.tilesets;
        let expected = cell_count(map.width, map.height)?;
        for layer in data.layers {
            if layer.data.len() != expected {
                return Err(format!(
                    "layer '{}' has {} cells, expected {}",
                    layer.name,
                    layer.data.len(),
                    expected
                ));
            }
            map.add_layer(layer.name.clone())?;
            for (i, gid) in layer.data.into_iter().enumerate() {
                if gid == 0 {
                    continue;
                }
                let i = i as u32;
                map.place(&layer.name, i % map.width, i / map.width, gid)?;
            }
        }
        Ok(map)
    }

    pub fn load_json_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read tilemap {}: {e}", path.display()))?;
        Self::from_json_str(&json)
    }
}

/// Registry of loaded tilemaps by key.
#[derive(Resource, Debug, Default)]
pub struct TilemapStore {
    pub map: FxHashMap<String, Tilemap>,
}

impl TilemapStore {
    /// Create an empty store.
    pub fn new() -> Self {
        TilemapStore {
            map: FxHashMap::default(),
        }
    }
    /// Get a tilemap by its key.
    pub fn get(&self, key: impl AsRef<str>) -> Option<&Tilemap> {
        self.map.get(key.as_ref())
    }
    pub fn get_mut(&mut self, key: impl AsRef<str>) -> Option<&mut Tilemap> {
        self.map.get_mut(key.as_ref())
    }
    /// Insert a tilemap with a specific key.
    pub fn insert(&mut self, key: impl Into<String>, tilemap: Tilemap) {
        self.map.insert(key.into(), tilemap);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL_MAP: &str = r#"{
        "tile_width": 32, "tile_height": 32, "width": 3, "height": 2,
        "tilesets": [
            { "name": "tile_room", "first_gid": 1, "tile_count": 64,
              "tiles": { "0": { "floor": true }, "1": { "floor": false, "decor": "rug" } } }
        ],
        "layers": [ { "name": "Floor", "data": [0, 2, 0, 1, 1, 1] } ]
    }"#;

    #[test]
    fn loads_layers_and_properties() {
        let map = Tilemap::from_json_str(SMALL_MAP).unwrap();
        let floor = map.layer("Floor").unwrap();
        assert_eq!(floor.tile_count(), 4);
        assert!(floor.get(0, 1).unwrap().has_property("floor"));
        let rug = floor.get(1, 0).unwrap();
        assert!(!rug.has_property("floor"));
        assert!(rug.has_property("decor"));
        assert!(floor.get(0, 0).is_none());
    }

    #[test]
    fn rejects_map_size_that_overflows() {
        let json = r#"{"tile_width": 32, "tile_height": 32, "width": 65536, "height": 65536,
                       "layers": [ { "name": "L", "data": [] } ]}"#;
        let err = Tilemap::from_json_str(json).unwrap_err();
        assert!(err.contains("overflows"), "{err}");

        let mut map = Tilemap::new(32, 32, u32::MAX, 2);
        assert!(map.add_layer("Floor").is_err());
        assert!(map.layers.is_empty());
        assert!(TileLayer::new("Floor", 2, u32::MAX).is_err());
        assert_eq!(cell_count(22, 15), Ok(330));
    }

    #[test]
    fn rejects_wrong_layer_size() {
        let json = r#"{"tile_width": 32, "tile_height": 32, "width": 2, "height": 2,
                       "layers": [ { "name": "L", "data": [0, 0, 0] } ]}"#;
        assert!(Tilemap::from_json_str(json).is_err());
    }

    #[test]
    fn truthiness_follows_value_kind() {
        let mut tile = Tile::new(0, 0, 1);
        tile.properties.insert("zero".into(), Value::from(0));
        tile.properties.insert("one".into(), Value::from(1));
        tile.properties.insert("empty".into(), Value::from(""));
        tile.properties.insert("null".into(), Value::Null);
        assert!(!tile.has_property("zero"));
        assert!(tile.has_property("one"));
        assert!(!tile.has_property("empty"));
        assert!(!tile.has_property("null"));
        assert!(!tile.has_property("missing"));
    }

    #[test]
    fn scan_yields_matching_tiles_in_row_major_order() {
        let map = Tilemap::from_json_str(SMALL_MAP).unwrap();
        let floor = map.layer("Floor").unwrap();
        let hits: Vec<(u32, u32)> = floor
            .tiles_with_property("floor")
            .map(|t| (t.x, t.y))
            .collect();
        assert_eq!(hits, vec![(0, 1), (1, 1), (2, 1)]);
        assert_eq!(floor.scan(|t| t.index == 2).count(), 1);
    }

    #[test]
    fn remove_tile_is_idempotent() {
        let mut map = Tilemap::from_json_str(SMALL_MAP).unwrap();
        let floor = map.layer_mut("Floor").unwrap();
        assert!(floor.remove_tile(1, 1).is_some());
        assert!(floor.remove_tile(1, 1).is_none());
        assert!(floor.remove_tile(99, 99).is_none());
    }

    #[test]
    fn interesting_faces_skip_internal_seams() {
        let mut map = Tilemap::from_json_str(SMALL_MAP).unwrap();
        let floor = map.layer_mut("Floor").unwrap();
        assert_eq!(floor.set_collision_by_property("floor"), 3);
        let middle = floor.tile_faces(1, 1);
        assert!(middle.up && middle.down);
        assert!(!middle.left && !middle.right);
        let left = floor.tile_faces(0, 1);
        assert!(left.left && !left.right);
    }

    #[test]
    fn colliding_tiles_in_region() {
        let mut map = Tilemap::from_json_str(SMALL_MAP).unwrap();
        map.layer_mut("Floor")
            .unwrap()
            .set_collision_by_property("floor");
        let floor = map.layer("Floor").unwrap();
        let region = Aabb::from_size(Vec2::new(20.0, 40.0), Vec2::new(20.0, 24.0));
        let hits: Vec<u32> = floor
            .colliding_tiles_in(&region, map.tile_size())
            .map(|t| t.x)
            .collect();
        assert_eq!(hits, vec![0, 1]);
        let outside = Aabb::from_size(Vec2::new(-100.0, -100.0), Vec2::new(10.0, 10.0));
        assert_eq!(floor.colliding_tiles_in(&outside, map.tile_size()).count(), 0);
    }

    #[test]
    fn tileset_lookup_by_gid_range() {
        let mut map = Tilemap::new(32, 32, 1, 1);
        map.add_tileset(Tileset::new("room", 1, 64));
        map.add_tileset(Tileset::new("indoors", 65, 256));
        assert_eq!(map.tileset_for(1).unwrap().name, "room");
        assert_eq!(map.tileset_for(70).unwrap().name, "indoors");
        assert!(map.tileset_for(400).is_none());
    }

    #[test]
    fn tile_bounds_and_center() {
        let map = Tilemap::new(32, 32, 4, 4);
        let tile = Tile::new(2, 3, 1);
        let b = map.tile_bounds(&tile);
        assert_eq!(b.min, Vec2::new(64.0, 96.0));
        assert_eq!(b.bottom(), 128.0);
        assert_eq!(map.tile_center(&tile), Vec2::new(80.0, 112.0));
    }
}
