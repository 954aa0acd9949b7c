//! Tile Map Loading
//!
//! Turns flat tile layers plus zone records into obstacles and items.
//! Layers are row-major and reshaped into rows of `columns` tiles.

use std::fs;
use std::path::Path;

use serde::{Serialize, Deserialize};
use thiserror::Error;
use tracing::debug;

use crate::core::rect::Rect;
use crate::core::vec2::Vec2;
use crate::game::config::MapLayout;
use crate::game::state::{ItemState, Obstacle};

/// Name used when a slot has no zone record.
pub const DEFAULT_ITEM_NAME: &str = "Unknown";

/// Image used when a slot has no image.
pub const DEFAULT_ITEM_IMAGE: &str = "assets/default.png";

/// Rarity used when a slot has no rarity.
pub const DEFAULT_ITEM_RARITY: &str = "Unknown";

/// Map loading errors.
#[derive(Debug, Error)]
pub enum MapError {
    /// Row width of zero.
    #[error("Map must have at least one column")]
    ZeroColumns,

    /// Layer cannot be split into whole rows.
    #[error("{layer} layer has {len} tiles, not a multiple of {columns} columns")]
    RaggedLayer {
        /// Layer name
        layer: &'static str,
        /// Tiles in the layer
        len: usize,
        /// Row width
        columns: usize,
    },

    /// File could not be read.
    #[error("Failed to read map: {0}")]
    Io(#[from] std::io::Error),

    /// File was not valid map JSON.
    #[error("Invalid map JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Display data attached to a zone. Every field may be missing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneData {
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Image reference
    #[serde(default)]
    pub image: Option<String>,
    /// Rarity label
    #[serde(default)]
    pub rarity: Option<String>,
    /// Description text
    #[serde(default)]
    pub description: Option<String>,
}

/// Zone record matched to an item slot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InteractionZone {
    /// Slot number this zone describes
    pub id: u32,
    /// Screen X of the slot at start
    pub x: f32,
    /// Screen Y of the slot at start
    pub y: f32,
    /// Display data
    #[serde(default)]
    pub data: ZoneData,
}

/// Raw map: two tile layers plus zone records.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MapData {
    /// Row width override (falls back to the layout's)
    #[serde(default)]
    pub columns: Option<usize>,
    /// Collision layer
    #[serde(default)]
    pub collisions: Vec<u32>,
    /// Object layer
    #[serde(default)]
    pub objects: Vec<u32>,
    /// Zone records for item slots
    #[serde(default)]
    pub zones: Vec<InteractionZone>,
}

/// Obstacles and items built from a map.
#[derive(Clone, Debug, Default)]
pub struct MapLayers {
    /// Collision tiles
    pub obstacles: Vec<Obstacle>,
    /// Item slots, numbered from 1
    pub items: Vec<ItemState>,
}

impl MapData {
    /// Parse from JSON text.
    pub fn from_json(text: &str) -> Result<Self, MapError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Build obstacles and items.
    pub fn build(&self, layout: &MapLayout) -> Result<MapLayers, MapError> {
        let columns = self.columns.unwrap_or(layout.columns);
        if columns == 0 {
            return Err(MapError::ZeroColumns);
        }

        let collision_rows = reshape("collision", &self.collisions, columns)?;
        let object_rows = reshape("object", &self.objects, columns)?;

        let mut obstacles = Vec::new();
        for (i, row) in collision_rows.iter().enumerate() {
            for (j, &code) in row.iter().enumerate() {
                if code == layout.collision_code {
                    obstacles.push(Obstacle::new(tile_position(layout, i, j), layout.tile_size));
                }
            }
        }

        let mut slots = Vec::new();
        for (i, row) in object_rows.iter().enumerate() {
            for (j, &code) in row.iter().enumerate() {
                if code == layout.item_code {
                    slots.push(tile_position(layout, i, j));
                }
            }
        }

        let slot_count = slots.len() as u32;
        let mut claimed = vec![false; self.zones.len()];
        let mut items = Vec::with_capacity(slots.len());
        for (id, position) in (1u32..).zip(slots) {
            let zone = self.match_zone(id, position, layout.zone_tolerance, slot_count, &mut claimed);
            if zone.is_none() {
                debug!("Item slot {} at {} has no zone data, using defaults", id, position);
            }
            items.push(make_item(id, position, layout.tile_size, zone));
        }

        Ok(MapLayers { obstacles, items })
    }

    /// Zone for a slot: exact id first, then the first unclaimed zone within
    /// tolerance. Zones whose id names a real slot are reserved for that slot.
    fn match_zone(
        &self,
        id: u32,
        position: Vec2,
        tolerance: f32,
        slot_count: u32,
        claimed: &mut [bool],
    ) -> Option<&InteractionZone> {
        let index = self.zones.iter().position(|z| z.id == id).or_else(|| {
            self.zones.iter().enumerate().position(|(k, z)| {
                !claimed[k]
                    && !(1..=slot_count).contains(&z.id)
                    && (z.x - position.x).abs() <= tolerance
                    && (z.y - position.y).abs() <= tolerance
            })
        })?;
        claimed[index] = true;
        self.zones.get(index)
    }

    /// Small built-in map used by the demo driver and tests.
    ///
    /// 16x16 tiles with a solid border, a wall segment above the first item,
    /// and three described items. The player starts near row 9, column 8.
    pub fn demo() -> Self {
        const COLUMNS: usize = 16;
        const ROWS: usize = 16;
        const WALL: u32 = 193;
        const SLOT: u32 = 430;

        let mut collisions = vec![0u32; COLUMNS * ROWS];
        for i in 0..ROWS {
            for j in 0..COLUMNS {
                if i == 0 || j == 0 || i == ROWS - 1 || j == COLUMNS - 1 {
                    collisions[i * COLUMNS + j] = WALL;
                }
            }
        }
        for j in 6..=10 {
            collisions[4 * COLUMNS + j] = WALL;
        }

        let mut objects = vec![0u32; COLUMNS * ROWS];
        objects[6 * COLUMNS + 8] = SLOT;
        objects[10 * COLUMNS + 11] = SLOT;
        objects[13 * COLUMNS + 4] = SLOT;

        let zone = |id: u32, x: f32, y: f32, name: &str, image: &str, rarity: &str, description: &str| {
            InteractionZone {
                id,
                x,
                y,
                data: ZoneData {
                    name: Some(name.to_string()),
                    image: Some(image.to_string()),
                    rarity: Some(rarity.to_string()),
                    description: Some(description.to_string()),
                },
            }
        };

        Self {
            columns: Some(COLUMNS),
            collisions,
            objects,
            zones: vec![
                zone(1, 482.0, 14.0, "Mushroom", "assets/wildlife-images/mushroom.jpeg", "Common",
                     "A fungus that recycles fallen leaves into soil."),
                zone(2, 674.0, 270.0, "Red Fox", "assets/wildlife-images/fox.jpeg", "Rare",
                     "Hunts at dusk along the forest edge."),
                zone(3, 226.0, 462.0, "Old Oak", "assets/wildlife-images/oak.jpeg", "Epic",
                     "Stores carbon for centuries."),
            ],
        }
    }
}

/// Split a flat layer into rows.
fn reshape<'a>(layer: &'static str, tiles: &'a [u32], columns: usize) -> Result<Vec<&'a [u32]>, MapError> {
    if tiles.len() % columns != 0 {
        return Err(MapError::RaggedLayer {
            layer,
            len: tiles.len(),
            columns,
        });
    }
    Ok(tiles.chunks(columns).collect())
}

/// Screen position of tile (row i, column j) at start.
fn tile_position(layout: &MapLayout, i: usize, j: usize) -> Vec2 {
    Vec2::new(
        j as f32 * layout.tile_size + layout.offset.x + layout.tile_inset,
        i as f32 * layout.tile_size + layout.offset.y + layout.tile_inset,
    )
}

/// Build an item, filling missing zone fields with defaults.
fn make_item(id: u32, position: Vec2, size: f32, zone: Option<&InteractionZone>) -> ItemState {
    let data = zone.map(|z| &z.data);
    let field = |value: Option<&String>, default: &str| -> String {
        match value {
            Some(v) if !v.is_empty() => v.clone(),
            _ => default.to_string(),
        }
    };

    ItemState {
        id,
        rect: Rect::at(position, size, size),
        name: field(data.and_then(|d| d.name.as_ref()), DEFAULT_ITEM_NAME),
        image: field(data.and_then(|d| d.image.as_ref()), DEFAULT_ITEM_IMAGE),
        rarity: field(data.and_then(|d| d.rarity.as_ref()), DEFAULT_ITEM_RARITY),
        description: field(data.and_then(|d| d.description.as_ref()), ""),
        highlight: false,
    }
}
