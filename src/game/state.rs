//! World State Definitions
//!
//! Everything the loop mutates lives in `WorldState`. The session owns one
//! instance; nothing is global.

use serde::{Serialize, Deserialize};

use crate::core::hash::{compute_state_hash, StateHash};
use crate::core::rect::Rect;
use crate::core::vec2::Vec2;
use crate::game::animation::SpriteAnimator;
use crate::game::config::{AssetPaths, EngineConfig};
use crate::game::events::GameEvent;
use crate::game::input::{Direction, KeyState};
use crate::game::map::{MapData, MapError};
use crate::game::quest::QuestLog;

// =============================================================================
// OBSTACLE
// =============================================================================

/// Invisible collision tile.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Screen rectangle (moves with the world)
    pub rect: Rect,
}

impl Obstacle {
    /// Create an obstacle of `size` x `size` at a position.
    pub fn new(position: Vec2, size: f32) -> Self {
        Self {
            rect: Rect::at(position, size, size),
        }
    }
}

// =============================================================================
// ITEM
// =============================================================================

/// Interactable item placed from the object layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemState {
    /// Slot number (1-based, row-major order in the object layer)
    pub id: u32,
    /// Screen rectangle (moves with the world)
    pub rect: Rect,
    /// Display name
    pub name: String,
    /// Image reference
    pub image: String,
    /// Rarity label
    pub rarity: String,
    /// Free-text description
    pub description: String,
    /// True only while the player overlaps this item
    pub highlight: bool,
}

// =============================================================================
// BACKGROUND
// =============================================================================

/// Map image drawn first every frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Background {
    /// Screen position of the image's top-left corner
    pub position: Vec2,
    /// Image reference
    pub image: String,
}

// =============================================================================
// PLAYER
// =============================================================================

/// Walking sheets, one per facing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionalSprites {
    /// Facing up
    pub up: String,
    /// Facing left
    pub left: String,
    /// Facing down
    pub down: String,
    /// Facing right
    pub right: String,
}

impl DirectionalSprites {
    /// Sheet for a facing.
    pub fn for_direction(&self, dir: Direction) -> &str {
        match dir {
            Direction::Up => &self.up,
            Direction::Left => &self.left,
            Direction::Down => &self.down,
            Direction::Right => &self.right,
        }
    }
}

impl From<&AssetPaths> for DirectionalSprites {
    fn from(assets: &AssetPaths) -> Self {
        Self {
            up: assets.player_up.clone(),
            left: assets.player_left.clone(),
            down: assets.player_down.clone(),
            right: assets.player_right.clone(),
        }
    }
}

/// Player sprite. Stays put on screen; the world scrolls around it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerSprite {
    /// Fixed screen position
    pub position: Vec2,
    /// Width of one animation frame
    pub width: f32,
    /// Height of the sheet
    pub height: f32,
    /// Sheets per facing
    pub sprites: DirectionalSprites,
    /// Facing of the sheet currently shown
    pub facing: Direction,
    /// True while a movement key is active this frame
    pub moving: bool,
    /// Walking-cycle counter
    pub animator: SpriteAnimator,
}

impl PlayerSprite {
    /// Create the player from configuration.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            position: config.player_position(),
            width: config.default_player_size.x,
            height: config.default_player_size.y,
            sprites: DirectionalSprites::from(&config.assets),
            facing: Direction::Down,
            moving: false,
            animator: SpriteAnimator::new(config.frame_hold, config.walk_frames),
        }
    }

    /// Bounding box used for collision and interaction.
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::at(self.position, self.width, self.height)
    }

    /// Sheet currently shown.
    pub fn image(&self) -> &str {
        self.sprites.for_direction(self.facing)
    }

    /// Adopt the real sheet size once the image has loaded.
    pub fn apply_sheet_size(&mut self, sheet_width: f32, sheet_height: f32) {
        self.width = sheet_width / self.animator.max_frames() as f32;
        self.height = sheet_height;
    }

    /// Source rectangle of the current frame within the sheet.
    pub fn frame_rect(&self) -> Rect {
        Rect::new(
            self.animator.frame() as f32 * self.width,
            0.0,
            self.width,
            self.height,
        )
    }
}

// =============================================================================
// WORLD STATE
// =============================================================================

/// Complete state of a running world.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorldState {
    /// Frames simulated so far
    pub tick: u32,

    /// Map image
    pub background: Background,

    /// Collision tiles, in layer order
    pub obstacles: Vec<Obstacle>,

    /// Interactable items, in slot order
    pub items: Vec<ItemState>,

    /// The player
    pub player: PlayerSprite,

    /// Held keys
    pub keys: KeyState,

    /// Quest progress
    pub quests: QuestLog,

    /// Indices of every item overlapping the player this frame
    pub overlapping: Vec<usize>,

    /// Index of the item a confirm press would interact with
    pub in_range: Option<usize>,

    /// Events pending collection
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl WorldState {
    /// Build a fresh world from map data.
    pub fn from_map(map: &MapData, config: &EngineConfig) -> Result<Self, MapError> {
        let layers = map.build(&config.layout)?;

        Ok(Self {
            tick: 0,
            background: Background {
                position: config.layout.offset,
                image: config.assets.background.clone(),
            },
            obstacles: layers.obstacles,
            items: layers.items,
            player: PlayerSprite::from_config(config),
            keys: KeyState::new(),
            quests: QuestLog::default(),
            overlapping: Vec::new(),
            in_range: None,
            events: Vec::new(),
        })
    }

    /// Shift every movable (background, obstacles, items) by the same delta.
    pub fn shift_movables(&mut self, delta: Vec2) {
        self.background.position += delta;
        for obstacle in &mut self.obstacles {
            obstacle.rect.position += delta;
        }
        for item in &mut self.items {
            item.rect.position += delta;
        }
    }

    /// Item a confirm press would interact with.
    pub fn item_in_range(&self) -> Option<&ItemState> {
        self.in_range.and_then(|idx| self.items.get(idx))
    }

    /// Find an item by slot id.
    pub fn item(&self, id: u32) -> Option<&ItemState> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Queue an event.
    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drain queued events.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Hash of everything that affects future frames.
    pub fn compute_hash(&self) -> StateHash {
        compute_state_hash(self.tick, |hasher| {
            hasher.update_vec2(self.background.position);

            hasher.update_u32(self.obstacles.len() as u32);
            for obstacle in &self.obstacles {
                hasher.update_vec2(obstacle.rect.position);
            }

            hasher.update_u32(self.items.len() as u32);
            for item in &self.items {
                hasher.update_u32(item.id);
                hasher.update_str(&item.name);
                hasher.update_vec2(item.rect.position);
                hasher.update_bool(item.highlight);
            }

            let player = &self.player;
            hasher.update_vec2(player.position);
            hasher.update_f32(player.width);
            hasher.update_f32(player.height);
            hasher.update_u8(player.facing as u8);
            hasher.update_bool(player.moving);
            hasher.update_u32(player.animator.frame());
            hasher.update_u32(player.animator.elapsed());

            for dir in Direction::PRECEDENCE {
                hasher.update_bool(self.keys.is_pressed(dir));
            }
            hasher.update_u8(self.keys.last_key().map_or(u8::MAX, |d| d as u8));

            for quest in self.quests.quests() {
                hasher.update_u32(quest.id);
                hasher.update_u32(quest.progress);
                hasher.update_bool(quest.completed);
            }

            hasher.update_u32(self.in_range.map_or(u32::MAX, |i| i as u32));
        })
    }
}
