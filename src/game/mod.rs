//! Game Logic Module
//!
//! Everything that runs inside a frame. No drawing and no I/O beyond
//! loading maps and configs.
//!
//! ## Module Structure
//!
//! - `config`: Engine tunables and asset paths
//! - `map`: Tile layers to obstacles and items
//! - `state`: World state, player sprite, items
//! - `input`: Key state, direction precedence, recordings
//! - `movement`: All-or-nothing world scrolling
//! - `animation`: Walking-cycle frame counter
//! - `interaction`: In-range detection and confirmation
//! - `quest`: Quest progress
//! - `tick`: Per-frame loop and replay
//! - `events`: Events for the session and for replay comparison

pub mod config;
pub mod map;
pub mod state;
pub mod input;
pub mod movement;
pub mod animation;
pub mod interaction;
pub mod quest;
pub mod tick;
pub mod events;

// Re-export key types
pub use config::{EngineConfig, ConfigError, AssetPaths, MapLayout};
pub use map::{MapData, MapError, InteractionZone, ZoneData};
pub use state::{WorldState, PlayerSprite, ItemState, Obstacle};
pub use input::{Key, KeyEvent, Direction, KeyState, InputRecording, RecordingError};
pub use movement::MoveOutcome;
pub use interaction::{InRangePolicy, InteractionDetail, CollectedItem};
pub use quest::{Quest, QuestLog};
pub use tick::{tick, replay, handle_key_event, TickResult};
pub use events::{GameEvent, GameEventData};
