//! # EcoQuest Engine
//!
//! Frame-driven game loop for EcoQuest: a top-down tile world the player
//! walks through, discovering wildlife, advancing quests and collecting NFTs.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     ECOQUEST ENGINE                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/              - Primitives                             │
//! │  ├── vec2.rs        - 2D vector                              │
//! │  ├── rect.rs        - Rectangles and the overlap test        │
//! │  └── hash.rs        - State hashing for replay checks        │
//! │                                                              │
//! │  game/              - Frame logic (deterministic)            │
//! │  ├── config.rs      - Engine tunables                        │
//! │  ├── map.rs         - Tile layers to obstacles and items     │
//! │  ├── state.rs       - World, player and item state           │
//! │  ├── input.rs       - Keys, precedence, recordings           │
//! │  ├── movement.rs    - World scrolling with collision         │
//! │  ├── animation.rs   - Walking-cycle frames                   │
//! │  ├── interaction.rs - In-range detection and confirmation    │
//! │  ├── quest.rs       - Quest progress                         │
//! │  └── tick.rs        - Per-frame loop and replay              │
//! │                                                              │
//! │  render/            - Drawing                                │
//! │  ├── surface.rs     - Surface trait, command recorder        │
//! │  └── frame.rs       - Frame draw order, quest overlay        │
//! │                                                              │
//! │  session/           - Host-facing context                    │
//! │  ├── game_session.rs- Asset gate, frame loop, dispatch       │
//! │  ├── panel.rs       - Detail panel                           │
//! │  └── collection.rs  - NFT collection and persistence         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism
//!
//! `game/` never reads clocks or randomness. Positions only ever change by
//! whole multiples of the move step, so the same map, config and key
//! recording always produce the same state hash.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;
pub mod render;
pub mod session;

// Re-export commonly used types
pub use core::rect::Rect;
pub use core::vec2::Vec2;
pub use game::config::EngineConfig;
pub use game::map::MapData;
pub use game::state::WorldState;
pub use game::input::{Key, KeyEvent, InputRecording};
pub use render::surface::{Surface, CommandBuffer};
pub use session::{GameSession, PanelState, NftCollection};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Expected display refresh rate (Hz)
pub const FRAME_RATE: u32 = 60;

/// World scroll per frame while walking
pub const MOVE_STEP: f32 = 3.0;

/// Frames each walking frame is held for
pub const FRAME_HOLD: u32 = 10;

/// Frames in a walking sheet
pub const WALK_FRAMES: u32 = 4;

/// Tile edge length in pixels
pub const TILE_SIZE: f32 = 64.0;
