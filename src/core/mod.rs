//! Core primitives.
//!
//! Geometry and hashing shared by the simulation and the renderer.
//! Nothing in here knows about keys, quests or drawing surfaces.

pub mod vec2;
pub mod rect;
pub mod hash;

// Re-export core types
pub use vec2::Vec2;
pub use rect::Rect;
pub use hash::{compute_state_hash, StateHash, StateHasher};
