//! Rendering Module
//!
//! Turns world state into draw calls on a `Surface`. The engine never owns
//! a real canvas; hosts implement `Surface` and headless runs use
//! `CommandBuffer`.

pub mod surface;
pub mod frame;

pub use surface::{Rgba, TextStyle, Surface, DrawCommand, CommandBuffer};
pub use frame::{render_frame, draw_quest_panel};
