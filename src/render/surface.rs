//! Drawing Surface
//!
//! The three primitives a frame needs. `CommandBuffer` records them so a
//! frame can be inspected in tests and headless runs without a real canvas.

use std::fmt;

use serde::{Serialize, Deserialize};

use crate::core::rect::Rect;
use crate::core::vec2::Vec2;

/// RGBA colour with 8-bit channels and a fractional alpha.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
    /// Alpha in 0.0..=1.0
    pub a: f32,
}

impl Rgba {
    /// Fully transparent (obstacles, idle items).
    pub const TRANSPARENT: Self = Self::new(255, 255, 255, 0.0);

    /// Highlight fill for an item the player overlaps.
    pub const HIGHLIGHT: Self = Self::new(255, 255, 0, 0.5);

    /// Quest panel backdrop.
    pub const PANEL_BACKDROP: Self = Self::new(0, 0, 0, 0.6);

    /// Quest panel text.
    pub const WHITE: Self = Self::new(255, 255, 255, 1.0);

    /// Create a colour.
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Font and colour for text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Fill colour
    pub color: Rgba,
    /// CSS font shorthand
    pub font: String,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: Rgba::WHITE,
            font: "14px Arial".to_string(),
        }
    }
}

/// Something a frame can be drawn onto.
pub trait Surface {
    /// Fill a rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Rgba);

    /// Draw an image with its top-left corner at `position`.
    ///
    /// With a `source` rectangle only that slice is drawn, at the slice's
    /// size; otherwise the whole image at its natural size.
    fn draw_image(&mut self, image: &str, source: Option<Rect>, position: Vec2);

    /// Draw text with its baseline starting at `position`.
    fn fill_text(&mut self, text: &str, position: Vec2, style: &TextStyle);
}

/// A recorded draw call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// `Surface::fill_rect`
    FillRect {
        /// Area filled
        rect: Rect,
        /// Fill colour
        color: Rgba,
    },
    /// `Surface::draw_image`
    DrawImage {
        /// Image reference
        image: String,
        /// Slice of the image, if any
        source: Option<Rect>,
        /// Top-left corner on screen
        position: Vec2,
    },
    /// `Surface::fill_text`
    FillText {
        /// Text drawn
        text: String,
        /// Baseline start
        position: Vec2,
        /// Font and colour
        style: TextStyle,
    },
}

/// Surface that records every call.
#[derive(Clone, Debug, Default)]
pub struct CommandBuffer {
    commands: Vec<DrawCommand>,
}

impl CommandBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands recorded so far.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drop all commands (start of a new frame).
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Number of commands recorded.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Is the buffer empty?
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Text of every `FillText` command, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::FillText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for CommandBuffer {
    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn draw_image(&mut self, image: &str, source: Option<Rect>, position: Vec2) {
        self.commands.push(DrawCommand::DrawImage {
            image: image.to_string(),
            source,
            position,
        });
    }

    fn fill_text(&mut self, text: &str, position: Vec2, style: &TextStyle) {
        self.commands.push(DrawCommand::FillText {
            text: text.to_string(),
            position,
            style: style.clone(),
        });
    }
}
