//! Keyboard Input and Recording
//!
//! Key state is written by key events between frames and read once per
//! frame by the movement resolver. Recordings keep only the frames where
//! something was pressed or released, so idle stretches cost nothing.

use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::core::hash::{StateHash, StateHasher};
use crate::core::vec2::Vec2;

// =============================================================================
// KEYS
// =============================================================================

/// Keys the engine reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Key {
    /// Walk up (`w`)
    Up = 0,
    /// Walk left (`a`)
    Left = 1,
    /// Walk down (`s`)
    Down = 2,
    /// Walk right (`d`)
    Right = 3,
    /// Confirm interaction with the item in range (space)
    Interact = 4,
    /// Close the detail panel (`x`)
    ClosePanel = 5,
}

impl Key {
    /// Map a keyboard character to an engine key.
    pub fn from_char(c: char) -> Option<Key> {
        match c {
            'w' => Some(Key::Up),
            'a' => Some(Key::Left),
            's' => Some(Key::Down),
            'd' => Some(Key::Right),
            ' ' => Some(Key::Interact),
            'x' => Some(Key::ClosePanel),
            _ => None,
        }
    }

    /// Movement direction bound to this key, if any.
    pub fn direction(self) -> Option<Direction> {
        match self {
            Key::Up => Some(Direction::Up),
            Key::Left => Some(Direction::Left),
            Key::Down => Some(Direction::Down),
            Key::Right => Some(Direction::Right),
            Key::Interact | Key::ClosePanel => None,
        }
    }
}

// =============================================================================
// DIRECTION
// =============================================================================

/// Direction the player is trying to walk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    /// Toward the top of the screen
    Up = 0,
    /// Toward the left edge
    Left = 1,
    /// Toward the bottom of the screen (initial facing)
    #[default]
    Down = 2,
    /// Toward the right edge
    Right = 3,
}

impl Direction {
    /// Order in which held directions are checked each frame.
    pub const PRECEDENCE: [Direction; 4] = [
        Direction::Up,
        Direction::Left,
        Direction::Down,
        Direction::Right,
    ];

    /// Unit vector of travel in screen space.
    pub fn unit(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::UP,
            Direction::Left => Vec2::LEFT,
            Direction::Down => Vec2::DOWN,
            Direction::Right => Vec2::RIGHT,
        }
    }

    /// How far the world scrolls for one step of travel.
    ///
    /// The player never moves on screen, so the world goes the other way.
    pub fn world_delta(self, step: f32) -> Vec2 {
        self.unit().scale(-step)
    }
}

// =============================================================================
// KEY STATE
// =============================================================================

/// Held movement keys plus the most recently pressed one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyState {
    /// Pressed flags indexed by `Direction as usize`
    pressed: [bool; 4],
    /// Last movement key pressed down (stays set after release)
    last_key: Option<Direction>,
}

impl KeyState {
    /// Create with nothing held.
    pub const fn new() -> Self {
        Self {
            pressed: [false; 4],
            last_key: None,
        }
    }

    /// Record a key press. Non-movement keys are ignored here.
    pub fn press(&mut self, key: Key) {
        if let Some(dir) = key.direction() {
            self.pressed[dir as usize] = true;
            self.last_key = Some(dir);
        }
    }

    /// Record a key release. `last_key` is left as is.
    pub fn release(&mut self, key: Key) {
        if let Some(dir) = key.direction() {
            self.pressed[dir as usize] = false;
        }
    }

    /// Is this direction's key currently held?
    #[inline]
    pub fn is_pressed(&self, dir: Direction) -> bool {
        self.pressed[dir as usize]
    }

    /// Most recently pressed movement key.
    #[inline]
    pub fn last_key(&self) -> Option<Direction> {
        self.last_key
    }

    /// Direction to attempt this frame.
    ///
    /// First entry of `Direction::PRECEDENCE` that is both held and the last
    /// key pressed. At most one direction is returned, so diagonal movement
    /// cannot happen.
    pub fn active_direction(&self) -> Option<Direction> {
        Direction::PRECEDENCE
            .into_iter()
            .find(|dir| self.is_pressed(*dir) && self.last_key == Some(*dir))
    }
}

// =============================================================================
// RECORDING
// =============================================================================

/// A single key transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyEvent {
    /// Key went down
    Down(Key),
    /// Key went up
    Up(Key),
}

/// Key events delivered before one frame.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameInput {
    /// Frame the events apply to (events are handled before it runs)
    pub frame: u32,
    /// Events in arrival order
    pub events: Vec<KeyEvent>,
}

/// Recording decode/encode errors.
#[derive(Debug, Error)]
pub enum RecordingError {
    /// Bytes were not a valid recording.
    #[error("Invalid recording: {0}")]
    Codec(#[from] bincode::Error),

    /// Frames were recorded out of order.
    #[error("Frame {frame} recorded after frame {last}")]
    OutOfOrder {
        /// Offending frame
        frame: u32,
        /// Last frame already recorded
        last: u32,
    },
}

/// Complete key-event log for one session.
///
/// Used for:
/// - Deterministic replay
/// - Reproducing bug reports headlessly
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRecording {
    /// Frames that had at least one event, ascending
    frames: Vec<FrameInput>,
}

impl InputRecording {
    /// Create an empty recording.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an event delivered before `frame`.
    pub fn record(&mut self, frame: u32, event: KeyEvent) -> Result<(), RecordingError> {
        match self.frames.last_mut() {
            Some(last) if last.frame == frame => {
                last.events.push(event);
                return Ok(());
            }
            Some(last) if last.frame > frame => {
                return Err(RecordingError::OutOfOrder {
                    frame,
                    last: last.frame,
                });
            }
            _ => {}
        }

        self.frames.push(FrameInput {
            frame,
            events: vec![event],
        });
        Ok(())
    }

    /// Events delivered before `frame` (empty if none).
    pub fn events_at(&self, frame: u32) -> &[KeyEvent] {
        match self.frames.binary_search_by_key(&frame, |f| f.frame) {
            Ok(idx) => &self.frames[idx].events,
            Err(_) => &[],
        }
    }

    /// All recorded frames.
    pub fn frames(&self) -> &[FrameInput] {
        &self.frames
    }

    /// Total number of events.
    pub fn event_count(&self) -> usize {
        self.frames.iter().map(|f| f.events.len()).sum()
    }

    /// Last frame with an event.
    pub fn last_frame(&self) -> Option<u32> {
        self.frames.last().map(|f| f.frame)
    }

    /// Serialize with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, RecordingError> {
        Ok(bincode::serialize(self)?)
    }

    /// Deserialize from bincode.
    pub fn from_bytes(data: &[u8]) -> Result<Self, RecordingError> {
        Ok(bincode::deserialize(data)?)
    }

    /// Hash of the recording contents.
    pub fn compute_hash(&self) -> StateHash {
        let mut hasher = StateHasher::for_input_recording();
        for frame in &self.frames {
            hasher.update_u32(frame.frame);
            for event in &frame.events {
                let (kind, key) = match event {
                    KeyEvent::Down(k) => (0u8, *k),
                    KeyEvent::Up(k) => (1u8, *k),
                };
                hasher.update_u8(kind);
                hasher.update_u8(key as u8);
            }
        }
        hasher.finalize()
    }
}

// =============================================================================
// TESTS
// =============================================================================
