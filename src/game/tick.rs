//! Frame Tick
//!
//! One call per display refresh. Order matters and matches what the player
//! sees: interactions are detected against last frame's positions, then the
//! world scrolls, then the walking animation advances.

use tracing::debug;

use crate::game::config::EngineConfig;
use crate::game::events::{GameEvent, GameEventData};
use crate::game::input::{InputRecording, Key, KeyEvent};
use crate::game::interaction::{confirm_interaction, detect_interactions};
use crate::game::movement::{resolve_movement, MoveOutcome};
use crate::game::state::WorldState;

/// Result of a tick.
#[derive(Debug, Default)]
pub struct TickResult {
    /// Events generated since the previous tick (key handling included)
    pub events: Vec<GameEvent>,
    /// What the movement resolver did
    pub movement: MoveOutcome,
}

/// Apply a key event delivered between frames.
///
/// Movement keys only change held state. Interact confirms the in-range
/// item immediately; ClosePanel queues a `PanelClosed` event.
pub fn handle_key_event(state: &mut WorldState, event: KeyEvent) {
    match event {
        KeyEvent::Down(Key::Interact) => {
            confirm_interaction(state);
        }
        KeyEvent::Down(Key::ClosePanel) => {
            let tick = state.tick;
            state.push_event(GameEvent::new(tick, GameEventData::PanelClosed));
        }
        KeyEvent::Down(key) => state.keys.press(key),
        KeyEvent::Up(key) => state.keys.release(key),
    }
}

/// Run one frame.
///
/// # Arguments
///
/// * `state` - The world state (will be mutated)
/// * `config` - Engine configuration
pub fn tick(state: &mut WorldState, config: &EngineConfig) -> TickResult {
    let mut result = TickResult::default();

    // 1. Highlights and in-range item
    detect_interactions(state, config.in_range_policy);

    // 2. Scroll the world
    result.movement = resolve_movement(state, config.move_step);

    // 3. Walking animation
    let moving = state.player.moving;
    state.player.animator.advance(moving);

    #[cfg(feature = "debug-tracing")]
    tracing::trace!(
        "Tick {} hash {}",
        state.tick,
        hex::encode(state.compute_hash())
    );

    // 4. Advance frame counter
    state.tick += 1;

    result.events = state.take_events();
    result
}

/// Replay a session from a key recording.
///
/// Events recorded for frame `n` are applied just before frame `n` runs.
/// Returns the final state and every event in order.
pub fn replay(
    initial_state: WorldState,
    recording: &InputRecording,
    config: &EngineConfig,
    frame_count: u32,
) -> (WorldState, Vec<GameEvent>) {
    let mut state = initial_state;
    let mut all_events = Vec::new();

    debug!(
        "Replaying {} frames with {} recorded events",
        frame_count,
        recording.event_count()
    );

    for _ in 0..frame_count {
        for event in recording.events_at(state.tick) {
            handle_key_event(&mut state, *event);
        }

        let result = tick(&mut state, config);
        all_events.extend(result.events);
    }

    (state, all_events)
}
