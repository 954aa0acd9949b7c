//! Game Session
//!
//! Owns one world and drives it: gates start-up on asset loading, applies
//! key events between frames, runs the tick, forwards events to the detail
//! panel and the NFT collection, then draws the frame.
//!
//! Every key event is recorded against the frame it preceded, so a session
//! can be replayed from its starting snapshot and checked hash-for-hash.

use std::collections::BTreeSet;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::core::hash::StateHash;
use crate::game::config::{ConfigError, EngineConfig};
use crate::game::events::{GameEvent, GameEventData};
use crate::game::input::{InputRecording, Key, KeyEvent};
use crate::game::map::{MapData, MapError};
use crate::game::state::WorldState;
use crate::game::tick::{handle_key_event, replay, tick, TickResult};
use crate::render::frame::render_frame;
use crate::render::surface::Surface;
use crate::session::collection::CollectionSink;
use crate::session::panel::DetailPanel;

/// Events kept for `take_events` before the oldest are dropped.
pub const MAX_PENDING_EVENTS: usize = 4096;

/// Session errors.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Required images have not been reported loaded.
    #[error("Assets not loaded: {}", .missing.join(", "))]
    AssetsNotReady {
        /// Paths still outstanding
        missing: Vec<String>,
    },

    /// `frame` called before `start`.
    #[error("Session not started")]
    NotStarted,

    /// `start` called twice.
    #[error("Session already started")]
    AlreadyStarted,

    /// Session was stopped.
    #[error("Session stopped")]
    Stopped,

    /// Map could not be built.
    #[error("Map error: {0}")]
    Map(#[from] MapError),

    /// Configuration failed validation.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Session lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Waiting for assets.
    Loading,
    /// Frames are running.
    Running,
    /// Ended; no further frames.
    Stopped,
}

/// A running game.
pub struct GameSession<P: DetailPanel, C: CollectionSink> {
    config: EngineConfig,
    state: WorldState,
    /// Snapshot taken at `start`, used for replay checks
    initial: Option<WorldState>,
    phase: SessionPhase,
    loaded: BTreeSet<String>,
    recording: InputRecording,
    events: Vec<GameEvent>,
    panel: P,
    collection: C,
}

impl<P: DetailPanel, C: CollectionSink> GameSession<P, C> {
    /// Create a session in the loading phase.
    pub fn new(map: &MapData, config: EngineConfig, panel: P, collection: C) -> Result<Self, SessionError> {
        config.validate()?;
        let state = WorldState::from_map(map, &config)?;
        info!(
            "Session created: {} obstacles, {} items",
            state.obstacles.len(),
            state.items.len()
        );

        Ok(Self {
            config,
            state,
            initial: None,
            phase: SessionPhase::Loading,
            loaded: BTreeSet::new(),
            recording: InputRecording::new(),
            events: Vec::new(),
            panel,
            collection,
        })
    }

    /// Report an image as loaded.
    ///
    /// The down-facing player sheet also fixes the player's frame size.
    /// Only honoured while loading; the start snapshot must not change.
    pub fn mark_asset_loaded(&mut self, path: &str, width: f32, height: f32) {
        if self.phase != SessionPhase::Loading {
            debug!("Ignoring late asset {} while {:?}", path, self.phase);
            return;
        }

        if path == self.config.assets.player_down {
            self.state.player.apply_sheet_size(width, height);
            debug!(
                "Player sheet {}x{} loaded, frame {}x{}",
                width, height, self.state.player.width, self.state.player.height
            );
        }
        self.loaded.insert(path.to_string());
    }

    /// Images still required before `start`.
    pub fn missing_assets(&self) -> Vec<String> {
        [&self.config.assets.background, &self.config.assets.player_down]
            .into_iter()
            .filter(|path| !self.loaded.contains(path.as_str()))
            .cloned()
            .collect()
    }

    /// Begin running frames.
    pub fn start(&mut self) -> Result<(), SessionError> {
        match self.phase {
            SessionPhase::Running => return Err(SessionError::AlreadyStarted),
            SessionPhase::Stopped => return Err(SessionError::Stopped),
            SessionPhase::Loading => {}
        }

        let missing = self.missing_assets();
        if !missing.is_empty() {
            return Err(SessionError::AssetsNotReady { missing });
        }

        self.initial = Some(self.state.clone());
        self.phase = SessionPhase::Running;
        info!("Session started");
        Ok(())
    }

    /// End the session.
    pub fn stop(&mut self) {
        if self.phase != SessionPhase::Stopped {
            info!(
                "Session stopped at frame {} ({} quests completed)",
                self.state.tick,
                self.state.quests.completed_count()
            );
        }
        self.phase = SessionPhase::Stopped;
    }

    /// Key pressed.
    pub fn key_down(&mut self, key: Key) {
        self.apply_key(KeyEvent::Down(key));
    }

    /// Key released.
    pub fn key_up(&mut self, key: Key) {
        self.apply_key(KeyEvent::Up(key));
    }

    fn apply_key(&mut self, event: KeyEvent) {
        if self.phase != SessionPhase::Running {
            debug!("Ignoring {:?} while {:?}", event, self.phase);
            return;
        }

        if let Err(e) = self.recording.record(self.state.tick, event) {
            warn!("Failed to record {:?}: {}", event, e);
        }

        handle_key_event(&mut self.state, event);
        let events = self.state.take_events();
        self.dispatch(events);
    }

    /// Run and draw one frame.
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Result<TickResult, SessionError> {
        match self.phase {
            SessionPhase::Loading => return Err(SessionError::NotStarted),
            SessionPhase::Stopped => return Err(SessionError::Stopped),
            SessionPhase::Running => {}
        }

        let result = tick(&mut self.state, &self.config);
        self.dispatch(result.events.clone());
        render_frame(&self.state, surface);
        Ok(result)
    }

    /// Forward external events to the panel and collection, then queue
    /// everything for `take_events`.
    fn dispatch(&mut self, events: Vec<GameEvent>) {
        for event in events.iter().filter(|e| e.is_external()) {
            match &event.data {
                GameEventData::InteractionConfirmed { detail, .. } => self.panel.show(detail),
                GameEventData::PanelClosed => self.panel.hide(),
                GameEventData::NftCollected { item } => {
                    if !self.collection.collect(item) {
                        debug!("{} already in collection", item.name);
                    }
                }
                _ => {}
            }
        }

        if self.events.len() + events.len() > MAX_PENDING_EVENTS {
            let overflow = self.events.len() + events.len() - MAX_PENDING_EVENTS;
            let dropped = overflow.min(self.events.len());
            warn!("Event queue full, dropping {} oldest events", dropped);
            self.events.drain(..dropped);
        }
        self.events.extend(events);
    }

    /// Replay the recording from the start snapshot and compare hashes.
    ///
    /// Returns `(live, replayed)`; they are equal for a healthy session.
    pub fn replay_hashes(&self) -> Result<(StateHash, StateHash), SessionError> {
        let initial = self.initial.clone().ok_or(SessionError::NotStarted)?;
        let frames = self.state.tick;
        let (mut replayed, _) = replay(initial, &self.recording, &self.config, frames);

        // Keys pressed after the last frame have not been ticked yet
        for event in self.recording.events_at(frames) {
            handle_key_event(&mut replayed, *event);
        }
        replayed.take_events();

        Ok((self.state.compute_hash(), replayed.compute_hash()))
    }

    /// Current world state.
    pub fn state(&self) -> &WorldState {
        &self.state
    }

    /// Engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Lifecycle phase.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Recorded key events.
    pub fn recording(&self) -> &InputRecording {
        &self.recording
    }

    /// Events not yet taken, in order.
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Drain queued events.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Detail panel.
    pub fn panel(&self) -> &P {
        &self.panel
    }

    /// NFT collection.
    pub fn collection(&self) -> &C {
        &self.collection
    }

    /// Stop and hand back the collaborators.
    pub fn into_parts(mut self) -> (P, C) {
        self.stop();
        (self.panel, self.collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::quest::{DISCOVERY_QUEST_ID, WILDLIFE_QUEST_ID};
    use crate::render::surface::CommandBuffer;
    use crate::session::collection::NftCollection;
    use crate::session::panel::PanelState;

    type TestSession = GameSession<PanelState, NftCollection>;

    fn session() -> TestSession {
        GameSession::new(
            &MapData::demo(),
            EngineConfig::default(),
            PanelState::new(),
            NftCollection::new("tester"),
        )
        .unwrap()
    }

    fn started() -> TestSession {
        let mut s = session();
        s.mark_asset_loaded("assets/ecoquest-map.png", 3200.0, 3200.0);
        s.mark_asset_loaded("assets/player-down.png", 192.0, 68.0);
        s.start().unwrap();
        s
    }

    fn run(s: &mut TestSession, frames: u32) {
        let mut buf = CommandBuffer::new();
        for _ in 0..frames {
            buf.clear();
            s.frame(&mut buf).unwrap();
        }
    }

    #[test]
    fn test_start_waits_for_assets() {
        let mut s = session();
        match s.start() {
            Err(SessionError::AssetsNotReady { missing }) => assert_eq!(missing.len(), 2),
            other => panic!("unexpected {:?}", other),
        }

        s.mark_asset_loaded("assets/ecoquest-map.png", 3200.0, 3200.0);
        match s.start() {
            Err(SessionError::AssetsNotReady { missing }) => {
                assert_eq!(missing, vec!["assets/player-down.png".to_string()])
            }
            other => panic!("unexpected {:?}", other),
        }

        s.mark_asset_loaded("assets/player-down.png", 200.0, 70.0);
        s.start().unwrap();
        assert_eq!(s.phase(), SessionPhase::Running);
        assert_eq!(s.state().player.width, 50.0);
        assert_eq!(s.state().player.height, 70.0);
        assert!(matches!(s.start(), Err(SessionError::AlreadyStarted)));
    }

    #[test]
    fn test_frame_before_start_fails() {
        let mut s = session();
        let mut buf = CommandBuffer::new();
        assert!(matches!(s.frame(&mut buf), Err(SessionError::NotStarted)));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_stop_ends_frames() {
        let mut s = started();
        run(&mut s, 3);
        s.stop();
        let mut buf = CommandBuffer::new();
        assert!(matches!(s.frame(&mut buf), Err(SessionError::Stopped)));
        assert!(matches!(s.start(), Err(SessionError::Stopped)));
    }

    #[test]
    fn test_frame_draws() {
        let mut s = started();
        let mut buf = CommandBuffer::new();
        s.frame(&mut buf).unwrap();
        assert_eq!(buf.texts()[0], "Quests:");
        assert_eq!(s.state().tick, 1);
    }

    #[test]
    fn test_collect_mushroom_end_to_end() {
        let mut s = started();

        s.key_down(Key::Up);
        run(&mut s, 80);
        s.key_up(Key::Up);

        s.key_down(Key::Interact);
        s.key_up(Key::Interact);

        assert!(s.panel().is_visible());
        assert_eq!(s.panel().detail().map(|d| d.name.as_str()), Some("Mushroom"));
        assert!(s.collection().contains("Mushroom"));
        assert!(s.state().quests.get(DISCOVERY_QUEST_ID).unwrap().completed);

        // Second confirm advances wildlife but does not duplicate the NFT
        s.key_down(Key::Interact);
        assert_eq!(s.collection().len(), 1);
        assert_eq!(s.state().quests.get(WILDLIFE_QUEST_ID).unwrap().progress, 2);

        s.key_down(Key::ClosePanel);
        assert!(!s.panel().is_visible());

        run(&mut s, 5);
        let (live, replayed) = s.replay_hashes().unwrap();
        assert_eq!(live, replayed);
    }

    #[test]
    fn test_keys_ignored_before_start() {
        let mut s = session();
        s.key_down(Key::Up);
        assert_eq!(s.recording().event_count(), 0);
        assert_eq!(s.state().keys.active_direction(), None);
    }

    #[test]
    fn test_events_logged_in_order() {
        let mut s = started();
        s.key_down(Key::Up);
        run(&mut s, 70);

        let events = s.take_events();
        let ticks: Vec<u32> = events.iter().map(|e| e.tick).collect();
        let mut sorted = ticks.clone();
        sorted.sort();
        assert_eq!(ticks, sorted);
        assert!(events.contains(&GameEvent::range_changed(59, Some(1))));

        // Drained; only newer events accumulate
        assert!(s.events().is_empty());
        s.key_up(Key::Up);
        run(&mut s, 30);
        assert!(s.events().iter().all(|e| e.tick >= 70));
    }

    #[test]
    fn test_late_asset_report_ignored() {
        let mut s = started();
        run(&mut s, 1);
        s.mark_asset_loaded("assets/player-down.png", 400.0, 90.0);
        assert_eq!(s.state().player.width, 48.0);
        assert_eq!(s.state().player.height, 68.0);

        s.key_down(Key::Up);
        run(&mut s, 1);
        let (live, replayed) = s.replay_hashes().unwrap();
        assert_eq!(live, replayed);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = EngineConfig {
            move_step: f32::NAN,
            ..EngineConfig::default()
        };
        let result = GameSession::new(&MapData::demo(), config, PanelState::new(), NftCollection::new("tester"));
        assert!(matches!(result, Err(SessionError::Config(_))));

        let mut config = EngineConfig::default();
        config.layout.tile_size = 0.0;
        let result = GameSession::new(&MapData::demo(), config, PanelState::new(), NftCollection::new("tester"));
        assert!(matches!(result, Err(SessionError::Config(_))));
    }
}
