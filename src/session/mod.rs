//! Session Module
//!
//! The engine context a host talks to, plus the collaborators it feeds.
//!
//! ## Module Structure
//!
//! - `game_session`: Asset gate, frame loop, event dispatch, replay check
//! - `panel`: Detail panel trait and in-memory panel
//! - `collection`: NFT collection with JSON persistence

pub mod game_session;
pub mod panel;
pub mod collection;

pub use game_session::{GameSession, SessionError, SessionPhase};
pub use panel::{DetailPanel, PanelState};
pub use collection::{CollectedNft, CollectionSink, CollectionError, NftCollection};
