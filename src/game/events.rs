//! Game Events
//!
//! Events generated during simulation. The session forwards them to the
//! detail panel and the NFT collection; replays compare them.

use serde::{Serialize, Deserialize};

use crate::game::interaction::{CollectedItem, InteractionDetail};

/// Game event data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEventData {
    /// The item in range changed (None = nothing in range any more)
    RangeChanged {
        /// Slot id now in range
        item_id: Option<u32>,
    },

    /// Player confirmed an interaction with the item in range
    InteractionConfirmed {
        /// Slot id
        item_id: u32,
        /// What the panel shows
        detail: InteractionDetail,
    },

    /// Quest progress advanced
    QuestProgressed {
        /// Quest identifier
        quest_id: u32,
        /// Progress after the update
        progress: u32,
        /// Quest goal
        goal: u32,
    },

    /// Quest reached its goal
    QuestCompleted {
        /// Quest identifier
        quest_id: u32,
    },

    /// Item should be added to the NFT collection
    NftCollected {
        /// Item to collect
        item: CollectedItem,
    },

    /// Close-panel key pressed
    PanelClosed,
}

/// A game event stamped with the frame it happened on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Frame when the event occurred
    pub tick: u32,

    /// Event data
    pub data: GameEventData,
}

impl GameEvent {
    /// Create a new event.
    pub fn new(tick: u32, data: GameEventData) -> Self {
        Self { tick, data }
    }

    /// Create range changed event.
    pub fn range_changed(tick: u32, item_id: Option<u32>) -> Self {
        Self::new(tick, GameEventData::RangeChanged { item_id })
    }

    /// Create interaction confirmed event.
    pub fn interaction_confirmed(tick: u32, item_id: u32, detail: InteractionDetail) -> Self {
        Self::new(tick, GameEventData::InteractionConfirmed { item_id, detail })
    }

    /// Create quest progressed event.
    pub fn quest_progressed(tick: u32, quest_id: u32, progress: u32, goal: u32) -> Self {
        Self::new(
            tick,
            GameEventData::QuestProgressed {
                quest_id,
                progress,
                goal,
            },
        )
    }

    /// Create quest completed event.
    pub fn quest_completed(tick: u32, quest_id: u32) -> Self {
        Self::new(tick, GameEventData::QuestCompleted { quest_id })
    }

    /// Create NFT collected event.
    pub fn nft_collected(tick: u32, item: CollectedItem) -> Self {
        Self::new(tick, GameEventData::NftCollected { item })
    }

    /// Is this an event the outside world acts on (panel or collection)?
    pub fn is_external(&self) -> bool {
        matches!(
            self.data,
            GameEventData::InteractionConfirmed { .. }
                | GameEventData::NftCollected { .. }
                | GameEventData::PanelClosed
        )
    }
}
