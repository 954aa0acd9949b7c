//! Item Interaction
//!
//! Runs every frame before movement: highlights each item the player
//! overlaps and picks the one a confirm press would act on. Confirming
//! advances the quests and hands the item to the collection.

use serde::{Serialize, Deserialize};
use tracing::{debug, info};

use crate::game::events::GameEvent;
use crate::game::quest::{DISCOVERY_QUEST_ID, WILDLIFE_QUEST_ID};
use crate::game::state::{ItemState, WorldState};

/// How the in-range item is chosen when several overlap the player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InRangePolicy {
    /// Last overlapping item in slot order
    #[default]
    LastChecked,
    /// Overlapping item whose centre is closest to the player's centre
    Nearest,
}

/// What the detail panel shows for an item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionDetail {
    /// Display name
    pub name: String,
    /// Image reference
    pub image: String,
    /// Rarity label
    pub rarity: String,
    /// Description text
    pub description: String,
}

impl From<&ItemState> for InteractionDetail {
    fn from(item: &ItemState) -> Self {
        Self {
            name: item.name.clone(),
            image: item.image.clone(),
            rarity: item.rarity.clone(),
            description: item.description.clone(),
        }
    }
}

/// Item handed to the NFT collection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectedItem {
    /// Slot id of the source item
    pub id: u32,
    /// Display name
    pub name: String,
    /// Image reference
    pub image: String,
    /// Rarity label
    pub rarity: String,
}

impl From<&ItemState> for CollectedItem {
    fn from(item: &ItemState) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            image: item.image.clone(),
            rarity: item.rarity.clone(),
        }
    }
}

/// Refresh highlights, the overlapping set and the in-range item.
///
/// Emits `RangeChanged` whenever the in-range item differs from last frame.
pub fn detect_interactions(state: &mut WorldState, policy: InRangePolicy) {
    let previous = state.item_in_range().map(|item| item.id);
    let player = state.player.rect();

    state.overlapping.clear();
    for (idx, item) in state.items.iter_mut().enumerate() {
        item.highlight = player.collides(&item.rect);
        if item.highlight {
            state.overlapping.push(idx);
        }
    }

    if state.overlapping.len() > 1 {
        debug!(
            "Player overlaps {} items at tick {}, choosing by {:?}",
            state.overlapping.len(),
            state.tick,
            policy
        );
    }

    state.in_range = match policy {
        InRangePolicy::LastChecked => state.overlapping.last().copied(),
        InRangePolicy::Nearest => {
            let center = player.center();
            state
                .overlapping
                .iter()
                .copied()
                .min_by(|&a, &b| {
                    let da = state.items[a].rect.center().distance_squared(center);
                    let db = state.items[b].rect.center().distance_squared(center);
                    da.total_cmp(&db)
                })
        }
    };

    let current = state.item_in_range().map(|item| item.id);
    if current != previous {
        let tick = state.tick;
        state.push_event(GameEvent::range_changed(tick, current));
    }
}

/// Confirm an interaction with the in-range item.
///
/// Returns the item's id, or `None` when nothing is in range (nothing
/// changes and no event is emitted).
pub fn confirm_interaction(state: &mut WorldState) -> Option<u32> {
    let tick = state.tick;
    let item = match state.item_in_range() {
        Some(item) => item.clone(),
        None => {
            debug!("Interact pressed at tick {} with nothing in range", tick);
            return None;
        }
    };

    info!("Interacting with {} (item {})", item.name, item.id);
    state.push_event(GameEvent::interaction_confirmed(
        tick,
        item.id,
        InteractionDetail::from(&item),
    ));

    for quest_id in [DISCOVERY_QUEST_ID, WILDLIFE_QUEST_ID] {
        if let Some(update) = state.quests.update_quest(quest_id, 1) {
            state.push_event(GameEvent::quest_progressed(
                tick,
                update.quest_id,
                update.progress,
                update.goal,
            ));
            if update.completed_now {
                state.push_event(GameEvent::quest_completed(tick, update.quest_id));
            }
        }
    }

    state.push_event(GameEvent::nft_collected(tick, CollectedItem::from(&item)));
    Some(item.id)
}
