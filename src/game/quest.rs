//! Quests
//!
//! Named counters advanced by item interactions.

use serde::{Serialize, Deserialize};
use tracing::info;

/// Quest advanced by every first discovery.
pub const DISCOVERY_QUEST_ID: u32 = 1;

/// Quest counting every confirmed interaction.
pub const WILDLIFE_QUEST_ID: u32 = 2;

/// A single quest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    /// Quest identifier
    pub id: u32,
    /// Display name
    pub name: String,
    /// Longer description
    pub description: String,
    /// Current progress (never above `goal`)
    pub progress: u32,
    /// Progress needed to complete
    pub goal: u32,
    /// Set once `progress == goal`
    pub completed: bool,
}

impl Quest {
    /// Create a fresh quest.
    pub fn new(id: u32, name: impl Into<String>, description: impl Into<String>, goal: u32) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            progress: 0,
            goal,
            completed: false,
        }
    }

    /// Panel status text: `Done` or `progress/goal`.
    pub fn status(&self) -> String {
        if self.completed {
            "Done".to_string()
        } else {
            format!("{}/{}", self.progress, self.goal)
        }
    }
}

/// Outcome of a successful quest update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuestUpdate {
    /// Quest that changed
    pub quest_id: u32,
    /// Progress after the update
    pub progress: u32,
    /// Goal of the quest
    pub goal: u32,
    /// True when this update completed the quest
    pub completed_now: bool,
}

/// Ordered list of quests; order is the panel order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestLog {
    quests: Vec<Quest>,
}

impl QuestLog {
    /// Create from a list of quests.
    pub fn new(quests: Vec<Quest>) -> Self {
        Self { quests }
    }

    /// All quests in panel order.
    pub fn quests(&self) -> &[Quest] {
        &self.quests
    }

    /// Look up a quest.
    pub fn get(&self, id: u32) -> Option<&Quest> {
        self.quests.iter().find(|q| q.id == id)
    }

    /// Advance a quest by `amount`.
    ///
    /// Progress is clamped at the goal and the quest completes exactly when
    /// it reaches it. Unknown ids and completed quests are left untouched and
    /// return `None`.
    pub fn update_quest(&mut self, id: u32, amount: u32) -> Option<QuestUpdate> {
        let quest = self.quests.iter_mut().find(|q| q.id == id)?;
        if quest.completed {
            return None;
        }

        quest.progress = quest.progress.saturating_add(amount).min(quest.goal);
        let completed_now = quest.progress == quest.goal;
        if completed_now {
            quest.completed = true;
            info!("Quest completed: {}", quest.name);
        }

        Some(QuestUpdate {
            quest_id: quest.id,
            progress: quest.progress,
            goal: quest.goal,
            completed_now,
        })
    }

    /// Number of completed quests.
    pub fn completed_count(&self) -> usize {
        self.quests.iter().filter(|q| q.completed).count()
    }
}

impl Default for QuestLog {
    fn default() -> Self {
        Self::new(vec![
            Quest::new(
                DISCOVERY_QUEST_ID,
                "Find the Mushroom",
                "Locate and interact with the mushroom in the forest.",
                1,
            ),
            Quest::new(
                WILDLIFE_QUEST_ID,
                "Interact with 5 wildlife",
                "Interact with 5 wildlife around the forest.",
                5,
            ),
        ])
    }
}
