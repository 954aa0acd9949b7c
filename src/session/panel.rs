//! Detail Panel
//!
//! Side panel showing the item the player just interacted with.

use crate::game::interaction::InteractionDetail;

/// Receiver for panel show/hide requests.
pub trait DetailPanel {
    /// Show an item's details.
    fn show(&mut self, detail: &InteractionDetail);

    /// Hide the panel.
    fn hide(&mut self);
}

/// In-memory panel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PanelState {
    visible: bool,
    detail: Option<InteractionDetail>,
}

impl PanelState {
    /// Create a hidden panel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Is the panel showing?
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Last detail shown (kept after hiding).
    pub fn detail(&self) -> Option<&InteractionDetail> {
        self.detail.as_ref()
    }

    /// Text lines as the panel lays them out.
    pub fn lines(&self) -> Vec<String> {
        match (&self.detail, self.visible) {
            (Some(d), true) => vec![
                d.name.clone(),
                d.rarity.clone(),
                d.description.clone(),
                "Press X to close".to_string(),
            ],
            _ => Vec::new(),
        }
    }
}

impl DetailPanel for PanelState {
    fn show(&mut self, detail: &InteractionDetail) {
        self.detail = Some(detail.clone());
        self.visible = true;
    }

    fn hide(&mut self) {
        self.visible = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail() -> InteractionDetail {
        InteractionDetail {
            name: "Red Fox".into(),
            image: "fox.jpeg".into(),
            rarity: "Rare".into(),
            description: "Hunts at dusk.".into(),
        }
    }

    #[test]
    fn test_show_then_hide() {
        let mut panel = PanelState::new();
        assert!(!panel.is_visible());
        assert!(panel.lines().is_empty());

        panel.show(&detail());
        assert!(panel.is_visible());
        assert_eq!(panel.lines()[0], "Red Fox");
        assert_eq!(panel.lines()[3], "Press X to close");

        panel.hide();
        assert!(!panel.is_visible());
        assert!(panel.lines().is_empty());
        assert_eq!(panel.detail().map(|d| d.name.as_str()), Some("Red Fox"));
    }

    #[test]
    fn test_hide_when_hidden_is_noop() {
        let mut panel = PanelState::new();
        panel.hide();
        assert_eq!(panel, PanelState::new());
    }
}
