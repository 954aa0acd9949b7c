//! Frame Rendering
//!
//! Draws one frame from world state. Reads state only.

use crate::core::rect::Rect;
use crate::core::vec2::Vec2;
use crate::game::quest::QuestLog;
use crate::game::state::WorldState;
use crate::render::surface::{Rgba, Surface, TextStyle};

/// Quest panel backdrop rectangle.
pub const QUEST_PANEL: Rect = Rect::new(10.0, 10.0, 300.0, 120.0);

/// Position of the "Quests:" heading.
pub const QUEST_HEADING_POS: Vec2 = Vec2::new(20.0, 30.0);

/// Baseline of the first quest line.
pub const QUEST_FIRST_LINE_Y: f32 = 50.0;

/// Distance between quest lines.
pub const QUEST_LINE_SPACING: f32 = 20.0;

/// Draw a full frame.
///
/// Order: background, obstacles, items, player, quest panel.
pub fn render_frame<S: Surface + ?Sized>(state: &WorldState, surface: &mut S) {
    surface.draw_image(&state.background.image, None, state.background.position);

    for obstacle in &state.obstacles {
        surface.fill_rect(obstacle.rect, Rgba::TRANSPARENT);
    }

    for item in &state.items {
        let color = if item.highlight {
            Rgba::HIGHLIGHT
        } else {
            Rgba::TRANSPARENT
        };
        surface.fill_rect(item.rect, color);
    }

    let player = &state.player;
    surface.draw_image(player.image(), Some(player.frame_rect()), player.position);

    draw_quest_panel(&state.quests, surface);
}

/// Draw the quest overlay.
pub fn draw_quest_panel<S: Surface + ?Sized>(quests: &QuestLog, surface: &mut S) {
    let style = TextStyle::default();

    surface.fill_rect(QUEST_PANEL, Rgba::PANEL_BACKDROP);
    surface.fill_text("Quests:", QUEST_HEADING_POS, &style);

    let mut y = QUEST_FIRST_LINE_Y;
    for quest in quests.quests() {
        let line = format!("{} - {}", quest.name, quest.status());
        surface.fill_text(&line, Vec2::new(QUEST_HEADING_POS.x, y), &style);
        y += QUEST_LINE_SPACING;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::config::EngineConfig;
    use crate::game::map::MapData;
    use crate::game::quest::{DISCOVERY_QUEST_ID, WILDLIFE_QUEST_ID};
    use crate::render::surface::{CommandBuffer, DrawCommand};

    fn demo_world() -> WorldState {
        WorldState::from_map(&MapData::demo(), &EngineConfig::default()).unwrap()
    }

    #[test]
    fn test_draw_order() {
        let state = demo_world();
        let mut buf = CommandBuffer::new();
        render_frame(&state, &mut buf);

        let cmds = buf.commands();
        let obstacles = state.obstacles.len();
        let items = state.items.len();

        assert!(matches!(&cmds[0], DrawCommand::DrawImage { image, source: None, .. }
            if image == "assets/ecoquest-map.png"));
        for cmd in &cmds[1..=obstacles] {
            assert!(matches!(cmd, DrawCommand::FillRect { color, .. } if *color == Rgba::TRANSPARENT));
        }
        let player_idx = 1 + obstacles + items;
        assert!(matches!(&cmds[player_idx], DrawCommand::DrawImage { image, source: Some(_), .. }
            if image == "assets/player-down.png"));
        assert_eq!(
            cmds[player_idx + 1],
            DrawCommand::FillRect {
                rect: QUEST_PANEL,
                color: Rgba::PANEL_BACKDROP
            }
        );
        // heading + one line per quest
        assert_eq!(cmds.len(), player_idx + 2 + 1 + state.quests.quests().len());
    }

    #[test]
    fn test_highlighted_item_is_yellow() {
        let mut state = demo_world();
        state.items[1].highlight = true;

        let mut buf = CommandBuffer::new();
        render_frame(&state, &mut buf);

        let item_start = 1 + state.obstacles.len();
        let colors: Vec<Rgba> = buf.commands()[item_start..item_start + state.items.len()]
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::FillRect { color, .. } => Some(*color),
                _ => None,
            })
            .collect();
        assert_eq!(colors, vec![Rgba::TRANSPARENT, Rgba::HIGHLIGHT, Rgba::TRANSPARENT]);
    }

    #[test]
    fn test_quest_panel_lines() {
        let mut state = demo_world();
        state.quests.update_quest(DISCOVERY_QUEST_ID, 1);
        state.quests.update_quest(WILDLIFE_QUEST_ID, 2);

        let mut buf = CommandBuffer::new();
        draw_quest_panel(&state.quests, &mut buf);

        assert_eq!(
            buf.texts(),
            vec!["Quests:", "Find the Mushroom - Done", "Interact with 5 wildlife - 2/5"]
        );
        assert!(matches!(&buf.commands()[3], DrawCommand::FillText { position, .. }
            if *position == Vec2::new(20.0, 70.0)));
    }

    #[test]
    fn test_player_frame_slice() {
        let mut state = demo_world();
        state.player.animator.advance(true);
        for _ in 0..9 {
            state.player.animator.advance(true);
        }

        let mut buf = CommandBuffer::new();
        render_frame(&state, &mut buf);
        let player_idx = 1 + state.obstacles.len() + state.items.len();
        assert_eq!(
            buf.commands()[player_idx],
            DrawCommand::DrawImage {
                image: "assets/player-down.png".into(),
                source: Some(Rect::new(48.0, 0.0, 48.0, 68.0)),
                position: Vec2::new(488.0, 254.0),
            }
        );
    }
}
