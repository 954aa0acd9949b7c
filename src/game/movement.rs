//! Directional Movement
//!
//! The player is pinned to the screen centre, so walking means scrolling the
//! world the other way. A step is all-or-nothing: if any obstacle, shifted
//! by the step, would touch the player, nothing moves.

use tracing::trace;

use crate::core::vec2::Vec2;
use crate::game::input::Direction;
use crate::game::state::WorldState;

/// What happened to this frame's movement attempt.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum MoveOutcome {
    /// No direction active
    #[default]
    Idle,
    /// World scrolled by `delta`
    Moved {
        /// Attempted direction
        direction: Direction,
        /// Shift applied to every movable
        delta: Vec2,
    },
    /// An obstacle would have overlapped the player
    Blocked {
        /// Attempted direction
        direction: Direction,
    },
}

impl MoveOutcome {
    /// Did the world scroll?
    pub fn moved(&self) -> bool {
        matches!(self, MoveOutcome::Moved { .. })
    }
}

/// Would scrolling the world by `delta` push an obstacle into the player?
pub fn is_blocked(state: &WorldState, delta: Vec2) -> bool {
    let player = state.player.rect();
    state
        .obstacles
        .iter()
        .any(|obstacle| player.collides(&obstacle.rect.translated(delta)))
}

/// Resolve this frame's movement from the held keys.
///
/// Facing follows the attempted direction even when blocked.
pub fn resolve_movement(state: &mut WorldState, step: f32) -> MoveOutcome {
    let direction = match state.keys.active_direction() {
        Some(dir) => dir,
        None => {
            state.player.moving = false;
            return MoveOutcome::Idle;
        }
    };

    state.player.facing = direction;
    state.player.moving = true;

    let delta = direction.world_delta(step);
    if is_blocked(state, delta) {
        trace!("Movement {:?} blocked at tick {}", direction, state.tick);
        return MoveOutcome::Blocked { direction };
    }

    state.shift_movables(delta);
    MoveOutcome::Moved { direction, delta }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rect::Rect;
    use crate::game::config::EngineConfig;
    use crate::game::input::Key;
    use crate::game::map::MapData;
    use crate::game::state::{ItemState, Obstacle};

    /// Empty world with the player at (100,100).
    fn empty_world() -> WorldState {
        let mut world = WorldState::from_map(&MapData::default(), &EngineConfig::default()).unwrap();
        world.player.position = Vec2::new(100.0, 100.0);
        world
    }

    #[test]
    fn test_obstacle_on_player_blocks_every_direction() {
        for key in [Key::Up, Key::Left, Key::Down, Key::Right] {
            let mut world = empty_world();
            world.obstacles.push(Obstacle::new(Vec2::new(100.0, 100.0), 64.0));
            world.keys.press(key);

            let outcome = resolve_movement(&mut world, 3.0);
            assert!(matches!(outcome, MoveOutcome::Blocked { .. }), "{:?}", key);
            assert_eq!(world.obstacles[0].rect, Rect::new(100.0, 100.0, 64.0, 64.0));
            assert_eq!(world.background.position, Vec2::new(-60.0, -400.0));
            assert!(world.player.moving);
        }
    }

    #[test]
    fn test_free_move_shifts_every_movable() {
        let cases = [
            (Key::Up, Direction::Up, Vec2::new(0.0, 3.0)),
            (Key::Down, Direction::Down, Vec2::new(0.0, -3.0)),
            (Key::Left, Direction::Left, Vec2::new(3.0, 0.0)),
            (Key::Right, Direction::Right, Vec2::new(-3.0, 0.0)),
        ];

        for (key, direction, delta) in cases {
            let mut world = empty_world();
            world.obstacles.push(Obstacle::new(Vec2::new(400.0, 400.0), 64.0));
            world.items.push(ItemState {
                id: 1,
                rect: Rect::new(-200.0, 300.0, 64.0, 64.0),
                name: "Fern".into(),
                image: "fern.jpeg".into(),
                rarity: "Common".into(),
                description: String::new(),
                highlight: false,
            });
            world.keys.press(key);

            let outcome = resolve_movement(&mut world, 3.0);
            assert_eq!(outcome, MoveOutcome::Moved { direction, delta }, "{:?}", key);
            assert_eq!(world.obstacles[0].rect.position, Vec2::new(400.0, 400.0) + delta);
            assert_eq!(world.items[0].rect.position, Vec2::new(-200.0, 300.0) + delta);
            assert_eq!(world.background.position, Vec2::new(-60.0, -400.0) + delta);
            assert_eq!(world.player.position, Vec2::new(100.0, 100.0));
            assert_eq!(world.player.facing, direction);
        }
    }

    #[test]
    fn test_touching_after_step_is_blocked() {
        // Player spans y 100..168; obstacle bottom edge at 97 reaches 100 after one up-step
        let mut world = empty_world();
        world.obstacles.push(Obstacle::new(Vec2::new(100.0, 33.0), 64.0));
        world.keys.press(Key::Up);
        assert!(matches!(resolve_movement(&mut world, 3.0), MoveOutcome::Blocked { .. }));

        // One more pixel of clearance lets the step through
        let mut world = empty_world();
        world.obstacles.push(Obstacle::new(Vec2::new(100.0, 32.0), 64.0));
        world.keys.press(Key::Up);
        assert!(resolve_movement(&mut world, 3.0).moved());
    }

    #[test]
    fn test_blocked_still_turns_player() {
        let mut world = empty_world();
        world.obstacles.push(Obstacle::new(Vec2::new(100.0, 100.0), 64.0));
        world.keys.press(Key::Left);
        resolve_movement(&mut world, 3.0);
        assert_eq!(world.player.facing, Direction::Left);
        assert_eq!(world.player.image(), "assets/player-left.png");
    }

    #[test]
    fn test_no_keys_keeps_facing() {
        let mut world = empty_world();
        world.keys.press(Key::Right);
        resolve_movement(&mut world, 3.0);
        world.keys.release(Key::Right);

        let before = world.background.position;
        assert_eq!(resolve_movement(&mut world, 3.0), MoveOutcome::Idle);
        assert!(!world.player.moving);
        assert_eq!(world.player.facing, Direction::Right);
        assert_eq!(world.background.position, before);
    }

    #[test]
    fn test_precedence_uses_last_key() {
        let mut world = empty_world();
        world.keys.press(Key::Down);
        world.keys.press(Key::Left);
        let outcome = resolve_movement(&mut world, 3.0);
        assert_eq!(
            outcome,
            MoveOutcome::Moved {
                direction: Direction::Left,
                delta: Vec2::new(3.0, 0.0)
            }
        );
    }
}
