//! Sprite Animation
//!
//! Walking-cycle frame counter. Holds each frame for a fixed number of
//! ticks while moving and snaps back to frame 0 the moment movement stops.

use serde::{Serialize, Deserialize};

/// Frame counter for a horizontal sprite sheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteAnimator {
    /// Current frame index (0..max_frames)
    frame: u32,
    /// Ticks counted since movement started
    elapsed: u32,
    /// Ticks each frame is shown for
    hold: u32,
    /// Number of frames in the sheet
    max_frames: u32,
}

impl SpriteAnimator {
    /// Create an animator. `hold` and `max_frames` are raised to at least 1.
    pub fn new(hold: u32, max_frames: u32) -> Self {
        Self {
            frame: 0,
            elapsed: 0,
            hold: hold.max(1),
            max_frames: max_frames.max(1),
        }
    }

    /// Advance one tick.
    pub fn advance(&mut self, moving: bool) {
        if !moving {
            self.frame = 0;
            self.elapsed = 0;
            return;
        }

        self.elapsed = self.elapsed.wrapping_add(1);
        if self.elapsed % self.hold == 0 {
            self.frame = if self.frame + 1 < self.max_frames {
                self.frame + 1
            } else {
                0
            };
        }
    }

    /// Current frame index.
    #[inline]
    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Ticks counted since movement started.
    #[inline]
    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    /// Number of frames in the sheet.
    #[inline]
    pub fn max_frames(&self) -> u32 {
        self.max_frames
    }

    /// Ticks each frame is held.
    #[inline]
    pub fn hold(&self) -> u32 {
        self.hold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_after_k_holds() {
        for k in 0..12u32 {
            let mut anim = SpriteAnimator::new(10, 4);
            for _ in 0..(10 * k) {
                anim.advance(true);
            }
            assert_eq!(anim.frame(), k % 4, "after {} holds", k);
        }
    }

    #[test]
    fn test_frame_held_between_boundaries() {
        let mut anim = SpriteAnimator::new(10, 4);
        for _ in 0..9 {
            anim.advance(true);
        }
        assert_eq!(anim.frame(), 0);
        anim.advance(true);
        assert_eq!(anim.frame(), 1);
        anim.advance(true);
        assert_eq!(anim.frame(), 1);
    }

    #[test]
    fn test_stop_resets_immediately() {
        let mut anim = SpriteAnimator::new(10, 4);
        for _ in 0..25 {
            anim.advance(true);
        }
        assert_eq!(anim.frame(), 2);

        anim.advance(false);
        assert_eq!(anim.frame(), 0);
        assert_eq!(anim.elapsed(), 0);
    }

    #[test]
    fn test_single_frame_sheet_never_changes_frame() {
        let mut anim = SpriteAnimator::new(1, 1);
        for _ in 0..50 {
            anim.advance(true);
            assert_eq!(anim.frame(), 0);
        }
    }

    #[test]
    fn test_zero_parameters_clamped() {
        let anim = SpriteAnimator::new(0, 0);
        assert_eq!(anim.hold(), 1);
        assert_eq!(anim.max_frames(), 1);
    }
}
