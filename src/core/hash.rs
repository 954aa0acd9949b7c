//! State Hashing for Verification
//!
//! Provides deterministic hashing of world state for:
//! - Replay validation
//! - Comparing headless runs across builds

use sha2::{Sha256, Digest};
use super::vec2::Vec2;

/// Hash output type (256 bits / 32 bytes)
pub type StateHash = [u8; 32];

/// Deterministic hasher for world state.
///
/// Wraps SHA-256 with helpers for engine types.
/// Order of updates is critical for determinism.
pub struct StateHasher {
    hasher: Sha256,
}

impl StateHasher {
    /// Create a new hasher with domain separator.
    pub fn new(domain: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(domain);
        Self { hasher }
    }

    /// Create hasher for world state.
    pub fn for_world_state() -> Self {
        Self::new(b"ECOQUEST_WORLD_V1")
    }

    /// Create hasher for input recordings.
    pub fn for_input_recording() -> Self {
        Self::new(b"ECOQUEST_INPUTS_V1")
    }

    /// Update with a u8 value.
    #[inline]
    pub fn update_u8(&mut self, value: u8) {
        self.hasher.update([value]);
    }

    /// Update with a u32 value (little-endian).
    #[inline]
    pub fn update_u32(&mut self, value: u32) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with an f32 via its bit pattern.
    #[inline]
    pub fn update_f32(&mut self, value: f32) {
        self.update_u32(value.to_bits());
    }

    /// Update with a Vec2.
    #[inline]
    pub fn update_vec2(&mut self, value: Vec2) {
        let (x, y) = value.to_bits();
        self.update_u32(x);
        self.update_u32(y);
    }

    /// Update with a boolean.
    #[inline]
    pub fn update_bool(&mut self, value: bool) {
        self.update_u8(value as u8);
    }

    /// Update with a length-prefixed string.
    #[inline]
    pub fn update_str(&mut self, value: &str) {
        self.update_u32(value.len() as u32);
        self.hasher.update(value.as_bytes());
    }

    /// Finalize and return the hash.
    pub fn finalize(self) -> StateHash {
        self.hasher.finalize().into()
    }
}

/// Compute state hash for world verification.
///
/// Called by `WorldState::compute_hash()`.
/// The closure adds state-specific data after the tick.
pub fn compute_state_hash<F>(tick: u32, add_state: F) -> StateHash
where
    F: FnOnce(&mut StateHasher),
{
    let mut hasher = StateHasher::for_world_state();

    // Always hash tick first
    hasher.update_u32(tick);

    add_state(&mut hasher);

    hasher.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hasher_determinism() {
        let mut h1 = StateHasher::for_world_state();
        let mut h2 = StateHasher::for_world_state();

        h1.update_vec2(Vec2::new(-60.0, -400.0));
        h1.update_bool(true);
        h2.update_vec2(Vec2::new(-60.0, -400.0));
        h2.update_bool(true);

        assert_eq!(h1.finalize(), h2.finalize());
    }

    #[test]
    fn test_domain_separation() {
        let mut h1 = StateHasher::for_world_state();
        let mut h2 = StateHasher::for_input_recording();
        h1.update_u32(7);
        h2.update_u32(7);
        assert_ne!(h1.finalize(), h2.finalize());
    }

    #[test]
    fn test_compute_state_hash_depends_on_state() {
        let a = compute_state_hash(10, |h| h.update_f32(3.0));
        let b = compute_state_hash(10, |h| h.update_f32(6.0));
        let c = compute_state_hash(11, |h| h.update_f32(3.0));
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_string_length_prefix() {
        let mut h1 = StateHasher::for_world_state();
        h1.update_str("ab");
        h1.update_str("c");
        let mut h2 = StateHasher::for_world_state();
        h2.update_str("a");
        h2.update_str("bc");
        assert_ne!(h1.finalize(), h2.finalize());
    }
}
