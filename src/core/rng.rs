//! Deterministic random number generation for chance-based effects.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical proc rolls
//! - **Checkpointable**: O(1) state capture and restore for replays
//!
//! ```
//! use rogue_pitch::core::GameRng;
//!
//! let mut a = GameRng::new(7);
//! let mut b = GameRng::new(7);
//! for _ in 0..20 {
//!     assert_eq!(a.roll_percent(35.0), b.roll_percent(35.0));
//! }
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Deterministic RNG used by `Chance` effect rules.
///
/// Uses ChaCha8 so a recorded (seed, event, time) log replays bit-for-bit.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Roll against a percentage chance (0..=100).
    ///
    /// Values outside the range are clamped; non-finite chances never succeed.
    pub fn roll_percent(&mut self, percent: f64) -> bool {
        if !percent.is_finite() {
            return false;
        }
        let probability = (percent / 100.0).clamp(0.0, 1.0);
        self.inner.gen_bool(probability)
    }

    /// Get the current state for checkpointing.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Serializable RNG state for checkpointing.
///
/// Uses ChaCha8 word position for O(1) serialization regardless of
/// how many rolls have been made.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}
