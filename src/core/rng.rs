//! Deterministic randomness for battles.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical battles
//! - **Forkable**: Independent child streams for repeated simulations
//! - **Context streams**: Separate sequences for deck generation and combat,
//!   derived with a fixed hash so recorded seeds replay on any toolchain
//!
//! The resolver never talks to `BattleRng` directly; it asks a
//! [`RollSource`] for rolls. `ScriptedRolls` replays a recorded sequence.
//!
//! ```
//! use vaccine_quest::core::{BattleRng, RollSource};
//!
//! let mut a = BattleRng::new(42);
//! let mut b = BattleRng::new(42);
//! assert_eq!(a.roll(), b.roll());
//!
//! let roll = a.roll();
//! assert!((0.0..1.0).contains(&roll));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHasher;
use std::hash::Hasher;

/// Source of uniform rolls in `[0, 1)` consumed by the resolver.
pub trait RollSource {
    /// Draw the next roll.
    fn roll(&mut self) -> f64;
}

/// Seeded ChaCha8 RNG used for battles and deck generation.
#[derive(Clone, Debug)]
pub struct BattleRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl BattleRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// The seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Fork this RNG into an independent, deterministic child stream.
    ///
    /// Matchup simulations fork once per iteration.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self.seed.wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self::new(fork_seed)
    }

    /// Create an independent stream for a named purpose.
    ///
    /// The same context always yields the same stream for the same seed,
    /// so generating the computer's deck never shifts the combat rolls.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        Self::new(context_seed(self.seed, context))
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }
}

/// Seed of a named context stream. Fed through `FxHasher` word by word so
/// the value does not depend on std's `Hash` impls.
fn context_seed(seed: u64, context: &str) -> u64 {
    let mut hasher = FxHasher::default();
    hasher.write_u64(seed);
    hasher.write(context.as_bytes());
    hasher.write_u64(context.len() as u64);
    hasher.finish()
}

impl RollSource for BattleRng {
    fn roll(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }
}

/// A fixed sequence of rolls, repeated from the start when exhausted.
///
/// Used to replay a recorded battle from its event log. An empty script
/// always rolls `0.0`.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRolls {
    rolls: Vec<f64>,
    next: usize,
}

impl ScriptedRolls {
    #[must_use]
    pub fn new(rolls: impl Into<Vec<f64>>) -> Self {
        Self {
            rolls: rolls.into(),
            next: 0,
        }
    }

    /// Number of rolls handed out so far.
    #[must_use]
    pub fn consumed(&self) -> usize {
        self.next
    }
}

impl RollSource for ScriptedRolls {
    fn roll(&mut self) -> f64 {
        if self.rolls.is_empty() {
            return 0.0;
        }
        let roll = self.rolls[self.next % self.rolls.len()];
        self.next += 1;
        roll
    }
}
