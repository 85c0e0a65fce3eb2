//! # Randomness
//!
//! Both random draws in the system (the base sentence assigned when a party
//! decides, and the appeal coin flip) go through [`RandomSource`], so a
//! deployment can be made reproducible and tests can assert exact outcomes.

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Smallest base sentence, in years.
pub const MIN_BASE_SENTENCE: u32 = 3;

/// Largest base sentence, in years.
pub const MAX_BASE_SENTENCE: u32 = 26;

/// Probability that a single appeal is granted.
pub const APPEAL_ACCEPT_PROBABILITY: f64 = 0.5;

/// Source of the two random draws.
pub trait RandomSource: Send + Sync {
    /// A base sentence, uniform over
    /// [`MIN_BASE_SENTENCE`]`..=`[`MAX_BASE_SENTENCE`].
    fn draw_base_sentence(&self) -> u32;

    /// One independent appeal trial, true with
    /// [`APPEAL_ACCEPT_PROBABILITY`].
    fn grant_appeal(&self) -> bool;
}

/// OS-seeded thread-local generator. The default for deployments.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn draw_base_sentence(&self) -> u32 {
        rand::thread_rng().gen_range(MIN_BASE_SENTENCE..=MAX_BASE_SENTENCE)
    }

    fn grant_appeal(&self) -> bool {
        rand::thread_rng().gen_bool(APPEAL_ACCEPT_PROBABILITY)
    }
}

/// Deterministic generator seeded from a `u64`.
///
/// Draws are serialized through an internal lock; the sequence observed by
/// concurrent callers depends on call order.
pub struct SeededRandom {
    seed: u64,
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    /// Create a generator from `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// The seed this generator was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl std::fmt::Debug for SeededRandom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeededRandom").field("seed", &self.seed).finish()
    }
}

impl RandomSource for SeededRandom {
    fn draw_base_sentence(&self) -> u32 {
        self.rng
            .lock()
            .gen_range(MIN_BASE_SENTENCE..=MAX_BASE_SENTENCE)
    }

    fn grant_appeal(&self) -> bool {
        self.rng.lock().gen_bool(APPEAL_ACCEPT_PROBABILITY)
    }
}

/// Constant draws: every base sentence is `base_sentence`, every appeal
/// resolves to `grant`. For scripted scenarios and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedRandom {
    /// Returned by every [`RandomSource::draw_base_sentence`] call.
    pub base_sentence: u32,
    /// Returned by every [`RandomSource::grant_appeal`] call.
    pub grant: bool,
}

impl FixedRandom {
    /// Create a constant source.
    pub fn new(base_sentence: u32, grant: bool) -> Self {
        Self {
            base_sentence,
            grant,
        }
    }
}

impl RandomSource for FixedRandom {
    fn draw_base_sentence(&self) -> u32 {
        self.base_sentence
    }

    fn grant_appeal(&self) -> bool {
        self.grant
    }
}
