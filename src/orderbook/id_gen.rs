//! Deterministic trade-id generation.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use uuid::Uuid;

/// Generates opaque unique trade identifiers.
///
/// When constructed with a seed, the sequence of ids produced is
/// reproducible (`SPEC_FULL.md` §5): the same seed plus the same number of
/// calls always yields the same ids, regardless of process or platform.
/// Without a seed, ids are drawn from the OS entropy source and are not
/// reproducible across runs.
#[derive(Debug)]
pub struct TradeIdGenerator {
    rng: StdRng,
}

impl TradeIdGenerator {
    /// A generator seeded from OS entropy.
    pub fn new() -> Self {
        TradeIdGenerator {
            rng: StdRng::from_entropy(),
        }
    }

    /// A generator whose output sequence is fully determined by `seed`.
    pub fn with_seed(seed: u64) -> Self {
        TradeIdGenerator {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// The next trade id in sequence, as a UUID string.
    pub fn next_id(&mut self) -> String {
        let mut bytes = [0u8; 16];
        self.rng.fill_bytes(&mut bytes);
        Uuid::from_bytes(bytes).to_string()
    }
}

impl Default for TradeIdGenerator {
    fn default() -> Self {
        TradeIdGenerator::new()
    }
}
