//! Seedable RNG wrappers: one per tracking session, one for route shaping.
//!
//! # Determinism strategy
//!
//! Nothing in the engine touches `thread_rng()`.  Pause rolls, dwell times,
//! tick jitter and the alternative-route waveform all draw from a generator
//! the caller seeded, so a test scenario replays bit-for-bit.
//!
//! Each session's `SmallRng` is seeded by:
//!
//!   seed = global_seed XOR (session_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio, so
//! sessions 0, 1, 2, … started from one config seed never share a stream.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::SessionId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── SessionRng ────────────────────────────────────────────────────────────────

/// Per-session deterministic RNG driving the movement simulator.
///
/// Owned by exactly one `MovementSimulator`; never shared between sessions.
pub struct SessionRng(SmallRng);

impl SessionRng {
    /// Seed deterministically from the config seed and a session id.
    pub fn new(global_seed: u64, session: SessionId) -> Self {
        let seed = global_seed ^ (session.0 as u64).wrapping_mul(MIXING_CONSTANT);
        SessionRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// General-purpose seeded RNG, used by the route provider to vary the
/// amplitude of each alternative route.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a `SessionRng` for `session` from this generator's stream.
    pub fn session(&mut self, session: SessionId) -> SessionRng {
        let seed: u64 = self.0.r#gen();
        SessionRng::new(seed, session)
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}
