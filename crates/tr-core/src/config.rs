//! Tracking engine configuration.

use crate::{TrackError, TrackResult};

/// Top-level configuration for a tracking session.
///
/// Typically loaded from a JSON file by the application crate (see
/// `demos/manila`) and passed to the session builder.  Every field has a
/// default; [`TrackingConfig::validate`] rejects values the engine cannot
/// run with.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TrackingConfig {
    /// Speed used for ETA and route durations, km/h.  Default: 30.
    pub assumed_speed_kmh: f64,

    /// Base delay between ticks, ms.  Default: 1000.
    pub tick_interval_ms: u64,

    /// Each tick delay is drawn from `tick_interval_ms ± tick_jitter_ms`.
    pub tick_jitter_ms: u64,

    /// Chance per tick of a stop inside the pause window.  Default: 0.05.
    pub pause_probability: f64,

    /// Progress fractions `(lo, hi)`; pauses only happen strictly inside.
    pub pause_window: (f64, f64),

    /// Bounds of a pause dwell, ms, inclusive.
    pub pause_min_ms: u64,
    pub pause_max_ms: u64,

    /// Total routes offered per request, primary included.  Clamped to 1..=3.
    pub alternative_count: usize,

    /// Routing collaborator attempts before falling back to a straight line.
    pub fetch_attempts: u32,

    /// Master RNG seed.  The same seed always produces identical runs.
    pub seed: u64,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            assumed_speed_kmh: 30.0,
            tick_interval_ms:  1_000,
            tick_jitter_ms:    250,
            pause_probability: 0.05,
            pause_window:      (0.3, 0.7),
            pause_min_ms:      2_000,
            pause_max_ms:      5_000,
            alternative_count: 3,
            fetch_attempts:    2,
            seed:              42,
        }
    }
}

impl TrackingConfig {
    /// Check that the configuration describes a runnable engine.
    pub fn validate(&self) -> TrackResult<()> {
        if !(self.assumed_speed_kmh.is_finite() && self.assumed_speed_kmh > 0.0) {
            return Err(TrackError::Config(format!(
                "assumed_speed_kmh must be positive, got {}",
                self.assumed_speed_kmh
            )));
        }
        if self.tick_jitter_ms >= self.tick_interval_ms {
            return Err(TrackError::Config(format!(
                "tick_jitter_ms ({}) must be smaller than tick_interval_ms ({})",
                self.tick_jitter_ms, self.tick_interval_ms
            )));
        }
        if !(0.0..=1.0).contains(&self.pause_probability) {
            return Err(TrackError::Config(format!(
                "pause_probability must be within [0, 1], got {}",
                self.pause_probability
            )));
        }
        let (lo, hi) = self.pause_window;
        if !(0.0 <= lo && lo < hi && hi <= 1.0) {
            return Err(TrackError::Config(format!(
                "pause_window must satisfy 0 <= lo < hi <= 1, got ({lo}, {hi})"
            )));
        }
        if self.pause_min_ms > self.pause_max_ms {
            return Err(TrackError::Config(format!(
                "pause_min_ms ({}) exceeds pause_max_ms ({})",
                self.pause_min_ms, self.pause_max_ms
            )));
        }
        if self.alternative_count == 0 {
            return Err(TrackError::Config("alternative_count must be at least 1".into()));
        }
        if self.fetch_attempts == 0 {
            return Err(TrackError::Config("fetch_attempts must be at least 1".into()));
        }
        Ok(())
    }

    /// `true` if a progress fraction lies strictly inside the pause window.
    #[inline]
    pub fn in_pause_window(&self, progress: f64) -> bool {
        let (lo, hi) = self.pause_window;
        progress > lo && progress < hi
    }
}
