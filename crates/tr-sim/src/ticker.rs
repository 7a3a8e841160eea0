//! Clocks that drive a simulator's pending wake-ups.
//!
//! The simulator only ever asks "what time is it" and "let me sleep until
//! `t`".  `ManualTicker` jumps straight to `t`, which makes a whole run
//! synchronous and repeatable in tests.  `RealtimeTicker` actually sleeps,
//! optionally sped up.

use std::thread;
use std::time::{Duration, Instant};

use tr_core::SimTime;

pub trait Ticker {
    /// Current virtual time.
    fn now(&self) -> SimTime;

    /// Block until `now() >= due`.  Returns immediately if `due` has passed.
    fn wait_until(&mut self, due: SimTime);
}

/// A virtual clock that only moves when told to.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualTicker {
    now: SimTime,
}

impl ManualTicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(now: SimTime) -> Self {
        Self { now }
    }

    /// Move the clock forward by `ms` and return the new time.
    pub fn advance(&mut self, ms: u64) -> SimTime {
        self.now = self.now.after_ms(ms);
        self.now
    }
}

impl Ticker for ManualTicker {
    fn now(&self) -> SimTime {
        self.now
    }

    fn wait_until(&mut self, due: SimTime) {
        if due > self.now {
            self.now = due;
        }
    }
}

/// A wall clock.  Virtual time is real elapsed time multiplied by `speedup`.
#[derive(Debug, Clone, Copy)]
pub struct RealtimeTicker {
    started: Instant,
    speedup: f64,
}

impl RealtimeTicker {
    pub fn new() -> Self {
        Self::with_speedup(1.0)
    }

    /// `speedup` values that are not positive and finite fall back to 1.
    pub fn with_speedup(speedup: f64) -> Self {
        let speedup = if speedup.is_finite() && speedup > 0.0 { speedup } else { 1.0 };
        Self { started: Instant::now(), speedup }
    }

    pub fn speedup(&self) -> f64 {
        self.speedup
    }
}

impl Default for RealtimeTicker {
    fn default() -> Self {
        Self::new()
    }
}

impl Ticker for RealtimeTicker {
    fn now(&self) -> SimTime {
        let elapsed = self.started.elapsed().as_secs_f64() * 1000.0 * self.speedup;
        SimTime(elapsed as u64)
    }

    fn wait_until(&mut self, due: SimTime) {
        let wait_ms = due.since(self.now());
        if wait_ms > 0 {
            thread::sleep(Duration::from_secs_f64(wait_ms as f64 / 1000.0 / self.speedup));
        }
        // Sleep can wake a hair early; spin the remainder off with a yield.
        while self.now() < due {
            thread::yield_now();
        }
    }
}
