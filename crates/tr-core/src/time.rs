//! Virtual simulation time.
//!
//! The tracking engine never reads the wall clock directly.  Time is a
//! monotonically increasing millisecond counter, `SimTime`, supplied by
//! whatever drives the simulator: a manual ticker in tests (jumps straight
//! to the next due wake) or a real-time ticker that sleeps the thread.
//! Integer milliseconds keep scheduling arithmetic exact.

use std::fmt;

/// A point on the simulation's virtual timeline, in milliseconds since the
/// driver's epoch.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub u64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0);

    /// The instant `ms` milliseconds after `self`.
    #[inline]
    pub fn after_ms(self, ms: u64) -> SimTime {
        SimTime(self.0.saturating_add(ms))
    }

    /// Milliseconds elapsed from `earlier` to `self` (zero if `earlier` is
    /// in the future).
    #[inline]
    pub fn since(self, earlier: SimTime) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    #[inline]
    pub fn as_millis(self) -> u64 {
        self.0
    }
}

impl std::ops::Add<u64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: u64) -> SimTime {
        self.after_ms(rhs)
    }
}

impl std::ops::Sub for SimTime {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: SimTime) -> u64 {
        self.since(rhs)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.0 / 1_000;
        write!(f, "{:02}:{:02}.{:03}", secs / 60, secs % 60, self.0 % 1_000)
    }
}
