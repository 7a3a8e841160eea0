//! `TickSchedule`: the single pending wake-up of one simulator.
//!
//! # Single chain
//!
//! A session has at most one outstanding timer.  The schedule holds one slot
//! instead of a queue: every tick or resume schedules its successor, and
//! nothing else may.  Scheduling while the slot is occupied is a programming
//! error and panics, which makes "two tick chains driving one agent"
//! unrepresentable.
//!
//! # Epochs
//!
//! Every wake carries the epoch it was scheduled under.  `cancel` clears the
//! slot and bumps the epoch, so a wake obtained before the cancel can never
//! be honoured afterwards:
//!
//! ```text
//! schedule(t=1000, Tick)   epoch 0  → slot = Wake { 1000, Tick, e0 }
//! cancel()                 epoch 1  → slot = None
//! fire(Wake { .., e0 })             → stale, ignored
//! ```

use tr_core::SimTime;

/// What the simulator does when a wake comes due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WakeKind {
    /// Advance to the next waypoint (or depart from the first).
    Tick,
    /// End a pause; the tick chain restarts from here.
    Resume,
}

/// Generation counter of a schedule.  Bumped on every cancel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Epoch(pub u64);

/// One pending wake-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wake {
    pub due:   SimTime,
    pub kind:  WakeKind,
    pub epoch: Epoch,
}

#[derive(Debug, Default)]
pub struct TickSchedule {
    pending: Option<Wake>,
    epoch:   Epoch,
}

impl TickSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the slot.
    ///
    /// # Panics
    ///
    /// Panics if a wake is already pending.
    pub fn schedule(&mut self, due: SimTime, kind: WakeKind) {
        assert!(
            self.pending.is_none(),
            "tick chain already pending (due {:?}); cancel or pop it first",
            self.pending.map(|w| w.due),
        );
        self.pending = Some(Wake { due, kind, epoch: self.epoch });
    }

    /// Drop the pending wake, if any, and start a new epoch.
    ///
    /// Returns `true` if a wake was pending.
    pub fn cancel(&mut self) -> bool {
        self.epoch.0 += 1;
        self.pending.take().is_some()
    }

    /// Remove and return the pending wake if it is due at or before `now`.
    pub fn pop_due(&mut self, now: SimTime) -> Option<Wake> {
        match self.pending {
            Some(w) if w.due <= now => self.pending.take(),
            _ => None,
        }
    }

    /// Remove and return the pending wake regardless of its due time.
    pub fn take(&mut self) -> Option<Wake> {
        self.pending.take()
    }

    /// `true` if `wake` was scheduled under the current epoch.
    #[inline]
    pub fn is_current(&self, wake: &Wake) -> bool {
        wake.epoch == self.epoch
    }

    pub fn next_due(&self) -> Option<SimTime> {
        self.pending.map(|w| w.due)
    }

    pub fn pending(&self) -> Option<&Wake> {
        self.pending.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }
}
