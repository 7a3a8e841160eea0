//! `MovementSimulator`: walks one agent along one route.
//!
//! # Tick accounting
//!
//! `start` arms a departure tick with zero delay.  The departure tick emits
//! the frame for waypoint 0 without moving; every later tick advances one
//! waypoint.  A route of N waypoints therefore arrives on tick N:
//!
//! ```text
//! waypoints:  0     1     2     3     4
//! ticks:      1     2     3     4     5 (Arrived)
//! ```
//!
//! # Pacing
//!
//! Each tick schedules its successor `interval ± jitter` ms later.  Strictly
//! inside the pause window of progress (`index / len`) a tick may instead
//! schedule a `Resume` after a random dwell; the resume emits a frame and
//! restarts the tick chain.  Pauses and resumes do not count as ticks.
//!
//! All randomness comes from the session's `SessionRng`, so a run is fully
//! determined by `(seed, session id, route)` and the times it is driven at.

use tracing::{debug, info};

use tr_core::{GeoPoint, RouteId, SessionRng, SimTime, TrackingConfig, bearing_deg};
use tr_nav::{EtaEstimator, NavigationAdvisor};
use tr_route::Route;

use crate::{
    Frame, SimResult, SimStatus, SimulationState, TickSchedule, Ticker, TrackingObserver,
    WakeKind,
};

/// The route currently being driven, with its precomputed ETA table.
struct ActiveRoute {
    id:        RouteId,
    waypoints: Vec<GeoPoint>,
    eta:       EtaEstimator,
}

pub struct MovementSimulator {
    config:   TrackingConfig,
    rng:      SessionRng,
    advisor:  NavigationAdvisor,
    schedule: TickSchedule,
    route:    ActiveRoute,
    state:    SimulationState,
    /// Whether the departure tick of the current run has fired.
    departed: bool,
}

impl MovementSimulator {
    pub fn new(config: TrackingConfig, rng: SessionRng) -> SimResult<Self> {
        config.validate()?;
        let eta = EtaEstimator::new(&[], config.assumed_speed_kmh)?;
        Ok(Self {
            config,
            rng,
            advisor:  NavigationAdvisor::new(),
            schedule: TickSchedule::new(),
            route:    ActiveRoute { id: RouteId::INVALID, waypoints: Vec::new(), eta },
            state:    SimulationState::idle(),
            departed: false,
        })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn status(&self) -> SimStatus {
        self.state.status
    }

    /// The route being driven, `RouteId::INVALID` before the first start.
    pub fn route_id(&self) -> RouteId {
        self.route.id
    }

    pub fn waypoints(&self) -> &[GeoPoint] {
        &self.route.waypoints
    }

    pub fn config(&self) -> &TrackingConfig {
        &self.config
    }

    /// Due time of the pending tick or resume, if any.
    pub fn next_due(&self) -> Option<SimTime> {
        self.schedule.next_due()
    }

    pub fn schedule(&self) -> &TickSchedule {
        &self.schedule
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Begin a run along `route`, departing at `now`.
    ///
    /// Any pending wake from a previous run is cancelled first.
    ///
    /// # Panics
    ///
    /// Panics if `route` has no waypoints.
    pub fn start(&mut self, route: &Route, now: SimTime) -> SimResult<()> {
        self.begin(route, now)?;
        info!(route = %route.id, name = %route.name, waypoints = route.len(), "simulation started");
        Ok(())
    }

    /// Switch to `route` mid-run.  The pending wake of the old run is
    /// cancelled before any state is reset, so only one tick chain exists.
    ///
    /// # Panics
    ///
    /// Panics if `route` has no waypoints.
    pub fn select_route(&mut self, route: &Route, now: SimTime) -> SimResult<()> {
        let previous = self.route.id;
        let at_index = self.state.current_index;
        self.begin(route, now)?;
        info!(from = %previous, to = %route.id, at_index, "route switched");
        Ok(())
    }

    fn begin(&mut self, route: &Route, now: SimTime) -> SimResult<()> {
        assert!(!route.is_empty(), "cannot simulate {} with no waypoints", route.id);
        let eta = EtaEstimator::new(&route.waypoints, self.config.assumed_speed_kmh)?;

        self.schedule.cancel();

        let waypoints = route.waypoints.clone();
        self.state = SimulationState {
            current_index: 0,
            status:        SimStatus::Moving,
            eta_minutes:   eta.eta_minutes(0),
            maneuver:      self.advisor.advise(0, &waypoints),
            bearing_deg:   departure_bearing(&waypoints),
            ticks:         0,
        };
        self.route = ActiveRoute { id: route.id, waypoints, eta };
        self.departed = false;
        self.schedule.schedule(now, WakeKind::Tick);
        Ok(())
    }

    /// Drop the pending wake and go `Idle`.  Nothing is emitted after this
    /// returns until the next `start` or `select_route`.
    ///
    /// Returns `true` if a wake was pending.
    pub fn cancel(&mut self) -> bool {
        let had_pending = self.schedule.cancel();
        let previous = self.state.status;
        self.state.status = SimStatus::Idle;
        if previous.is_active() {
            info!(route = %self.route.id, index = self.state.current_index, "simulation cancelled");
        }
        had_pending
    }

    // ── Driving ───────────────────────────────────────────────────────────

    /// Fire the pending tick at `now` instead of waiting for its due time.
    ///
    /// Returns `None` (and does nothing) unless the simulator is `Moving`.
    /// The pending wake is consumed, so the chain stays single.
    pub fn tick<O: TrackingObserver + ?Sized>(
        &mut self,
        now:      SimTime,
        observer: &mut O,
    ) -> Option<Frame> {
        if self.state.status != SimStatus::Moving {
            return None;
        }
        self.schedule.take();
        Some(self.step(now, observer))
    }

    /// Fire every wake due at or before `now`, each at its own due time.
    ///
    /// Returns the number of wakes fired.
    pub fn advance_to<O: TrackingObserver + ?Sized>(
        &mut self,
        now:      SimTime,
        observer: &mut O,
    ) -> usize {
        let mut fired = 0;
        while let Some(wake) = self.schedule.pop_due(now) {
            if !self.schedule.is_current(&wake) {
                debug!(due = %wake.due, "discarding stale wake");
                continue;
            }
            match wake.kind {
                WakeKind::Tick   => { self.step(wake.due, observer); }
                WakeKind::Resume => self.resume(wake.due, observer),
            }
            fired += 1;
        }
        fired
    }

    /// Drive the run to completion (or until cancelled) with `ticker`.
    ///
    /// Returns the number of wakes fired.
    pub fn run<T, O>(&mut self, ticker: &mut T, observer: &mut O) -> usize
    where
        T: Ticker + ?Sized,
        O: TrackingObserver + ?Sized,
    {
        let mut fired = 0;
        while let Some(due) = self.schedule.next_due() {
            ticker.wait_until(due);
            fired += self.advance_to(ticker.now(), observer);
        }
        fired
    }

    // ── Transitions ───────────────────────────────────────────────────────

    fn step<O: TrackingObserver + ?Sized>(&mut self, now: SimTime, observer: &mut O) -> Frame {
        let len = self.route.waypoints.len();
        let index = if self.departed {
            self.state.current_index + 1
        } else {
            self.departed = true;
            0
        };
        assert!(
            index < len,
            "tick fired at index {index} on {} with {len} waypoints",
            self.route.id,
        );

        let wps = &self.route.waypoints;
        self.state.current_index = index;
        self.state.ticks += 1;
        self.state.bearing_deg = if index == 0 {
            departure_bearing(wps)
        } else {
            bearing_deg(wps[index - 1], wps[index])
        };
        self.state.maneuver = self.advisor.advise(index, wps);

        if index == len - 1 {
            self.state.status = SimStatus::Arrived;
            self.state.eta_minutes = 0;
            let frame = self.frame(now);
            info!(route = %self.route.id, ticks = self.state.ticks, at = %now, "arrived");
            observer.on_frame(&frame);
            observer.on_arrived(&frame);
            return frame;
        }

        self.state.eta_minutes = self.route.eta.eta_minutes(index);

        let progress = index as f64 / len as f64;
        if self.config.in_pause_window(progress)
            && self.rng.gen_bool(self.config.pause_probability)
        {
            let dwell_ms = self.rng.gen_range(self.config.pause_min_ms..=self.config.pause_max_ms);
            self.state.status = SimStatus::Paused;
            self.schedule.schedule(now.after_ms(dwell_ms), WakeKind::Resume);
            debug!(index, dwell_ms, "paused");
        } else {
            let delay_ms = self.next_interval_ms();
            self.schedule.schedule(now.after_ms(delay_ms), WakeKind::Tick);
            debug!(index, eta = self.state.eta_minutes, delay_ms, "tick");
        }

        let frame = self.frame(now);
        observer.on_frame(&frame);
        frame
    }

    fn resume<O: TrackingObserver + ?Sized>(&mut self, now: SimTime, observer: &mut O) {
        assert_eq!(self.state.status, SimStatus::Paused, "resume fired while not paused");
        self.state.status = SimStatus::Moving;
        let delay_ms = self.next_interval_ms();
        self.schedule.schedule(now.after_ms(delay_ms), WakeKind::Tick);
        debug!(index = self.state.current_index, delay_ms, "resumed");

        let frame = self.frame(now);
        observer.on_frame(&frame);
    }

    fn next_interval_ms(&mut self) -> u64 {
        let base = self.config.tick_interval_ms;
        let jitter = self.config.tick_jitter_ms;
        self.rng.gen_range(base.saturating_sub(jitter)..=base.saturating_add(jitter))
    }

    fn frame(&self, at: SimTime) -> Frame {
        let index = self.state.current_index;
        Frame {
            route_id:    self.route.id,
            index,
            position:    self.route.waypoints[index],
            bearing_deg: self.state.bearing_deg,
            maneuver:    self.state.maneuver,
            eta_minutes: self.state.eta_minutes,
            status:      self.state.status,
            at,
        }
    }
}

impl Drop for MovementSimulator {
    fn drop(&mut self) {
        if self.schedule.cancel() {
            debug!(route = %self.route.id, "pending wake cancelled on teardown");
        }
    }
}

/// Heading from waypoint 0 toward waypoint 1; 0 for single-point routes.
fn departure_bearing(waypoints: &[GeoPoint]) -> f64 {
    match waypoints {
        [a, b, ..] => bearing_deg(*a, *b),
        _ => 0.0,
    }
}
