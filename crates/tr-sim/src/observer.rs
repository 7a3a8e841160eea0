//! Rendering collaborator interface.

use tr_route::RouteSet;

use crate::Frame;

/// Callbacks invoked by the simulator and session as the agent moves.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: ETA printer
///
/// ```rust,ignore
/// struct EtaPrinter;
///
/// impl TrackingObserver for EtaPrinter {
///     fn on_frame(&mut self, frame: &Frame) {
///         println!("{} min, {}", frame.eta_minutes, frame.instruction());
///     }
/// }
/// ```
pub trait TrackingObserver {
    /// The route set was built or the selection changed.
    fn on_routes(&mut self, _routes: &RouteSet) {}

    /// One simulator update: departure, tick, pause, resume, or arrival.
    fn on_frame(&mut self, _frame: &Frame) {}

    /// Called once per run, right after the final frame.
    fn on_arrived(&mut self, _frame: &Frame) {}
}

/// A [`TrackingObserver`] that does nothing.
pub struct NoopObserver;

impl TrackingObserver for NoopObserver {}

/// Keeps every callback in memory.  Handy for tests and for replaying a run.
#[derive(Debug, Default)]
pub struct FrameRecorder {
    pub frames:      Vec<Frame>,
    pub arrivals:    Vec<Frame>,
    pub route_calls: usize,
}

impl FrameRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames whose status is `status`.
    pub fn with_status(&self, status: crate::SimStatus) -> impl Iterator<Item = &Frame> {
        self.frames.iter().filter(move |f| f.status == status)
    }
}

impl TrackingObserver for FrameRecorder {
    fn on_routes(&mut self, _routes: &RouteSet) {
        self.route_calls += 1;
    }

    fn on_frame(&mut self, frame: &Frame) {
        self.frames.push(frame.clone());
    }

    fn on_arrived(&mut self, frame: &Frame) {
        self.arrivals.push(frame.clone());
    }
}
